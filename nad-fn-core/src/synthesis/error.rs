use std::borrow::Cow;

use thiserror::Error;

use crate::ip::IpParseError;

use super::attachment::SynthesizedAttachmentBuilderError;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid input package ({})!", .0)]
    Validation(Cow<'static, str>),
    #[error("Expecting a for name and a for namespace, got for name: '{}', for namespace: '{}'!", .name, .namespace)]
    Correlation { name: String, namespace: String },
    #[error("Expected at least one IPClaim or VLANClaim object to generate the NetworkAttachmentDefinition!")]
    MissingAllocation,
    #[error("CNI type '{}' is not supported by the workload cluster! Workload cluster CNI(s): {:?}", .requested, .supported)]
    UnsupportedPlugin {
        requested: String,
        supported: Vec<String>,
    },
    #[error("Couldn't determine the address family! Reason: {}", .0)]
    AddressParse(IpParseError),
    #[error("Couldn't assemble the attachment! Reason: {}", .0)]
    Builder(SynthesizedAttachmentBuilderError),
    #[error("Couldn't render the CNI config! Reason: {}", .0)]
    Render(serde_json::Error),
}

impl SynthesisError {
    pub fn validation(reason: impl Into<Cow<'static, str>>) -> Self {
        SynthesisError::Validation(reason.into())
    }
}

impl From<IpParseError> for SynthesisError {
    fn from(value: IpParseError) -> Self {
        SynthesisError::AddressParse(value)
    }
}

impl From<SynthesizedAttachmentBuilderError> for SynthesisError {
    fn from(value: SynthesizedAttachmentBuilderError) -> Self {
        SynthesisError::Builder(value)
    }
}
