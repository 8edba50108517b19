use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use serde_yaml::Value;

use crate::resources::object::{value_name, value_namespace};

pub const RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1";
pub const RESOURCE_LIST_KIND: &str = "ResourceList";

/// KRM function input/output envelope.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub items: Vec<Value>,
    pub function_config: Option<Value>,
    pub results: Option<Vec<FunctionResult>>,
}

impl Default for ResourceList {
    fn default() -> Self {
        Self {
            api_version: RESOURCE_LIST_API_VERSION.to_owned(),
            kind: RESOURCE_LIST_KIND.to_owned(),
            items: Vec::new(),
            function_config: None,
            results: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub message: String,
    pub severity: Severity,
    pub resource_ref: Option<ResourceRef>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceList {
    fn push_result(&mut self, severity: Severity, message: impl Into<String>) {
        self.results.get_or_insert_with(Vec::new).push(FunctionResult {
            message: message.into(),
            severity,
            resource_ref: None,
        });
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.push_result(Severity::Error, message)
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.push_result(Severity::Info, message)
    }

    /// Replaces the item with the same type, name and namespace, appends otherwise.
    pub fn upsert(&mut self, item: Value) {
        let position = self.items.iter().position(|existing| same_identity(existing, &item));

        match position {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }
}

pub fn same_identity(a: &Value, b: &Value) -> bool {
    a.get("apiVersion") == b.get("apiVersion")
        && a.get("kind") == b.get("kind")
        && value_name(a) == value_name(b)
        && value_namespace(a) == value_namespace(b)
}
