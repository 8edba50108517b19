use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;

pub trait SerializableOutputDisplay {
    fn write_json(&self, writer: impl Write) -> Result<(), serde_json::Error>;
    fn write_json_pretty(&self, writer: impl Write) -> Result<(), serde_json::Error>;
    fn write_yaml(&self, writer: impl Write) -> Result<(), serde_yaml::Error>;
}

impl<T: ?Sized + Serialize> SerializableOutputDisplay for T {
    fn write_json(&self, writer: impl Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }

    fn write_json_pretty(&self, writer: impl Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }

    fn write_yaml(&self, writer: impl Write) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(writer, self)
    }
}

pub trait CliWrite {
    fn write_as(&self, format: OutputFormat, writer: impl Write) -> anyhow::Result<()>;
}

impl<T: Serialize> CliWrite for T {
    fn write_as(&self, format: OutputFormat, writer: impl Write) -> anyhow::Result<()> {
        match format {
            OutputFormat::Yaml => self.write_yaml(writer)?,
            OutputFormat::Json => self.write_json(writer)?,
            OutputFormat::JsonPretty => self.write_json_pretty(writer)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nad_fn_core::function::resource_list::ResourceList;

    use crate::cli::OutputFormat;

    use super::CliWrite;

    fn written(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        ResourceList::default().write_as(format, &mut buffer).unwrap();

        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn writes_yaml() {
        assert_eq!(
            written(OutputFormat::Yaml),
            "apiVersion: config.kubernetes.io/v1\nkind: ResourceList\nitems: []\n"
        );
    }

    #[test]
    fn writes_json() {
        assert_eq!(
            written(OutputFormat::Json),
            r#"{"apiVersion":"config.kubernetes.io/v1","kind":"ResourceList","items":[]}"#
        );
    }
}
