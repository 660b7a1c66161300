use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Representation requested from the vendor and decoded out of its response.
///
/// `Array` and `Object` are client-side conveniences: both travel as `JSON` on
/// the wire and are decoded into a mapping or a dynamic object afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
    Array,
    Object,
    Line,
    Console,
    Var,
}

impl OutputFormat {
    /// Value sent in the `OutputType` query parameter
    pub fn wire_name(self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Array | OutputFormat::Object => "JSON",
            OutputFormat::Xml => "XML",
            OutputFormat::Line => "LINE",
            OutputFormat::Console => "CONSOLE",
            OutputFormat::Var => "VAR",
        }
    }

    /// Name used in configuration files and on the command line
    pub fn config_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "JSON",
            OutputFormat::Xml => "XML",
            OutputFormat::Array => "ARRAY",
            OutputFormat::Object => "OBJECT",
            OutputFormat::Line => "LINE",
            OutputFormat::Console => "CONSOLE",
            OutputFormat::Var => "VAR",
        }
    }

    /// Whether responses in this format are validated against the vendor envelope
    pub fn is_decoded(self) -> bool {
        matches!(
            self,
            OutputFormat::Xml | OutputFormat::Array | OutputFormat::Object
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(OutputFormat::Json),
            "XML" => Ok(OutputFormat::Xml),
            "ARRAY" => Ok(OutputFormat::Array),
            "OBJECT" => Ok(OutputFormat::Object),
            "LINE" => Ok(OutputFormat::Line),
            "CONSOLE" => Ok(OutputFormat::Console),
            "VAR" => Ok(OutputFormat::Var),
            other => Err(AppError::config_error(format!(
                "Unknown output type '{other}'. Options include: JSON, XML, ARRAY, OBJECT, LINE, CONSOLE, VAR"
            ))),
        }
    }
}
