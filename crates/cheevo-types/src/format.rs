//! Number formatting used when rendering requirement values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// How constant values and addresses are rendered for display.
///
/// Purely cosmetic: the structural diff never looks at it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Decimal,
    Hexadecimal,
}

impl NumberFormat {
    /// Format a constant value.
    pub fn format_value(self, value: u32) -> String {
        match self {
            Self::Decimal => value.to_string(),
            Self::Hexadecimal => format!("0x{value:02X}"),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => write!(f, "decimal"),
            Self::Hexadecimal => write!(f, "hexadecimal"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" | "dec" => Ok(Self::Decimal),
            "hexadecimal" | "hex" => Ok(Self::Hexadecimal),
            other => Err(TypeError::UnknownNumberFormat(other.to_string())),
        }
    }
}
