use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Which representation of an asset a slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceRole {
    /// Produced by compiling the source script.
    Generated,
    /// Persisted in the user's local store.
    Local,
    /// Retrieved from the remote authority.
    Published,
}

impl SourceRole {
    /// All roles in slot order.
    pub const ALL: [SourceRole; 3] = [Self::Generated, Self::Local, Self::Published];

    /// Default display label for a slot of this role.
    pub fn label(self) -> &'static str {
        match self {
            Self::Generated => "Generated",
            Self::Local => "Local",
            Self::Published => "Published",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceRole {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generated" => Ok(Self::Generated),
            "local" => Ok(Self::Local),
            "published" | "core" => Ok(Self::Published),
            other => Err(TypeError::UnknownRole(other.to_string())),
        }
    }
}
