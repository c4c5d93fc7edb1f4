//! The asset model shared by every source slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::trigger::Trigger;

/// Numeric asset identity. `0` means unassigned.
pub type AssetId = u32;

/// The kinds of asset the reconciler understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Achievement,
    Leaderboard,
    RichPresence,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Achievement => write!(f, "achievement"),
            Self::Leaderboard => write!(f, "leaderboard"),
            Self::RichPresence => write!(f, "rich presence"),
        }
    }
}

impl FromStr for AssetKind {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "achievement" => Ok(Self::Achievement),
            "leaderboard" => Ok(Self::Leaderboard),
            "rich_presence" | "richpresence" => Ok(Self::RichPresence),
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

/// How a leaderboard value is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Value,
    Score,
    Frames,
    Centiseconds,
    Seconds,
    Minutes,
    Other,
}

/// Fields that only exist for one kind of asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetDetails {
    Achievement {
        #[serde(default)]
        category: Option<String>,
    },
    Leaderboard {
        #[serde(default)]
        format: ValueFormat,
        #[serde(default)]
        lower_is_better: bool,
    },
    RichPresence {
        #[serde(default)]
        script: String,
    },
}

impl AssetDetails {
    pub fn kind(&self) -> AssetKind {
        match self {
            Self::Achievement { .. } => AssetKind::Achievement,
            Self::Leaderboard { .. } => AssetKind::Leaderboard,
            Self::RichPresence { .. } => AssetKind::RichPresence,
        }
    }
}

/// One representation of a gamification asset.
///
/// Slots hold assets behind shared pointers and replace them wholesale; an
/// `Asset` is never edited once it has been placed in a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: AssetId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub badge_name: String,
    #[serde(default)]
    pub source_line: u32,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    /// Only meaningful for published assets.
    #[serde(default)]
    pub is_unofficial: bool,
    pub details: AssetDetails,
}

impl Asset {
    fn with_details(title: impl Into<String>, details: AssetDetails) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            points: 0,
            badge_name: String::new(),
            source_line: 0,
            triggers: Vec::new(),
            is_unofficial: false,
            details,
        }
    }

    pub fn achievement(title: impl Into<String>, description: impl Into<String>, points: u32) -> Self {
        let mut asset = Self::with_details(title, AssetDetails::Achievement { category: None });
        asset.description = description.into();
        asset.points = points;
        asset
    }

    pub fn leaderboard(title: impl Into<String>, description: impl Into<String>, format: ValueFormat) -> Self {
        let mut asset = Self::with_details(
            title,
            AssetDetails::Leaderboard {
                format,
                lower_is_better: false,
            },
        );
        asset.description = description.into();
        asset
    }

    pub fn rich_presence(script: impl Into<String>) -> Self {
        Self::with_details(
            "Rich Presence",
            AssetDetails::RichPresence {
                script: script.into(),
            },
        )
    }

    pub fn kind(&self) -> AssetKind {
        self.details.kind()
    }

    pub fn with_id(mut self, id: AssetId) -> Self {
        self.id = id;
        self
    }

    pub fn with_badge(mut self, badge_name: impl Into<String>) -> Self {
        self.badge_name = badge_name.into();
        self
    }

    pub fn with_triggers(mut self, triggers: Vec<Trigger>) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn with_source_line(mut self, source_line: u32) -> Self {
        self.source_line = source_line;
        self
    }

    pub fn unofficial(mut self) -> Self {
        self.is_unofficial = true;
        self
    }
}
