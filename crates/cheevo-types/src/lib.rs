//! Foundation types for cheevo.
//!
//! Every other cheevo crate depends on `cheevo-types`.
//!
//! # Key Types
//!
//! - [`Asset`] / [`AssetDetails`] -- one representation of an achievement, leaderboard or rich presence
//! - [`Trigger`] / [`RequirementGroup`] / [`Requirement`] -- the condition tree that gets diffed
//! - [`SourceRole`] -- Generated, Local or Published slot
//! - [`NumberFormat`] -- cosmetic rendering choice for values

pub mod asset;
pub mod error;
pub mod format;
pub mod requirement;
pub mod role;
pub mod trigger;

pub use asset::{Asset, AssetDetails, AssetId, AssetKind, ValueFormat};
pub use error::{TypeError, TypeResult};
pub use format::NumberFormat;
pub use requirement::{
    Field, FieldSize, FieldType, Requirement, RequirementOperator, RequirementType,
};
pub use role::SourceRole;
pub use trigger::{RequirementGroup, Trigger};
