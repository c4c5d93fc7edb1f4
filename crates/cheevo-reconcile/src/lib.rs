//! Reconciliation engine for cheevo.
//!
//! An asset can exist as a Generated copy (compiled from script), a Local copy
//! (on disk) and a Published copy (from the server). This crate decides how
//! those relate, which one may be promoted, and commits changes back to the
//! Local slot.
//!
//! # Key Types
//!
//! - [`AssetReconciler`] -- owns the three slots and recomputes a [`ReconcileSnapshot`]
//! - [`ComparisonEngine`] / [`CompareState`] -- the comparison state machine
//! - [`AssetSource`] -- one slot with lazily built display triggers
//! - [`AssetKindHooks`] -- per-kind comparison, trigger building and validation
//! - [`LocalIdPool`] -- temporary id allocation for unpublished assets

pub mod badge;
pub mod config;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod id_alloc;
pub mod kinds;
pub mod reconciler;
pub mod source;

pub use badge::{is_valid_badge_name, BadgeRef};
pub use config::{ReconcileConfig, LOCAL_ID_BASE};
pub use engine::{CompareState, Comparison, ComparisonEngine, DisplayTriggers, ModifiedFields};
pub use error::{ReconcileError, ReconcileResult};
pub use hooks::{AssetKindHooks, Diagnostics};
pub use id_alloc::{allocate_local_id, LocalIdPool};
pub use kinds::{hooks_for, AchievementHooks, LeaderboardHooks, RichPresenceHooks};
pub use reconciler::{AssetReconciler, ReconcileSnapshot};
pub use source::AssetSource;
