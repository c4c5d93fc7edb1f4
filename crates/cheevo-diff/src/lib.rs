//! Structural diff engine for cheevo.
//!
//! Compares trigger lists recursively (trigger → group → requirement) and
//! produces stable, ordered comparison records for display and tests.
//!
//! # Key Types
//!
//! - [`TriggerDiff`] / [`TriggerComparison`] -- Label-matched trigger pairings
//! - [`GroupComparison`] / [`RequirementComparison`] -- Positional groups, Myers-aligned requirements
//! - [`WordDiff`] -- Word-level diff for Title/Description text
//! - [`RenderContext`] / [`NoteProvider`] -- Cosmetic rendering of comparisons

pub mod render;
pub mod requirement_diff;
pub mod text_diff;
pub mod trigger_diff;

pub use render::{
    CodeNotes, NoteProvider, RenderContext, RenderedGroup, RenderedRow, RenderedTrigger,
};
pub use requirement_diff::{diff_requirements, RequirementComparison};
pub use text_diff::{diff_text, WordDiff, WordSegment};
pub use trigger_diff::{diff_triggers, GroupComparison, TriggerComparison, TriggerDiff};
