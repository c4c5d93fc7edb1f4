//! Display rendering for trigger lists and comparisons.
//!
//! Rendering is cosmetic: a [`RenderContext`] carries the number format and the
//! code notes used to annotate addresses, and is passed explicitly to every
//! call.

use std::collections::BTreeMap;

use cheevo_types::{NumberFormat, Requirement, Trigger};
use serde::Serialize;

use crate::requirement_diff::RequirementComparison;
use crate::trigger_diff::TriggerComparison;

/// Source of human-written notes for memory addresses.
pub trait NoteProvider {
    fn note(&self, address: u32) -> Option<&str>;
}

/// Code notes keyed by address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeNotes {
    notes: BTreeMap<u32, String>,
}

impl CodeNotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: u32, note: impl Into<String>) {
        self.notes.insert(address, note.into());
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<(u32, String)> for CodeNotes {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

impl NoteProvider for CodeNotes {
    fn note(&self, address: u32) -> Option<&str> {
        self.notes.get(&address).map(String::as_str)
    }
}

/// Everything rendering needs besides the data itself.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub number_format: NumberFormat,
    pub notes: Option<&'a dyn NoteProvider>,
}

impl<'a> RenderContext<'a> {
    pub fn new(number_format: NumberFormat) -> Self {
        Self {
            number_format,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &'a dyn NoteProvider) -> Self {
        self.notes = Some(notes);
        self
    }

    fn note_for(&self, requirement: &Requirement) -> Option<String> {
        let notes = self.notes?;
        requirement
            .addresses()
            .find_map(|addr| notes.note(addr))
            .and_then(|n| n.lines().next())
            .map(str::to_string)
    }

    /// Render one requirement pairing.
    pub fn render_comparison(&self, comparison: &RequirementComparison) -> RenderedRow {
        let render = |r: &Requirement| r.render(self.number_format);
        let note = comparison
            .reference
            .as_ref()
            .or(comparison.compared.as_ref())
            .and_then(|r| self.note_for(r));
        RenderedRow {
            reference: comparison.reference.as_ref().map(render),
            compared: comparison.compared.as_ref().map(render),
            note,
            is_modified: comparison.is_modified,
        }
    }

    /// Render a trigger comparison side by side.
    pub fn render_comparison_trigger(&self, trigger: &TriggerComparison) -> RenderedTrigger {
        RenderedTrigger {
            label: trigger.label.clone(),
            groups: trigger
                .groups
                .iter()
                .map(|g| RenderedGroup {
                    label: g.label.clone(),
                    rows: g
                        .requirements
                        .iter()
                        .map(|r| self.render_comparison(r))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Render a plain trigger with no compared side.
    pub fn render_trigger(&self, trigger: &Trigger) -> RenderedTrigger {
        RenderedTrigger {
            label: trigger.label.clone(),
            groups: trigger
                .groups
                .iter()
                .map(|g| RenderedGroup {
                    label: g.label.clone(),
                    rows: g
                        .requirements
                        .iter()
                        .map(|r| RenderedRow {
                            reference: Some(r.render(self.number_format)),
                            compared: None,
                            note: self.note_for(r),
                            is_modified: false,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedTrigger {
    pub label: String,
    pub groups: Vec<RenderedGroup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedGroup {
    pub label: String,
    pub rows: Vec<RenderedRow>,
}

/// One display row: the generated text, the compared text, and a note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub reference: Option<String>,
    pub compared: Option<String>,
    pub note: Option<String>,
    pub is_modified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger_diff::diff_triggers;
    use cheevo_types::{Field, FieldSize, RequirementOperator};

    fn req(addr: u32, value: u32) -> Requirement {
        Requirement::compare(
            Field::memory(FieldSize::EightBit, addr),
            RequirementOperator::Equal,
            Field::value(value),
        )
    }

    #[test]
    fn notes_use_first_line_of_first_address() {
        let mut notes = CodeNotes::new();
        notes.insert(0x10, "Lives\nbyte, 0-9");
        let ctx = RenderContext::new(NumberFormat::Decimal).with_notes(&notes);

        let trigger = Trigger::with_core_and_alts("", vec![vec![req(0x10, 3)]]);
        let rendered = ctx.render_trigger(&trigger);
        let row = &rendered.groups[0].rows[0];
        assert_eq!(row.reference.as_deref(), Some("byte(0x000010) == 3"));
        assert_eq!(row.note.as_deref(), Some("Lives"));
    }

    #[test]
    fn number_format_changes_text_not_modification() {
        let reference = vec![Trigger::with_core_and_alts("", vec![vec![req(1, 10)]])];
        let other = vec![Trigger::with_core_and_alts("", vec![vec![req(1, 11)]])];
        let diff = diff_triggers(&reference, &other);

        let dec = RenderContext::new(NumberFormat::Decimal).render_comparison_trigger(&diff.comparisons[0]);
        let hex = RenderContext::new(NumberFormat::Hexadecimal).render_comparison_trigger(&diff.comparisons[0]);

        let dec_rows = &dec.groups[0].rows;
        let hex_rows = &hex.groups[0].rows;
        assert_eq!(dec_rows.len(), hex_rows.len());
        for (d, h) in dec_rows.iter().zip(hex_rows) {
            assert_eq!(d.is_modified, h.is_modified);
        }
        assert!(hex_rows.iter().any(|r| r.reference.as_deref() == Some("byte(0x000001) == 0x0A")));
        assert!(dec_rows.iter().any(|r| r.compared.as_deref() == Some("byte(0x000001) == 11")));
    }

    #[test]
    fn missing_notes_render_without_annotation() {
        let ctx = RenderContext::new(NumberFormat::Decimal);
        let rendered = ctx.render_trigger(&Trigger::with_core_and_alts("", vec![vec![req(5, 1)]]));
        assert!(rendered.groups[0].rows[0].note.is_none());
    }
}
