//! Triggers: labelled sets of requirement groups.

use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;

/// An ordered list of requirements that must all be true together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequirementGroup {
    /// Display label, e.g. `"Core"` or `"Alt 1"`.
    pub label: String,
    pub requirements: Vec<Requirement>,
}

impl RequirementGroup {
    pub fn new(label: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        Self {
            label: label.into(),
            requirements,
        }
    }

    /// Label for the group at `index` in a core/alt trigger layout.
    pub fn label_for_index(index: usize) -> String {
        if index == 0 {
            "Core".to_string()
        } else {
            format!("Alt {index}")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// A named set of requirement groups.
///
/// The label is the matching key when two trigger lists are diffed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    pub label: String,
    #[serde(default)]
    pub groups: Vec<RequirementGroup>,
}

impl Trigger {
    pub fn new(label: impl Into<String>, groups: Vec<RequirementGroup>) -> Self {
        Self {
            label: label.into(),
            groups,
        }
    }

    /// Build a core/alt trigger, labelling groups `Core`, `Alt 1`, `Alt 2`, ...
    pub fn with_core_and_alts(label: impl Into<String>, groups: Vec<Vec<Requirement>>) -> Self {
        let groups = groups
            .into_iter()
            .enumerate()
            .map(|(i, reqs)| RequirementGroup::new(RequirementGroup::label_for_index(i), reqs))
            .collect();
        Self::new(label, groups)
    }

    /// The core group, if any.
    pub fn core(&self) -> Option<&RequirementGroup> {
        self.groups.first()
    }

    /// Total number of requirements across all groups.
    pub fn requirement_count(&self) -> usize {
        self.groups.iter().map(|g| g.requirements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(RequirementGroup::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::{Field, FieldSize, RequirementOperator};

    fn req(addr: u32) -> Requirement {
        Requirement::compare(
            Field::memory(FieldSize::EightBit, addr),
            RequirementOperator::Equal,
            Field::value(1),
        )
    }

    #[test]
    fn core_and_alts_are_labelled_in_order() {
        let trigger = Trigger::with_core_and_alts("", vec![vec![req(1)], vec![req(2)], vec![]]);
        let labels: Vec<_> = trigger.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Core", "Alt 1", "Alt 2"]);
        assert_eq!(trigger.requirement_count(), 2);
        assert!(!trigger.is_empty());
    }

    #[test]
    fn trigger_without_requirements_is_empty() {
        assert!(Trigger::new("Cancel", vec![RequirementGroup::new("Core", vec![])]).is_empty());
        assert!(Trigger::default().is_empty());
        assert!(Trigger::default().core().is_none());
    }
}
