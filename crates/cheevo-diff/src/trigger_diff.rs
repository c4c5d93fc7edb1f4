//! Trigger-level diff: pair triggers by label, then diff their groups.
//!
//! Output order is total: every reference trigger in reference order (paired
//! with the first unconsumed trigger carrying the same label, or with nothing),
//! followed by the unmatched triggers of the other side in their original order.

use cheevo_types::{Requirement, RequirementGroup, Trigger};
use serde::Serialize;

use crate::requirement_diff::{diff_requirements, RequirementComparison};

/// The result of comparing two trigger lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TriggerDiff {
    pub comparisons: Vec<TriggerComparison>,
}

impl TriggerDiff {
    /// Create an empty trigger diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any leaf requirement differs.
    pub fn is_modified(&self) -> bool {
        self.comparisons.iter().any(TriggerComparison::is_modified)
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    /// Number of modified leaf requirements across all triggers.
    pub fn modified_requirements(&self) -> usize {
        self.comparisons
            .iter()
            .map(TriggerComparison::modified_requirements)
            .sum()
    }
}

/// Pairs one reference trigger with one compared trigger.
///
/// A missing side stands for the empty placeholder trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TriggerComparison {
    pub label: String,
    pub reference: Option<Trigger>,
    pub compared: Option<Trigger>,
    pub groups: Vec<GroupComparison>,
}

impl TriggerComparison {
    pub fn is_modified(&self) -> bool {
        self.groups.iter().any(GroupComparison::is_modified)
    }

    /// The trigger exists only on the reference side.
    pub fn is_added(&self) -> bool {
        self.compared.is_none()
    }

    /// The trigger exists only on the compared side.
    pub fn is_removed(&self) -> bool {
        self.reference.is_none()
    }

    pub fn modified_requirements(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.requirements)
            .filter(|r| r.is_modified)
            .count()
    }
}

/// Requirement comparisons for one positional group pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupComparison {
    pub label: String,
    pub requirements: Vec<RequirementComparison>,
}

impl GroupComparison {
    pub fn is_modified(&self) -> bool {
        self.requirements.iter().any(|r| r.is_modified)
    }
}

/// Compare `other` against `reference`.
pub fn diff_triggers(reference: &[Trigger], other: &[Trigger]) -> TriggerDiff {
    let mut consumed = vec![false; other.len()];
    let mut comparisons = Vec::with_capacity(reference.len() + other.len());

    for trigger in reference {
        let matched = other
            .iter()
            .enumerate()
            .find(|(i, t)| !consumed[*i] && t.label == trigger.label)
            .map(|(i, t)| {
                consumed[i] = true;
                t
            });
        comparisons.push(compare_triggers(Some(trigger), matched));
    }

    for (trigger, _) in other.iter().zip(&consumed).filter(|(_, used)| !**used) {
        comparisons.push(compare_triggers(None, Some(trigger)));
    }

    TriggerDiff { comparisons }
}

fn compare_triggers(reference: Option<&Trigger>, compared: Option<&Trigger>) -> TriggerComparison {
    let label = reference
        .or(compared)
        .map(|t| t.label.clone())
        .unwrap_or_default();

    let no_groups: &[RequirementGroup] = &[];
    let reference_groups = reference.map_or(no_groups, |t| t.groups.as_slice());
    let compared_groups = compared.map_or(no_groups, |t| t.groups.as_slice());

    let groups = (0..reference_groups.len().max(compared_groups.len()))
        .map(|i| compare_groups(i, reference_groups.get(i), compared_groups.get(i)))
        .collect();

    TriggerComparison {
        label,
        reference: reference.cloned(),
        compared: compared.cloned(),
        groups,
    }
}

fn compare_groups(
    index: usize,
    reference: Option<&RequirementGroup>,
    compared: Option<&RequirementGroup>,
) -> GroupComparison {
    let label = reference
        .or(compared)
        .map(|g| g.label.clone())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| RequirementGroup::label_for_index(index));

    let none: &[Requirement] = &[];
    let requirements = diff_requirements(
        reference.map_or(none, |g| g.requirements.as_slice()),
        compared.map_or(none, |g| g.requirements.as_slice()),
    );

    GroupComparison {
        label,
        requirements,
    }
}
