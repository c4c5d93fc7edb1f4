//! Requirement-level diff: align two requirement lists.
//!
//! Uses the `similar` crate (Myers diff algorithm) so that an inserted or
//! removed condition only marks itself as modified, not every condition after
//! it.

use cheevo_types::Requirement;
use serde::Serialize;
use similar::{capture_diff_slices, Algorithm, DiffOp};

/// A pairing of one requirement from each side.
///
/// A missing side means the requirement only exists on the other one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequirementComparison {
    /// The requirement from the generated (reference) side.
    pub reference: Option<Requirement>,
    /// The requirement from the side being compared against.
    pub compared: Option<Requirement>,
    pub is_modified: bool,
}

impl RequirementComparison {
    fn unchanged(requirement: &Requirement) -> Self {
        Self {
            reference: Some(requirement.clone()),
            compared: Some(requirement.clone()),
            is_modified: false,
        }
    }

    fn changed(reference: Option<&Requirement>, compared: Option<&Requirement>) -> Self {
        Self {
            reference: reference.cloned(),
            compared: compared.cloned(),
            is_modified: true,
        }
    }

    /// The requirement exists only on the reference side.
    pub fn is_added(&self) -> bool {
        self.reference.is_some() && self.compared.is_none()
    }

    /// The requirement exists only on the compared side.
    pub fn is_removed(&self) -> bool {
        self.reference.is_none() && self.compared.is_some()
    }
}

/// Align `compared` against `reference`, in diff order.
pub fn diff_requirements(
    reference: &[Requirement],
    compared: &[Requirement],
) -> Vec<RequirementComparison> {
    let mut result = Vec::with_capacity(reference.len().max(compared.len()));

    for op in capture_diff_slices(Algorithm::Myers, compared, reference) {
        match op {
            DiffOp::Equal { new_index, len, .. } => {
                result.extend(
                    reference[new_index..new_index + len]
                        .iter()
                        .map(RequirementComparison::unchanged),
                );
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                result.extend(
                    compared[old_index..old_index + old_len]
                        .iter()
                        .map(|c| RequirementComparison::changed(None, Some(c))),
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                result.extend(
                    reference[new_index..new_index + new_len]
                        .iter()
                        .map(|r| RequirementComparison::changed(Some(r), None)),
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let old = &compared[old_index..old_index + old_len];
                let new = &reference[new_index..new_index + new_len];
                for i in 0..old_len.max(new_len) {
                    result.push(RequirementComparison::changed(new.get(i), old.get(i)));
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheevo_types::{Field, FieldSize, RequirementOperator};

    fn req(addr: u32, value: u32) -> Requirement {
        Requirement::compare(
            Field::memory(FieldSize::EightBit, addr),
            RequirementOperator::Equal,
            Field::value(value),
        )
    }

    #[test]
    fn identical_lists_are_unmodified() {
        let list = vec![req(1, 1), req(2, 2)];
        let diff = diff_requirements(&list, &list);
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|c| !c.is_modified));
    }

    #[test]
    fn inserted_requirement_only_marks_itself() {
        let reference = vec![req(1, 1), req(9, 9), req(2, 2)];
        let compared = vec![req(1, 1), req(2, 2)];

        let diff = diff_requirements(&reference, &compared);
        assert_eq!(diff.len(), 3);
        assert!(!diff[0].is_modified);
        assert!(diff[1].is_added());
        assert!(!diff[2].is_modified);
    }

    #[test]
    fn removed_requirement_is_one_sided() {
        let reference = vec![req(1, 1)];
        let compared = vec![req(1, 1), req(3, 3)];

        let diff = diff_requirements(&reference, &compared);
        assert_eq!(diff.len(), 2);
        assert!(diff[1].is_removed());
        assert_eq!(diff[1].compared, Some(req(3, 3)));
    }

    #[test]
    fn changed_value_pairs_both_sides() {
        let reference = vec![req(1, 1), req(2, 5)];
        let compared = vec![req(1, 1), req(2, 4)];

        let diff = diff_requirements(&reference, &compared);
        let modified: Vec<_> = diff.iter().filter(|c| c.is_modified).collect();
        assert!(!modified.is_empty());
        assert!(modified
            .iter()
            .any(|c| c.reference == Some(req(2, 5)) || c.compared == Some(req(2, 4))));
    }

    #[test]
    fn requirements_satisfy_alignment_bounds() {
        fn alignable<T: Eq + std::hash::Hash + Ord>(_: &[T]) {}
        let list = vec![req(1, 1).with_hit_target(3), req(1, 1)];
        alignable(&list);
        let diff = diff_requirements(&list, &list[..1]);
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.iter().filter(|c| c.is_modified).count(), 1);
    }

    #[test]
    fn empty_against_populated() {
        let diff = diff_requirements(&[], &[req(1, 1), req(2, 2)]);
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(RequirementComparison::is_removed));
    }
}
