use cheevo_types::{Asset, AssetDetails, AssetKind};
use tracing::debug;

use crate::engine::ModifiedFields;
use crate::hooks::{AssetKindHooks, Diagnostics};

/// Point values the server accepts.
pub const VALID_POINTS: [u32; 10] = [0, 1, 2, 3, 4, 5, 10, 25, 50, 100];

/// Hooks for achievements: points and category are compared, and commits
/// are checked for values the server would reject.
#[derive(Clone, Copy, Debug, Default)]
pub struct AchievementHooks;

fn category(asset: &Asset) -> Option<&str> {
    match &asset.details {
        AssetDetails::Achievement { category } => category.as_deref(),
        _ => None,
    }
}

impl AssetKindHooks for AchievementHooks {
    fn kind(&self) -> AssetKind {
        AssetKind::Achievement
    }

    fn asset_specific_modified(
        &self,
        source: &Asset,
        generated: &Asset,
        flags: &mut ModifiedFields,
    ) -> bool {
        if source.points != generated.points {
            flags.points = true;
        }
        flags.points || category(source) != category(generated)
    }

    fn merge_local(
        &self,
        new: Option<&Asset>,
        local: Option<&Asset>,
        diagnostics: &mut Diagnostics,
        validate_all: bool,
    ) {
        let Some(asset) = new else {
            if let Some(local) = local {
                debug!(id = local.id, title = %local.title, "removing local achievement");
            }
            return;
        };

        if !VALID_POINTS.contains(&asset.points) {
            diagnostics.warn(format!(
                "{} points is not a valid value for \"{}\"",
                asset.points, asset.title
            ));
        }
        if asset.title.trim().is_empty() {
            diagnostics.warn("Achievement has no title");
        }
        if asset.description.trim().is_empty() {
            diagnostics.warn(format!("\"{}\" has no description", asset.title));
        }
        if validate_all {
            let has_core = asset
                .triggers
                .iter()
                .filter_map(|t| t.core())
                .any(|core| !core.is_empty());
            if !has_core {
                diagnostics.warn(format!("\"{}\" has no core requirements", asset.title));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheevo_types::{Field, FieldSize, Requirement, RequirementOperator, Trigger};

    fn with_core(asset: Asset) -> Asset {
        asset.with_triggers(vec![Trigger::with_core_and_alts(
            "",
            vec![vec![Requirement::compare(
                Field::memory(FieldSize::EightBit, 1),
                RequirementOperator::Equal,
                Field::value(1),
            )]],
        )])
    }

    #[test]
    fn points_difference_sets_flag() {
        let mut flags = ModifiedFields::default();
        let modified = AchievementHooks.asset_specific_modified(
            &Asset::achievement("a", "b", 5),
            &Asset::achievement("a", "b", 10),
            &mut flags,
        );
        assert!(modified);
        assert!(flags.points);
    }

    #[test]
    fn category_difference_is_modified_without_flag() {
        let mut source = Asset::achievement("a", "b", 5);
        source.details = AssetDetails::Achievement {
            category: Some("progression".into()),
        };
        let mut flags = ModifiedFields::default();
        assert!(AchievementHooks.asset_specific_modified(
            &source,
            &Asset::achievement("a", "b", 5),
            &mut flags
        ));
        assert!(!flags.any());
    }

    #[test]
    fn valid_commit_has_no_warnings() {
        let mut diagnostics = Diagnostics::new();
        AchievementHooks.merge_local(
            Some(&with_core(Asset::achievement("Win", "Win the game", 25))),
            None,
            &mut diagnostics,
            true,
        );
        assert!(diagnostics.is_empty(), "{diagnostics}");
    }

    #[test]
    fn odd_points_and_empty_description_warn() {
        let mut diagnostics = Diagnostics::new();
        AchievementHooks.merge_local(
            Some(&with_core(Asset::achievement("Win", "", 7))),
            None,
            &mut diagnostics,
            false,
        );
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.warnings()[0].contains("7 points"));
    }

    #[test]
    fn missing_core_only_checked_when_validating_all() {
        let asset = Asset::achievement("Win", "Win it", 5);

        let mut diagnostics = Diagnostics::new();
        AchievementHooks.merge_local(Some(&asset), None, &mut diagnostics, false);
        assert!(diagnostics.is_empty());

        AchievementHooks.merge_local(Some(&asset), None, &mut diagnostics, true);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn delete_produces_no_warnings() {
        let mut diagnostics = Diagnostics::new();
        AchievementHooks.merge_local(
            None,
            Some(&Asset::achievement("a", "b", 5)),
            &mut diagnostics,
            false,
        );
        assert!(diagnostics.is_empty());
    }
}
