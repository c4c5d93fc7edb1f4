use cheevo_types::{Asset, AssetDetails, AssetKind, Trigger, ValueFormat};

use crate::engine::ModifiedFields;
use crate::hooks::{AssetKindHooks, Diagnostics};

pub const START: &str = "Start Conditions";
pub const CANCEL: &str = "Cancel Conditions";
pub const SUBMIT: &str = "Submit Conditions";
pub const VALUE: &str = "Value";

const DISPLAY_ORDER: [&str; 4] = [START, CANCEL, SUBMIT, VALUE];

/// Hooks for leaderboards.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeaderboardHooks;

fn display_rules(asset: &Asset) -> Option<(ValueFormat, bool)> {
    match asset.details {
        AssetDetails::Leaderboard {
            format,
            lower_is_better,
        } => Some((format, lower_is_better)),
        _ => None,
    }
}

fn has_conditions(asset: &Asset, label: &str) -> bool {
    asset
        .triggers
        .iter()
        .any(|t| t.label == label && !t.is_empty())
}

impl AssetKindHooks for LeaderboardHooks {
    fn kind(&self) -> AssetKind {
        AssetKind::Leaderboard
    }

    /// Start, Cancel, Submit, Value, then anything unrecognized.
    fn build_triggers(&self, asset: &Asset) -> Vec<Trigger> {
        let mut triggers = asset.triggers.clone();
        triggers.sort_by_key(|t| {
            DISPLAY_ORDER
                .iter()
                .position(|label| *label == t.label)
                .unwrap_or(DISPLAY_ORDER.len())
        });
        triggers
    }

    fn asset_specific_modified(
        &self,
        source: &Asset,
        generated: &Asset,
        _flags: &mut ModifiedFields,
    ) -> bool {
        display_rules(source) != display_rules(generated)
    }

    fn merge_local(
        &self,
        new: Option<&Asset>,
        _local: Option<&Asset>,
        diagnostics: &mut Diagnostics,
        validate_all: bool,
    ) {
        let Some(asset) = new else {
            return;
        };

        if !has_conditions(asset, START) {
            diagnostics.warn(format!("Leaderboard \"{}\" has no start conditions", asset.title));
        }
        if !has_conditions(asset, SUBMIT) {
            diagnostics.warn(format!("Leaderboard \"{}\" has no submit conditions", asset.title));
        }
        if validate_all && !has_conditions(asset, VALUE) {
            diagnostics.warn(format!("Leaderboard \"{}\" has no value definition", asset.title));
        }
    }
}
