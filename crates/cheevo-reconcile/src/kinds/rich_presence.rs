use cheevo_types::{Asset, AssetDetails, AssetKind};

use crate::engine::ModifiedFields;
use crate::hooks::{AssetKindHooks, Diagnostics};

/// Longest script the server stores.
pub const MAX_SCRIPT_LEN: usize = 65535;

/// Hooks for rich presence.
#[derive(Clone, Copy, Debug, Default)]
pub struct RichPresenceHooks;

fn script(asset: &Asset) -> &str {
    match &asset.details {
        AssetDetails::RichPresence { script } => script,
        _ => "",
    }
}

impl AssetKindHooks for RichPresenceHooks {
    fn kind(&self) -> AssetKind {
        AssetKind::RichPresence
    }

    fn asset_specific_modified(
        &self,
        source: &Asset,
        generated: &Asset,
        _flags: &mut ModifiedFields,
    ) -> bool {
        script(source) != script(generated)
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

        let script = script(asset);
        if script.len() > MAX_SCRIPT_LEN {
            diagnostics.warn(format!(
                "Rich Presence script is {} bytes, which exceeds the {MAX_SCRIPT_LEN} byte limit",
                script.len()
            ));
        }
        if validate_all && !script.lines().any(|l| l.trim_start().starts_with("Display:")) {
            diagnostics.warn("Rich Presence script has no Display section");
        }
    }
}
