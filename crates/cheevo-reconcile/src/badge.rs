//! Badge name selection across the three slots.

use cheevo_types::SourceRole;
use serde::Serialize;

use crate::source::AssetSource;

/// Placeholder meaning "no badge chosen".
pub const NO_BADGE: &str = "0";

/// The stock badge the server assigns when none was uploaded.
pub const STOCK_BADGE: &str = "00000";

/// Returns `true` for a badge name that refers to a real image.
pub fn is_valid_badge_name(name: &str) -> bool {
    !name.is_empty() && name != NO_BADGE && name != STOCK_BADGE
}

/// The badge shown for an asset and the slot it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BadgeRef {
    pub role: SourceRole,
    pub name: String,
}

/// The badge name a commit should carry: the first valid one among
/// Generated, Local and Published.
///
/// Only the assets' own badges count; display overrides are ignored.
pub fn resolve_badge_name(
    generated: &AssetSource,
    local: &AssetSource,
    published: &AssetSource,
) -> Option<String> {
    [generated, local, published]
        .into_iter()
        .filter_map(AssetSource::asset)
        .map(|asset| asset.badge_name.as_str())
        .find(|name| is_valid_badge_name(name))
        .map(str::to_string)
}

/// The badge to display: Published, then Local, then `fallback`.
///
/// A fallback is written into the local slot's display badge so the image
/// resolves through that slot; nothing is persisted.
pub fn resolve_display_badge(
    local: &mut AssetSource,
    published: &AssetSource,
    fallback: Option<&str>,
) -> Option<BadgeRef> {
    local.clear_display_badge();

    for source in [published, &*local] {
        if is_valid_badge_name(source.badge_name()) {
            return Some(BadgeRef {
                role: source.role(),
                name: source.badge_name().to_string(),
            });
        }
    }

    let fallback = fallback.filter(|name| is_valid_badge_name(name))?;
    local.set_display_badge(fallback);
    Some(BadgeRef {
        role: SourceRole::Local,
        name: fallback.to_string(),
    })
}
