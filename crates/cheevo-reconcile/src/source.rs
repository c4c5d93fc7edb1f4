//! A typed slot holding one optional representation of an asset.

use std::cell::OnceCell;
use std::sync::Arc;

use cheevo_types::{Asset, AssetId, SourceRole, Trigger};

use crate::hooks::AssetKindHooks;

/// One of the Generated, Local or Published slots.
///
/// The held asset is replaced wholesale and never edited in place, so the
/// cached display triggers can be dropped whenever the pointer changes.
#[derive(Debug)]
pub struct AssetSource {
    role: SourceRole,
    label: String,
    asset: Option<Arc<Asset>>,
    display_badge: Option<String>,
    triggers: OnceCell<Vec<Trigger>>,
}

impl AssetSource {
    pub fn new(role: SourceRole) -> Self {
        Self {
            role,
            label: role.label().to_string(),
            asset: None,
            display_badge: None,
            triggers: OnceCell::new(),
        }
    }

    pub fn role(&self) -> SourceRole {
        self.role
    }

    /// Human-readable slot label, e.g. `Published (Core)`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn asset(&self) -> Option<&Asset> {
        self.asset.as_deref()
    }

    pub fn shared_asset(&self) -> Option<Arc<Asset>> {
        self.asset.clone()
    }

    pub fn is_present(&self) -> bool {
        self.asset.is_some()
    }

    /// Replace the held asset.
    ///
    /// Cached triggers and any display badge survive only when the exact same
    /// asset is set again.
    pub fn set_asset(&mut self, asset: Option<Arc<Asset>>) {
        let unchanged = match (&self.asset, &asset) {
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        self.asset = asset;
        if !unchanged {
            self.triggers = OnceCell::new();
            self.display_badge = None;
        }
    }

    /// Replace the held asset with a copy that has a different id.
    pub(crate) fn replace_id(&mut self, id: AssetId) {
        if let Some(asset) = self.asset() {
            let mut updated = asset.clone();
            updated.id = id;
            self.set_asset(Some(Arc::new(updated)));
        }
    }

    pub fn id(&self) -> AssetId {
        self.asset().map_or(0, |a| a.id)
    }

    /// The badge to display for this slot; a display-only override wins over
    /// the asset's own badge.
    pub fn badge_name(&self) -> &str {
        self.display_badge
            .as_deref()
            .or_else(|| self.asset().map(|a| a.badge_name.as_str()))
            .unwrap_or("")
    }

    /// Set a badge for display without touching the asset.
    pub(crate) fn set_display_badge(&mut self, badge_name: impl Into<String>) {
        self.display_badge = Some(badge_name.into());
    }

    pub(crate) fn clear_display_badge(&mut self) {
        self.display_badge = None;
    }

    pub fn title(&self) -> &str {
        self.asset().map_or("", |a| a.title.as_str())
    }

    pub fn description(&self) -> &str {
        self.asset().map_or("", |a| a.description.as_str())
    }

    pub fn points(&self) -> u32 {
        self.asset().map_or(0, |a| a.points)
    }

    pub fn is_unofficial(&self) -> bool {
        self.asset().is_some_and(|a| a.is_unofficial)
    }

    /// Display triggers, built by `hooks` on first read after a replacement.
    pub fn triggers(&self, hooks: &dyn AssetKindHooks) -> &[Trigger] {
        self.triggers.get_or_init(|| {
            self.asset()
                .map(|a| hooks.build_triggers(a))
                .unwrap_or_default()
        })
    }
}
