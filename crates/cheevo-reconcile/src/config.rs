use cheevo_types::{AssetId, NumberFormat};
use serde::{Deserialize, Serialize};

/// Ids above this value are temporary ids handed out locally.
pub const LOCAL_ID_BASE: AssetId = 111_000_000;

/// Configuration for an [`AssetReconciler`](crate::AssetReconciler).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// How values are rendered in display triggers.
    pub number_format: NumberFormat,
    /// Badge shown when no slot provides a valid one.
    pub default_badge_name: Option<String>,
    /// Whether commit and delete may touch the local slot.
    pub local_store_enabled: bool,
    /// Threshold separating published ids from temporary local ids.
    pub local_id_base: AssetId,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            number_format: NumberFormat::Decimal,
            default_badge_name: None,
            local_store_enabled: true,
            local_id_base: LOCAL_ID_BASE,
        }
    }
}

impl ReconcileConfig {
    /// A configuration with no local store: comparisons only.
    pub fn read_only() -> Self {
        Self {
            local_store_enabled: false,
            ..Default::default()
        }
    }

    /// Returns `true` if `id` is a temporary local id.
    pub fn is_local_id(&self, id: AssetId) -> bool {
        id > self.local_id_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_local_store() {
        let config = ReconcileConfig::default();
        assert!(config.local_store_enabled);
        assert_eq!(config.local_id_base, LOCAL_ID_BASE);
        assert!(!ReconcileConfig::read_only().local_store_enabled);
    }

    #[test]
    fn local_ids_are_strictly_above_base() {
        let config = ReconcileConfig::default();
        assert!(!config.is_local_id(LOCAL_ID_BASE));
        assert!(config.is_local_id(LOCAL_ID_BASE + 1));
        assert!(!config.is_local_id(42));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: ReconcileConfig =
            serde_json::from_str(r#"{"number_format":"hexadecimal"}"#).unwrap();
        assert_eq!(config.number_format, NumberFormat::Hexadecimal);
        assert!(config.local_store_enabled);
    }
}
