use std::path::Path;

use anyhow::Context;
use cheevo_reconcile::ReconcileConfig;
use cheevo_types::NumberFormat;

/// Read the reconcile settings, letting command-line flags win.
pub fn load_config(path: Option<&Path>, hex: bool) -> anyhow::Result<ReconcileConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ReconcileConfig::default(),
    };
    if hex {
        config.number_format = NumberFormat::Hexadecimal;
    }
    Ok(config)
}
