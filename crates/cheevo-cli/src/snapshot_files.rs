//! Reading and writing asset snapshot files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context};
use cheevo_diff::CodeNotes;
use cheevo_types::Asset;

/// Load an asset from `path`. A missing path or file is an empty slot.
pub fn read_asset(path: Option<&Path>) -> anyhow::Result<Option<Asset>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading asset {}", path.display()))?;
    let asset = serde_json::from_str(&text)
        .with_context(|| format!("parsing asset {}", path.display()))?;
    Ok(Some(asset))
}

pub fn write_asset(path: &Path, asset: &Asset) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(asset)?;
    std::fs::write(path, text).with_context(|| format!("writing asset {}", path.display()))
}

/// Load code notes from a JSON object keyed by address (`"0x1234"` or `"4660"`).
pub fn read_notes(path: &Path) -> anyhow::Result<CodeNotes> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading notes {}", path.display()))?;
    let raw: BTreeMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("parsing notes {}", path.display()))?;

    raw.into_iter()
        .map(|(key, note)| Ok((parse_address(&key)?, note)))
        .collect()
}

fn parse_address(key: &str) -> anyhow::Result<u32> {
    let parsed = match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => key.parse(),
    };
    parsed.map_err(|e| anyhow!("invalid address {key:?}: {e}"))
}
