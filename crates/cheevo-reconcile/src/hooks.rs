//! Per-kind capabilities injected into the reconciler.

use std::fmt;

use cheevo_types::{Asset, AssetKind, Trigger};

use crate::engine::ModifiedFields;

/// Kind-specific behaviour for one asset kind.
///
/// Every method except [`kind`](Self::kind) has a default that treats the
/// asset generically. The trait is object-safe and `Send + Sync` so hooks can
/// be stored as `Box<dyn AssetKindHooks>`.
pub trait AssetKindHooks: Send + Sync {
    fn kind(&self) -> AssetKind;

    /// Name used in user-facing messages, e.g. `"Local achievement does not exist"`.
    fn display_name(&self) -> String {
        self.kind().to_string()
    }

    /// Materialize the display trigger list for `asset`.
    fn build_triggers(&self, asset: &Asset) -> Vec<Trigger> {
        asset.triggers.clone()
    }

    /// Compare kind-specific fields of `source` against `generated`, setting
    /// any matching flags. Returns `true` if anything differs.
    fn asset_specific_modified(
        &self,
        _source: &Asset,
        _generated: &Asset,
        _flags: &mut ModifiedFields,
    ) -> bool {
        false
    }

    /// Validate and merge `new` into the local store.
    ///
    /// `new` is `None` when the local copy is being deleted. Problems go to
    /// `diagnostics`; the operation itself always completes.
    fn merge_local(
        &self,
        _new: Option<&Asset>,
        _local: Option<&Asset>,
        _diagnostics: &mut Diagnostics,
        _validate_all: bool,
    ) {
    }
}

/// Append-only buffer of non-fatal warnings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, warning) in self.warnings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{warning}")?;
        }
        Ok(())
    }
}
