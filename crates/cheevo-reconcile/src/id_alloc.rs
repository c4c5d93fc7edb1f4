//! Identity reconciliation between the Generated and Local slots.
//!
//! Published ids are authoritative; when a published copy exists nothing here
//! touches ids. Otherwise a non-zero id on one side is copied to the other,
//! and only when both are unassigned is a fresh local id handed out.

use cheevo_types::AssetId;
use tracing::debug;

use crate::source::AssetSource;

/// Reconcile the Generated and Local ids, assigning `candidate` if neither
/// side has one. Returns `true` only if `candidate` was consumed.
pub fn allocate_local_id(
    generated: &mut AssetSource,
    local: &mut AssetSource,
    published: &AssetSource,
    candidate: AssetId,
) -> bool {
    if published.is_present() {
        return false;
    }

    let local_id = local.id();
    let generated_id = generated.id();

    if local_id != generated_id {
        if local_id == 0 {
            local.replace_id(generated_id);
        }
        if generated_id == 0 {
            generated.replace_id(local_id);
        }
        debug!(local_id, generated_id, "propagated existing id");
        return false;
    }

    if local_id != 0 {
        return false;
    }

    if !local.is_present() && !generated.is_present() {
        debug_assert!(
            false,
            "local id requested for an asset with no generated or local copy"
        );
        return false;
    }

    local.replace_id(candidate);
    generated.replace_id(candidate);
    debug!(id = candidate, "allocated local id");
    true
}

/// Hands out temporary local ids above a base value.
///
/// Ids never wrap: once `AssetId::MAX` has been handed out the pool is
/// exhausted and offers nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalIdPool {
    next: Option<AssetId>,
}

impl LocalIdPool {
    /// A pool whose first id is `base + 1`.
    pub fn new(base: AssetId) -> Self {
        Self {
            next: base.checked_add(1),
        }
    }

    /// A pool whose first id is `first`. `0` means unassigned, so a pool
    /// starting there is empty.
    pub fn starting_at(first: AssetId) -> Self {
        Self {
            next: Some(first).filter(|&id| id != 0),
        }
    }

    /// The id the next allocation will offer, or `None` if exhausted.
    pub fn peek(&self) -> Option<AssetId> {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Offer the next id to `allocate`; advance only if it was consumed.
    pub fn allocate_with(&mut self, allocate: impl FnOnce(AssetId) -> bool) -> Option<AssetId> {
        let candidate = self.next?;
        if !allocate(candidate) {
            return None;
        }
        self.next = candidate.checked_add(1);
        Some(candidate)
    }
}
