//! The orchestrator owning the three slots of one asset.
//!
//! Every mutation runs the same pass: replace slot → (triggers rebuild lazily)
//! → normalize id and badge → recompute comparison → hand back the snapshot.
//! Callers that need change notification compare successive snapshots.

use std::sync::Arc;

use cheevo_diff::{NoteProvider, RenderContext, RenderedTrigger};
use cheevo_types::{Asset, AssetId, AssetKind, NumberFormat, SourceRole};
use serde::Serialize;
use tracing::{debug, warn};

use crate::badge::{self, BadgeRef, NO_BADGE};
use crate::config::ReconcileConfig;
use crate::engine::{Comparison, ComparisonEngine, DisplayTriggers};
use crate::error::{ReconcileError, ReconcileResult};
use crate::hooks::{AssetKindHooks, Diagnostics};
use crate::id_alloc;
use crate::kinds;
use crate::source::AssetSource;

/// Display state derived from the three slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSnapshot {
    pub title: String,
    pub description: String,
    pub points: u32,
    /// The canonical id shown for the asset.
    pub id: AssetId,
    /// Badge a commit will carry if Generated has none.
    pub badge_name: Option<String>,
    /// Badge to display and the slot providing it.
    pub badge: Option<BadgeRef>,
    pub source_line: u32,
    /// Label of the Published slot, e.g. `Published (Core)`.
    pub published_label: String,
    #[serde(flatten)]
    pub comparison: Comparison,
}

/// Owns the Generated, Local and Published slots of one asset.
pub struct AssetReconciler {
    generated: AssetSource,
    local: AssetSource,
    published: AssetSource,
    hooks: Box<dyn AssetKindHooks>,
    config: ReconcileConfig,
    snapshot: ReconcileSnapshot,
}

impl AssetReconciler {
    pub fn new(hooks: Box<dyn AssetKindHooks>, config: ReconcileConfig) -> Self {
        let mut reconciler = Self {
            generated: AssetSource::new(SourceRole::Generated),
            local: AssetSource::new(SourceRole::Local),
            published: AssetSource::new(SourceRole::Published),
            hooks,
            config,
            snapshot: ReconcileSnapshot::default(),
        };
        reconciler.refresh();
        reconciler
    }

    /// A reconciler using the built-in hooks for `kind`.
    pub fn for_kind(kind: AssetKind, config: ReconcileConfig) -> Self {
        Self::new(kinds::hooks_for(kind), config)
    }

    pub fn generated(&self) -> &AssetSource {
        &self.generated
    }

    pub fn local(&self) -> &AssetSource {
        &self.local
    }

    pub fn published(&self) -> &AssetSource {
        &self.published
    }

    pub fn source(&self, role: SourceRole) -> &AssetSource {
        match role {
            SourceRole::Generated => &self.generated,
            SourceRole::Local => &self.local,
            SourceRole::Published => &self.published,
        }
    }

    /// The slot currently being compared against Generated, if any.
    pub fn other(&self) -> Option<&AssetSource> {
        self.snapshot.comparison.other.map(|role| self.source(role))
    }

    pub fn hooks(&self) -> &dyn AssetKindHooks {
        self.hooks.as_ref()
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &ReconcileSnapshot {
        &self.snapshot
    }

    /// Populate all three slots at once and recompute.
    pub fn load(
        &mut self,
        generated: Option<Asset>,
        local: Option<Asset>,
        published: Option<Asset>,
    ) -> &ReconcileSnapshot {
        self.generated.set_asset(generated.map(Arc::new));
        self.local.set_asset(local.map(Arc::new));
        self.published.set_asset(published.map(Arc::new));
        self.refresh()
    }

    /// Replace one slot and recompute.
    pub fn set_source(&mut self, role: SourceRole, asset: Option<Asset>) -> &ReconcileSnapshot {
        let asset = asset.map(Arc::new);
        match role {
            SourceRole::Generated => self.generated.set_asset(asset),
            SourceRole::Local => self.local.set_asset(asset),
            SourceRole::Published => self.published.set_asset(asset),
        }
        self.refresh()
    }

    /// Recompute everything derived from the three slots.
    pub fn refresh(&mut self) -> &ReconcileSnapshot {
        let published_label = match self.published.asset() {
            None => "Published",
            Some(asset) if asset.is_unofficial => "Published (Unofficial)",
            Some(_) => "Published (Core)",
        };
        self.published.set_label(published_label);

        let display = [&self.generated, &self.published, &self.local]
            .into_iter()
            .find(|source| source.is_present())
            .and_then(AssetSource::asset);
        let (title, description, points) = display.map_or_else(Default::default, |asset| {
            (asset.title.clone(), asset.description.clone(), asset.points)
        });

        let id = self.resolve_id();
        let badge_name = badge::resolve_badge_name(&self.generated, &self.local, &self.published);
        let fallback = badge_name
            .as_deref()
            .or(self.config.default_badge_name.as_deref());
        let badge = badge::resolve_display_badge(&mut self.local, &self.published, fallback);

        let comparison = ComparisonEngine::new(
            &self.generated,
            &self.local,
            &self.published,
            self.hooks.as_ref(),
        )
        .compare();

        debug!(
            id,
            state = ?comparison.compare_state,
            other = ?comparison.other,
            can_update = comparison.can_update,
            "comparison recomputed"
        );

        self.snapshot = ReconcileSnapshot {
            title,
            description,
            points,
            id,
            badge_name,
            badge,
            source_line: self.generated.asset().map_or(0, |a| a.source_line),
            published_label: self.published.label().to_string(),
            comparison,
        };
        &self.snapshot
    }

    /// Generated wins; a temporary local id yields to a published one.
    fn resolve_id(&self) -> AssetId {
        let local_id = self.local.id();
        let published_id = self.published.id();

        if self.generated.id() != 0 {
            self.generated.id()
        } else if self.config.is_local_id(local_id) && published_id != 0 {
            published_id
        } else if local_id != 0 {
            local_id
        } else {
            published_id
        }
    }

    /// Reconcile Generated and Local ids, assigning `candidate` if neither has
    /// one. Returns `true` only if `candidate` was used.
    pub fn allocate_local_id(&mut self, candidate: AssetId) -> bool {
        let allocated = id_alloc::allocate_local_id(
            &mut self.generated,
            &mut self.local,
            &self.published,
            candidate,
        );
        self.refresh();
        allocated
    }

    /// Replace the Local slot with the Generated asset.
    ///
    /// Missing id and badge are filled in from the resolved values first.
    /// Validation problems are appended to `diagnostics`; they never stop the
    /// commit.
    pub fn commit(
        &mut self,
        diagnostics: &mut Diagnostics,
        validate_all: bool,
    ) -> ReconcileResult<()> {
        if !self.config.local_store_enabled {
            return Err(ReconcileError::LocalStoreUnavailable);
        }
        let mut asset = self
            .generated
            .asset()
            .cloned()
            .ok_or(ReconcileError::NothingToCommit)?;

        if asset.id == 0 {
            asset.id = self.snapshot.id;
        }
        if asset.badge_name.is_empty() || asset.badge_name == NO_BADGE {
            if let Some(badge_name) = &self.snapshot.badge_name {
                asset.badge_name = badge_name.clone();
            }
        }

        let before = diagnostics.len();
        self.hooks
            .merge_local(Some(&asset), self.local.asset(), diagnostics, validate_all);
        for warning in &diagnostics.warnings()[before..] {
            warn!(id = asset.id, %warning, "local commit warning");
        }

        let asset = Arc::new(asset);
        self.generated.set_asset(Some(Arc::clone(&asset)));
        self.local.set_asset(Some(asset));
        debug!(id = self.local.id(), "local copy updated");

        self.refresh();
        Ok(())
    }

    /// Remove the Local copy.
    pub fn delete(&mut self, diagnostics: &mut Diagnostics) -> ReconcileResult<()> {
        if !self.config.local_store_enabled {
            return Err(ReconcileError::LocalStoreUnavailable);
        }

        self.hooks
            .merge_local(None, self.local.asset(), diagnostics, false);
        self.local.set_asset(None);
        debug!(id = self.snapshot.id, "local copy removed");

        self.refresh();
        Ok(())
    }

    /// Change how values are rendered; the comparison itself is unaffected.
    pub fn set_number_format(&mut self, number_format: NumberFormat) {
        self.config.number_format = number_format;
    }

    /// Render the display triggers with the configured number format.
    pub fn render_triggers(&self, notes: Option<&dyn NoteProvider>) -> Vec<RenderedTrigger> {
        let mut context = RenderContext::new(self.config.number_format);
        if let Some(notes) = notes {
            context = context.with_notes(notes);
        }
        match &self.snapshot.comparison.triggers {
            DisplayTriggers::Plain(triggers) => {
                triggers.iter().map(|t| context.render_trigger(t)).collect()
            }
            DisplayTriggers::Compared(diff) => diff
                .comparisons
                .iter()
                .map(|c| context.render_comparison_trigger(c))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CompareState;
    use cheevo_diff::CodeNotes;
    use cheevo_types::{Field, FieldSize, Requirement, RequirementOperator, Trigger};
    use proptest::prelude::*;

    fn req(addr: u32, value: u32) -> Requirement {
        Requirement::compare(
            Field::memory(FieldSize::EightBit, addr),
            RequirementOperator::Equal,
            Field::value(value),
        )
    }

    fn cheevo(title: &str) -> Asset {
        Asset::achievement(title, "Beat the final boss", 25)
            .with_triggers(vec![Trigger::with_core_and_alts("", vec![vec![req(0x20, 1)]])])
    }

    fn reconciler() -> AssetReconciler {
        AssetReconciler::for_kind(AssetKind::Achievement, ReconcileConfig::default())
    }

    #[test]
    fn empty_reconciler_has_no_state() {
        let r = reconciler();
        assert_eq!(r.snapshot().comparison.compare_state, CompareState::None);
        assert_eq!(r.snapshot().published_label, "Published");
        assert_eq!(r.snapshot().id, 0);
        assert!(r.other().is_none());
    }

    #[test]
    fn scenario_a_allocates_to_both() {
        let mut r = reconciler();
        r.load(Some(cheevo("a")), Some(cheevo("a")), None);

        assert!(r.allocate_local_id(500));
        assert_eq!(r.generated().id(), 500);
        assert_eq!(r.local().id(), 500);
        assert_eq!(r.snapshot().id, 500);
        assert!(!r.allocate_local_id(500));
    }

    #[test]
    fn allocation_refused_with_published() {
        let mut r = reconciler();
        r.load(Some(cheevo("a")), None, Some(cheevo("a").with_id(12)));
        assert!(!r.allocate_local_id(500));
        assert_eq!(r.generated().id(), 0);
        assert_eq!(r.snapshot().id, 12);
    }

    #[test]
    fn scenario_b_title_case() {
        let mut r = reconciler();
        let snapshot = r.load(Some(cheevo("Win the game")), Some(cheevo("Win the Game")), None);

        assert!(snapshot.comparison.modified.title);
        assert_eq!(snapshot.comparison.compare_state, CompareState::LocalDiffers);
        assert_eq!(
            snapshot.comparison.modification_message.as_deref(),
            Some("Local differs from generated")
        );
        assert_eq!(r.other().map(AssetSource::role), Some(SourceRole::Local));
    }

    #[test]
    fn scenario_c_core_points_differ() {
        let mut published = cheevo("a").with_id(77);
        published.points = 50;
        let mut r = reconciler();
        let snapshot = r.load(Some(cheevo("a")), Some(cheevo("a")), Some(published));

        assert_eq!(snapshot.comparison.compare_state, CompareState::PublishedDiffers);
        assert!(snapshot
            .comparison
            .modification_message
            .as_deref()
            .unwrap()
            .contains("Core differs from generated"));
        assert_eq!(snapshot.published_label, "Published (Core)");
    }

    #[test]
    fn scenario_d_published_matches_not_local() {
        let mut r = reconciler();
        let snapshot = r.load(Some(cheevo("a")), None, Some(cheevo("a")));
        assert_eq!(
            snapshot.comparison.compare_state,
            CompareState::PublishedMatchesNotLocal
        );
        assert!(snapshot.comparison.can_update);
    }

    #[test]
    fn scenario_e_default_badge_written_to_local() {
        let config = ReconcileConfig {
            default_badge_name: Some("12345".into()),
            ..Default::default()
        };
        let mut r = AssetReconciler::for_kind(AssetKind::Achievement, config);
        let snapshot = r
            .load(
                None,
                Some(cheevo("a").with_badge("")),
                Some(cheevo("a").with_badge("0")),
            )
            .clone();

        assert_eq!(
            snapshot.badge,
            Some(BadgeRef {
                role: SourceRole::Local,
                name: "12345".into()
            })
        );
        assert_eq!(r.local().badge_name(), "12345");
        assert_eq!(r.local().asset().unwrap().badge_name, "");
    }

    #[test]
    fn id_prefers_published_over_temporary_local() {
        let mut r = reconciler();
        r.load(
            None,
            Some(cheevo("a").with_id(111_000_003)),
            Some(cheevo("a").with_id(9001)),
        );
        assert_eq!(r.snapshot().id, 9001);

        r.load(None, Some(cheevo("a").with_id(55)), Some(cheevo("a").with_id(9001)));
        assert_eq!(r.snapshot().id, 55);
    }

    #[test]
    fn display_fields_follow_generated_then_published() {
        let mut r = reconciler();
        let mut published = cheevo("Published title");
        published.points = 10;
        r.load(None, Some(cheevo("Local title")), Some(published));
        assert_eq!(r.snapshot().title, "Published title");
        assert_eq!(r.snapshot().points, 10);

        r.set_source(SourceRole::Generated, Some(cheevo("Generated title").with_source_line(42)));
        assert_eq!(r.snapshot().title, "Generated title");
        assert_eq!(r.snapshot().source_line, 42);
    }

    #[test]
    fn commit_fills_id_and_badge_then_matches() {
        let mut r = reconciler();
        r.load(
            Some(cheevo("a").with_badge("0")),
            Some(cheevo("old").with_id(111_000_001).with_badge("4321")),
            None,
        );
        assert_eq!(r.snapshot().comparison.compare_state, CompareState::LocalDiffers);

        let mut diagnostics = Diagnostics::new();
        r.commit(&mut diagnostics, false).unwrap();

        let local = r.local().asset().unwrap();
        assert_eq!(local.id, 111_000_001);
        assert_eq!(local.badge_name, "4321");
        assert_eq!(local.title, "a");
        assert!(diagnostics.is_empty());
        assert_eq!(r.snapshot().comparison.compare_state, CompareState::Same);
        assert_eq!(r.refresh().comparison.compare_state, CompareState::Same);
    }

    #[test]
    fn commit_warnings_do_not_block() {
        let mut r = reconciler();
        let mut generated = cheevo("a");
        generated.points = 7;
        r.load(Some(generated), None, None);

        let mut diagnostics = Diagnostics::new();
        r.commit(&mut diagnostics, false).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(r.local().points(), 7);
        assert_eq!(r.snapshot().comparison.compare_state, CompareState::Same);
    }

    #[test]
    fn commit_without_generated_fails() {
        let mut r = reconciler();
        r.load(None, Some(cheevo("a")), None);
        assert_eq!(
            r.commit(&mut Diagnostics::new(), false),
            Err(ReconcileError::NothingToCommit)
        );
    }

    #[test]
    fn read_only_rejects_changes() {
        let mut r = AssetReconciler::for_kind(AssetKind::Achievement, ReconcileConfig::read_only());
        r.load(Some(cheevo("a")), Some(cheevo("b")), None);
        assert!(r.snapshot().comparison.can_update);
        assert_eq!(
            r.commit(&mut Diagnostics::new(), false),
            Err(ReconcileError::LocalStoreUnavailable)
        );
        assert_eq!(
            r.delete(&mut Diagnostics::new()),
            Err(ReconcileError::LocalStoreUnavailable)
        );
        assert_eq!(r.local().title(), "b");
    }

    #[test]
    fn delete_clears_local_and_recomputes() {
        let mut r = reconciler();
        r.load(Some(cheevo("a")), Some(cheevo("a")), None);
        assert_eq!(r.snapshot().comparison.compare_state, CompareState::Same);

        r.delete(&mut Diagnostics::new()).unwrap();
        assert!(!r.local().is_present());
        assert_eq!(
            r.snapshot().comparison.compare_state,
            CompareState::PublishedMatchesNotLocal
        );
    }

    #[test]
    fn number_format_only_changes_rendering() {
        let mut r = reconciler();
        let mut local = cheevo("a");
        local.triggers = vec![Trigger::with_core_and_alts("", vec![vec![req(0x20, 10)]])];
        r.load(Some(cheevo("a")), Some(local), None);
        let before = r.snapshot().clone();

        let mut notes = CodeNotes::new();
        notes.insert(0x20, "Boss HP");
        r.set_number_format(NumberFormat::Hexadecimal);
        let rendered = r.render_triggers(Some(&notes as &dyn NoteProvider));

        assert_eq!(&before, r.snapshot());
        let rows = &rendered[0].groups[0].rows;
        assert!(rows.iter().any(|row| row.compared.as_deref() == Some("byte(0x000020) == 0x0A")));
        assert!(rows.iter().all(|row| row.note.as_deref() == Some("Boss HP")));
    }

    #[test]
    fn snapshot_serializes_flat() {
        let mut r = reconciler();
        r.load(Some(cheevo("a")), None, None);
        let json = serde_json::to_value(r.snapshot()).unwrap();
        assert_eq!(json["compare_state"], "PublishedMatchesNotLocal");
        assert_eq!(json["can_update"], true);
        assert_eq!(json["title"], "a");
    }

    fn arb_asset() -> impl Strategy<Value = Asset> {
        (
            "[A-Za-z ]{1,12}",
            "[a-z ]{0,12}",
            prop::sample::select(vec![0u32, 5, 10, 25]),
            prop::collection::vec(prop::collection::vec((0u32..8, 0u32..4), 0..4), 1..3),
        )
            .prop_map(|(title, description, points, groups)| {
                let groups = groups
                    .into_iter()
                    .map(|g| g.into_iter().map(|(a, v)| req(a, v)).collect())
                    .collect();
                Asset::achievement(title, description, points)
                    .with_triggers(vec![Trigger::with_core_and_alts("", groups)])
            })
    }

    proptest! {
        #[test]
        fn clone_of_generated_is_same(generated in arb_asset()) {
            let mut r = reconciler();
            let state = r
                .load(Some(generated.clone()), Some(generated), None)
                .comparison
                .compare_state;
            prop_assert_eq!(state, CompareState::Same);
        }

        #[test]
        fn different_title_is_local_differs(generated in arb_asset(), title in "[A-Za-z]{1,8}") {
            prop_assume!(generated.title != title);
            let mut local = generated.clone();
            local.title = title;
            let mut r = reconciler();
            let snapshot = r.load(Some(generated), Some(local), None);
            prop_assert!(snapshot.comparison.modified.title);
            prop_assert_eq!(snapshot.comparison.compare_state, CompareState::LocalDiffers);
        }

        #[test]
        fn refresh_is_idempotent(
            generated in prop::option::of(arb_asset()),
            local in prop::option::of(arb_asset()),
            published in prop::option::of(arb_asset()),
        ) {
            let mut r = reconciler();
            let first = r.load(generated, local, published).clone();
            prop_assert_eq!(&first, r.refresh());
        }

        #[test]
        fn allocation_idempotent(candidate in 1u32..u32::MAX, generated in arb_asset()) {
            let mut r = reconciler();
            r.load(Some(generated.clone()), Some(generated), None);
            prop_assert!(r.allocate_local_id(candidate));
            prop_assert!(!r.allocate_local_id(candidate));
            prop_assert_eq!(r.generated().id(), candidate);
            prop_assert_eq!(r.local().id(), candidate);
        }

        #[test]
        fn published_ids_never_reallocated(
            candidate in any::<u32>(),
            generated in arb_asset(),
            published_id in any::<u32>(),
        ) {
            let mut r = reconciler();
            let published = generated.clone().with_id(published_id);
            r.load(Some(generated.clone()), Some(generated), Some(published));
            prop_assert!(!r.allocate_local_id(candidate));
            prop_assert_eq!(r.generated().id(), 0);
            prop_assert_eq!(r.local().id(), 0);
        }

        #[test]
        fn commit_then_refresh_is_same(generated in arb_asset(), local in prop::option::of(arb_asset())) {
            let mut r = reconciler();
            r.load(Some(generated), local, None);
            r.commit(&mut Diagnostics::new(), true).unwrap();
            prop_assert_eq!(r.refresh().comparison.compare_state, CompareState::Same);
        }
    }
}
