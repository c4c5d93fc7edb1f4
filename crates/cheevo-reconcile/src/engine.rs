//! The comparison state machine.
//!
//! Given the Generated, Local and Published slots, decides how the three
//! representations relate, which one the user may promote, and what trigger
//! list to display. The result is a pure function of the three slots.

use cheevo_diff::{diff_triggers, TriggerDiff};
use cheevo_types::{SourceRole, Trigger};
use serde::Serialize;

use crate::hooks::AssetKindHooks;
use crate::source::AssetSource;

/// How the Generated asset relates to the Local and Published ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum CompareState {
    /// There is no Generated asset.
    #[default]
    None,
    /// Generated matches Local (and Published, if any).
    Same,
    /// Generated differs from Local.
    LocalDiffers,
    /// Generated matches Local but differs from Published.
    PublishedDiffers,
    /// Generated matches Published but there is no Local copy.
    PublishedMatchesNotLocal,
}

/// Which top-level fields differ from Generated.
///
/// The flags describe [`Comparison::other`] only; a slot that is not being
/// compared never sets them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ModifiedFields {
    pub title: bool,
    pub description: bool,
    pub points: bool,
}

impl ModifiedFields {
    pub fn any(&self) -> bool {
        self.title || self.description || self.points
    }
}

/// The trigger list to display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "triggers", rename_all = "snake_case")]
pub enum DisplayTriggers {
    /// A single source's triggers, undiffed.
    Plain(Vec<Trigger>),
    /// Generated compared against [`Comparison::other`].
    Compared(TriggerDiff),
}

impl Default for DisplayTriggers {
    fn default() -> Self {
        Self::Plain(Vec::new())
    }
}

impl DisplayTriggers {
    pub fn is_compared(&self) -> bool {
        matches!(self, Self::Compared(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Plain(triggers) => triggers.len(),
            Self::Compared(diff) => diff.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the state machine decides for one input triple.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub compare_state: CompareState,
    /// Whether promoting Generated into Local is offered.
    pub can_update: bool,
    pub modification_message: Option<String>,
    /// Describes where the displayed triggers come from.
    pub trigger_source: String,
    /// The slot Generated is being compared against.
    pub other: Option<SourceRole>,
    pub modified: ModifiedFields,
    pub triggers: DisplayTriggers,
}

/// How one slot differs from Generated.
struct Modification {
    fields: ModifiedFields,
    triggers: TriggerDiff,
}

/// Borrowed view over the three slots and the kind hooks.
pub struct ComparisonEngine<'a> {
    generated: &'a AssetSource,
    local: &'a AssetSource,
    published: &'a AssetSource,
    hooks: &'a dyn AssetKindHooks,
}

impl<'a> ComparisonEngine<'a> {
    pub fn new(
        generated: &'a AssetSource,
        local: &'a AssetSource,
        published: &'a AssetSource,
        hooks: &'a dyn AssetKindHooks,
    ) -> Self {
        Self {
            generated,
            local,
            published,
            hooks,
        }
    }

    /// Run the state machine.
    pub fn compare(&self) -> Comparison {
        if !self.generated.is_present() {
            return self.not_generated();
        }

        let published_kind = if self.published.is_unofficial() {
            "Unofficial"
        } else {
            "Core"
        };

        if let Some(modification) = self.modification(self.local) {
            let trigger_source =
                if self.published.is_present() && self.modification(self.published).is_none() {
                    format!("Generated (Same as {published_kind})")
                } else {
                    "Generated".to_string()
                };

            return Comparison {
                compare_state: CompareState::LocalDiffers,
                can_update: true,
                modification_message: Some("Local differs from generated".to_string()),
                trigger_source,
                other: Some(SourceRole::Local),
                modified: modification.fields,
                triggers: DisplayTriggers::Compared(modification.triggers),
            };
        }

        if let Some(modification) = self.modification(self.published) {
            // An existing local copy already matches Generated; offering to
            // overwrite it would change nothing.
            let (trigger_source, can_update) = if self.local.is_present() {
                ("Generated (Same as Local)", false)
            } else {
                ("Generated (Not in Local)", true)
            };

            return Comparison {
                compare_state: CompareState::PublishedDiffers,
                can_update,
                modification_message: Some(format!("{published_kind} differs from generated")),
                trigger_source: trigger_source.to_string(),
                other: Some(SourceRole::Published),
                modified: modification.fields,
                triggers: DisplayTriggers::Compared(modification.triggers),
            };
        }

        let triggers = DisplayTriggers::Plain(self.generated.triggers(self.hooks).to_vec());

        if !self.local.is_present() {
            let trigger_source = if self.published.is_present() {
                format!("Generated (Same as {published_kind}, not in Local)")
            } else {
                "Generated (Not in Local)".to_string()
            };

            return Comparison {
                compare_state: CompareState::PublishedMatchesNotLocal,
                can_update: true,
                modification_message: Some(format!(
                    "Local {} does not exist",
                    self.hooks.display_name()
                )),
                trigger_source,
                other: None,
                modified: ModifiedFields::default(),
                triggers,
            };
        }

        let trigger_source = if self.published.is_present() {
            format!("Generated (Same as {published_kind} and Local)")
        } else {
            "Generated (Same as Local)".to_string()
        };

        Comparison {
            compare_state: CompareState::Same,
            can_update: false,
            modification_message: None,
            trigger_source,
            other: None,
            modified: ModifiedFields::default(),
            triggers,
        }
    }

    fn not_generated(&self) -> Comparison {
        let (trigger_source, triggers) = if self.published.is_present() {
            let label = if self.published.is_unofficial() {
                "Unofficial (Not Generated)"
            } else {
                "Core (Not Generated)"
            };
            (label, self.published.triggers(self.hooks).to_vec())
        } else if self.local.is_present() {
            ("Local (Not Generated)", self.local.triggers(self.hooks).to_vec())
        } else {
            ("", Vec::new())
        };

        Comparison {
            compare_state: CompareState::None,
            can_update: false,
            modification_message: None,
            trigger_source: trigger_source.to_string(),
            other: None,
            modified: ModifiedFields::default(),
            triggers: DisplayTriggers::Plain(triggers),
        }
    }

    /// Compare `source` against Generated. `None` if `source` is empty or
    /// identical.
    fn modification(&self, source: &AssetSource) -> Option<Modification> {
        let asset = source.asset()?;
        let generated = self.generated.asset()?;

        let mut fields = ModifiedFields {
            title: asset.title != generated.title,
            description: asset.description != generated.description,
            points: false,
        };
        let specific = self
            .hooks
            .asset_specific_modified(asset, generated, &mut fields);

        let triggers = diff_triggers(
            self.generated.triggers(self.hooks),
            source.triggers(self.hooks),
        );

        if fields.any() || specific || triggers.is_modified() {
            Some(Modification { fields, triggers })
        } else {
            None
        }
    }
}
