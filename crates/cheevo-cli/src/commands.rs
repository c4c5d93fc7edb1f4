use anyhow::{bail, Context};
use cheevo_diff::{diff_text, CodeNotes, NoteProvider, RenderedTrigger, WordSegment};
use cheevo_reconcile::{AssetReconciler, CompareState, Diagnostics, LocalIdPool, ReconcileConfig};
use cheevo_types::{Asset, AssetKind};
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::cli::*;
use crate::settings::load_config;
use crate::snapshot_files::{read_asset, read_notes, write_asset};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.hex)?;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, config, cli.format),
        Command::Update(args) => cmd_update(args, config, cli.format),
        Command::Delete(args) => cmd_delete(args, config, cli.format),
    }
}

struct Loaded {
    reconciler: AssetReconciler,
    notes: Option<CodeNotes>,
}

impl Loaded {
    fn render(&self) -> Vec<RenderedTrigger> {
        self.reconciler
            .render_triggers(self.notes.as_ref().map(|n| n as &dyn NoteProvider))
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    snapshot: &'a cheevo_reconcile::ReconcileSnapshot,
    rendered: Vec<RenderedTrigger>,
    warnings: &'a [String],
}

fn load_sources(sources: &SourceArgs, config: ReconcileConfig) -> anyhow::Result<Loaded> {
    let generated = read_asset(sources.generated.as_deref())?;
    let local = read_asset(sources.local.as_deref())?;
    let published = read_asset(sources.published.as_deref())?;

    let kind = match sources.kind {
        Some(kind) => kind,
        None => infer_kind([&generated, &local, &published])?,
    };

    let mut reconciler = AssetReconciler::for_kind(kind, config);
    reconciler.load(generated, local, published);

    let notes = sources.notes.as_deref().map(read_notes).transpose()?;
    Ok(Loaded { reconciler, notes })
}

fn infer_kind(assets: [&Option<Asset>; 3]) -> anyhow::Result<AssetKind> {
    let mut kinds = assets.into_iter().flatten().map(Asset::kind);
    let Some(kind) = kinds.next() else {
        bail!("no asset snapshots found; pass --kind to compare empty slots");
    };
    if let Some(other) = kinds.find(|k| *k != kind) {
        bail!("snapshots disagree on asset kind: {kind} vs {other}");
    }
    Ok(kind)
}

fn report_json(loaded: &Loaded, warnings: &[String]) -> anyhow::Result<String> {
    let report = Report {
        snapshot: loaded.reconciler.snapshot(),
        rendered: loaded.render(),
        warnings,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn print_report(loaded: &Loaded, warnings: &[String], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report_json(loaded, warnings)?),
        OutputFormat::Text => {
            print_snapshot(&loaded.reconciler);
            for trigger in &loaded.render() {
                print_trigger(trigger);
            }
            for warning in warnings {
                println!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
    Ok(())
}

fn cmd_compare(args: CompareArgs, config: ReconcileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let loaded = load_sources(&args.sources, config)?;
    print_report(&loaded, &[], format)
}

struct UpdateOutcome {
    loaded: Loaded,
    diagnostics: Diagnostics,
    allocated: Option<u32>,
    updated: bool,
}

fn update_local(args: &UpdateArgs, config: ReconcileConfig) -> anyhow::Result<UpdateOutcome> {
    let Some(local_path) = args.sources.local.as_deref() else {
        bail!("--local is required to update");
    };
    let mut loaded = load_sources(&args.sources, config)?;
    let mut diagnostics = Diagnostics::new();

    let reconciler = &mut loaded.reconciler;
    if !reconciler.snapshot().comparison.can_update {
        return Ok(UpdateOutcome {
            loaded,
            diagnostics,
            allocated: None,
            updated: false,
        });
    }

    let mut pool = match args.next_local_id {
        Some(first) => LocalIdPool::starting_at(first),
        None => LocalIdPool::new(reconciler.config().local_id_base),
    };
    if pool.is_exhausted() {
        bail!(
            "no temporary ids left above {}; lower local_id_base",
            reconciler.config().local_id_base
        );
    }
    let allocated = pool.allocate_with(|id| reconciler.allocate_local_id(id));

    reconciler.commit(&mut diagnostics, args.validate_all)?;
    let local = reconciler
        .local()
        .asset()
        .context("commit left the local slot empty")?;
    write_asset(local_path, local)?;

    Ok(UpdateOutcome {
        loaded,
        diagnostics,
        allocated,
        updated: true,
    })
}

fn cmd_update(args: UpdateArgs, config: ReconcileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = update_local(&args, config)?;
    if format == OutputFormat::Text {
        if let Some(id) = outcome.allocated {
            println!("Allocated local id {}", id.to_string().yellow());
        }
        if outcome.updated {
            println!(
                "{} Local copy updated (#{})",
                "✓".green().bold(),
                outcome.loaded.reconciler.snapshot().id
            );
        } else {
            println!("{} Nothing to update", "✓".green());
        }
    }
    print_report(&outcome.loaded, outcome.diagnostics.warnings(), format)
}

fn delete_local(args: &DeleteArgs, config: ReconcileConfig) -> anyhow::Result<(Loaded, Diagnostics)> {
    let Some(local_path) = args.sources.local.as_deref() else {
        bail!("--local is required to delete");
    };
    let mut loaded = load_sources(&args.sources, config)?;
    let mut diagnostics = Diagnostics::new();
    loaded.reconciler.delete(&mut diagnostics)?;

    if local_path.exists() {
        std::fs::remove_file(local_path)
            .with_context(|| format!("removing {}", local_path.display()))?;
    }
    Ok((loaded, diagnostics))
}

fn cmd_delete(args: DeleteArgs, config: ReconcileConfig, format: OutputFormat) -> anyhow::Result<()> {
    let (loaded, diagnostics) = delete_local(&args, config)?;
    if format == OutputFormat::Text {
        println!("{} Local copy removed", "✓".green().bold());
    }
    print_report(&loaded, diagnostics.warnings(), format)
}

fn state_label(state: CompareState) -> ColoredString {
    match state {
        CompareState::None => "not generated".dimmed(),
        CompareState::Same => "same".green(),
        CompareState::LocalDiffers => "local differs".yellow(),
        CompareState::PublishedDiffers => "published differs".yellow(),
        CompareState::PublishedMatchesNotLocal => "not in local".cyan(),
    }
}

fn word_diff(old: &str, new: &str) -> String {
    diff_text(old, new)
        .segments
        .iter()
        .map(|segment| match segment {
            WordSegment::Same(text) => text.normal().to_string(),
            WordSegment::Removed(text) => text.red().strikethrough().to_string(),
            WordSegment::Added(text) => text.green().to_string(),
        })
        .collect()
}

fn print_snapshot(reconciler: &AssetReconciler) {
    let snapshot = reconciler.snapshot();
    let comparison = &snapshot.comparison;

    println!("{} {}", snapshot.title.bold(), format!("#{}", snapshot.id).dimmed());
    if !snapshot.description.is_empty() {
        println!("  {}", snapshot.description);
    }
    println!("  Points: {}", snapshot.points);
    if let Some(badge) = &snapshot.badge {
        println!("  Badge: {} ({})", badge.name, badge.role);
    }
    println!("  State: {}", state_label(comparison.compare_state));
    println!("  Triggers: {}", comparison.trigger_source.cyan());
    if let Some(message) = &comparison.modification_message {
        println!("  {}", message.yellow());
    }

    if let Some(other) = reconciler.other() {
        let generated = reconciler.generated();
        if comparison.modified.title {
            println!("  Title: {}", word_diff(other.title(), generated.title()));
        }
        if comparison.modified.description {
            println!(
                "  Description: {}",
                word_diff(other.description(), generated.description())
            );
        }
        if comparison.modified.points {
            println!("  Points: {} -> {}", other.points(), generated.points());
        }
    }
    if comparison.can_update {
        println!("  {}", "update available".green());
    }
}

fn print_trigger(trigger: &RenderedTrigger) {
    let label = if trigger.label.is_empty() {
        "Requirements"
    } else {
        trigger.label.as_str()
    };
    println!("\n{}", label.bold());

    for group in &trigger.groups {
        println!("  {}", group.label.underline());
        for row in &group.rows {
            let marker = if row.is_modified { "~".yellow() } else { " ".normal() };
            let text = match (&row.reference, &row.compared) {
                (Some(reference), Some(compared)) if row.is_modified => {
                    format!("{} | {}", reference.green(), compared.red())
                }
                (Some(reference), None) if row.is_modified => {
                    format!("{} | {}", reference.green(), "(missing)".dimmed())
                }
                (None, Some(compared)) => format!("{} | {}", "(missing)".dimmed(), compared.red()),
                (Some(reference), _) => reference.clone(),
                (None, None) => String::new(),
            };
            let note = row
                .note
                .as_deref()
                .map(|note| format!("  ; {note}").dimmed().to_string())
                .unwrap_or_default();
            println!("  {marker} {text}{note}");
        }
    }
}
