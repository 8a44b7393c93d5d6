use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use lexdiff_diff::{compute_change_set, compute_change_set_with_refs, compute_word_diff};
use lexdiff_extract::{extract_with, Extraction, SourceDocument};
use lexdiff_replay::{apply_chain, InMemoryDocumentStore, TimelineReplayer, TimelineView};
use lexdiff_types::{ArticleChange, ChangeSet, LawState, TimelineStep, TokenKind, WordToken};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cli::*;
use crate::config::LexdiffConfig;

/// A timeline bundle: the original text, the steps, and full documents for
/// steps that carry no change set.
#[derive(Debug, Deserialize)]
pub struct TimelineFile {
    pub original: Option<LawState>,
    pub steps: Vec<TimelineStep>,
    #[serde(default)]
    pub documents: BTreeMap<String, LawState>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = LexdiffConfig::load(cli.config.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Extract(args) => cmd_extract(args, &config, format),
        Command::Diff(args) => cmd_diff(args, format),
        Command::Apply(args) => cmd_apply(args, format),
        Command::Words(args) => cmd_words(args, format),
        Command::Replay(args) => cmd_replay(args, &config, format),
    }
}

fn cmd_extract(args: ExtractArgs, config: &LexdiffConfig, format: OutputFormat) -> anyhow::Result<()> {
    let doc = if args.plain {
        let text = read_text(&args.input)?;
        let title = args.title.unwrap_or_else(|| file_stem(&args.input));
        SourceDocument::from_text(title, text)
    } else {
        read_json(&args.input)?
    };
    let extraction = extract_with(&doc, &config.extract);
    match format {
        OutputFormat::Json => print_json(&extraction),
        OutputFormat::Text => {
            print_extraction(&extraction);
            Ok(())
        }
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old: LawState = read_json(&args.old)?;
    let new: LawState = read_json(&args.new)?;
    let change_set = match (args.base, args.result) {
        (None, None) => compute_change_set(&old, &new),
        (base, result) => compute_change_set_with_refs(
            &old,
            &new,
            base.unwrap_or_else(|| old.digest().to_reference()),
            result.unwrap_or_else(|| new.digest().to_reference()),
        ),
    };
    match format {
        OutputFormat::Json => print_json(&change_set),
        OutputFormat::Text => {
            print_change_set(&change_set);
            Ok(())
        }
    }
}

fn cmd_apply(args: ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let base: LawState = read_json(&args.base)?;
    let change_sets = args
        .change_sets
        .iter()
        .map(|path| read_json::<ChangeSet>(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let applied = apply_chain(&base, &change_sets).map_err(|err| {
        let failed = args.change_sets[err.index].display().to_string();
        anyhow::Error::new(err).context(format!("applying {}", failed))
    })?;
    match format {
        OutputFormat::Json => print_json(&applied.result),
        OutputFormat::Text => {
            println!(
                "{} Applied {} change set(s), {} article(s) touched",
                "✓".green().bold(),
                change_sets.len(),
                applied.touched.len()
            );
            print_law(&applied.result);
            Ok(())
        }
    }
}

fn cmd_words(args: WordsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (old, new) = if args.files {
        (read_text(Path::new(&args.old))?, read_text(Path::new(&args.new))?)
    } else {
        (args.old, args.new)
    };
    let tokens = compute_word_diff(&old, &new);
    match format {
        OutputFormat::Json => print_json(&tokens),
        OutputFormat::Text => {
            println!("{}", render_tokens(&tokens));
            Ok(())
        }
    }
}

fn cmd_replay(args: ReplayArgs, config: &LexdiffConfig, format: OutputFormat) -> anyhow::Result<()> {
    let timeline: TimelineFile = read_json(&args.timeline)?;
    let store: InMemoryDocumentStore = timeline.documents.into_iter().collect();
    let replayer = TimelineReplayer::new(timeline.original.as_ref(), &timeline.steps)
        .with_store(&store)
        .with_config(config.replay.clone());

    let views = match args.step {
        Some(step) => vec![replayer
            .replay(step)
            .with_context(|| format!("replaying {} to step {}", args.timeline.display(), step))?],
        None => {
            let targets: Vec<usize> = (0..timeline.steps.len()).collect();
            replayer
                .replay_many(&targets)
                .into_iter()
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("replaying {}", args.timeline.display()))?
        }
    };

    match format {
        OutputFormat::Json if args.step.is_some() => print_json(&views[0]),
        OutputFormat::Json => print_json(&views),
        OutputFormat::Text => {
            for view in &views {
                print_view(view);
            }
            Ok(())
        }
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_law(law: &LawState) {
    println!("{}", law.title.bold());
    for section in &law.sections {
        println!("  {} ({})", section.heading.cyan(), section.id.dimmed());
        for article in &section.articles {
            println!("    {} {}", article.id.yellow(), article.heading);
        }
    }
}

fn print_extraction(extraction: &Extraction) {
    print_law(&extraction.law);
    println!("{} article(s)", extraction.law.article_count());
    for diagnostic in &extraction.diagnostics {
        println!("  {} {}", "warning:".yellow().bold(), diagnostic);
    }
}

fn print_change_set(change_set: &ChangeSet) {
    if change_set.is_empty() {
        println!("No changes.");
        return;
    }
    println!("{} → {}", change_set.base.dimmed(), change_set.result.dimmed());
    for change in &change_set.changes {
        match change {
            ArticleChange::Insert { article, after, .. } => {
                let anchor = if after.is_empty() { "start" } else { after.as_str() };
                println!("  {} {} after {}", "insert".green(), article.yellow(), anchor);
            }
            ArticleChange::Substitute { article, .. } => {
                println!("  {} {}", "substitute".cyan(), article.yellow());
            }
            ArticleChange::Repeal { article, .. } => {
                println!("  {} {}", "repeal".red(), article.yellow());
            }
        }
    }
    println!(
        "{} repeal(s), {} substitution(s), {} insert(s)",
        change_set.repeals(),
        change_set.substitutions(),
        change_set.inserts()
    );
}

fn print_view(view: &TimelineView) {
    let step = &view.step;
    let index = step.index.map(|i| i.to_string()).unwrap_or_else(|| "-".into());
    let kind = step.kind.map(|k| k.as_str()).unwrap_or("original");
    let date = step.date.map(|d| d.to_string()).unwrap_or_default();
    println!("{} {} {} {}", format!("[{}]", index).bold(), kind.cyan(), step.reference, date.dimmed());
    if !step.title.is_empty() {
        println!("  {}", step.title);
    }
    if let Some(votes) = &step.votes {
        let (yes, no, abstain) = votes.totals();
        println!("  votes: {} yes, {} no, {} abstain", yes.to_string().green(), no.to_string().red(), abstain);
    }
    if view.is_new_law {
        println!("  {} {} article(s)", "new law".green(), view.law.article_count());
    }
    for skipped in &view.skipped_steps {
        println!("  {} step {} ({}): {}", "skipped".yellow(), skipped.index, skipped.reference, skipped.reason);
    }
    if let Some(reason) = &view.diff_unavailable {
        println!("  {} {}", "diff unavailable:".yellow(), reason);
    }
    for diff in &view.diffs {
        println!("  {} {}", diff.change_type.to_string().bold(), diff.heading);
        if let Some(tokens) = &diff.word_diff {
            println!("    {}", render_tokens(tokens));
        }
    }
    if !view.changed_article_ids.is_empty() {
        println!("  changed so far: {}", view.changed_article_ids.join(", ").dimmed());
    }
}

fn render_tokens(tokens: &[WordToken]) -> String {
    tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::Unchanged => t.text.normal().to_string(),
            TokenKind::Added => t.text.green().underline().to_string(),
            TokenKind::Removed => t.text.red().strikethrough().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
