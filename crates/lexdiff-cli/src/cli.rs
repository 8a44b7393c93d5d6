use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lexdiff",
    about = "Article-level change sets for legal texts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[extract]` and `[replay]` tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the articles of a text tree
    Extract(ExtractArgs),
    /// Compute the change set between two law states
    Diff(DiffArgs),
    /// Apply change sets to a law state, in order
    Apply(ApplyArgs),
    /// Word-level diff of two texts
    Words(WordsArgs),
    /// Show the law as of a timeline step
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// JSON text tree, or plain text with --plain
    pub input: PathBuf,
    /// Read the input as plain text
    #[arg(long)]
    pub plain: bool,
    /// Document title for --plain input
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Reference recorded as the change set base (default: content digest)
    #[arg(long)]
    pub base: Option<String>,
    /// Reference recorded as the change set result (default: content digest)
    #[arg(long)]
    pub result: Option<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    pub base: PathBuf,
    #[arg(required = true)]
    pub change_sets: Vec<PathBuf>,
}

#[derive(Args)]
pub struct WordsArgs {
    pub old: String,
    pub new: String,
    /// Treat OLD and NEW as file paths
    #[arg(long)]
    pub files: bool,
}

#[derive(Args)]
pub struct ReplayArgs {
    pub timeline: PathBuf,
    /// Step index; every step when omitted
    #[arg(short, long)]
    pub step: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extract_plain() {
        let cli = Cli::try_parse_from(["lexdiff", "extract", "--plain", "--title", "Ley", "bill.txt"])
            .unwrap();
        if let Command::Extract(args) = cli.command {
            assert!(args.plain);
            assert_eq!(args.title, Some("Ley".into()));
            assert_eq!(args.input, PathBuf::from("bill.txt"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_diff_with_refs() {
        let cli = Cli::try_parse_from([
            "lexdiff", "diff", "old.json", "new.json", "--base", "v1", "--result", "v2",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.base, Some("v1".into()));
            assert_eq!(args.result, Some("v2".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_apply_chain() {
        let cli = Cli::try_parse_from(["lexdiff", "apply", "base.json", "a.json", "b.json"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert_eq!(args.change_sets.len(), 2);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn apply_requires_a_change_set() {
        assert!(Cli::try_parse_from(["lexdiff", "apply", "base.json"]).is_err());
    }

    #[test]
    fn parse_words() {
        let cli = Cli::try_parse_from(["lexdiff", "words", "old text", "old words"]).unwrap();
        if let Command::Words(args) = cli.command {
            assert_eq!(args.old, "old text");
            assert!(!args.files);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_replay_step() {
        let cli = Cli::try_parse_from(["lexdiff", "replay", "timeline.json", "--step", "3"]).unwrap();
        if let Command::Replay(args) = cli.command {
            assert_eq!(args.step, Some(3));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "lexdiff", "words", "a", "b", "--verbose", "--format", "json", "--config", "lexdiff.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("lexdiff.toml")));
    }
}
