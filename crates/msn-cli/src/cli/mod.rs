use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `msn` binary.
#[derive(Debug, Parser)]
#[command(name = "msn", version, about = "msn - mission repository sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use msn_core::RepoCoordinates;
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pull_parses_repository() {
        let cli = Cli::try_parse_from(["msn", "pull", "cs1101s/mission-1", "--out", "m1.json"])
            .expect("cli should parse");

        let Commands::Pull(args) = cli.command else {
            panic!("expected pull");
        };
        assert_eq!(args.repo, RepoCoordinates::new("cs1101s", "mission-1"));
        assert_eq!(args.out, Some(PathBuf::from("m1.json")));
    }

    #[test]
    fn malformed_repository_is_rejected() {
        for value in ["no-slash", "a/b/c", "/name", "owner/"] {
            let parsed = Cli::try_parse_from(["msn", "pull", value]);
            assert!(parsed.is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn push_parses_snapshots_and_flags() {
        let cli = Cli::try_parse_from([
            "msn",
            "push",
            "org/m2",
            "--cached",
            "old.json",
            "--current",
            "new.json",
            "--teacher",
            "-m",
            "Fix typo",
        ])
        .expect("cli should parse");

        let Commands::Push(args) = cli.command else {
            panic!("expected push");
        };
        assert_eq!(args.snapshots.cached, PathBuf::from("old.json"));
        assert_eq!(args.snapshots.current, PathBuf::from("new.json"));
        assert!(args.snapshots.teacher);
        assert_eq!(args.message.as_deref(), Some("Fix typo"));
    }

    #[test]
    fn plan_requires_both_snapshots() {
        assert!(Cli::try_parse_from(["msn", "plan", "--cached", "old.json"]).is_err());
        let cli = Cli::try_parse_from(["msn", "plan", "--cached", "a", "--current", "b"])
            .expect("cli should parse");
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert!(!args.snapshots.teacher);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["msn", "mcq", "Problem.md", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Mcq(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["msn", "--format", "table", "mcq", "Problem.md"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["msn", "--verbose", "mcq", "Problem.md"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert!(flags.verbose);
        assert!(!flags.quiet);
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
