//! # vcsr CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! With no subcommand the linter runs with its defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcsr_cli::generate::{run_generate, GenerateArgs};
use vcsr_cli::lint::{run_lint, LintArgs};
use vcsr_cli::validate::{run_validate, ValidateArgs};

/// Credential schema registry toolkit.
///
/// Scores schemas for quality, validates data against schemas and
/// generates type bindings.
#[derive(Parser, Debug)]
#[command(name = "vcsr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every schema and write the quality report (default).
    Lint(LintArgs),

    /// Validate a data file against a schema file.
    Validate(ValidateArgs),

    /// Generate type bindings for a schema file.
    Generate(GenerateArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(base = %base.display(), "resolved working directory");

    let result = match cli.command.unwrap_or_else(|| Commands::Lint(LintArgs::default())) {
        Commands::Lint(args) => run_lint(&args, &base).await,
        Commands::Validate(args) => run_validate(&args, &base),
        Commands::Generate(args) => run_generate(&args, &base).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["vcsr"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parse_lint_flags() {
        let cli = Cli::try_parse_from([
            "vcsr", "lint", "--dir", "a", "--dir", "b", "--output", "r.json", "--concurrency", "2",
            "--json",
        ])
        .unwrap();
        if let Some(Commands::Lint(args)) = cli.command {
            assert_eq!(args.dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
            assert_eq!(args.output, PathBuf::from("r.json"));
            assert_eq!(args.concurrency, 2);
            assert!(args.json);
        } else {
            panic!("expected lint");
        }
    }

    #[test]
    fn cli_parse_lint_defaults() {
        let cli = Cli::try_parse_from(["vcsr", "lint"]).unwrap();
        if let Some(Commands::Lint(args)) = cli.command {
            assert!(args.dirs.is_empty());
            assert_eq!(args.output, PathBuf::from("validation-report.json"));
            assert!(!args.json);
        } else {
            panic!("expected lint");
        }
    }

    #[test]
    fn cli_parse_validate_requires_both_files() {
        assert!(Cli::try_parse_from(["vcsr", "validate", "--schema", "s.json"]).is_err());
        let cli =
            Cli::try_parse_from(["vcsr", "validate", "--schema", "s.json", "--data", "d.json"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Validate(_))));
    }

    #[test]
    fn cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "vcsr", "-vv", "generate", "--schema", "s.json", "--lang", "rust", "--out", "gen",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Some(Commands::Generate(args)) = cli.command {
            assert_eq!(args.lang, "rust");
            assert_eq!(args.out, Some(PathBuf::from("gen")));
            assert_eq!(args.quicktype, PathBuf::from("quicktype"));
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn cli_parse_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["vcsr", "lint", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
