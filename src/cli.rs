// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The tool takes exactly two positional arguments:
//   repo-grab <source> <destination>
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;

use crate::error::{ErrorKind, GrabError};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo-grab",
    version = "0.1.0",
    about = "Scaffold a new project from a GitHub repository, no git required",
    long_about = "repo-grab downloads the file tree of a GitHub repository at a given \
                  revision into a fresh local directory. It never clones history: it \
                  resolves the revision, lists the tree through the GitHub API, and \
                  fetches each file's raw contents concurrently."
)]
pub struct Cli {
    /// Repository to scaffold from: owner/name[/sub/path...][#revision]
    ///
    /// The optional '#revision' fragment pins a branch, tag, or commit.
    /// Without it, the latest release tag is used, falling back to the
    /// repository's default branch.
    ///
    /// This is a positional argument (required, no flag needed)
    pub source: String,

    /// Directory to create and populate. Must not already exist.
    ///
    /// This is a positional argument (required)
    pub destination: String,

    /// Number of concurrent download workers
    ///
    /// Six matches common browser per-host connection limits. It is a
    /// deliberate throttle, not a protocol limit.
    ///
    /// #[arg(long, default_value_t = 6)] creates --workers flag with default value
    #[arg(long, default_value_t = 6)]
    pub workers: usize,
}

impl Cli {
    // Parses the process arguments, routing argument mistakes through our
    // own error type so they exit with code 1 like every other fatal error
    //
    // clap's plain parse() would print its own message and exit with code
    // 2 on a missing argument, bypassing report_error entirely.
    //
    // Returns:
    //   Ok(Some(cli)) - arguments parsed, run the pipeline
    //   Ok(None)      - clap already answered (--help or --version)
    //   Err(usage)    - malformed arguments, rendered with the usage hint
    pub fn parse_or_usage() -> Result<Option<Self>, GrabError> {
        Self::parse_or_usage_from(std::env::args_os())
    }

    /// Same as parse_or_usage, but from an explicit argument list (tests)
    pub fn parse_or_usage_from<I, T>(args: I) -> Result<Option<Self>, GrabError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            // --help and --version are not errors: clap renders them on
            // stdout and the process exits 0
            Err(error) if !error.use_stderr() => {
                let _ = error.print();
                Ok(None)
            }
            Err(error) => {
                // Keep clap's one-line diagnosis as the detail; our own
                // usage hint is printed by the presentation layer
                let message = error
                    .to_string()
                    .lines()
                    .next()
                    .unwrap_or("invalid arguments")
                    .trim_start_matches("error: ")
                    .to_string();
                Err(GrabError::new(ErrorKind::Usage).with_detail(message))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 2. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
//
// 3. Where did the subcommands go?
//    - This tool does exactly one thing, so the arguments live directly
//      on the Cli struct instead of in a Commands enum
//    - clap turns the doc comments above each field into --help text
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arguments_become_a_usage_error() {
        // A bare invocation must surface as our own usage error (exit
        // code 1 with the hint), never as clap's exit-code-2 path
        let error = Cli::parse_or_usage_from(["repo-grab"]).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Usage);
        assert!(error.show_usage());
        assert!(!error.details.is_empty());
    }

    #[test]
    fn test_missing_destination_becomes_a_usage_error() {
        let error = Cli::parse_or_usage_from(["repo-grab", "owner/name"]).unwrap_err();
        assert_eq!(error.kind, ErrorKind::Usage);
    }

    #[test]
    fn test_full_invocation_parses_with_default_workers() {
        let cli = Cli::parse_or_usage_from(["repo-grab", "owner/name", "./dest"])
            .unwrap()
            .expect("two positional arguments parse");
        assert_eq!(cli.source, "owner/name");
        assert_eq!(cli.destination, "./dest");
        assert_eq!(cli.workers, 6);
    }

    #[test]
    fn test_workers_flag_overrides_the_default() {
        let cli = Cli::parse_or_usage_from([
            "repo-grab",
            "owner/name",
            "./dest",
            "--workers",
            "3",
        ])
        .unwrap()
        .expect("valid arguments parse");
        assert_eq!(cli.workers, 3);
    }

    #[test]
    fn test_unknown_flag_becomes_a_usage_error() {
        let error =
            Cli::parse_or_usage_from(["repo-grab", "owner/name", "./dest", "--fast"])
                .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Usage);
    }
}
