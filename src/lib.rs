// src/lib.rs
// =============================================================================
// Library root for repo-grab.
//
// The binary (src/main.rs) is a thin shell around these modules, and our
// integration tests in tests/ use them directly. The pipeline runs in
// this order:
//
//   cli -> preflight (source parsing, destination check) ->
//   github::resolve -> github::tree -> download
//
// Rust concepts:
// - Library + binary targets: One crate can build both; the library
//   holds the logic, the binary holds the terminal-facing shell
// - pub mod: Exposes a module to users of the library (here: the binary
//   and the integration tests)
// =============================================================================

pub mod cli;       // src/cli.rs - command-line parsing
pub mod preflight; // src/preflight.rs - pre-network argument/destination checks
pub mod source;    // src/source.rs - repository reference parsing
pub mod error;     // src/error.rs - structured error type
pub mod github;    // src/github/ - GitHub API access (resolve + tree)
pub mod download;  // src/download/ - concurrent download engine
