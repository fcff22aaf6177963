// src/github/mod.rs
// =============================================================================
// This module handles all GitHub access.
//
// Submodules:
// - transport: one pooled HTTP client + response classification
// - resolve: turns a RepoRef into a concrete revision
// - tree: recursive file listing + sub-path filtering
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod resolve;
mod transport;
mod tree;

// Re-export public items from submodules
// This lets users write `github::resolve_revision()` instead of
// `github::resolve::resolve_revision()`
pub use resolve::resolve_revision;
pub use transport::{fetch_json, send, GitHub, ResponseOutcome};
pub use tree::{filter_sub_path, list_files, RemoteFile};
