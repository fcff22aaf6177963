// src/error.rs
// =============================================================================
// This module defines the structured error type used across the whole tool.
//
// Every failure is terminal: there is no retry or local recovery anywhere
// in the pipeline. The first error aborts the run and bubbles up to
// main.rs, which renders it and maps it to the process exit code.
//
// Each error carries:
// - kind: which failure class this is (drives the user-visible message)
// - details: extra context lines (URLs, paths, underlying error text)
//
// Rust concepts:
// - Enums: One variant per failure class, so matches are exhaustive
// - thiserror: Derives Display and std::error::Error from attributes
// =============================================================================

use thiserror::Error;

// The failure classes the tool can report
//
// The #[error("...")] attribute on each variant becomes its Display text,
// which is exactly what the user sees on stderr.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The arguments were missing or malformed; a usage hint is shown
    #[error("a source repository and a destination directory are required")]
    Usage,

    /// The destination already exists; we never merge or overwrite
    #[error("destination directory already exists")]
    DestinationExists,

    /// Connection-level failure (DNS, TCP, TLS)
    #[error("network error")]
    Network,

    /// The server answered with a status we don't handle (not 200/404)
    #[error("server responded with {status} {status_text}")]
    Server { status: u16, status_text: String },

    /// The response body could not be parsed
    #[error("unable to read data")]
    BadResponse,

    /// The repository itself does not exist
    #[error("repository not found")]
    RepoNotFound,

    /// The repository exists but the requested revision does not
    #[error("branch/tag/revision not found")]
    RevisionNotFound,

    /// The repository and revision exist but the sub-path matched nothing
    #[error("repository path not found")]
    PathNotFound,

    /// The tree listing came back with zero files
    #[error("repository is empty")]
    EmptyRepo,

    /// The remote API truncated the tree listing; a partial tree is unsafe
    #[error("repository too large")]
    TooLarge,

    /// Directory creation, file write, or stat failed
    #[error("filesystem error")]
    Filesystem,
}

// The error type every fallible function in this crate returns
//
// Display delegates to the kind's message; the detail lines are printed
// separately by the presentation layer, one per line.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct GrabError {
    /// Which failure class this is
    pub kind: ErrorKind,
    /// Extra context lines shown under the main message
    pub details: Vec<String>,
}

impl GrabError {
    /// Create an error of the given kind with no detail lines yet
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            details: Vec::new(),
        }
    }

    /// Shorthand for a usage error with one detail line
    pub fn usage(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage).with_detail(detail)
    }

    /// Append a context line (builder style, so calls can be chained)
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Should the presentation layer print the usage hint for this error?
    pub fn show_usage(&self) -> bool {
        matches!(self.kind, ErrorKind::Usage)
    }
}
