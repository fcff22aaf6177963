// src/source.rs
// =============================================================================
// This module parses the source argument into a RepoRef.
//
// The accepted shape is:
//   owner/name[/sub/path...][#revision]
//
// Examples:
//   rust-lang/mdBook                  -> whole repo, resolved revision
//   rust-lang/mdBook#v0.4.40          -> whole repo at tag v0.4.40
//   rust-lang/mdBook/guide/src#main   -> only guide/src, at branch main
//
// Parsing happens exactly once, up front; the RepoRef is immutable after
// construction and flows read-only through the rest of the pipeline.
//
// Rust concepts:
// - split_once: Splits a string at the first occurrence of a delimiter
// - Option<String>: The revision might be absent (triggers resolution)
// =============================================================================

use crate::error::GrabError;

// A parsed repository reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Sub-path to narrow the tree to; empty means the whole repository
    pub sub_path: String,
    /// Explicit branch/tag/commit; None triggers release/default-branch resolution
    pub revision: Option<String>,
}

impl RepoRef {
    // Parses the raw source argument
    //
    // Split order matters: the '#' revision fragment is peeled off first,
    // then the remainder is split on '/' into owner, name, and sub-path.
    pub fn parse(raw: &str) -> Result<Self, GrabError> {
        let raw = raw.trim();

        // Peel off the optional '#revision' fragment
        // An empty fragment ("owner/name#") behaves as if absent
        let (path_part, revision) = match raw.split_once('#') {
            Some((path, rev)) if !rev.is_empty() => (path, Some(rev.to_string())),
            Some((path, _)) => (path, None),
            None => (raw, None),
        };

        // Split the path part into segments, ignoring stray slashes
        let segments: Vec<&str> = path_part.split('/').filter(|s| !s.is_empty()).collect();

        if segments.len() < 2 {
            return Err(GrabError::usage(format!(
                "could not parse '{raw}' as owner/name[/sub/path...][#revision]"
            )));
        }

        Ok(Self {
            owner: segments[0].to_string(),
            name: segments[1].to_string(),
            sub_path: segments[2..].join("/"),
            revision,
        })
    }

    /// The "owner/name" form used in messages and API paths
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is split_once?
//    - Splits a string at the FIRST occurrence of the delimiter
//    - Returns Option<(&str, &str)>: Some((before, after)) or None
//    - Perfect here: a revision like "feat/foo" may itself contain '/'
//      but never '#', so splitting on '#' first keeps it intact
//
// 2. Why filter out empty segments?
//    - "owner//name" or a trailing slash would otherwise produce empty
//      strings in the segment list and corrupt the sub-path
//
// 3. Why is revision an Option?
//    - Absence means "resolve it for me" (latest release, then default
//      branch); presence means "use exactly this string, unvalidated"
// -----------------------------------------------------------------------------
