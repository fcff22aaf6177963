// src/preflight.rs
// =============================================================================
// This module runs every check that must pass BEFORE the first network
// request is made.
//
// What happens here:
// 1. Reject blank source/destination arguments (usage error)
// 2. Parse the source into a RepoRef
// 3. Reject a destination that already exists (we never merge/overwrite)
//
// The destination check uses fs::metadata instead of Path::exists():
// exists() answers false both for "not there" and "could not stat", and
// only the first of those is fine. A stat failure (bad path, permission
// wall) is a filesystem error the user needs to see.
//
// Rust concepts:
// - io::ErrorKind: lets us tell NotFound apart from every other stat
//   failure without string matching
// =============================================================================

use std::io;

use crate::error::{ErrorKind, GrabError};
use crate::source::RepoRef;

// Validates the arguments and returns the parsed repository reference
//
// Makes no network requests and creates nothing on disk. Errors:
//   Usage             - blank argument or unparseable source
//   DestinationExists - the destination path is already there
//   Filesystem        - the destination path could not be stat'ed
pub fn preflight(source: &str, destination: &str) -> Result<RepoRef, GrabError> {
    if source.trim().is_empty() {
        return Err(GrabError::usage("the source argument is empty"));
    }
    if destination.trim().is_empty() {
        return Err(GrabError::usage("the destination argument is empty"));
    }

    let repo = RepoRef::parse(source)?;

    match std::fs::metadata(destination) {
        Ok(_) => Err(GrabError::new(ErrorKind::DestinationExists).with_detail(format!(
            "'{destination}' already exists; choose a fresh directory"
        ))),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(repo),
        Err(error) => Err(GrabError::new(ErrorKind::Filesystem)
            .with_detail(format!("could not stat {destination}"))
            .with_detail(error.to_string())),
    }
}
