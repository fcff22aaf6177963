// src/github/resolve.rs
// =============================================================================
// This module turns a RepoRef into a concrete revision string.
//
// Strategy, in order:
// 1. An explicit '#revision' fragment wins, unvalidated and with zero
//    network requests
// 2. Otherwise, the latest published release's tag name
// 3. Otherwise, the repository's declared default branch
//
// A 404 at step 2 just falls through to step 3 - repositories without
// releases are common. A 404 at step 3 means the repository itself does
// not exist. Server and network errors abort resolution immediately at
// any step.
// =============================================================================

use serde::Deserialize;

use crate::error::{ErrorKind, GrabError};
use crate::github::transport::{fetch_json, GitHub};
use crate::source::RepoRef;

// Payload of GET /repos/{owner}/{name}/releases/latest
// We only care about the tag; everything else is ignored by serde
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

// Payload of GET /repos/{owner}/{name}
#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

// Resolves the revision to download
//
// Returns the revision string, or:
//   RepoNotFound - the repository does not exist (distinct from a bad
//                  revision, which the tree fetcher reports later)
//   Server/Network errors from either lookup
pub async fn resolve_revision(gh: &GitHub, repo: &RepoRef) -> Result<String, GrabError> {
    // Step 1: explicit revision short-circuits, no validation, no requests
    if let Some(revision) = &repo.revision {
        if !revision.is_empty() {
            return Ok(revision.clone());
        }
    }

    // Step 2: latest published release
    let releases_url = gh.api_url(&format!(
        "/repos/{}/{}/releases/latest",
        repo.owner, repo.name
    ));
    if let Some(release) = fetch_json::<LatestRelease>(gh.http(), &releases_url).await? {
        // A release without a tag name can't pin a tree; fall through
        if let Some(tag) = release.tag_name {
            if !tag.is_empty() {
                return Ok(tag);
            }
        }
    }

    // Step 3: the repository's default branch
    let repo_url = gh.api_url(&format!("/repos/{}/{}", repo.owner, repo.name));
    match fetch_json::<RepoInfo>(gh.http(), &repo_url).await? {
        Some(info) => Ok(info.default_branch),
        None => Err(GrabError::new(ErrorKind::RepoNotFound).with_detail(format!(
            "no repository at github.com/{}",
            repo.repo_slug()
        ))),
    }
}
