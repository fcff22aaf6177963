// src/github/tree.rs
// =============================================================================
// This module lists the files of a repository at a revision, and narrows
// the listing to a requested sub-path.
//
// Listing uses the recursive git-trees endpoint, which returns the whole
// tree in one response together with a 'truncated' flag. A truncated
// listing is always fatal: downloading a silently partial tree would be
// worse than failing.
//
// Check order is deliberate:
//   truncated  -> "repository too large"
//   zero files -> "repository is empty"
//   filtering  -> "repository path not found" (only after the two above)
//
// Rust concepts:
// - serde field renaming: the API field is 'type', a Rust keyword
// - into_iter + filter_map: consume the listing and rebuild only the
//   entries we keep, rewriting their paths along the way
// =============================================================================

use serde::Deserialize;

use crate::error::{ErrorKind, GrabError};
use crate::github::transport::{fetch_json, GitHub};
use crate::source::RepoRef;

// One downloadable file: where it lives in the tree and where to get it
//
// The path starts repository-relative; the sub-path filter rewrites it to
// be destination-relative. The URL is never touched after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Relative path the file will be written to under the destination
    pub path: String,
    /// Raw-content URL the bytes are fetched from
    pub url: String,
}

// Payload of GET /repos/{owner}/{name}/git/trees/{revision}?recursive=1
#[derive(Debug, Deserialize)]
struct TreeResponse {
    truncated: bool,
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    // 'type' is a Rust keyword, so rename the field
    #[serde(rename = "type")]
    entry_type: String,
}

// Fetches the recursive file listing for a repository at a revision
//
// Returns one RemoteFile per blob entry, or:
//   RevisionNotFound - the (repo, revision) pair is invalid
//   TooLarge         - the API truncated the listing
//   EmptyRepo        - the listing holds no files at all
//   BadResponse / Server / Network from the transport layer
pub async fn list_files(
    gh: &GitHub,
    repo: &RepoRef,
    revision: &str,
) -> Result<Vec<RemoteFile>, GrabError> {
    let url = gh.api_url(&format!(
        "/repos/{}/{}/git/trees/{}?recursive=1",
        repo.owner, repo.name, revision
    ));

    let listing: TreeResponse = fetch_json(gh.http(), &url).await?.ok_or_else(|| {
        GrabError::new(ErrorKind::RevisionNotFound).with_detail(format!(
            "no branch, tag, or commit '{}' in {}",
            revision,
            repo.repo_slug()
        ))
    })?;

    // A truncated listing is incomplete and unsafe to download
    if listing.truncated {
        return Err(GrabError::new(ErrorKind::TooLarge).with_detail(format!(
            "the listing for {} at '{}' exceeds the API's size limit",
            repo.repo_slug(),
            revision
        )));
    }

    // Keep blobs only; trees are recreated implicitly from file paths,
    // and submodules have no raw contents to fetch
    let files: Vec<RemoteFile> = listing
        .tree
        .into_iter()
        .filter(|entry| entry.entry_type == "blob")
        .map(|entry| RemoteFile {
            url: gh.raw_url(repo, revision, &entry.path),
            path: entry.path,
        })
        .collect();

    // This fires before any sub-path filtering, so an empty repository is
    // reported as such and never as a missing sub-path
    if files.is_empty() {
        return Err(GrabError::new(ErrorKind::EmptyRepo).with_detail(format!(
            "{} has no files at '{}'",
            repo.repo_slug(),
            revision
        )));
    }

    Ok(files)
}

// Narrows a listing to entries under a sub-path and rebases their paths
//
// An empty sub_path passes the listing through untouched. Otherwise only
// entries whose path starts with "sub_path/" survive, with that prefix
// stripped. Matching is whole-segment: "b/b" keeps "b/b/a.ext" but not
// "b/bb/a.ext".
pub fn filter_sub_path(
    files: Vec<RemoteFile>,
    sub_path: &str,
) -> Result<Vec<RemoteFile>, GrabError> {
    if sub_path.is_empty() {
        return Ok(files);
    }

    let prefix = format!("{}/", sub_path.trim_end_matches('/'));

    let kept: Vec<RemoteFile> = files
        .into_iter()
        .filter_map(|file| {
            file.path.strip_prefix(&prefix).map(|relative| RemoteFile {
                path: relative.to_string(),
                url: file.url.clone(),
            })
        })
        .collect();

    if kept.is_empty() {
        return Err(GrabError::new(ErrorKind::PathNotFound)
            .with_detail(format!("no files under '{sub_path}'")));
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds the tree from the filtering examples in the docs:
    // a.ext, b/a.ext, b/b/a.ext, b/b/b.ext
    fn sample_tree() -> Vec<RemoteFile> {
        ["a.ext", "b/a.ext", "b/b/a.ext", "b/b/b.ext"]
            .iter()
            .map(|path| RemoteFile {
                path: path.to_string(),
                url: format!("https://example.invalid/raw/{path}"),
            })
            .collect()
    }

    #[test]
    fn test_empty_sub_path_passes_through() {
        let files = filter_sub_path(sample_tree(), "").unwrap();
        assert_eq!(files, sample_tree());
    }

    #[test]
    fn test_filter_keeps_exactly_the_prefixed_entries() {
        let files = filter_sub_path(sample_tree(), "b/b").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.ext", "b.ext"]);
    }

    #[test]
    fn test_filter_rewrites_paths_but_not_urls() {
        let files = filter_sub_path(sample_tree(), "b/b").unwrap();
        assert_eq!(files[0].path, "a.ext");
        assert_eq!(files[0].url, "https://example.invalid/raw/b/b/a.ext");
    }

    #[test]
    fn test_filtering_in_two_steps_equals_one_step() {
        // Filtering by "b" then by "b" again equals filtering by "b/b"
        let once = filter_sub_path(sample_tree(), "b").unwrap();
        let twice = filter_sub_path(once, "b").unwrap();
        let direct = filter_sub_path(sample_tree(), "b/b").unwrap();
        assert_eq!(twice, direct);
    }

    #[test]
    fn test_filter_matches_whole_segments_only() {
        let mut files = sample_tree();
        files.push(RemoteFile {
            path: "b/bb/c.ext".to_string(),
            url: "https://example.invalid/raw/b/bb/c.ext".to_string(),
        });
        let kept = filter_sub_path(files, "b/b").unwrap();
        let paths: Vec<&str> = kept.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.ext", "b.ext"]);
    }

    #[test]
    fn test_unmatched_sub_path_is_path_not_found() {
        let error = filter_sub_path(sample_tree(), "does/not/exist").unwrap_err();
        assert_eq!(error.kind, ErrorKind::PathNotFound);
    }

    #[test]
    fn test_trailing_slash_on_sub_path_is_tolerated() {
        let files = filter_sub_path(sample_tree(), "b/b/").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.ext", "b.ext"]);
    }
}
