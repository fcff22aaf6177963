// src/github/transport.rs
// =============================================================================
// This module is the single place that talks HTTP.
//
// It does two things:
// - Holds the GitHub handle: one pooled reqwest client plus the API and
//   raw-content base URLs (overridable so tests can point at a mock server)
// - Classifies every response into a ResponseOutcome, so the rest of the
//   pipeline branches on a proper sum type instead of raw status codes
//
// Compression: the 'gzip' feature on reqwest adds the Accept-Encoding
// header for us and decompresses the body stream transparently. A 200
// with a declared zero length is classified separately, because a
// zero-length body cannot be validly gzip-encoded and there is nothing
// to stream.
//
// Rust concepts:
// - Enums with payloads: ResponseOutcome carries the response (or the
//   status) inside the variant, so matches are exhaustive
// - Generic functions: fetch_json works for any Deserialize type
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ErrorKind, GrabError};
use crate::source::RepoRef;

// Fixed identifying user-agent; GitHub rejects anonymous clients
const USER_AGENT: &str = "repo-grab/0.1.0";

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

// One HTTP client plus the two GitHub hosts we talk to
//
// The client is created once and cloned into workers; reqwest clients are
// cheap to clone (internally reference counted) and share a connection pool.
#[derive(Debug, Clone)]
pub struct GitHub {
    http: Client,
    api_base: String,
    raw_base: String,
}

impl GitHub {
    /// Handle pointed at the real GitHub hosts
    pub fn new() -> Result<Self, GrabError> {
        Self::with_bases(DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Handle with custom base URLs (tests point both at a mock server)
    pub fn with_bases(api_base: &str, raw_base: &str) -> Result<Self, GrabError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                GrabError::new(ErrorKind::Network)
                    .with_detail("could not create HTTP client")
                    .with_detail(e.to_string())
            })?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
        })
    }

    /// The shared client, for workers that fetch raw file contents
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Full URL for a GitHub API path like "/repos/owner/name"
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Raw-content URL for one file at one revision
    pub(crate) fn raw_url(&self, repo: &RepoRef, revision: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, repo.owner, repo.name, revision, path
        )
    }
}

// Everything a single GET can turn into
//
// This is the transport layer's only output type; every downstream
// decision branches on these tags.
#[derive(Debug)]
pub enum ResponseOutcome {
    /// 200 with a body; the response exposes a lazy byte stream that can
    /// be consumed exactly once
    Found(reqwest::Response),
    /// 200 with a declared zero-length body; no decompression attempted
    FoundEmpty,
    /// 404 - meaning depends on which endpoint was asked
    NotFound,
    /// Any other status
    ServerError { status: u16, status_text: String },
    /// Connection-level failure (DNS, TCP, TLS)
    NetworkError { message: String },
}

// Issues one GET and classifies the result
//
// Unconsumed bodies are released when the Response is dropped; the pooled
// client takes care of draining the socket so connections can be reused.
pub async fn send(client: &Client, url: &str) -> ResponseOutcome {
    match client.get(url).send().await {
        Err(e) => ResponseOutcome::NetworkError {
            message: e.to_string(),
        },
        Ok(response) => {
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                ResponseOutcome::NotFound
            } else if status.is_success() {
                if response.content_length() == Some(0) {
                    ResponseOutcome::FoundEmpty
                } else {
                    ResponseOutcome::Found(response)
                }
            } else {
                ResponseOutcome::ServerError {
                    status: status.as_u16(),
                    status_text: status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string(),
                }
            }
        }
    }
}

// GET + classify + parse JSON, shared by the resolver and the tree fetcher
//
// Returns:
//   Ok(Some(value)) - found and parsed
//   Ok(None)        - 404; the caller decides what "not found" means here
//   Err(...)        - server error, network error, or unparseable body
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<Option<T>, GrabError> {
    match send(client, url).await {
        ResponseOutcome::NotFound => Ok(None),
        ResponseOutcome::FoundEmpty => {
            Err(GrabError::new(ErrorKind::BadResponse).with_detail(url))
        }
        ResponseOutcome::Found(response) => {
            let body = response.bytes().await.map_err(|e| {
                GrabError::new(ErrorKind::Network)
                    .with_detail(url)
                    .with_detail(e.to_string())
            })?;
            match serde_json::from_slice(&body) {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(GrabError::new(ErrorKind::BadResponse).with_detail(url)),
            }
        }
        ResponseOutcome::ServerError {
            status,
            status_text,
        } => Err(GrabError::new(ErrorKind::Server {
            status,
            status_text,
        })
        .with_detail(url)),
        ResponseOutcome::NetworkError { message } => Err(GrabError::new(ErrorKind::Network)
            .with_detail(url)
            .with_detail(message)),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why classify instead of returning reqwest::Response directly?
//    - A 404 is a normal branch in this tool (fall through to the next
//      resolution strategy), not an exception
//    - An enum forces every caller to handle every outcome; the compiler
//      checks it
//
// 2. What does content_length() == Some(0) mean?
//    - The server declared "Content-Length: 0"
//    - There is no body to stream and nothing to gunzip, so we report
//      FoundEmpty instead of handing out an empty stream
//    - When the transfer is compressed, reqwest reports None (the
//      decoded length isn't known up front), so compressed bodies always
//      land in Found and get streamed
//
// 3. Why DeserializeOwned instead of Deserialize?
//    - The JSON buffer is local to fetch_json and dropped before we
//      return, so the parsed value must own all of its data
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_base_and_path() {
        let gh = GitHub::with_bases("http://127.0.0.1:9999/", "http://127.0.0.1:9999").unwrap();
        assert_eq!(
            gh.api_url("/repos/owner/name"),
            "http://127.0.0.1:9999/repos/owner/name"
        );
    }

    #[test]
    fn test_raw_url_layout() {
        let gh = GitHub::new().unwrap();
        let repo = RepoRef::parse("owner/name").unwrap();
        assert_eq!(
            gh.raw_url(&repo, "v1.0.0", "src/lib.rs"),
            "https://raw.githubusercontent.com/owner/name/v1.0.0/src/lib.rs"
        );
    }
}
