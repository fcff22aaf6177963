// src/download/engine.rs
// =============================================================================
// This module is the concurrent download engine.
//
// How it works:
// 1. Seed the shared WorkQueue with every filtered file
// 2. Spawn a fixed number of worker tasks (default 6)
// 3. Each worker loops: pop one file, download it, report progress
// 4. A worker that finds the queue empty terminates
// 5. The first error flips a shared failure flag and wins; idle workers
//    stop pulling new items, and every task handle is awaited before the
//    engine returns, so no work dangles after the reported error
//
// Failure semantics: no retry at any level, no partial-file cleanup, no
// rollback of files already written. A file that fails mid-write may be
// left truncated; the run as a whole reports the error.
//
// Rust concepts:
// - Arc: Shares the queue, progress state, and failure flag across tasks
// - tokio::spawn: Each worker is a lightweight async task, not a thread
// - Streams: Response bodies are written to disk chunk by chunk
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::download::progress::ProgressState;
use crate::download::queue::WorkQueue;
use crate::error::{ErrorKind, GrabError};
use crate::github::{send, GitHub, RemoteFile, ResponseOutcome};

// Downloads every file into dest_root, calling on_progress(completed,
// total) after each one. Fatal on the first unrecoverable error.
pub async fn download_all<F>(
    gh: &GitHub,
    files: Vec<RemoteFile>,
    dest_root: &Path,
    workers: usize,
    on_progress: F,
) -> Result<(), GrabError>
where
    F: Fn(usize, usize) + Send + Sync + 'static,
{
    let total = files.len();
    let queue = Arc::new(WorkQueue::new(files));
    let progress = Arc::new(ProgressState::new(total));
    let failed = Arc::new(AtomicBool::new(false));
    let on_progress = Arc::new(on_progress);

    // Never spawn more workers than there are files, and at least one
    let worker_count = workers.max(1).min(total.max(1));

    let mut handles = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let queue = Arc::clone(&queue);
        let progress = Arc::clone(&progress);
        let failed = Arc::clone(&failed);
        let on_progress = Arc::clone(&on_progress);
        // Clone the client for each task; it's cheap to clone (reference
        // counted) and all clones share one connection pool
        let client = gh.http().clone();
        let dest_root: PathBuf = dest_root.to_path_buf();

        handles.push(tokio::spawn(async move {
            loop {
                // Another worker already failed; stop pulling new items
                if failed.load(Ordering::SeqCst) {
                    return Ok(());
                }

                // Pop is the exactly-once handoff point
                let Some(file) = queue.pop() else {
                    return Ok(());
                };

                match download_file(&client, &file, &dest_root).await {
                    Ok(()) => {
                        let done = progress.inc();
                        on_progress(done, progress.total());
                    }
                    Err(error) => {
                        failed.store(true, Ordering::SeqCst);
                        return Err(error);
                    }
                }
            }
        }));
    }

    // Await every worker; in-flight items finish or fail on their own,
    // then the first error (if any) is reported
    let mut first_error: Option<GrabError> = None;
    for result in join_all(handles).await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
            Err(join_error) => {
                if first_error.is_none() {
                    first_error = Some(
                        GrabError::new(ErrorKind::Filesystem)
                            .with_detail("a download worker terminated unexpectedly")
                            .with_detail(join_error.to_string()),
                    );
                }
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

// Downloads a single file: ensure parent directories, fetch, stream to disk
async fn download_file(
    client: &Client,
    file: &RemoteFile,
    dest_root: &Path,
) -> Result<(), GrabError> {
    let target = dest_root.join(&file.path);

    // Intermediate directories are created on demand. Workers writing
    // sibling files race on shared parents; create_dir_all treats an
    // already-existing directory as success, and we additionally tolerate
    // an AlreadyExists surfaced by the race itself. Any other failure
    // (permissions, disk full) is fatal.
    if let Some(parent) = target.parent() {
        match tokio::fs::create_dir_all(parent).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(GrabError::new(ErrorKind::Filesystem)
                    .with_detail(format!("could not create {}", parent.display()))
                    .with_detail(e.to_string()));
            }
        }
    }

    match send(client, &file.url).await {
        // The tree listing promised this file exists, so a 404 here means
        // the remote is inconsistent - fatal, not skippable
        ResponseOutcome::NotFound => Err(GrabError::new(ErrorKind::Server {
            status: 404,
            status_text: "Not Found".to_string(),
        })
        .with_detail(file.url.clone())
        .with_detail("the tree listing referenced this file but it was not found")),

        ResponseOutcome::ServerError {
            status,
            status_text,
        } => Err(GrabError::new(ErrorKind::Server {
            status,
            status_text,
        })
        .with_detail(file.url.clone())),

        ResponseOutcome::NetworkError { message } => Err(GrabError::new(ErrorKind::Network)
            .with_detail(file.url.clone())
            .with_detail(message)),

        // A declared zero-length body becomes a zero-length file
        ResponseOutcome::FoundEmpty => {
            tokio::fs::File::create(&target)
                .await
                .map_err(|e| write_error(&target, e))?;
            Ok(())
        }

        // Stream the (transparently decompressed) body straight to disk;
        // completion only when the stream signals end
        ResponseOutcome::Found(response) => {
            let mut output = tokio::fs::File::create(&target)
                .await
                .map_err(|e| write_error(&target, e))?;

            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let chunk = chunk.map_err(|e| {
                    GrabError::new(ErrorKind::Network)
                        .with_detail(file.url.clone())
                        .with_detail(e.to_string())
                })?;
                output
                    .write_all(&chunk)
                    .await
                    .map_err(|e| write_error(&target, e))?;
            }

            output.flush().await.map_err(|e| write_error(&target, e))?;
            Ok(())
        }
    }
}

fn write_error(target: &Path, error: std::io::Error) -> GrabError {
    GrabError::new(ErrorKind::Filesystem)
        .with_detail(format!("could not write {}", target.display()))
        .with_detail(error.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a shared queue instead of handing each worker a slice?
//    - Files vary wildly in size; a fixed split would leave some workers
//      idle while one grinds through the big files
//    - Work stealing falls out for free: whoever finishes first pops next
//
// 2. Why Arc everywhere?
//    - tokio::spawn requires 'static tasks: they may outlive the caller's
//      stack frame, so they can't borrow from it
//    - Arc (atomic reference counting) gives each task shared ownership
//
// 3. Why await ALL handles instead of returning on the first error?
//    - Returning early would leave tasks running detached ("dangling")
//    - The failure flag makes the wind-down quick: idle workers see it
//      and exit before popping another item
//
// 4. Why no cleanup of a half-written file?
//    - The whole destination directory is fresh (we refuse to run into an
//      existing one), so a failed run leaves nothing worth salvaging and
//      the user can simply delete the directory
// -----------------------------------------------------------------------------
