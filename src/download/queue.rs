// src/download/queue.rs
// =============================================================================
// This module implements the shared work queue the download workers drain.
//
// The queue is seeded once with every file to download and then only ever
// shrinks. pop() is the single mutating operation, and it happens under a
// mutex, so each file is handed to exactly one worker - never two, never
// zero - no matter how the workers interleave.
//
// Rust concepts:
// - Mutex: Only one worker can pop at a time
// - Arc (used by the engine): Lets every worker share the same queue
// =============================================================================

use std::sync::Mutex;

use crate::github::RemoteFile;

// The shared, shrink-only work queue
#[derive(Debug)]
pub struct WorkQueue {
    items: Mutex<Vec<RemoteFile>>,
}

impl WorkQueue {
    /// Seeds the queue with every file to download
    pub fn new(files: Vec<RemoteFile>) -> Self {
        Self {
            items: Mutex::new(files),
        }
    }

    // Removes and returns one item, or None when the queue is empty
    //
    // Pop order is unspecified (this is LIFO via Vec::pop); the contract
    // is only that every item is popped exactly once.
    pub fn pop(&self) -> Option<RemoteFile> {
        self.items
            .lock()
            .expect("work queue lock poisoned")
            .pop()
    }

    /// How many items remain
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .expect("work queue lock poisoned")
            .len()
    }

    /// True when nothing remains
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
