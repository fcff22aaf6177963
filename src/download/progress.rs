// src/download/progress.rs
// =============================================================================
// This module tracks aggregate download progress.
//
// Workers call inc() after each completed file; the presentation layer
// reads completed/total to render a bar. The counter is atomic because
// workers run on multiple runtime threads and may increment concurrently.
// No ordering is promised beyond monotonic increase.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

// Process-wide progress: how many files are done out of how many total
#[derive(Debug)]
pub struct ProgressState {
    completed: AtomicUsize,
    total: usize,
}

impl ProgressState {
    /// Fresh state with nothing completed yet
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
        }
    }

    // Records one completed file and returns the new completed count
    //
    // fetch_add returns the PREVIOUS value, so +1 gives the count that
    // includes this file.
    pub fn inc(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Files completed so far
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Total files this run will download
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_is_monotonic() {
        let progress = ProgressState::new(3);
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.inc(), 1);
        assert_eq!(progress.inc(), 2);
        assert_eq!(progress.inc(), 3);
        assert_eq!(progress.completed(), progress.total());
    }

    #[test]
    fn test_concurrent_increments_all_land() {
        let progress = std::sync::Arc::new(ProgressState::new(60));
        let mut handles = Vec::new();
        for _ in 0..6 {
            let progress = std::sync::Arc::clone(&progress);
            handles.push(std::thread::spawn(move || {
                for _ in 0..10 {
                    progress.inc();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.completed(), 60);
    }
}
