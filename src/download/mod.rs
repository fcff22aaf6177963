// src/download/mod.rs
// =============================================================================
// This module is the concurrent download engine.
//
// Submodules:
// - queue: shared work queue with exactly-once pop semantics
// - progress: atomic completed/total counter
// - engine: the fixed-size worker pool that drains the queue to disk
// =============================================================================

mod engine;
mod progress;
mod queue;

// Re-export the public API
pub use engine::download_all;
pub use progress::ProgressState;
pub use queue::WorkQueue;
