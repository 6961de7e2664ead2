//! Shared response types for API handlers.

use serde::Serialize;

/// Result of a bulk slot-generation run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationSummary {
    /// Slots actually inserted by this run.
    pub created: u64,
    /// Candidate boundaries that already existed (or raced with another
    /// run) and were skipped.
    pub skipped: u64,
}
