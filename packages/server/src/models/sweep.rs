use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one orphan sweep.
#[derive(Serialize, ToSchema, Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub buckets_scanned: u32,
    pub objects_scanned: u64,
    /// Unreferenced objects past the grace period that were removed.
    pub removed: u64,
    /// Removals that failed; retried on the next run.
    pub failed: u64,
    /// Unreferenced objects still inside the grace period.
    pub skipped_recent: u64,
}
