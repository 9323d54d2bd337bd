use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Terminal state of one ingest invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Disallowed object removed.
    Deleted,
    /// Disallowed object was already gone.
    AlreadyAbsent,
    /// Removal failed; logged and swallowed.
    DeleteFailed,
    /// A description already exists for this file name.
    Skipped,
    /// New description written.
    Stored,
    /// Another invocation stored the description first.
    Conflict,
    /// Write failed; logged and swallowed.
    StoreFailed,
}

impl Display for IngestOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            IngestOutcome::Deleted => "deleted",
            IngestOutcome::AlreadyAbsent => "already_absent",
            IngestOutcome::DeleteFailed => "delete_failed",
            IngestOutcome::Skipped => "skipped",
            IngestOutcome::Stored => "stored",
            IngestOutcome::Conflict => "conflict",
            IngestOutcome::StoreFailed => "store_failed",
        };
        f.write_str(s)
    }
}
