//! Incremental tail, paging and keyword locate over growing, multi-line,
//! timestamp-delimited log files.
//!
//! Every read is bounded: forward scans stop at a line limit, backward scans
//! walk fixed-size windows. Callers hold their own [`Cursor`] and positions;
//! the engine keeps no per-client state between calls.

pub mod classifier;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod scanner;
pub mod source;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export key types for convenience
pub use classifier::{FilterSet, Inclusion, LineClassifier, DEFAULT_BOUNDARY_PATTERN};
pub use cursor::{Cursor, resolve_position};
pub use engine::{EngineLimits, LogEngine};
pub use error::{LogError, LogResult};
pub use scanner::{BackwardWindow, ChunkedScanner, ScannedLine, WINDOW_SIZE};
pub use source::{LogSource, SourceRegistry};
pub use tools::locate::LocateResult;
pub use tools::page::PageOutcome;
pub use tools::tail::TailOutcome;
pub use tw_protocol::Direction;
