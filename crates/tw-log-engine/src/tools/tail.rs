//! tail: deliver only what was appended since the caller's cursor.

use chrono::{DateTime, Utc};

use crate::classifier::FilterSet;
use crate::cursor::Cursor;
use crate::engine::LogEngine;
use crate::error::{LogError, LogResult};
use crate::source::LogSource;

/// Result of one tail poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailOutcome {
    /// Included lines, byte for byte.
    pub content: Vec<u8>,
    /// Cursor to send back on the next poll.
    pub cursor: Cursor,
    /// File size observed by this call's stat.
    pub file_size: u64,
    /// Number of included lines.
    pub lines: usize,
}

impl LogEngine {
    /// Read what changed since `cursor`, keeping lines that pass `filters`
    /// together with the continuation lines of their records.
    ///
    /// A file whose mtime is not after `cursor.mod_time` is not read at all.
    /// With `initial_load` and a non-zero start, the first line is dropped
    /// because the read may have started inside it.
    pub fn tail(
        &self,
        source: &LogSource,
        cursor: Cursor,
        filters: &FilterSet,
        initial_load: bool,
    ) -> LogResult<TailOutcome> {
        let path = source.path();
        let meta = std::fs::metadata(path).map_err(|e| LogError::from_stat(path, e))?;
        let file_size = meta.len();
        let modified: DateTime<Utc> = meta
            .modified()
            .map_err(|e| LogError::from_stat(path, e))?
            .into();

        if modified <= cursor.mod_time {
            tracing::trace!(log = %source.name(), file_size, "unchanged since cursor");
            return Ok(TailOutcome {
                content: Vec::new(),
                cursor,
                file_size,
                lines: 0,
            });
        }

        let start = cursor.resolve_offset(file_size);
        let scanner = self.open(source)?;
        let collected = self.collect_forward(
            start,
            scanner.read_forward(start)?,
            filters,
            self.limits().tail_max_lines,
            initial_load && start > 0,
        )?;

        tracing::debug!(
            log = %source.name(),
            start,
            offset = collected.offset,
            lines = collected.lines,
            exhausted = collected.exhausted,
            "tail"
        );

        Ok(TailOutcome {
            content: collected.content,
            cursor: Cursor::new(
                i64::try_from(collected.offset).unwrap_or(i64::MAX),
                modified,
            ),
            file_size,
            lines: collected.lines,
        })
    }
}
