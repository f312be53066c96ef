//! locate: find the nearest line matching a keyword set, walking forward
//! or backward from an offset.

use tw_protocol::Direction;

use crate::classifier::FilterSet;
use crate::cursor::resolve_position;
use crate::engine::LogEngine;
use crate::error::{LogError, LogResult};
use crate::source::LogSource;

/// Outcome of a locate. `record_start_offset` is only meaningful when
/// `found` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateResult {
    pub found: bool,
    pub record_start_offset: u64,
}

impl LocateResult {
    pub fn found(offset: u64) -> Self {
        Self {
            found: true,
            record_start_offset: offset,
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            record_start_offset: 0,
        }
    }

    pub fn offset(&self) -> Option<u64> {
        self.found.then_some(self.record_start_offset)
    }
}

impl LogEngine {
    /// Locate the line nearest to `from` that contains every keyword.
    ///
    /// `from` is a byte offset; negative means end of file, and values past
    /// the end are clamped. Forward, the line starting at `from` is a
    /// candidate. Backward, only lines ending at or before `from` are.
    pub fn locate(
        &self,
        source: &LogSource,
        from: i64,
        direction: Direction,
        keywords: &FilterSet,
    ) -> LogResult<LocateResult> {
        let scanner = self.open(source)?;
        let from = resolve_position(from, scanner.file_size()?);

        let result = match direction {
            Direction::Down => {
                let mut found = LocateResult::not_found();
                for line in scanner.read_forward(from)? {
                    let line = line.map_err(|e| LogError::from_io(scanner.path(), e))?;
                    if keywords.matches_all(&line.bytes) {
                        found = LocateResult::found(line.start);
                        break;
                    }
                }
                found
            }
            Direction::Up => {
                let mut upper = from;
                let mut windows = 0usize;
                loop {
                    let window = scanner.read_backward_window(upper)?;
                    windows += 1;
                    // The match nearest to `from` is the last one in the window.
                    if let Some(line) = window
                        .lines
                        .iter()
                        .rev()
                        .find(|l| keywords.matches_all(&l.bytes))
                    {
                        break LocateResult::found(line.start);
                    }
                    if window.start == 0 {
                        tracing::trace!(windows, "backward locate reached file start");
                        break LocateResult::not_found();
                    }
                    upper = window.start;
                }
            }
        };

        tracing::debug!(
            log = %source.name(),
            from,
            %direction,
            found = result.found,
            offset = result.record_start_offset,
            "locate"
        );
        Ok(result)
    }
}
