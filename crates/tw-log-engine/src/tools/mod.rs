//! Engine operations: incremental tail, bidirectional locate, paging.
//!
//! Each operation is an `impl LogEngine` block in its own module; the
//! helpers here run the inclusion fold shared by tail and paging.

pub mod locate;
pub mod page;
pub mod tail;

use std::io;

use crate::classifier::{FilterSet, Inclusion};
use crate::engine::LogEngine;
use crate::error::{LogError, LogResult};
use crate::scanner::ScannedLine;

/// Output of one forward fold.
#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub content: Vec<u8>,
    /// One past the last consumed line.
    pub offset: u64,
    /// Included line count.
    pub lines: usize,
    /// The scan reached end of data rather than the line limit.
    pub exhausted: bool,
}

impl LogEngine {
    /// Fold forward lines through the inclusion rule until `max_lines`
    /// lines are included or the data ends.
    ///
    /// `lines` must start at `start`. With `skip_first` the first line is
    /// consumed but never emitted.
    pub(crate) fn collect_forward(
        &self,
        start: u64,
        lines: impl IntoIterator<Item = io::Result<ScannedLine>>,
        filters: &FilterSet,
        max_lines: usize,
        skip_first: bool,
    ) -> LogResult<Collected> {
        let mut lines = lines.into_iter();
        let mut out = Collected {
            offset: start,
            ..Collected::default()
        };
        let mut state = Inclusion::default();
        let mut skip = skip_first;

        while out.lines < max_lines {
            let line = match lines.next() {
                None => {
                    out.exhausted = true;
                    break;
                }
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    return Err(LogError::Interrupted {
                        offset: out.offset,
                        partial: out.content,
                        message: e.to_string(),
                    });
                }
            };
            out.offset = line.end;

            if skip {
                // A read that starts mid-file cannot tell whether its first
                // line is whole.
                skip = false;
                continue;
            }

            let (next, include) = state.admit(self.classifier(), filters, &line.bytes);
            state = next;
            if include {
                out.content.extend_from_slice(&line.bytes);
                out.lines += 1;
            }
        }
        Ok(out)
    }

    /// Fold one backward window from a fresh state at the window start.
    pub(crate) fn fold_window<'a>(
        &self,
        lines: &'a [ScannedLine],
        filters: &FilterSet,
    ) -> WindowFold<'a> {
        let mut fold = WindowFold::default();
        let mut state = Inclusion::default();
        let mut settled = false;

        for line in lines {
            let (next, include) = state.admit(self.classifier(), filters, &line.bytes);
            state = next;
            if !settled && !include && !self.classifier().is_record_start(&line.bytes) {
                fold.carried.push(line);
            } else {
                settled = true;
            }
            if include {
                fold.included.push(line);
            }
        }
        fold.ends_including = settled.then_some(state.is_including());
        fold
    }
}

/// One backward window folded on its own.
#[derive(Debug, Default)]
pub(crate) struct WindowFold<'a> {
    pub included: Vec<&'a ScannedLine>,
    /// Leading continuation lines dropped only because no record head was
    /// seen yet. They belong to the output when the text above the window
    /// ends inside an included record.
    pub carried: Vec<&'a ScannedLine>,
    /// Inclusion state at the window end. `None` when the window has no
    /// record start and no match, so the state above it decides.
    pub ends_including: Option<bool>,
}
