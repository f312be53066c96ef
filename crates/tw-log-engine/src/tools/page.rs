//! page: bounded chunks of display lines for browsing up or down.

use tw_protocol::Direction;

use crate::classifier::FilterSet;
use crate::cursor::resolve_position;
use crate::engine::LogEngine;
use crate::error::{LogError, LogResult};
use crate::scanner::{ChunkedScanner, ScannedLine};
use crate::source::LogSource;

/// One page of content and the boundary for the next page in the same
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub content: Vec<u8>,
    /// Down: one past the last consumed byte. Up: the start of the earliest
    /// consumed byte range.
    pub offset: u64,
    pub lines: usize,
}

impl LogEngine {
    /// Read up to `max_lines` included lines next to `from`.
    ///
    /// `from` follows the locate convention: negative means end of file.
    /// The returned offset is an exact exclusive boundary, so successive
    /// pages never overlap and never skip bytes.
    pub fn page(
        &self,
        source: &LogSource,
        from: i64,
        direction: Direction,
        max_lines: usize,
        filters: &FilterSet,
    ) -> LogResult<PageOutcome> {
        let scanner = self.open(source)?;
        let from = resolve_position(from, scanner.file_size()?);

        let outcome = match direction {
            Direction::Down => {
                let collected = self.collect_forward(
                    from,
                    scanner.read_forward(from)?,
                    filters,
                    max_lines,
                    false,
                )?;
                PageOutcome {
                    content: collected.content,
                    offset: collected.offset,
                    lines: collected.lines,
                }
            }
            Direction::Up => self.page_up(&scanner, from, max_lines, filters)?,
        };

        tracing::debug!(
            log = %source.name(),
            from,
            %direction,
            offset = outcome.offset,
            lines = outcome.lines,
            "page"
        );
        Ok(outcome)
    }
}

impl LogEngine {
    /// Walk backward windows from `from`, keeping the included lines nearest
    /// to it.
    ///
    /// Each window is folded on its own. Its leading continuation lines are
    /// held back until the window above shows whether they close an included
    /// record.
    fn page_up(
        &self,
        scanner: &ChunkedScanner,
        from: u64,
        max_lines: usize,
        filters: &FilterSet,
    ) -> LogResult<PageOutcome> {
        // Chunks nearest to `from` first; reversed when assembled.
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let mut remaining = max_lines;
        let mut upper = from;
        let mut boundary = None;
        // Contiguous, in file order, ending where the last kept text begins.
        let mut held: Vec<ScannedLine> = Vec::new();

        while remaining > 0 && upper > 0 && boundary.is_none() {
            let window = match scanner.read_backward_window(upper) {
                Ok(window) => window,
                Err(LogError::Io(message)) => {
                    return Err(LogError::Interrupted {
                        offset: held.last().map_or(upper, |l| l.end),
                        partial: assemble(chunks),
                        message,
                    });
                }
                Err(e) => return Err(e),
            };
            upper = window.start;

            let fold = self.fold_window(&window.lines, filters);
            let Some(ends_including) = fold.ends_including else {
                // No record boundary here: these lines share the fate of
                // the held ones.
                let mut run = window.lines.clone();
                run.append(&mut held);
                held = run;
                continue;
            };

            if ends_including && !held.is_empty() {
                let run: Vec<&ScannedLine> = held.iter().collect();
                boundary = take_nearest(&run, &mut remaining, &mut chunks);
                if boundary.is_some() {
                    break;
                }
            }
            held = fold.carried.into_iter().cloned().collect();
            boundary = take_nearest(&fold.included, &mut remaining, &mut chunks);
        }

        // Lines still held at a boundary lie before it and are decided by the
        // next page. At file start nothing is above them, so they are dropped.
        Ok(PageOutcome {
            content: assemble(chunks),
            offset: boundary.unwrap_or(upper),
            lines: max_lines - remaining,
        })
    }
}

/// Push up to `remaining` lines from the end of `lines`. Returns the start of
/// the earliest kept line once the limit is reached.
fn take_nearest(
    lines: &[&ScannedLine],
    remaining: &mut usize,
    chunks: &mut Vec<Vec<u8>>,
) -> Option<u64> {
    let kept = &lines[lines.len().saturating_sub(*remaining)..];
    *remaining -= kept.len();
    chunks.push(kept.iter().flat_map(|l| l.bytes.iter().copied()).collect());
    if *remaining == 0 {
        kept.first().map(|l| l.start)
    } else {
        None
    }
}

fn assemble(chunks: Vec<Vec<u8>>) -> Vec<u8> {
    chunks.into_iter().rev().flatten().collect()
}
