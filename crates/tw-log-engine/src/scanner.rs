//! Chunked scanning of a log file by byte offset.
//!
//! Forward reads yield complete, newline-terminated lines lazily. A trailing
//! line without `\n` is held back: it may still be mid-write. Backward reads
//! work in bounded windows that end at a caller-chosen upper bound, so a
//! reverse walk never holds more than one window in memory.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Take};
use std::path::{Path, PathBuf};

use crate::error::{LogError, LogResult};

/// Default backward window size in bytes.
pub const WINDOW_SIZE: u64 = 6000;

/// One complete line and the byte range it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Line content including the trailing `\n`.
    pub bytes: Vec<u8>,
    /// Offset of the first byte.
    pub start: u64,
    /// Offset one past the `\n`.
    pub end: u64,
}

/// Lazy sequence of complete lines read forward from an offset.
pub struct ForwardLines<'a> {
    reader: BufReader<Take<&'a File>>,
    position: u64,
    done: bool,
}

impl ForwardLines<'_> {
    /// Offset one past the last line yielded so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Iterator for ForwardLines<'_> {
    type Item = io::Result<ScannedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut bytes = Vec::new();
        match self.reader.read_until(b'\n', &mut bytes) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) if bytes.last() != Some(&b'\n') => {
                // Not yet fully written.
                self.done = true;
                None
            }
            Ok(n) => {
                let start = self.position;
                self.position += n as u64;
                Some(Ok(ScannedLine {
                    bytes,
                    start,
                    end: self.position,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Complete lines in `[start, upper_bound)`, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackwardWindow {
    /// First full line start inside the window.
    pub start: u64,
    pub lines: Vec<ScannedLine>,
}

/// An open log file plus the window size used for backward reads.
///
/// The handle is owned for the duration of one request and closed on drop.
pub struct ChunkedScanner {
    path: PathBuf,
    file: File,
    window_size: u64,
}

impl ChunkedScanner {
    pub fn open(path: &Path, window_size: u64) -> LogResult<Self> {
        let file = File::open(path).map_err(|e| LogError::from_io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            window_size: window_size.max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file size, from a fresh stat of the open handle.
    pub fn file_size(&self) -> LogResult<u64> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| LogError::from_stat(&self.path, e))
    }

    /// Read forward from `start` to end of file.
    pub fn read_forward(&self, start: u64) -> LogResult<ForwardLines<'_>> {
        self.read_range(start, u64::MAX)
    }

    /// Read forward from `start`, never past `end`.
    pub fn read_range(&self, start: u64, end: u64) -> LogResult<ForwardLines<'_>> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(start))
            .map_err(|e| LogError::from_io(&self.path, e))?;
        Ok(ForwardLines {
            reader: BufReader::new(file.take(end.saturating_sub(start))),
            position: start,
            done: false,
        })
    }

    /// Read the window of complete lines ending at `upper_bound`.
    ///
    /// The window nominally starts at `upper_bound - window_size`, rounded up
    /// to the next line start. When a single line is longer than the window
    /// the lower edge keeps moving back by `window_size` until a line start
    /// is found, so the returned `start` is always below `upper_bound`
    /// unless `upper_bound` is 0.
    pub fn read_backward_window(&self, upper_bound: u64) -> LogResult<BackwardWindow> {
        if upper_bound == 0 {
            return Ok(BackwardWindow {
                start: 0,
                lines: Vec::new(),
            });
        }

        let mut lower = upper_bound.saturating_sub(self.window_size);
        let start = loop {
            if let Some(start) = self.first_line_start(lower, upper_bound)? {
                break start;
            }
            lower = lower.saturating_sub(self.window_size);
        };

        let lines = self
            .read_range(start, upper_bound)?
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| LogError::from_io(&self.path, e))?;

        tracing::trace!(
            path = %self.path.display(),
            upper_bound,
            start,
            lines = lines.len(),
            "backward window"
        );
        Ok(BackwardWindow { start, lines })
    }

    /// First offset in `[lower, upper)` that begins a line, if any.
    fn first_line_start(&self, lower: u64, upper: u64) -> LogResult<Option<u64>> {
        if lower == 0 {
            return Ok(Some(0));
        }
        // Start one byte early: if that byte is `\n`, `lower` itself is a
        // line start.
        let probe = lower - 1;
        let mut file = &self.file;
        file.seek(SeekFrom::Start(probe))
            .map_err(|e| LogError::from_io(&self.path, e))?;
        let mut reader = BufReader::new(file.take(upper - probe));
        let mut skipped = Vec::new();
        let n = reader
            .read_until(b'\n', &mut skipped)
            .map_err(|e| LogError::from_io(&self.path, e))?;

        if skipped.last() != Some(&b'\n') {
            return Ok(None);
        }
        let start = probe + n as u64;
        Ok((start < upper).then_some(start))
    }
}
