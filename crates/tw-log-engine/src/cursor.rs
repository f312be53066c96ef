//! Caller-held read positions.

use chrono::{DateTime, Utc};

/// How much of a file has been delivered to one client view.
///
/// The server never stores cursors: every tail response carries the next
/// cursor and the caller sends it back on its next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Byte offset; negative means "this many bytes before the end".
    pub offset: i64,
    /// File modification time observed when `offset` was produced.
    pub mod_time: DateTime<Utc>,
}

impl Cursor {
    pub fn new(offset: i64, mod_time: DateTime<Utc>) -> Self {
        Self { offset, mod_time }
    }

    /// A cursor that has seen nothing yet: any existing file counts as
    /// modified.
    pub fn initial(offset: i64) -> Self {
        Self::from_wire(offset, 0)
    }

    /// Build from the wire form: mtime as nanoseconds since the Unix epoch.
    pub fn from_wire(offset: i64, mod_time_nanos: i64) -> Self {
        Self::new(offset, DateTime::<Utc>::from_timestamp_nanos(mod_time_nanos))
    }

    /// The mtime as nanoseconds since the Unix epoch, saturating outside the
    /// representable range (years 1677..2262).
    pub fn mod_time_nanos(&self) -> i64 {
        self.mod_time.timestamp_nanos_opt().unwrap_or(if self.mod_time.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Effective read start for a file of `size` bytes.
    ///
    /// A negative offset counts back from the end. Anything that still falls
    /// outside `[0, size]` (the file shrank or was rotated) restarts at 0.
    pub fn resolve_offset(&self, size: u64) -> u64 {
        let size = i64::try_from(size).unwrap_or(i64::MAX);
        let offset = if self.offset < 0 {
            size.saturating_add(self.offset)
        } else {
            self.offset
        };
        if (0..=size).contains(&offset) {
            offset as u64
        } else {
            0
        }
    }
}

/// Resolve a page/locate position: negative means end of file, and values
/// past the end are clamped to it.
pub fn resolve_position(position: i64, size: u64) -> u64 {
    match u64::try_from(position) {
        Ok(p) => p.min(size),
        Err(_) => size,
    }
}
