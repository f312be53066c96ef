//! Response header names carrying caller-held position state.
//!
//! ```text
//! Last-Modification  tail cursor mtime, hex nanoseconds since the Unix epoch
//! Seek-Position      tail cursor offset, signed hex
//! Start-Position     page/locate window start, decimal
//! End-Position       page/locate window end, decimal
//! Locate-Found       "true" | "false" on locate responses
//! ```

pub const LAST_MODIFICATION: &str = "last-modification";
pub const SEEK_POSITION: &str = "seek-position";
pub const START_POSITION: &str = "start-position";
pub const END_POSITION: &str = "end-position";
pub const LOCATE_FOUND: &str = "locate-found";

/// Body sent when a locate request finds no matching line.
pub const NOT_FOUND_BODY: &str = "not found";
