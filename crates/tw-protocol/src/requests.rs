//! Request shapes for the tail and locate endpoints.
//!
//! Fields arrive as raw strings (form body or query string) and are decoded
//! through the accessor methods so malformed input is rejected with a
//! field-specific [`ProtocolError`] before any file is touched.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::hex::{parse_decimal, parse_hex};

/// Direction of a page or locate walk through a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the start of the file.
    Up,
    /// Toward the end of the file.
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "" => Err(ProtocolError::Missing { field: "direction" }),
            other => Err(ProtocolError::invalid("direction", "`up` or `down`", other)),
        }
    }
}

/// Split a comma-joined keyword list, trimming items and dropping empties.
pub fn split_keywords(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ── Tail ──────────────────────────────────────────────────────

/// Incremental tail poll.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailRequest {
    pub log_name: String,
    #[serde(default)]
    pub filter_keywords: String,
    /// Cursor mtime as hex nanoseconds since the Unix epoch.
    #[serde(default)]
    pub last_modification: String,
    /// Cursor offset as signed hex; negative means "bytes before end".
    #[serde(default)]
    pub seek_position: String,
}

impl TailRequest {
    pub fn last_modification_nanos(&self) -> Result<i64, ProtocolError> {
        parse_hex("lastModification", &self.last_modification)
    }

    pub fn seek_position(&self) -> Result<i64, ProtocolError> {
        parse_hex("seekPosition", &self.seek_position)
    }

    pub fn filters(&self) -> Vec<String> {
        split_keywords(&self.filter_keywords)
    }
}

// ── Locate / page ─────────────────────────────────────────────

/// Shared request shape for paging (`pagingLog=yes`) and keyword locate
/// (`pagingLog=no`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateRequest {
    pub log_name: String,
    #[serde(default)]
    pub filter_keywords: String,
    #[serde(default)]
    pub locate_keywords: String,
    /// Decimal offset; negative means end of file.
    #[serde(default)]
    pub start_position: String,
    /// Decimal offset; negative means end of file.
    #[serde(default)]
    pub end_position: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub paging_log: String,
}

impl LocateRequest {
    pub fn direction(&self) -> Result<Direction, ProtocolError> {
        self.direction.parse()
    }

    pub fn start_position(&self) -> Result<i64, ProtocolError> {
        parse_decimal("startPosition", &self.start_position)
    }

    pub fn end_position(&self) -> Result<i64, ProtocolError> {
        parse_decimal("endPosition", &self.end_position)
    }

    /// `true` for a plain page request, `false` for a keyword locate.
    pub fn is_paging(&self) -> Result<bool, ProtocolError> {
        match self.paging_log.trim() {
            "yes" => Ok(true),
            "no" | "" => Ok(false),
            other => Err(ProtocolError::invalid("pagingLog", "`yes` or `no`", other)),
        }
    }

    pub fn filters(&self) -> Vec<String> {
        split_keywords(&self.filter_keywords)
    }

    pub fn locates(&self) -> Vec<String> {
        split_keywords(&self.locate_keywords)
    }
}
