//! Line classification: record boundaries and keyword filters.
//!
//! Lines are handled as raw bytes so a log with stray non-UTF-8 content
//! never aborts a scan.

use memchr::memmem;
use regex::bytes::Regex;

use crate::error::{LogError, LogResult};

/// Default boundary: a line starting with `2017-07-11 18:07:01`.
pub const DEFAULT_BOUNDARY_PATTERN: &str =
    r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}";

/// Decides whether a line opens a new log record.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    boundary: Regex,
}

impl LineClassifier {
    pub fn new(pattern: &str) -> LogResult<Self> {
        let boundary = Regex::new(pattern).map_err(|e| LogError::Regex(e.to_string()))?;
        Ok(Self { boundary })
    }

    pub fn pattern(&self) -> &str {
        self.boundary.as_str()
    }

    /// True iff the boundary pattern matches starting at the first byte.
    pub fn is_record_start(&self, line: &[u8]) -> bool {
        self.boundary.find(line).is_some_and(|m| m.start() == 0)
    }
}

/// Ordered set of substrings a line must all contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    keywords: Vec<String>,
}

impl FilterSet {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().filter(|k| !k.is_empty()).collect(),
        }
    }

    /// Parse a comma-joined keyword list.
    pub fn parse(joined: &str) -> Self {
        Self::new(tw_protocol::split_keywords(joined))
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches_all(&self, line: &[u8]) -> bool {
        matches_all(line, self)
    }
}

/// True iff every keyword of `filters` occurs in `line`. Vacuously true for
/// an empty set.
pub fn matches_all(line: &[u8], filters: &FilterSet) -> bool {
    filters
        .keywords
        .iter()
        .all(|k| memmem::find(line, k.as_bytes()).is_some())
}

// ── Inclusion fold ────────────────────────────────────────────

/// Per-scan accumulator for the "currently including" rule.
///
/// A matching line is included and opens inclusion. While inclusion is open,
/// non-matching continuation lines are included too. A non-matching record
/// start closes inclusion and is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inclusion {
    including: bool,
}

impl Inclusion {
    pub fn is_including(&self) -> bool {
        self.including
    }

    /// Fold one line into the state. Returns the next state and whether the
    /// line belongs in the output.
    pub fn admit(self, classifier: &LineClassifier, filters: &FilterSet, line: &[u8]) -> (Self, bool) {
        if filters.matches_all(line) {
            (Self { including: true }, true)
        } else if self.including && !classifier.is_record_start(line) {
            (self, true)
        } else {
            (Self { including: false }, false)
        }
    }
}
