//! The log engine: boundary classifier plus request limits, shared
//! read-only by every request.

use serde::{Deserialize, Serialize};

use crate::classifier::LineClassifier;
use crate::error::LogResult;
use crate::scanner::{ChunkedScanner, WINDOW_SIZE};
use crate::source::LogSource;

/// Upper bounds applied to every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLimits {
    /// Maximum included lines per tail response.
    #[serde(default = "default_tail_max_lines")]
    pub tail_max_lines: usize,
    /// Maximum included lines per page or locate response.
    #[serde(default = "default_locate_max_lines")]
    pub locate_max_lines: usize,
    /// Backward window size in bytes.
    #[serde(default = "default_window_size")]
    pub window_size: u64,
}

fn default_tail_max_lines() -> usize {
    1000
}

fn default_locate_max_lines() -> usize {
    500
}

fn default_window_size() -> u64 {
    WINDOW_SIZE
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            tail_max_lines: default_tail_max_lines(),
            locate_max_lines: default_locate_max_lines(),
            window_size: default_window_size(),
        }
    }
}

/// Stateless tail/page/locate engine.
///
/// Holds only process-wide configuration; every operation opens its own file
/// handle, so one engine can serve concurrent requests from many threads.
#[derive(Debug, Clone)]
pub struct LogEngine {
    classifier: LineClassifier,
    limits: EngineLimits,
}

impl LogEngine {
    pub fn new(boundary_pattern: &str, limits: EngineLimits) -> LogResult<Self> {
        Ok(Self {
            classifier: LineClassifier::new(boundary_pattern)?,
            limits,
        })
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    pub(crate) fn open(&self, source: &LogSource) -> LogResult<ChunkedScanner> {
        ChunkedScanner::open(source.path(), self.limits.window_size)
    }
}
