use std::io::Write;
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;

use crate::classifier::DEFAULT_BOUNDARY_PATTERN;
use crate::engine::{EngineLimits, LogEngine};
use crate::source::LogSource;

/// A temp log file plus a source pointing at it.
pub struct TempLog {
    pub file: NamedTempFile,
    pub source: LogSource,
    base: SystemTime,
    bumps: u64,
}

impl TempLog {
    pub fn new(content: &str) -> Self {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        let source = LogSource::new("test", file.path());
        let base = SystemTime::now();
        file.as_file().set_modified(base).unwrap();
        Self {
            file,
            source,
            base,
            bumps: 0,
        }
    }

    /// Append and move the mtime strictly forward, independent of the
    /// filesystem's timestamp granularity.
    pub fn append(&mut self, content: &str) {
        self.file.write_all(content.as_bytes()).unwrap();
        self.file.flush().unwrap();
        self.bumps += 1;
        self.file
            .as_file()
            .set_modified(self.base + Duration::from_secs(self.bumps))
            .unwrap();
    }

    pub fn len(&self) -> u64 {
        std::fs::metadata(self.file.path()).unwrap().len()
    }
}

pub fn engine() -> LogEngine {
    LogEngine::new(DEFAULT_BOUNDARY_PATTERN, EngineLimits::default()).unwrap()
}

pub fn engine_with(limits: EngineLimits) -> LogEngine {
    LogEngine::new(DEFAULT_BOUNDARY_PATTERN, limits).unwrap()
}
