//! Log sources: the named files the engine is allowed to read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// A named log file. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSource {
    name: String,
    path: PathBuf,
}

impl LogSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the compact `name:path,name2:path2` list form.
    ///
    /// An item without a name (`/var/log/app.log`) is named after its file
    /// stem. A prefix containing a path separator is treated as part of the
    /// path, so `./logs/a:b.log` stays a bare path.
    pub fn parse_list(list: &str) -> LogResult<Vec<LogSource>> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Self::parse_item)
            .collect()
    }

    fn parse_item(item: &str) -> LogResult<LogSource> {
        if let Some((name, path)) = item.split_once(':')
            && !name.is_empty()
            && !name.contains(['/', '\\'])
            && !path.is_empty()
        {
            return Ok(LogSource::new(name.trim(), path.trim()));
        }

        let path = PathBuf::from(item);
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LogError::Malformed(format!("cannot name log source '{item}'")))?
            .to_string();
        Ok(LogSource { name, path })
    }
}

/// The ordered, immutable set of configured log sources.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<LogSource>,
}

impl SourceRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(sources: Vec<LogSource>) -> LogResult<Self> {
        for (i, source) in sources.iter().enumerate() {
            if sources[..i].iter().any(|s| s.name == source.name) {
                return Err(LogError::Malformed(format!(
                    "duplicate log name '{}'",
                    source.name
                )));
            }
        }
        Ok(Self { sources })
    }

    /// Look up a source by name.
    pub fn find(&self, name: &str) -> LogResult<&LogSource> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| LogError::NotFound(format!("log '{name}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
