//! Server configuration, loadable from TOML with environment overrides.

use anyhow::{Context, bail};
use serde::Deserialize;
use tw_log_engine::{DEFAULT_BOUNDARY_PATTERN, EngineLimits, LineClassifier, LogSource, SourceRegistry};

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix for every route (e.g., "/et"). Empty serves from the root.
    #[serde(default)]
    pub context_path: String,
    /// Log files to serve, in display order.
    #[serde(default)]
    pub logs: Vec<LogSource>,
    /// Regex whose match at the start of a line opens a new record.
    #[serde(default = "default_line_regex")]
    pub line_regex: String,
    #[serde(default = "default_tail_max_lines")]
    pub tail_max_lines: usize,
    #[serde(default = "default_locate_max_lines")]
    pub locate_max_lines: usize,
    /// Backward scan window in bytes.
    #[serde(default = "default_window_size")]
    pub window_size: u64,
    /// How far back from the end the initial view of each log starts.
    #[serde(default = "default_initial_tail_bytes")]
    pub initial_tail_bytes: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8497
}

fn default_line_regex() -> String {
    DEFAULT_BOUNDARY_PATTERN.to_string()
}

fn default_tail_max_lines() -> usize {
    EngineLimits::default().tail_max_lines
}

fn default_locate_max_lines() -> usize {
    EngineLimits::default().locate_max_lines
}

fn default_window_size() -> u64 {
    EngineLimits::default().window_size
}

fn default_initial_tail_bytes() -> u64 {
    6000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            context_path: String::new(),
            logs: vec![],
            line_regex: default_line_regex(),
            tail_max_lines: default_tail_max_lines(),
            locate_max_lines: default_locate_max_lines(),
            window_size: default_window_size(),
            initial_tail_bytes: default_initial_tail_bytes(),
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("parsing config {path}"))?;
        Ok(config)
    }

    /// Load from an optional TOML file, apply `TAILWEB_*` environment
    /// overrides, then validate.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment):
    /// `TAILWEB_HOST`, `TAILWEB_PORT`, `TAILWEB_CONTEXT_PATH` and
    /// `TAILWEB_LOGS` in the compact `name:path,...` form.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(host) = lookup("TAILWEB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("TAILWEB_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("TAILWEB_PORT is not a port: {port:?}"))?;
        }
        if let Some(context_path) = lookup("TAILWEB_CONTEXT_PATH") {
            self.context_path = context_path;
        }
        if let Some(logs) = lookup("TAILWEB_LOGS") {
            self.logs = LogSource::parse_list(&logs)?;
        }
        self.context_path = normalize_context_path(&self.context_path);
        Ok(self)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.logs.is_empty() {
            bail!("no logs configured (set `logs` or TAILWEB_LOGS)");
        }
        SourceRegistry::new(self.logs.clone())?;
        LineClassifier::new(&self.line_regex).context("line_regex")?;
        if self.tail_max_lines == 0 || self.locate_max_lines == 0 {
            bail!("tail_max_lines and locate_max_lines must be positive");
        }
        if self.window_size == 0 {
            bail!("window_size must be positive");
        }
        Ok(())
    }

    pub fn limits(&self) -> EngineLimits {
        EngineLimits {
            tail_max_lines: self.tail_max_lines,
            locate_max_lines: self.locate_max_lines,
            window_size: self.window_size,
        }
    }
}

/// `"et/"` → `"/et"`, `"/"` → `""`.
fn normalize_context_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
