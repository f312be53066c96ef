//! Temporary log files behind an [`AppState`], for handler tests.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::time::{Duration, SystemTime};

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tw_log_engine::{DEFAULT_BOUNDARY_PATTERN, EngineLimits, LogEngine, LogSource, SourceRegistry};

use crate::state::AppState;

pub(crate) struct TestLogs {
    dir: TempDir,
    sources: Vec<LogSource>,
    limits: EngineLimits,
    bumps: u64,
}

impl TestLogs {
    pub(crate) fn new(logs: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut sources = Vec::new();
        for (name, content) in logs {
            let path = dir.path().join(format!("{name}.log"));
            std::fs::write(&path, content).unwrap();
            sources.push(LogSource::new(*name, path));
        }
        let mut logs = Self {
            dir,
            sources,
            limits: EngineLimits::default(),
            bumps: 0,
        };
        for i in 0..logs.sources.len() {
            logs.touch(i);
        }
        logs
    }

    pub(crate) fn with_limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Register a log whose file does not exist.
    pub(crate) fn with_missing(mut self, name: &str) -> Self {
        self.sources
            .push(LogSource::new(name, self.dir.path().join("missing.log")));
        self
    }

    pub(crate) fn state(&self) -> AppState {
        AppState::new(
            LogEngine::new(DEFAULT_BOUNDARY_PATTERN, self.limits).unwrap(),
            SourceRegistry::new(self.sources.clone()).unwrap(),
            6000,
        )
    }

    pub(crate) fn append(&mut self, index: usize, content: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.sources[index].path())
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        drop(file);
        self.touch(index);
    }

    /// Give the file a strictly later mtime than any set before.
    fn touch(&mut self, index: usize) {
        self.bumps += 1;
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + self.bumps);
        File::options()
            .write(true)
            .open(self.sources[index].path())
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }
}

pub(crate) fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub(crate) async fn body_text(response: Response<Body>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub(crate) fn header(response: &Response<Body>, name: &str) -> String {
    response.headers()[name].to_str().unwrap().to_string()
}
