//! Shared test harness for E2E integration tests.
//!
//! Serves real log files from a temporary directory through the full
//! config → state → router path, driving it with `tower::oneshot`.

#![allow(dead_code)]

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use tw_log_engine::LogSource;
use tw_protocol::LogView;
use tw_protocol::headers::{END_POSITION, LAST_MODIFICATION, LOCATE_FOUND, SEEK_POSITION, START_POSITION};
use tw_server::config::ServerConfig;
use tw_server::routes::build_router;
use tw_server::state::AppState;

/// End-to-end harness: a directory of log files behind a router.
pub struct TestHarness {
    dir: TempDir,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Effective configuration the router was built from.
    pub config: ServerConfig,
    bumps: u64,
}

/// The cursor a browser keeps between tail polls, in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCursor {
    pub seek_position: String,
    pub last_modification: String,
}

impl WireCursor {
    pub fn from_start() -> Self {
        Self {
            seek_position: "0".into(),
            last_modification: "0".into(),
        }
    }
}

/// One tail response.
#[derive(Debug)]
pub struct TailReply {
    pub status: StatusCode,
    pub body: String,
    pub cursor: WireCursor,
}

/// One page/locate response.
#[derive(Debug)]
pub struct LocateReply {
    pub status: StatusCode,
    pub body: String,
    pub start: i64,
    pub end: i64,
    pub found: Option<bool>,
}

impl TestHarness {
    /// Serve `logs` (name, content) with the default configuration.
    pub fn new(logs: &[(&str, &str)]) -> Self {
        Self::with_config(logs, |_| {})
    }

    /// Serve `logs` after letting `adjust` edit the configuration.
    pub fn with_config(logs: &[(&str, &str)], adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = ServerConfig::default();
        for (name, content) in logs {
            let path = dir.path().join(format!("{name}.log"));
            std::fs::write(&path, content).unwrap();
            config.logs.push(LogSource::new(*name, path));
        }
        adjust(&mut config);
        config.validate().unwrap();

        let state = AppState::from_config(&config).unwrap();
        let router = build_router(state, &config.context_path);
        let mut harness = Self {
            dir,
            router,
            config,
            bumps: 0,
        };
        for (name, _) in logs {
            harness.touch(name);
        }
        harness
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.log"))
    }

    /// Append to a log and move its mtime forward.
    pub fn append(&mut self, name: &str, content: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(self.path_of(name))
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        drop(file);
        self.touch(name);
    }

    /// Replace a log's content, as a rotation would.
    pub fn rewrite(&mut self, name: &str, content: &str) {
        std::fs::write(self.path_of(name), content).unwrap();
        self.touch(name);
    }

    /// Set a strictly increasing mtime so change detection never depends
    /// on filesystem timestamp granularity.
    fn touch(&mut self, name: &str) {
        self.bumps += 1;
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + self.bumps);
        File::options()
            .write(true)
            .open(self.path_of(name))
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.config.context_path)
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// POST a form body.
    pub async fn post_form(&self, route: &str, form: &str) -> Response<Body> {
        self.send(
            Request::post(self.url(route))
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// GET with a query string.
    pub async fn get(&self, route_and_query: &str) -> Response<Body> {
        self.send(
            Request::get(self.url(route_and_query))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Poll `/tail` with `cursor` (POST /tail).
    pub async fn tail(&self, name: &str, filters: &str, cursor: &WireCursor) -> TailReply {
        let form = format!(
            "logName={name}&filterKeywords={}&lastModification={}&seekPosition={}",
            encode(filters),
            cursor.last_modification,
            cursor.seek_position,
        );
        let response = self.post_form("/tail", &form).await;
        let status = response.status();
        let cursor = WireCursor {
            seek_position: header(&response, SEEK_POSITION).unwrap_or_default(),
            last_modification: header(&response, LAST_MODIFICATION).unwrap_or_default(),
        };
        TailReply {
            status,
            body: body_text(response).await,
            cursor,
        }
    }

    /// Page through a log (POST /locate with `pagingLog=yes`).
    pub async fn page(
        &self,
        name: &str,
        filters: &str,
        start: i64,
        end: i64,
        direction: &str,
    ) -> LocateReply {
        let form = format!(
            "logName={name}&filterKeywords={}&startPosition={start}&endPosition={end}&direction={direction}&pagingLog=yes",
            encode(filters),
        );
        self.locate_form(&form).await
    }

    /// Search for a keyword set (POST /locate with `pagingLog=no`).
    pub async fn locate(
        &self,
        name: &str,
        keywords: &str,
        start: i64,
        end: i64,
        direction: &str,
    ) -> LocateReply {
        let form = format!(
            "logName={name}&locateKeywords={}&startPosition={start}&endPosition={end}&direction={direction}&pagingLog=no",
            encode(keywords),
        );
        self.locate_form(&form).await
    }

    pub async fn locate_form(&self, form: &str) -> LocateReply {
        let response = self.post_form("/locate", form).await;
        let status = response.status();
        let position = |name: &str| {
            header(&response, name)
                .and_then(|v| v.parse().ok())
                .unwrap_or(i64::MIN)
        };
        let start = position(START_POSITION);
        let end = position(END_POSITION);
        let found = header(&response, LOCATE_FOUND).map(|v| v == "true");
        LocateReply {
            status,
            body: body_text(response).await,
            start,
            end,
            found,
        }
    }

    /// GET /logs
    pub async fn logs(&self) -> Vec<LogView> {
        let response = self.get("/logs").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub fn header(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal form encoding for keyword lists in tests.
fn encode(value: &str) -> String {
    value.replace('%', "%25").replace(' ', "%20").replace('&', "%26")
}

/// Byte offset of the start of the line containing `needle`.
pub fn line_start(haystack: &str, needle: &str) -> usize {
    let at = haystack.find(needle).unwrap();
    haystack[..at].rfind('\n').map_or(0, |nl| nl + 1)
}
