//! テスト用ダブル（サーバー・通知・表示・確認・プローブ）

use crate::domain::{ConnectivityState, JournalError, RemoteReflection};
use crate::ports::outbound::{Confirmation, ConnectivityView, Decision, Notifier, ReachabilityProbe};
use common::domain::Dirs;
use common::error::Error;
use common::ports::outbound::{EnvResolver, HttpMethod, HttpRequest, HttpResponse, HttpTransport, KeyValueStore};
use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const BASE: &str = "http://server:5000";

pub fn base_url() -> Url {
    Url::parse(BASE).unwrap()
}

/// メモリ上のリフレクションサーバー（GET/POST/DELETE/HEAD と静的アセット）
pub struct FakeServer {
    pub reflections: Mutex<Vec<RemoteReflection>>,
    online: AtomicBool,
    /// 0 以外なら POST にこのステータスを返す
    post_status: AtomicU16,
    /// この経路には 404 を返す
    missing: Mutex<Vec<String>>,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            reflections: Mutex::new(Vec::new()),
            online: AtomicBool::new(true),
            post_status: AtomicU16::new(0),
            missing: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reflections(records: Vec<RemoteReflection>) -> Self {
        let server = Self::new();
        *server.reflections.lock().unwrap() = records;
        server
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn fail_posts_with(&self, status: u16) {
        self.post_status.store(status, Ordering::SeqCst);
    }

    pub fn mark_missing(&self, path: &str) {
        self.missing.lock().unwrap().push(path.to_string());
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn route(&self, request: &HttpRequest) -> HttpResponse {
        let path = request.url.strip_prefix(BASE).unwrap_or(&request.url).to_string();
        if self.missing.lock().unwrap().contains(&path) {
            return HttpResponse::new(404, "not found");
        }
        let mut records = self.reflections.lock().unwrap();
        match (request.method, path.as_str()) {
            (HttpMethod::Head, "/api/reflections") => HttpResponse::new(200, ""),
            (HttpMethod::Get, "/api/reflections") => {
                HttpResponse::new(200, serde_json::to_vec(&*records).unwrap())
            }
            (HttpMethod::Post, "/api/reflections") => {
                let status = self.post_status.load(Ordering::SeqCst);
                if status != 0 {
                    return HttpResponse::new(status, "error");
                }
                let body: serde_json::Value =
                    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap();
                let mut record = RemoteReflection::new(
                    format!("2024-06-0{} 12:00:00", records.len() + 1),
                    body["reflection"].as_str().unwrap_or_default(),
                );
                if let Some(title) = body["title"].as_str() {
                    record = record.with_title(title);
                }
                records.push(record);
                HttpResponse::new(201, "{}")
            }
            (HttpMethod::Delete, p) if p.starts_with("/api/reflections/") => {
                match p["/api/reflections/".len()..].parse::<usize>() {
                    Ok(i) if i < records.len() => {
                        records.remove(i);
                        HttpResponse::new(200, "{}")
                    }
                    _ => HttpResponse::new(404, "{}"),
                }
            }
            (HttpMethod::Get, p) => HttpResponse::new(200, format!("asset:{}", p)),
            _ => HttpResponse::new(405, ""),
        }
    }
}

impl HttpTransport for FakeServer {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.online.load(Ordering::SeqCst) {
            return Err(Error::http("connection refused"));
        }
        Ok(self.route(request))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Notify(String, String),
    Feedback(String, String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| match n {
                Notice::Notify(t, _) | Notice::Feedback(t, _) => t.clone(),
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Notify(title.into(), body.into()));
    }

    fn feedback(&self, title: &str, body: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Feedback(title.into(), body.into()));
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub offline_mode: Mutex<Vec<bool>>,
    pub statuses: Mutex<Vec<ConnectivityState>>,
}

impl ConnectivityView for RecordingView {
    fn set_offline_mode(&self, offline: bool) {
        self.offline_mode.lock().unwrap().push(offline);
    }

    fn set_status(&self, state: ConnectivityState) {
        self.statuses.lock().unwrap().push(state);
    }
}

pub struct FixedConfirmation {
    pub decision: Decision,
    pub prompts: Mutex<Vec<String>>,
}

impl FixedConfirmation {
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Confirmation for FixedConfirmation {
    fn confirm(&self, message: &str) -> Decision {
        self.prompts.lock().unwrap().push(message.to_string());
        self.decision
    }
}

/// 結果を順に返すプローブ（尽きたら最後の結果を繰り返す）
pub struct ScriptedProbe {
    results: Mutex<VecDeque<Result<(), JournalError>>>,
    last: Mutex<Result<(), JournalError>>,
    pub timeouts: Mutex<Vec<Duration>>,
}

impl ScriptedProbe {
    pub fn new(results: Vec<Result<(), JournalError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            last: Mutex::new(Ok(())),
            timeouts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.timeouts.lock().unwrap().len()
    }
}

impl ReachabilityProbe for ScriptedProbe {
    fn head_probe(&self, timeout: Duration) -> Result<(), JournalError> {
        self.timeouts.lock().unwrap().push(timeout);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.results.lock().unwrap().pop_front() {
            *last = next;
        }
        last.clone()
    }
}

/// 書き込みが常に失敗するストア（容量超過など）
pub struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Err(Error::io_msg("quota exceeded"))
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Err(Error::io_msg("quota exceeded"))
    }
}

/// 1 つのルート配下に全ディレクトリを置く EnvResolver
pub struct TestEnv {
    pub root: PathBuf,
    pub vars: BTreeMap<String, String>,
}

impl TestEnv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vars: BTreeMap::new(),
        }
    }
}

impl EnvResolver for TestEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        Ok(Dirs::under(&self.root))
    }

    fn current_dir(&self) -> Result<PathBuf, Error> {
        Ok(self.root.join("cwd"))
    }
}
