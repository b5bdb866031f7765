//! オフラインキャッシュ層（HttpTransport のデコレータ）
//!
//! 世代名つきキャッシュの install / activate と、リクエストごとの取得方針を持つ。
//! - API（/api/reflections）の GET: ネットワーク優先、成功したらキャッシュを更新、失敗時のみキャッシュ
//! - それ以外の GET: キャッシュ優先、無ければネットワーク
//! - GET 以外・no-store 指定: キャッシュに触れずにそのまま転送

use crate::domain::cache::{join_url, policy_for, CachePolicy};
use crate::ports::outbound::CacheStorage;
use common::error::Error;
use common::ports::outbound::{HttpRequest, HttpResponse, HttpTransport, Log, LogLevel, LogRecord};
use std::sync::Arc;
use url::Url;

pub struct CacheController {
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn HttpTransport>,
    cache_name: String,
    base_url: Url,
    static_assets: Vec<String>,
    log: Arc<dyn Log>,
}

impl CacheController {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        network: Arc<dyn HttpTransport>,
        cache_name: impl Into<String>,
        base_url: Url,
        static_assets: Vec<String>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            storage,
            network,
            cache_name: cache_name.into(),
            base_url,
            static_assets,
            log,
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// 静的アセットをすべて取得して現在の世代へ書き込む。
    ///
    /// 1 件でも取得に失敗（または 2xx 以外）したら何も書かずに Err を返す。
    pub fn install(&self) -> Result<usize, Error> {
        let mut fetched = Vec::with_capacity(self.static_assets.len());
        for asset in &self.static_assets {
            let url = join_url(&self.base_url, asset)
                .map_err(|e| Error::invalid_argument(format!("Invalid asset path '{}': {}", asset, e)))?
                .to_string();
            let response = self.network.send(&HttpRequest::get(url.clone()))?;
            if !response.is_ok() {
                self.log_cache(LogLevel::Warn, "install aborted", &url, Some(response.status));
                return Err(Error::http(format!(
                    "Failed to fetch {} (HTTP {})",
                    url, response.status
                )));
            }
            fetched.push((url, response));
        }
        self.storage.put_all(&self.cache_name, &fetched)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "cache installed")
                .layer("adapter")
                .kind("cache")
                .field("cache", self.cache_name.as_str())
                .field("assets", fetched.len()),
        );
        Ok(fetched.len())
    }

    /// 現在の世代以外をすべて削除し、削除した世代名を返す。
    pub fn activate(&self) -> Result<Vec<String>, Error> {
        let mut removed = Vec::new();
        for name in self.storage.keys()? {
            if name != self.cache_name && self.storage.delete(&name)? {
                removed.push(name);
            }
        }
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "cache activated")
                .layer("adapter")
                .kind("cache")
                .field("cache", self.cache_name.as_str())
                .field("removed", removed.len()),
        );
        Ok(removed)
    }

    /// 存在する世代の一覧
    pub fn generations(&self) -> Result<Vec<String>, Error> {
        self.storage.keys()
    }

    fn cached(&self, url: &str) -> Option<HttpResponse> {
        match self.storage.lookup(&self.cache_name, url) {
            Ok(found) => found,
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Warn, "cache lookup failed")
                        .layer("adapter")
                        .kind("cache")
                        .field("url", url)
                        .field("error", e.to_string()),
                );
                None
            }
        }
    }

    fn store(&self, url: &str, response: &HttpResponse) {
        if let Err(e) = self.storage.put(&self.cache_name, url, response) {
            let _ = self.log.log(
                &LogRecord::new(LogLevel::Warn, "cache put failed")
                    .layer("adapter")
                    .kind("cache")
                    .field("url", url)
                    .field("error", e.to_string()),
            );
        }
    }

    fn log_cache(&self, level: LogLevel, message: &str, url: &str, status: Option<u16>) {
        let mut record = LogRecord::new(level, message)
            .layer("adapter")
            .kind("cache")
            .field("url", url);
        if let Some(status) = status {
            record = record.field("status", status);
        }
        let _ = self.log.log(&record);
    }

    fn network_first(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        match self.network.send(request) {
            Ok(response) => {
                self.store(&request.url, &response);
                Ok(response)
            }
            Err(e) => match self.cached(&request.url) {
                Some(response) => {
                    self.log_cache(LogLevel::Debug, "served from cache", &request.url, None);
                    Ok(response)
                }
                None => Err(e),
            },
        }
    }

    fn cache_first(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        if let Some(response) = self.cached(&request.url) {
            return Ok(response);
        }
        self.network.send(request)
    }
}

impl HttpTransport for CacheController {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        match policy_for(request) {
            CachePolicy::Bypass => self.network.send(request),
            CachePolicy::NetworkFirst => self.network_first(request),
            CachePolicy::CacheFirst => self.cache_first(request),
        }
    }
}
