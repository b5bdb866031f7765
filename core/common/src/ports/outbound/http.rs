//! HTTP 通信 Outbound ポート
//!
//! リモートリソースへのリクエストはすべてこの trait を通す。
//! キャッシュ層も同じ trait を実装し、ネットワーク実装を包んで透過的に差し込む。

use crate::error::Error;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP メソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// 1 リクエスト分の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// 絶対 URL
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// None のときはトランスポート既定の挙動に任せる
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// JSON ボディ付き POST（Content-Type を付与）
    pub fn post_json(url: impl Into<String>, body: &serde_json::Value) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body)?;
        Ok(Self::new(HttpMethod::Post, url)
            .header("Content-Type", "application/json")
            .with_body(bytes))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// ヘッダ値（名前は大文字小文字を区別しない）
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Cache-Control: no-store` / `no-cache` もしくは `Pragma: no-cache` が付いているか
    pub fn forbids_cache(&self) -> bool {
        let cache_control = self
            .header_value("Cache-Control")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();
        let pragma = self
            .header_value("Pragma")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();
        cache_control.contains("no-store")
            || cache_control.contains("no-cache")
            || pragma.contains("no-cache")
    }
}

/// 1 レスポンス分の値（ボディは読み切った状態で持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// 2xx か（fetch の `response.ok` 相当）
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }
}

/// HTTP トランスポート（Outbound ポート）
///
/// Err はネットワーク到達不能・タイムアウト等「応答が得られなかった」場合のみ。
/// 4xx / 5xx は Ok(HttpResponse) として返す。
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}
