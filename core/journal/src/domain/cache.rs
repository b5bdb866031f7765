//! オフラインキャッシュの世代名・静的アセット一覧・経路ごとのポリシー

use common::ports::outbound::{HttpMethod, HttpRequest};
use url::Url;

/// リフレクション API のパス
pub const REFLECTIONS_PATH: &str = "/api/reflections";

/// 既定のキャッシュ世代名。デプロイごとに番号を上げる。
pub const DEFAULT_CACHE_NAME: &str = "journal-pwa-v19";

/// install 時に取り込む静的アセット
pub const DEFAULT_STATIC_ASSETS: &[&str] = &[
    "/",
    "/journal",
    "/about",
    "/projects",
    "/game",
    "/static/css/style.css",
    "/static/js/script.js",
    "/static/js/journal-app.js",
    "/static/js/storage.js",
    "/static/js/browser.js",
    "/static/js/thirdparty.js",
    "/static/js/snake.js",
    "/static/images/icon-192.jpg",
    "/static/images/icon-512.png",
];

/// 世代名として使える文字列か。世代はファイル名にもなるので英数字と `-` `_` `.` に限る。
pub fn is_valid_cache_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// リクエストごとのキャッシュ方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// 動的データ: ネットワーク優先、失敗時のみキャッシュ
    NetworkFirst,
    /// 静的アセット: キャッシュ優先
    CacheFirst,
    /// キャッシュを読みも書きもしない（GET 以外・no-store 指定）
    Bypass,
}

pub fn policy_for(request: &HttpRequest) -> CachePolicy {
    if request.method != HttpMethod::Get || request.forbids_cache() {
        return CachePolicy::Bypass;
    }
    if request.url.contains(REFLECTIONS_PATH) {
        CachePolicy::NetworkFirst
    } else {
        CachePolicy::CacheFirst
    }
}

/// ベース URL の下にパスを結合する。ベース側のパス（サブディレクトリ配置）は残す。
pub fn join_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_by_route() {
        let api = HttpRequest::get("http://h/api/reflections");
        assert_eq!(policy_for(&api), CachePolicy::NetworkFirst);
        let css = HttpRequest::get("http://h/static/css/style.css");
        assert_eq!(policy_for(&css), CachePolicy::CacheFirst);
    }

    #[test]
    fn test_non_get_and_no_store_bypass() {
        let probe = HttpRequest::head("http://h/api/reflections");
        assert_eq!(policy_for(&probe), CachePolicy::Bypass);
        let del = HttpRequest::delete("http://h/api/reflections/0");
        assert_eq!(policy_for(&del), CachePolicy::Bypass);
        let no_store = HttpRequest::get("http://h/api/reflections").header("Cache-Control", "no-store");
        assert_eq!(policy_for(&no_store), CachePolicy::Bypass);
    }

    #[test]
    fn test_cache_name_rule() {
        assert!(is_valid_cache_name(DEFAULT_CACHE_NAME));
        assert!(is_valid_cache_name("journal_pwa.v20"));
        assert!(!is_valid_cache_name(""));
        assert!(!is_valid_cache_name(".hidden"));
        assert!(!is_valid_cache_name("journal pwa v19"));
        assert!(!is_valid_cache_name("../escape"));
    }

    #[test]
    fn test_join_url() {
        let join = |base: &str, path: &str| join_url(&Url::parse(base).unwrap(), path).unwrap().to_string();
        assert_eq!(join("http://h:5000/", "/api"), "http://h:5000/api");
        assert_eq!(join("http://h:5000", "/"), "http://h:5000/");
        assert_eq!(join("http://h", "x"), "http://h/x");
        assert_eq!(join("HTTP://H:5000", "/about"), "http://h:5000/about");
        assert_eq!(join("http://h/journal", "/api/reflections"), "http://h/journal/api/reflections");
    }
}
