//! 世代名つきキャッシュストレージの Outbound ポート

use common::error::Error;
use common::ports::outbound::HttpResponse;

/// 名前（世代）ごとに URL → レスポンスを保持するキャッシュ
///
/// 実装は `adapter::FileCacheStorage`（世代ごとに 1 つの JSON ファイル）など。
pub trait CacheStorage: Send + Sync {
    /// 存在する世代名の一覧
    fn keys(&self) -> Result<Vec<String>, Error>;
    /// 世代を丸ごと削除する。存在したら true
    fn delete(&self, cache_name: &str) -> Result<bool, Error>;
    fn lookup(&self, cache_name: &str, url: &str) -> Result<Option<HttpResponse>, Error>;
    /// 同じ URL の既存エントリは上書き
    fn put(&self, cache_name: &str, url: &str, response: &HttpResponse) -> Result<(), Error>;
    /// まとめて書き込む。途中で失敗したら 1 件も書かない
    fn put_all(&self, cache_name: &str, entries: &[(String, HttpResponse)]) -> Result<(), Error>;
}
