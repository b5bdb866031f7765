//! メモリ上のキャッシュストレージ（テスト用）

use crate::ports::outbound::CacheStorage;
use common::error::Error;
use common::ports::outbound::HttpResponse;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    caches: Mutex<BTreeMap<String, BTreeMap<String, HttpResponse>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 空の世代を作る（古い世代の掃除テスト用）
    pub fn create(&self, cache_name: &str) {
        self.caches
            .lock()
            .unwrap()
            .entry(cache_name.to_string())
            .or_default();
    }

    pub fn len(&self, cache_name: &str) -> usize {
        self.caches
            .lock()
            .unwrap()
            .get(cache_name)
            .map(|c| c.len())
            .unwrap_or(0)
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn keys(&self) -> Result<Vec<String>, Error> {
        Ok(self.caches.lock().unwrap().keys().cloned().collect())
    }

    fn delete(&self, cache_name: &str) -> Result<bool, Error> {
        Ok(self.caches.lock().unwrap().remove(cache_name).is_some())
    }

    fn lookup(&self, cache_name: &str, url: &str) -> Result<Option<HttpResponse>, Error> {
        Ok(self
            .caches
            .lock()
            .unwrap()
            .get(cache_name)
            .and_then(|c| c.get(url).cloned()))
    }

    fn put(&self, cache_name: &str, url: &str, response: &HttpResponse) -> Result<(), Error> {
        self.put_all(cache_name, &[(url.to_string(), response.clone())])
    }

    fn put_all(&self, cache_name: &str, entries: &[(String, HttpResponse)]) -> Result<(), Error> {
        let mut caches = self.caches.lock().unwrap();
        let cache = caches.entry(cache_name.to_string()).or_default();
        for (url, response) in entries {
            cache.insert(url.clone(), response.clone());
        }
        Ok(())
    }
}
