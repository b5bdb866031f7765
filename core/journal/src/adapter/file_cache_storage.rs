//! ファイルベースのキャッシュストレージ（世代ごとに <cache_dir>/<name>.json）
//!
//! ボディはバイナリ（画像など）もあるため base64 で保存する。
//! 書き込みは世代ファイル全体の読み込み → 変更 → 一時ファイル経由で置き換え。

use crate::domain::cache::is_valid_cache_name;
use crate::ports::outbound::CacheStorage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use common::error::Error;
use common::ports::outbound::{FileSystem, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const CACHE_EXT: &str = "json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    entries: BTreeMap<String, StoredResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredResponse {
    status: u16,
    #[serde(default)]
    headers: Vec<(String, String)>,
    body: String,
}

impl StoredResponse {
    fn from_response(r: &HttpResponse) -> Self {
        Self {
            status: r.status,
            headers: r.headers.clone(),
            body: BASE64.encode(&r.body),
        }
    }

    fn to_response(&self) -> Result<HttpResponse, Error> {
        let body = BASE64
            .decode(&self.body)
            .map_err(|e| Error::json(format!("Invalid cached body: {}", e)))?;
        Ok(HttpResponse {
            status: self.status,
            headers: self.headers.clone(),
            body,
        })
    }
}

pub struct FileCacheStorage {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
    /// 世代ファイルの read-modify-write を直列化する
    write_lock: Mutex<()>,
}

impl FileCacheStorage {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, cache_name: &str) -> Result<PathBuf, Error> {
        if !is_valid_cache_name(cache_name) {
            return Err(Error::invalid_argument(format!(
                "Invalid cache name: '{}'",
                cache_name
            )));
        }
        Ok(self.dir.join(format!("{}.{}", cache_name, CACHE_EXT)))
    }

    fn read(&self, cache_name: &str) -> Result<CacheFile, Error> {
        let path = self.path_for(cache_name)?;
        if !self.fs.exists(&path) {
            return Ok(CacheFile::default());
        }
        let s = self.fs.read_to_string(&path)?;
        serde_json::from_str(&s)
            .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
    }

    fn write(&self, cache_name: &str, file: &CacheFile) -> Result<(), Error> {
        let path = self.path_for(cache_name)?;
        let json = serde_json::to_string(file)?;
        self.fs.write_atomic(&path, &json)
    }
}

impl CacheStorage for FileCacheStorage {
    fn keys(&self) -> Result<Vec<String>, Error> {
        if !self.fs.exists(&self.dir) {
            return Ok(Vec::new());
        }
        let names = self
            .fs
            .read_dir(&self.dir)?
            .into_iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(CACHE_EXT))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        Ok(names)
    }

    fn delete(&self, cache_name: &str) -> Result<bool, Error> {
        let path = self.path_for(cache_name)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::system("cache lock poisoned"))?;
        if !self.fs.exists(&path) {
            return Ok(false);
        }
        self.fs.remove_file(&path)?;
        Ok(true)
    }

    fn lookup(&self, cache_name: &str, url: &str) -> Result<Option<HttpResponse>, Error> {
        let file = self.read(cache_name)?;
        file.entries.get(url).map(StoredResponse::to_response).transpose()
    }

    fn put(&self, cache_name: &str, url: &str, response: &HttpResponse) -> Result<(), Error> {
        self.put_all(cache_name, &[(url.to_string(), response.clone())])
    }

    fn put_all(&self, cache_name: &str, entries: &[(String, HttpResponse)]) -> Result<(), Error> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::system("cache lock poisoned"))?;
        let mut file = self.read(cache_name)?;
        for (url, response) in entries {
            file.entries
                .insert(url.clone(), StoredResponse::from_response(response));
        }
        self.write(cache_name, &file)
    }
}
