//! Outbound ポート: アプリが外界（FS・時刻・環境変数・HTTP・キー値ストア・ログ）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod http;
pub mod key_value;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::{FileMetadata, FileSystem};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use key_value::KeyValueStore;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
