//! アダプター（Outbound ポートの標準実装とテスト用実装）
//!
//! usecase はポートの trait 経由でのみファイル・時刻・HTTP・ストアに触れる。

pub mod file_json_log;
pub mod file_key_value;
pub mod human_log;
pub mod memory_key_value;
pub mod reqwest_transport;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use file_key_value::FileKeyValueStore;
pub use human_log::{HumanLog, TeeLog};
pub use memory_key_value::MemoryKeyValueStore;
pub use reqwest_transport::ReqwestTransport;
pub use std_clock::{FixedClock, StdClock};
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
