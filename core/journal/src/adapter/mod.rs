//! Adapter 層: Outbound ポートの標準実装

pub mod cache_controller;
pub mod config;
pub mod confirmation;
pub mod console_connectivity_view;
pub mod console_notifier;
pub mod file_cache_storage;
pub mod hardware_status;
pub mod heartbeat;
pub mod local_entry_store;
#[cfg(test)]
pub mod memory_cache_storage;
pub mod periodic_task;
pub mod remote_reflection_client;

pub use cache_controller::CacheController;
pub use config::{apply_server_override, load_config};
pub use confirmation::{AssumeYes, CliConfirmation};
pub use console_connectivity_view::ConsoleConnectivityView;
pub use console_notifier::ConsoleNotifier;
pub use file_cache_storage::FileCacheStorage;
pub use hardware_status::RouteHardwareStatus;
pub use heartbeat::Heartbeat;
pub use local_entry_store::LocalEntryStore;
#[cfg(test)]
pub use memory_cache_storage::MemoryCacheStorage;
pub use periodic_task::PeriodicTask;
pub use remote_reflection_client::RemoteReflectionClient;
