//! Outbound ポート: usecase が外界を使うための trait

pub mod cache_storage;
pub mod confirmation;
pub mod connectivity_view;
pub mod hardware_status;
pub mod local_entries;
pub mod notifier;
pub mod reachability;
pub mod reflections;

pub use cache_storage::CacheStorage;
pub use confirmation::{Confirmation, Decision};
pub use connectivity_view::ConnectivityView;
pub use hardware_status::HardwareStatus;
pub use local_entries::LocalEntryRepository;
pub use notifier::Notifier;
pub use reachability::ReachabilityProbe;
pub use reflections::ReflectionRepository;
