//! UseCase 層: ポート越しにドメインを動かす

pub mod connectivity;
pub mod journal;
pub mod merge;

pub use connectivity::{ConnectivityDeps, ConnectivityMonitor};
pub use journal::{JournalDeps, JournalUseCase};
