//! journal 固有のドメイン型（型と不変条件）

pub mod cache;
pub mod command;
pub mod config;
pub mod connectivity;
pub mod date;
pub mod entry;
pub mod error;
pub mod export;
pub mod submission;

pub use command::JournalCommand;
pub use config::JournalConfig;
pub use connectivity::ConnectivityState;
pub use entry::{Entry, EntryOrigin, LocalEntry, NewEntry, RemoteReflection, SubmissionForm};
pub use error::JournalError;
pub use export::ExportDocument;
pub use submission::{JournalView, RemoteDeleteOutcome, SubmissionState, SubmitOutcome};
