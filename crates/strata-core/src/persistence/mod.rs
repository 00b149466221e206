//! Local and remote persistence of the analysis.

pub mod local;
pub mod remote;

pub use local::{load_local, save_local, LocalSnapshot};
pub use remote::{DocumentStore, MemoryDocumentStore, RemoteSync, SyncStatus};
