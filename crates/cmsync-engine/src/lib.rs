//! Batch sync engine: paginates the commerce catalog, drives per-record
//! upserts against the content store, and tracks compensation metadata
//! for best-effort cleanup when a run fails partway.

pub mod batch;
pub mod commerce;
pub mod compensation;
pub mod error;
pub mod source;
pub mod types;

pub use batch::{BatchOutcome, SyncRunner};
pub use commerce::CommerceClient;
pub use compensation::compensate;
pub use error::{EngineError, SourceError};
pub use source::{ProductPage, ProductSource};
pub use types::{CompensationEntry, PreviousState, SyncAction};
