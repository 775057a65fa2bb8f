//! Content-store client and document sync service.
//!
//! Talks to the headless content store over its HTTP API: document reads,
//! mutations (create / patch / delete) and image asset uploads. The
//! [`SyncService`] façade layers the product transforms and the
//! editor-field merge policy on top of the raw [`ContentStoreClient`].

pub mod assets;
pub mod client;
pub mod error;
pub mod merge;
pub mod service;
pub mod transform;
pub mod types;

pub use client::ContentStoreClient;
pub use error::ContentError;
pub use merge::ProtectedFields;
pub use service::{DocumentKind, SyncService};
pub use types::{Document, ImageRef, MutateResponse, PatchSet, ProductDoc, ProductPatch};
