//! # Backend traits: the hosted platform seen from the client
//!
//! The showcase never stores anything itself. Uploads go to an object store,
//! projects go to a relational table, and preview images are fetched over
//! HTTP. Each of those is an async trait here so the submission flow and the
//! preview resolver run unchanged against the Supabase adapters in the `api`
//! crate or the in-memory doubles in [`crate::memory`].
//!
//! | Trait | Operations |
//! |-------|-----------|
//! | [`ObjectStorage`] | `upload` bytes under a bucket path, `public_url` for a stored object |
//! | [`ProjectTable`] | `insert` a [`ProjectRecord`] returning the row, `list` rows newest first |
//! | [`ImageFetcher`] | `fetch` a URL, separating non-OK statuses from transport failures |

use crate::image::ImagePayload;
use crate::models::{ProjectRecord, ProjectRow};

/// Error raised by any backend adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Decode(e.to_string())
    }
}

/// Options passed along with an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOptions {
    /// `max-age` in seconds for the stored object.
    pub cache_control_secs: u32,
    /// Replace an existing object at the same path.
    pub upsert: bool,
}

/// Object storage for uploaded project images.
pub trait ObjectStorage {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        payload: &ImagePayload,
        options: &UploadOptions,
    ) -> impl std::future::Future<Output = Result<(), BackendError>>;

    /// Public URL of an object. Pure; does not check that the object exists.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// The `projects` table.
pub trait ProjectTable {
    fn insert(
        &self,
        record: &ProjectRecord,
    ) -> impl std::future::Future<Output = Result<ProjectRow, BackendError>>;

    fn list(&self) -> impl std::future::Future<Output = Result<Vec<ProjectRow>, BackendError>>;
}

/// Result of fetching an image URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched {
    Ok(Vec<u8>),
    /// The server answered with a non-success status.
    Status(u16),
}

/// Plain HTTP GET for preview images.
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<Fetched, BackendError>>;
}
