pub mod backend;
pub mod config;
pub mod draft;
pub mod image;
pub mod models;
pub mod notice;
pub mod preview;
pub mod submit;

mod memory;
pub use memory::{MemoryBackend, MemoryFetcher, StoredObject};

pub use backend::{BackendError, Fetched, ImageFetcher, ObjectStorage, ProjectTable, UploadOptions};
pub use config::ShowcaseConfig;
pub use draft::{DraftForm, DraftSnapshot};
pub use image::ImagePayload;
pub use models::{NewProject, Project, ProjectRecord, ProjectRow, ProjectType, Session, SessionUser};
pub use notice::{Notice, NoticeVariant};
pub use preview::{OverwritePolicy, PreviewOutcome, PreviewRequest, PreviewResolver};
pub use submit::{ProjectSubmitter, SubmitError};
