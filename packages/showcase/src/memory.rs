use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::{BackendError, Fetched, ImageFetcher, ObjectStorage, ProjectTable, UploadOptions};
use crate::image::ImagePayload;
use crate::models::{ProjectRecord, ProjectRow};

/// An object held by [`MemoryBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub payload: ImagePayload,
    pub options: UploadOptions,
}

#[derive(Debug, Default)]
struct BackendState {
    objects: HashMap<String, StoredObject>,
    rows: Vec<ProjectRow>,
    upload_calls: usize,
    insert_calls: usize,
    fail_upload: Option<BackendError>,
    fail_insert: Option<BackendError>,
}

/// In-memory storage and table for tests and offline previews.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail with `error`.
    pub fn failing_uploads(self, error: BackendError) -> Self {
        self.state.lock().unwrap().fail_upload = Some(error);
        self
    }

    /// Make every insert fail with `error`.
    pub fn failing_inserts(self, error: BackendError) -> Self {
        self.state.lock().unwrap().fail_insert = Some(error);
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.state.lock().unwrap().upload_calls
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.state.lock().unwrap().objects.get(&format!("{bucket}/{path}")).cloned()
    }

    pub fn object_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().objects.keys().cloned().collect()
    }

    pub fn rows(&self) -> Vec<ProjectRow> {
        self.state.lock().unwrap().rows.clone()
    }
}

impl ObjectStorage for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        payload: &ImagePayload,
        options: &UploadOptions,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.upload_calls += 1;
        if let Some(error) = state.fail_upload.clone() {
            return Err(error);
        }

        let key = format!("{bucket}/{path}");
        if !options.upsert && state.objects.contains_key(&key) {
            return Err(BackendError::Http {
                status: 409,
                message: "The resource already exists".to_string(),
            });
        }
        state.objects.insert(
            key,
            StoredObject {
                payload: payload.clone(),
                options: options.clone(),
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

impl ProjectTable for MemoryBackend {
    async fn insert(&self, record: &ProjectRecord) -> Result<ProjectRow, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.insert_calls += 1;
        if let Some(error) = state.fail_insert.clone() {
            return Err(error);
        }

        let row = ProjectRow {
            id: (state.rows.len() + 1).to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            r#type: record.r#type,
            url: record.url.clone(),
            image_url: Some(record.image_url.clone()),
            tags: record.tags.clone(),
            created_at: record.created_at.clone(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<ProjectRow>, BackendError> {
        let mut rows = self.state.lock().unwrap().rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Debug, Default)]
struct FetcherState {
    responses: HashMap<String, Result<Fetched, BackendError>>,
    requests: Vec<String>,
}

/// Canned [`ImageFetcher`]. Unknown URLs answer 404.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    state: Arc<Mutex<FetcherState>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, url: &str, bytes: Vec<u8>) -> Self {
        self.respond(url, Ok(Fetched::Ok(bytes)))
    }

    pub fn with_error(self, url: &str, error: BackendError) -> Self {
        self.respond(url, Err(error))
    }

    fn respond(self, url: &str, response: Result<Fetched, BackendError>) -> Self {
        self.state.lock().unwrap().responses.insert(url.to_string(), response);
        self
    }

    /// URLs fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl ImageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(url.to_string());
        state
            .responses
            .get(url)
            .cloned()
            .unwrap_or(Ok(Fetched::Status(404)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectType;

    fn record(title: &str, created_at: &str) -> ProjectRecord {
        ProjectRecord {
            title: title.to_string(),
            description: "desc".to_string(),
            r#type: ProjectType::Website,
            url: "https://example.com".to_string(),
            image_url: String::new(),
            tags: vec![],
            user_id: "user-1".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let backend = MemoryBackend::new();
        backend.insert(&record("old", "2024-01-01T00:00:00Z")).await.unwrap();
        backend.insert(&record("new", "2024-06-01T00:00:00Z")).await.unwrap();

        let rows = backend.list().await.unwrap();
        assert_eq!(rows[0].title, "new");
        assert_eq!(rows[1].title, "old");
        assert_eq!(backend.insert_calls(), 2);
    }

    #[tokio::test]
    async fn test_upload_without_upsert_rejects_existing_path() {
        let backend = MemoryBackend::new();
        let payload = ImagePayload::png("a.png", vec![1]);
        let options = UploadOptions {
            cache_control_secs: 3600,
            upsert: false,
        };

        backend.upload("bucket", "u/a.png", &payload, &options).await.unwrap();
        let second = backend.upload("bucket", "u/a.png", &payload, &options).await;

        assert!(matches!(second, Err(BackendError::Http { status: 409, .. })));
        assert_eq!(backend.object_keys(), vec!["bucket/u/a.png".to_string()]);
    }
}
