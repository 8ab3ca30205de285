//! # Submission flow: from a draft to a persisted project
//!
//! [`ProjectSubmitter`] turns a [`DraftSnapshot`] into a [`NewProject`] against
//! any [`ObjectStorage`] + [`ProjectTable`] pair:
//!
//! 1. refuse without a session ([`SubmitError::AuthRequired`]) or with a blank
//!    required field, before touching the backend;
//! 2. upload the image (if any) under `{user_id}/{token}-{millis}.{ext}` with
//!    upsert disabled, and resolve its public URL;
//! 3. normalise the tags and insert the record, asking for the row back;
//! 4. map the row to a [`Project`] and wait the configured pacing before
//!    handing it back flagged as new.
//!
//! An upload failure stops the flow before the insert, so a failed submission
//! never leaves a row behind. No step is retried.

use std::time::Duration;

use crate::backend::{BackendError, ObjectStorage, ProjectTable, UploadOptions};
use crate::config::ShowcaseConfig;
use crate::draft::DraftSnapshot;
use crate::image::new_storage_path;
use crate::models::{normalize_tags, NewProject, Project, ProjectRecord, Session};
use crate::notice::Notice;

pub const GENERIC_FAILURE: &str = "Failed to add project. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("You must be logged in to add a project")]
    AuthRequired,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("{0}")]
    UploadFailed(BackendError),
    #[error("{0}")]
    PersistFailed(BackendError),
}

impl SubmitError {
    /// The toast shown for this failure.
    pub fn notice(&self) -> Notice {
        let message = self.to_string();
        if message.trim().is_empty() {
            Notice::error(GENERIC_FAILURE)
        } else {
            Notice::error(message)
        }
    }
}

/// Runs the add-project submission against a storage and a table backend.
pub struct ProjectSubmitter<S: ObjectStorage, T: ProjectTable> {
    storage: S,
    table: T,
    bucket: String,
    upload_options: UploadOptions,
    pacing: Duration,
}

impl<S: ObjectStorage, T: ProjectTable> ProjectSubmitter<S, T> {
    pub fn new(storage: S, table: T, config: &ShowcaseConfig) -> Self {
        Self {
            storage,
            table,
            bucket: config.storage.bucket.clone(),
            upload_options: config.upload_options(),
            pacing: config.pacing(),
        }
    }

    pub async fn submit(
        &self,
        session: Option<&Session>,
        draft: &DraftSnapshot,
    ) -> Result<NewProject, SubmitError> {
        let Some(session) = session else {
            return Err(SubmitError::AuthRequired);
        };
        draft.validate()?;
        let user_id = &session.user.id;

        let mut image_url = String::new();
        if let Some(payload) = &draft.image {
            let path = new_storage_path(user_id, payload);
            self.storage
                .upload(&self.bucket, &path, payload, &self.upload_options)
                .await
                .map_err(SubmitError::UploadFailed)?;
            image_url = self.storage.public_url(&self.bucket, &path);
            tracing::info!("Uploaded project image to {}/{}", self.bucket, path);
        }

        let record = ProjectRecord {
            title: draft.title.clone(),
            description: draft.description.clone(),
            r#type: draft.kind,
            url: draft.url.clone(),
            image_url,
            tags: normalize_tags(&draft.tags),
            user_id: user_id.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let row = self
            .table
            .insert(&record)
            .await
            .map_err(SubmitError::PersistFailed)?;
        let project = Project::from(row);
        tracing::info!("Created project {}", project.id);

        pause(self.pacing).await;

        Ok(NewProject {
            project,
            is_new_project: true,
        })
    }
}

async fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftForm;
    use crate::image::ImagePayload;
    use crate::memory::MemoryBackend;
    use crate::models::{ProjectType, SessionUser};
    use regex::Regex;

    fn config() -> ShowcaseConfig {
        ShowcaseConfig::default().with_pacing(Duration::ZERO)
    }

    fn session() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            user: SessionUser {
                id: "user-1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        }
    }

    fn filled_form() -> DraftForm {
        let mut form = DraftForm::default();
        form.open();
        form.title = "Portfolio".to_string();
        form.description = "Personal site".to_string();
        form.url = "https://example.com".to_string();
        form.tags = "React, , TypeScript ,UI/UX".to_string();
        form
    }

    #[tokio::test]
    async fn test_submit_without_session_touches_nothing() {
        let backend = MemoryBackend::new();
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());

        let res = submitter.submit(None, &filled_form().snapshot()).await;

        assert_eq!(res, Err(SubmitError::AuthRequired));
        assert_eq!(backend.upload_calls(), 0);
        assert_eq!(backend.insert_calls(), 0);
        assert_eq!(
            SubmitError::AuthRequired.notice().description,
            "You must be logged in to add a project"
        );
    }

    #[tokio::test]
    async fn test_submit_without_image() {
        let backend = MemoryBackend::new();
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());

        let new = submitter
            .submit(Some(&session()), &filled_form().snapshot())
            .await
            .unwrap();

        assert!(new.is_new_project);
        assert_eq!(new.project.title, "Portfolio");
        assert_eq!(new.project.tags, vec!["React", "TypeScript", "UI/UX"]);
        assert_eq!(new.project.category, ProjectType::Website);
        assert!(new.project.image_url.is_none());
        assert_eq!(backend.upload_calls(), 0);

        let rows = backend.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].image_url.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_submit_uploads_under_user_namespace() {
        let backend = MemoryBackend::new();
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());
        let mut form = filled_form();
        form.select_image(ImagePayload::png("cover.png", vec![1, 2, 3]));

        let new = submitter.submit(Some(&session()), &form.snapshot()).await.unwrap();

        let keys = backend.object_keys();
        assert_eq!(keys.len(), 1);
        let pattern = Regex::new(r"^project-images/user-1/[a-z0-9]{11}-\d+\.png$").unwrap();
        assert!(pattern.is_match(&keys[0]), "unexpected key {}", keys[0]);

        let path = keys[0].trim_start_matches("project-images/");
        let stored = backend.object("project-images", path).unwrap();
        assert_eq!(stored.options.cache_control_secs, 3600);
        assert!(!stored.options.upsert);
        assert_eq!(
            new.project.image_url,
            Some(format!("memory://{}", keys[0]))
        );
    }

    #[tokio::test]
    async fn test_failed_upload_never_inserts() {
        let backend = MemoryBackend::new().failing_uploads(BackendError::Http {
            status: 413,
            message: "Payload too large".to_string(),
        });
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());
        let mut form = filled_form();
        form.select_image(ImagePayload::png("cover.png", vec![1]));

        let err = submitter
            .submit(Some(&session()), &form.snapshot())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::UploadFailed(_)));
        assert_eq!(err.notice().description, "Payload too large");
        assert_eq!(backend.upload_calls(), 1);
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_reports_persist_failure() {
        let backend = MemoryBackend::new()
            .failing_inserts(BackendError::Transport("connection reset".to_string()));
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());

        let err = submitter
            .submit(Some(&session()), &filled_form().snapshot())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::PersistFailed(_)));
        assert!(backend.rows().is_empty());
    }

    #[tokio::test]
    async fn test_blank_required_field_is_rejected() {
        let backend = MemoryBackend::new();
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config());
        let mut form = filled_form();
        form.url = "   ".to_string();

        let err = submitter
            .submit(Some(&session()), &form.snapshot())
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::MissingField("URL"));
        assert_eq!(backend.insert_calls(), 0);
    }

    #[test]
    fn test_empty_backend_message_uses_fallback() {
        let err = SubmitError::PersistFailed(BackendError::Http {
            status: 500,
            message: String::new(),
        });
        assert_eq!(err.notice().description, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_pacing_delays_completion() {
        let backend = MemoryBackend::new();
        let config = ShowcaseConfig::default().with_pacing(Duration::from_millis(20));
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config);

        let started = std::time::Instant::now();
        submitter
            .submit(Some(&session()), &filled_form().snapshot())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
