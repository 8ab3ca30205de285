//! Draft state of the add-project dialog.
//!
//! [`DraftForm`] owns every controlled field plus the image, preview, loading
//! and open flags. Each open/close of the dialog starts a new generation;
//! preview results computed for an older generation are dropped in
//! [`DraftForm::apply_preview`], so a fetch that finishes after the dialog
//! closed cannot write into the next draft.

use crate::image::ImagePayload;
use crate::models::{NewProject, ProjectType, UnknownProjectType};
use crate::notice::Notice;
use crate::preview::{PreviewFailure, PreviewOutcome, PreviewRequest};
use crate::submit::SubmitError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftForm {
    pub title: String,
    pub description: String,
    pub kind: ProjectType,
    pub url: String,
    /// Raw comma-separated tag input.
    pub tags: String,
    pub image: Option<ImagePayload>,
    /// Renderable source for the image preview.
    pub preview: Option<String>,
    pub loading: bool,
    pub is_open: bool,
    generation: u64,
}

/// The fields a submission reads, detached from the live form.
#[derive(Clone, Debug, PartialEq)]
pub struct DraftSnapshot {
    pub title: String,
    pub description: String,
    pub kind: ProjectType,
    pub url: String,
    pub tags: String,
    pub image: Option<ImagePayload>,
}

impl DraftSnapshot {
    /// Title, description and URL must be non-blank.
    pub fn validate(&self) -> Result<(), SubmitError> {
        for (name, value) in [
            ("Title", &self.title),
            ("Description", &self.description),
            ("URL", &self.url),
        ] {
            if value.trim().is_empty() {
                return Err(SubmitError::MissingField(name));
            }
        }
        Ok(())
    }
}

impl DraftForm {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.generation += 1;
    }

    /// Close the dialog and discard the draft. An in-flight submission keeps
    /// running; its result still reaches [`DraftForm::finish_submit`], which
    /// leaves any later draft alone.
    pub fn close(&mut self) {
        self.is_open = false;
        self.generation += 1;
        self.reset();
    }

    /// Clear every field and the image state. Flags are left alone.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.kind = ProjectType::default();
        self.url.clear();
        self.tags.clear();
        self.image = None;
        self.preview = None;
    }

    pub fn set_kind(&mut self, value: &str) -> Result<(), UnknownProjectType> {
        self.kind = value.parse()?;
        Ok(())
    }

    /// A file chosen by the user. Replaces whatever image was there.
    pub fn select_image(&mut self, payload: ImagePayload) {
        self.preview = Some(payload.data_url());
        self.image = Some(payload);
    }

    pub fn preview_request(&self, signed_in: bool) -> PreviewRequest {
        PreviewRequest {
            url: self.url.clone(),
            kind: self.kind,
            has_image: self.image.is_some(),
            signed_in,
        }
    }

    /// Apply a preview result computed for `generation`. Returns a notice when
    /// the user should hear about it.
    pub fn apply_preview(&mut self, generation: u64, outcome: PreviewOutcome) -> Option<Notice> {
        if generation != self.generation {
            tracing::debug!("Dropping preview for closed dialog generation {}", generation);
            return None;
        }

        match outcome {
            PreviewOutcome::None => None,
            PreviewOutcome::Resolved(preview) => {
                if preview.overwrite.allows(self.image.is_some()) {
                    self.preview = Some(preview.display);
                    self.image = Some(preview.payload);
                }
                None
            }
            PreviewOutcome::Failed(PreviewFailure::Unavailable) => Some(Notice::preview_unavailable()),
            PreviewOutcome::Failed(PreviewFailure::Fetch(reason)) => {
                tracing::warn!("Error loading preview: {}", reason);
                None
            }
        }
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            url: self.url.clone(),
            tags: self.tags.clone(),
            image: self.image.clone(),
        }
    }

    /// Mark a submission as started, returning the generation it belongs to
    /// with the fields to submit. Refused while one is in flight.
    pub fn begin_submit(&mut self) -> Result<(u64, DraftSnapshot), SubmitError> {
        if self.loading {
            return Err(SubmitError::AlreadySubmitting);
        }
        self.loading = true;
        Ok((self.generation, self.snapshot()))
    }

    /// Record the result of the submission started in `generation`. Success
    /// closes and resets the dialog if it is still the one that submitted;
    /// failure keeps the draft for another attempt. The result is handed back
    /// unchanged either way.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        result: Result<NewProject, SubmitError>,
    ) -> Result<NewProject, SubmitError> {
        self.loading = false;
        if result.is_ok() && generation == self.generation {
            self.close();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShowcaseConfig;
    use crate::memory::MemoryBackend;
    use crate::models::{Session, SessionUser};
    use crate::preview::{OverwritePolicy, PreviewSource, ResolvedPreview};
    use crate::submit::ProjectSubmitter;
    use std::time::Duration;

    fn resolved(source: PreviewSource, overwrite: OverwritePolicy) -> PreviewOutcome {
        PreviewOutcome::Resolved(ResolvedPreview {
            source,
            display: "https://img.example/preview.png".to_string(),
            payload: ImagePayload::png("preview.png", vec![7]),
            overwrite,
        })
    }

    fn filled() -> DraftForm {
        let mut form = DraftForm::default();
        form.open();
        form.title = "Landing".to_string();
        form.description = "Landing page".to_string();
        form.url = "https://example.com".to_string();
        form.tags = "Rust".to_string();
        form
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled();
        form.set_kind("figma").unwrap();
        form.select_image(ImagePayload::png("a.png", vec![1]));

        form.reset();

        assert_eq!(form.title, "");
        assert_eq!(form.kind, ProjectType::Website);
        assert!(form.image.is_none());
        assert!(form.preview.is_none());
        assert!(form.is_open);
    }

    #[test]
    fn test_set_kind_rejects_unknown_values() {
        let mut form = DraftForm::default();
        assert!(form.set_kind("dribbble").is_err());
        assert_eq!(form.kind, ProjectType::Website);
        form.set_kind("other").unwrap();
        assert_eq!(form.kind, ProjectType::Other);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut form = filled();
        let generation = form.generation();
        form.close();
        form.open();

        let notice = form.apply_preview(generation, resolved(PreviewSource::Figma, OverwritePolicy::Always));

        assert!(notice.is_none());
        assert!(form.image.is_none());
    }

    #[test]
    fn test_if_empty_keeps_manual_image() {
        let mut form = filled();
        form.select_image(ImagePayload::png("mine.png", vec![1]));
        let generation = form.generation();

        form.apply_preview(generation, resolved(PreviewSource::Dribbble, OverwritePolicy::IfEmpty));

        assert_eq!(form.image.as_ref().unwrap().file_name, "mine.png");
        assert!(form.preview.as_ref().unwrap().starts_with("data:"));
    }

    #[test]
    fn test_always_replaces_manual_image() {
        let mut form = filled();
        form.select_image(ImagePayload::png("mine.png", vec![1]));
        let generation = form.generation();

        form.apply_preview(generation, resolved(PreviewSource::Figma, OverwritePolicy::Always));

        assert_eq!(form.image.as_ref().unwrap().file_name, "preview.png");
        assert_eq!(form.preview.as_deref(), Some("https://img.example/preview.png"));
    }

    #[test]
    fn test_unavailable_preview_raises_notice_only() {
        let mut form = filled();
        let generation = form.generation();

        let notice = form.apply_preview(generation, PreviewOutcome::Failed(PreviewFailure::Unavailable));
        assert_eq!(notice.unwrap().title, "Preview not available");

        let notice = form.apply_preview(
            generation,
            PreviewOutcome::Failed(PreviewFailure::Fetch("timeout".to_string())),
        );
        assert!(notice.is_none());
        assert!(form.image.is_none());
    }

    #[test]
    fn test_second_submit_is_refused_while_loading() {
        let mut form = filled();
        let (generation, _) = form.begin_submit().unwrap();
        assert_eq!(generation, form.generation());
        assert_eq!(form.begin_submit(), Err(SubmitError::AlreadySubmitting));
    }

    #[tokio::test]
    async fn test_success_calls_back_once_and_resets() {
        let backend = MemoryBackend::new();
        let config = ShowcaseConfig::default().with_pacing(Duration::ZERO);
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config);
        let session = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            user: SessionUser {
                id: "u1".to_string(),
                email: None,
            },
        };
        let mut form = filled();
        let mut delivered = Vec::new();

        let (generation, snapshot) = form.begin_submit().unwrap();
        let result = submitter.submit(Some(&session), &snapshot).await;
        if let Ok(new) = form.finish_submit(generation, result) {
            delivered.push(new);
        }

        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].is_new_project);
        assert!(!form.is_open);
        assert!(!form.loading);
        assert_eq!(form.title, "");
        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_open() {
        let backend = MemoryBackend::new();
        let config = ShowcaseConfig::default().with_pacing(Duration::ZERO);
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config);
        let mut form = filled();

        let (generation, snapshot) = form.begin_submit().unwrap();
        let result = submitter.submit(None, &snapshot).await;
        let result = form.finish_submit(generation, result);

        assert_eq!(result, Err(SubmitError::AuthRequired));
        assert!(form.is_open);
        assert!(!form.loading);
        assert_eq!(form.title, "Landing");
        assert_eq!(backend.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_late_success_leaves_reopened_draft_alone() {
        let backend = MemoryBackend::new();
        let config = ShowcaseConfig::default().with_pacing(Duration::ZERO);
        let submitter = ProjectSubmitter::new(backend.clone(), backend.clone(), &config);
        let session = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            user: SessionUser {
                id: "u1".to_string(),
                email: None,
            },
        };
        let mut form = filled();

        let (generation, snapshot) = form.begin_submit().unwrap();
        form.close();
        form.open();
        form.title = "Second draft".to_string();
        let reopened = form.generation();

        let result = submitter.submit(Some(&session), &snapshot).await;
        let delivered = form.finish_submit(generation, result).unwrap();

        assert_eq!(delivered.project.title, "Landing");
        assert!(form.is_open);
        assert!(!form.loading);
        assert_eq!(form.title, "Second draft");
        assert_eq!(form.generation(), reopened);
    }
}
