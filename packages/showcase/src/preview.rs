//! # Preview resolution for design-tool links
//!
//! When a project URL points at a Figma file or a Dribbble shot, the dialog can
//! fill in a preview image without the user picking a file. [`PreviewResolver`]
//! does that as an explicit computation: the caller builds a [`PreviewRequest`]
//! from the current `(url, type, has_image)` whenever one of them changes and
//! gets back a [`PreviewOutcome`].
//!
//! ## Sources
//!
//! | Type | URL shape | Preview | Payload |
//! |------|-----------|---------|---------|
//! | `figma` | `figma.com/{file,design,proto,board}/{key}` or `figma.com/community/file/{key}` | the thumbnail endpoint URL | `figma-preview.png` |
//! | `other` | `dribbble.com/shots/{id}-slug` | `data:` URL of the fetched bytes | `dribbble-preview.png` |
//!
//! The Figma thumbnail endpoint only answers for signed-in users with access to
//! the file, so that source is skipped without a session.
//!
//! ## Overwrite policy
//!
//! Each source carries an [`OverwritePolicy`]. `IfEmpty` sources do not fetch
//! at all while an image is selected, which makes repeated resolution with
//! unchanged inputs a no-op. `Always` sources refetch and replace the image.
//! The defaults (Figma `Always`, Dribbble `IfEmpty`) keep the behavior users
//! already know.
//!
//! ## Failures
//!
//! A Figma thumbnail that answers with a non-OK status becomes
//! [`PreviewFailure::Unavailable`], which the dialog shows as a notice.
//! Everything else ([`PreviewFailure::Fetch`]) is logged and otherwise ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::backend::{Fetched, ImageFetcher};
use crate::image::ImagePayload;
use crate::models::ProjectType;

pub const FIGMA_PREVIEW_NAME: &str = "figma-preview.png";
pub const DRIBBBLE_PREVIEW_NAME: &str = "dribbble-preview.png";

static FIGMA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:[\w-]+\.)?figma\.com/(?:community/file|file|design|proto|board)/([0-9A-Za-z]+)",
    )
    .expect("figma pattern")
});

static DRIBBBLE_SHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?dribbble\.com/shots/(\d+)").expect("dribbble pattern")
});

pub fn is_figma_url(url: &str) -> bool {
    FIGMA_URL.is_match(url.trim())
}

/// File key of a Figma file, design, prototype or community link.
pub fn figma_file_key(url: &str) -> Option<&str> {
    FIGMA_URL
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Thumbnail endpoint for a Figma link; community files use their own form.
pub fn figma_thumbnail_url(url: &str, key: &str) -> String {
    if url.contains("community/file") {
        format!("https://www.figma.com/community/file/{key}/thumbnail")
    } else {
        format!("https://www.figma.com/file/{key}/thumbnail?ver=thumbnail")
    }
}

pub fn is_dribbble_url(url: &str) -> bool {
    DRIBBBLE_SHOT.is_match(url.trim())
}

/// Direct image URL for a Dribbble shot, built from `template`.
pub fn dribbble_image_url(url: &str, template: &str) -> Option<String> {
    let id = DRIBBBLE_SHOT.captures(url.trim())?.get(1)?.as_str();
    Some(template.replace("{id}", id))
}

/// Whether a resolved preview may replace an image that is already selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    Always,
    IfEmpty,
}

impl OverwritePolicy {
    pub fn allows(&self, has_image: bool) -> bool {
        match self {
            OverwritePolicy::Always => true,
            OverwritePolicy::IfEmpty => !has_image,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewSettings {
    pub figma_overwrite: OverwritePolicy,
    pub dribbble_overwrite: OverwritePolicy,
    pub dribbble_image_template: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        crate::config::ShowcaseConfig::default().preview_settings()
    }
}

/// Inputs that preview resolution is keyed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewRequest {
    pub url: String,
    pub kind: ProjectType,
    pub has_image: bool,
    pub signed_in: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSource {
    Figma,
    Dribbble,
}

/// A preview ready to be applied to the draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPreview {
    pub source: PreviewSource,
    /// Renderable image source: a remote URL or a `data:` URL.
    pub display: String,
    pub payload: ImagePayload,
    pub overwrite: OverwritePolicy,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PreviewFailure {
    #[error("preview not available")]
    Unavailable,
    #[error("preview fetch failed: {0}")]
    Fetch(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewOutcome {
    None,
    Resolved(ResolvedPreview),
    Failed(PreviewFailure),
}

/// Resolves previews through an [`ImageFetcher`].
pub struct PreviewResolver<F: ImageFetcher> {
    fetcher: F,
    settings: PreviewSettings,
}

impl<F: ImageFetcher> PreviewResolver<F> {
    pub fn new(fetcher: F, settings: PreviewSettings) -> Self {
        Self { fetcher, settings }
    }

    pub async fn resolve(&self, request: &PreviewRequest) -> PreviewOutcome {
        let url = request.url.trim();
        if url.is_empty() {
            return PreviewOutcome::None;
        }

        match request.kind {
            ProjectType::Figma if is_figma_url(url) => self.resolve_figma(url, request).await,
            ProjectType::Other if is_dribbble_url(url) => self.resolve_dribbble(url, request).await,
            _ => PreviewOutcome::None,
        }
    }

    async fn resolve_figma(&self, url: &str, request: &PreviewRequest) -> PreviewOutcome {
        let Some(key) = figma_file_key(url) else {
            return PreviewOutcome::None;
        };
        let policy = self.settings.figma_overwrite;
        if !request.signed_in || !policy.allows(request.has_image) {
            return PreviewOutcome::None;
        }

        let thumbnail = figma_thumbnail_url(url, key);
        match self.fetcher.fetch(&thumbnail).await {
            Ok(Fetched::Ok(bytes)) => PreviewOutcome::Resolved(ResolvedPreview {
                source: PreviewSource::Figma,
                display: thumbnail,
                payload: ImagePayload::png(FIGMA_PREVIEW_NAME, bytes),
                overwrite: policy,
            }),
            Ok(Fetched::Status(status)) => {
                tracing::info!("Figma thumbnail {} answered {}", thumbnail, status);
                PreviewOutcome::Failed(PreviewFailure::Unavailable)
            }
            Err(e) => PreviewOutcome::Failed(PreviewFailure::Fetch(e.to_string())),
        }
    }

    async fn resolve_dribbble(&self, url: &str, request: &PreviewRequest) -> PreviewOutcome {
        let Some(image_url) = dribbble_image_url(url, &self.settings.dribbble_image_template) else {
            return PreviewOutcome::None;
        };
        let policy = self.settings.dribbble_overwrite;
        if !policy.allows(request.has_image) {
            return PreviewOutcome::None;
        }

        match self.fetcher.fetch(&image_url).await {
            Ok(Fetched::Ok(bytes)) => {
                let payload = ImagePayload::png(DRIBBBLE_PREVIEW_NAME, bytes);
                PreviewOutcome::Resolved(ResolvedPreview {
                    source: PreviewSource::Dribbble,
                    display: payload.data_url(),
                    payload,
                    overwrite: policy,
                })
            }
            Ok(Fetched::Status(status)) => {
                PreviewOutcome::Failed(PreviewFailure::Fetch(format!("{image_url} answered {status}")))
            }
            Err(e) => PreviewOutcome::Failed(PreviewFailure::Fetch(e.to_string())),
        }
    }
}
