//! # Client configuration: `showcase.toml`
//!
//! Defines the TOML configuration bundled with the web crate. It controls where
//! images are uploaded, how long a successful submission lingers before the
//! dialog closes, and how preview resolution treats an already-selected image.
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! bucket = "project-images"
//! cache_control_secs = 3600
//!
//! [submit]
//! pacing_ms = 2000            # 0 closes the dialog immediately
//!
//! [preview]
//! figma_overwrite = "always"
//! dribbble_overwrite = "if_empty"
//! dribbble_image_template = "https://cdn.dribbble.com/shots/{id}/preview.png"
//! ```
//!
//! Every section and field has a default, so a missing or empty file is
//! equivalent to [`ShowcaseConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::UploadOptions;
use crate::preview::{OverwritePolicy, PreviewSettings};

/// Top-level configuration stored in `showcase.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// Object storage settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_cache_control")]
    pub cache_control_secs: u32,
}

fn default_bucket() -> String {
    "project-images".to_string()
}

fn default_cache_control() -> u32 {
    3600
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            cache_control_secs: default_cache_control(),
        }
    }
}

/// Submission settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Pause between a committed insert and closing the dialog.
    #[serde(default = "default_pacing")]
    pub pacing_ms: u64,
}

fn default_pacing() -> u64 {
    2000
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing(),
        }
    }
}

/// Preview resolution settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_figma_overwrite")]
    pub figma_overwrite: OverwritePolicy,
    #[serde(default = "default_dribbble_overwrite")]
    pub dribbble_overwrite: OverwritePolicy,
    /// Direct image URL for a Dribbble shot; `{id}` is replaced by the shot id.
    #[serde(default = "default_dribbble_template")]
    pub dribbble_image_template: String,
}

fn default_figma_overwrite() -> OverwritePolicy {
    OverwritePolicy::Always
}

fn default_dribbble_overwrite() -> OverwritePolicy {
    OverwritePolicy::IfEmpty
}

fn default_dribbble_template() -> String {
    "https://cdn.dribbble.com/shots/{id}/preview.png".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            figma_overwrite: default_figma_overwrite(),
            dribbble_overwrite: default_dribbble_overwrite(),
            dribbble_image_template: default_dribbble_template(),
        }
    }
}

impl ShowcaseConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "showcase.toml"
    }

    /// Builder method to set the post-commit pacing.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.submit.pacing_ms = pacing.as_millis() as u64;
        self
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.submit.pacing_ms)
    }

    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            cache_control_secs: self.storage.cache_control_secs,
            upsert: false,
        }
    }

    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            figma_overwrite: self.preview.figma_overwrite,
            dribbble_overwrite: self.preview.dribbble_overwrite,
            dribbble_image_template: self.preview.dribbble_image_template.clone(),
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
