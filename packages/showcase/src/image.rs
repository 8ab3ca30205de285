//! Image payloads and their storage paths.

use base64::Engine;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random token in generated storage paths.
pub const TOKEN_LEN: usize = 11;

/// An image waiting to be uploaded: a user-selected file or a fetched preview.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// A PNG payload, used for fetched previews.
    pub fn png(file_name: &str, bytes: Vec<u8>) -> Self {
        Self::new(file_name, "image/png", bytes)
    }

    /// Extension used for the storage path: text after the last dot of the
    /// file name, else the MIME subtype, else `bin`.
    pub fn extension(&self) -> String {
        if let Some((_, ext)) = self.file_name.rsplit_once('.') {
            if !ext.is_empty() {
                return ext.to_ascii_lowercase();
            }
        }
        self.content_type
            .split_once('/')
            .map(|(_, sub)| sub.split(['+', ';']).next().unwrap_or(sub).trim().to_string())
            .filter(|sub| !sub.is_empty())
            .unwrap_or_else(|| "bin".to_string())
    }

    /// Inline `data:` URL for previewing the payload before upload.
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.content_type, encoded)
    }
}

/// Build `{user_id}/{token}-{millis}.{ext}` with a lowercase alphanumeric token.
pub fn storage_path<R: Rng + ?Sized>(
    user_id: &str,
    payload: &ImagePayload,
    timestamp_millis: i64,
    rng: &mut R,
) -> String {
    let token: String = rng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{user_id}/{token}-{timestamp_millis}.{}", payload.extension())
}

/// [`storage_path`] with the thread RNG and the current time.
pub fn new_storage_path(user_id: &str, payload: &ImagePayload) -> String {
    storage_path(
        user_id,
        payload,
        chrono::Utc::now().timestamp_millis(),
        &mut rand::thread_rng(),
    )
}
