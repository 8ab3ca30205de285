//! Supabase Storage adapter for project images.

use reqwest::Method;
use showcase::{BackendError, ImagePayload, ObjectStorage, UploadOptions};

use crate::client::{check, transport, SupabaseClient};

impl SupabaseClient {
    fn object_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/{bucket}/{path}"))
    }
}

impl ObjectStorage for SupabaseClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        payload: &ImagePayload,
        options: &UploadOptions,
    ) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, &self.object_url(bucket, path))
            .header("cache-control", format!("max-age={}", options.cache_control_secs))
            .header("x-upsert", options.upsert.to_string())
            .header("content-type", &payload.content_type)
            .body(payload.bytes.clone())
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}
