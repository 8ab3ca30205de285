//! Plain HTTP image fetching for previews.

use showcase::{BackendError, Fetched, ImageFetcher};

use crate::client::transport;

#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    http: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched, BackendError> {
        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Ok(Fetched::Status(status.as_u16()));
        }
        let bytes = response.bytes().await.map_err(transport)?;
        Ok(Fetched::Ok(bytes.to_vec()))
    }
}
