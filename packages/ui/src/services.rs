use api::{HttpImageFetcher, SupabaseClient};
use dioxus::prelude::*;
use showcase::ShowcaseConfig;

/// Backend handles and settings shared through context by the showcase views.
#[derive(Clone)]
pub struct ShowcaseServices {
    pub client: SupabaseClient,
    pub fetcher: HttpImageFetcher,
    pub config: ShowcaseConfig,
}

impl ShowcaseServices {
    pub fn new(client: SupabaseClient, config: ShowcaseConfig) -> Self {
        Self {
            client,
            fetcher: HttpImageFetcher::new(),
            config,
        }
    }
}

pub fn use_services() -> ShowcaseServices {
    use_context::<ShowcaseServices>()
}
