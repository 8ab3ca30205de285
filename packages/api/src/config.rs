//! Supabase project configuration from environment variables.

use crate::error::ApiError;

/// Where the hosted backend lives and how the client identifies itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
    /// OAuth redirect target when there is no browser origin to derive it from.
    pub redirect_url: Option<String>,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            redirect_url: None,
        }
    }

    /// Read `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `AUTH_REDIRECT_URI`.
    ///
    /// Native builds load `.env` first and read the process environment. Wasm
    /// builds have no environment at runtime and use the values baked in at
    /// compile time.
    pub fn from_env() -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        dotenvy::dotenv().ok();

        let url = lookup("SUPABASE_URL", option_env!("SUPABASE_URL"))
            .ok_or(ApiError::MissingConfig("SUPABASE_URL"))?;
        let anon_key = lookup("SUPABASE_ANON_KEY", option_env!("SUPABASE_ANON_KEY"))
            .ok_or(ApiError::MissingConfig("SUPABASE_ANON_KEY"))?;

        reqwest::Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;

        let mut config = Self::new(url, anon_key);
        config.redirect_url = lookup("AUTH_REDIRECT_URI", option_env!("AUTH_REDIRECT_URI"));
        Ok(config)
    }
}

fn lookup(key: &str, baked: Option<&'static str>) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = SupabaseConfig::new("https://abcd.supabase.co/", "anon");
        assert_eq!(config.url, "https://abcd.supabase.co");
        assert!(config.redirect_url.is_none());
    }
}
