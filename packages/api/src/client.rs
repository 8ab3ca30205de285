//! Shared HTTP plumbing for the Supabase endpoints.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use showcase::{BackendError, Session};

use crate::config::SupabaseConfig;

/// HTTP client for one Supabase project.
///
/// Requests carry the anon key; [`SupabaseClient::authorized`] returns a copy
/// that also sends the session's bearer token so row-level security sees the
/// signed-in user.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
            access_token: None,
        }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// A client that acts as the session's user.
    pub fn authorized(&self, session: &Session) -> Self {
        Self {
            access_token: Some(session.access_token.clone()),
            ..self.clone()
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }
}

pub(crate) fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

/// Pass successful responses through; turn the rest into [`BackendError::Http`].
pub(crate) async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Http {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Message from a Storage, PostgREST or GoTrue error body.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
        {
            return message;
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("request failed with status {status}")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(
            error_message(400, r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#),
            "The resource already exists"
        );
        assert_eq!(
            error_message(400, r#"{"code":400,"msg":"invalid flow state"}"#),
            "invalid flow state"
        );
        assert_eq!(error_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(500, ""), "request failed with status 500");
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = SupabaseClient::new(SupabaseConfig::new("https://abcd.supabase.co/", "anon"));
        assert_eq!(
            client.endpoint("/rest/v1/projects"),
            "https://abcd.supabase.co/rest/v1/projects"
        );
        assert!(!client.is_authorized());
    }
}
