//! # OAuth sign-in through Supabase Auth
//!
//! Implements the Authorization Code flow with PKCE as Supabase Auth (GoTrue)
//! exposes it. The provider (GitHub) talks to Supabase, never to this client.
//!
//! ## Flow
//!
//! 1. **[`sign_in_url`](SupabaseClient::sign_in_url)** builds
//!    `/auth/v1/authorize` for the provider with a `redirect_to` target and a
//!    fresh S256 PKCE challenge. The caller keeps the returned verifier
//!    (under [`PKCE_VERIFIER_KEY`](super::PKCE_VERIFIER_KEY)) and sends the
//!    browser to the URL.
//!
//! 2. **[`exchange_code`](SupabaseClient::exchange_code)** is called from the
//!    `/auth/callback` route with the `code` query parameter. It posts the code
//!    and the stored verifier to `/auth/v1/token?grant_type=pkce` and returns
//!    the [`Session`].
//!
//! 3. **[`current_user`](SupabaseClient::current_user)** revalidates a stored
//!    session on load. When the access token has expired,
//!    **[`refresh_session`](SupabaseClient::refresh_session)** trades the
//!    refresh token for a new session. **[`sign_out`](SupabaseClient::sign_out)**
//!    revokes it.

use oauth2::PkceCodeChallenge;
use reqwest::{Method, Url};
use serde::Serialize;
use showcase::{Session, SessionUser};

use crate::client::{check, transport, SupabaseClient};
use crate::error::ApiError;

/// OAuth providers enabled for the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OAuthProvider {
    #[default]
    GitHub,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::GitHub => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::GitHub => "GitHub",
        }
    }
}

/// Where to send the browser, and the verifier to keep for the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRedirect {
    pub url: String,
    pub code_verifier: String,
}

#[derive(Serialize)]
struct PkceGrant<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

const TOKEN_PATH: &str = "/auth/v1/token";

impl SupabaseClient {
    /// Authorization URL with PKCE for `provider`, returning to `redirect_to`.
    pub fn sign_in_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<SignInRedirect, ApiError> {
        let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();

        let url = Url::parse_with_params(
            &self.endpoint("/auth/v1/authorize"),
            &[
                ("provider", provider.as_str()),
                ("redirect_to", redirect_to),
                ("code_challenge", challenge.as_str()),
                ("code_challenge_method", "s256"),
            ],
        )
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        Ok(SignInRedirect {
            url: url.to_string(),
            code_verifier: verifier.secret().clone(),
        })
    }

    /// Exchange the callback `code` and stored verifier for a session.
    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, ApiError> {
        let response = self
            .request(Method::POST, &self.token_url("pkce"))
            .json(&PkceGrant {
                auth_code: code,
                code_verifier,
            })
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        let session: Session = serde_json::from_str(&body).map_err(showcase::BackendError::from)?;

        tracing::info!("Signed in as {}", session.user.display_name());
        Ok(session)
    }

    /// Trade a refresh token for a fresh session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let response = self
            .request(Method::POST, &self.token_url("refresh_token"))
            .json(&RefreshGrant { refresh_token })
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        let session: Session = serde_json::from_str(&body).map_err(showcase::BackendError::from)?;

        tracing::info!("Refreshed session for {}", session.user.display_name());
        Ok(session)
    }

    fn token_url(&self, grant_type: &str) -> String {
        self.endpoint(&format!("{TOKEN_PATH}?grant_type={grant_type}"))
    }

    /// The user behind this client's bearer token.
    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        if !self.is_authorized() {
            return Err(ApiError::NotSignedIn);
        }
        let response = self
            .request(Method::GET, &self.endpoint("/auth/v1/user"))
            .send()
            .await
            .map_err(transport)?;
        let body = check(response).await?.text().await.map_err(transport)?;
        Ok(serde_json::from_str(&body).map_err(showcase::BackendError::from)?)
    }

    /// Revoke this client's session.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if !self.is_authorized() {
            return Err(ApiError::NotSignedIn);
        }
        let response = self
            .request(Method::POST, &self.endpoint("/auth/v1/logout"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupabaseConfig;

    fn client() -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig::new("https://abcd.supabase.co", "anon"))
    }

    #[test]
    fn test_sign_in_url_carries_pkce_challenge() {
        let redirect = client()
            .sign_in_url(OAuthProvider::GitHub, "http://localhost:8080/auth/callback")
            .unwrap();

        let url = Url::parse(&redirect.url).unwrap();
        assert_eq!(url.path(), "/auth/v1/authorize");
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["provider"], "github");
        assert_eq!(params["redirect_to"], "http://localhost:8080/auth/callback");
        assert_eq!(params["code_challenge_method"], "s256");
        assert!(!params["code_challenge"].is_empty());
        assert!(redirect.code_verifier.len() >= 43);
    }

    #[test]
    fn test_each_sign_in_gets_a_new_verifier() {
        let first = client().sign_in_url(OAuthProvider::GitHub, "http://x/").unwrap();
        let second = client().sign_in_url(OAuthProvider::GitHub, "http://x/").unwrap();
        assert_ne!(first.code_verifier, second.code_verifier);
    }

    #[test]
    fn test_token_response_decodes_to_session() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r1",
            "user": {"id": "8d6f", "email": "ada@example.com", "aud": "authenticated"}
        }"#;
        let session: Session = serde_json::from_str(body).unwrap();
        assert_eq!(session.user.id, "8d6f");
        assert_eq!(session.user.display_name(), "ada@example.com");
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn test_token_urls_per_grant() {
        let client = client();
        assert_eq!(
            client.token_url("pkce"),
            "https://abcd.supabase.co/auth/v1/token?grant_type=pkce"
        );
        assert_eq!(
            client.token_url("refresh_token"),
            "https://abcd.supabase.co/auth/v1/token?grant_type=refresh_token"
        );
        assert_eq!(
            serde_json::to_string(&RefreshGrant { refresh_token: "r1" }).unwrap(),
            r#"{"refresh_token":"r1"}"#
        );
    }

    #[tokio::test]
    async fn test_sign_out_requires_session() {
        assert_eq!(client().sign_out().await, Err(ApiError::NotSignedIn));
    }
}
