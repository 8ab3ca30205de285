//! Session state for the UI.
//!
//! The signed-in [`Session`] is kept between visits: in `localStorage` on the
//! web, and as small files under the user's data directory on native targets.
//! The PKCE verifier for a pending sign-in is stored the same way until the
//! callback route consumes it.

use api::auth::{PKCE_VERIFIER_KEY, SESSION_STORAGE_KEY};
use api::{ApiError, SupabaseClient};
use dioxus::prelude::*;
use showcase::{BackendError, Session};

use crate::services::use_services;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn signed_out() -> Self {
        Self {
            session: None,
            loading: false,
        }
    }
}

/// Load the stored session once and revalidate it against Supabase Auth.
pub fn use_session_state() -> Signal<SessionState> {
    let services = use_services();
    let mut state = use_signal(SessionState::default);

    let _ = use_resource(move || {
        let client = services.client.clone();
        async move {
            let session = match load_session() {
                Some(stored) => revalidate(&client, stored).await,
                None => None,
            };
            state.set(SessionState {
                session,
                loading: false,
            });
        }
    });

    state
}

async fn revalidate(client: &SupabaseClient, stored: Session) -> Option<Session> {
    match client.authorized(&stored).current_user().await {
        Ok(user) => Some(Session { user, ..stored }),
        Err(e) if is_expired(&e) => refresh(client, &stored).await,
        Err(e) => {
            tracing::warn!("Could not revalidate session: {}", e);
            Some(stored)
        }
    }
}

/// Trade the stored refresh token for a new session, or sign out.
async fn refresh(client: &SupabaseClient, stored: &Session) -> Option<Session> {
    let Some(refresh_token) = stored.refresh_token.as_deref() else {
        tracing::info!("Stored session expired, signing out");
        clear_session();
        return None;
    };

    match client.refresh_session(refresh_token).await {
        Ok(session) => {
            save_session(&session);
            Some(session)
        }
        Err(e) => {
            tracing::info!("Session refresh failed, signing out: {}", e);
            clear_session();
            None
        }
    }
}

fn is_expired(error: &ApiError) -> bool {
    matches!(
        error,
        ApiError::Backend(BackendError::Http { status: 401 | 403, .. })
    )
}

pub fn save_session(session: &Session) {
    match serde_json::to_string(session) {
        Ok(json) => store_value(SESSION_STORAGE_KEY, &json),
        Err(e) => tracing::error!("Failed to encode session: {}", e),
    }
}

pub fn load_session() -> Option<Session> {
    let json = load_value(SESSION_STORAGE_KEY)?;
    match serde_json::from_str(&json) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Discarding unreadable session: {}", e);
            clear_session();
            None
        }
    }
}

pub fn clear_session() {
    remove_value(SESSION_STORAGE_KEY);
}

pub fn save_verifier(verifier: &str) {
    store_value(PKCE_VERIFIER_KEY, verifier);
}

/// The pending PKCE verifier, removed from storage as it is read.
pub fn take_verifier() -> Option<String> {
    let verifier = load_value(PKCE_VERIFIER_KEY);
    remove_value(PKCE_VERIFIER_KEY);
    verifier
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
fn store_value(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            tracing::error!("Failed to write {} to localStorage", key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_value(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_value(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn value_path(key: &str) -> Option<std::path::PathBuf> {
    Some(dirs::data_dir()?.join("showcase").join(key))
}

#[cfg(not(target_arch = "wasm32"))]
fn store_value(key: &str, value: &str) {
    let Some(path) = value_path(key) else {
        tracing::error!("No data directory to store {}", key);
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Failed to create {}: {}", parent.display(), e);
            return;
        }
    }
    if let Err(e) = std::fs::write(&path, value) {
        tracing::error!("Failed to write {}: {}", path.display(), e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_value(key: &str) -> Option<String> {
    std::fs::read_to_string(value_path(key)?).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_value(key: &str) {
    if let Some(path) = value_path(key) {
        let _ = std::fs::remove_file(path);
    }
}
