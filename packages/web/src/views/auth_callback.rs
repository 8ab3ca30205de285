use dioxus::prelude::*;

use ui::session::{save_session, take_verifier};
use ui::use_services;

use crate::Route;

/// Landing route for the OAuth redirect. Exchanges `code` for a session and
/// returns to the showcase.
#[component]
pub fn AuthCallback(code: String) -> Element {
    let services = use_services();
    let nav = use_navigator();

    let _ = use_resource(move || {
        let code = code.clone();
        let client = services.client.clone();
        async move {
            match take_verifier() {
                Some(verifier) if !code.is_empty() => {
                    match client.exchange_code(&code, &verifier).await {
                        Ok(session) => save_session(&session),
                        Err(e) => tracing::error!("Sign-in failed: {}", e),
                    }
                }
                Some(_) => tracing::error!("Auth callback missing code"),
                None => tracing::error!("Auth callback without a pending sign-in"),
            }
            nav.replace(Route::Home {});
        }
    });

    rsx! {
        p { class: "empty-state", "Signing you in..." }
    }
}
