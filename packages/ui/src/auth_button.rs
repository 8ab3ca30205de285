use api::OAuthProvider;
use dioxus::prelude::*;
use showcase::Session;

use crate::components::{Button, ButtonVariant};
use crate::icons::{FaGithub, FaRightFromBracket};
use crate::services::use_services;
use crate::session::{clear_session, save_verifier};
use crate::Icon;

const CALLBACK_PATH: &str = "/auth/callback";

/// Sign-in button when signed out; the user's email and a sign-out button
/// when signed in.
#[component]
pub fn AuthButton(
    session: Option<Session>,
    #[props(default)] provider: OAuthProvider,
    on_sign_out: EventHandler<()>,
) -> Element {
    let services = use_services();
    let mut redirecting = use_signal(|| false);

    let Some(current) = session else {
        let client = services.client.clone();
        let sign_in = move |_| {
            redirecting.set(true);
            let redirect_to = callback_url(client.config().redirect_url.as_deref());
            match client.sign_in_url(provider, &redirect_to) {
                Ok(redirect) => {
                    save_verifier(&redirect.code_verifier);
                    open_url(&redirect.url);
                    if !leaves_page() {
                        redirecting.set(false);
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to build sign-in URL: {}", e);
                    redirecting.set(false);
                }
            }
        };

        return rsx! {
            Button {
                variant: ButtonVariant::Outline,
                disabled: redirecting(),
                onclick: sign_in,
                Icon { icon: FaGithub, width: 16, height: 16 }
                if redirecting() {
                    "Redirecting..."
                } else {
                    "Sign in with {provider.label()}"
                }
            }
        };
    };

    let email = current.user.display_name().to_string();
    let sign_out = move |_| {
        let client = services.client.authorized(&current);
        spawn(async move {
            if let Err(e) = client.sign_out().await {
                tracing::warn!("Sign-out request failed: {}", e);
            }
            clear_session();
            on_sign_out.call(());
        });
    };

    rsx! {
        div {
            class: "auth-status",
            span { class: "auth-email", "{email}" }
            Button {
                variant: ButtonVariant::Ghost,
                onclick: sign_out,
                Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                "Sign Out"
            }
        }
    }
}

/// Where Supabase should send the browser after sign-in.
fn callback_url(configured: Option<&str>) -> String {
    if let Some(url) = configured {
        return url.to_string();
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return format!("{origin}{CALLBACK_PATH}");
        }
    }

    format!("http://localhost:8080{CALLBACK_PATH}")
}

/// Whether opening the sign-in URL navigates away from this page. Native
/// builds hand it to the system browser and stay put.
fn leaves_page() -> bool {
    cfg!(target_arch = "wasm32")
}

fn open_url(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = open::that(url) {
            tracing::error!("Failed to open browser: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_callback_wins() {
        assert_eq!(
            callback_url(Some("https://showcase.example/auth/callback")),
            "https://showcase.example/auth/callback"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_callback_defaults_to_dev_server() {
        assert_eq!(callback_url(None), "http://localhost:8080/auth/callback");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_sign_in_stays_on_page() {
        assert!(!leaves_page());
    }
}
