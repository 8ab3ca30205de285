use api::{SupabaseClient, SupabaseConfig};
use dioxus::prelude::*;
use showcase::ShowcaseConfig;

use ui::components::ToastProvider;
use ui::ShowcaseServices;
use views::{AuthCallback, Home};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/auth/callback?:code")]
    AuthCallback { code: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const SHOWCASE_TOML: &str = include_str!("../showcase.toml");

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

fn load_services() -> ShowcaseServices {
    let config = ShowcaseConfig::from_toml(SHOWCASE_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}: {}, using defaults", ShowcaseConfig::filename(), e);
        ShowcaseConfig::default()
    });
    let supabase = SupabaseConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Supabase is not configured: {}", e);
        SupabaseConfig::new("http://localhost:54321", "")
    });
    ShowcaseServices::new(SupabaseClient::new(supabase), config)
}

#[component]
fn App() -> Element {
    use_context_provider(load_services);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::SHOWCASE_CSS }

        ToastProvider {
            Router::<Route> {}
        }
    }
}
