//! This crate contains all shared UI for the showcase.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaGithub;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const SHOWCASE_CSS: Asset = asset!("/assets/showcase.css");

mod services;
pub use services::{use_services, ShowcaseServices};

pub mod session;
pub use session::{use_session_state, SessionState};

mod auth_button;
pub use auth_button::AuthButton;

mod header;
pub use header::Header;

mod add_project_dialog;
pub use add_project_dialog::AddProjectDialog;

mod project_grid;
pub use project_grid::ProjectGrid;
