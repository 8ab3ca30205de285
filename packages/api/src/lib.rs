//! # API crate: Supabase adapters for the showcase
//!
//! Everything the showcase persists or authenticates goes through a hosted
//! Supabase project. This crate implements the `showcase` backend traits on top
//! of its HTTP endpoints so the domain code never sees a URL.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | GitHub OAuth through Supabase Auth with PKCE, sign-out, current user, persistence keys |
//! | [`config`] | [`SupabaseConfig`] from `SUPABASE_URL` / `SUPABASE_ANON_KEY` |
//! | `client` | [`SupabaseClient`]: shared headers, bearer tokens, error bodies |
//! | `storage` | [`showcase::ObjectStorage`] for Supabase Storage |
//! | `projects` | [`showcase::ProjectTable`] for the `projects` table via PostgREST |
//! | `fetch` | [`HttpImageFetcher`], the [`showcase::ImageFetcher`] used for previews |
//!
//! Every adapter reports failures as [`showcase::BackendError`]; configuration
//! and OAuth problems use [`ApiError`].

pub mod auth;
pub mod config;

mod client;
mod error;
mod fetch;
mod projects;
mod storage;

pub use auth::{OAuthProvider, SignInRedirect};
pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::ApiError;
pub use fetch::HttpImageFetcher;
