//! OAuth sign-in and session handling against Supabase Auth.

mod oauth;
mod session;

pub use oauth::{OAuthProvider, SignInRedirect};
pub use session::{PKCE_VERIFIER_KEY, SESSION_STORAGE_KEY};
