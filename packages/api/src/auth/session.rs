//! Keys under which the client persists its auth state.

/// Key for the serialized [`showcase::Session`].
pub const SESSION_STORAGE_KEY: &str = "showcase.session";

/// Key for the PKCE verifier kept between the redirect and the callback.
pub const PKCE_VERIFIER_KEY: &str = "showcase.pkce_verifier";
