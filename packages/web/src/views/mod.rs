mod home;
pub use home::Home;

mod auth_callback;
pub use auth_callback::AuthCallback;
