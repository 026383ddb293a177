pub use auth::AuthClient;

/// Auth client.
mod auth;
