pub use quarkapi::{
    AuthDisableResponse, AuthEnableResponse, AuthStatusResponse, AuthenticateResponse,
};

/// Request for `Authenticate`
#[derive(Debug, PartialEq)]
pub struct AuthenticateRequest {
    /// Inner request
    pub(crate) inner: quarkapi::AuthenticateRequest,
}

impl AuthenticateRequest {
    /// Creates a new `AuthenticateRequest`.
    ///
    /// `user_name` is the name of the user to authenticate,
    /// `user_password` is its password.
    #[inline]
    pub fn new(user_name: impl Into<String>, user_password: impl Into<String>) -> Self {
        Self {
            inner: quarkapi::AuthenticateRequest {
                name: user_name.into(),
                password: user_password.into(),
            },
        }
    }
}
