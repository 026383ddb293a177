use std::{future::Future, sync::Arc, time::Duration};

use quarkapi::{
    AuthDisableResponse, AuthEnableResponse, AuthStatusResponse, AuthenticateResponse,
};
use tonic::transport::Channel;

use crate::{
    error::{QuarkClientError, Result},
    types::auth::AuthenticateRequest,
    AuthService,
};

/// Client for Auth operations.
#[derive(Clone, Debug)]
pub struct AuthClient {
    /// The auth RPC client, only communicate with one server at a time
    inner: quarkapi::AuthClient<AuthService<Channel>>,
}

impl AuthClient {
    /// Creates a new `AuthClient`
    #[inline]
    #[must_use]
    pub fn new(channel: Channel, token: Option<String>) -> Self {
        Self {
            inner: quarkapi::AuthClient::new(AuthService::new(
                channel,
                token.as_ref().and_then(|t| t.parse().ok().map(Arc::new)),
            )),
        }
    }

    /// Enables authentication for the whole cluster.
    ///
    /// Exactly one `AuthEnable` remote call is issued. The call is
    /// abandoned locally once `timeout` elapses; whether the remote side
    /// effect completed is then unknown to the caller.
    ///
    /// # Errors
    ///
    /// This function will return an error if the remote call fails, is
    /// rejected by the store, or does not complete within `timeout`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use quark_client::{Client, ClientOptions};
    /// use anyhow::Result;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<()> {
    ///     let members = ["10.0.0.1:2379", "10.0.0.2:2379", "10.0.0.3:2379"];
    ///
    ///     let mut client = Client::connect(members, ClientOptions::default())
    ///         .await?
    ///         .auth_client();
    ///
    ///     let _resp = client.auth_enable(Duration::from_secs(5)).await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    #[inline]
    pub async fn auth_enable(&mut self, timeout: Duration) -> Result<AuthEnableResponse> {
        with_timeout(
            timeout,
            self.inner.auth_enable(quarkapi::AuthEnableRequest {}),
        )
        .await
    }

    /// Disables authentication for the whole cluster.
    ///
    /// Exactly one `AuthDisable` remote call is issued, with the same
    /// deadline contract as [`auth_enable`](Self::auth_enable).
    ///
    /// # Errors
    ///
    /// This function will return an error if the remote call fails, is
    /// rejected by the store, or does not complete within `timeout`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use quark_client::{Client, ClientOptions};
    /// use anyhow::Result;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<()> {
    ///     let members = ["10.0.0.1:2379", "10.0.0.2:2379", "10.0.0.3:2379"];
    ///
    ///     let mut client = Client::connect(members, ClientOptions::default())
    ///         .await?
    ///         .auth_client();
    ///
    ///     let _resp = client.auth_disable(Duration::from_secs(5)).await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    #[inline]
    pub async fn auth_disable(&mut self, timeout: Duration) -> Result<AuthDisableResponse> {
        with_timeout(
            timeout,
            self.inner.auth_disable(quarkapi::AuthDisableRequest {}),
        )
        .await
    }

    /// Fetches the authentication status of the cluster.
    ///
    /// # Errors
    ///
    /// This function will return an error if the remote call fails or does
    /// not complete within `timeout`.
    #[inline]
    pub async fn auth_status(&mut self, timeout: Duration) -> Result<AuthStatusResponse> {
        with_timeout(
            timeout,
            self.inner.auth_status(quarkapi::AuthStatusRequest {}),
        )
        .await
    }

    /// Authenticates the given user and returns a token for succeeding
    /// requests.
    ///
    /// # Errors
    ///
    /// This function will return an error if the credentials are rejected,
    /// the remote call fails, or it does not complete within `timeout`.
    #[inline]
    pub async fn authenticate(
        &mut self,
        request: AuthenticateRequest,
        timeout: Duration,
    ) -> Result<AuthenticateResponse> {
        with_timeout(timeout, self.inner.authenticate(request.inner)).await
    }
}

/// Bound `fut` by `timeout`, mapping local expiry to `Timeout`
async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<tonic::Response<T>, tonic::Status>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(resp) => Ok(resp?.into_inner()),
        Err(_elapsed) => Err(QuarkClientError::Timeout),
    }
}
