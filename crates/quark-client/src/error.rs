use thiserror::Error;

/// The result type for `quark-client`
pub type Result<T> = std::result::Result<T, QuarkClientError>;

/// Error type of client builder
#[allow(clippy::module_name_repetitions)] // this-error generate code false-positive
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuarkClientBuildError {
    /// Rpc error
    #[error("Rpc error: {0}")]
    RpcError(String),
    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    /// Authentication error
    #[error("Authenticate error: {0}")]
    AuthError(String),
}

impl QuarkClientBuildError {
    /// Create a new `QuarkClientBuildError::InvalidArguments`
    #[inline]
    #[must_use]
    pub fn invalid_arguments(msg: &str) -> Self {
        Self::InvalidArguments(msg.to_owned())
    }
}

impl From<tonic::transport::Error> for QuarkClientBuildError {
    #[inline]
    fn from(e: tonic::transport::Error) -> Self {
        Self::RpcError(e.to_string())
    }
}

impl From<tonic::Status> for QuarkClientBuildError {
    #[inline]
    fn from(e: tonic::Status) -> Self {
        Self::RpcError(e.to_string())
    }
}

/// The error type for `quark-client`
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QuarkClientError {
    /// RPC error
    #[error("rpc error: {0}")]
    RpcError(String),
    /// Arguments invalid error
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
    /// Internal Error
    #[error("Client Internal error: {0}")]
    InternalError(String),
    /// Request Timeout
    ///
    /// The call was abandoned locally; the remote side effect may or may
    /// not have completed.
    #[error("Request timeout")]
    Timeout,
}

impl From<tonic::transport::Error> for QuarkClientError {
    #[inline]
    fn from(e: tonic::transport::Error) -> Self {
        Self::RpcError(e.to_string())
    }
}

impl From<tonic::Status> for QuarkClientError {
    #[inline]
    fn from(e: tonic::Status) -> Self {
        Self::RpcError(e.to_string())
    }
}
