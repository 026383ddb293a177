use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use quarkapi::{
    Auth, AuthDisableRequest, AuthDisableResponse, AuthEnableRequest, AuthEnableResponse,
    AuthServer, AuthStatusRequest, AuthStatusResponse, AuthenticateRequest, AuthenticateResponse,
    ResponseHeader,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{transport::Server, Request, Response, Status};

/// Name and password the mock control plane accepts
pub const MOCK_USER: (&str, &str) = ("root", "rootpwd");

/// Token handed out by the mock control plane
pub const MOCK_TOKEN: &str = "test-token";

/// Observations recorded by the mock control plane
#[derive(Debug, Default)]
pub struct MockState {
    pub enable_calls: AtomicUsize,
    pub disable_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub authenticate_calls: AtomicUsize,
    /// `authorization` header of the most recent call, if any
    pub authorization_seen: Mutex<Option<String>>,
}

/// Mock control-plane auth service recording into a shared `MockState`
#[derive(Debug, Default)]
pub struct MockAuth {
    state: Arc<MockState>,
    /// Reject every toggle/status call with this message when set
    reject_with: Option<String>,
    /// Delay before answering any call
    delay: Duration,
}

impl MockAuth {
    pub fn new() -> (Self, Arc<MockState>) {
        let state = Arc::new(MockState::default());
        let mock = Self {
            state: Arc::clone(&state),
            ..Self::default()
        };
        (mock, state)
    }

    pub fn rejecting(msg: &str) -> (Self, Arc<MockState>) {
        let (mut mock, state) = Self::new();
        mock.reject_with = Some(msg.to_owned());
        (mock, state)
    }

    pub fn delayed(delay: Duration) -> (Self, Arc<MockState>) {
        let (mut mock, state) = Self::new();
        mock.delay = delay;
        (mock, state)
    }

    fn record<T>(&self, request: &Request<T>, counter: &AtomicUsize) -> Result<(), Status> {
        counter.fetch_add(1, Ordering::SeqCst);
        let token = request
            .metadata()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        *self.state.authorization_seen.lock().unwrap() = token;
        match self.reject_with {
            Some(ref msg) => Err(Status::failed_precondition(msg.clone())),
            None => Ok(()),
        }
    }

    fn header() -> Option<ResponseHeader> {
        Some(ResponseHeader {
            cluster_id: 1,
            member_id: 1,
            revision: 1,
            raft_term: 1,
        })
    }
}

#[tonic::async_trait]
impl Auth for MockAuth {
    async fn auth_enable(
        &self,
        request: Request<AuthEnableRequest>,
    ) -> Result<Response<AuthEnableResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        self.record(&request, &self.state.enable_calls)?;
        Ok(Response::new(AuthEnableResponse {
            header: Self::header(),
        }))
    }

    async fn auth_disable(
        &self,
        request: Request<AuthDisableRequest>,
    ) -> Result<Response<AuthDisableResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        self.record(&request, &self.state.disable_calls)?;
        Ok(Response::new(AuthDisableResponse {
            header: Self::header(),
        }))
    }

    async fn auth_status(
        &self,
        request: Request<AuthStatusRequest>,
    ) -> Result<Response<AuthStatusResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        self.record(&request, &self.state.status_calls)?;
        Ok(Response::new(AuthStatusResponse {
            header: Self::header(),
            enabled: true,
            auth_revision: 1,
        }))
    }

    async fn authenticate(
        &self,
        request: Request<AuthenticateRequest>,
    ) -> Result<Response<AuthenticateResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        self.record(&request, &self.state.authenticate_calls)?;
        let req = request.into_inner();
        if (req.name.as_str(), req.password.as_str()) == MOCK_USER {
            Ok(Response::new(AuthenticateResponse {
                header: Self::header(),
                token: MOCK_TOKEN.to_owned(),
            }))
        } else {
            Err(Status::invalid_argument(
                "authentication failed, invalid user ID or password",
            ))
        }
    }
}

/// Serve `mock` on an ephemeral local port and return its address
pub async fn start_mock_server(mock: MockAuth) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let incoming = TcpListenerStream::new(listener);
    drop(tokio::spawn(async move {
        Server::builder()
            .add_service(AuthServer::new(mock))
            .serve_with_incoming(incoming)
            .await
    }));
    format!("127.0.0.1:{}", addr.port())
}
