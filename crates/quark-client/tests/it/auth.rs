use std::{sync::atomic::Ordering, time::Duration};

use quark_client::{
    error::{QuarkClientBuildError, QuarkClientError},
    Client, ClientOptions,
};

use super::common::{start_mock_server, MockAuth, MOCK_TOKEN, MOCK_USER};

/// Deadline generous enough for a local mock round trip
const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test(flavor = "multi_thread")]
async fn enable_should_issue_exactly_one_enable_call() {
    let (mock, state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    auth.auth_enable(TIMEOUT).await.unwrap();

    assert_eq!(state.enable_calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.disable_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn disable_should_issue_exactly_one_disable_call() {
    let (mock, state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    auth.auth_disable(TIMEOUT).await.unwrap();

    assert_eq!(state.disable_calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.enable_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_enable_should_not_be_deduplicated() {
    let (mock, state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    auth.auth_enable(TIMEOUT).await.unwrap();
    auth.auth_enable(TIMEOUT).await.unwrap();

    assert_eq!(state.enable_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_rejection_should_surface_its_message() {
    let (mock, state) = MockAuth::rejecting("invalid auth management");
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    let err = auth.auth_disable(TIMEOUT).await.unwrap_err();

    assert!(err.to_string().contains("invalid auth management"));
    assert_eq!(state.disable_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn exceeded_deadline_should_abandon_the_call() {
    let (mock, _state) = MockAuth::delayed(Duration::from_secs(3));
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    let err = auth
        .auth_enable(Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(err, QuarkClientError::Timeout));
}

#[tokio::test(flavor = "multi_thread")]
async fn status_should_report_remote_auth_state() {
    let (mock, state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let client = Client::connect([addr], ClientOptions::default())
        .await
        .unwrap();
    let mut auth = client.auth_client();

    let resp = auth.auth_status(TIMEOUT).await.unwrap();

    assert!(resp.enabled);
    assert_eq!(resp.auth_revision, 1);
    assert_eq!(state.status_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_with_user_should_attach_token_to_requests() {
    let (mock, state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let options = ClientOptions::default().with_user(MOCK_USER.0, MOCK_USER.1);
    let client = Client::connect([addr], options).await.unwrap();
    let mut auth = client.auth_client();

    auth.auth_enable(TIMEOUT).await.unwrap();

    assert_eq!(state.authenticate_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *state.authorization_seen.lock().unwrap(),
        Some(MOCK_TOKEN.to_owned())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_with_bad_credentials_should_fail_to_build() {
    let (mock, _state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let options = ClientOptions::default().with_user("root", "wrong");

    let err = Client::connect([addr], options).await.unwrap_err();

    assert!(matches!(err, QuarkClientBuildError::AuthError(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_should_reject_empty_endpoint_list() {
    let err = Client::connect(Vec::<String>::new(), ClientOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, QuarkClientBuildError::InvalidArguments(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn endpoints_should_preserve_configured_order() {
    let (mock, _state) = MockAuth::new();
    let addr = start_mock_server(mock).await;
    let second = "127.0.0.1:2389".to_owned();
    let client = Client::connect([addr.clone(), second.clone()], ClientOptions::default())
        .await
        .unwrap();

    assert_eq!(client.endpoints(), [addr, second].as_slice());
}
