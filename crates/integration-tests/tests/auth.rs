//! Sign-in, the super-admin gate and sign-out.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use serde_json::json;
use storedesk_admin::services::auth::ACCESS_DENIED;
use storedesk_admin::{ConsoleError, Credentials, Navigation, Route, Shell, ShellState};
use storedesk_core::UserId;
use storedesk_integration_tests::{MockApi, login_body, super_admin_json};

const LOGIN: &str = "/admin/login";

#[tokio::test]
async fn test_super_admin_signs_in() {
    let api = MockApi::start().await;
    api.ok(Method::POST, LOGIN, login_body(&super_admin_json()));
    let shell = Shell::new(api.console());
    assert_eq!(shell.state(), ShellState::Unauthenticated);

    let (user, nav) = shell
        .sign_in(&Credentials::new("\u{200B}asha@example.com ", "hunter22"))
        .await
        .unwrap();

    assert_eq!(user.display_name(), "Asha Rao");
    assert_eq!(nav, Navigation::Redirect(Route::Dashboard));
    assert_eq!(shell.state(), ShellState::Authenticated);

    let calls = api.calls_to(&Method::POST, LOGIN);
    assert_eq!(calls.len(), 1);
    let form = &calls.first().unwrap().body;
    assert!(form.contains("username=asha%40example.com"));
    assert!(form.contains("grant_type=password"));
    assert!(form.contains("client_id=2"));
    assert!(calls.first().unwrap().authorization.is_none());
}

#[tokio::test]
async fn test_non_admin_is_refused_and_session_stays_empty() {
    let api = MockApi::start().await;
    let customer = json!({"id": 9, "firstname": "Cust", "role": "customer", "sys_admin": 0});
    api.ok(Method::POST, LOGIN, login_body(&customer));
    let console = api.console();
    let shell = Shell::new(console.clone());

    let err = shell
        .sign_in(&Credentials::new("cust@example.com", "hunter22"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::AccessDenied(ref m) if m == ACCESS_DENIED));
    assert!(console.session().get().unwrap().is_none());
    assert_eq!(shell.state(), ShellState::Unauthenticated);
    assert_eq!(shell.navigate("/dashboard"), Navigation::Redirect(Route::Login));
}

#[tokio::test]
async fn test_loose_sys_admin_flags_are_refused() {
    for flag in [json!("yes"), json!(true), json!("1")] {
        let api = MockApi::start().await;
        let user = json!({"id": 9, "role": "customer", "sys_admin": flag});
        api.ok(Method::POST, LOGIN, login_body(&user));
        let console = api.console();
        let shell = Shell::new(console.clone());

        let err = shell
            .sign_in(&Credentials::new("cust@example.com", "hunter22"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConsoleError::AccessDenied(_)), "sys_admin {flag}");
        assert!(console.session().get().unwrap().is_none());
        assert_eq!(shell.state(), ShellState::Unauthenticated);
    }
}

#[tokio::test]
async fn test_numeric_string_user_id_signs_in() {
    let api = MockApi::start().await;
    let user = json!({"id": "5", "firstname": "Asha", "sys_admin": 1});
    api.ok(Method::POST, LOGIN, login_body(&user));
    let shell = Shell::new(api.console());

    let (user, _) = shell
        .sign_in(&Credentials::new("asha@example.com", "hunter22"))
        .await
        .unwrap();

    assert_eq!(user.id, UserId::new(5));
    assert_eq!(shell.state(), ShellState::Authenticated);
}

#[tokio::test]
async fn test_unreadable_user_record_is_not_access_denied() {
    let api = MockApi::start().await;
    let user = json!({"id": "not-a-number", "sys_admin": 1});
    api.ok(Method::POST, LOGIN, login_body(&user));
    let console = api.console();
    let shell = Shell::new(console.clone());

    let err = shell
        .sign_in(&Credentials::new("asha@example.com", "hunter22"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Network(ref m) if m.contains("userDetails")));
    assert!(console.session().get().unwrap().is_none());
    assert_eq!(shell.state(), ShellState::Unauthenticated);
}

#[tokio::test]
async fn test_rejected_credentials_use_server_message() {
    let api = MockApi::start().await;
    api.stub(Method::POST, LOGIN, 401, json!({"message": "Wrong password"}));
    let shell = Shell::new(api.console());

    let err = shell
        .sign_in(&Credentials::new("asha@example.com", "nope-nope"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Wrong password");
    assert_eq!(shell.state(), ShellState::Unauthenticated);
}

#[tokio::test]
async fn test_missing_token_is_auth_error() {
    let api = MockApi::start().await;
    api.ok(Method::POST, LOGIN, json!({"message": "Login successful", "userDetails": super_admin_json()}));
    let shell = Shell::new(api.console());

    let err = shell
        .sign_in(&Credentials::new("asha@example.com", "hunter22"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Auth(_)));
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let api = MockApi::start().await;
    let shell = Shell::new(api.console());

    let err = shell.sign_in(&Credentials::new("", "hunter22")).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Validation(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_sign_out_returns_to_login() {
    let api = MockApi::start().await;
    let shell = api.shell();
    assert_eq!(shell.state(), ShellState::Authenticated);

    assert_eq!(shell.sign_out().unwrap(), Navigation::Redirect(Route::Login));
    assert_eq!(shell.state(), ShellState::Unauthenticated);
    assert_eq!(shell.open(Route::Orders), Some(Route::Login));
}

#[tokio::test]
async fn test_signed_out_requests_are_not_sent() {
    let api = MockApi::start().await;
    let shell = Shell::new(api.console());
    let mut customers = shell.customers();

    let err = customers.load().await.unwrap_err();
    assert!(err.requires_sign_in());
    assert!(api.calls().is_empty());
}
