//! Route gating, the dashboard summary and the file-backed session.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use serde_json::json;
use storedesk_admin::routes::TicketsScreen;
use storedesk_admin::{Console, Credentials, Navigation, Route, Shell, ShellState};
use storedesk_core::Money;
use storedesk_integration_tests::{MockApi, login_body, super_admin_json};

#[tokio::test]
async fn test_routes_follow_session() {
    let api = MockApi::start().await;
    let shell = Shell::new(api.console());

    assert_eq!(shell.navigate("/customers"), Navigation::Redirect(Route::Login));
    assert_eq!(shell.open(Route::Dashboard), Some(Route::Login));

    let shell = api.shell();
    assert_eq!(shell.navigate("/login"), Navigation::Redirect(Route::Dashboard));
    assert_eq!(shell.navigate("/"), Navigation::Redirect(Route::Dashboard));
    assert_eq!(shell.navigate("/reports"), Navigation::NotFound);
    assert_eq!(shell.open(Route::Login), Some(Route::Dashboard));
    for route in Route::ALL.into_iter().filter(|r| *r != Route::Login) {
        assert_eq!(shell.open(route), Some(route));
    }
}

#[tokio::test]
async fn test_dashboard_summary() {
    let api = MockApi::start().await;
    api.ok(Method::GET, "/admin/all-customers", json!({"data": [{"id": 1}, {"id": 2}, {"id": 3}]}));
    api.ok(
        Method::GET,
        "/admin/orders",
        json!({
            "data": [
                {"id": 10, "total": "1,000.00", "created_at": "2024-01-10T08:00:00Z"},
                {"id": 11, "total_amount": 250, "created_at": "2024-01-12T08:00:00Z"},
                {"id": 12, "total": "n/a", "created_at": "2024-01-11T08:00:00Z"}
            ],
            "pagination": {"last_page": 4, "total": 37}
        }),
    );
    api.stub(Method::GET, "/admin/all-products", 500, json!({}));
    let mut screen = api.shell().dashboard();

    let summary = screen.load().await.unwrap();

    assert_eq!(summary.customers, 3);
    assert_eq!(summary.orders, 37);
    assert_eq!(summary.products, 0);
    assert_eq!(summary.revenue, Money::parse_lenient("1250").unwrap());
    let recent: Vec<i64> = summary.recent.iter().map(|o| o.id.as_i64()).collect();
    assert_eq!(recent, vec![11, 12, 10]);
    assert_eq!(api.calls_to(&Method::GET, "/admin/orders").len(), 1);
}

#[tokio::test]
async fn test_dashboard_fails_when_signed_out() {
    let api = MockApi::start().await;
    let mut screen = Shell::new(api.console()).dashboard();
    assert!(screen.load().await.unwrap_err().requires_sign_in());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_tickets_are_local() {
    let api = MockApi::start().await;
    let tickets: TicketsScreen = api.shell().tickets();
    assert_eq!(tickets.view.records().len(), 5);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let api = MockApi::start().await;
    api.ok(Method::POST, "/admin/login", login_body(&super_admin_json()));
    let path = std::env::temp_dir()
        .join(format!("storedesk-test-{}", uuid::Uuid::new_v4()))
        .join("session.json");
    let config = api.config().with_session_file(path.clone());

    let shell = Shell::new(Console::new(config.clone()).unwrap());
    shell
        .sign_in(&Credentials::new("asha@example.com", "hunter22"))
        .await
        .unwrap();

    let restarted = Shell::new(Console::new(config.clone()).unwrap());
    assert_eq!(restarted.state(), ShellState::Authenticated);
    let user = restarted.console().session().user().unwrap().unwrap();
    assert_eq!(user.display_name(), "Asha Rao");

    restarted.sign_out().unwrap();
    let again = Shell::new(Console::new(config).unwrap());
    assert_eq!(again.state(), ShellState::Unauthenticated);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
