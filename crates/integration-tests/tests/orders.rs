//! Order pagination and status updates.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use serde_json::{Value, json};
use storedesk_admin::NoticeLevel;
use storedesk_admin::api::MAX_PAGES;
use storedesk_core::{OrderId, OrderStatus};
use storedesk_integration_tests::MockApi;

const ORDERS: &str = "/admin/orders";

fn page(page: u32, last_page: u32, per_page: u32, total: u32) -> Value {
    let first = (page - 1) * per_page + 1;
    let rows: Vec<Value> = (first..first + per_page)
        .map(|id| {
            json!({
                "id": id,
                "user": {"first_name": "Buyer", "last_name": format!("{id}"), "email": format!("b{id}@example.com")},
                "total": format!("{id}.00"),
                "status": "pending",
                "created_at": "2024-01-15T10:30:00Z"
            })
        })
        .collect();
    json!({
        "data": rows,
        "pagination": {"current_page": page, "last_page": last_page, "per_page": per_page, "total": total}
    })
}

#[tokio::test]
async fn test_all_pages_are_fetched() {
    let api = MockApi::start().await;
    for n in 1..=3 {
        api.ok(Method::GET, &format!("{ORDERS}?page={n}"), page(n, 3, 20, 60));
    }
    let mut screen = api.shell().orders();

    screen.load().await.unwrap();

    assert_eq!(screen.view.records().len(), 60);
    assert_eq!(screen.total(), Some(60));
    assert!(screen.truncated_at().is_none());
    let paths: Vec<String> = api.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(paths, vec!["/admin/orders?page=1", "/admin/orders?page=2", "/admin/orders?page=3"]);
}

#[tokio::test]
async fn test_page_count_is_capped() {
    let api = MockApi::start().await;
    api.ok(Method::GET, ORDERS, page(1, MAX_PAGES + 40, 1, MAX_PAGES + 40));
    let mut screen = api.shell().orders();

    screen.load().await.unwrap();

    assert_eq!(api.calls_to(&Method::GET, ORDERS).len(), MAX_PAGES as usize);
    assert_eq!(screen.view.records().len(), MAX_PAGES as usize);
    assert_eq!(screen.truncated_at(), Some(MAX_PAGES + 1));
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_orders() {
    let api = MockApi::start().await;
    api.ok(Method::GET, &format!("{ORDERS}?page=1"), page(1, 3, 20, 60));
    api.stub(Method::GET, &format!("{ORDERS}?page=2"), 502, json!({"message": "Bad gateway"}));
    api.ok(Method::GET, &format!("{ORDERS}?page=3"), page(3, 3, 20, 60));
    let mut screen = api.shell().orders();

    screen.load().await.unwrap();

    assert_eq!(screen.view.records().len(), 20);
    assert_eq!(screen.truncated_at(), Some(2));
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_first_page_failure_is_an_error() {
    let api = MockApi::start().await;
    api.stub(Method::GET, &format!("{ORDERS}?page=1"), 500, json!({}));
    let mut screen = api.shell().orders();

    let err = screen.load().await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (500)");
    assert!(screen.view.records().is_empty());
}

#[tokio::test]
async fn test_status_update_puts_then_refetches() {
    let api = MockApi::start().await;
    api.ok(Method::GET, &format!("{ORDERS}?page=1"), page(1, 1, 3, 3));
    api.ok(Method::PUT, "/admin/orders/2/status", json!({"message": "Status updated"}));
    let mut screen = api.shell().orders();
    screen.load().await.unwrap();

    let order = screen.show(OrderId::new(2)).unwrap();
    assert_eq!(order.customer_name(), "Buyer 2");
    assert_eq!(order.status(), Some(OrderStatus::Pending));

    let notice = screen
        .update_status(OrderId::new(2), OrderStatus::Delivered)
        .await
        .unwrap();

    assert_eq!(notice.level, NoticeLevel::Success);
    let puts = api.calls_to(&Method::PUT, "/admin/orders/2/status");
    assert_eq!(puts.len(), 1);
    assert_eq!(puts.first().unwrap().json(), json!({"status": "delivered"}));
    assert_eq!(api.calls_to(&Method::GET, ORDERS).len(), 2);
}

#[tokio::test]
async fn test_same_status_sends_nothing() {
    let api = MockApi::start().await;
    api.ok(Method::GET, &format!("{ORDERS}?page=1"), page(1, 1, 3, 3));
    let mut screen = api.shell().orders();
    screen.load().await.unwrap();

    let notice = screen
        .update_status(OrderId::new(1), OrderStatus::Pending)
        .await
        .unwrap();

    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(api.calls().len(), 1);
}
