//! Integration tests for the station HTTP API.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use domain::Money;
use metrics_exporter_prometheus::PrometheusHandle;
use robot::InMemoryRobotClient;
use serde_json::{Value, json};
use tower::ServiceExt;

use api::seed::SeedData;
use api::station::Station;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with_robot() -> (axum::Router, InMemoryRobotClient) {
    let metrics_handle = get_metrics_handle();
    let robot = InMemoryRobotClient::new();
    let seeded = SeedData::demo().build(Utc::now()).unwrap();
    let state = api::create_state(Station::new(seeded, robot.clone()));
    (api::create_app(state, metrics_handle), robot)
}

fn setup() -> axum::Router {
    setup_with_robot().0
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// Parses a JSON decimal string; the scale of computed totals varies.
fn money(value: &Value) -> Money {
    value.as_str().unwrap().parse().unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &axum::Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["pending_orders"], 3);

    let (_, pending) = get(&app, "/orders/pending").await;
    assert_eq!(json["next_order"], pending[0]["id"]);
}

#[tokio::test]
async fn test_list_items() {
    let app = setup();

    let (status, json) = get(&app, "/items").await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Rice");
    assert_eq!(items[0]["price_per_unit"], "1.20");
    assert_eq!(items[0]["kind"], "bulk");
    assert_eq!(items[0]["measurement_unit"], "kg");
    assert_eq!(items[0]["bin"], "A");
    assert_eq!(items[0]["summary"], "Rice: $1.20 per kg");
    assert_eq!(items[3]["kind"], "unit");
    assert_eq!(items[3]["weight"], 0.01);
    assert_eq!(items[3]["bin"], Value::Null);
}

#[tokio::test]
async fn test_inventory_and_low_stock() {
    let app = setup();

    let (status, json) = get(&app, "/inventory").await;
    assert_eq!(status, StatusCode::OK);
    let quantities: Vec<f64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["quantity"].as_f64().unwrap())
        .collect();
    assert_eq!(quantities, vec![12.0, 40.0, 50.0, 3.0]);

    let (status, json) = get(&app, "/inventory/low-stock").await;
    assert_eq!(status, StatusCode::OK);
    let low = json.as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["name"], "Pen");
    assert_eq!(low[0]["low"], true);
}

#[tokio::test]
async fn test_pending_orders_oldest_first() {
    let app = setup();

    let (status, json) = get(&app, "/orders/pending").await;

    assert_eq!(status, StatusCode::OK);
    let orders = json.as_array().unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0]["lines_summary"], "Rice x 2.5, Pen x 2");
    assert_eq!(orders[0]["state"], "Pending");
    assert_eq!(money(&orders[0]["total"]), Money::from_cents(700));
    assert_eq!(orders[1]["lines_summary"], "Screw x 10, Cable x 3");
    assert_eq!(orders[2]["lines_summary"], "Pen x 1, Rice x 1");
}

#[tokio::test]
async fn test_create_order() {
    let app = setup();

    let (status, json) = post(
        &app,
        "/orders",
        Some(json!({ "lines": [{ "item_id": 2, "quantity": 1.5 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["state"], "Pending");
    assert_eq!(json["pending_orders"], 4);
    let order_id = json["order_id"].as_str().unwrap().to_string();

    let (_, pending) = get(&app, "/orders/pending").await;
    let last = &pending.as_array().unwrap()[3];
    assert_eq!(last["id"], order_id);
    assert_eq!(last["lines_summary"], "Cable x 1.5");
    assert_eq!(money(&last["total"]), Money::from_cents(600));
}

#[tokio::test]
async fn test_create_order_unknown_item() {
    let app = setup();

    let (status, json) = post(
        &app,
        "/orders",
        Some(json!({ "lines": [{ "item_id": 42, "quantity": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("42"));

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["pending_orders"], 3);
}

#[tokio::test]
async fn test_create_order_rejects_bad_lines() {
    let app = setup();

    let (status, _) = post(&app, "/orders", Some(json!({ "lines": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = post(
        &app,
        "/orders",
        Some(json!({ "lines": [{ "item_id": 1, "quantity": -2 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid quantity"));
}

#[tokio::test]
async fn test_create_order_rejects_quantity_beyond_decimal_range() {
    let app = setup();

    let (status, json) = post(
        &app,
        "/orders",
        Some(json!({ "lines": [{ "item_id": 2, "quantity": 1e30 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid quantity"));
    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["pending_orders"], 3);
}

#[tokio::test]
async fn test_overflowing_order_total_keeps_endpoints_working() {
    let app = setup();

    let (status, created) = post(
        &app,
        "/orders",
        Some(json!({ "lines": [{ "item_id": 2, "quantity": 7e28 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for _ in 0..4 {
        let (status, _) = post(&app, "/orders/process-next", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, order) = get(&app, &format!("/orders/{}", created["order_id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["state"], "Processed");

    let (status, revenue) = get(&app, "/revenue").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(revenue["processed_orders"], 4);

    let (status, processed) = get(&app, "/orders/processed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(processed.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_order_by_id() {
    let app = setup();
    let (_, pending) = get(&app, "/orders/pending").await;
    let first = pending[0]["id"].as_str().unwrap().to_string();

    let (status, order) = get(&app, &format!("/orders/{first}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["state"], "Pending");
    assert_eq!(order["lines_summary"], "Rice x 2.5, Pen x 2");

    post(&app, "/orders/process-next", None).await;
    let (_, order) = get(&app, &format!("/orders/{first}")).await;
    assert_eq!(order["state"], "Processed");
}

#[tokio::test]
async fn test_get_order_unknown_or_malformed_id() {
    let app = setup();

    let (status, _) = get(&app, "/orders/00000000-0000-4000-8000-000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get(&app, "/orders/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid order id"));
}

#[tokio::test]
async fn test_process_next_reports_and_sends_programs() {
    let (app, robot) = setup_with_robot();

    let (status, json) = post(&app, "/orders/process-next", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["order"]["state"], "Processed");
    assert_eq!(json["order"]["lines_summary"], "Rice x 2.5, Pen x 2");
    assert_eq!(json["programs_sent"], 1);
    assert_eq!(json["programs_failed"], 0);
    assert_eq!(json["manual_lines"], 1);
    assert_eq!(money(&json["total_revenue"]), Money::from_cents(700));
    assert_eq!(robot.sent_count(), 1);

    let (_, inventory) = get(&app, "/inventory").await;
    assert_eq!(inventory[0]["quantity"], 9.5);
    assert_eq!(inventory[3]["quantity"], 1.0);

    let (_, processed) = get(&app, "/orders/processed").await;
    assert_eq!(processed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_process_next_drains_then_no_content() {
    let app = setup();

    for _ in 0..3 {
        let (status, _) = post(&app, "/orders/process-next", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = post(&app, "/orders/process-next", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, Value::Null);

    let (status, json) = get(&app, "/revenue").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&json["total_revenue"]), Money::from_cents(2720));
    assert_eq!(json["processed_orders"], 3);

    let (_, inventory) = get(&app, "/inventory").await;
    let quantities: Vec<f64> = inventory
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["quantity"].as_f64().unwrap())
        .collect();
    assert_eq!(quantities, vec![8.5, 37.0, 40.0, 0.0]);
}

#[tokio::test]
async fn test_robot_failure_still_processes() {
    let (app, robot) = setup_with_robot();
    robot.set_fail_on_send(true);

    let (status, json) = post(&app, "/orders/process-next", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["programs_sent"], 0);
    assert_eq!(json["programs_failed"], 1);

    let (_, health) = get(&app, "/health").await;
    assert_eq!(health["pending_orders"], 2);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    post(&app, "/orders/process-next", None).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("orders_queued_total"));
    assert!(text.contains("orders_processed_total"));
}
