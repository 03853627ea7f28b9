use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::weigh::router::submit_handler;
use crate::workflows::weigh::{weigh_router, WeighService};

fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn evaluate_route_returns_result_without_storing() {
    let (service, repository) = build_service();
    let router = weigh_router_with_service(service);
    let body = serde_json::to_value(tow_submission()).expect("serialize");

    let response = router
        .oneshot(json_request("/api/v1/weighs/evaluate", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["overall_compliant"], json!(true));
    assert_eq!(payload["rows"].as_array().map(Vec::len), Some(8));
    assert_eq!(payload["rows"][3]["metric_name"], json!("tow_ball_mass"));
    assert_eq!(payload["rows"][3]["status"], json!("OK"));
    assert!(repository.records.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn submitted_weigh_can_be_fetched() {
    let (service, _) = build_service();
    let router = weigh_router_with_service(service);
    let body = serde_json::to_value(tow_submission()).expect("serialize");

    let response = router
        .clone()
        .oneshot(json_request("/api/v1/weighs", &body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    assert_eq!(created["weigh_id"], json!("weigh-000001"));
    assert_eq!(created["verdict"], json!("Compliant"));

    let response = router
        .oneshot(
            Request::get("/api/v1/weighs/weigh-000001")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["rows"], created["rows"]);
    assert_eq!(fetched["scenario"], json!("tow_vehicle_and_caravan"));
}

#[tokio::test]
async fn unknown_weigh_returns_not_found() {
    let (service, _) = build_service();
    let router = weigh_router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/weighs/weigh-999999")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["weigh_id"], json!("weigh-999999"));
}

#[tokio::test]
async fn invalid_readings_return_unprocessable() {
    let (service, _) = build_service();
    let router = weigh_router_with_service(service);
    let body = json!({
        "input": {
            "scenario": "vehicle_only",
            "method": "weighbridge_single_cell_typo",
            "readings": { "kind": "single_cell", "vehicle_total": 2100.0 }
        }
    });

    let response = router
        .clone()
        .oneshot(json_request("/api/v1/weighs/evaluate", &body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json!({
        "input": {
            "scenario": "vehicle_only",
            "method": "weighbridge_above_ground_single_cell",
            "readings": { "kind": "single_cell", "vehicle_total": -5.0 }
        }
    });
    let response = router
        .oneshot(json_request("/api/v1/weighs/evaluate", &body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("vehicle_total"));
}

#[tokio::test]
async fn mismatched_readings_return_unprocessable() {
    let (service, _) = build_service();
    let router = weigh_router_with_service(service);
    let body = json!({
        "input": {
            "scenario": "caravan_only_registered",
            "method": "weighbridge_go_weigh",
            "readings": { "kind": "single_cell", "trailer_total": 2300.0 }
        }
    });

    let response = router
        .oneshot(json_request("/api/v1/weighs", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(WeighService::new(
        Arc::new(ConflictRepository),
        Arc::new(catalog()),
        Default::default(),
    ));

    let response =
        submit_handler::<ConflictRepository>(State(service), axum::Json(tow_submission())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn repository_failures_return_internal_error() {
    let router = weigh_router(Arc::new(service_with(UnavailableRepository)));
    let body = serde_json::to_value(tow_submission()).expect("serialize");

    let response = router
        .oneshot(json_request("/api/v1/weighs", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("repository unavailable: database offline")
    );
}
