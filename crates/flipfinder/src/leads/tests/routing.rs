use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::leads::router::submit_handler;
use crate::leads::LeadService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate() {
    let service = Arc::new(service_with(ConflictRepository));

    let response =
        submit_handler::<ConflictRepository>(State(service), axum::Json(hot_lead())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service: Arc<LeadService<UnavailableRepository>> =
        Arc::new(service_with(UnavailableRepository));

    let response =
        submit_handler::<UnavailableRepository>(State(service), axum::Json(hot_lead())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("database offline"));
}

#[tokio::test]
async fn submit_route_scores_lead() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let payload = serde_json::to_value(hot_lead()).expect("serialize lead");
    let response = app
        .oneshot(json_request("POST", "/api/v1/leads", payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["score"]["score"], 100);
    assert_eq!(body["score"]["tier"], "HOT");
    assert_eq!(body["stage"], "new_lead");
}

#[tokio::test]
async fn ranked_route_honors_limit() {
    let (service, _) = build_service();
    service.submit(hot_lead()).expect("hot");
    service.submit(clean_lead()).expect("clean");
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/leads?limit=1"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let leads = body.as_array().expect("array");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["id"], "hot-1");
    assert_eq!(leads[0]["stage_label"], "New Lead");
}

#[tokio::test]
async fn unknown_lead_returns_not_found() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/leads/ghost"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["lead_id"], "ghost");
}

#[tokio::test]
async fn stage_route_moves_lead_and_rejects_unknown_stage() {
    let (service, repository) = build_service();
    service.submit(hot_lead()).expect("hot");
    let app = router_with_service(service);

    let moved = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/hot-1/stage",
            json!({ "stage": "Under Contract" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(moved.status(), StatusCode::OK);
    let body = read_json_body(moved).await;
    assert_eq!(body["stage"], "under_contract");

    let rejected = app
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/hot-1/stage",
            json!({ "stage": "escrow" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let records = repository.records.lock().expect("repository mutex poisoned");
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn summary_route_reports_counts() {
    let (service, _) = build_service();
    service.submit(hot_lead()).expect("hot");
    let app = router_with_service(service);

    let response = app
        .oneshot(get_request("/api/v1/pipeline/summary"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_leads"], 1);
    assert_eq!(body["hot_leads"], 1);
}

#[tokio::test]
async fn valuation_routes_compute_on_demand() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let arv = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/valuation/arv",
            json!({ "city": "Detroit", "sqft": 1500, "beds": 3, "baths": 1.5, "year_built": 1990 }),
        ))
        .await
        .expect("router responds");
    assert_eq!(arv.status(), StatusCode::OK);
    let body = read_json_body(arv).await;
    let predicted = body["predicted_arv"].as_f64().expect("number");
    assert!((92_224.0..=92_225.0).contains(&predicted));
    assert_eq!(predicted.fract(), 0.0);

    let neighborhood = app
        .clone()
        .oneshot(get_request("/api/v1/valuation/neighborhood/Detroit"))
        .await
        .expect("router responds");
    assert_eq!(neighborhood.status(), StatusCode::OK);
    let body = read_json_body(neighborhood).await;
    assert_eq!(body["score"], 58);
    assert_eq!(body["grade"], "C");

    let deal = app
        .oneshot(json_request(
            "POST",
            "/api/v1/valuation/deal",
            json!({ "purchase_price": 100000, "arv": 150000, "repairs": 30000 }),
        ))
        .await
        .expect("router responds");
    assert_eq!(deal.status(), StatusCode::OK);
    let body = read_json_body(deal).await;
    assert_eq!(body["verdict"], "pass");
    assert_eq!(body["holding_months"], 4);
}

#[tokio::test]
async fn deal_route_rejects_negative_inputs() {
    let (service, _) = build_service();
    let app = router_with_service(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/valuation/deal",
            json!({ "purchase_price": -1, "arv": 150000, "repairs": 30000 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
