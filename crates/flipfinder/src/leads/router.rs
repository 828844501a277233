use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::deal::DealInputs;
use super::domain::{PipelineStage, PropertyId, PropertyRecord};
use super::repository::{LeadRepository, LeadView, RepositoryError};
use super::service::{LeadService, LeadServiceError};

/// Router builder exposing lead intake, ranking and valuation endpoints.
pub fn lead_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/leads",
            post(submit_handler::<R>).get(ranked_handler::<R>),
        )
        .route("/api/v1/leads/:lead_id", get(lead_handler::<R>))
        .route("/api/v1/leads/:lead_id/stage", post(stage_handler::<R>))
        .route("/api/v1/leads/:lead_id/rescore", post(rescore_handler::<R>))
        .route("/api/v1/pipeline/summary", get(summary_handler::<R>))
        .route("/api/v1/valuation/arv", post(arv_handler::<R>))
        .route(
            "/api/v1/valuation/neighborhood/:city",
            get(neighborhood_handler::<R>),
        )
        .route("/api/v1/valuation/deal", post(deal_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankedParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StageUpdate {
    pub stage: String,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Json(property): Json<PropertyRecord>,
) -> Response
where
    R: LeadRepository + 'static,
{
    match service.submit(property) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "lead already exists")
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn ranked_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Query(params): Query<RankedParams>,
) -> Response
where
    R: LeadRepository + 'static,
{
    match service.ranked(params.limit) {
        Ok(records) => {
            let views: Vec<LeadView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn lead_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let id = PropertyId(lead_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn stage_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Path(lead_id): Path<String>,
    Json(update): Json<StageUpdate>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let stage = match update.stage.parse::<PipelineStage>() {
        Ok(stage) => stage,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, &error.to_string()),
    };

    let id = PropertyId(lead_id);
    match service.advance_stage(&id, stage) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let id = PropertyId(lead_id);
    match service.rescore(&id) {
        Ok(record) => (StatusCode::OK, Json(record.score)).into_response(),
        Err(LeadServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn summary_handler<R>(State(service): State<Arc<LeadService<R>>>) -> Response
where
    R: LeadRepository + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn arv_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Json(property): Json<PropertyRecord>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let prediction = service.suite().predict_arv(&property);
    (StatusCode::OK, Json(prediction)).into_response()
}

pub(crate) async fn neighborhood_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Path(city): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let assessment = service.suite().analyze_neighborhood(&city);
    (StatusCode::OK, Json(assessment)).into_response()
}

pub(crate) async fn deal_handler(Json(inputs): Json<DealInputs>) -> Response {
    if inputs.purchase_price < 0.0 || inputs.arv < 0.0 || inputs.repairs < 0.0 {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "purchase_price, arv and repairs must be non-negative",
        );
    }
    (StatusCode::OK, Json(inputs.analyze())).into_response()
}

fn not_found(id: &PropertyId) -> Response {
    let payload = json!({
        "error": "lead not found",
        "lead_id": id.as_str(),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let payload = json!({
        "error": message,
    });
    (status, Json(payload)).into_response()
}

fn internal_error(error: LeadServiceError) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
}
