// HTTP request handlers
use crate::domain::feed::TelemetryDataset;
use crate::error::FetchResult;
use crate::infrastructure::csv_export::to_csv_bytes;
use crate::infrastructure::http_response::{accepts_brotli, csv_response, json_response};
use crate::infrastructure::json_mapper::{dashboard_to_json, dataset_to_json};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct FeedQuery {
    pub results: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn fetch_dataset(state: &AppState, query: &FeedQuery) -> FetchResult<TelemetryDataset> {
    let results = query.results.unwrap_or(state.default_results);
    state.telemetry_service.fetch(&state.channel, results).await
}

/// Normalized feed of the configured channel
pub async fn get_feeds(
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match fetch_dataset(&state, &query).await {
        Ok(dataset) => match json_response(&dataset_to_json(&dataset), compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

/// CSV export of the configured channel's feed
pub async fn get_feeds_csv(
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let dataset = match fetch_dataset(&state, &query).await {
        Ok(dataset) => dataset,
        Err(e) => return e.into_response(),
    };

    let body = match to_csv_bytes(&dataset) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "CSV export error");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match csv_response(body, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Per-quantity panels for the configured field bindings
pub async fn get_dashboard(
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    match fetch_dataset(&state, &query).await {
        Ok(dataset) => {
            let dashboard = state.dashboard_service.build(&dataset);
            match json_response(&dashboard_to_json(dashboard), compress).await {
                Ok(response) => response,
                Err(status) => status.into_response(),
            }
        }
        Err(e) => e.into_response(),
    }
}
