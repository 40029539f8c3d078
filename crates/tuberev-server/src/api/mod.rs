mod analyze;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use tuberev_analysis::RevenueAssumptions;
use tuberev_youtube::{YoutubeClient, YoutubeError};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<YoutubeClient>,
    pub assumptions: Arc<RevenueAssumptions>,
    pub max_videos_default: u32,
    pub max_videos_cap: u32,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "quota_exceeded" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a pipeline error to a structured API error. Not-found and
/// validation failures keep their messages; upstream failures are logged in
/// full and surfaced generically, with quota exhaustion carrying an
/// explicit try-again-later hint.
pub(super) fn map_youtube_error(request_id: String, error: &YoutubeError) -> ApiError {
    match error {
        YoutubeError::EmptyQuery => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        YoutubeError::ChannelNotFound(_) => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        YoutubeError::QuotaExceeded(_) => {
            tracing::warn!(error = %error, "upstream quota exhausted");
            ApiError::new(
                request_id,
                "quota_exceeded",
                "video platform quota exhausted, try again later",
            )
        }
        YoutubeError::Http(_) | YoutubeError::Api { .. } | YoutubeError::Deserialize { .. } => {
            tracing::error!(error = %error, "upstream request failed");
            ApiError::new(
                request_id,
                "upstream_error",
                "video platform request failed",
            )
        }
    }
}

#[must_use]
pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(60, Duration::from_secs(60))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let analysis = Router::new()
        .route("/api/v1/analyze", post(analyze::analyze_channel))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .route("/healthz", get(health))
        .merge(analysis)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
