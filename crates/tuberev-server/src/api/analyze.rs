use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use tuberev_core::{AggregateStats, ChannelSummary, RevenueEstimate};

use crate::middleware::RequestId;

use super::{map_youtube_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    pub query: String,
    pub max_videos: Option<u32>,
}

/// The channel summary flattened together with the derived statistics and
/// the revenue breakdown, as one flat JSON object.
#[derive(Debug, Serialize)]
pub(super) struct AnalyzeData {
    #[serde(flatten)]
    pub channel: ChannelSummary,
    #[serde(flatten)]
    pub stats: AggregateStats,
    #[serde(flatten)]
    pub revenue: RevenueEstimate,
}

/// Runs the full pipeline for one request: resolve → collect → aggregate →
/// estimate. Each request is independent and stateless; nothing is cached
/// across calls.
pub(super) async fn analyze_channel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeData>>, ApiError> {
    let max_videos = request
        .max_videos
        .unwrap_or(state.max_videos_default)
        .clamp(1, state.max_videos_cap);

    let channel = tuberev_youtube::resolve(&state.client, &request.query)
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    let (summary, videos) = tuberev_youtube::collect(&state.client, &channel, max_videos)
        .await
        .map_err(|e| map_youtube_error(req_id.0.clone(), &e))?;

    let stats = tuberev_analysis::aggregate(&summary, &videos);
    let revenue = tuberev_analysis::estimate(&summary, &stats, &state.assumptions);

    tracing::info!(
        channel = %summary.id,
        videos = stats.video_count,
        "analysis complete"
    );

    Ok(Json(ApiResponse {
        data: AnalyzeData {
            channel: summary,
            stats,
            revenue,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
