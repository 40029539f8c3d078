use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// Opaque channel identifier in the remote video platform.
///
/// Stable for the duration of a single analysis request; never cached
/// across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelRef(pub String);

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Channel-level counters and metadata, fetched once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub id: ChannelRef,
    pub display_name: String,
    pub subscriber_count: u64,
    pub total_view_count: u64,
    pub total_video_count: u64,
    pub created_at: DateTime<Utc>,
    pub country: Option<String>,
    pub description: String,
}

/// One video from the channel's uploads listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration_seconds: u64,
}

/// Whether `average_views` was measured from collected videos or synthesized
/// from the subscriber count because the uploads listing came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewsSource {
    Measured,
    EstimatedFromSubscribers,
}

/// Derived statistics over the collected videos. Recomputed every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub video_count: usize,
    pub average_views: f64,
    pub average_likes: f64,
    pub average_comments: f64,
    pub engagement_rate_percent: f64,
    pub views_source: ViewsSource,
    pub top_videos: Vec<VideoRecord>,
    pub recent_videos: Vec<VideoRecord>,
}

/// Monthly/annual revenue breakdown in KRW. Pure function of
/// [`ChannelSummary`] + [`AggregateStats`]; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEstimate {
    pub category: String,
    pub applied_cpm: f64,
    pub subscriber_tier: String,
    pub monthly_ad_revenue: f64,
    pub monthly_sponsorship: f64,
    pub monthly_membership: f64,
    pub total_monthly: f64,
    pub annual_estimate: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
