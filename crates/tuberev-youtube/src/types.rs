//! Wire types for the `YouTube` Data API v3 responses.
//!
//! Only the fields the pipeline reads are modeled. The API encodes all
//! counters as JSON strings and omits them entirely when a channel hides
//! them, so counter fields go through [`de_count`] and default to 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserializes a string-encoded counter (`"12345"`), defaulting to 0 when
/// the field is absent via `#[serde(default)]`.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<u64>().map_err(serde::de::Error::custom)
}

// --- search.list ---

#[derive(Debug, Deserialize)]
pub(crate) struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchSnippet {
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
}

/// One result from the channel-search operation.
#[derive(Debug, Clone)]
pub struct ChannelSearchItem {
    pub channel_id: String,
    pub title: String,
}

// --- channels.list ---

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

/// A channel resource with snippet, statistics, and the uploads playlist id.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount", default, deserialize_with = "de_count")]
    pub subscriber_count: u64,
    #[serde(rename = "viewCount", default, deserialize_with = "de_count")]
    pub view_count: u64,
    #[serde(rename = "videoCount", default, deserialize_with = "de_count")]
    pub video_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

// --- playlistItems.list ---

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemSnippet {
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// One page of the uploads listing: video ids in native (most recent first)
/// order plus the cursor for the next page, if any.
#[derive(Debug, Clone)]
pub struct PlaylistPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

// --- videos.list ---

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// A video resource with snippet, statistics, and duration.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: VideoStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "de_count")]
    pub view_count: u64,
    #[serde(rename = "likeCount", default, deserialize_with = "de_count")]
    pub like_count: u64,
    #[serde(rename = "commentCount", default, deserialize_with = "de_count")]
    pub comment_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoContentDetails {
    pub duration: String,
}

/// Parses an ISO-8601 duration as used by the API (`PT1H2M3S`, `P1DT2H`)
/// into whole seconds.
///
/// Unknown designators and malformed tails are ignored; the result is the
/// sum of the components that did parse. Durations never carry fractional
/// seconds in this API.
#[must_use]
pub(crate) fn parse_iso8601_duration(raw: &str) -> u64 {
    let mut seconds = 0u64;
    let mut digits = String::new();
    let mut in_time = false;

    for c in raw.chars() {
        match c {
            'P' => {}
            'T' => in_time = true,
            '0'..='9' => digits.push(c),
            _ => {
                let Ok(value) = digits.parse::<u64>() else {
                    digits.clear();
                    continue;
                };
                digits.clear();
                let multiplier = match (c, in_time) {
                    ('W', false) => 604_800,
                    ('D', false) => 86_400,
                    ('H', true) => 3_600,
                    ('M', true) => 60,
                    ('S', true) => 1,
                    // Calendar months/years never appear in video durations.
                    _ => continue,
                };
                seconds = seconds.saturating_add(value.saturating_mul(multiplier));
            }
        }
    }

    seconds
}
