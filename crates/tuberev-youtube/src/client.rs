//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and quota-aware error classification. Non-2xx responses carry a JSON
//! error envelope whose `reason` field distinguishes quota exhaustion from
//! other API failures; [`YoutubeError::QuotaExceeded`] surfaces the former
//! so callers can show a "try again later" hint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::YoutubeError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ChannelItem, ChannelListResponse, ChannelSearchItem, PlaylistItemsResponse, PlaylistPage,
    SearchListResponse, VideoItem, VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Maximum number of ids accepted by the batched `videos.list` operation.
pub const VIDEO_BATCH_LIMIT: usize = 50;

/// Client for the `YouTube` Data API v3.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`YoutubeClient::new`] for production or [`YoutubeClient::with_base_url`]
/// to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tuberev/0.1 (channel-analytics)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // resource paths append to it rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| YoutubeError::Api {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 2,
            backoff_base_ms: 500,
        })
    }

    /// Overrides the retry policy for transient upstream failures.
    #[must_use]
    pub fn retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Searches for channels matching a free-text query.
    ///
    /// Calls `search.list` with `type=channel`, returning at most
    /// `max_results` items in the API's relevance order.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] if the API rejects the call for
    ///   quota/rate-limit reasons.
    /// - [`YoutubeError::Api`] on other API-level failures.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response shape is unexpected.
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<Vec<ChannelSearchItem>, YoutubeError> {
        let max_str = max_results.to_string();
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("maxResults", &max_str),
            ],
        );
        let body = self.request_json_with_retry(&url, "search").await?;

        let parsed: SearchListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| ChannelSearchItem {
                channel_id: item.snippet.channel_id,
                title: item.snippet.title,
            })
            .collect())
    }

    /// Fetches a channel's snippet, statistics, and uploads playlist id in
    /// a single `channels.list` call.
    ///
    /// Returns `None` when the id matches no channel.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_channels`].
    pub async fn get_channel(&self, channel_id: &str) -> Result<Option<ChannelItem>, YoutubeError> {
        let url = self.build_url(
            "channels",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("id", channel_id),
            ],
        );
        let body = self.request_json_with_retry(&url, "channels").await?;

        let parsed: ChannelListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("channels(id={channel_id})"),
                source: e,
            })?;

        Ok(parsed.items.into_iter().next())
    }

    /// Fetches one page of a playlist's items via `playlistItems.list`.
    ///
    /// `page_size` is capped at 50 by the API. Pass the previous page's
    /// `next_page_token` to continue; `None` fetches the first page.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_channels`].
    pub async fn list_uploads_page(
        &self,
        playlist_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistPage, YoutubeError> {
        let max_str = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_str.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("playlistItems", &params);
        let body = self.request_json_with_retry(&url, "playlistItems").await?;

        let parsed: PlaylistItemsResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("playlistItems(playlistId={playlist_id})"),
                source: e,
            })?;

        Ok(PlaylistPage {
            video_ids: parsed
                .items
                .into_iter()
                .map(|item| item.snippet.resource_id.video_id)
                .collect(),
            next_page_token: parsed.next_page_token,
        })
    }

    /// Fetches statistics, snippet, and duration for up to
    /// [`VIDEO_BATCH_LIMIT`] videos in one `videos.list` call.
    ///
    /// Callers must chunk larger id sets; one call per page, never one call
    /// per video. An empty slice returns an empty vec without a request.
    /// The API does not guarantee response order matches the id order.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`YoutubeClient::search_channels`].
    pub async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoItem>, YoutubeError> {
        debug_assert!(
            video_ids.len() <= VIDEO_BATCH_LIMIT,
            "videos.list accepts at most {VIDEO_BATCH_LIMIT} ids per call"
        );
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = video_ids.join(",");
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("id", &joined),
            ],
        );
        let body = self.request_json_with_retry(&url, "videos").await?;

        let parsed: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos({} ids)", video_ids.len()),
                source: e,
            })?;

        Ok(parsed.items)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, resource: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{resource}", self.base_url.path()));
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request through the retry policy, classifies non-2xx
    /// responses, and parses the body as JSON.
    ///
    /// `context` names the operation in errors; it never contains the URL,
    /// which would leak the API key into logs.
    async fn request_json_with_retry(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, YoutubeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(url, context)
        })
        .await
    }

    async fn request_json(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_api_failure(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Classifies a non-2xx response from the error envelope:
///
/// ```json
/// { "error": { "code": 403, "message": "...",
///              "errors": [ { "reason": "quotaExceeded", ... } ] } }
/// ```
///
/// Quota and rate-limit reasons become [`YoutubeError::QuotaExceeded`];
/// everything else becomes [`YoutubeError::Api`].
fn classify_api_failure(status: u16, body: &str) -> YoutubeError {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let error = parsed.get("error");

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown error")
        .to_owned();

    let reason = error
        .and_then(|e| e.get("errors"))
        .and_then(|errs| errs.get(0))
        .and_then(|first| first.get("reason"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    if reason.contains("quota") || reason.contains("rateLimit") {
        return YoutubeError::QuotaExceeded(message);
    }

    YoutubeError::Api { status, message }
}
