//! Paginated uploads collector.
//!
//! Walks the channel's uploads playlist page by page and batch-fetches
//! per-video details, one `videos.list` call per page. The resulting
//! sequence preserves the listing's native order (most recent first) and
//! is truncated client-side to exactly `max_videos`.

use std::collections::HashMap;

use tuberev_core::{ChannelRef, ChannelSummary, VideoRecord};

use crate::client::YoutubeClient;
use crate::error::YoutubeError;
use crate::types::{parse_iso8601_duration, ChannelItem, VideoItem};

/// Page size of the uploads listing, capped by the remote API.
pub const PAGE_SIZE: u32 = 50;

/// Materializes the channel summary and up to `max_videos` recent uploads.
///
/// Issues one `channels.list` call, then at most
/// `ceil(max_videos / PAGE_SIZE)` listing calls and the same number of
/// batched detail calls. Any page or batch failure aborts the whole
/// collection; partial results are discarded.
///
/// # Errors
///
/// - [`YoutubeError::ChannelNotFound`] if the id matches no channel.
/// - Any client error from a page or batch fetch, unchanged.
pub async fn collect(
    client: &YoutubeClient,
    channel: &ChannelRef,
    max_videos: u32,
) -> Result<(ChannelSummary, Vec<VideoRecord>), YoutubeError> {
    let item = client
        .get_channel(&channel.0)
        .await?
        .ok_or_else(|| YoutubeError::ChannelNotFound(channel.0.clone()))?;

    let uploads_id = item.content_details.related_playlists.uploads.clone();
    let summary = summary_from_item(item);

    let target = max_videos as usize;
    let mut videos: Vec<VideoRecord> = Vec::with_capacity(target.min(PAGE_SIZE as usize));
    let mut page_token: Option<String> = None;

    while videos.len() < target {
        #[allow(clippy::cast_possible_truncation)]
        let page_size = PAGE_SIZE.min((target - videos.len()) as u32);
        let page = client
            .list_uploads_page(&uploads_id, page_size, page_token.as_deref())
            .await?;

        if page.video_ids.is_empty() {
            break;
        }

        let details = client.get_videos(&page.video_ids).await?;

        // videos.list does not guarantee response order; re-key by id so the
        // uploads listing's native order is authoritative.
        let mut by_id: HashMap<String, VideoItem> = details
            .into_iter()
            .map(|video| (video.id.clone(), video))
            .collect();

        for id in &page.video_ids {
            if videos.len() >= target {
                break;
            }
            if let Some(video) = by_id.remove(id) {
                videos.push(record_from_item(video));
            }
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    videos.truncate(target);
    tracing::debug!(
        channel = %summary.id,
        collected = videos.len(),
        requested = max_videos,
        "uploads collection complete"
    );

    Ok((summary, videos))
}

fn summary_from_item(item: ChannelItem) -> ChannelSummary {
    ChannelSummary {
        id: ChannelRef(item.id),
        display_name: item.snippet.title,
        subscriber_count: item.statistics.subscriber_count,
        total_view_count: item.statistics.view_count,
        total_video_count: item.statistics.video_count,
        created_at: item.snippet.published_at,
        country: item.snippet.country,
        description: item.snippet.description,
    }
}

fn record_from_item(video: VideoItem) -> VideoRecord {
    VideoRecord {
        id: video.id,
        title: video.snippet.title,
        published_at: video.snippet.published_at,
        view_count: video.statistics.view_count,
        like_count: video.statistics.like_count,
        comment_count: video.statistics.comment_count,
        duration_seconds: parse_iso8601_duration(&video.content_details.duration),
    }
}
