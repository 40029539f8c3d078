//! Metric aggregation over collected video records.

use tuberev_core::{AggregateStats, ChannelSummary, VideoRecord, ViewsSource};

/// How many videos the top/recent selections keep.
const SELECTION_SIZE: usize = 5;

/// Multiplier applied to the subscriber count when the uploads listing is
/// empty and average views must be synthesized. A heuristic substitute for
/// a measurement, never reported as one.
const FALLBACK_VIEWS_PER_SUBSCRIBER: f64 = 0.3;

/// Engagement rate assumed when no videos were collected.
const FALLBACK_ENGAGEMENT_PERCENT: f64 = 3.0;

/// Reduces the collected videos and channel counters into derived statistics.
///
/// Pure function. Means are arithmetic over `videos`; the engagement rate is
/// computed from aggregate sums, `(Σlikes + Σcomments) / Σviews × 100`, not
/// as a mean of per-video ratios — low-view videos would otherwise dominate.
/// It is 0 when total views are 0.
///
/// When `videos` is empty (a brand-new channel, or one with all uploads
/// hidden), `average_views` falls back to `subscriber_count × 0.3` and the
/// result is tagged [`ViewsSource::EstimatedFromSubscribers`] so consumers
/// can distinguish measured from estimated.
#[must_use]
pub fn aggregate(summary: &ChannelSummary, videos: &[VideoRecord]) -> AggregateStats {
    if videos.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let estimated_views = summary.subscriber_count as f64 * FALLBACK_VIEWS_PER_SUBSCRIBER;
        return AggregateStats {
            video_count: 0,
            average_views: estimated_views,
            average_likes: 0.0,
            average_comments: 0.0,
            engagement_rate_percent: FALLBACK_ENGAGEMENT_PERCENT,
            views_source: ViewsSource::EstimatedFromSubscribers,
            top_videos: Vec::new(),
            recent_videos: Vec::new(),
        };
    }

    let total_views: u64 = videos.iter().map(|v| v.view_count).sum();
    let total_likes: u64 = videos.iter().map(|v| v.like_count).sum();
    let total_comments: u64 = videos.iter().map(|v| v.comment_count).sum();

    #[allow(clippy::cast_precision_loss)]
    let count = videos.len() as f64;

    #[allow(clippy::cast_precision_loss)]
    let engagement_rate_percent = if total_views == 0 {
        0.0
    } else {
        (total_likes + total_comments) as f64 / total_views as f64 * 100.0
    };

    #[allow(clippy::cast_precision_loss)]
    AggregateStats {
        video_count: videos.len(),
        average_views: total_views as f64 / count,
        average_likes: total_likes as f64 / count,
        average_comments: total_comments as f64 / count,
        engagement_rate_percent,
        views_source: ViewsSource::Measured,
        top_videos: top_videos(videos),
        recent_videos: recent_videos(videos),
    }
}

/// The 5 records with greatest view count; ties broken by more-recent
/// publish date first. The input sequence is left untouched.
fn top_videos(videos: &[VideoRecord]) -> Vec<VideoRecord> {
    let mut sorted: Vec<VideoRecord> = videos.to_vec();
    sorted.sort_by(|a, b| {
        b.view_count
            .cmp(&a.view_count)
            .then(b.published_at.cmp(&a.published_at))
    });
    sorted.truncate(SELECTION_SIZE);
    sorted
}

/// The 5 most recently published records; ties broken by greater view count.
fn recent_videos(videos: &[VideoRecord]) -> Vec<VideoRecord> {
    let mut sorted: Vec<VideoRecord> = videos.to_vec();
    sorted.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then(b.view_count.cmp(&a.view_count))
    });
    sorted.truncate(SELECTION_SIZE);
    sorted
}
