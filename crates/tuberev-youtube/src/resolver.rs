//! Channel-identifier resolution.
//!
//! Turns free-form user input — a channel URL in one of several shapes, a
//! handle, or plain search text — into a canonical [`ChannelRef`]. The URL
//! parse is pure; only the search path touches the network, with exactly
//! one call.

use percent_encoding::percent_decode_str;
use regex::Regex;

use tuberev_core::ChannelRef;

use crate::client::YoutubeClient;
use crate::error::YoutubeError;

/// How many search results to request. Only the first is consumed; "first
/// result wins" with no relevance threshold, preserved from the source
/// behavior as a known simplification.
const SEARCH_MAX_RESULTS: u8 = 5;

/// Outcome of the pure input-classification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// A `/channel/<id>` URL. The id is already canonical; no network call.
    ChannelId(String),
    /// A handle, custom URL, username, or plain text to feed to search.
    Search(String),
}

/// Classifies user input without any I/O.
///
/// Recognized URL shapes, checked in order:
/// - `youtube.com/channel/<id>` — id returned verbatim
/// - `youtube.com/@<handle>`, `/c/<name>`, `/user/<name>` — trailing segment
///   percent-decoded and routed to search
///
/// Anything else is treated as plain search text.
///
/// # Errors
///
/// Returns [`YoutubeError::EmptyQuery`] for empty or whitespace-only input.
pub fn parse_input(input: &str) -> Result<ParsedInput, YoutubeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(YoutubeError::EmptyQuery);
    }

    let channel_re =
        Regex::new(r"youtube\.com/channel/([A-Za-z0-9_-]+)").expect("valid channel-id regex");
    if let Some(caps) = channel_re.captures(trimmed) {
        return Ok(ParsedInput::ChannelId(caps[1].to_owned()));
    }

    let segment_re =
        Regex::new(r"youtube\.com/(?:@|c/|user/)([^/?#]+)").expect("valid path-segment regex");
    if let Some(caps) = segment_re.captures(trimmed) {
        let decoded = percent_decode_str(&caps[1]).decode_utf8_lossy().into_owned();
        return Ok(ParsedInput::Search(decoded));
    }

    Ok(ParsedInput::Search(trimmed.to_owned()))
}

/// Resolves user input to a canonical channel id.
///
/// `/channel/<id>` URLs resolve locally with zero network calls. Everything
/// else issues one channel-search call and takes the first result.
///
/// # Errors
///
/// - [`YoutubeError::EmptyQuery`] for empty input, before any network call.
/// - [`YoutubeError::ChannelNotFound`] when the search returns no results.
/// - Any client error from the search call, unchanged.
pub async fn resolve(client: &YoutubeClient, input: &str) -> Result<ChannelRef, YoutubeError> {
    match parse_input(input)? {
        ParsedInput::ChannelId(id) => Ok(ChannelRef(id)),
        ParsedInput::Search(query) => {
            let results = client.search_channels(&query, SEARCH_MAX_RESULTS).await?;
            results
                .into_iter()
                .next()
                .map(|item| {
                    tracing::debug!(query = %query, channel = %item.title, "resolved via search");
                    ChannelRef(item.channel_id)
                })
                .ok_or(YoutubeError::ChannelNotFound(query))
        }
    }
}
