//! YouTube Data API v3 client, channel-identifier resolver, and paginated
//! uploads collector.
//!
//! The pipeline's only I/O lives here: `resolve` turns free-form user input
//! into a canonical channel id, `collect` materializes the channel summary
//! and a bounded list of recent uploads. Everything downstream is pure.

mod client;
mod collector;
mod error;
mod resolver;
mod retry;
mod types;

pub use client::{YoutubeClient, VIDEO_BATCH_LIMIT};
pub use collector::{collect, PAGE_SIZE};
pub use error::YoutubeError;
pub use resolver::{parse_input, resolve, ParsedInput};
pub use types::{ChannelItem, ChannelSearchItem, PlaylistPage, VideoItem};
