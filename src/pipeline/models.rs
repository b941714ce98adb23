// Common data models for the resolution pipeline

use serde::{Deserialize, Serialize};

/// Minimum duration for an item to count as playable; anything shorter is a
/// "short" and is excluded from playlists.
pub const SHORTS_THRESHOLD_SECS: u64 = 60;

/// Hard upper bound on the number of items in a returned playlist.
pub const MAX_PLAYLIST_LEN: usize = 100;

/// Page size for paginated search requests (remote maximum).
pub const PAGE_SIZE: u32 = 50;

/// How many continuation pages a lister will follow.
pub const MAX_PAGES: u32 = 2;

/// Maximum number of channel candidates returned by source resolution.
pub const MAX_SOURCE_CANDIDATES: u32 = 10;

/// Hard ceiling on ids per detail request, imposed by the remote API.
pub const DETAIL_CHUNK: usize = 50;

/// Term appended to the raw query when resolving channels. This is a policy
/// choice biasing resolution toward music channels, not a structural
/// requirement; remove it to resolve sources in any domain.
pub const MUSIC_BIAS_TERM: &str = "music";

/// YouTube category id for Music, used by the category-constrained keyword
/// lister variant.
pub const MUSIC_CATEGORY_ID: &str = "10";

/// A catalog entity (channel) that owns a collection of media items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    /// Opaque unique channel id
    pub id: String,
    pub title: String,
    pub description: String,
    /// Avatar image URL
    pub avatar: String,
    /// Subscriber count; absent when the statistics lookup failed or the
    /// channel hides the count
    pub subscriber_count: Option<u64>,
}

/// A playable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Opaque id, unique within a result set
    pub id: String,
    pub title: String,
    /// Medium-resolution thumbnail URL
    pub thumbnail: String,
    pub duration_secs: u64,
    /// ISO-8601 publish timestamp; items without one rank last
    pub published_at: Option<String>,
}

/// An ordered playlist of at most [`MAX_PLAYLIST_LEN`] items. Order is
/// playback order. An empty set with a notice is a legitimate "nothing
/// found" outcome, not an error; errors are carried by `Result` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<MediaItem>,
    /// True when the playlist came from the keyword-escalation path rather
    /// than a resolved channel, so the caller can render an explanatory
    /// notice
    pub fallback_sourced: bool,
    /// User-facing message for empty outcomes
    pub notice: Option<String>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
