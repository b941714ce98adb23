// Typed response schemas for the YouTube Data API v3 endpoints.
//
// Every endpoint gets an explicit struct; a response that does not match is
// rejected at the transport boundary instead of leaking undefined shapes
// into the pipeline.

use serde::Deserialize;

/// `search` endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: Snippet,
}

/// Search hit ids are polymorphic: exactly one of these is set depending on
/// the requested result type
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnails: Thumbnails,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// `videos` (item detail) endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub snippet: Snippet,
    pub content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    /// ISO-8601 duration designator, e.g. "PT4M13S"
    pub duration: String,
}

/// `channels` (statistics) endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    /// The API serializes counts as decimal strings
    pub subscriber_count: Option<String>,
}
