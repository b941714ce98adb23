// CatalogApi trait and transport-boundary types

use async_trait::async_trait;
use std::fmt;

use super::errors::PipelineError;
use super::models::PAGE_SIZE;

/// What a search request is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Content sources (channels)
    Source,
    /// Playable items (videos)
    Item,
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// Ordering hint for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    #[default]
    Relevance,
    /// Publish date, newest first
    Date,
}

/// One paginated search request against the catalog
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub kind: SearchKind,
    /// Free-text query; mutually optional with `channel_id`
    pub query: Option<String>,
    /// Restrict item results to one channel
    pub channel_id: Option<String>,
    /// Optional category filter (items only)
    pub category_id: Option<String>,
    pub order: SearchOrder,
    /// At most 50 per the remote API
    pub page_size: u32,
    /// Continuation token from the previous page
    pub page_token: Option<String>,
}

impl SearchRequest {
    fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            query: None,
            channel_id: None,
            category_id: None,
            order: SearchOrder::default(),
            page_size: PAGE_SIZE,
            page_token: None,
        }
    }

    /// Search for content sources matching `query`
    pub fn sources(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            ..Self::new(SearchKind::Source)
        }
    }

    /// Search for items matching `query`
    pub fn items_by_keyword(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            ..Self::new(SearchKind::Item)
        }
    }

    /// List items belonging to one channel
    pub fn items_in_channel(channel_id: &str) -> Self {
        Self {
            channel_id: Some(channel_id.to_string()),
            ..Self::new(SearchKind::Item)
        }
    }

    pub fn with_category(mut self, category_id: &str) -> Self {
        self.category_id = Some(category_id.to_string());
        self
    }

    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }
}

/// A lightweight search hit; full metadata comes from `video_details`
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub published_at: Option<String>,
}

/// One page of search hits plus the continuation token, when more exist
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub next_page_token: Option<String>,
}

/// Full per-item metadata from the detail endpoint
#[derive(Debug, Clone)]
pub struct VideoDetail {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    /// Raw ISO-8601 duration designator, e.g. "PT4M13S"
    pub duration_encoding: String,
    pub published_at: Option<String>,
}

/// Per-channel statistics record
#[derive(Debug, Clone)]
pub struct ChannelStats {
    pub id: String,
    pub subscriber_count: Option<u64>,
}

/// Read-only access to the remote content catalog.
///
/// Implementations must check for a configured API key before any network
/// I/O and short-circuit with [`PipelineError::MissingApiKey`] when absent.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of a search; the caller follows `next_page_token`
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, PipelineError>;

    /// Full metadata for up to 50 item ids
    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetail>, PipelineError>;

    /// Subscriber counts for a batch of channel ids
    async fn channel_statistics(&self, ids: &[String]) -> Result<Vec<ChannelStats>, PipelineError>;
}
