// Reqwest-backed CatalogApi implementation for the YouTube Data API v3

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::pipeline::errors::PipelineError;
use crate::pipeline::traits::{
    CatalogApi, ChannelStats, SearchHit, SearchKind, SearchOrder, SearchPage, SearchRequest,
    VideoDetail,
};

use super::schema::{
    ChannelListResponse, SearchResponse, SearchResult, Thumbnails, VideoListResponse,
    VideoResource,
};

/// Environment variable the API key is read from
pub const YT_API_KEY_ENV: &str = "YT_API_KEY";

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const CHANNELS_URL: &str = "https://www.googleapis.com/youtube/v3/channels";

/// Transport configuration for the catalog client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API key; when absent every call short-circuits with
    /// [`PipelineError::MissingApiKey`] before any network I/O
    pub api_key: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            proxy: None,
            timeout_seconds: 30,
        }
    }
}

impl CatalogConfig {
    /// Configuration with the key taken from [`YT_API_KEY_ENV`]
    pub fn from_env() -> Self {
        Self::default().with_api_key(std::env::var(YT_API_KEY_ENV).ok())
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// YouTube Data API v3 client
pub struct YouTubeCatalog {
    config: CatalogConfig,
    http: reqwest::Client,
}

impl YouTubeCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, PipelineError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_seconds as u64));

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                PipelineError::Transport(format!("invalid proxy {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn from_env() -> Result<Self, PipelineError> {
        Self::new(CatalogConfig::from_env())
    }

    fn key(&self) -> Result<&str, PipelineError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(PipelineError::MissingApiKey)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, PipelineError> {
        let response = self.http.get(url).query(params).send().await?;
        let response = response.error_for_status()?;
        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogApi for YouTubeCatalog {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, PipelineError> {
        let key = self.key()?.to_string();

        let mut params = vec![
            ("key", key),
            ("part", "snippet".to_string()),
            ("maxResults", request.page_size.to_string()),
            (
                "type",
                match request.kind {
                    SearchKind::Source => "channel".to_string(),
                    SearchKind::Item => "video".to_string(),
                },
            ),
        ];
        if let Some(query) = &request.query {
            params.push(("q", query.clone()));
        }
        if let Some(channel_id) = &request.channel_id {
            params.push(("channelId", channel_id.clone()));
        }
        if let Some(category_id) = &request.category_id {
            params.push(("videoCategoryId", category_id.clone()));
        }
        if request.order == SearchOrder::Date {
            params.push(("order", "date".to_string()));
        }
        if let Some(token) = &request.page_token {
            params.push(("pageToken", token.clone()));
        }

        let response: SearchResponse = self.get_json(SEARCH_URL, &params).await?;
        let hits = response
            .items
            .into_iter()
            .map(|item| to_search_hit(item, request.kind))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchPage {
            hits,
            next_page_token: response.next_page_token,
        })
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetail>, PipelineError> {
        let key = self.key()?.to_string();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = vec![
            ("key", key),
            ("part", "snippet,contentDetails".to_string()),
            ("id", ids.join(",")),
        ];

        let response: VideoListResponse = self.get_json(VIDEOS_URL, &params).await?;
        Ok(response.items.into_iter().map(to_video_detail).collect())
    }

    async fn channel_statistics(&self, ids: &[String]) -> Result<Vec<ChannelStats>, PipelineError> {
        let key = self.key()?.to_string();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = vec![
            ("key", key),
            ("part", "statistics".to_string()),
            ("id", ids.join(",")),
        ];

        let response: ChannelListResponse = self.get_json(CHANNELS_URL, &params).await?;
        Ok(response
            .items
            .into_iter()
            .map(|item| ChannelStats {
                subscriber_count: item
                    .statistics
                    .and_then(|s| s.subscriber_count)
                    .and_then(|count| count.parse().ok()),
                id: item.id,
            })
            .collect())
    }
}

/// Convert a raw search result into a [`SearchHit`], failing fast when the
/// id does not match the requested kind.
fn to_search_hit(item: SearchResult, kind: SearchKind) -> Result<SearchHit, PipelineError> {
    let id = match kind {
        SearchKind::Source => item.id.channel_id,
        SearchKind::Item => item.id.video_id,
    }
    .ok_or_else(|| PipelineError::Parse(format!("search hit missing {} id", kind)))?;

    let thumbnail = match kind {
        // Channel avatars prefer the default resolution, videos the medium one
        SearchKind::Source => avatar_thumbnail(&item.snippet.thumbnails),
        SearchKind::Item => item_thumbnail(&item.snippet.thumbnails),
    }
    .unwrap_or_default();

    Ok(SearchHit {
        id,
        title: item.snippet.title,
        description: item.snippet.description,
        thumbnail,
        published_at: item.snippet.published_at,
    })
}

/// Convert a raw video record into a [`VideoDetail`]. A record missing
/// every thumbnail resolution is still processed — the thumbnail defaults
/// to empty rather than failing the whole chunk.
fn to_video_detail(item: VideoResource) -> VideoDetail {
    let thumbnail = item_thumbnail(&item.snippet.thumbnails).unwrap_or_else(|| {
        tracing::warn!(video = %item.id, "video record missing thumbnail, defaulting to empty");
        String::new()
    });
    VideoDetail {
        id: item.id,
        title: item.snippet.title,
        thumbnail,
        duration_encoding: item.content_details.duration,
        published_at: item.snippet.published_at,
    }
}

fn avatar_thumbnail(thumbnails: &Thumbnails) -> Option<String> {
    thumbnails
        .default
        .as_ref()
        .or(thumbnails.medium.as_ref())
        .map(|t| t.url.clone())
}

fn item_thumbnail(thumbnails: &Thumbnails) -> Option<String> {
    thumbnails
        .medium
        .as_ref()
        .or(thumbnails.default.as_ref())
        .map(|t| t.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::Thumbnail;

    fn make_thumbnails(default: Option<&str>, medium: Option<&str>) -> Thumbnails {
        Thumbnails {
            default: default.map(|url| Thumbnail {
                url: url.to_string(),
            }),
            medium: medium.map(|url| Thumbnail {
                url: url.to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits_every_operation() {
        // Default config has no key; no request must ever leave the client
        let client = YouTubeCatalog::new(CatalogConfig::default()).unwrap();

        let search = client.search(&SearchRequest::sources("query")).await;
        assert!(matches!(search, Err(PipelineError::MissingApiKey)));

        let details = client.video_details(&["abc".to_string()]).await;
        assert!(matches!(details, Err(PipelineError::MissingApiKey)));

        let stats = client.channel_statistics(&["UC1".to_string()]).await;
        assert!(matches!(stats, Err(PipelineError::MissingApiKey)));
    }

    #[test]
    fn test_avatar_prefers_default_resolution() {
        let thumbs = make_thumbnails(Some("default.jpg"), Some("medium.jpg"));
        assert_eq!(avatar_thumbnail(&thumbs).as_deref(), Some("default.jpg"));

        let thumbs = make_thumbnails(None, Some("medium.jpg"));
        assert_eq!(avatar_thumbnail(&thumbs).as_deref(), Some("medium.jpg"));
    }

    #[test]
    fn test_item_prefers_medium_resolution() {
        let thumbs = make_thumbnails(Some("default.jpg"), Some("medium.jpg"));
        assert_eq!(item_thumbnail(&thumbs).as_deref(), Some("medium.jpg"));

        let thumbs = make_thumbnails(Some("default.jpg"), None);
        assert_eq!(item_thumbnail(&thumbs).as_deref(), Some("default.jpg"));
    }

    #[test]
    fn test_video_without_thumbnails_is_kept_with_empty_url() {
        let item = VideoResource {
            id: "abc".to_string(),
            snippet: crate::catalog::schema::Snippet {
                title: "A Song".to_string(),
                description: String::new(),
                thumbnails: make_thumbnails(None, None),
                published_at: Some("2024-01-01T00:00:00Z".to_string()),
            },
            content_details: crate::catalog::schema::ContentDetails {
                duration: "PT4M13S".to_string(),
            },
        };

        let detail = to_video_detail(item);
        assert_eq!(detail.id, "abc");
        assert_eq!(detail.thumbnail, "");
        assert_eq!(detail.duration_encoding, "PT4M13S");
    }

    #[test]
    fn test_hit_with_wrong_id_kind_is_rejected() {
        let item = SearchResult {
            id: crate::catalog::schema::SearchResultId {
                video_id: Some("abc".to_string()),
                channel_id: None,
            },
            snippet: crate::catalog::schema::Snippet {
                title: "t".to_string(),
                description: String::new(),
                thumbnails: make_thumbnails(None, None),
                published_at: None,
            },
        };

        let result = to_search_hit(item, SearchKind::Source);
        assert!(matches!(result, Err(PipelineError::Parse(_))));
    }
}
