// Source resolution: free-text query → candidate channels

use super::errors::PipelineError;
use super::models::{ContentSource, MAX_SOURCE_CANDIDATES, MUSIC_BIAS_TERM};
use super::traits::{CatalogApi, SearchRequest};

/// Resolves a query to at most [`MAX_SOURCE_CANDIDATES`] channels, each
/// enriched with a subscriber count from a single batched statistics lookup.
/// Enrichment is best-effort: a failed or empty statistics response never
/// drops a structurally valid candidate, it only leaves the count absent.
pub struct SourceResolver<'a> {
    api: &'a dyn CatalogApi,
}

impl<'a> SourceResolver<'a> {
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, query: &str) -> Result<Vec<ContentSource>, PipelineError> {
        // The bias term steers resolution toward music channels. The
        // caller-visible query is never mutated; the biased form exists only
        // for this request.
        let biased = format!("{} {}", query.trim(), MUSIC_BIAS_TERM);
        let request = SearchRequest::sources(&biased).with_page_size(MAX_SOURCE_CANDIDATES);

        let mut page = self.api.search(&request).await?;
        page.hits.truncate(MAX_SOURCE_CANDIDATES as usize);
        if page.hits.is_empty() {
            // Empty resolution is a legitimate outcome, not an error
            return Ok(Vec::new());
        }

        let ids: Vec<String> = page.hits.iter().map(|hit| hit.id.clone()).collect();
        let stats = match self.api.channel_statistics(&ids).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "statistics enrichment failed, keeping candidates without counts"
                );
                Vec::new()
            }
        };

        Ok(page
            .hits
            .into_iter()
            .map(|hit| {
                let subscriber_count = stats
                    .iter()
                    .find(|s| s.id == hit.id)
                    .and_then(|s| s.subscriber_count);
                ContentSource {
                    id: hit.id,
                    title: hit.title,
                    description: hit.description,
                    avatar: hit.thumbnail,
                    subscriber_count,
                }
            })
            .collect())
    }
}
