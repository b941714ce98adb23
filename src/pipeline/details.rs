// Batched detail retrieval for item ids

use super::duration::parse_iso8601;
use super::errors::PipelineError;
use super::models::{MediaItem, DETAIL_CHUNK};
use super::traits::CatalogApi;

/// Resolves item ids to full [`MediaItem`] metadata, splitting the id list
/// into chunks no larger than [`DETAIL_CHUNK`] (the remote API ceiling).
/// Output order is unspecified; ranking happens downstream. A failed chunk
/// propagates its error rather than silently dropping items — retry or
/// abort policy belongs to the coordinator.
pub struct DetailBatchFetcher<'a> {
    api: &'a dyn CatalogApi,
}

impl<'a> DetailBatchFetcher<'a> {
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, ids: &[String]) -> Result<Vec<MediaItem>, PipelineError> {
        let mut items = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(DETAIL_CHUNK) {
            let details = self.api.video_details(chunk).await?;
            // The detail endpoint omits deleted/private videos, so a chunk
            // may legitimately return fewer records than requested
            tracing::debug!(
                requested = chunk.len(),
                returned = details.len(),
                "detail chunk fetched"
            );

            for detail in details {
                items.push(MediaItem {
                    duration_secs: parse_iso8601(&detail.duration_encoding),
                    id: detail.id,
                    title: detail.title,
                    thumbnail: detail.thumbnail,
                    published_at: detail.published_at,
                });
            }
        }

        Ok(items)
    }
}
