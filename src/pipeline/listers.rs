// Paginated id listing: by channel and by keyword

use std::collections::HashSet;

use super::errors::PipelineError;
use super::models::{MAX_PAGES, MUSIC_CATEGORY_ID, PAGE_SIZE};
use super::traits::{CatalogApi, SearchOrder, SearchRequest};

/// Lists a channel's item ids, newest first. Duration and the rest of the
/// metadata come from the detail endpoint afterwards; the listing endpoint
/// does not carry them.
pub struct SourceLister<'a> {
    api: &'a dyn CatalogApi,
}

impl<'a> SourceLister<'a> {
    pub fn new(api: &'a dyn CatalogApi) -> Self {
        Self { api }
    }

    pub async fn list_recent(&self, source_id: &str) -> Result<Vec<String>, PipelineError> {
        let request = SearchRequest::items_in_channel(source_id)
            .with_order(SearchOrder::Date)
            .with_page_size(PAGE_SIZE);
        paginate(self.api, request).await
    }
}

/// Lists item ids matching a free-text query, newest first.
///
/// `category_constrained` narrows the search to the music category at the
/// query stage — fewer false positives, fewer results. Unconstrained mode
/// widens coverage and leans on the shorts filter downstream.
pub struct KeywordLister<'a> {
    api: &'a dyn CatalogApi,
    category_constrained: bool,
}

impl<'a> KeywordLister<'a> {
    pub fn new(api: &'a dyn CatalogApi, category_constrained: bool) -> Self {
        Self {
            api,
            category_constrained,
        }
    }

    pub async fn list_matching(&self, query: &str) -> Result<Vec<String>, PipelineError> {
        let mut request = SearchRequest::items_by_keyword(query)
            .with_order(SearchOrder::Date)
            .with_page_size(PAGE_SIZE);
        if self.category_constrained {
            request = request.with_category(MUSIC_CATEGORY_ID);
        }
        paginate(self.api, request).await
    }
}

/// Follow continuation tokens for up to [`MAX_PAGES`] pages, stopping early
/// when a page has no token. Ids are deduplicated in first-seen order.
async fn paginate(
    api: &dyn CatalogApi,
    mut request: SearchRequest,
) -> Result<Vec<String>, PipelineError> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for page in 0..MAX_PAGES {
        let result = api.search(&request).await?;
        tracing::debug!(page, hits = result.hits.len(), "search page retrieved");

        for hit in result.hits {
            if seen.insert(hit.id.clone()) {
                ids.push(hit.id);
            }
        }

        match result.next_page_token {
            Some(token) => request = request.with_page_token(Some(token)),
            None => break,
        }
    }

    Ok(ids)
}
