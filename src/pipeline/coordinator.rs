// Fallback coordination: channel resolution first, keyword search on empty
//
// Strategy:
// 1. Resolve the query to channel candidates; the caller picks one
// 2. Empty resolution escalates synchronously to a category-constrained
//    keyword search, flagged as fallback-sourced
// 3. Transport failures terminate the stage; they never trigger escalation
//    (an outage is not the same condition as "nothing found")

use std::sync::atomic::{AtomicU64, Ordering};

use super::details::DetailBatchFetcher;
use super::errors::PipelineError;
use super::filters::{cap, rank_by_recency, shorts_filter};
use super::listers::{KeywordLister, SourceLister};
use super::models::{ContentSource, ResultSet, MAX_PLAYLIST_LEN};
use super::resolver::SourceResolver;
use super::traits::CatalogApi;

/// Pipeline stages, in transition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ResolvingSource,
    SourceFound,
    SourceEmpty,
    ListingSourceMedia,
    KeywordFallback,
    Done,
    Error,
}

/// Monotonic tag issued per invocation. A completion is applied only when
/// its tag is still the latest issued one; a slow run superseded by a newer
/// query can therefore never overwrite the newer run's result.
#[derive(Debug, Default)]
pub struct GenerationCounter(AtomicU64);

impl GenerationCounter {
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// A completion that survived (or lost) the generation check
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Completion for the latest issued generation
    Completed(T),
    /// A newer invocation was issued while this one was in flight; the
    /// result was discarded
    Superseded,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Superseded => None,
        }
    }
}

/// What a query resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Channel candidates; the caller selects one and then calls
    /// [`FallbackCoordinator::list_source`]
    Sources(Vec<ContentSource>),
    /// Resolution was empty; the keyword fallback already produced a
    /// playlist, flagged as fallback-sourced
    Fallback(ResultSet),
}

/// Top-level orchestrator for the resolution pipeline.
///
/// Stateless across invocations apart from the generation counter; every
/// invocation produces fresh entities.
pub struct FallbackCoordinator<A: CatalogApi> {
    api: A,
    generations: GenerationCounter,
}

impl<A: CatalogApi> FallbackCoordinator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            generations: GenerationCounter::default(),
        }
    }

    /// Tag a new invocation. Issuing a generation supersedes every run still
    /// in flight under an older one.
    pub fn issue_generation(&self) -> u64 {
        self.generations.issue()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generations.is_current(generation)
    }

    /// Resolve a query to channel candidates, escalating to the keyword
    /// fallback when resolution completes empty. Transport errors surface
    /// immediately without escalation.
    pub async fn resolve_query(
        &self,
        query: &str,
        generation: u64,
    ) -> Result<Outcome<Resolution>, PipelineError> {
        let mut stage = Stage::Idle;
        self.enter(&mut stage, Stage::ResolvingSource);

        let sources = match SourceResolver::new(&self.api).resolve(query).await {
            Ok(sources) => sources,
            Err(e) => {
                self.enter(&mut stage, Stage::Error);
                return Err(e);
            }
        };

        let resolution = if sources.is_empty() {
            self.enter(&mut stage, Stage::SourceEmpty);
            self.enter(&mut stage, Stage::KeywordFallback);
            let set = match self.keyword_fallback(query).await {
                Ok(set) => set,
                Err(e) => {
                    self.enter(&mut stage, Stage::Error);
                    return Err(e);
                }
            };
            Resolution::Fallback(set)
        } else {
            self.enter(&mut stage, Stage::SourceFound);
            Resolution::Sources(sources)
        };

        self.enter(&mut stage, Stage::Done);
        Ok(self.commit(generation, resolution))
    }

    /// Build the playlist for a selected channel: list recent ids, fetch
    /// details, filter shorts, rank by recency, cap.
    pub async fn list_source(
        &self,
        source: &ContentSource,
        generation: u64,
    ) -> Result<Outcome<ResultSet>, PipelineError> {
        let mut stage = Stage::SourceFound;
        self.enter(&mut stage, Stage::ListingSourceMedia);

        let ids = match SourceLister::new(&self.api).list_recent(&source.id).await {
            Ok(ids) => ids,
            Err(e) => {
                self.enter(&mut stage, Stage::Error);
                return Err(e);
            }
        };
        let mut set = match self.assemble(&ids).await {
            Ok(set) => set,
            Err(e) => {
                self.enter(&mut stage, Stage::Error);
                return Err(e);
            }
        };
        if set.is_empty() {
            set.notice = Some("No videos found for this channel.".to_string());
        }

        self.enter(&mut stage, Stage::Done);
        Ok(self.commit(generation, set))
    }

    /// Last-resort path: keyword search constrained to the music category.
    /// An empty playlist here is successful-but-empty, not an error.
    /// Transport failures carry the keyword path's user-facing message.
    async fn keyword_fallback(&self, query: &str) -> Result<ResultSet, PipelineError> {
        let ids = KeywordLister::new(&self.api, true)
            .list_matching(query)
            .await
            .map_err(keyword_transport_message)?;
        let mut set = self
            .assemble(&ids)
            .await
            .map_err(keyword_transport_message)?;
        set.fallback_sourced = true;
        if set.is_empty() {
            set.notice = Some("No videos found.".to_string());
        }
        Ok(set)
    }

    async fn assemble(&self, ids: &[String]) -> Result<ResultSet, PipelineError> {
        let items = DetailBatchFetcher::new(&self.api).fetch(ids).await?;
        let items = cap(rank_by_recency(shorts_filter(items)), MAX_PLAYLIST_LEN);
        Ok(ResultSet {
            items,
            fallback_sourced: false,
            notice: None,
        })
    }

    fn commit<T>(&self, generation: u64, value: T) -> Outcome<T> {
        if self.generations.is_current(generation) {
            Outcome::Completed(value)
        } else {
            tracing::debug!(
                generation,
                latest = self.generations.current(),
                "discarding superseded completion"
            );
            Outcome::Superseded
        }
    }

    fn enter(&self, stage: &mut Stage, next: Stage) {
        tracing::debug!(from = ?*stage, to = ?next, "pipeline stage");
        *stage = next;
    }
}

/// Replace a transport failure's wire-level detail with the keyword path's
/// user-facing message; the detail stays observable in the logs.
fn keyword_transport_message(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::Transport(msg) => {
            tracing::warn!(%msg, "keyword fallback transport failure");
            PipelineError::Transport("Failed to fetch music videos.".to_string())
        }
        other => other,
    }
}
