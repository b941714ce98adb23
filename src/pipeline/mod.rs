// Resolution pipeline - query → bounded, ranked playlist with fallback

pub mod coordinator;
pub mod details;
pub mod duration;
pub mod errors;
pub mod filters;
pub mod listers;
pub mod models;
pub mod resolver;
pub mod traits;

pub use coordinator::{FallbackCoordinator, GenerationCounter, Outcome, Resolution, Stage};
pub use details::DetailBatchFetcher;
pub use errors::PipelineError;
pub use listers::{KeywordLister, SourceLister};
pub use models::{ContentSource, MediaItem, ResultSet};
pub use resolver::SourceResolver;
pub use traits::{
    CatalogApi, ChannelStats, SearchHit, SearchKind, SearchOrder, SearchPage, SearchRequest,
    VideoDetail,
};
