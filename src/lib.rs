// tunelist - resolves a free-text query into a bounded, ranked playlist of
// YouTube music videos, escalating from channel resolution to a keyword
// search when the preferred path comes up empty.

pub mod catalog;
pub mod pipeline;
pub mod store;

pub use catalog::{CatalogConfig, YouTubeCatalog, YT_API_KEY_ENV};
pub use pipeline::{
    CatalogApi, ContentSource, FallbackCoordinator, MediaItem, Outcome, PipelineError, Resolution,
    ResultSet,
};
pub use store::{FileSelectionStore, SelectionStore};
