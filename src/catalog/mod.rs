// YouTube Data API v3 transport

mod client;
pub mod schema;

pub use client::{CatalogConfig, YouTubeCatalog, YT_API_KEY_ENV};
