//! linkreel - Resolve playable or downloadable links from a media catalog
//!
//! This library provides the core functionality for narrowing a catalog
//! asset down to one quality variant (season → episode → quality for a
//! series, a flat variant list for a movie) and resolving that variant into
//! a final URL: a canonical link is built deterministically, shortened
//! through an external service when possible, and handed back unshortened
//! when the service misbehaves.

mod catalog;
mod config;
mod link;
mod resolver;
mod selection;
mod shortener;

use std::io;
use thiserror::Error;

// Re-export error types
pub use catalog::CatalogError;
pub use config::ConfigError;
pub use selection::SelectionError;
pub use shortener::ShortenerError;

// Re-export the catalog model
pub use catalog::{Asset, Episode, MediaKind, QualityVariant, Season, load_catalog};

// Re-export selection, resolution and configuration types
pub use config::{API_KEY_VAR, API_URL_VAR, BASE_URL_VAR, Config};
pub use link::{Intent, PLAYER_MIME_TYPE, build_canonical_url};
pub use resolver::{LinkResolver, ResolutionEvent, ResolutionState, ResolvedLink};
pub use selection::{SelectionState, Stage};
pub use shortener::{HttpShortener, UrlShortener};

/// Top-level error type for linkreel operations
#[derive(Debug, Error)]
pub enum LinkreelError {
    /// Error while loading the catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error while reading configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid selection sequence or unknown option
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
