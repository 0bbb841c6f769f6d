//! Catalog data model
//!
//! This module provides structures to represent catalog assets (movies and
//! multi-season series) together with their quality variants, as well as
//! loading of a fully materialized catalog from a JSON file. The catalog is
//! produced by an external collaborator; this crate never fetches it itself.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk
    #[error("Failed to read catalog file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the catalog JSON
    #[error("Failed to parse catalog JSON: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

/// The kind of media an asset represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A single feature with a flat list of quality variants
    Movie,
    /// A multi-season show; variants live on individual episodes
    Series,
}

/// One concrete encoding of an asset or episode
///
/// The `id` is an opaque handle used to build the canonical download URL;
/// it carries no meaning beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityVariant {
    /// Opaque handle used in the canonical URL path
    pub id: String,
    /// Display name of the file (appears percent-encoded in the URL)
    pub name: String,
    /// Human-readable quality label, e.g. "720p" or "1080p"
    pub quality: String,
}

/// A single episode of a series asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// The episode number within its season
    pub episode_number: u32,
    /// Quality variants available for this episode
    #[serde(default)]
    pub variants: Vec<QualityVariant>,
}

/// A season of a series asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// The season number
    pub season_number: u32,
    /// Episodes in this season
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A catalog entry, either a movie or a multi-season series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Catalog identifier of the asset
    pub id: String,
    /// Display title
    pub title: String,
    /// Whether this is a movie or a series
    #[serde(rename = "media_type")]
    pub kind: MediaKind,
    /// Top-level quality variants (movies only)
    #[serde(default)]
    pub variants: Vec<QualityVariant>,
    /// Seasons (series only)
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Asset {
    /// Returns true if this asset is a multi-season series
    pub fn is_series(&self) -> bool {
        self.kind == MediaKind::Series
    }
}

/// Loads a catalog from a JSON file
///
/// The file must contain a JSON array of assets as described in the module
/// documentation. Collections that are absent in the JSON (a movie without
/// `seasons`, an episode without `variants`) default to empty.
///
/// # Arguments
///
/// * `path` - Path to the catalog JSON file
///
/// # Returns
///
/// A Result containing the list of assets, or a CatalogError
pub fn load_catalog(path: &Path) -> Result<Vec<Asset>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let assets = serde_json::from_str(&content)?;
    Ok(assets)
}
