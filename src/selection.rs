//! Cascading selection state for series assets
//!
//! This module provides the season → episode → quality narrowing state
//! machine. Each transition consumes the current state and returns a fresh
//! one with the downstream option lists recomputed as pure projections of
//! the asset, so derived lists can never go stale. Movie assets do not use
//! this machine; their variants are individually resolvable.

use crate::catalog::{Asset, Episode, QualityVariant};
use thiserror::Error;

/// Errors for selections made out of order or against unknown options
///
/// The presentation surface only ever offers currently-visible options, so
/// these indicate a caller bug rather than a user-facing condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Selection state was requested for a movie asset
    #[error("Asset is not a series; movie variants are resolved directly")]
    NotASeries,

    /// The chosen season number does not exist on the asset
    #[error("Season {0} does not exist")]
    UnknownSeason(u32),

    /// An episode was chosen before any season
    #[error("Cannot choose an episode before a season")]
    NoSeasonChosen,

    /// The chosen episode number does not exist in the chosen season
    #[error("Episode {0} does not exist in the chosen season")]
    UnknownEpisode(u32),

    /// A quality was chosen before any episode
    #[error("Cannot choose a quality before an episode")]
    NoEpisodeChosen,

    /// The chosen quality label is not among the visible variants
    #[error("Quality \"{0}\" is not available for the chosen episode")]
    UnknownQuality(String),
}

/// How far the cascade has been narrowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing chosen yet
    NoSeason,
    /// A season is chosen; episodes are visible
    SeasonChosen,
    /// An episode is chosen; qualities are visible
    EpisodeChosen,
    /// A quality is chosen; a variant is resolvable
    QualityChosen,
}

/// Selection state for one series asset view
///
/// Borrows the asset it narrows; created when the resolution surface for an
/// asset opens and dropped when it closes. Nothing persists across views.
#[derive(Debug, Clone)]
pub struct SelectionState<'a> {
    asset: &'a Asset,
    season: Option<u32>,
    episode: Option<u32>,
    quality: Option<String>,
    visible_episodes: Vec<&'a Episode>,
    visible_variants: Vec<&'a QualityVariant>,
}

impl<'a> SelectionState<'a> {
    /// Creates a fresh selection state for a series asset
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::NotASeries` for movie assets, which skip the
    /// cascade entirely.
    pub fn new(asset: &'a Asset) -> Result<Self, SelectionError> {
        if !asset.is_series() {
            return Err(SelectionError::NotASeries);
        }

        Ok(Self {
            asset,
            season: None,
            episode: None,
            quality: None,
            visible_episodes: Vec::new(),
            visible_variants: Vec::new(),
        })
    }

    /// Returns the current stage of the cascade
    pub fn stage(&self) -> Stage {
        if self.quality.is_some() {
            Stage::QualityChosen
        } else if self.episode.is_some() {
            Stage::EpisodeChosen
        } else if self.season.is_some() {
            Stage::SeasonChosen
        } else {
            Stage::NoSeason
        }
    }

    /// Season numbers available on the asset, sorted ascending
    pub fn season_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self
            .asset
            .seasons
            .iter()
            .map(|s| s.season_number)
            .collect();
        numbers.sort_unstable();
        numbers
    }

    /// Chooses a season, clearing any chosen episode and quality
    ///
    /// The visible episode list is recomputed from the chosen season, sorted
    /// ascending by episode number regardless of catalog order.
    pub fn choose_season(self, season_number: u32) -> Result<Self, SelectionError> {
        let season = self
            .asset
            .seasons
            .iter()
            .find(|s| s.season_number == season_number)
            .ok_or(SelectionError::UnknownSeason(season_number))?;

        let mut episodes: Vec<&'a Episode> = season.episodes.iter().collect();
        episodes.sort_by_key(|e| e.episode_number);

        Ok(Self {
            asset: self.asset,
            season: Some(season_number),
            episode: None,
            quality: None,
            visible_episodes: episodes,
            visible_variants: Vec::new(),
        })
    }

    /// Chooses an episode within the chosen season, clearing any chosen quality
    ///
    /// The visible quality list is recomputed from the chosen episode,
    /// keeping the catalog's variant order.
    pub fn choose_episode(self, episode_number: u32) -> Result<Self, SelectionError> {
        if self.season.is_none() {
            return Err(SelectionError::NoSeasonChosen);
        }

        let episode = self
            .visible_episodes
            .iter()
            .find(|e| e.episode_number == episode_number)
            .copied()
            .ok_or(SelectionError::UnknownEpisode(episode_number))?;

        let variants: Vec<&'a QualityVariant> = episode.variants.iter().collect();

        Ok(Self {
            episode: Some(episode_number),
            quality: None,
            visible_variants: variants,
            ..self
        })
    }

    /// Chooses a quality label from the currently visible variants
    pub fn choose_quality(self, quality: &str) -> Result<Self, SelectionError> {
        if self.episode.is_none() {
            return Err(SelectionError::NoEpisodeChosen);
        }

        if !self.visible_variants.iter().any(|v| v.quality == quality) {
            return Err(SelectionError::UnknownQuality(quality.to_string()));
        }

        Ok(Self {
            quality: Some(quality.to_string()),
            ..self
        })
    }

    /// Episode numbers currently visible, sorted ascending
    pub fn episode_numbers(&self) -> Vec<u32> {
        self.visible_episodes
            .iter()
            .map(|e| e.episode_number)
            .collect()
    }

    /// Quality variants currently visible
    pub fn visible_variants(&self) -> &[&'a QualityVariant] {
        &self.visible_variants
    }

    /// The resolvable variant, if the cascade has been narrowed to a quality
    ///
    /// Returns `Some` only in `Stage::QualityChosen`; anything earlier has
    /// nothing resolvable yet.
    pub fn current_variant(&self) -> Option<&'a QualityVariant> {
        let quality = self.quality.as_deref()?;
        self.visible_variants
            .iter()
            .find(|v| v.quality == quality)
            .copied()
    }
}
