//! Link resolution with shortening fallback
//!
//! This module turns a chosen quality variant into a final, usable URL. The
//! canonical URL is built deterministically, a single shortening attempt is
//! made against the external service, and any failure of that attempt is
//! absorbed by falling back to the canonical URL. Resolution therefore never
//! fails: the worst case is an unshortened but functional link.
//!
//! While a resolution runs, an in-flight flag keyed by the variant's quality
//! label is held in a shared map so the presentation surface can drive a
//! per-button loading indicator.

use crate::catalog::QualityVariant;
use crate::link::{Intent, build_canonical_url};
use crate::shortener::UrlShortener;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// The outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The final URL to hand to the browsing context
    pub url: String,
    /// Whether the shortening attempt succeeded
    pub shortened: bool,
}

/// Progress events emitted during a resolution
///
/// These events allow callers to render loading feedback or report that the
/// shortening service was skipped. A `ShorteningFailed` event is purely
/// informational; the resolution still completes with the canonical URL.
#[derive(Debug, Clone)]
pub enum ResolutionEvent {
    /// Resolution started for a quality label
    Started { quality: String },

    /// The shortening attempt failed and the canonical URL will be used
    ShorteningFailed { quality: String, reason: String },

    /// Resolution finished with a final URL
    Finished { quality: String, url: String },
}

/// Shared in-flight tracking, keyed by quality label
///
/// Cloning yields another handle to the same underlying map, so the
/// presentation surface can observe flags set by the resolver. The map is
/// scoped to one resolver instance; there is no process-wide state.
///
/// Keying by quality label alone means two episodes resolving the same
/// label concurrently share one flag.
#[derive(Debug, Clone, Default)]
pub struct ResolutionState {
    in_flight: Arc<Mutex<HashMap<String, bool>>>,
}

impl ResolutionState {
    /// Returns true while a resolution for this quality label is executing
    pub fn is_resolving(&self, quality: &str) -> bool {
        let map = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.get(quality).copied().unwrap_or(false)
    }

    fn set(&self, quality: &str, value: bool) {
        let mut map = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        map.insert(quality.to_string(), value);
    }
}

/// Resolves quality variants into final URLs
///
/// Owns the configured base origin, the shortening service client, and the
/// in-flight state for one asset-resolution surface.
pub struct LinkResolver<S: UrlShortener> {
    base_url: String,
    shortener: S,
    state: ResolutionState,
}

impl<S: UrlShortener> LinkResolver<S> {
    /// Creates a resolver for the given base origin and shortener
    pub fn new(base_url: impl Into<String>, shortener: S) -> Self {
        Self {
            base_url: base_url.into(),
            shortener,
            state: ResolutionState::default(),
        }
    }

    /// Returns a handle onto the in-flight state for loading indicators
    pub fn resolution_state(&self) -> ResolutionState {
        self.state.clone()
    }

    /// Resolves a variant into a final URL
    ///
    /// Equivalent to [`LinkResolver::resolve_with_events`] with the events
    /// discarded.
    pub fn resolve(&self, variant: &QualityVariant, intent: Intent) -> ResolvedLink {
        self.resolve_with_events(variant, intent, |_| {})
    }

    /// Resolves a variant into a final URL, emitting progress events
    ///
    /// The in-flight flag for the variant's quality label is set before the
    /// shortening call begins and cleared before the result is returned or
    /// the `Finished` event fires; no caller can observe a cleared flag
    /// while the call is outstanding, and no result is dispatched with the
    /// flag still set.
    ///
    /// # Arguments
    ///
    /// * `variant` - The chosen quality variant
    /// * `intent` - Download link or player deep link
    /// * `callback` - Closure called with progress events
    pub fn resolve_with_events<F>(
        &self,
        variant: &QualityVariant,
        intent: Intent,
        mut callback: F,
    ) -> ResolvedLink
    where
        F: FnMut(ResolutionEvent),
    {
        self.state.set(&variant.quality, true);
        callback(ResolutionEvent::Started {
            quality: variant.quality.clone(),
        });

        let canonical = build_canonical_url(&self.base_url, &variant.id, &variant.name, intent);

        let resolved = match self.shortener.shorten(&canonical) {
            Ok(short) => ResolvedLink {
                url: short,
                shortened: true,
            },
            Err(e) => {
                callback(ResolutionEvent::ShorteningFailed {
                    quality: variant.quality.clone(),
                    reason: e.to_string(),
                });
                ResolvedLink {
                    url: canonical,
                    shortened: false,
                }
            }
        };

        self.state.set(&variant.quality, false);
        callback(ResolutionEvent::Finished {
            quality: variant.quality.clone(),
            url: resolved.url.clone(),
        });

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortener::ShortenerError;

    const BASE: &str = "https://files.example";

    fn variant(id: &str, name: &str, quality: &str) -> QualityVariant {
        QualityVariant {
            id: id.to_string(),
            name: name.to_string(),
            quality: quality.to_string(),
        }
    }

    /// Shortener that always succeeds with a fixed URL
    struct FixedShortener(&'static str);

    impl UrlShortener for FixedShortener {
        fn shorten(&self, _url: &str) -> Result<String, ShortenerError> {
            Ok(self.0.to_string())
        }
    }

    /// Shortener that always fails with the given error
    struct FailingShortener(fn() -> ShortenerError);

    impl UrlShortener for FailingShortener {
        fn shorten(&self, _url: &str) -> Result<String, ShortenerError> {
            Err((self.0)())
        }
    }

    /// Shortener that records the in-flight flags it observes mid-call
    #[derive(Clone)]
    struct ProbingShortener {
        state: Arc<Mutex<Option<ResolutionState>>>,
        observed: Arc<Mutex<Vec<(String, bool)>>>,
    }

    impl ProbingShortener {
        fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(None)),
                observed: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl UrlShortener for ProbingShortener {
        fn shorten(&self, _url: &str) -> Result<String, ShortenerError> {
            let state = self.state.lock().unwrap().clone().unwrap();
            let mut observed = self.observed.lock().unwrap();
            for quality in ["720p", "1080p"] {
                observed.push((quality.to_string(), state.is_resolving(quality)));
            }
            Ok("https://s.example/abc".to_string())
        }
    }

    #[test]
    fn test_success_returns_shortened_url() {
        let resolver = LinkResolver::new(BASE, FixedShortener("https://s.example/abc"));
        let resolved = resolver.resolve(&variant("ab12", "My Movie", "1080p"), Intent::Download);

        assert_eq!(resolved.url, "https://s.example/abc");
        assert!(resolved.shortened);
    }

    #[test]
    fn test_failure_falls_back_to_canonical_url() {
        let cases: [fn() -> ShortenerError; 3] = [
            || ShortenerError::RequestFailed("timed out".to_string()),
            || ShortenerError::BadStatus(503),
            || ShortenerError::UnrecognizedPayload,
        ];

        for make_error in cases {
            let resolver = LinkResolver::new(BASE, FailingShortener(make_error));
            let resolved =
                resolver.resolve(&variant("ab12", "My Movie", "1080p"), Intent::Download);

            assert_eq!(resolved.url, "https://files.example/dl/ab12/My%20Movie");
            assert!(!resolved.shortened);
            assert!(!resolved.url.is_empty());
        }
    }

    #[test]
    fn test_resolve_is_idempotent_with_deterministic_shortener() {
        let resolver = LinkResolver::new(BASE, FixedShortener("https://s.example/abc"));
        let v = variant("ab12", "My Movie", "1080p");

        let first = resolver.resolve(&v, Intent::Play);
        let second = resolver.resolve(&v, Intent::Play);
        assert_eq!(first, second);
    }

    #[test]
    fn test_in_flight_flag_set_only_during_resolution() {
        let probe = ProbingShortener::new();
        let resolver = LinkResolver::new(BASE, probe.clone());
        *probe.state.lock().unwrap() = Some(resolver.resolution_state());

        let state = resolver.resolution_state();
        assert!(!state.is_resolving("1080p"));

        let resolved = resolver.resolve(&variant("ab12", "My Movie", "1080p"), Intent::Play);
        assert_eq!(resolved.url, "https://s.example/abc");

        // Mid-call the 1080p flag was up while 720p stayed down
        let observed = probe.observed.lock().unwrap();
        assert_eq!(
            *observed,
            vec![("720p".to_string(), false), ("1080p".to_string(), true)]
        );

        // Cleared again before the result was handed back
        assert!(!state.is_resolving("1080p"));
        assert!(!state.is_resolving("720p"));
    }

    #[test]
    fn test_events_fire_in_order_with_flag_cleared_before_finish() {
        let resolver = LinkResolver::new(BASE, FixedShortener("https://s.example/abc"));
        let state = resolver.resolution_state();

        let mut log = Vec::new();
        resolver.resolve_with_events(
            &variant("ab12", "My Movie", "1080p"),
            Intent::Download,
            |event| match event {
                ResolutionEvent::Started { quality } => {
                    log.push(format!("started:{}", quality));
                }
                ResolutionEvent::ShorteningFailed { .. } => {
                    log.push("failed".to_string());
                }
                ResolutionEvent::Finished { quality, url } => {
                    // Flag must already be down when the result is dispatched
                    assert!(!state.is_resolving(&quality));
                    log.push(format!("finished:{}:{}", quality, url));
                }
            },
        );

        assert_eq!(
            log,
            vec![
                "started:1080p".to_string(),
                "finished:1080p:https://s.example/abc".to_string()
            ]
        );
    }

    #[test]
    fn test_failed_shortening_emits_informational_event() {
        let resolver = LinkResolver::new(
            BASE,
            FailingShortener(|| ShortenerError::BadStatus(500)),
        );

        let mut failure_reason = None;
        let resolved = resolver.resolve_with_events(
            &variant("ab12", "My Movie", "720p"),
            Intent::Download,
            |event| {
                if let ResolutionEvent::ShorteningFailed { reason, .. } = event {
                    failure_reason = Some(reason);
                }
            },
        );

        assert_eq!(failure_reason.as_deref(), Some("Service returned HTTP 500"));
        assert!(!resolved.shortened);
    }
}
