//! Canonical URL construction
//!
//! Builds the deterministic, unshortened link for a quality variant. Two
//! strategies exist: a plain download URL, and the same path wrapped in an
//! Android intent deep link that tells a compatible external player to open
//! the file directly.

/// MIME type signalled to the external player in the deep link
pub const PLAYER_MIME_TYPE: &str = "video/x-matroska";

/// How the resolved link will be presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Hand the file to the browser as a download
    Download,
    /// Deep-link into an external player
    Play,
}

/// Builds the canonical URL for a variant
///
/// For `Intent::Download` this is `{base}/dl/{id}/{encoded name}`. For
/// `Intent::Play` the same path is wrapped in an `intent:` scheme with a
/// fixed MIME type and view action, terminated by the `end;` marker.
///
/// This function is pure; no validation of `base` is performed.
///
/// # Arguments
///
/// * `base` - The configured origin for download links
/// * `variant_id` - The opaque variant handle
/// * `display_name` - The display name, percent-encoded into the path
/// * `intent` - Whether to produce a download link or a player deep link
pub fn build_canonical_url(
    base: &str,
    variant_id: &str,
    display_name: &str,
    intent: Intent,
) -> String {
    let download_url = format!(
        "{}/dl/{}/{}",
        base,
        variant_id,
        urlencoding::encode(display_name)
    );

    match intent {
        Intent::Download => download_url,
        Intent::Play => format!(
            "intent:{}#Intent;type={};action=android.intent.action.VIEW;end;",
            download_url, PLAYER_MIME_TYPE
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_encodes_display_name() {
        let url = build_canonical_url(
            "https://files.example",
            "ab12",
            "My Show S01E02",
            Intent::Download,
        );
        assert_eq!(url, "https://files.example/dl/ab12/My%20Show%20S01E02");
    }

    #[test]
    fn test_play_url_wraps_download_path() {
        let url = build_canonical_url(
            "https://files.example",
            "ab12",
            "My Show S01E02",
            Intent::Play,
        );
        assert_eq!(
            url,
            "intent:https://files.example/dl/ab12/My%20Show%20S01E02\
             #Intent;type=video/x-matroska;action=android.intent.action.VIEW;end;"
        );
    }

    #[test]
    fn test_same_inputs_yield_same_url() {
        let first = build_canonical_url("https://files.example", "x", "a b", Intent::Download);
        let second = build_canonical_url("https://files.example", "x", "a b", Intent::Download);
        assert_eq!(first, second);
    }
}
