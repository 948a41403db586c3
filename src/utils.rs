//! Utility functions for cache file naming

use url::Url;

/// Extensions recognized as media file suffixes when deriving stable names
const MEDIA_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Derive a local cache filename for a remote asset URL
///
/// Uses the URL's final path segment when it looks like a stable media
/// filename (has a recognized extension and the URL carries no query string).
/// Otherwise the asset is dynamically generated (e.g., a service that mints a
/// fresh GIF per request), so a unique name is synthesized from a millisecond
/// timestamp plus a random nonce; the raw remote path would collide across
/// concurrent downloads.
///
/// # Examples
///
/// ```
/// use pawflix::utils::cache_file_name;
///
/// let name = cache_file_name("https://images.dog.ceo/breeds/hound/n102.jpg");
/// assert_eq!(name, "n102.jpg");
///
/// let name = cache_file_name("https://cataas.com/cat/gif?ts=1712000");
/// assert!(name.starts_with("pet_") && name.ends_with(".gif"));
/// ```
pub fn cache_file_name(source_url: &str) -> String {
    let parsed = Url::parse(source_url).ok();

    let last_segment = parsed.as_ref().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string)
    });

    let has_query = parsed
        .as_ref()
        .map(|url| url.query().is_some())
        .unwrap_or(false);

    if !has_query {
        if let Some(segment) = &last_segment {
            if is_stable_media_name(segment) {
                return sanitize_file_name(segment);
            }
        }
    }

    synthesized_name(last_segment.as_deref())
}

/// Whether a path segment qualifies as a stable media filename
fn is_stable_media_name(segment: &str) -> bool {
    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            MEDIA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// Build a unique synthesized filename for a dynamically generated asset
///
/// The extension is guessed from the URL's last path segment when that
/// segment itself names a media format (cataas exposes `/cat/gif`); falls
/// back to `.jpg`, the format the supported services default to.
fn synthesized_name(last_segment: Option<&str>) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::random();

    let ext = last_segment
        .map(str::to_ascii_lowercase)
        .filter(|segment| MEDIA_EXTENSIONS.contains(&segment.as_str()))
        .unwrap_or_else(|| "jpg".to_string());

    format!("pet_{millis}_{nonce:08x}.{ext}")
}

/// Replace path separators and other unsafe characters in a filename
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
