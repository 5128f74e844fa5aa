use super::encoder::{encode, EncodingKind};

/// Search page the song query is appended to
pub const KARAOKE_SEARCH_PREFIX: &str = "https://www.youtube.com/results?search_query=";

/// Build a video search URL for the karaoke version of `song`.
/// Blank input has no search.
pub fn karaoke_search_url(song: &str) -> Option<String> {
    if song.trim().is_empty() {
        return None;
    }

    let query = format!("{song} karaoke");
    Some(format!(
        "{}{}",
        KARAOKE_SEARCH_PREFIX,
        encode(EncodingKind::Url, &query)
    ))
}
