use std::fmt;

use serde::{Deserialize, Deserializer};

/// Placeholder shown for any movie field the API leaves out.
pub const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Treats an explicit JSON `null` the same as a missing field.
fn or_not_available<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(not_available))
}

// ---------------------------------------------------------------------------
// Paged result envelope
// ---------------------------------------------------------------------------

/// Wraps a TMDB list response. Only `results` matters for display; the
/// paging counters are kept as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// The projection of a TMDB movie record used for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSummary {
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub title: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub release_date: String,
    #[serde(default = "not_available", deserialize_with = "or_not_available")]
    pub overview: String,
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}\nRelease Date: {}\nOverview: {}",
            self.title, self.release_date, self.overview
        )
    }
}

/// Joins movies into the text shown by the Search and Movies panels: one
/// block per movie, in the given order, separated by a blank line.
pub fn format_movie_blocks(movies: &[MovieSummary]) -> String {
    movies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
