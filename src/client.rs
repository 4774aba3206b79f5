use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{MovieApiError, Result};
use crate::models::{MovieSummary, ResultsPage};

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
struct BaseClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl BaseClient {
    fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    /// Build the full URL for a given endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Map the status code to an error, or decode the body on success.
    fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response.text()?;

        if (200..300).contains(&status) {
            return Ok(serde_json::from_str(&body)?);
        }

        // TMDB reports failures as `{"status_code": n, "status_message": "..."}`.
        let msg = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("status_message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        match status {
            401 => Err(MovieApiError::Authentication {
                message: if msg.is_empty() {
                    "Invalid API key".into()
                } else {
                    msg
                },
            }),
            404 => Err(MovieApiError::NotFound {
                message: if msg.is_empty() {
                    "Not found".into()
                } else {
                    msg
                },
            }),
            _ => Err(MovieApiError::Api {
                status,
                message: if msg.is_empty() {
                    format!("HTTP {status}")
                } else {
                    msg
                },
            }),
        }
    }

    /// GET `endpoint` with the API key appended to `query`.
    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!(endpoint, "GET");
        let resp = self
            .http
            .get(self.url(endpoint))
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()?;
        self.handle_response(resp)
    }
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Blocking client for the two TMDB endpoints the browser needs.
///
/// ```no_run
/// use cinemania::{Config, TmdbClient, TimeWindow};
///
/// let client = TmdbClient::new(&Config::new("your-api-key")).unwrap();
/// let page = client.search().movies("Dune").unwrap();
/// for m in &page.results {
///     println!("{} ({})", m.title, m.release_date);
/// }
/// let trending = client.trending().movies(TimeWindow::Week).unwrap();
/// println!("{} trending", trending.results.len());
/// ```
pub struct TmdbClient {
    base: BaseClient,
}

impl TmdbClient {
    /// Create a new client from the API key and base URL in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(&config.base_url, &config.api_key)?,
        })
    }

    // -- sub-client accessors ------------------------------------------------

    pub fn search(&self) -> SearchClient<'_> {
        SearchClient { base: &self.base }
    }

    pub fn trending(&self) -> TrendingClient<'_> {
        TrendingClient { base: &self.base }
    }
}

// ===========================================================================
// Sub-clients
// ===========================================================================

// ---- Search ---------------------------------------------------------------

pub struct SearchClient<'a> {
    base: &'a BaseClient,
}

impl SearchClient<'_> {
    /// Search movies by title. Only the first page is requested.
    pub fn movies(&self, query: &str) -> Result<ResultsPage<MovieSummary>> {
        self.base.get("/search/movie", &[("query", query)])
    }
}

// ---- Trending -------------------------------------------------------------

/// Trending window accepted by `/trending/movie/{window}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn to_api_string(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

pub struct TrendingClient<'a> {
    base: &'a BaseClient,
}

impl TrendingClient<'_> {
    /// List trending movies for the given window.
    pub fn movies(&self, window: TimeWindow) -> Result<ResultsPage<MovieSummary>> {
        self.base.get(
            &format!("/trending/movie/{}", window.to_api_string()),
            &[],
        )
    }
}

// ===========================================================================
// Data source seam used by the UI
// ===========================================================================

/// The read operations the browser performs. Implemented by [`TmdbClient`];
/// the UI only talks to this trait so it can run against other sources.
pub trait MovieSource: Send + Sync {
    /// Movies whose title matches `query`, in API order.
    fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>>;

    /// This week's trending movies, in API order.
    fn fetch_trending(&self) -> Result<Vec<MovieSummary>>;
}

impl MovieSource for TmdbClient {
    fn search_movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        Ok(self.search().movies(query)?.results)
    }

    fn fetch_trending(&self) -> Result<Vec<MovieSummary>> {
        Ok(self.trending().movies(TimeWindow::Week)?.results)
    }
}
