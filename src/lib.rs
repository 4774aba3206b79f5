//! Cinemania: a terminal movie browser for The Movie Database.
//!
//! The library exposes the TMDB client, the display models, and the
//! terminal UI used by the `cinemania` binary.
//!
//! # Quick Start
//!
//! ```no_run
//! use cinemania::{Config, MovieSource, TmdbClient};
//!
//! let config = Config::from_env().unwrap();
//! let client = TmdbClient::new(&config).unwrap();
//!
//! for movie in client.fetch_trending().unwrap() {
//!     println!("{movie}\n");
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use client::{MovieSource, SearchClient, TimeWindow, TmdbClient, TrendingClient};
pub use config::Config;
pub use error::{ConfigError, MovieApiError};
pub use models::{format_movie_blocks, MovieSummary, ResultsPage, NOT_AVAILABLE};
