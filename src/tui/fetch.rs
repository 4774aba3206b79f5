//! Background fetches.
//!
//! Each request runs on its own short-lived thread; the result comes back
//! over a channel and is applied by the UI thread, which stays the only
//! writer of [`AppState`](super::AppState).

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error};

use crate::error::Result;
use crate::{MovieSource, MovieSummary};

/// Identifies one request so late responses can be matched or dropped.
pub(crate) type RequestId = u64;

/// Work the UI asks the fetch worker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchRequest {
    Search { query: String },
    Trending,
}

impl FetchRequest {
    fn run(&self, source: &dyn MovieSource) -> FetchOutcome {
        match self {
            FetchRequest::Search { query } => FetchOutcome::Search(source.search_movies(query)),
            FetchRequest::Trending => FetchOutcome::Trending(source.fetch_trending()),
        }
    }
}

#[derive(Debug)]
pub(crate) enum FetchOutcome {
    Search(Result<Vec<MovieSummary>>),
    Trending(Result<Vec<MovieSummary>>),
}

#[derive(Debug)]
pub(crate) struct FetchResponse {
    pub(crate) id: RequestId,
    pub(crate) outcome: FetchOutcome,
}

/// Runs [`FetchRequest`]s against a [`MovieSource`] off the UI thread.
pub struct Fetcher {
    source: Arc<dyn MovieSource>,
    tx: Sender<FetchResponse>,
    rx: Receiver<FetchResponse>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Start `request` in the background.
    pub(crate) fn dispatch(&self, id: RequestId, request: FetchRequest) {
        debug!(id, ?request, "dispatching fetch");
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let job = request.clone();

        let spawned = thread::Builder::new()
            .name("cinemania-fetch".into())
            .spawn(move || {
                let outcome = job.run(source.as_ref());
                // The receiver lives as long as the Fetcher; a send error
                // only happens during shutdown.
                let _ = tx.send(FetchResponse { id, outcome });
            });

        if let Err(e) = spawned {
            error!(error = %e, "cannot spawn fetch thread, fetching inline");
            let outcome = request.run(self.source.as_ref());
            let _ = self.tx.send(FetchResponse { id, outcome });
        }
    }

    /// A finished response, if any is waiting.
    pub(crate) fn try_recv(&self) -> Option<FetchResponse> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(&self, timeout: std::time::Duration) -> Option<FetchResponse> {
        self.rx.recv_timeout(timeout).ok()
    }
}
