use super::fetch::Fetcher;
use super::state::AppState;

/// Process the current state: start queued fetches and apply any finished
/// ones.
pub fn process_state(state: &mut AppState, fetcher: &Fetcher) {
    for (id, request) in state.take_requests() {
        fetcher.dispatch(id, request);
    }

    while let Some(response) = fetcher.try_recv() {
        state.apply_response(response);
    }
}
