use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::MovieSummary;

use super::fetch::{FetchOutcome, FetchRequest, FetchResponse, RequestId};

/// The panels reachable from the sidebar, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Search,
    Movies,
}

/// A navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Home,
    Search,
    Movies,
    /// Next sidebar entry, wrapping around.
    Next,
    /// Previous sidebar entry, wrapping around.
    Previous,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Search, View::Movies];

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Search => "Search",
            View::Movies => "Movies",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            View::Home => 0,
            View::Search => 1,
            View::Movies => 2,
        }
    }

    /// The view shown after `event` while `self` is shown.
    pub fn transition(self, event: NavEvent) -> View {
        let len = Self::ALL.len();
        match event {
            NavEvent::Home => View::Home,
            NavEvent::Search => View::Search,
            NavEvent::Movies => View::Movies,
            NavEvent::Next => Self::ALL[(self.index() + 1) % len],
            NavEvent::Previous => Self::ALL[(self.index() + len - 1) % len],
        }
    }
}

/// Which region receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Sidebar,
    Content,
}

/// Single-line text input. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub(crate) fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub(crate) fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub(crate) fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub(crate) fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub(crate) fn home(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn end(&mut self) {
        self.cursor = self.char_count();
    }
}

/// Contents of the search results container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchResults {
    /// Nothing searched yet.
    Empty,
    /// The last search matched nothing.
    NotFound,
    Found(Vec<MovieSummary>),
}

/// Contents of the trending panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Trending {
    Loading(RequestId),
    Loaded(Vec<MovieSummary>),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HomePanel {
    pub(crate) scroll: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchPanel {
    pub(crate) input: InputField,
    pub(crate) results: SearchResults,
    /// Id of the search whose response will be accepted.
    pub(crate) in_flight: Option<RequestId>,
    pub(crate) scroll: u16,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self {
            input: InputField::default(),
            results: SearchResults::Empty,
            in_flight: None,
            scroll: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MoviesPanel {
    pub(crate) trending: Trending,
    pub(crate) scroll: u16,
}

/// The one content panel currently attached to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Panel {
    Home(HomePanel),
    Search(SearchPanel),
    Movies(MoviesPanel),
}

impl Panel {
    pub(crate) fn view(&self) -> View {
        match self {
            Panel::Home(_) => View::Home,
            Panel::Search(_) => View::Search,
            Panel::Movies(_) => View::Movies,
        }
    }

    fn scroll_mut(&mut self) -> &mut u16 {
        match self {
            Panel::Home(p) => &mut p.scroll,
            Panel::Search(p) => &mut p.scroll,
            Panel::Movies(p) => &mut p.scroll,
        }
    }
}

/// Main application state.
pub struct AppState {
    /// Content of the visible panel.
    pub(crate) panel: Panel,
    /// Region receiving key input.
    pub(crate) focus: Focus,
    /// Requests queued for the fetch worker.
    outbox: Vec<(RequestId, FetchRequest)>,
    /// Next request id to hand out.
    next_request: RequestId,
    /// Should the application quit?
    pub should_quit: bool,
    /// Where the sidebar was last drawn, for mouse hits.
    pub(crate) nav_area: Rect,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            panel: Panel::Home(HomePanel::default()),
            focus: Focus::Sidebar,
            outbox: Vec::new(),
            next_request: 1,
            should_quit: false,
            nav_area: Rect::default(),
        }
    }
}

impl AppState {
    /// Create the startup state: Home panel shown, sidebar focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently shown.
    pub fn view(&self) -> View {
        self.panel.view()
    }

    fn next_request_id(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        id
    }

    /// Drop the current panel and build a fresh one for `view`. Activating
    /// the view already shown rebuilds it too.
    pub(crate) fn show(&mut self, view: View) {
        info!(view = view.label(), "showing panel");
        self.panel = match view {
            View::Home => Panel::Home(HomePanel::default()),
            View::Search => Panel::Search(SearchPanel::default()),
            View::Movies => {
                let id = self.next_request_id();
                self.outbox.push((id, FetchRequest::Trending));
                Panel::Movies(MoviesPanel {
                    trending: Trending::Loading(id),
                    scroll: 0,
                })
            }
        };
    }

    /// Apply a navigation event to the shown view.
    pub(crate) fn navigate(&mut self, event: NavEvent) {
        let next = self.view().transition(event);
        self.show(next);
    }

    /// Show `view` and move focus into it, as a sidebar click would.
    pub(crate) fn activate(&mut self, view: View) {
        self.show(view);
        self.focus = Focus::Content;
    }

    pub(crate) fn focus_sidebar(&mut self) {
        self.focus = Focus::Sidebar;
    }

    pub(crate) fn focus_content(&mut self) {
        self.focus = Focus::Content;
    }

    /// Mutable access to the search input, if the Search panel is shown.
    pub(crate) fn search_input_mut(&mut self) -> Option<&mut InputField> {
        match &mut self.panel {
            Panel::Search(p) => Some(&mut p.input),
            _ => None,
        }
    }

    /// Queue a search for the typed query. Blank queries are ignored.
    pub(crate) fn submit_search(&mut self) {
        let id = self.next_request;
        let Panel::Search(panel) = &mut self.panel else {
            return;
        };
        let query = panel.input.value();
        if query.trim().is_empty() {
            return;
        }
        debug!(query, "queueing search");
        self.outbox.push((
            id,
            FetchRequest::Search {
                query: query.to_string(),
            },
        ));
        panel.in_flight = Some(id);
        self.next_request += 1;
    }

    /// Hand queued requests to the caller.
    pub(crate) fn take_requests(&mut self) -> Vec<(RequestId, FetchRequest)> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether the visible panel is waiting on a response.
    pub(crate) fn is_loading(&self) -> bool {
        match &self.panel {
            Panel::Search(p) => p.in_flight.is_some(),
            Panel::Movies(p) => matches!(p.trending, Trending::Loading(_)),
            Panel::Home(_) => false,
        }
    }

    /// Fold a fetch result into the visible panel. Results for a request the
    /// panel is no longer waiting on are dropped.
    pub(crate) fn apply_response(&mut self, response: FetchResponse) {
        let FetchResponse { id, outcome } = response;
        match (&mut self.panel, outcome) {
            (Panel::Search(panel), FetchOutcome::Search(result)) if panel.in_flight == Some(id) => {
                panel.in_flight = None;
                match result {
                    Ok(movies) => {
                        info!(count = movies.len(), "search finished");
                        panel.results = if movies.is_empty() {
                            SearchResults::NotFound
                        } else {
                            SearchResults::Found(movies)
                        };
                        panel.scroll = 0;
                    }
                    Err(e) => warn!(error = %e, "search request failed"),
                }
            }
            (Panel::Movies(panel), FetchOutcome::Trending(result))
                if panel.trending == Trending::Loading(id) =>
            {
                panel.trending = match result {
                    Ok(movies) => {
                        info!(count = movies.len(), "trending loaded");
                        Trending::Loaded(movies)
                    }
                    Err(e) => {
                        warn!(error = %e, "trending request failed");
                        Trending::Failed(e.to_string())
                    }
                };
                panel.scroll = 0;
            }
            _ => debug!(id, "discarding stale response"),
        }
    }

    pub(crate) fn scroll_up(&mut self, lines: u16) {
        let scroll = self.panel.scroll_mut();
        *scroll = scroll.saturating_sub(lines);
    }

    /// Scroll down; the renderer clamps the offset to the content height.
    pub(crate) fn scroll_down(&mut self, lines: u16) {
        let scroll = self.panel.scroll_mut();
        *scroll = scroll.saturating_add(lines);
    }

    pub(crate) fn scroll_to_top(&mut self) {
        *self.panel.scroll_mut() = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        *self.panel.scroll_mut() = u16::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MovieApiError;
    use pretty_assertions::assert_eq;

    fn movie(title: &str) -> MovieSummary {
        MovieSummary {
            title: title.into(),
            release_date: "2021-10-22".into(),
            overview: "...".into(),
        }
    }

    fn type_query(state: &mut AppState, text: &str) {
        let input = state.search_input_mut().expect("search panel shown");
        for c in text.chars() {
            input.insert(c);
        }
    }

    fn search_panel(state: &AppState) -> &SearchPanel {
        match &state.panel {
            Panel::Search(p) => p,
            other => panic!("expected search panel, got {other:?}"),
        }
    }

    fn movies_panel(state: &AppState) -> &MoviesPanel {
        match &state.panel {
            Panel::Movies(p) => p,
            other => panic!("expected movies panel, got {other:?}"),
        }
    }

    #[test]
    fn transition_selects_named_view() {
        for view in View::ALL {
            assert_eq!(view.transition(NavEvent::Home), View::Home);
            assert_eq!(view.transition(NavEvent::Search), View::Search);
            assert_eq!(view.transition(NavEvent::Movies), View::Movies);
        }
    }

    #[test]
    fn transition_cycles_in_sidebar_order() {
        assert_eq!(View::Home.transition(NavEvent::Next), View::Search);
        assert_eq!(View::Search.transition(NavEvent::Next), View::Movies);
        assert_eq!(View::Movies.transition(NavEvent::Next), View::Home);
        assert_eq!(View::Home.transition(NavEvent::Previous), View::Movies);
        assert_eq!(View::Movies.transition(NavEvent::Previous), View::Search);
    }

    #[test]
    fn starts_on_home_with_sidebar_focus() {
        let state = AppState::new();
        assert_eq!(state.view(), View::Home);
        assert_eq!(state.focus, Focus::Sidebar);
        assert!(!state.is_loading());
    }

    #[test]
    fn blank_search_queues_nothing() {
        let mut state = AppState::new();
        state.show(View::Search);

        state.submit_search();
        type_query(&mut state, "   \t");
        state.submit_search();

        assert!(state.take_requests().is_empty());
        assert_eq!(search_panel(&state).results, SearchResults::Empty);
        assert_eq!(search_panel(&state).in_flight, None);
    }

    #[test]
    fn search_sends_raw_query() {
        let mut state = AppState::new();
        state.show(View::Search);
        type_query(&mut state, " dune ");
        state.submit_search();

        let requests = state.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].1,
            FetchRequest::Search {
                query: " dune ".into()
            }
        );
        assert!(state.is_loading());
        assert!(state.take_requests().is_empty());
    }

    #[test]
    fn empty_search_result_is_not_found() {
        let mut state = AppState::new();
        state.show(View::Search);
        type_query(&mut state, "zzzz");
        state.submit_search();
        let (id, _) = state.take_requests().remove(0);

        state.apply_response(FetchResponse {
            id,
            outcome: FetchOutcome::Search(Ok(Vec::new())),
        });

        assert_eq!(search_panel(&state).results, SearchResults::NotFound);
        assert!(!state.is_loading());
    }

    #[test]
    fn search_results_keep_api_order() {
        let mut state = AppState::new();
        state.show(View::Search);
        type_query(&mut state, "dune");
        state.submit_search();
        let (id, _) = state.take_requests().remove(0);

        state.apply_response(FetchResponse {
            id,
            outcome: FetchOutcome::Search(Ok(vec![movie("Dune"), movie("Dune: Part Two")])),
        });

        assert_eq!(
            search_panel(&state).results,
            SearchResults::Found(vec![movie("Dune"), movie("Dune: Part Two")])
        );
    }

    #[test]
    fn failed_search_leaves_results_alone() {
        let mut state = AppState::new();
        state.show(View::Search);
        type_query(&mut state, "dune");
        state.submit_search();
        let (first, _) = state.take_requests().remove(0);
        state.apply_response(FetchResponse {
            id: first,
            outcome: FetchOutcome::Search(Ok(vec![movie("Dune")])),
        });

        state.submit_search();
        let (second, _) = state.take_requests().remove(0);
        state.apply_response(FetchResponse {
            id: second,
            outcome: FetchOutcome::Search(Err(MovieApiError::Api {
                status: 503,
                message: "down".into(),
            })),
        });

        assert_eq!(
            search_panel(&state).results,
            SearchResults::Found(vec![movie("Dune")])
        );
        assert!(!state.is_loading());
    }

    #[test]
    fn superseded_search_response_is_dropped() {
        let mut state = AppState::new();
        state.show(View::Search);
        type_query(&mut state, "dune");
        state.submit_search();
        state.submit_search();
        let requests = state.take_requests();
        let (old, new) = (requests[0].0, requests[1].0);

        state.apply_response(FetchResponse {
            id: new,
            outcome: FetchOutcome::Search(Ok(vec![movie("Dune: Part Two")])),
        });
        state.apply_response(FetchResponse {
            id: old,
            outcome: FetchOutcome::Search(Ok(Vec::new())),
        });

        assert_eq!(
            search_panel(&state).results,
            SearchResults::Found(vec![movie("Dune: Part Two")])
        );
    }

    #[test]
    fn movies_panel_requests_trending() {
        let mut state = AppState::new();
        state.show(View::Movies);

        let requests = state.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, FetchRequest::Trending);
        assert_eq!(movies_panel(&state).trending, Trending::Loading(requests[0].0));
    }

    #[test]
    fn trending_failure_becomes_inline_error() {
        let mut state = AppState::new();
        state.show(View::Movies);
        let (id, _) = state.take_requests().remove(0);

        state.apply_response(FetchResponse {
            id,
            outcome: FetchOutcome::Trending(Err(MovieApiError::Authentication {
                message: "Invalid API key".into(),
            })),
        });

        assert_eq!(
            movies_panel(&state).trending,
            Trending::Failed("Authentication failed: Invalid API key".into())
        );
    }

    #[test]
    fn reactivating_movies_refetches() {
        let mut state = AppState::new();
        state.show(View::Movies);
        let (first, _) = state.take_requests().remove(0);
        state.show(View::Movies);
        let (second, _) = state.take_requests().remove(0);
        assert_ne!(first, second);

        state.apply_response(FetchResponse {
            id: first,
            outcome: FetchOutcome::Trending(Ok(vec![movie("Old")])),
        });
        assert_eq!(movies_panel(&state).trending, Trending::Loading(second));
    }

    #[test]
    fn response_for_previous_panel_is_dropped() {
        let mut state = AppState::new();
        state.show(View::Movies);
        let (id, _) = state.take_requests().remove(0);
        state.show(View::Search);

        state.apply_response(FetchResponse {
            id,
            outcome: FetchOutcome::Trending(Ok(vec![movie("Dune")])),
        });

        assert_eq!(search_panel(&state), &SearchPanel::default());
    }

    #[test]
    fn switching_panels_discards_previous_content() {
        let mut state = AppState::new();
        state.navigate(NavEvent::Search);
        type_query(&mut state, "dune");
        state.submit_search();
        let (id, _) = state.take_requests().remove(0);
        state.apply_response(FetchResponse {
            id,
            outcome: FetchOutcome::Search(Ok(vec![movie("Dune")])),
        });

        state.navigate(NavEvent::Movies);
        assert_eq!(state.view(), View::Movies);
        state.navigate(NavEvent::Home);
        assert_eq!(state.panel, Panel::Home(HomePanel::default()));

        state.navigate(NavEvent::Search);
        assert_eq!(search_panel(&state), &SearchPanel::default());
    }

    #[test]
    fn scroll_resets_with_panel() {
        let mut state = AppState::new();
        state.scroll_down(5);
        state.scroll_up(2);
        assert_eq!(state.panel, Panel::Home(HomePanel { scroll: 3 }));
        state.scroll_up(10);
        assert_eq!(state.panel, Panel::Home(HomePanel { scroll: 0 }));

        state.scroll_to_bottom();
        state.show(View::Home);
        assert_eq!(state.panel, Panel::Home(HomePanel::default()));
    }

    #[test]
    fn input_edits_by_character() {
        let mut input = InputField::default();
        for c in "Amélie".chars() {
            input.insert(c);
        }
        assert_eq!(input.cursor(), 6);

        input.left();
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value(), "Amlie");
        assert_eq!(input.cursor(), 2);

        input.insert('é');
        input.delete();
        assert_eq!(input.value(), "Améie");

        input.home();
        input.delete();
        input.end();
        input.right();
        input.insert('!');
        assert_eq!(input.value(), "méie!");
        assert_eq!(input.cursor(), 5);
    }
}
