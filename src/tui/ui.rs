use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::format_movie_blocks;

use super::state::{AppState, Focus, Panel, SearchResults, Trending, View};

/// Decorative header art.
const BANNER: &str = include_str!("../../assets/banner.txt");

const BRAND: Color = Color::Rgb(0xa4, 0xdb, 0x24);
const NAV_BG: Color = Color::Rgb(0x22, 0x26, 0x3d);
const SIDEBAR_WIDTH: u16 = 18;

const WELCOME_TEXT: &str = "\
Welcome to Cinemania, your go-to hub for all things cinema! At Cinemania, we're \
dedicated to making your movie-watching experience not just enjoyable, but \
extraordinary. Whether you're a seasoned cinephile or a casual viewer, our \
user-friendly platform is designed to cater to your every cinematic need.

Looking for personalized recommendations? Cinemania goes beyond the basics, \
offering tailored suggestions based on your viewing history and preferences. \
Let Cinemania guide you through the vast landscape of cinematic delights.

Join us at Cinemania and open the door to a world of cinematic wonders. \
Explore, rate, review, and share your passion for movies like never before. \
Welcome to a community that shares your love for the seventh art \u{2013} \
welcome to Cinemania!";

/// Main render function: chrome first, then the visible panel.
pub fn render(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height()),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    state.nav_area = body[0];
    render_navigation(f, body[0], state);
    render_content(f, body[1], state);
    render_help_bar(f, chunks[2], state);
}

fn header_height() -> u16 {
    BANNER.lines().count() as u16 + 2
}

/// Render the brand header.
fn render_header(f: &mut Frame, area: Rect) {
    let art = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = BANNER
        .lines()
        .map(|l| Line::from(Span::styled(l, art)))
        .collect();
    lines.push(Line::from(vec![
        Span::styled("Cinemania.com", art),
        Span::styled("  Welcome to Cinemania", Style::default().fg(NAV_BG)),
    ]));

    let header = Paragraph::new(lines).block(
        Block::default()
            .style(Style::default().bg(BRAND))
            .padding(Padding::new(2, 2, 1, 0)),
    );
    f.render_widget(header, area);
}

/// Render the navigation sidebar.
fn render_navigation(f: &mut Frame, area: Rect, state: &AppState) {
    let current = state.view();
    let mut lines = vec![Line::default()];
    for (i, view) in View::ALL.iter().enumerate() {
        let entry = format!("F{} {}", i + 1, view.label());
        let line = if *view == current {
            Line::from(Span::styled(
                format!("\u{25b6} {entry}"),
                Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                format!("  {entry}"),
                Style::default().fg(Color::White),
            ))
        };
        lines.push(line);
        lines.push(Line::default());
    }

    let nav = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .border_style(focus_style(state.focus == Focus::Sidebar))
            .style(Style::default().bg(NAV_BG)),
    );
    f.render_widget(nav, area);
}

/// Render the visible panel inside the content frame.
fn render_content(f: &mut Frame, area: Rect, state: &mut AppState) {
    let focused = state.focus == Focus::Content;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let heading = match state.view() {
        View::Home => "Home",
        View::Search => "Search Movies",
        View::Movies => "Trending Movies",
    };
    let heading = Paragraph::new(heading)
        .style(Style::default().fg(BRAND).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    match &mut state.panel {
        Panel::Home(panel) => render_scrollable(f, chunks[1], WELCOME_TEXT, &mut panel.scroll),
        Panel::Search(panel) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(chunks[1]);

            let title = if panel.in_flight.is_some() {
                " Searching... "
            } else {
                " Search "
            };
            // Scroll sideways so the cursor stays inside the box.
            let inner_width = parts[0].width.saturating_sub(2);
            let cursor = u16::try_from(panel.input.cursor()).unwrap_or(u16::MAX);
            let offset = cursor.saturating_sub(inner_width.saturating_sub(1));

            let input = Paragraph::new(panel.input.value())
                .style(Style::default().fg(Color::White))
                .scroll((0, offset))
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                );
            f.render_widget(input, parts[0]);

            if focused {
                let cursor_x = parts[0].x + 1 + (cursor - offset);
                let cursor_y = parts[0].y + 1;
                f.set_cursor_position((cursor_x, cursor_y));
            }

            let results_area = parts[1].inner(Margin::new(0, 1));
            match &panel.results {
                SearchResults::Empty => {}
                SearchResults::NotFound => {
                    let msg = Paragraph::new("Movie not found.")
                        .style(Style::default().fg(Color::Red));
                    f.render_widget(msg, results_area);
                }
                SearchResults::Found(movies) => {
                    let text = format_movie_blocks(movies);
                    render_scrollable(f, results_area, &text, &mut panel.scroll);
                }
            }
        }
        Panel::Movies(panel) => match &panel.trending {
            Trending::Loading(_) => {
                let msg = Paragraph::new("Loading trending movies...")
                    .style(Style::default().fg(Color::Yellow));
                f.render_widget(msg, chunks[1]);
            }
            Trending::Loaded(movies) => {
                let text = format_movie_blocks(movies);
                render_scrollable(f, chunks[1], &text, &mut panel.scroll);
            }
            Trending::Failed(error) => {
                let msg = Paragraph::new(format!("Error: {error}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true });
                f.render_widget(msg, chunks[1]);
            }
        },
    }
}

/// Render word-wrapped read-only text with a scrollbar, clamping `scroll`
/// so the last line can reach the bottom of `area` but no further.
fn render_scrollable(f: &mut Frame, area: Rect, text: &str, scroll: &mut u16) {
    let text_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    let total = u16::try_from(paragraph.line_count(text_area.width)).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(area.height);
    *scroll = (*scroll).min(max_scroll);

    f.render_widget(paragraph.scroll((*scroll, 0)), text_area);

    if max_scroll > 0 {
        let mut scrollbar_state =
            ScrollbarState::new(max_scroll as usize).position(*scroll as usize);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

/// Render the key help line at the bottom.
fn render_help_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let help = match (state.focus, state.view()) {
        (Focus::Sidebar, _) => {
            " Up/Down: Switch panel | Enter: Open | h/s/m: Home/Search/Movies | q: Quit"
        }
        (Focus::Content, View::Search) => {
            " Enter: Search | Up/Down PgUp/PgDn: Scroll | Esc: Menu | Ctrl+C: Quit"
        }
        (Focus::Content, _) => " Up/Down PgUp/PgDn: Scroll | Esc: Menu | q: Quit",
    };

    let mut spans = Vec::new();
    if state.is_loading() {
        spans.push(Span::styled(" Loading...", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::raw(help));

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
