pub mod actions;
pub mod events;
pub mod fetch;
pub mod state;
pub mod terminal;
pub mod ui;

pub use actions::process_state;
pub use events::handle_event;
pub use fetch::Fetcher;
pub use state::{AppState, NavEvent, View};
pub use terminal::{install_panic_hook, restore_terminal, setup_terminal};
pub use ui::render;
