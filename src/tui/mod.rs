//! Interactive terminal browser for the application inventory.
//!
//! Built on ratatui with the crossterm backend. [`BrowseApp`] holds the
//! table controls plus cursor and search input; `events` maps keys onto
//! table actions; `ui` draws the header, filter toolbar, table, detail
//! panel and status bar.

mod app;
mod events;
pub mod theme;
mod ui;

pub use app::{BrowseApp, SearchInput};
pub use events::{Event, EventHandler, handle_key_event, handle_mouse_event};
pub use theme::{ColorScheme, Styles, Theme, current_theme_name, set_theme, toggle_theme};
pub use ui::{MIN_HEIGHT, MIN_WIDTH, render, run_tui};
