//! Event polling and key dispatch for the inventory browser.

use super::app::BrowseApp;
use super::theme::toggle_theme;
use crate::inventory::AppFilter;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut BrowseApp, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.clear_status_message();

    if app.search.active {
        match key.code {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.clear_search(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => app.next_page(),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => app.prev_page(),
        KeyCode::Char('+') => app.cycle_per_page(true),
        KeyCode::Char('-') => app.cycle_per_page(false),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('S') => app.next_sort_column(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('f') => app.cycle_filter(AppFilter::BusinessService),
        KeyCode::Char('F') => app.cycle_filter(AppFilter::SourceKind),
        KeyCode::Char(' ') => app.toggle_cursor_selection(),
        KeyCode::Char('a') => app.toggle_page_selection(),
        KeyCode::Enter => app.toggle_cursor_expansion(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('u') => app.show_url(),
        KeyCode::Char('T') => {
            let theme = toggle_theme();
            app.set_status_message(format!("Theme: {theme}"));
        }
        KeyCode::Char('?') => app.show_help_bar = !app.show_help_bar,
        _ => {}
    }
}

/// Scroll wheel moves the cursor.
pub fn handle_mouse_event(app: &mut BrowseApp, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_prev(),
        _ => {}
    }
}
