//! UI rendering for the inventory browser.

use super::app::BrowseApp;
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{
    Styles, Theme, colors, filter_badge, footer_hints, render_footer_hints, set_theme,
};
use crate::config::AppConfig;
use crate::inventory::{AppColumn, InventoryProps, InventoryTable};
use crate::model::Application;
use crate::table::{
    ExpandableVariant, FetchStatus, FilterKind, RowProps, TableKey, TableUrlParams, TableVariant,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::{self, stdout};

/// Smallest terminal the browser renders in.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Browse `applications` interactively until the user quits.
pub fn run_tui(
    applications: Vec<Application>,
    table: InventoryTable,
    url_params: TableUrlParams,
    settings: &AppConfig,
) -> io::Result<()> {
    if settings.output.no_color {
        set_theme(Theme::monochrome());
    } else {
        set_theme(Theme::from_name(&settings.tui.theme));
    }
    let mut app = BrowseApp::new(applications, table, url_params);
    app.show_help_bar = settings.tui.show_help_bar;
    tracing::debug!(theme = %settings.tui.theme, "starting inventory browser");
    run_browse_tui(&mut app, settings.tui.tick_rate_ms, settings.tui.mouse_enabled)
}

fn run_browse_tui(app: &mut BrowseApp, tick_rate_ms: u64, mouse_enabled: bool) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, &EventHandler::new(tick_rate_ms));

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut BrowseApp,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::Resize(_, _) => {}
            Event::Tick => {
                app.tick += 1;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut BrowseApp) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small: {}x{} (need {MIN_WIDTH}x{MIN_HEIGHT})",
            area.width, area.height
        ))
        .style(Styles::warning())
        .alignment(Alignment::Center);
        frame.render_widget(warning, area);
        return;
    }

    let props = app.table.local_props(&app.applications, FetchStatus::loaded());
    let expanded = props
        .rows_with_items()
        .find(|(_, row)| row.is_expanded)
        .map(|(item, _)| item);

    let mut constraints = vec![
        Constraint::Length(1), // Header
        Constraint::Length(1), // Filter toolbar
        Constraint::Min(5),    // Table
    ];
    if expanded.is_some() {
        constraints.push(Constraint::Length(7)); // Detail
    }
    constraints.push(Constraint::Length(1)); // Status bar
    if app.show_help_bar {
        constraints.push(Constraint::Length(1)); // Footer
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_header(frame, chunks[0], &props, app.applications.len());
    render_filter_toolbar(frame, chunks[1], &props, app);
    render_table(frame, chunks[2], &props, app.cursor);

    let mut next = 3;
    if let Some(item) = expanded {
        render_detail(frame, chunks[next], item);
        next += 1;
    }
    render_status_bar(frame, chunks[next], &props, app.status_message.as_deref());
    if app.show_help_bar {
        let hints = footer_hints(app.search.active);
        frame.render_widget(
            Paragraph::new(Line::from(render_footer_hints(&hints))),
            chunks[next + 1],
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, props: &InventoryProps<'_>, inventory_size: usize) {
    let line = Line::from(vec![
        Span::styled(" Application inventory ", Styles::header_title()),
        Span::styled(
            format!("{} of {inventory_size} applications", props.total_item_count),
            Styles::text_muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_filter_toolbar(
    frame: &mut Frame,
    area: Rect,
    props: &InventoryProps<'_>,
    app: &BrowseApp,
) {
    let mut spans = vec![Span::raw(" ")];
    for category in &props.filter_toolbar.categories {
        let value = props
            .filter_toolbar
            .filter_values
            .get(&category.key)
            .filter(|v| !v.is_empty());
        let (text, active) = match category.kind {
            FilterKind::Search if app.search.active => (format!("{}_", app.search.query), true),
            FilterKind::Search => match value {
                Some(v) => (v.values().join(" "), true),
                None => (category.placeholder.clone().unwrap_or_default(), false),
            },
            FilterKind::Select | FilterKind::MultiSelect => match value {
                Some(v) => (v.values().join(", "), true),
                None => ("any".to_string(), false),
            },
        };
        spans.extend(filter_badge(&category.title, &text, active));
        spans.push(Span::raw("  "));
    }
    if props.filter_toolbar.active_filter_count > 0 {
        spans.push(Span::styled(
            format!("({} active)", props.filter_toolbar.active_filter_count),
            Styles::label(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn column_width(column: AppColumn) -> Constraint {
    match column {
        AppColumn::Name => Constraint::Min(16),
        AppColumn::Description => Constraint::Fill(2),
        AppColumn::BusinessService => Constraint::Length(18),
        AppColumn::Source => Constraint::Fill(2),
        AppColumn::Tags => Constraint::Fill(1),
    }
}

fn row_marker(props: &InventoryProps<'_>, row: &RowProps<AppColumn>) -> String {
    let mut marker = String::new();
    if props.is_selectable {
        marker.push_str(if row.is_selected { "[x]" } else { "[ ]" });
    }
    if props.expandable_variant == Some(ExpandableVariant::Single) {
        marker.push(if row.is_expanded { '▾' } else { '▸' });
    }
    marker
}

fn render_table(frame: &mut Frame, area: Rect, props: &InventoryProps<'_>, cursor: usize) {
    let scheme = colors();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_focused())
        .title(" Applications ");

    if let Some(error) = &props.error {
        let message = Paragraph::new(format!("Failed to load applications: {error}"))
            .style(Styles::error())
            .block(block);
        frame.render_widget(message, area);
        return;
    }
    if props.is_empty() {
        let message = Paragraph::new("No applications match the current filters")
            .style(Styles::text_muted())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let mut header_cells = vec![Cell::from("")];
    header_cells.extend(props.column_headers.iter().map(|header| {
        let label = match &header.sort {
            Some(sort) if sort.is_active => match sort.direction {
                Some(direction) => format!("{} {}", header.label, direction.indicator()),
                None => header.label.clone(),
            },
            Some(_) => format!("{} ↕", header.label),
            None => header.label.clone(),
        };
        Cell::from(label)
    }));
    let header = Row::new(header_cells).style(Style::default().fg(scheme.primary).bold());

    let rows: Vec<Row> = props
        .rows_with_items()
        .map(|(item, row)| {
            let mut cells = vec![Cell::from(row_marker(props, row))];
            cells.extend(
                AppColumn::all()
                    .iter()
                    .map(|column| Cell::from(column.cell_text(item))),
            );
            let style = if row.is_selected {
                Style::default().fg(scheme.accent)
            } else {
                Styles::text()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(4)];
    widths.extend(AppColumn::all().iter().map(|c| column_width(*c)));

    let spacing = match props.variant {
        TableVariant::Default => 2,
        TableVariant::Compact => 1,
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(spacing)
        .row_highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut state = TableState::default()
        .with_selected(Some(cursor.min(props.current_page_items.len().saturating_sub(1))));
    frame.render_stateful_widget(table, area, &mut state);
}

fn detail_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Styles::label()),
        Span::styled(value.into(), Styles::value()),
    ])
}

fn render_detail(frame: &mut Frame, area: Rect, item: &Application) {
    let mut lines = vec![detail_line(
        "Description",
        item.description.clone().unwrap_or_else(|| "-".to_string()),
    )];
    lines.push(detail_line(
        "Binary",
        if item.is_binary_enabled() {
            item.binary.clone().unwrap_or_default()
        } else {
            "-".to_string()
        },
    ));
    match item.repository.as_ref().filter(|_| item.is_source_code_enabled()) {
        Some(repo) => {
            let mut source = format!("{} {}", repo.kind, repo.url);
            if let Some(branch) = &repo.branch {
                source.push_str(&format!(" @ {branch}"));
            }
            if let Some(path) = &repo.path {
                source.push_str(&format!(" ({path})"));
            }
            lines.push(detail_line("Source repository", source));
        }
        None => lines.push(detail_line("Source repository", "-")),
    }
    lines.push(detail_line(
        "Business service",
        item.business_service_name().unwrap_or("-").to_string(),
    ));
    let tags: Vec<&str> = item.tag_names().collect();
    lines.push(detail_line(
        "Tags",
        if tags.is_empty() { "-".to_string() } else { tags.join(", ") },
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .title(format!(" {} ", item.name));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    props: &InventoryProps<'_>,
    status_message: Option<&str>,
) {
    let mut spans = Vec::new();
    if let Some(pagination) = &props.pagination {
        spans.push(Span::styled(
            format!(
                " {}  page {}/{}  {} per page ",
                pagination.range_label(),
                pagination.page_number,
                pagination.page_count.max(1),
                pagination.items_per_page
            ),
            Styles::text(),
        ));
    }
    if props.selected_count > 0 {
        let label = if props.are_all_selected {
            format!("│ {} selected (page) ", props.selected_count)
        } else {
            format!("│ {} selected ", props.selected_count)
        };
        spans.push(Span::styled(label, Styles::success()));
    }
    if props.is_loading {
        spans.push(Span::styled("│ loading… ", Styles::warning()));
    }
    if let Some(message) = status_message {
        spans.push(Span::styled(format!("│ {message}"), Styles::text_muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Styles::status_bar()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::inventory::inventory_table;
    use crate::model::Ref;
    use crate::table::TableUrlParams;
    use ratatui::backend::TestBackend;

    fn browse_app() -> BrowseApp {
        let applications: Vec<Application> = (1..=3)
            .map(|id| {
                let mut app = Application::new(id, format!("service-{id}"));
                app.description = Some(format!("Service number {id}"));
                app.business_service = Some(Ref::new(1, "Retail"));
                app
            })
            .collect();
        let table = inventory_table(&applications, &TableConfig::default());
        BrowseApp::new(applications, table, TableUrlParams::default())
    }

    fn rendered(app: &mut BrowseApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_table_and_status() {
        let mut app = browse_app();
        let screen = rendered(&mut app, 120, 20);
        assert!(screen.contains("Application inventory"));
        assert!(screen.contains("service-1"));
        assert!(screen.contains("Name ▲"));
        assert!(screen.contains("1 - 3 of 3"));
    }

    #[test]
    fn test_render_expanded_detail() {
        let mut app = browse_app();
        app.toggle_cursor_expansion();
        let screen = rendered(&mut app, 120, 24);
        assert!(screen.contains("Business service"));
        assert!(screen.contains("Service number 1"));
        assert!(screen.contains("▾"));
    }

    #[test]
    fn test_render_empty_and_small() {
        let mut app = browse_app();
        app.start_search();
        app.search_push('z');
        let screen = rendered(&mut app, 120, 20);
        assert!(screen.contains("No applications match"));

        let screen = rendered(&mut app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }
}
