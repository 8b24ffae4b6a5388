//! Main application logic for the terminal user interface.
//!
//! `App` owns the records, the clock and the navigator. Every frame derives
//! the active [`Section`] afresh and paints it; key presses only ever move
//! the navigator or the row cursor.

use std::io;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};

use crate::asset::Asset;
use crate::classify::{priority_badge, Badge, Classification, Emphasis};
use crate::dataset::Dataset;
use crate::filters::NamedClientSummary;
use crate::format::*;
use crate::metrics::{ServiceTotals, Stats};
use crate::nav::{Navigator, Section, View};
use crate::project::Project;
use crate::service::Service;
use crate::task::Task;
use crate::tui::colors::{badge_color, classification_color, MONEY, PURPLE};

/// Main application state for the terminal user interface.
pub struct App {
    data: Dataset,
    now: DateTime<Utc>,
    navigator: Navigator,
    table_state: TableState,
    show_help: bool,
    status_message: String,
}

impl App {
    pub fn new(data: Dataset, now: DateTime<Utc>) -> Self {
        let mut app = App {
            data,
            now,
            navigator: Navigator::new(),
            table_state: TableState::default(),
            show_help: false,
            status_message: String::new(),
        };
        app.reset_selection();
        app
    }

    pub fn current_view(&self) -> View {
        self.navigator.current()
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Rows in the selectable table of the current view.
    fn row_count(&self) -> usize {
        match self.navigator.section(&self.data, self.now) {
            Section::Dashboard { active_projects, .. } => active_projects.len(),
            Section::Projects { projects } => projects.len(),
            Section::Clients { clients } => clients.len(),
            Section::Assets { assets } => assets.len(),
            Section::Services { services } => services.len(),
        }
    }

    fn reset_selection(&mut self) {
        let selected = if self.row_count() == 0 { None } else { Some(0) };
        self.table_state.select(selected);
    }

    fn select_view(&mut self, view: View) {
        if self.navigator.current() != view {
            self.navigator.select_view(view);
            self.reset_selection();
        }
        self.status_message.clear();
    }

    fn move_selection(&mut self, forward: bool) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.table_state.select(Some(next));
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.show_help {
            self.show_help = false;
            return false;
        }
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Right => self.select_view(self.navigator.current().next()),
            KeyCode::BackTab | KeyCode::Left => self.select_view(self.navigator.current().previous()),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Char('?') | KeyCode::Char('h') => self.show_help = true,
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.select_view(View::ALL[index]);
            }
            KeyCode::Char(c) => match shortcut_view(c) {
                Some(view) => self.select_view(view),
                None => self.status_message = format!("No binding for '{c}', press ? for help"),
            },
            _ => {}
        }
        false
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code));
                }
            }
        }
        Ok(false)
    }

    /// Main render function: header, tab bar, section body and status bar.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_tabs(f, chunks[1]);

        let today = self.today();
        let section = self.navigator.section(&self.data, self.now);
        let state = &mut self.table_state;
        match &section {
            Section::Dashboard { stats, active_projects, open_tasks, services, service_totals } => {
                render_dashboard(
                    f,
                    chunks[2],
                    DashboardParts { stats, active_projects, open_tasks, services, service_totals },
                    today,
                    state,
                );
            }
            Section::Projects { projects } => {
                let rows: Vec<&Project> = projects.iter().collect();
                render_projects_table(f, chunks[2], "All Projects", &rows, today, state);
            }
            Section::Clients { clients } => render_clients_table(f, chunks[2], clients, state),
            Section::Assets { assets } => render_assets_table(f, chunks[2], assets, state),
            Section::Services { services } => render_services_table(f, chunks[2], services, state),
        }

        self.render_status_bar(f, chunks[3]);
        if self.show_help {
            render_help(f, chunks[2]);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled("COMMAND CENTER", Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("AI Services Hub", Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                self.now.format("%A, %b %d, %Y").to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]);
        f.render_widget(Paragraph::new(header), area);
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = View::ALL
            .iter()
            .enumerate()
            .map(|(i, v)| Line::from(format!("{} {}", i + 1, v.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(self.navigator.current().index())
            .highlight_style(Style::default().fg(Color::White).bg(PURPLE).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            format!(
                "{} | Tab/1-5 switch view | j/k move | ? help | q quit",
                self.navigator.current().label()
            )
        } else {
            self.status_message.clone()
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(PURPLE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Single-letter shortcuts: the initial of each view.
fn shortcut_view(c: char) -> Option<View> {
    match c.to_ascii_lowercase() {
        'd' => Some(View::Dashboard),
        'p' => Some(View::Projects),
        'c' => Some(View::Clients),
        'a' => Some(View::Assets),
        's' => Some(View::Services),
        _ => None,
    }
}

struct DashboardParts<'s, 'a> {
    stats: &'s Stats,
    active_projects: &'s [&'a Project],
    open_tasks: &'s [&'a Task],
    services: &'a [Service],
    service_totals: &'s ServiceTotals,
}

/// Rows for the services table: one per service plus borders, header and totals.
fn services_panel_height(services: usize) -> u16 {
    u16::try_from(services).unwrap_or(u16::MAX).saturating_add(4)
}

fn badge_span(text: &str, badge: Badge) -> Span<'static> {
    let mut style = Style::default().fg(badge_color(badge));
    if badge.emphasis == Emphasis::Strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(text.to_string(), style)
}

fn stat_card<'a>(title: &'a str, value: String) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    parts: DashboardParts<'_, '_>,
    today: NaiveDate,
    state: &mut TableState,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(services_panel_height(parts.services.len())),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    let stats = parts.stats;
    let rate = stats.completion_rate.map(|r| format!("{r}%")).unwrap_or_else(|| "n/a".into());
    f.render_widget(stat_card("Active Projects", stats.active_projects.to_string()), cards[0]);
    f.render_widget(stat_card("Total Pipeline", format_thousands(stats.total_revenue, 0)), cards[1]);
    f.render_widget(stat_card("Completion Rate", rate), cards[2]);
    f.render_widget(stat_card("Due This Week", stats.upcoming_deadlines.to_string()), cards[3]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(rows[1]);
    render_projects_table(f, middle[0], "Active Projects", parts.active_projects, today, state);
    render_focus_list(f, middle[1], parts.open_tasks, today);

    let mut services_state = TableState::default();
    render_services_rows(
        f,
        rows[2],
        "Service Delivery Overview",
        parts.services,
        Some(parts.service_totals),
        &mut services_state,
    );
}

fn render_projects_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    projects: &[&Project],
    today: NaiveDate,
    state: &mut TableState,
) {
    let header = Row::new(vec!["Title", "Client", "Status", "Progress", "Due", "Value"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = projects
        .iter()
        .map(|p| {
            let status = Badge { classification: p.status.classification(), emphasis: Emphasis::Normal };
            Row::new(vec![
                Cell::from(p.title.clone()),
                Cell::from(format!("{} • {}", p.client, p.service)),
                Cell::from(badge_span(p.status.as_str(), status)),
                Cell::from(Span::styled(
                    format!("{} {:>3}%", progress_bar(p.progress, 10), p.progress),
                    Style::default().fg(PURPLE),
                )),
                Cell::from(format!("{} ({})", format_short_date(p.deadline), format_due_relative(Some(p.deadline), today))),
                Cell::from(Span::styled(format_thousands(p.value, 1), Style::default().fg(MONEY))),
            ])
        })
        .collect();
    let widths = [
        Constraint::Min(20),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!("{title} ({})", projects.len())))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, state);
}

fn render_focus_list(f: &mut Frame, area: Rect, tasks: &[&Task], today: NaiveDate) {
    let mut lines: Vec<Line> = Vec::new();
    for t in tasks {
        lines.push(Line::from(Span::styled(t.title.clone(), Style::default().add_modifier(Modifier::BOLD))));
        let mut meta = vec![
            Span::raw("  "),
            badge_span(t.priority.as_str(), priority_badge(t.priority)),
        ];
        if let Some(project) = &t.project {
            meta.push(Span::styled(format!("  {project}"), Style::default().fg(Color::DarkGray)));
        }
        if t.due_date.is_some() {
            meta.push(Span::styled(
                format!("  {}", format_due_relative(t.due_date, today)),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::from(meta));
    }
    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(format!("Today's Focus ({})", tasks.len())));
    f.render_widget(list, area);
}

fn render_clients_table(f: &mut Frame, area: Rect, clients: &[NamedClientSummary], state: &mut TableState) {
    let header = Row::new(vec!["Client", "Projects", "Total Value"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = clients
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.client.clone()),
                Cell::from(c.summary.project_count.to_string()),
                Cell::from(Span::styled(format_thousands(c.summary.total_value, 1), Style::default().fg(MONEY))),
            ])
        })
        .collect();
    let widths = [Constraint::Min(24), Constraint::Length(10), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!("Client Management ({})", clients.len())))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, state);
}

fn render_assets_table(f: &mut Frame, area: Rect, assets: &[Asset], state: &mut TableState) {
    let header = Row::new(vec!["Name", "Type", "Tags", "Last Used"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = assets
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.name.clone()),
                Cell::from(Span::styled(format_asset_type(a.kind), Style::default().fg(PURPLE))),
                Cell::from(a.tags.join(", ")),
                Cell::from(a.last_used.map(|d| d.to_string()).unwrap_or_else(|| "-".into())),
            ])
        })
        .collect();
    let widths = [
        Constraint::Min(30),
        Constraint::Length(10),
        Constraint::Min(20),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!("Asset Library ({})", assets.len())))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, state);
}

fn render_services_table(f: &mut Frame, area: Rect, services: &[Service], state: &mut TableState) {
    render_services_rows(f, area, "Service Offerings", services, None, state);
}

fn render_services_rows(
    f: &mut Frame,
    area: Rect,
    title: &str,
    services: &[Service],
    totals: Option<&ServiceTotals>,
    state: &mut TableState,
) {
    let header = Row::new(vec!["Service", "Total delivered", "Active now"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let mut rows: Vec<Row> = services
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.name.clone()),
                Cell::from(s.count.to_string()),
                Cell::from(Span::styled(
                    s.active.to_string(),
                    Style::default().fg(classification_color(Classification::Positive)),
                )),
            ])
        })
        .collect();
    if let Some(t) = totals {
        rows.push(
            Row::new(vec!["Total".to_string(), t.delivered.to_string(), t.active.to_string()])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );
    }
    let widths = [Constraint::Min(24), Constraint::Length(16), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, state);
}

fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 60, area);
    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("Tab / Shift-Tab   next / previous view"),
        Line::from("1-5               jump to view"),
        Line::from("d p c a s         dashboard projects clients assets services"),
        Line::from("j / k, Up / Down  move selection"),
        Line::from("q / Esc           quit"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];
    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

/// A rectangle centred in `r`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Dataset::sample(), Utc.with_ymd_and_hms(2025, 11, 15, 9, 0, 0).unwrap())
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_starts_on_dashboard_with_first_row_selected() {
        let app = app();
        assert_eq!(app.current_view(), View::Dashboard);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_keys_drive_navigation() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('4')));
        assert_eq!(app.current_view(), View::Assets);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.current_view(), View::Services);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.current_view(), View::Dashboard);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.current_view(), View::Services);
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.current_view(), View::Clients);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_selection_wraps_and_resets_on_view_change() {
        let mut app = app();
        app.handle_key(KeyCode::Char('p'));
        app.handle_key(KeyCode::Up);
        assert_eq!(app.table_state.selected(), Some(2));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.table_state.selected(), Some(0));
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_unbound_key_sets_status_and_help_swallows_next_key() {
        let mut app = app();
        app.handle_key(KeyCode::Char('z'));
        assert!(app.status_message.contains("'z'"));
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert_eq!(app.current_view(), View::Dashboard);
    }

    #[test]
    fn test_dashboard_renders_stats_and_focus() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("COMMAND CENTER"));
        assert!(text.contains("$46k"));
        assert!(text.contains("40%"));
        assert!(text.contains("Today's Focus (5)"));
        assert!(text.contains("Active Projects (2)"));
        assert!(!text.contains("Workflow Automation"));
    }

    #[test]
    fn test_each_view_renders_its_section() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2'));
        assert!(screen(&mut app).contains("All Projects (3)"));
        app.handle_key(KeyCode::Char('3'));
        assert!(screen(&mut app).contains("Enterprise Co"));
        app.handle_key(KeyCode::Char('4'));
        assert!(screen(&mut app).contains("Brand Kit"));
        app.handle_key(KeyCode::Char('5'));
        assert!(screen(&mut app).contains("Service Offerings"));
    }

    #[test]
    fn test_services_panel_height_saturates() {
        assert_eq!(services_panel_height(5), 9);
        assert_eq!(services_panel_height(70_000), u16::MAX);
        assert_eq!(services_panel_height(usize::from(u16::MAX) - 1), u16::MAX);
    }

    #[test]
    fn test_empty_dataset_renders_without_selection() {
        let mut app = App::new(Dataset::default(), Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap());
        assert_eq!(app.table_state.selected(), None);
        let text = screen(&mut app);
        assert!(text.contains("n/a"));
        app.handle_key(KeyCode::Down);
        assert_eq!(app.table_state.selected(), None);
    }
}
