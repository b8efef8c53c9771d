use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use maintlog_core::{MaintenanceKind, MonthSummary};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph},
};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    preventive: Color,
    repair: Color,
    emergency: Color,
    department: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    preventive: Color::Green,
    repair: Color::Blue,
    emergency: Color::Red,
    department: Color::Yellow,
};

fn kind_color(kind: MaintenanceKind) -> Color {
    match kind {
        MaintenanceKind::Preventive => THEME.preventive,
        MaintenanceKind::Repair => THEME.repair,
        MaintenanceKind::Emergency => THEME.emergency,
    }
}

pub struct DashboardApp {
    pub summaries: Vec<MonthSummary>,
    pub current_month_index: usize,
}

impl DashboardApp {
    /// Opens on the most recent month.
    pub fn new(summaries: Vec<MonthSummary>) -> Self {
        let current_month_index = summaries.len().saturating_sub(1);
        Self {
            summaries,
            current_month_index,
        }
    }

    pub fn next_month(&mut self) {
        if self.current_month_index + 1 < self.summaries.len() {
            self.current_month_index += 1;
        }
    }

    pub fn previous_month(&mut self) {
        self.current_month_index = self.current_month_index.saturating_sub(1);
    }

    pub fn current(&self) -> Option<&MonthSummary> {
        self.summaries.get(self.current_month_index)
    }

    fn has_previous(&self) -> bool {
        self.current_month_index > 0
    }

    fn has_next(&self) -> bool {
        self.current_month_index + 1 < self.summaries.len()
    }
}

pub fn run(summaries: Vec<MonthSummary>) -> Result<()> {
    if summaries.is_empty() {
        println!("No maintenance records in range.");
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(summaries);
    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut DashboardApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_month(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &DashboardApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Charts + summary
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let Some(summary) = app.current() else {
        frame.render_widget(
            Paragraph::new("No data available").alignment(Alignment::Center),
            main_layout[1],
        );
        return;
    };

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1), Constraint::Length(20)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "MAINTENANCE ANALYTICS",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_style = |enabled: bool| Style::default().fg(if enabled { THEME.text } else { THEME.muted });
    let nav_text = Line::from(vec![
        Span::styled(" < ", nav_style(app.has_previous())),
        Span::styled(
            format!(" {} ", summary.month_key),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", nav_style(app.has_next())),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);
    frame.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    // --- Content ---
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(1),
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Percentage(25),
        ])
        .split(main_layout[1]);

    draw_type_chart(frame, summary, content[0]);
    draw_department_chart(frame, summary, content[2]);
    draw_info_panel(frame, summary, content[4]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("NAV: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn rounded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title)
}

fn draw_type_chart(frame: &mut Frame, summary: &MonthSummary, area: Rect) {
    let bars: Vec<Bar> = MaintenanceKind::ALL
        .iter()
        .map(|&kind| {
            Bar::default()
                .label(kind.as_str())
                .value(summary.by_type.get(kind))
                .style(Style::default().fg(kind_color(kind)))
        })
        .collect();

    let chart = BarChart::default()
        .block(rounded_block(" By Type "))
        .bar_width(10)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_department_chart(frame: &mut Frame, summary: &MonthSummary, area: Rect) {
    let bars: Vec<Bar> = summary
        .by_department
        .iter()
        .map(|(name, count)| {
            Bar::default()
                .label(name.as_str())
                .value(*count)
                .style(Style::default().fg(THEME.department))
        })
        .collect();

    let chart = BarChart::default()
        .block(rounded_block(" By Department "))
        .bar_width(10)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, summary: &MonthSummary, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    let label = |text: &'static str| Span::styled(text, Style::default().fg(THEME.muted));
    let info_text = vec![
        Line::from(Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            label("Records:     "),
            Span::styled(summary.total.to_string(), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            label("Labor:       "),
            Span::styled(format!("{:.1}h", summary.total_hours), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            label("Emergencies: "),
            Span::styled(
                summary.emergency_count.to_string(),
                Style::default().fg(THEME.emergency).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Departments: "),
            Span::styled(summary.by_department.len().to_string(), Style::default().fg(THEME.text)),
        ]),
    ];
    frame.render_widget(Paragraph::new(info_text).block(rounded_block(" Summary ")), chunks[0]);

    let ratio = emergency_ratio(summary);
    let gauge = Gauge::default()
        .block(rounded_block(" Emergency Share "))
        .gauge_style(Style::default().fg(if ratio > 0.25 { THEME.emergency } else { THEME.preventive }))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, chunks[1]);
}

fn emergency_ratio(summary: &MonthSummary) -> f64 {
    if summary.total == 0 {
        0.0
    } else {
        summary.emergency_count as f64 / summary.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(month_key: &str, total: u64, emergency_count: u64) -> MonthSummary {
        let mut s = MonthSummary::new(month_key.to_string());
        s.total = total;
        s.emergency_count = emergency_count;
        s.by_type.emergency = emergency_count;
        s.by_type.repair = total - emergency_count;
        s
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = DashboardApp::new(vec![summary("2024-01", 1, 0), summary("2024-02", 2, 1)]);
        assert_eq!(app.current().unwrap().month_key, "2024-02");
        app.next_month();
        assert_eq!(app.current_month_index, 1);
        app.previous_month();
        app.previous_month();
        assert_eq!(app.current_month_index, 0);
        assert!(!app.has_previous());
        assert!(app.has_next());
    }

    #[test]
    fn test_empty_app_has_no_current_month() {
        let app = DashboardApp::new(Vec::new());
        assert!(app.current().is_none());
    }

    #[test]
    fn test_emergency_ratio() {
        assert_eq!(emergency_ratio(&summary("2024-01", 4, 1)), 0.25);
        assert_eq!(emergency_ratio(&MonthSummary::new("2024-01".to_string())), 0.0);
    }
}
