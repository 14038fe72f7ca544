use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gastos_core::{format_brl, Issuer, Transaction};
use gastos_finance::{
    general_panel, issuer_panel, GeneralPanel, IssuerPanel, Session, TagSummary, INCOME_STEP,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Table, Tabs, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::path::Path;

use crate::report::NO_STATEMENTS;
use crate::statements::{load_into, LoadOutcome};

const TAB_TITLES: [&str; 4] = ["General", "PicPay", "Inter", "Nubank"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    General,
    Issuer(Issuer),
}

impl Tab {
    fn index(&self) -> usize {
        match self {
            Tab::General => 0,
            Tab::Issuer(issuer) => issuer.index() + 1,
        }
    }

    fn from_index(i: usize) -> Self {
        match i % TAB_TITLES.len() {
            0 => Tab::General,
            n => Tab::Issuer(Issuer::ALL[n - 1]),
        }
    }

    fn next(&self) -> Self {
        Tab::from_index(self.index() + 1)
    }

    fn previous(&self) -> Self {
        Tab::from_index(self.index() + TAB_TITLES.len() - 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

struct App {
    session: Session,
    tab: Tab,
    top: usize,
    status: Option<Status>,
    /// Path being typed after pressing `o`
    prompt: Option<String>,
}

impl App {
    fn new(session: Session, top: usize, outcomes: &[LoadOutcome]) -> Self {
        let mut app = Self {
            session,
            tab: Tab::General,
            top,
            status: None,
            prompt: None,
        };
        for outcome in outcomes {
            app.record(outcome);
        }
        app
    }

    fn record(&mut self, outcome: &LoadOutcome) {
        self.status = Some(if outcome.is_ok() {
            Status::Info(outcome.describe())
        } else {
            Status::Error(outcome.describe())
        });
    }

    fn load_path(&mut self, issuer: Issuer, path: &Path) {
        let outcome = load_into(&mut self.session, issuer, path);
        self.record(&outcome);
    }

    /// Apply one key press. Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(buffer) = self.prompt.as_mut() {
            match code {
                KeyCode::Enter => {
                    let path = buffer.trim().to_string();
                    self.prompt = None;
                    if let (Tab::Issuer(issuer), false) = (self.tab, path.is_empty()) {
                        self.load_path(issuer, Path::new(&path));
                    }
                }
                KeyCode::Esc => self.prompt = None,
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                self.tab = Tab::from_index(c as usize - '1' as usize);
            }
            KeyCode::Char('t') => {
                if let Tab::Issuer(issuer) = self.tab {
                    self.session.toggle_table(issuer);
                }
            }
            KeyCode::Char('o') => {
                if let Tab::Issuer(_) = self.tab {
                    self.prompt = Some(String::new());
                }
            }
            KeyCode::Char('+') if self.tab == Tab::General => {
                self.session.adjust_income(INCOME_STEP);
            }
            KeyCode::Char('-') if self.tab == Tab::General => {
                self.session.adjust_income(-INCOME_STEP);
            }
            _ => {}
        }
        true
    }
}

pub fn run_dashboard(session: Session, top: usize, outcomes: &[LoadOutcome]) -> Result<()> {
    enable_raw_mode()?;
    let res = run_on_alternate_screen(App::new(session, top, outcomes));
    // Restore even when setup or the loop failed; the loop error wins.
    let restored = restore_terminal();
    res.and(restored)
}

fn run_on_alternate_screen(mut app: App) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    dashboard_loop(&mut terminal, &mut app)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

fn dashboard_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    let tabs = Tabs::new(TAB_TITLES)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL).title("Spending dashboard"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::General => match general_panel(&app.session, app.top) {
            Some(panel) => draw_general(f, chunks[1], &panel),
            None => draw_message(f, chunks[1], NO_STATEMENTS),
        },
        Tab::Issuer(issuer) => match issuer_panel(&app.session, issuer) {
            Some(panel) => draw_issuer(f, chunks[1], &panel),
            None => draw_message(
                f,
                chunks[1],
                &format!("No {} statement loaded. Press 'o' to open a CSV file.", issuer),
            ),
        },
    }

    draw_footer(f, chunks[2], app);
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str) {
    let p = Paragraph::new(msg)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn metric(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<18}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Rows plus borders, header and a spacer line
fn top_table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(4)
}

fn draw_general(f: &mut Frame, area: Rect, panel: &GeneralPanel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(top_table_height(panel.top.len()).min(area.height / 2)),
            Constraint::Min(4),
        ])
        .split(area);

    let balance_color = if panel.balance < 0.0 { Color::Red } else { Color::Green };
    let metrics = Paragraph::new(Text::from(vec![
        metric("Total purchases", format_brl(panel.total)),
        metric("Monthly income", format_brl(panel.income)),
        Line::from(vec![
            Span::styled(format!("{:<18}", "Balance"), Style::default().fg(Color::Gray)),
            Span::styled(format_brl(panel.balance), Style::default().fg(balance_color)),
        ]),
        Line::from(Span::styled(
            "+/- adjusts income",
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .block(Block::default().borders(Borders::ALL).title("All cards"));
    f.render_widget(metrics, chunks[0]);

    let rows = panel.top.iter().map(|t| {
        Row::new(vec![
            t.date.clone().unwrap_or_default(),
            t.establishment.clone().unwrap_or_default(),
            format_brl(t.amount),
            t.percent_label(),
        ])
    });
    let title = format!(
        "Top {} purchases ({:.2}% of the total)",
        panel.top.len(),
        panel.top_share
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(header_row(["Date", "Establishment", "Amount", "% of total"]))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[1]);

    match &panel.tags {
        Some(tags) => {
            let lower = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[2]);
            draw_tags(f, lower[0], tags, "Spending by tag (all cards)");
            draw_rows(f, lower[1], &panel.rows, "All purchases");
        }
        None => draw_rows(f, chunks[2], &panel.rows, "All purchases"),
    }
}

fn draw_issuer(f: &mut Frame, area: Rect, panel: &IssuerPanel) {
    let table_height = if panel.table_visible { Constraint::Min(6) } else { Constraint::Length(0) };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4), table_height])
        .split(area);

    let mut lines = vec![
        metric("Total purchases", format_brl(panel.total)),
        metric("Purchases", panel.row_count.to_string()),
    ];
    if let Some(period) = &panel.period {
        lines.push(metric("Period", period.label()));
    }
    if panel.dropped_rows > 0 {
        lines.push(metric("Dropped rows", panel.dropped_rows.to_string()));
    }
    let metrics = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(panel.issuer.name()));
    f.render_widget(metrics, chunks[0]);

    match &panel.tags {
        Some(tags) => draw_tags(
            f,
            chunks[1],
            tags,
            &format!("Spending by tag - {}", panel.issuer),
        ),
        None => draw_message(f, chunks[1], "No establishment column; spending by tag unavailable."),
    }

    if let Some(rows) = &panel.rows {
        draw_rows(f, chunks[2], rows, "Purchases");
    }
}

fn draw_tags(f: &mut Frame, area: Rect, tags: &[TagSummary], title: &str) {
    let bars: Vec<Bar> = tags
        .iter()
        .map(|t| {
            Bar::default()
                .value(t.total_amount.max(0.0).round() as u64)
                .label(Line::from(t.label.clone()))
                .text_value(String::new())
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn draw_rows(f: &mut Frame, area: Rect, rows: &[Transaction], title: &str) {
    let table_rows = rows.iter().map(|t| {
        Row::new(vec![
            t.date.clone().unwrap_or_default(),
            t.establishment.clone().unwrap_or_default(),
            format_brl(t.amount),
            t.tag_label().to_string(),
        ])
    });
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(8),
        ],
    )
    .header(header_row(["Date", "Establishment", "Amount", "Tags"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", title, rows.len())),
    );
    f.render_widget(table, area);
}

fn header_row(titles: [&'static str; 4]) -> Row<'static> {
    Row::new(titles).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(buffer) = &app.prompt {
        Line::from(vec![
            Span::styled("CSV path: ", Style::default().fg(Color::Cyan)),
            Span::raw(buffer.clone()),
        ])
    } else {
        match &app.status {
            Some(Status::Info(msg)) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Green))),
            Some(Status::Error(msg)) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                "Tab/←/→ switch tabs, o=open CSV, t=toggle table, +/- income, q=quit",
                Style::default().fg(Color::Gray),
            )),
        }
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
