use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use region_marker_engine::{
    ParseResult, flatten_regions, matching_boundary, next_region, next_top_level_region,
    previous_region,
};
use std::{
    io::{Stdout, stdout},
    path::PathBuf,
};

use crate::outline::{diagnostic_line, region_label};

struct Row {
    id: String,
    label: String,
    start_line: usize,
    end_line: usize,
}

pub struct App {
    path: PathBuf,
    source: Vec<String>,
    result: ParseResult,
    rows: Vec<Row>,
    list_state: ListState,
    /// 0-based source line the region jumps start from.
    cursor: usize,
}

impl App {
    pub fn new(path: PathBuf, source: &str, result: ParseResult) -> Self {
        let rows = flatten_regions(&result.regions)
            .regions
            .iter()
            .map(|f| Row {
                id: f.region.id.clone(),
                label: format!("{}{}", "  ".repeat(f.depth), region_label(f.region)),
                start_line: f.region.start.line,
                end_line: f.region.end.line,
            })
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        if !rows.is_empty() {
            list_state.select(Some(0));
        }
        let cursor = rows.first().map_or(0, |r| r.start_line);

        Self {
            path,
            source: source.lines().map(str::to_string).collect(),
            result,
            rows,
            list_state,
            cursor,
        }
    }

    fn selected_row(&self) -> Option<&Row> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    fn select(&mut self, i: usize) {
        self.list_state.select(Some(i));
        self.cursor = self.rows[i].start_line;
    }

    fn select_id(&mut self, id: &str) {
        if let Some(i) = self.rows.iter().position(|r| r.id == id) {
            self.select(i);
        }
    }

    pub fn next_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.rows.len(),
            None => 0,
        };
        self.select(i);
    }

    pub fn previous_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    pub fn jump_next_region(&mut self) {
        if let Some(region) = next_region(&self.result.regions, self.cursor) {
            let id = region.id.clone();
            self.select_id(&id);
        }
    }

    pub fn jump_previous_region(&mut self) {
        if let Some(region) = previous_region(&self.result.regions, self.cursor) {
            let id = region.id.clone();
            self.select_id(&id);
        }
    }

    pub fn jump_next_top_level(&mut self) {
        if let Some(region) = next_top_level_region(&self.result.regions, self.cursor) {
            let id = region.id.clone();
            self.select_id(&id);
        }
    }

    /// Moves the cursor to the other marker of the innermost enclosing region.
    pub fn jump_matching_boundary(&mut self) {
        if let Some(line) = matching_boundary(&self.result.regions, self.cursor) {
            self.cursor = line;
        }
    }

    /// Source lines of the selected region, numbered from 1, cursor marked `>`.
    fn selected_content(&self) -> Vec<String> {
        let Some(row) = self.selected_row() else {
            return vec!["No regions found".to_string()];
        };
        self.source
            .iter()
            .enumerate()
            .skip(row.start_line)
            .take(row.end_line - row.start_line + 1)
            .map(|(i, line)| {
                let mark = if i == self.cursor { '>' } else { ' ' };
                format!("{mark}{:>5} {line}", i + 1)
            })
            .collect()
    }

    fn diagnostic_lines(&self) -> Vec<String> {
        if self.result.is_well_formed() {
            return vec!["No problems".to_string()];
        }
        self.result
            .diagnostics
            .iter()
            .map(|d| diagnostic_line(&self.path, d))
            .collect()
    }
}

pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                KeyCode::Char('n') => app.jump_next_region(),
                KeyCode::Char('p') => app.jump_previous_region(),
                KeyCode::Char('N') => app.jump_next_top_level(),
                KeyCode::Char('m') => app.jump_matching_boundary(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(5), Constraint::Length(6), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    // Outline panel
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| ListItem::new(vec![Line::from(vec![Span::raw(row.label.clone())])]))
        .collect();
    let title = format!("Regions: {}", app.path.display());
    let outline = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(outline, columns[0], &mut app.list_state);

    // Source panel
    let content: Vec<Line> = app.selected_content().into_iter().map(Line::from).collect();
    let source = Paragraph::new(content).block(Block::default().borders(Borders::ALL).title("Source"));
    f.render_widget(source, columns[1]);

    // Diagnostics panel
    let problems: Vec<Line> = app.diagnostic_lines().into_iter().map(Line::from).collect();
    let diagnostics = Paragraph::new(problems)
        .block(Block::default().borders(Borders::ALL).title("Diagnostics"))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(diagnostics, rows[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("n/p: Next/Previous region | "),
        Span::raw("N: Next top-level | m: Matching boundary"),
    ]));
    f.render_widget(help, rows[2]);
}
