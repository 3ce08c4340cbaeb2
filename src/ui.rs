use anyhow::Result;
use branch_finder::{Branch, BranchDirectory};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Search,
    Directory,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Search => Page::Directory,
            Page::Directory => Page::Search,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages, so forward and back meet
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Search => "Find Store Branch",
            Page::Directory => "Branch Directory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    StoreName,
    BranchId,
}

impl InputField {
    pub fn other(&self) -> Self {
        match self {
            InputField::StoreName => InputField::BranchId,
            InputField::BranchId => InputField::StoreName,
        }
    }
}

/// What the result panel is showing. `Idle` until the first non-blank
/// search; a blank submit stays `Idle` rather than claiming "no match".
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Idle,
    Found(Branch),
    NotFound,
}

pub struct App {
    pub directory: BranchDirectory,
    pub name_input: String,
    pub id_input: String,
    pub active_field: InputField,
    pub outcome: SearchOutcome,
    pub show_passwords: bool,
    pub current_page: Page,
    pub table_state: TableState,
}

impl App {
    pub fn new(directory: BranchDirectory) -> Self {
        let mut table_state = TableState::default();
        if !directory.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            directory,
            name_input: String::new(),
            id_input: String::new(),
            active_field: InputField::StoreName,
            outcome: SearchOutcome::Idle,
            show_passwords: false,
            current_page: Page::Search,
            table_state,
        }
    }

    /// Run the current inputs against the directory. Every new search
    /// starts with passwords masked again.
    pub fn run_search(&mut self) {
        self.show_passwords = false;
        self.outcome = match self.directory.find(&self.name_input, &self.id_input) {
            Some(branch) => SearchOutcome::Found(branch.clone()),
            None => {
                if self.name_input.trim().is_empty() && self.id_input.trim().is_empty() {
                    SearchOutcome::Idle
                } else {
                    SearchOutcome::NotFound
                }
            }
        };
    }

    pub fn clear_search(&mut self) {
        self.name_input.clear();
        self.id_input.clear();
        self.active_field = InputField::StoreName;
        self.outcome = SearchOutcome::Idle;
        self.show_passwords = false;
    }

    pub fn has_input(&self) -> bool {
        !self.name_input.is_empty() || !self.id_input.is_empty()
    }

    pub fn found_branch(&self) -> Option<&Branch> {
        match &self.outcome {
            SearchOutcome::Found(branch) => Some(branch),
            _ => None,
        }
    }

    pub fn toggle_field(&mut self) {
        self.active_field = self.active_field.other();
    }

    pub fn toggle_passwords(&mut self) {
        self.show_passwords = !self.show_passwords;
    }

    pub fn push_char(&mut self, c: char) {
        self.active_input_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.active_input_mut().pop();
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            InputField::StoreName => &mut self.name_input,
            InputField::BranchId => &mut self.id_input,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    /// Enter on a directory row: show that branch on the search page as
    /// if it had been found, passwords masked.
    pub fn view_selected(&mut self) {
        let selected = self
            .table_state
            .selected()
            .and_then(|i| self.directory.all().get(i))
            .cloned();
        if let Some(branch) = selected {
            self.outcome = SearchOutcome::Found(branch);
            self.show_passwords = false;
            self.current_page = Page::Search;
        }
    }

    pub fn next(&mut self) {
        let len = self.directory.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.directory.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.directory.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                let next = i + 20;
                if next >= len {
                    len - 1
                } else {
                    next
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = match self.table_state.selected() {
            Some(i) => {
                if i < 20 {
                    0
                } else {
                    i - 20
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Release/repeat events would double up typed characters
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.current_page {
                Page::Search => match key.code {
                    // Esc clears first; a second Esc on a clean form quits
                    KeyCode::Esc => {
                        if app.has_input() || app.outcome != SearchOutcome::Idle {
                            app.clear_search();
                        } else {
                            return Ok(());
                        }
                    }
                    KeyCode::Enter => app.run_search(),
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        app.toggle_field()
                    }
                    KeyCode::Left => app.previous_page(),
                    KeyCode::Right => app.next_page(),
                    KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.toggle_passwords()
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.push_char(c)
                    }
                    KeyCode::Backspace => app.pop_char(),
                    _ => {}
                },
                Page::Directory => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    KeyCode::Enter => app.view_selected(),
                    KeyCode::Tab | KeyCode::Right => app.next_page(),
                    KeyCode::BackTab | KeyCode::Left => app.previous_page(),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::PageDown => app.page_down(),
                    KeyCode::PageUp => app.page_up(),
                    KeyCode::Home => app.table_state.select(Some(0)),
                    KeyCode::End => {
                        if !app.directory.is_empty() {
                            app.table_state.select(Some(app.directory.len() - 1));
                        }
                    }
                    _ => {}
                },
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Search => render_search_page(f, chunks[1], app),
        Page::Directory => render_directory_page(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = vec![
        (Page::Search, "Find Store Branch"),
        (Page::Directory, "Branch Directory"),
    ];

    let mut tab_spans = vec![];
    for (i, (page, name)) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(*name, style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Branches: {}", app.directory.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Source: {}", app.directory.source()),
        Style::default().fg(Color::DarkGray),
    ));

    let header_text = vec![Line::from(tab_spans)];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

// ============================================================================
// SEARCH PAGE
// ============================================================================

fn render_search_page(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Form
            Constraint::Percentage(60), // Result panel
        ])
        .split(area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Blurb
            Constraint::Length(3), // Store name input
            Constraint::Length(3), // Branch id input
            Constraint::Min(0),    // Tip
        ])
        .split(columns[0]);

    let blurb = Paragraph::new(vec![Line::from(Span::styled(
        " Search for specific store branches by name or branch ID",
        Style::default().fg(Color::DarkGray),
    ))]);
    f.render_widget(blurb, form_chunks[0]);

    render_input(f, form_chunks[1], app, InputField::StoreName);
    render_input(f, form_chunks[2], app, InputField::BranchId);

    let tip = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Tip: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                "keywords count too - a district like",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
        Line::from(Span::styled(
            " \"Bicutan\" finds its branch.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ]);
    f.render_widget(tip, form_chunks[3]);

    render_result_panel(f, columns[1], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: InputField) {
    let (value, placeholder, title) = match field {
        InputField::StoreName => (&app.name_input, "Enter store name...", " Store Name "),
        InputField::BranchId => (
            &app.id_input,
            "Enter branch ID or code...",
            " Branch ID / Code (Optional) ",
        ),
    };
    let active = app.active_field == field;

    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let content = if value.is_empty() {
        Line::from(Span::styled(
            placeholder,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::raw(value.as_str()))
    };

    let input = Paragraph::new(vec![content]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    f.render_widget(input, area);

    if active {
        f.set_cursor(area.x + 1 + value.chars().count() as u16, area.y + 1);
    }
}

fn render_result_panel(f: &mut Frame, area: Rect, app: &App) {
    match &app.outcome {
        SearchOutcome::Idle => render_idle_panel(f, area),
        SearchOutcome::NotFound => render_not_found_panel(f, area),
        SearchOutcome::Found(branch) => render_found_panel(f, area, branch, app.show_passwords),
    }
}

fn render_idle_panel(f: &mut Frame, area: Rect) {
    let dim = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Type part of a store or branch name, or a branch id,",
            dim,
        )),
        Line::from(Span::styled("  then press Enter.", dim)),
        Line::from(""),
        Line::from(Span::styled(
            "  The id box works on its own - a fragment like BR00",
            dim,
        )),
        Line::from(Span::styled("  is enough.", dim)),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Search Result "),
    );
    f.render_widget(panel, area);
}

fn render_not_found_panel(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  No matching branch found.",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Check the spelling or try a shorter fragment.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Search Result "),
    );
    f.render_widget(panel, area);
}

fn label_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn section_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

fn push_field<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &'a Option<String>) {
    if let Some(value) = value {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", label), label_style()),
            Span::raw(value.as_str()),
        ]));
    }
}

fn render_found_panel(f: &mut Frame, area: Rect, branch: &Branch, show_passwords: bool) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled("  BRANCH", section_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Branch ID: ", label_style()),
            Span::raw(branch.id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("  Branch: ", label_style()),
            Span::raw(branch.name.as_str()),
        ]),
        Line::from(vec![
            Span::styled("  Store: ", label_style()),
            Span::raw(branch.store_name.as_str()),
        ]),
    ];

    push_field(&mut content, "Area", &branch.area);
    push_field(&mut content, "Address", &branch.address);
    push_field(&mut content, "Phone", &branch.phone);
    push_field(&mut content, "Email", &branch.email);
    push_field(&mut content, "AnyDesk ID", &branch.any_desk_id);

    if !branch.keywords.is_empty() {
        content.push(Line::from(vec![
            Span::styled("  Keywords: ", label_style()),
            Span::styled(
                branch.keywords.join(", "),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if let Some(network) = &branch.network {
        content.push(Line::from(""));
        content.push(Line::from("  ─────────────────────────────────────"));
        content.push(Line::from(""));
        content.push(Line::from(Span::styled("  NETWORK", section_style())));
        content.push(Line::from(""));
        push_field(&mut content, "ISP", &network.isp);
        push_field(&mut content, "Plan", &network.plan);
        push_field(&mut content, "Bandwidth", &network.bandwidth);
        push_field(&mut content, "Connection", &network.connection_type);
        push_field(&mut content, "Account #", &network.account_number);
        push_field(&mut content, "Service ID", &network.service_id);
        push_field(&mut content, "Installed", &network.date_installed);
    }

    if let Some(security) = &branch.security {
        content.push(Line::from(""));
        content.push(Line::from("  ─────────────────────────────────────"));
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "  CCTV SECURITY",
            section_style(),
        )));
        content.push(Line::from(""));
        push_field(&mut content, "DVR/NVR", &security.dvr_nvr);
        push_field(&mut content, "Serial #", &security.serial_number);
        if let Some(cameras) = security.number_of_cameras {
            content.push(Line::from(vec![
                Span::styled("  Cameras: ", label_style()),
                Span::raw(format!("{}", cameras)),
            ]));
        }
        if let Some(days) = security.recording_days {
            content.push(Line::from(vec![
                Span::styled("  Recording: ", label_style()),
                Span::raw(format!("{} days", days)),
            ]));
        }
        push_field(&mut content, "IP Address", &security.ip_address);
        if let Some(password) = &security.admin_password {
            let mut spans = vec![Span::styled("  Admin Password: ", label_style())];
            if show_passwords {
                spans.push(Span::styled(
                    password.as_str(),
                    Style::default().fg(Color::Red),
                ));
            } else {
                spans.push(Span::styled(
                    "••••••••",
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::styled(
                    "  Ctrl+P reveals",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
            content.push(Line::from(spans));
        }
    }

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" Search Result - {} ", branch.id)),
    );
    f.render_widget(panel, area);
}

// ============================================================================
// DIRECTORY PAGE
// ============================================================================

fn render_directory_page(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Area coverage line
            Constraint::Min(0),    // Branch table
        ])
        .split(area);

    render_area_summary(f, chunks[0], app);
    render_branch_table(f, chunks[1], app);
}

fn render_area_summary(f: &mut Frame, area: Rect, app: &App) {
    let summary = app.directory.area_summary();

    let mut spans = vec![Span::styled(" Areas: ", label_style())];
    for (i, (name, count)) in summary.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  │  "));
        }
        spans.push(Span::raw(format!("{} ({})", name, count)));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Coverage "),
    );
    f.render_widget(paragraph, area);
}

fn render_branch_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["ID", "Branch", "Store", "Area", "Phone"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.directory.all().iter().map(|branch| {
        let cells = vec![
            Cell::from(branch.id.clone()),
            Cell::from(truncate(&branch.name, 18)),
            Cell::from(truncate(&branch.store_name, 24)),
            Cell::from(branch.area.clone().unwrap_or_else(|| "-".to_string())),
            Cell::from(branch.phone.clone().unwrap_or_else(|| "-".to_string())),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(20),
            Constraint::Length(26),
            Constraint::Length(14),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Branches "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

// ============================================================================
// STATUS BAR
// ============================================================================

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);

    let mut status_spans = match &app.outcome {
        SearchOutcome::Idle => vec![Span::styled(
            " Ready ",
            Style::default().fg(Color::Cyan),
        )],
        SearchOutcome::Found(branch) => vec![Span::styled(
            format!(" Found {} ", branch.id),
            Style::default().fg(Color::Green),
        )],
        SearchOutcome::NotFound => vec![Span::styled(
            " No match ",
            Style::default().fg(Color::Red),
        )],
    };

    match app.current_page {
        Page::Search => {
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("Enter", key));
            status_spans.push(Span::raw(" Search | "));
            status_spans.push(Span::styled("Tab", key));
            status_spans.push(Span::raw(" Field | "));
            status_spans.push(Span::styled("Ctrl+P", key));
            status_spans.push(Span::raw(" Passwords | "));
            status_spans.push(Span::styled("←/→", key));
            status_spans.push(Span::raw(" Page | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Clear/Quit"));
        }
        Page::Directory => {
            let selected = app.table_state.selected().map(|i| i + 1).unwrap_or(0);
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled(
                format!("Row: {}/{} ", selected, app.directory.len()),
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw("| "));
            status_spans.push(Span::styled("↑/↓", key));
            status_spans.push(Span::raw(" Nav | "));
            status_spans.push(Span::styled("Enter", key));
            status_spans.push(Span::raw(" View | "));
            status_spans.push(Span::styled("Tab", key));
            status_spans.push(Span::raw(" Page | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
    }

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(BranchDirectory::with_defaults())
    }

    #[test]
    fn test_search_outcome_transitions() {
        let mut app = test_app();
        assert_eq!(app.outcome, SearchOutcome::Idle);

        app.name_input = "makati".to_string();
        app.run_search();
        assert_eq!(app.found_branch().unwrap().id, "BR001");

        app.name_input = "no such branch".to_string();
        app.run_search();
        assert_eq!(app.outcome, SearchOutcome::NotFound);

        // Blank submit goes back to Idle, not NotFound
        app.name_input = "   ".to_string();
        app.run_search();
        assert_eq!(app.outcome, SearchOutcome::Idle);
    }

    #[test]
    fn test_typing_lands_in_active_field() {
        let mut app = test_app();

        app.push_char('b');
        app.push_char('g');
        app.push_char('c');
        assert_eq!(app.name_input, "bgc");

        app.toggle_field();
        app.push_char('b');
        app.push_char('r');
        assert_eq!(app.id_input, "br");
        assert_eq!(app.name_input, "bgc");

        app.pop_char();
        assert_eq!(app.id_input, "b");
    }

    #[test]
    fn test_clear_search_resets_everything() {
        let mut app = test_app();
        app.name_input = "makati".to_string();
        app.active_field = InputField::BranchId;
        app.run_search();
        app.show_passwords = true;

        app.clear_search();

        assert!(!app.has_input());
        assert_eq!(app.outcome, SearchOutcome::Idle);
        assert_eq!(app.active_field, InputField::StoreName);
        assert!(!app.show_passwords);
    }

    #[test]
    fn test_new_search_masks_passwords_again() {
        let mut app = test_app();
        app.name_input = "makati".to_string();
        app.run_search();

        app.toggle_passwords();
        assert!(app.show_passwords);

        app.run_search();
        assert!(!app.show_passwords);
    }

    #[test]
    fn test_view_selected_jumps_to_search_page() {
        let mut app = test_app();
        app.current_page = Page::Directory;
        app.table_state.select(Some(1));

        app.view_selected();

        assert_eq!(app.current_page, Page::Search);
        assert_eq!(app.found_branch().unwrap().id, "BR002");
    }

    #[test]
    fn test_table_navigation_wraps() {
        let mut app = test_app();
        let len = app.directory.len();

        app.table_state.select(Some(len - 1));
        app.next();
        assert_eq!(app.table_state.selected(), Some(0));

        app.previous();
        assert_eq!(app.table_state.selected(), Some(len - 1));
    }
}
