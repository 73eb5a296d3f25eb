use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mortgage_calculator::{
    logger, CliConfig, Event as FormEvent, Field, LocaleBundle, PaymentMethod, Session, SubmitFailure,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

struct App {
    focus: Field,
    session: Session,
    bundle: LocaleBundle,
}

impl App {
    fn new(config: &CliConfig) -> Result<Self> {
        let bundle = config
            .load_bundle()
            .context("failed to load locale bundle")?;
        Ok(Self {
            focus: Field::Amount,
            session: Session::new(config.magnitude_guard()),
            bundle,
        })
    }
}

fn main() -> Result<()> {
    let config = CliConfig::parse();

    logger::init_file_logger(&config.log_file, config.verbose)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;
    tracing::info!(locale = ?config.locale, guard = ?config.magnitude_guard(), "Starting mortgage calculator");

    let app = App::new(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Exited with error: {:?}", err);
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(&mut app, key) {
                return Ok(());
            }
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('l') if ctrl => {
            app.session.dispatch(FormEvent::Clear);
            app.focus = Field::Amount;
        }
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.previous(),
        KeyCode::Enter => app.session.dispatch(FormEvent::Submit),
        _ if app.focus == Field::Method => handle_method_input(app, key),
        _ => handle_text_input(app, key),
    }
    false
}

fn handle_text_input(app: &mut App, key: KeyEvent) {
    let mut candidate = app.session.display_value(app.focus);
    match key.code {
        KeyCode::Char(c) => candidate.push(c),
        KeyCode::Backspace => {
            candidate.pop();
        }
        _ => return,
    }

    let event = match app.focus {
        Field::Amount => FormEvent::Amount(candidate),
        Field::Term => FormEvent::Term(candidate),
        Field::Rate => FormEvent::Rate(candidate),
        Field::Method => return,
    };
    app.session.dispatch(event);
}

fn handle_method_input(app: &mut App, key: KeyEvent) {
    let method = match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => app
            .session
            .inputs
            .method
            .map_or(PaymentMethod::Repayment, PaymentMethod::toggled),
        KeyCode::Char('1') => PaymentMethod::Repayment,
        KeyCode::Char('2') => PaymentMethod::InterestOnly,
        _ => return,
    };
    app.session.dispatch(FormEvent::Method(method));
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_title(f, app, chunks[0]);
    render_text_field(f, app, Field::Amount, chunks[1]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[2]);
    render_text_field(f, app, Field::Term, row[0]);
    render_text_field(f, app, Field::Rate, row[1]);

    render_method_field(f, app, chunks[3]);
    render_results(f, app, chunks[4]);
    render_notice(f, app, chunks[5]);

    let help = Paragraph::new(format!(
        "Tab/↑/↓: move | Enter: {} | Ctrl+L: {} | Esc: quit",
        app.bundle.buttons.submit, app.bundle.buttons.clear
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[6]);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            app.bundle.titles.main.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[Ctrl+L] {}", app.bundle.buttons.clear),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn field_block<'a>(app: &'a App, field: Field) -> Block<'a> {
    let border_style = if app.session.errors.is_missing(field) {
        Style::default().fg(Color::Red)
    } else if app.focus == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(app.bundle.label(field))
}

fn render_error_line(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let text = if app.session.errors.is_missing(field) {
        app.bundle.messages.required.as_str()
    } else {
        ""
    };
    let error = Paragraph::new(text).style(Style::default().fg(Color::Red));
    f.render_widget(error, area);
}

fn render_text_field(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)].as_ref())
        .split(area);

    let value = app.session.display_value(field);
    let adornment = app.bundle.adornment(field).unwrap_or_default();
    let decor_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::Yellow);

    // The amount carries its currency on the left, the others their unit on the right.
    let (line, cursor_offset) = if field == Field::Amount {
        let prefix = format!("{} ", adornment);
        let offset = prefix.chars().count() + value.chars().count();
        (
            Line::from(vec![
                Span::styled(prefix, decor_style),
                Span::styled(value, value_style),
            ]),
            offset,
        )
    } else {
        let offset = value.chars().count();
        (
            Line::from(vec![
                Span::styled(value, value_style),
                Span::styled(format!(" {}", adornment), decor_style),
            ]),
            offset,
        )
    };

    let input = Paragraph::new(line).block(field_block(app, field));
    f.render_widget(input, parts[0]);
    render_error_line(f, app, field, parts[1]);

    if app.focus == field {
        let x = parts[0].x + 1 + cursor_offset as u16;
        f.set_cursor(x.min(parts[0].right().saturating_sub(2)), parts[0].y + 1);
    }
}

fn render_method_field(f: &mut Frame, app: &App, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1)].as_ref())
        .split(area);

    let selected = app.session.inputs.method;
    let option = |method: PaymentMethod, label: &str| {
        if selected == Some(method) {
            Line::from(format!("(•) {}", label))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Line::from(format!("( ) {}", label)).style(Style::default().fg(Color::DarkGray))
        }
    };

    let options = vec![
        option(PaymentMethod::Repayment, &app.bundle.labels.repayment),
        option(PaymentMethod::InterestOnly, &app.bundle.labels.interest_only),
    ];

    let input = Paragraph::new(options).block(field_block(app, Field::Method));
    f.render_widget(input, parts[0]);
    render_error_line(f, app, Field::Method, parts[1]);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let bundle = &app.bundle;
    let unit = &bundle.currency_unit;

    let (title, lines) = match app.session.formatted_result() {
        Some((monthly, total)) => (
            bundle.titles.results.as_str(),
            vec![
                Line::from(bundle.messages.results_hint.as_str())
                    .style(Style::default().fg(Color::Gray)),
                Line::from(""),
                Line::from(bundle.messages.monthly.as_str()),
                Line::from(format!("{} {}", monthly, unit)).style(
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
                Line::from(bundle.messages.total.as_str()),
                Line::from(format!("{} {}", total, unit))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            ],
        ),
        None => (
            bundle.titles.empty_results.as_str(),
            vec![Line::from(bundle.messages.empty_hint.as_str())
                .style(Style::default().fg(Color::Gray))],
        ),
    };

    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(results, area);
}

fn render_notice(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.session.failure {
        Some(SubmitFailure::InvalidMagnitude) => app.bundle.messages.invalid_magnitude.clone(),
        Some(SubmitFailure::InvalidNumber(name)) => {
            let label = Field::ALL
                .into_iter()
                .find(|field| field.name() == name)
                .map_or(name, |field| app.bundle.label(field));
            format!("{}: {}", app.bundle.messages.invalid_number, label)
        }
        Some(SubmitFailure::MissingInput) | None => String::new(),
    };

    let notice = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    f.render_widget(notice, area);
}
