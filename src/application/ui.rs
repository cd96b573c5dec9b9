use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::SessionPhase;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Session;

const ACCENT: Color = Color::Rgb(129, 140, 248);

fn centered_rect(rect: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(rect);

    let side = (100 - percent_x) / 2;
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(side),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(side),
        ])
        .split(vertical[1]);

    return horizontal[1];
}

fn panel() -> Block<'static> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(2, 2, 1, 1));
}

fn footer_text(app_state: &AppState) -> String {
    if let Some(notice) = &app_state.notice {
        return notice.to_string();
    }

    let hint = match app_state.session.phase() {
        SessionPhase::Welcome => "Enter: begin   Ctrl+C: quit",
        SessionPhase::Collecting => "Enter: submit answer   Ctrl+C: quit",
        SessionPhase::Analyzing => "Ctrl+C: quit",
        SessionPhase::Results => {
            "Up/Down: scroll   v: visual interpretation   s: save image   r: restart   Ctrl+C: quit"
        }
        SessionPhase::Error => "Enter/r: try again   Ctrl+C: quit",
    };

    return hint.to_string();
}

fn render_welcome<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, rect: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Shadow Work Companion",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Ready to meet yourself? {} questions to uncover your hidden patterns and start your healing era.",
            app_state.session.question_count()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to begin your check-in",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    if let Some(warning) = &app_state.backend_warning {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Heads up, the backend isn't reachable right now. You can still answer, but the analysis may fail.",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            format!("Error: {warning}"),
            Style::default().fg(Color::Red),
        )));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 10;
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_rect(rect, 70, height),
    );
}

fn render_collecting<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &AppState,
    textarea: &tui_textarea::TextArea,
    rect: Rect,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .split(rect);

    let count = app_state.session.question_count().max(1);
    let number = app_state.session.current_index() + 1;
    let percent = u16::try_from((number * 100 / count).min(100)).unwrap_or(100);

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(ACCENT))
            .percent(percent)
            .label(format!("Question {number} of {count}, {percent}% complete")),
        layout[0],
    );

    frame.render_widget(
        Paragraph::new(app_state.session.current_question().unwrap_or_default())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(panel())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout[1],
    );

    if app_state.session.is_busy() {
        app_state.loading.render(frame, layout[2]);
    } else {
        frame.render_widget(textarea.widget(), layout[2]);
    }
}

fn render_analyzing<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, rect: Rect) {
    let area = centered_rect(rect, 60, 6);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    app_state.loading.render(frame, layout[0]);
    frame.render_widget(
        Paragraph::new("Reviewing your shadow work and mapping your path.")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn render_results<B: Backend>(frame: &mut Frame<B>, app_state: &mut AppState, rect: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(1, 1, 0, 0))
        .title(" Your shadow work report ");

    // Leave a column for the scrollbar.
    let inner = block.inner(rect);
    let report_rect = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };
    if report_rect.width != app_state.last_known_width
        || report_rect.height != app_state.last_known_height
    {
        app_state.set_rect(report_rect);
    }

    frame.render_widget(
        Paragraph::new(app_state.report().to_vec())
            .block(block)
            .scroll((app_state.scroll.position, 0)),
        rect,
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );
}

fn render_error<B: Backend>(frame: &mut Frame<B>, rect: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "We hit a snag generating your analysis. It happens!",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from("Press Enter or r to try again."),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_rect(rect, 60, 9),
    );
}

fn render<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &mut AppState,
    textarea: &tui_textarea::TextArea,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    match app_state.session.phase() {
        SessionPhase::Welcome => render_welcome(frame, app_state, layout[0]),
        SessionPhase::Collecting => render_collecting(frame, app_state, textarea, layout[0]),
        SessionPhase::Analyzing => render_analyzing(frame, app_state, layout[0]),
        SessionPhase::Results => render_results(frame, app_state, layout[0]),
        SessionPhase::Error => render_error(frame, layout[0]),
    }

    frame.render_widget(
        Paragraph::new(footer_text(app_state)).style(Style::default().fg(Color::DarkGray)),
        layout[1],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    events: &mut EventsService,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<()> {
    let mut textarea = TextArea::default();

    #[cfg(feature = "dev")]
    {
        textarea.insert_str("I get impatient with people who take forever to decide.");
    }

    loop {
        terminal.draw(|frame| {
            render(frame, app_state, &textarea);
        })?;

        match events.next().await? {
            Event::AnalysisResponse(generation, outcome) => {
                app_state.handle_analysis_response(generation, outcome);
            }
            Event::BackendUnavailable(reason) => {
                app_state.backend_warning = Some(reason);
            }
            Event::KeyboardCharInput(input) => {
                let (handled, action) = app_state.handle_key(&input);
                if let Some(action) = action {
                    tx.send(action)?;
                }
                if !handled && app_state.accepts_text() {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                let (clear, actions) = app_state.handle_enter(&TextArea::contents(&textarea));
                if clear {
                    textarea = TextArea::default();
                }
                for action in actions {
                    tx.send(action)?;
                }
            }
            Event::KeyboardPaste(text) => {
                if app_state.accepts_text() {
                    textarea.insert_str(text);
                }
            }
            Event::Notice(text) => {
                app_state.notice = Some(text);
            }
            Event::QuestionReady(generation) => {
                app_state.handle_question_ready(generation);
            }
            Event::UIScrollDown() => {
                if let Some(input) = app_state.handle_vertical(Key::Down) {
                    textarea.input(input);
                }
            }
            Event::UIScrollUp() => {
                if let Some(input) = app_state.handle_vertical(Key::Up) {
                    textarea.input(input);
                }
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.loading.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new(
        Session::default(),
        Duration::from_millis(Config::get_u64(ConfigKey::TransitionDelay)),
    );
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut app_state, &mut events, tx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
