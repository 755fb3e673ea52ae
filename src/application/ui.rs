use std::io;

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
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Route;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::SESSION_EXPIRED_MESSAGE;

fn render(frame: &mut Frame, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let mut header = vec![Span::styled(
        " DocChat ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    if app_state.session_expired {
        header.push(Span::styled(
            format!(" {SESSION_EXPIRED_MESSAGE}"),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(email) = &app_state.user_email {
        header.push(Span::raw(format!(" {email}")));
    }
    header.push(Span::styled(
        format!("  {}", app_state.route()),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(header)), layout[0]);

    if let Some(view) = app_state.conversation.as_mut() {
        view.render(frame, layout[1]);
    } else {
        let bottom_height = if app_state.path_input.is_some() { 3 } else { 5 };
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(3), Constraint::Length(bottom_height)])
            .split(layout[1]);

        app_state.documents.render(frame, body[0]);
        if let Some(path_input) = &app_state.path_input {
            frame.render_widget(path_input.widget(), body[1]);
        } else {
            app_state.uploader.render(frame, body[1]);
        }
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            app_state.hotkeys(),
            Style::default().fg(Color::DarkGray),
        )),
        layout[2],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    loop {
        terminal.draw(|frame| {
            render(frame, app_state);
        })?;

        let event = events.next().await?;
        for action in app_state.handle_event(event) {
            tx.send(action)?;
        }

        if app_state.should_quit {
            break;
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

/// Runs the UI until the user quits. Returns the message to print once the
/// terminal is restored, if any.
pub async fn start(
    route: Route,
    user_email: Option<String>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<Option<String>> {
    let (mut app_state, actions) = AppState::new(route, user_email);
    for action in actions {
        tx.send(action)?;
    }

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

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    res?;

    return Ok(app_state.exit_message);
}
