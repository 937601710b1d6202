//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::features::focus::Phase;
use crate::tui::app::{App, Field};
use crate::tui::event::HELP;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, inputs, error, clock, total, button, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Work input
            Constraint::Length(3), // Break input
            Constraint::Length(1), // Error line
            Constraint::Length(3), // Clock
            Constraint::Length(1), // Work total
            Constraint::Length(3), // Start/Stop
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_input(frame, app, Input::Work, chunks[1]);
    render_input(frame, app, Input::Break, chunks[2]);
    render_error(frame, app, chunks[3]);
    render_clock(frame, app, chunks[4]);
    render_total(frame, app, chunks[5]);
    render_toggle(frame, app, chunks[6]);
    render_status_bar(frame, app, chunks[8]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::White,
        Phase::Work => Color::Red,
        Phase::Break => Color::Green,
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header = Paragraph::new(format!(" {} ", app.controller.title()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// The two duration inputs.
#[derive(Debug, Clone, Copy)]
enum Input {
    Work,
    Break,
}

/// Render one of the duration inputs.
fn render_input(frame: &mut Frame<'_>, app: &App, input: Input, area: Rect) {
    let (label, value, field) = match input {
        Input::Work => (" Work Time (minutes) ", app.work_input.as_str(), Field::Work),
        Input::Break => (" Break Time (minutes) ", app.break_input.as_str(), Field::Break),
    };
    let focused = app.focus == field;
    let locked = app.inputs_locked();

    let text_style = if locked {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let border_style = if focused && !locked {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(value, text_style)];
    if focused && !locked {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border_style),
    );

    frame.render_widget(widget, area);
}

/// Render the inline error message.
fn render_error(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let error = Paragraph::new(app.controller.error().unwrap_or_default())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);

    frame.render_widget(error, area);
}

/// Render the countdown clock.
fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let phase = app.controller.phase();
    let mut spans = vec![Span::styled(
        app.controller.display(),
        Style::default()
            .fg(phase_color(phase))
            .add_modifier(Modifier::BOLD),
    )];
    if phase != Phase::Idle {
        spans.push(Span::styled(
            format!("  {phase}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let clock = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM));

    frame.render_widget(clock, area);
}

/// Render the running work-time total.
fn render_total(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let total = Paragraph::new(app.work_total_label()).alignment(Alignment::Center);
    frame.render_widget(total, area);
}

/// Render the Start/Stop button.
fn render_toggle(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let color = if app.controller.is_running() {
        Color::Red
    } else {
        Color::Green
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if app.focus == Field::Toggle {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let button = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(format!("[ {} ]", app.toggle_label()), style)),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(button, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = match (&app.status, app.controller.started_at()) {
        (Some(status), _) => status.clone(),
        (None, Some(started)) if app.controller.is_running() => {
            format!("Running since {} | {HELP}", started.format("%H:%M"))
        }
        _ => HELP.to_string(),
    };

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
