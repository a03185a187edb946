use crate::application::{App, ConversionStatus, WorkflowState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const INSTRUCTIONS_TEXT: &str = "Paste or type a vedic mantra into the input box and press Enter \
to convert it to the ghanam recitation style. The conversion runs on the transform server; the \
result appears below when it answers.\n\
\n\
Enter: convert   Alt+Enter: new line   Ctrl+V: paste   Ctrl+Y: copy result\n\
Ctrl+U: clear input   F1: toggle this panel   Esc: quit";

pub fn render_ui(f: &mut Frame, app: &App) {
    let instructions_height = if app.show_instructions { 9 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(instructions_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, app, chunks[1]);
    render_instructions(f, app, chunks[2]);
    render_outcome(f, app.workflow(), chunks[3]);
    render_status_bar(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "m2g - Mantra to Ghanam Converter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "a tool to convert vedic mantras to the ghanam style",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let workflow = app.workflow();
    let (title, border_style) = if workflow.submit_disabled() {
        ("Mantra (converting...)", Style::default().fg(Color::Yellow))
    } else {
        ("Mantra", Style::default().fg(Color::Blue))
    };

    let input = Paragraph::new(workflow.input_text.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
    f.render_widget(input, area);

    let (line, column) = cursor_line_column(&workflow.input_text, app.cursor_position);
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    if inner_width > 0 && inner_height > 0 {
        let x = area.x + 1 + (column as u16).min(inner_width - 1);
        let y = area.y + 1 + (line as u16).min(inner_height - 1);
        f.set_cursor_position((x, y));
    }
}

fn render_instructions(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.show_instructions {
        "Instructions (F1 to collapse)"
    } else {
        "Instructions (F1 to expand)"
    };
    let body = if app.show_instructions {
        INSTRUCTIONS_TEXT
    } else {
        ""
    };
    let panel = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(panel, area);
}

fn render_outcome(f: &mut Frame, workflow: &WorkflowState, area: Rect) {
    let (title, text, style) = if !workflow.error_message.is_empty() {
        (
            "Error",
            workflow.error_message.clone(),
            Style::default().fg(Color::Red),
        )
    } else {
        match workflow.status {
            ConversionStatus::Succeeded => (
                "Ghanam Result",
                workflow.output_text.clone(),
                Style::default().fg(Color::Green),
            ),
            ConversionStatus::Pending => (
                "Ghanam Result",
                "Converting...".to_string(),
                Style::default().fg(Color::Yellow),
            ),
            _ => (
                "Ghanam Result",
                "Paste a mantra above and press Enter to convert.".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        }
    };

    let outcome = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(outcome, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let workflow = app.workflow();
    let status_color = match workflow.status {
        ConversionStatus::Idle => Color::DarkGray,
        ConversionStatus::Pending => Color::Yellow,
        ConversionStatus::Succeeded => Color::Green,
        ConversionStatus::Failed => Color::Red,
    };

    let message = match &app.status_message {
        Some(message) => message.clone(),
        None => "Enter: convert | F1: help | Esc: quit".to_string(),
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", workflow.status.label()),
            Style::default().fg(Color::Black).bg(status_color),
        ),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(bar, area);
}

/// Line and column of the cursor, counting characters, newline-aware.
fn cursor_line_column(input: &str, cursor_position: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for c in input.chars().take(cursor_position) {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}
