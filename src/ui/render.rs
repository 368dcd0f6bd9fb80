use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, StatusKind};
use super::commands;
use super::screens;
use super::theme;
use super::util::format_amount;

/// Rows of the list pane taken by borders and the table header.
pub(crate) const LIST_CHROME: u16 = 3;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let (main, status, command) = frame_layout(f.area());

    render_main(f, main, app);
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

/// Split the whole frame into (main, status bar, command bar).
pub(crate) fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Table rows that fit in the list pane for a frame of size `area`.
pub(crate) fn visible_list_rows(area: Rect, app: &App) -> usize {
    let (main, _, _) = frame_layout(area);
    let (_, list_area, _) = main_layout(main, app);
    list_area.height.saturating_sub(LIST_CHROME).max(1) as usize
}

/// Split the main area into (form, list, chart).
pub(crate) fn main_layout(area: Rect, app: &App) -> (Rect, Rect, Option<Rect>) {
    let (left, chart) = if app.show_chart && app.variant.has_chart() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);
        (cols[0], Some(cols[1]))
    } else {
        (area, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(screens::form::height(app)),
            Constraint::Min(LIST_CHROME + 1),
        ])
        .split(left);

    (rows[0], rows[1], chart)
}

fn render_main(f: &mut Frame, area: Rect, app: &App) {
    let (form_area, list_area, chart_area) = main_layout(area, app);
    screens::form::render(f, form_area, app);
    screens::transactions::render(f, list_area, app);
    if let Some(chart_area) = chart_area {
        screens::chart::render(f, chart_area, app);
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Editing => theme::GREEN,
        InputMode::Command => theme::YELLOW,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(" {} txns | ", app.transactions.len());
    let income = format!("in {}", format_amount(app.totals.income));
    let expenses = format!("  out {}", format_amount(app.totals.expenses));
    let net = format!("  net {}", format_amount(app.totals.net()));

    let right = match app.input_mode {
        InputMode::Normal => " : commands | ? help | Ctrl-q quit ",
        InputMode::Editing => " Tab next field | Enter/Esc done ",
        InputMode::Command => " Enter run | Esc cancel ",
        InputMode::Confirm => " y confirm | any key cancel ",
    };

    let available = area.width as usize;
    let used = mode_label.len()
        + info.len()
        + income.chars().count()
        + expenses.chars().count()
        + net.chars().count()
        + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(&income, theme::income_style().bg(theme::SURFACE)),
        Span::styled(&expenses, theme::expense_style().bg(theme::SURFACE)),
        Span::styled(&net, theme::amount_style(app.totals.net()).bg(theme::SURFACE)),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Editing => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Tab to fill the form, a to add, : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                let style = match app.status_kind {
                    StatusKind::Info => theme::command_bar_style(),
                    StatusKind::Error => theme::error_bar_style(),
                };
                Line::from(Span::styled(&app.status_message, style))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " fintrack Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Form"),
        entry("  Tab/Shift-Tab   Edit next/previous field   Enter/Esc  Stop editing"),
        entry("  a               Add from form              u          Update form ID"),
        entry("  D               Delete form ID (or row)    n          Clear form"),
        Line::from(""),
        section(" List"),
        entry("  j/k or Up/Down  Move cursor                g/G        Top/Bottom"),
        entry("  Enter           Load row into form         Ctrl-d/u   Page Down/Up"),
        entry("  c               Toggle chart               Ctrl-q     Quit"),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
