use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, Field, InputMode};
use crate::ui::theme;

const LABEL_WIDTH: usize = 13;

/// Rows needed to draw the form for the app's variant, borders included.
pub(crate) fn height(app: &App) -> u16 {
    Field::all(app.variant).len() as u16 + 2
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let lines: Vec<Line> = Field::all(app.variant)
        .iter()
        .map(|&field| {
            let focused = field == app.focus;
            let label_style = if focused {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            let marker = if focused { "▸ " } else { "  " };
            let value = app.form.value(field);
            let value_span = if value.is_empty() && !(focused && editing) {
                Span::styled(field.placeholder(), theme::dim_style())
            } else if focused && editing {
                Span::styled(value, theme::normal_style().add_modifier(Modifier::UNDERLINED))
            } else {
                Span::styled(value, theme::normal_style())
            };
            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH - 2),
                    label_style,
                ),
                value_span,
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(editing))
        .title(Span::styled(" New / Edit ", theme::title_style()))
        .title_bottom(Span::styled(
            " a add | u update | D delete | Tab edit ",
            theme::dim_style(),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);

    if editing {
        if let Some(row) = Field::all(app.variant).iter().position(|field| *field == app.focus) {
            let value_len = app.form.value(app.focus).chars().count() as u16;
            let x = area.x + 1 + LABEL_WIDTH as u16 + value_len;
            let y = area.y + 1 + row as u16;
            if x < area.x + area.width.saturating_sub(1) {
                f.set_cursor_position((x, y));
            }
        }
    }
}
