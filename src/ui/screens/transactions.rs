use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, InputMode};
use crate::ui::render::LIST_CHROME;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.input_mode == InputMode::Normal;

    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Fill in the form (Tab to edit) and press a to add one",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(" Transactions (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let with_description = app.variant.has_description();
    let mut headers = vec!["ID", "Date", "Category", "Amount"];
    if with_description {
        headers.push("Description");
    }
    let header = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(LIST_CHROME) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index && focused {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let mut cells = vec![
                Cell::from(txn.id.to_string()),
                Cell::from(txn.date.clone()),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(
                    format_amount(txn.amount),
                    theme::amount_style(txn.amount),
                )),
            ];
            if with_description {
                cells.push(Cell::from(truncate(
                    txn.description.as_deref().unwrap_or(""),
                    40,
                )));
            }
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(6),
        Constraint::Length(11),
        Constraint::Length(18),
        Constraint::Length(15),
    ];
    if with_description {
        widths.push(Constraint::Min(10));
    }

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused))
            .title(Span::styled(
                format!(" Transactions ({}) ", app.transactions.len()),
                theme::title_style(),
            ))
            .title_bottom(Span::styled(
                " j/k move | Enter load into form ",
                theme::dim_style(),
            )),
    );

    f.render_widget(table, area);
}
