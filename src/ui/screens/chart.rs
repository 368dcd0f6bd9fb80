use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::summary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

const RADIUS_MARGIN: f64 = 1.1;
const GRID_STEPS: usize = 120;
const LEGEND_ROWS: usize = 10;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style(false))
        .title(Span::styled(" Totals by Category ", theme::title_style()));

    let weights = summary::slice_weights(&app.category_totals);
    if weights.iter().all(|w| *w <= 0.0) {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nothing to chart yet", theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let legend_height = app.category_totals.len().min(LEGEND_ROWS) as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(legend_height)])
        .split(inner);

    render_pie(f, chunks[0], &weights);
    render_legend(f, chunks[1], app, &weights);
}

fn render_pie(f: &mut Frame, area: Rect, weights: &[f64]) {
    let slices = pie_points(weights, GRID_STEPS);

    // Braille dots are roughly square, two across and four down per cell.
    let x_half = RADIUS_MARGIN * f64::from(area.width) / (2.0 * f64::from(area.height.max(1)));

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-RADIUS_MARGIN, RADIUS_MARGIN])
        .paint(move |ctx| {
            for (i, coords) in slices.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: theme::slice_color(i),
                });
            }
        });
    f.render_widget(canvas, area);
}

fn render_legend(f: &mut Frame, area: Rect, app: &App, weights: &[f64]) {
    let mut lines: Vec<Line> = app
        .category_totals
        .iter()
        .zip(weights)
        .enumerate()
        .take(LEGEND_ROWS)
        .map(|(i, (total, weight))| {
            let name = if total.category.is_empty() {
                "(none)".to_string()
            } else {
                truncate(&total.category, 16)
            };
            Line::from(vec![
                Span::styled("■ ", ratatui::style::Style::default().fg(theme::slice_color(i))),
                Span::styled(format!("{name:<17}"), theme::normal_style()),
                Span::styled(
                    format!("{:>14}", format_amount(total.total)),
                    theme::amount_style(total.total),
                ),
                Span::styled(format!(" {:>5.1}%", weight * 100.0), theme::dim_style()),
            ])
        })
        .collect();

    let hidden = app.category_totals.len().saturating_sub(LEGEND_ROWS);
    if hidden > 0 {
        lines.push(Line::from(Span::styled(
            format!("  … {hidden} more"),
            theme::dim_style(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Index of the slice covering `fraction` of the way around the pie.
pub(crate) fn slice_at(cumulative: &[f64], fraction: f64) -> Option<usize> {
    cumulative.iter().position(|edge| fraction < *edge)
}

/// Sample a grid over the unit disc and bucket each point into its slice.
///
/// Slices start at twelve o'clock and run clockwise in the order of
/// `weights`. The result has one coordinate list per weight.
pub(crate) fn pie_points(weights: &[f64], steps: usize) -> Vec<Vec<(f64, f64)>> {
    let mut slices: Vec<Vec<(f64, f64)>> = vec![Vec::new(); weights.len()];
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || steps == 0 {
        return slices;
    }

    let mut running = 0.0;
    let cumulative: Vec<f64> = weights
        .iter()
        .map(|w| {
            running += w / total;
            running
        })
        .collect();

    let step = 2.0 / steps as f64;
    for row in 0..=steps {
        let y = -1.0 + row as f64 * step;
        for col in 0..=steps {
            let x = -1.0 + col as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = x.atan2(y).rem_euclid(TAU);
            if let Some(i) = slice_at(&cumulative, angle / TAU) {
                slices[i].push((x, y));
            }
        }
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_at() {
        let cumulative = [0.25, 0.75, 1.0];
        assert_eq!(slice_at(&cumulative, 0.0), Some(0));
        assert_eq!(slice_at(&cumulative, 0.3), Some(1));
        assert_eq!(slice_at(&cumulative, 0.99), Some(2));
        assert_eq!(slice_at(&cumulative, 1.0), None);
    }

    #[test]
    fn test_slice_at_skips_empty_slices() {
        let cumulative = [0.5, 0.5, 1.0];
        assert_eq!(slice_at(&cumulative, 0.6), Some(2));
    }

    #[test]
    fn test_halves_split_left_and_right() {
        let slices = pie_points(&[1.0, 1.0], 40);
        assert!(!slices[0].is_empty());
        assert!(!slices[1].is_empty());
        assert!(slices[0].iter().all(|(x, _)| *x >= 0.0));
        assert!(slices[1].iter().all(|(x, _)| *x <= 0.0));
    }

    #[test]
    fn test_points_stay_in_unit_disc() {
        let slices = pie_points(&[3.0, 1.0, 2.0], 30);
        for (x, y) in slices.iter().flatten() {
            assert!(x * x + y * y <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_slice_sizes_follow_weights() {
        let slices = pie_points(&[3.0, 1.0], 100);
        let (big, small) = (slices[0].len() as f64, slices[1].len() as f64);
        let ratio = big / small;
        assert!((2.7..3.3).contains(&ratio), "ratio was {ratio}");
    }

    #[test]
    fn test_zero_weight_slice_is_empty() {
        let slices = pie_points(&[1.0, 0.0, 1.0], 40);
        assert!(slices[1].is_empty());
    }

    #[test]
    fn test_all_zero_weights() {
        let slices = pie_points(&[0.0, 0.0], 40);
        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(Vec::is_empty));
    }
}
