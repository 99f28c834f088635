//! Line chart of closing prices over time, rendered to plain text.

use intrinsic_core::PricePoint;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget};

use crate::cli::ChartArgs;

const CHART_TITLE: &str = "Historical Share Prices (close)";

/// Plot closes with the oldest date on the left.
///
/// Points are ordered by date for display only; the input is left as the
/// upstream returned it. The chart is drawn into an off-screen buffer of
/// `chart_width` x `chart_height` cells and returned line by line.
pub fn render_line_chart(points: &[PricePoint], options: &ChartArgs) -> String {
    let mut ordered = points.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return String::from("(no price history to chart)\n");
    };

    let data = ordered
        .iter()
        .enumerate()
        .map(|(index, point)| (index as f64, point.close))
        .collect::<Vec<_>>();
    let (low, high) = close_bounds(&data);
    let x_max = data.len().saturating_sub(1).max(1) as f64;

    // a single close has no segment to draw
    let graph_type = if data.len() == 1 {
        GraphType::Scatter
    } else {
        GraphType::Line
    };

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(graph_type)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first.date.as_str()), Span::raw(last.date.as_str())]),
        )
        .y_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec![
                    Span::raw(format!("{low:.2}")),
                    Span::raw(format!("{high:.2}")),
                ]),
        );

    let area = Rect::new(0, 0, options.chart_width, options.chart_height);
    let mut buffer = Buffer::empty(area);
    chart.render(area, &mut buffer);

    let mut out = String::from(CHART_TITLE);
    out.push('\n');
    out.push_str(&buffer_text(&buffer));
    out
}

/// Lowest and highest close, widened when every close is equal.
fn close_bounds(data: &[(f64, f64)]) -> (f64, f64) {
    let low = data.iter().map(|(_, close)| *close).fold(f64::INFINITY, f64::min);
    let high = data
        .iter()
        .map(|(_, close)| *close)
        .fold(f64::NEG_INFINITY, f64::max);

    if high > low {
        (low, high)
    } else {
        (low - 1.0, high + 1.0)
    }
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        let row = (area.left()..area.right())
            .filter_map(|x| buffer.cell((x, y)))
            .map(|cell| cell.symbol())
            .collect::<String>();
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}
