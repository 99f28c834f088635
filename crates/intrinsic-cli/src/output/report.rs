//! Table renderings for each command.

use std::fmt::Write as _;

use intrinsic_core::{AnalysisReport, CashFlowHistory, PricePoint, ShareCount, Symbol};

use super::chart::render_line_chart;
use super::format::{count, currency, percent};
use crate::cli::ChartArgs;

pub fn analysis_table(report: &AnalysisReport, chart: &ChartArgs) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Financial analysis for {}", report.symbol);
    out.push('\n');

    out.push_str(&cash_flow_lines(&report.cash_flows));
    let _ = writeln!(
        out,
        "Outstanding Shares    : {}",
        count(report.outstanding_shares.get())
    );
    out.push('\n');

    let _ = writeln!(
        out,
        "Predicted Future Cash Flows ({} years at {} growth):",
        report.forecast.values.len(),
        percent(report.forecast.growth_rate)
    );
    for (year, value) in report.forecast.values().iter().enumerate() {
        let _ = writeln!(out, "  Year {}  {:>20}", year + 1, currency(*value));
    }
    let _ = writeln!(out, "  Outlook: {}", report.outlook.narrative);
    out.push('\n');

    let _ = writeln!(
        out,
        "Discount Rate         : {}",
        percent(report.params.discount_rate)
    );
    let _ = writeln!(
        out,
        "Terminal Growth Rate  : {}",
        percent(report.params.terminal_growth_rate)
    );
    let _ = writeln!(
        out,
        "Terminal Value        : {}",
        currency(report.valuation.terminal_value)
    );
    let _ = writeln!(
        out,
        "Business Valuation    : {}",
        currency(report.valuation.total_valuation)
    );
    let _ = writeln!(
        out,
        "Estimated Share Price : {}",
        currency(report.valuation.per_share)
    );

    if !chart.no_chart {
        if let Some(points) = report.price_history.points() {
            out.push('\n');
            out.push_str(&render_line_chart(points, chart));
        }
    }

    out
}

pub fn cash_flow_table(symbol: &Symbol, history: &CashFlowHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cash flow history for {symbol}");
    out.push('\n');
    out.push_str(&cash_flow_lines(history));
    out
}

fn cash_flow_lines(history: &CashFlowHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Free Cash Flows ({} periods):", history.len());
    for (index, record) in history.records.iter().enumerate() {
        let label = record
            .period
            .clone()
            .unwrap_or_else(|| format!("period {}", index + 1));
        let marker = if record.is_degraded() { "  (unparseable)" } else { "" };
        let _ = writeln!(
            out,
            "  {label:<12}  {:>20}{marker}",
            currency(record.free_cash_flow)
        );
    }
    out.push('\n');
    out
}

pub fn shares_table(symbol: &Symbol, shares: ShareCount) -> String {
    format!("Outstanding Shares for {symbol}: {}\n", count(shares.get()))
}

pub fn prices_table(symbol: &Symbol, points: &[PricePoint], chart: &ChartArgs) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Historical closes for {symbol} ({} points)", points.len());
    out.push('\n');

    if chart.no_chart {
        for point in points {
            let _ = writeln!(out, "  {:<12}  {:>12}", point.date, currency(point.close));
        }
    } else {
        out.push_str(&render_line_chart(points, chart));
    }

    out
}
