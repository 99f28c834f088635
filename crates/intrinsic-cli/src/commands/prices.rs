use intrinsic_core::{AnalysisError, FinancialDataSource, PricePoint, Symbol};
use serde::Serialize;

use crate::cli::PricesArgs;
use crate::error::CliError;
use crate::output::report::prices_table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PricesResponseData<'a> {
    symbol: &'a Symbol,
    points: &'a [PricePoint],
}

pub async fn run<S>(args: &PricesArgs, source: &S) -> Result<CommandResult, CliError>
where
    S: FinancialDataSource + ?Sized,
{
    let symbol = Symbol::parse(&args.ticker)?;
    let history = source.price_history(&symbol).await?;
    let points = match history.points() {
        Some(points) if !points.is_empty() => points,
        _ => {
            return Err(AnalysisError::NoPriceHistory {
                symbol: symbol.to_string(),
            }
            .into())
        }
    };

    let points = most_recent(points, args.limit);
    let data = serde_json::to_value(PricesResponseData {
        symbol: &symbol,
        points,
    })?;
    Ok(CommandResult::ok(
        data,
        prices_table(&symbol, points, &args.chart),
    ))
}

/// The `limit` newest closes, keeping upstream order.
///
/// ISO dates compare lexically, so the upstream ordering is detected from
/// the first and last entries.
fn most_recent(points: &[PricePoint], limit: Option<usize>) -> &[PricePoint] {
    let Some(limit) = limit else {
        return points;
    };
    if limit >= points.len() {
        return points;
    }

    let newest_first = match (points.first(), points.last()) {
        (Some(first), Some(last)) => first.date >= last.date,
        _ => true,
    };
    if newest_first {
        &points[..limit]
    } else {
        &points[points.len() - limit..]
    }
}
