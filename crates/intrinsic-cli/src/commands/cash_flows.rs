use intrinsic_core::{AnalysisError, CashFlowHistory, FinancialDataSource, Symbol};
use serde::Serialize;

use crate::cli::TickerArgs;
use crate::error::CliError;
use crate::output::report::cash_flow_table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CashFlowResponseData<'a> {
    symbol: &'a Symbol,
    free_cash_flows: Vec<f64>,
    records: &'a CashFlowHistory,
}

pub async fn run<S>(args: &TickerArgs, source: &S) -> Result<CommandResult, CliError>
where
    S: FinancialDataSource + ?Sized,
{
    let symbol = Symbol::parse(&args.ticker)?;
    let history = source.cash_flows(&symbol).await?;

    if history.is_empty() {
        return Err(AnalysisError::NoCashFlowData {
            symbol: symbol.to_string(),
        }
        .into());
    }

    let data = serde_json::to_value(CashFlowResponseData {
        symbol: &symbol,
        free_cash_flows: history.free_cash_flows(),
        records: &history,
    })?;
    let mut result = CommandResult::ok(data, cash_flow_table(&symbol, &history));

    if history.is_all_zero() {
        result = result.with_warning("every period has zero free cash flow; valuation would not proceed");
    }
    let degraded = history.degraded_count();
    if degraded > 0 {
        result = result.with_warning(format!(
            "{degraded} period(s) had unparseable fields and were counted as zero"
        ));
    }
    Ok(result)
}
