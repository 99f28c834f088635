use intrinsic_core::{AnalysisError, FinancialDataSource, ShareCount, Symbol};
use serde::Serialize;

use crate::cli::TickerArgs;
use crate::error::CliError;
use crate::output::report::shares_table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SharesResponseData<'a> {
    symbol: &'a Symbol,
    outstanding_shares: ShareCount,
}

pub async fn run<S>(args: &TickerArgs, source: &S) -> Result<CommandResult, CliError>
where
    S: FinancialDataSource + ?Sized,
{
    let symbol = Symbol::parse(&args.ticker)?;
    let Some(outstanding_shares) = source.outstanding_shares(&symbol).await? else {
        return Err(AnalysisError::NoShareData {
            symbol: symbol.to_string(),
        }
        .into());
    };

    let data = serde_json::to_value(SharesResponseData {
        symbol: &symbol,
        outstanding_shares,
    })?;
    Ok(CommandResult::ok(
        data,
        shares_table(&symbol, outstanding_shares),
    ))
}
