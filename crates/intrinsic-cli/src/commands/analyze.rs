use intrinsic_core::{
    analyze, AnalysisRequest, DcfParameters, FinancialDataSource, GrowthOutlook, Symbol,
};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::report::analysis_table;

use super::CommandResult;

pub async fn run<S>(args: &AnalyzeArgs, source: &S) -> Result<CommandResult, CliError>
where
    S: FinancialDataSource + ?Sized,
{
    let symbol = Symbol::parse(&args.ticker)?;
    let params = DcfParameters::new(args.discount_rate, args.terminal_growth)?;
    let request = AnalysisRequest::new(symbol)
        .with_outlook(GrowthOutlook::fixed(args.narrative.as_str()))
        .with_params(params);

    let report = analyze(source, &request).await?;

    let table = analysis_table(&report, &args.chart);
    let degraded = report.degraded_periods;
    let mut result = CommandResult::ok(serde_json::to_value(&report)?, table);
    if degraded > 0 {
        result = result.with_warning(format!(
            "{degraded} cash flow period(s) had unparseable fields and were counted as zero"
        ));
    }
    Ok(result)
}
