mod analyze;
mod cash_flows;
mod prices;
mod shares;

use std::time::Instant;

use intrinsic_core::{ApiKey, FmpAdapter, FmpConfig};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;
use crate::output;

/// Rendered outcome of one command, ready for either output format.
pub struct CommandResult {
    pub data: Value,
    pub table: String,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value, table: String) -> Self {
        Self {
            data,
            table,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let source = connect(cli)?;
    let started = Instant::now();

    let (name, result) = match &cli.command {
        Command::Analyze(args) => ("analyze", analyze::run(args, &source).await?),
        Command::CashFlows(args) => ("cash-flows", cash_flows::run(args, &source).await?),
        Command::Shares(args) => ("shares", shares::run(args, &source).await?),
        Command::Prices(args) => ("prices", prices::run(args, &source).await?),
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(command = name, latency_ms, "command finished");

    let CommandResult {
        data,
        table,
        warnings,
    } = result;

    let mut meta = Metadata::new(name, latency_ms);
    for warning in warnings {
        meta.push_warning(warning);
    }

    output::render(&meta, &data, &table, cli.format, cli.pretty)
}

/// Build the upstream adapter; a blank or absent key stops here.
fn connect(cli: &Cli) -> Result<FmpAdapter, CliError> {
    let api_key = ApiKey::parse(cli.api_key.as_deref().unwrap_or_default())?;
    let config = FmpConfig::default()
        .with_base_url(cli.base_url.as_str())
        .with_timeout_ms(cli.timeout_ms);
    Ok(FmpAdapter::new(api_key, config))
}
