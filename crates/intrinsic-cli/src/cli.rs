//! CLI argument definitions for intrinsic.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Fetch, forecast and value a company, then chart its prices |
//! | `cash-flows` | Show historical free cash flow only |
//! | `shares` | Show the derived outstanding share count only |
//! | `prices` | Show and chart historical closes only |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$INTRINSIC_FMP_API_KEY` | Financial Modeling Prep key |
//! | `--base-url` | FMP v3 | Upstream base URL |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `-v` | warn | Raise log verbosity (repeatable) |
//!
//! # Examples
//!
//! ```bash
//! intrinsic analyze META --api-key "$KEY"
//! intrinsic analyze aapl --discount-rate 0.09 --terminal-growth 0.025
//! intrinsic prices MSFT --limit 90 --format json --pretty
//! ```

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use intrinsic_core::adapters::fmp::DEFAULT_BASE_URL;
use intrinsic_core::forecast::DEFAULT_NARRATIVE;
use intrinsic_core::http_client::DEFAULT_TIMEOUT_MS;
use intrinsic_core::valuation::{DEFAULT_DISCOUNT_RATE, DEFAULT_TERMINAL_GROWTH_RATE};

/// Discounted cash flow valuation from public financial statements.
#[derive(Debug, Parser)]
#[command(
    name = "intrinsic",
    author,
    version,
    about = "Discounted cash flow valuation from public financial statements",
    long_about = "intrinsic fetches a company's cash flow statement, profile and price \
history, projects five years of free cash flow at a fixed growth rate, and discounts \
the projection plus a terminal value to an estimated share price.\n\
\n\
Use 'intrinsic <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Financial Modeling Prep API key.
    #[arg(long, global = true, env = "INTRINSIC_FMP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Upstream API base URL.
    #[arg(long, global = true, env = "INTRINSIC_FMP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with a price chart.
    Table,
    /// Single JSON object with metadata.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis: free cash flow, shares, forecast, DCF valuation and price chart.
    ///
    /// # Examples
    ///
    ///   intrinsic analyze META
    ///   intrinsic analyze AAPL --discount-rate 0.08 --terminal-growth 0.03
    Analyze(AnalyzeArgs),

    /// Show historical free cash flow per reporting period.
    CashFlows(TickerArgs),

    /// Show outstanding shares derived from market cap and price.
    Shares(TickerArgs),

    /// Show historical daily closes.
    Prices(PricesArgs),
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Company ticker symbol (case-insensitive).
    #[arg(default_value = "META")]
    pub ticker: String,

    /// Annual discount rate applied to projected cash flows.
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE, allow_negative_numbers = true)]
    pub discount_rate: f64,

    /// Perpetual growth rate used for the terminal value.
    #[arg(long, default_value_t = DEFAULT_TERMINAL_GROWTH_RATE, allow_negative_numbers = true)]
    pub terminal_growth: f64,

    /// Growth narrative recorded with the forecast.
    #[arg(long, default_value = DEFAULT_NARRATIVE)]
    pub narrative: String,

    #[command(flatten)]
    pub chart: ChartArgs,
}

/// Arguments for single-fetcher commands.
#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Company ticker symbol (case-insensitive).
    pub ticker: String,
}

/// Arguments for the `prices` command.
#[derive(Debug, Args)]
pub struct PricesArgs {
    /// Company ticker symbol (case-insensitive).
    pub ticker: String,

    /// Keep only the most recent N closes.
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub chart: ChartArgs,
}

/// Price chart options shared by commands that draw one.
#[derive(Debug, Clone, Copy, Args)]
pub struct ChartArgs {
    /// Skip the price chart in table output.
    #[arg(long, default_value_t = false)]
    pub no_chart: bool,

    /// Chart width in columns, axis labels included.
    #[arg(
        long,
        default_value_t = 72,
        value_parser = clap::value_parser!(u16).range(24..=240)
    )]
    pub chart_width: u16,

    /// Chart height in rows, axis labels included.
    #[arg(
        long,
        default_value_t = 16,
        value_parser = clap::value_parser!(u16).range(4..=200)
    )]
    pub chart_height: u16,
}
