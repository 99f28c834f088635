pub mod chart;
pub mod format;
pub mod report;

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Metadata;

/// JSON document emitted by `--format json`.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    meta: &'a Metadata,
    data: &'a Value,
}

pub fn render(
    meta: &Metadata,
    data: &Value,
    table: &str,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let document = JsonOutput { meta, data };
            let payload = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => {
            out.write_all(table.as_bytes())?;
            if !meta.warnings.is_empty() {
                writeln!(out)?;
                writeln!(out, "warnings:")?;
                for warning in &meta.warnings {
                    writeln!(out, "  - {warning}")?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
