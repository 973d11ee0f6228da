//! Single-shot frontend: `whatsurname analyze <NAME> [--json]`.

use serde_json::json;
use std::io::{self, Write};
use tracing::debug;

use whatsurname_core::{present, AnalysisRecord, AnalysisRequest, Analyzer};

use crate::render;

/// Exit status when the analysis succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when the analysis failed for any reason.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One JSON object: the flat record, or `{"error": ...}`.
    Json,
    /// Human-readable text.
    Plain,
}

/// Analyze `name` once, write the outcome to `out`, and return the process
/// exit status.
pub async fn run<W: Write>(
    analyzer: &dyn Analyzer,
    name: &str,
    mode: OutputMode,
    out: &mut W,
) -> io::Result<i32> {
    let outcome = match AnalysisRequest::new(name) {
        Ok(request) => analyzer.analyze(&request).await,
        Err(rejected) => Err(rejected),
    };
    let name = name.trim();
    debug!(name, ok = outcome.is_ok(), "batch analysis finished");

    match mode {
        OutputMode::Json => {
            let value = match &outcome {
                Ok(result) => serde_json::to_value(AnalysisRecord::new(name, result))?,
                Err(failure) => json!({ "error": failure.to_string() }),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputMode::Plain => {
            out.write_all(render::plain(&present(name, &outcome)).as_bytes())?;
        }
    }
    out.flush()?;

    Ok(if outcome.is_ok() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

/// Report a failure that happened before any analysis could start, such as
/// an unreadable config file, in the same shape as an analysis failure.
pub fn report_startup_failure<W: Write>(
    message: &str,
    mode: OutputMode,
    out: &mut W,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let value = json!({ "error": message });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputMode::Plain => writeln!(out, "Error: {}", message)?,
    }
    out.flush()
}
