#![deny(missing_docs)]

//! # Check Command
//!
//! Reports endpoints whose schemas could not be fully resolved.

use std::io::Write;
use std::path::PathBuf;

use swagger2_core::{EndpointDescriptor, DEFAULT_MAX_DEPTH};

use crate::error::{CliError, CliResult};
use crate::extract::load_endpoints;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the Swagger 2.0 document (`.yaml` / `.yml` are read as YAML).
    #[clap(long, short, default_value = "swagger.json")]
    pub input: PathBuf,

    /// Maximum schema nesting plus reference expansion depth.
    #[clap(long, env = "SWAGGER2_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Executes the check. Fails when any endpoint has unresolved references.
pub fn execute(args: &CheckArgs) -> CliResult<()> {
    let endpoints = load_endpoints(&args.input, args.max_depth)?;
    let report = unresolved_report(&endpoints);

    let mut stdout = std::io::stdout().lock();
    for line in &report {
        writeln!(stdout, "{}", line)?;
    }

    if report.is_empty() {
        tracing::info!(endpoints = endpoints.len(), "all references resolved");
        Ok(())
    } else {
        Err(CliError::General(format!(
            "{} of {} endpoints have unresolved references",
            report.len(),
            endpoints.len()
        )))
    }
}

/// One `METHOD path: ref, ref` line per endpoint with unresolved references.
///
/// Repeated references are listed once, in first-seen order.
pub fn unresolved_report(endpoints: &[EndpointDescriptor]) -> Vec<String> {
    endpoints
        .iter()
        .filter(|e| e.has_unresolved_refs())
        .map(|e| {
            let mut refs: Vec<&str> = Vec::new();
            for reference in &e.unresolved_refs {
                if !refs.contains(&reference.as_str()) {
                    refs.push(reference);
                }
            }
            format!("{} {}: {}", e.method, e.path, refs.join(", "))
        })
        .collect()
}
