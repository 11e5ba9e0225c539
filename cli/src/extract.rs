#![deny(missing_docs)]

//! # Extract Command
//!
//! Loads a Swagger 2.0 document and writes its endpoint descriptors as JSON.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use swagger2_core::{
    extract_endpoints_from_path, sort_endpoints, EndpointDescriptor, ExtractOptions,
    DEFAULT_MAX_DEPTH,
};

use crate::error::{CliError, CliResult};

/// Arguments for the extract command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the Swagger 2.0 document (`.yaml` / `.yml` are read as YAML).
    #[clap(long, short, default_value = "swagger.json")]
    pub input: PathBuf,

    /// Output path for the descriptor JSON. Writes to stdout when omitted.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[clap(long)]
    pub pretty: bool,

    /// Sort descriptors by path and method instead of document order.
    #[clap(long)]
    pub sort: bool,

    /// Maximum schema nesting plus reference expansion depth.
    #[clap(long, env = "SWAGGER2_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Executes the extraction.
pub fn execute(args: &ExtractArgs) -> CliResult<()> {
    let mut endpoints = load_endpoints(&args.input, args.max_depth)?;
    if args.sort {
        sort_endpoints(&mut endpoints);
    }

    let json = render(&endpoints, args.pretty)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{}\n", json))?;
            tracing::info!(
                output = ?path,
                endpoints = endpoints.len(),
                "wrote endpoint descriptors"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}

/// Reads and extracts a document, checking that it exists first.
pub(crate) fn load_endpoints(
    input: &Path,
    max_depth: usize,
) -> CliResult<Vec<EndpointDescriptor>> {
    if !input.exists() {
        return Err(CliError::General(format!(
            "Swagger document not found: {:?}",
            input
        )));
    }

    let options = ExtractOptions { max_depth };
    Ok(extract_endpoints_from_path(input, &options)?)
}

fn render(endpoints: &[EndpointDescriptor], pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(endpoints)?
    } else {
        serde_json::to_string(endpoints)?
    };
    Ok(json)
}
