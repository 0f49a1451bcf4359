//! Subcommand handlers. Each returns the process exit code.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::{self, Read};
use tracing::{debug, error};

use super::commands::{DetectArgs, ListArgs, OutputFormatArg};
use super::output::{DetectionRecord, ManifestListing, OutputFormat, OutputFormatter};
use crate::config::DetectorConfig;
use crate::detector::Detector;
use crate::registry::ManifestRegistry;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_DETECTED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub fn handle_detect(args: &DetectArgs, config: &DetectorConfig) -> i32 {
    match run_detect(args, config) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            EXIT_USAGE
        }
    }
}

pub fn handle_list(args: &ListArgs, config: &DetectorConfig) -> i32 {
    let listing = ManifestListing::from_registry(ManifestRegistry::global());
    let result = resolve_format(args.format, config)
        .and_then(|format| OutputFormatter::new(format).format_listing(&listing));

    match result {
        Ok(output) => {
            println!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_USAGE
        }
    }
}

fn run_detect(args: &DetectArgs, config: &DetectorConfig) -> Result<i32> {
    let format = resolve_format(args.format, config)?;
    let flags = config.feature_flags_with(&args.feature_flags);
    let detector = Detector::new();

    let records: Vec<DetectionRecord> = if args.stdin_json {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        let values = parse_json_paths(&input)?;
        values
            .iter()
            .map(|value| DetectionRecord::new(display_value(value), detector.detect_value(value, &flags)))
            .collect()
    } else {
        if args.paths.is_empty() {
            bail!("No manifest paths given");
        }
        args.paths
            .iter()
            .map(|path| {
                DetectionRecord::new(path.to_string_lossy(), detector.detect(path, &flags))
            })
            .collect()
    };

    debug!(count = records.len(), "Detection finished");

    let output = OutputFormatter::new(format).format_detections(&records)?;
    println!("{}", output);

    if records.iter().all(DetectionRecord::is_success) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_NOT_DETECTED)
    }
}

/// Command-line format wins over `MANIFEST_DETECT_FORMAT`.
fn resolve_format(arg: Option<OutputFormatArg>, config: &DetectorConfig) -> Result<OutputFormat> {
    if let Some(arg) = arg {
        return Ok(arg.into());
    }
    match config.format.as_str() {
        "json" => Ok(OutputFormat::Json),
        "yaml" => Ok(OutputFormat::Yaml),
        "human" => Ok(OutputFormat::Human),
        other => bail!("Invalid output format: {}", other),
    }
}

fn parse_json_paths(input: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(input).context("stdin is not valid JSON")?;
    match value {
        Value::Array(values) => Ok(values),
        _ => bail!("stdin must contain a JSON array"),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
