//! Output formatting for detection results and registry listings

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::DetectError;
use crate::package_manager::PackageManagerId;
use crate::registry::ManifestRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Outcome of detecting a single input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionRecord {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManagerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: &'static str,
    pub message: String,
}

impl DetectionRecord {
    pub fn new(path: impl Into<String>, result: Result<PackageManagerId, DetectError>) -> Self {
        let path = path.into();
        match result {
            Ok(package_manager) => Self {
                path,
                package_manager: Some(package_manager),
                error: None,
            },
            Err(e) => {
                let kind = match e {
                    DetectError::NotDetected(_) => "not_detected",
                    DetectError::InvalidArgument(_) => "invalid_argument",
                };
                Self {
                    path,
                    package_manager: None,
                    error: Some(ErrorRecord {
                        kind,
                        message: e.to_string(),
                    }),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.package_manager.is_some()
    }
}

/// Registry entry as shown by `list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestListing {
    pub manifest: String,
    pub package_managers: Vec<PackageManagerId>,
    pub content_validated: bool,
}

impl ManifestListing {
    pub fn from_registry(registry: &ManifestRegistry) -> Vec<Self> {
        registry
            .iter()
            .map(|(key, entries)| Self {
                manifest: key.to_string(),
                package_managers: entries.iter().map(|e| e.package_manager).collect(),
                content_validated: entries.iter().any(|e| e.validator.is_some()),
            })
            .collect()
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detections(&self, records: &[DetectionRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(records)
                .context("Failed to serialize detection results to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(records)
                .context("Failed to serialize detection results to YAML"),
            OutputFormat::Human => Ok(self.format_detections_human(records)),
        }
    }

    pub fn format_listing(&self, listing: &[ManifestListing]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(listing)
                .context("Failed to serialize manifest listing to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(listing)
                .context("Failed to serialize manifest listing to YAML"),
            OutputFormat::Human => Ok(self.format_listing_human(listing)),
        }
    }

    fn format_detections_human(&self, records: &[DetectionRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            match (&record.package_manager, &record.error) {
                (Some(pm), _) => lines.push(format!("{}: {}", record.path, pm)),
                (None, Some(err)) => lines.push(format!("{}: error: {}", record.path, err.message)),
                (None, None) => lines.push(format!("{}: unknown", record.path)),
            }
        }
        lines.join("\n")
    }

    fn format_listing_human(&self, listing: &[ManifestListing]) -> String {
        let width = listing.iter().map(|l| l.manifest.len()).max().unwrap_or(0);
        listing
            .iter()
            .map(|l| {
                let managers: Vec<&str> = l.package_managers.iter().map(|p| p.as_str()).collect();
                let suffix = if l.content_validated { " (content checked)" } else { "" };
                format!("{:<width$}  {}{}", l.manifest, managers.join(", "), suffix, width = width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
