pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, ListArgs, OutputFormatArg};
pub use output::{DetectionRecord, ManifestListing, OutputFormat, OutputFormatter};
