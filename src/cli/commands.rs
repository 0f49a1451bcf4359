use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Detects which package manager governs a dependency manifest file
#[derive(Parser, Debug)]
#[command(
    name = "manifest-detect",
    about = "Detects which package manager governs a dependency manifest file",
    version,
    author,
    long_about = "manifest-detect classifies manifest and lock files (package.json, Gemfile, \
                  go.mod, project.json, ...) by package manager. Ambiguous files are \
                  disambiguated by inspecting their content."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect the package manager for one or more manifest files",
        long_about = "Detects the package manager for each given path.\n\n\
                      Examples:\n  \
                      manifest-detect detect package.json\n  \
                      manifest-detect detect ./app/pnpm-lock.yaml --feature-flag enablePnpmCli\n  \
                      echo '[\"go.mod\", null]' | manifest-detect detect --stdin-json --format json"
    )]
    Detect(DetectArgs),

    #[command(about = "List supported manifest files and their candidate package managers")]
    List(ListArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PATH", help = "Manifest file paths")]
    pub paths: Vec<PathBuf>,

    #[arg(
        long = "feature-flag",
        value_name = "NAME",
        help = "Enable a feature flag (repeatable)"
    )]
    pub feature_flags: Vec<String>,

    #[arg(short = 'f', long, value_enum, help = "Output format [default: human]")]
    pub format: Option<OutputFormatArg>,

    #[arg(
        long,
        conflicts_with = "paths",
        help = "Read a JSON array of paths from stdin"
    )]
    pub stdin_json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(short = 'f', long, value_enum, help = "Output format [default: human]")]
    pub format: Option<OutputFormatArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
