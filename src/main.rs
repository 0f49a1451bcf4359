use manifest_detect::cli::commands::{CliArgs, Commands};
use manifest_detect::cli::handlers::{handle_detect, handle_list, EXIT_USAGE};
use manifest_detect::config::{ConfigError, DetectorConfig};
use manifest_detect::util::logging::{init_logging, parse_level, LoggingConfig};
use manifest_detect::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let config = DetectorConfig::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_USAGE);
    }

    if let Err(e) = init_logging_from_args(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_USAGE);
    }

    debug!("manifest-detect v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &config),
        Commands::List(list_args) => handle_list(list_args, &config),
    };

    std::process::exit(exit_code);
}

/// Command-line level options take precedence over the environment.
fn init_logging_from_args(args: &CliArgs) -> Result<(), ConfigError> {
    let mut logging = LoggingConfig::from_env();

    if let Some(level) = args.log_level.as_deref() {
        logging.level =
            parse_level(level).ok_or_else(|| ConfigError::InvalidLogLevel(level.to_string()))?;
    } else if args.verbose {
        logging.level = Level::DEBUG;
    } else if args.quiet {
        logging.level = Level::ERROR;
    }

    init_logging(logging);
    Ok(())
}
