use gradle_advisor::cli::commands::{CliArgs, Commands};
use gradle_advisor::cli::handlers::{handle_diagnose, handle_migrate};
use gradle_advisor::util::{init_logging, LoggingConfig};
use gradle_advisor::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("gradle-advisor v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Diagnose(diagnose_args) => handle_diagnose(diagnose_args).await,
        Commands::Migrate(migrate_args) => handle_migrate(migrate_args).await,
    };

    std::process::exit(exit_code);
}
