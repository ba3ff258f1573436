/// Erasure binary - parses the command line, loads configuration and
/// dispatches to the wipe flow.
use clap::Parser;
use erasure::cli::prompt::Prompter;
use erasure::cli::{Cli, Command, run};
use erasure::config::{Config, load_config};
use std::io;
use std::process::exit;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {}", e);
            exit(e.exit_code());
        }
    };

    setup_logging(cli.log_level.as_deref(), &config);
    tracing::debug!(algorithm = %config.algorithm, workers = config.workers, "configuration loaded");

    let assume_yes = match &cli.command {
        Command::File(args) | Command::Folder(args) | Command::Drive(args) => args.yes,
        Command::CheckLock { .. } | Command::HashPassword => false,
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr(), assume_yes);

    match run::execute(cli.command, &config, &mut prompter) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("❌ {}", e);
            tracing::debug!(error = ?e, "run failed");
            exit(e.exit_code());
        }
    }
}

/// RUST_LOG wins over `--log-level`, which wins over the config file.
fn setup_logging(cli_level: Option<&str>, config: &Config) {
    use tracing_subscriber::EnvFilter;

    let level = cli_level.unwrap_or(&config.log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if initialized.is_err() {
        eprintln!("⚠️  Logging already initialized");
    }
}
