//! # escli Main Entry Point
//!
//! Parses the host/port flags, probes the service once, and hands control to
//! the REPL loop. A failed probe is the only fatal error path.

use anyhow::Result;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use escli::cmd_args::CommandLineArgs;
use escli::config::Config;
use escli::{repl, Dispatcher, HttpTransport};

/// Exit status when the startup connectivity probe fails.
const STARTUP_FAILURE_STATUS: i32 = -1;

fn main() {
    let args = CommandLineArgs::parse();
    init_tracing(args.verbose());

    let config = Config::new(args.host(), args.port());
    let status = match run(&config) {
        Ok(status) => status,
        Err(e) => {
            println!("{}", format!("(error) {e:#}").red());
            STARTUP_FAILURE_STATUS
        }
    };
    std::process::exit(status);
}

fn run(config: &Config) -> Result<i32> {
    let transport = HttpTransport::new(config)?;
    let (dispatcher, greeting) = Dispatcher::connect(transport)?;
    println!("{greeting}");
    repl::run(&dispatcher, &config.prompt())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "escli=debug" } else { "escli=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
