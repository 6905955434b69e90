#![forbid(unsafe_code)]

//! Herald demo binary entry point.

mod cli;
mod scenario;

use herald_core::RegistryConfig;
use herald_core::logging::{self, LoggingConfig};

use cli::{Command, Scenario};

fn main() {
    let opts = match cli::parse() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{}", cli::help_text());
            return;
        }
        Ok(Command::Version) => {
            println!("{}", cli::version_text());
            return;
        }
        Err(e) => {
            eprintln!("{e}\n\n{}", cli::help_text());
            std::process::exit(2);
        }
    };

    let logging_config = match LoggingConfig::from_env() {
        Ok(config) => opts.logging(config),
        Err(e) => {
            eprintln!("Invalid logging configuration: {e}");
            std::process::exit(2);
        }
    };
    if let Err(e) = logging::init(&logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let registry_config = match RegistryConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid registry configuration: {e}");
            std::process::exit(2);
        }
    };
    tracing::debug!(?registry_config, ?opts, "starting demo");

    if matches!(opts.scenario, Scenario::Agency | Scenario::All) {
        println!("== Book agency ==");
        for line in scenario::run_agency(&registry_config) {
            println!("{line}");
        }
    }
    if matches!(opts.scenario, Scenario::News | Scenario::All) {
        println!("== News app ==");
        for line in scenario::run_news() {
            println!("{line}");
        }
    }
}
