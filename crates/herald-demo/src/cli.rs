#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! `HERALD_DEMO_SCENARIO` overrides the default scenario; an explicit
//! `--scenario` flag wins over the environment.

use std::env;
use std::fmt;

use herald_core::logging::{LogFormat, LoggingConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Herald demo: listener registry walkthrough

USAGE:
    herald-demo [OPTIONS]

OPTIONS:
    --scenario=NAME      Scenario to run: 'agency', 'news', or 'all' (default: all)
    --log=FILTER         Log filter directives (default: $HERALD_LOG or info)
    --log-format=FMT     Log output: 'pretty' or 'json' (default: pretty)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT:
    HERALD_DEMO_SCENARIO     Default scenario
    HERALD_LOG               Log filter directives
    HERALD_LOG_FORMAT        Log output format
    HERALD_DUPLICATE_POLICY  keep-first or replace
    HERALD_PRUNE_EXPIRED     Prune dropped listeners on every notification";

/// Which walkthrough to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Agency,
    News,
    All,
}

impl Scenario {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "agency" | "books" => Some(Self::Agency),
            "news" => Some(Self::News),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Parse failure, reported to the user before exiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownFlag(String),
    InvalidValue { flag: &'static str, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown option: {flag}"),
            Self::InvalidValue { flag, value } => write!(f, "invalid value for {flag}: {value}"),
        }
    }
}

impl std::error::Error for CliError {}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Options for a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub scenario: Scenario,
    pub log_filter: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            scenario: Scenario::All,
            log_filter: None,
            log_format: None,
        }
    }
}

impl Opts {
    /// Apply CLI overrides on top of an environment-derived logging config.
    #[must_use]
    pub fn logging(&self, base: LoggingConfig) -> LoggingConfig {
        let mut config = base;
        if let Some(filter) = &self.log_filter {
            config.filter = filter.clone();
        }
        if let Some(format) = self.log_format {
            config.format = format;
        }
        config
    }
}

/// Parse the process arguments and environment.
pub fn parse() -> Result<Command, CliError> {
    parse_from(env::args().skip(1), |key| env::var(key).ok())
}

/// Parse arguments (without the program name) with a custom env lookup.
pub fn parse_from<I, S, F>(args: I, get_env: F) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();
    if let Some(value) = get_env("HERALD_DEMO_SCENARIO") {
        opts.scenario = Scenario::parse(&value).ok_or(CliError::InvalidValue {
            flag: "HERALD_DEMO_SCENARIO",
            value,
        })?;
    }

    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            _ => {}
        }
        let (flag, value) = arg.split_once('=').unwrap_or((arg, ""));
        match flag {
            "--scenario" => {
                opts.scenario = Scenario::parse(value).ok_or_else(|| CliError::InvalidValue {
                    flag: "--scenario",
                    value: value.to_string(),
                })?;
            }
            "--log" => {
                if value.is_empty() {
                    return Err(CliError::InvalidValue {
                        flag: "--log",
                        value: String::new(),
                    });
                }
                opts.log_filter = Some(value.to_string());
            }
            "--log-format" => {
                let format = LogFormat::parse(value).map_err(|_| CliError::InvalidValue {
                    flag: "--log-format",
                    value: value.to_string(),
                })?;
                opts.log_format = Some(format);
            }
            _ => return Err(CliError::UnknownFlag(arg.to_string())),
        }
    }
    Ok(Command::Run(opts))
}

pub fn help_text() -> &'static str {
    HELP_TEXT
}

pub fn version_text() -> String {
    format!("herald-demo {VERSION}")
}
