//! Command-line surface of the `spotprice` binary
//!
//! Lives in the library so the flag parsing and the mapping onto a lookup
//! can be exercised without spawning the binary.

use crate::aggregate::AggregateResult;
use crate::error::{Result, SpotPriceError};
use crate::event::{render_outcome, split_zones, ResponseShape};
use crate::exit_codes::{codes, exit_code_for_error};
use crate::logging::LogLevel;
use crate::query::{OsFamily, RequestParameters};
use crate::window::LookbackDuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spotprice")]
#[command(
    about = "Find AWS spot pricing for a given instance type",
    long_about = "spotprice reports the highest (and optionally lowest) EC2 spot price for an instance type over a recent window.\n\nExamples:\n  spotprice t2.medium --days 7\n  spotprice c5.large --os windows --az us-east-2a,us-east-2b --minimum\n  spotprice m5.xlarge --hours 6 --api"
)]
#[command(version)]
pub struct Cli {
    /// Instance type to retrieve pricing for (e.g., t2.medium)
    #[arg(value_name = "INSTANCE_TYPE", required_unless_present = "init_config")]
    pub instance_type: Option<String>,

    /// Number of days history to fetch (capped at 90)
    #[arg(short = 'D', long, default_value_t = 0)]
    pub days: u64,

    /// Number of hours history to fetch
    #[arg(short = 'H', long, default_value_t = 0)]
    pub hours: u64,

    /// Number of minutes history to fetch
    #[arg(short = 'M', long, default_value_t = 0)]
    pub minutes: u64,

    /// Number of seconds history to fetch
    #[arg(short = 'S', long, default_value_t = 0)]
    pub seconds: u64,

    /// OS type to get pricing for
    #[arg(short, long, value_enum, default_value_t = OsFamily::Linux)]
    pub os: OsFamily,

    /// Availability zones to filter pricing data (comma-separated)
    #[arg(short, long, value_name = "ZONES")]
    pub az: Option<String>,

    /// Also retrieve minimum price
    #[arg(short, long)]
    pub minimum: bool,

    /// Log level
    #[arg(short, long, value_enum, ignore_case = true, env = "LOG_LEVEL")]
    pub loglevel: Option<LogLevel>,

    /// Simulate AWS API Gateway response
    #[arg(short = 'A', long)]
    pub api: bool,

    /// Configuration file path
    #[arg(short, long, env = "SPOTPRICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Region to query when no zone resolves one (overrides config and AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Overall lookup deadline in seconds (overrides config)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Write a default config file to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,
}

impl Cli {
    /// Lookup parameters for these flags, logging at `level`
    pub fn request_parameters(&self, level: LogLevel) -> RequestParameters {
        RequestParameters {
            instance_type: self.instance_type.clone().unwrap_or_default(),
            os_family: self.os,
            zones: split_zones(self.az.as_deref()),
            duration: LookbackDuration::new(self.days, self.hours, self.minutes, self.seconds),
            want_minimum: self.minimum,
            log_level: Some(level),
        }
    }

    pub fn response_shape(&self) -> ResponseShape {
        if self.api {
            ResponseShape::Envelope
        } else {
            ResponseShape::Bare
        }
    }
}

/// What the binary prints on stdout and the code it exits with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalOutput {
    pub stdout: String,
    pub exit_code: i32,
}

/// Render a lookup outcome for the terminal
///
/// An enveloped failure is still printed, but the exit code reflects the
/// error kind. Bare failures are returned for the caller to report.
pub fn render_for_terminal(
    outcome: Result<AggregateResult>,
    shape: ResponseShape,
) -> std::result::Result<TerminalOutput, SpotPriceError> {
    let exit_code = match &outcome {
        Ok(_) => codes::SUCCESS,
        Err(e) => exit_code_for_error(e),
    };
    let stdout = render_outcome(outcome, shape)?;
    Ok(TerminalOutput { stdout, exit_code })
}
