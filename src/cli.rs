//! Command-line surface: `parallel-log-verify <inputfile> [--separator=<sep>]`.

use crate::validate::{DEFAULT_SEPARATOR, ValidatorConfig};
use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: parallel-log-verify <inputfile> [--separator=<sep>]";

/// Exit code for a rejected command line.
pub const USAGE_EXIT_CODE: i32 = 2;

const SEPARATOR_MARKER: &str = "--separator=";

#[derive(Parser, Debug)]
#[command(name = "parallel-log-verify")]
#[command(about = "Check a parallel stream-benchmark output log for consistency", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Log file to validate.
    #[arg(allow_hyphen_values = true)]
    pub input: PathBuf,

    /// `--separator=<sep>`; anything without that marker is ignored.
    #[arg(allow_hyphen_values = true)]
    pub option: Option<String>,
}

/// What to validate and how, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub config: ValidatorConfig,
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        let separator = self
            .option
            .as_deref()
            .and_then(separator_from_arg)
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

        Invocation {
            input: self.input,
            config: ValidatorConfig::with_separator(separator),
        }
    }
}

/// Separator carried by `arg`, if it contains `--separator=`.
///
/// The value is everything after the first 12 characters of the argument,
/// wherever the marker sits in it.
pub fn separator_from_arg(arg: &str) -> Option<String> {
    arg.contains(SEPARATOR_MARKER)
        .then(|| arg.chars().skip(SEPARATOR_MARKER.len()).collect())
}
