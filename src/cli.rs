use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::formatter::OutputFormat;
use crate::types::Severity;

#[derive(Parser)]
#[command(name = "wklint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lint declarative workload definition files")]
#[command(
    long_about = "A linter for declarative workload definition files. Checks resource declarations against security, reliability, and organization rules, and can rewrite files to repair a subset of the findings automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a file or directory and report violations
    Lint {
        /// File or directory to lint
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Only report issues at or above this severity
        #[arg(long, value_enum)]
        min_severity: Option<SeverityArg>,

        /// Disable specific rules by code
        #[arg(long, value_name = "CODE", value_delimiter = ',')]
        disable: Vec<String>,
    },

    /// Apply automatic fixes in place
    Fix {
        /// File or directory to fix
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Disable specific rules by code
        #[arg(long, value_name = "CODE", value_delimiter = ',')]
        disable: Vec<String>,

        /// Show what would change without rewriting any file
        #[arg(long)]
        dry_run: bool,
    },

    /// List the available rules
    Rules {
        /// Output the rule list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Github,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Github => OutputFormat::Github,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Error,
    Warning,
    Info,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Error => Severity::Error,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Info => Severity::Info,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_args() {
        let cli = Cli::parse_from([
            "wklint",
            "lint",
            "deploy/",
            "--format",
            "json",
            "--min-severity",
            "warning",
            "--disable",
            "WK8016,WK8020",
        ]);
        match cli.command {
            Commands::Lint {
                path,
                format,
                min_severity,
                disable,
            } => {
                assert_eq!(path, PathBuf::from("deploy/"));
                assert_eq!(format, FormatArg::Json);
                assert_eq!(min_severity, Some(SeverityArg::Warning));
                assert_eq!(disable, vec!["WK8016", "WK8020"]);
            }
            _ => panic!("expected lint subcommand"),
        }
    }

    #[test]
    fn test_fix_defaults() {
        let cli = Cli::parse_from(["wklint", "fix"]);
        match cli.command {
            Commands::Fix {
                path,
                disable,
                dry_run,
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(disable.is_empty());
                assert!(!dry_run);
            }
            _ => panic!("expected fix subcommand"),
        }
    }
}
