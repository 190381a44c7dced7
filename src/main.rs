use std::process;

use clap::Parser;
use wklint::cli::{Cli, Commands};
use wklint::config::WklintConfig;
use wklint::fix::fix_path;
use wklint::formatter::{OutputFormat, format_result};
use wklint::lint::lint_path;
use wklint::rules::Registry;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> wklint::Result<i32> {
    let registry = Registry::builtin();

    match cli.command {
        Commands::Lint {
            path,
            format,
            min_severity,
            disable,
        } => {
            let mut config = WklintConfig::new();
            if let Some(severity) = min_severity {
                config = config.with_min_severity(severity.into());
            }
            for code in disable {
                config = config.disable(code);
            }

            let result = lint_path(&path, &registry, &config)?;
            let rendered = format_result(&result, format.into())?;
            print!("{}", rendered);
            Ok(if result.has_findings() { 1 } else { 0 })
        }

        Commands::Fix {
            path,
            disable,
            dry_run,
        } => {
            let mut config = WklintConfig::new();
            for code in disable {
                config = config.disable(code);
            }

            let results = fix_path(&path, &registry, &config, dry_run)?;
            if results.is_empty() {
                println!("Nothing to fix");
                return Ok(0);
            }

            let mut failed = false;
            for result in &results {
                match &result.error {
                    None => {
                        let verb = if dry_run { "would fix" } else { "fixed" };
                        println!("{}: {} [{}] {}", result.file, verb, result.code, result.description);
                    }
                    Some(error) => {
                        failed = true;
                        eprintln!("{}: failed [{}] {}: {}", result.file, result.code, result.description, error);
                    }
                }
            }
            Ok(if failed { 1 } else { 0 })
        }

        Commands::Rules { json } => {
            let definitions = registry.definitions();
            if json {
                let entries: Vec<serde_json::Value> = definitions
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "code": d.code.as_str(),
                            "name": d.name,
                            "severity": d.severity.as_str(),
                            "fixable": d.fixable,
                            "description": d.description,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for d in &definitions {
                    let fixable = if d.fixable { " (fixable)" } else { "" };
                    println!("{} {:<28} {:<8}{} {}", d.code, d.name, d.severity, fixable, d.description);
                }
            }
            Ok(0)
        }
    }
}
