//! Validate command implementation
//!
//! Renders one status line per required key plus an overall summary; the
//! process exit status reflects aggregate validity across all groups.

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::Emoji;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::envfile::{check_file, FileReport, KeyStatus};

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "");

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the .env file
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Comma-separated keys required in the .env file
    #[arg(long, value_name = "KEYS")]
    pub env_variables: Option<String>,

    /// Path to the env.sh file
    #[arg(long, value_name = "PATH")]
    pub env_sh_file: Option<PathBuf>,

    /// Comma-separated keys required in the env.sh file
    #[arg(long, value_name = "KEYS")]
    pub env_sh_variables: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let groups = [
        (args.env_file, split_keys(&args.env_variables)),
        (args.env_sh_file, split_keys(&args.env_sh_variables)),
    ];

    let mut reports: Vec<FileReport> = Vec::new();
    for (file, keys) in groups {
        let Some(file) = file else {
            if !keys.is_empty() {
                warn!("required keys given without a file path, skipping group");
            }
            continue;
        };
        reports.push(check_file(&file, &keys)?);
    }

    let all_valid = reports.iter().all(|report| report.is_valid());

    match args.format {
        OutputFormat::Text => render_text(&reports, all_valid),
        OutputFormat::Json => render_json(&reports, all_valid)?,
    }

    if !all_valid {
        std::process::exit(1);
    }
    Ok(())
}

fn render_text(reports: &[FileReport], all_valid: bool) {
    for report in reports {
        if !report.file_found {
            println!("{}ERROR: Env file not found: {}", ERROR, report.path.display());
        }
        for key in &report.keys {
            match key.status {
                KeyStatus::Set => {
                    println!("{}Success: **{}** is set.", SUCCESS, key.key);
                }
                KeyStatus::Empty => {
                    println!("{}WARNING: **{}** is defined but EMPTY.", WARNING, key.key);
                }
                KeyStatus::Missing => {
                    println!("{}ERROR: **{}** is NOT found.", ERROR, key.key);
                }
                KeyStatus::FileMissing => {
                    println!("{}ERROR: **{}** NOT FOUND (file missing).", ERROR, key.key);
                }
            }
        }
    }

    if all_valid {
        println!("All required variables were found and set across all configuration files.");
    } else {
        println!("One or more required variables are missing or empty. Check the logs above.");
    }
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    files: &'a [FileReport],
}

fn render_json(reports: &[FileReport], all_valid: bool) -> Result<()> {
    let report = ValidationReport { valid: all_valid, files: reports };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Split a comma-separated key list, trimming whitespace and discarding empty
/// segments. An unset flag is an empty list.
fn split_keys(value: &Option<String>) -> Vec<String> {
    value
        .as_ref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
