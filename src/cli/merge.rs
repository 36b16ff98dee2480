//! Merge command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::envfile::{merge_files, FileStyle};

#[derive(Args)]
pub struct MergeArgs {
    /// Path to the old .env file
    #[arg(long, value_name = "PATH")]
    pub old_env_file: Option<PathBuf>,

    /// Path to the new .env file
    #[arg(long, value_name = "PATH")]
    pub new_env_file: Option<PathBuf>,

    /// Path to the old env.sh file
    #[arg(long, value_name = "PATH")]
    pub old_env_sh_file: Option<PathBuf>,

    /// Path to the new env.sh file
    #[arg(long, value_name = "PATH")]
    pub new_env_sh_file: Option<PathBuf>,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let pairs = [
        (args.old_env_file, args.new_env_file, FileStyle::Plain),
        (args.old_env_sh_file, args.new_env_sh_file, FileStyle::Export),
    ];

    for (old, new, style) in pairs {
        let (Some(old), Some(new)) = (old, new) else {
            debug!(?style, "pair incomplete, skipping");
            continue;
        };

        let summary = merge_files(&old, &new, style)?;
        if summary.changed() {
            info!(
                old = %old.display(),
                new = %new.display(),
                updated = summary.updated.len(),
                appended = summary.appended.len(),
                "merged env files"
            );
        } else {
            debug!(old = %old.display(), new = %new.display(), "nothing to merge");
        }
    }

    Ok(())
}
