//! `qsync push`: upload one edited file.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use qsync_sync::{push_one, UploadResult};

use super::Context;

/// Arguments for `qsync push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Local article file to upload.
    pub path: PathBuf,
}

impl PushArgs {
    pub fn run(self, ctx: &Context) -> Result<()> {
        let (settings, client) = ctx.connect()?;
        let result = push_one(&client, &settings.local_root, &self.path)
            .with_context(|| format!("push failed for {}", self.path.display()))?;

        match result {
            UploadResult::Uploaded { write } => {
                println!("✓ uploaded {}", self.path.display());
                if write.path() != self.path.as_path() {
                    println!("  ✎  {}", write.path().display());
                }
            }
            UploadResult::Skipped { local, remote } => {
                println!(
                    "· {} not uploaded: remote ({remote}) is not older than local ({local})",
                    self.path.display()
                );
            }
        }
        Ok(())
    }
}
