pub mod post;
pub mod pull;
pub mod push;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use qsync_core::{config, Settings};
use qsync_remote::QiitaClient;

/// Global flags shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    pub config: Option<PathBuf>,
    pub blog: Option<String>,
}

impl Context {
    /// Load the config file and resolve the selected blog.
    pub fn settings(&self) -> Result<Settings> {
        let loaded = match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        }
        .context("could not load config")?;
        let settings = loaded.resolve(self.blog.as_deref())?;
        tracing::debug!(
            blog = %settings.blog,
            api_base = %settings.api_base,
            local_root = %settings.local_root.display(),
            "resolved settings"
        );
        Ok(settings)
    }

    /// Settings plus a client built from them.
    pub fn connect(&self) -> Result<(Settings, QiitaClient)> {
        let settings = self.settings()?;
        let client = QiitaClient::from_settings(&settings);
        Ok((settings, client))
    }
}
