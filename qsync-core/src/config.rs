//! YAML configuration.
//!
//! # File layout
//!
//! ```text
//! ~/.config/qsync/config.yaml
//! ```
//!
//! ```yaml
//! default:
//!   access_token: "..."
//!   local_root: ~/qiita
//! blogs:
//!   team:
//!     access_token: "..."
//!     api_base: https://example.qiita.com/api/v2
//! ```
//!
//! A flat file with `access_token` / `local_root` at the top level is read as
//! the `default` record. Each blog under `blogs:` only lists what it overrides;
//! everything else falls back to `default`.
//!
//! As in the rest of the crate, `fn_at(home, …)` takes an explicit home
//! directory and `fn(…)` derives it from `dirs::home_dir()`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://qiita.com/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Name reported for the `default` record in errors and logs.
pub const DEFAULT_BLOG: &str = "default";

/// One blog's settings as written in the file. Every field is optional so the
/// same shape serves as both the default record and an override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl BlogConfig {
    /// Field-wise merge: a value set here wins, otherwise `fallback`'s is used.
    pub fn merged_over(&self, fallback: &BlogConfig) -> BlogConfig {
        BlogConfig {
            access_token: non_blank(&self.access_token).or_else(|| non_blank(&fallback.access_token)),
            local_root: self.local_root.clone().or_else(|| fallback.local_root.clone()),
            api_base: non_blank(&self.api_base).or_else(|| non_blank(&fallback.api_base)),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default: BlogConfig,
    #[serde(default)]
    pub blogs: BTreeMap<String, BlogConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigCompat {
    Multi(MultiCompat),
    Single(BlogConfig),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MultiCompat {
    #[serde(default)]
    default: BlogConfig,
    #[serde(default)]
    blogs: BTreeMap<String, BlogConfig>,
}

/// Fully resolved settings for one blog; every required field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub blog: String,
    pub access_token: String,
    pub local_root: PathBuf,
    pub api_base: String,
    pub timeout: Duration,
}

impl Config {
    /// Parse config text. `path` is only used for error context.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Config, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let compat: ConfigCompat = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(match compat {
            ConfigCompat::Multi(multi) => Config {
                default: multi.default,
                blogs: multi.blogs,
            },
            ConfigCompat::Single(default) => Config {
                default,
                blogs: BTreeMap::new(),
            },
        })
    }

    /// Resolve the settings for `blog` (or the default record when `None`),
    /// expanding `~/` in `local_root` against `home`.
    pub fn resolve_at(&self, blog: Option<&str>, home: Option<&Path>) -> Result<Settings, ConfigError> {
        let (name, merged) = match blog {
            None => (DEFAULT_BLOG, self.default.clone()),
            Some(key) => {
                let overrides = self.blogs.get(key).ok_or_else(|| ConfigError::UnknownBlog {
                    blog: key.to_string(),
                })?;
                (key, overrides.merged_over(&self.default))
            }
        };

        let missing = |field| ConfigError::MissingField {
            blog: name.to_string(),
            field,
        };
        let access_token = non_blank(&merged.access_token).ok_or_else(|| missing("access_token"))?;
        let local_root = merged.local_root.ok_or_else(|| missing("local_root"))?;

        Ok(Settings {
            blog: name.to_string(),
            access_token,
            local_root: expand_home(&local_root, home),
            api_base: non_blank(&merged.api_base)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_secs(merged.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// `resolve_at` convenience wrapper.
    pub fn resolve(&self, blog: Option<&str>) -> Result<Settings, ConfigError> {
        self.resolve_at(blog, dirs::home_dir().as_deref())
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.config/qsync/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".config").join("qsync").join("config.yaml")
}

/// Load the config file at `path`.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with path +
/// line context) if malformed YAML.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_yaml(&text, path)
}

/// Load `<home>/.config/qsync/config.yaml`.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    load_from(&config_path_at(home))
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&dirs::home_dir().ok_or(ConfigError::HomeNotFound)?)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
