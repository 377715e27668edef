use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "EXPIRE_";

/// Main expire settings structure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    /// Root directory to prune
    ///
    /// The root itself is never removed.
    #[serde(default)]
    pub watch_path: PathBuf,

    /// Files last modified longer ago than this are removed
    #[serde(with = "humantime_serde", default = "default_modified_expiration")]
    pub modified_expiration: Duration,

    /// Interval between two pruning cycles
    #[serde(with = "humantime_serde", default = "default_check_frequency")]
    pub check_frequency: Duration,
}

impl PruneConfig {
    pub fn new<P: Into<PathBuf>>(
        watch_path: P,
        modified_expiration: Duration,
        check_frequency: Duration,
    ) -> Self {
        Self {
            watch_path: watch_path.into(),
            modified_expiration,
            check_frequency,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.watch_path.as_os_str().is_empty() {
            anyhow::bail!("watch path must be set, use {ENV_PREFIX}WATCH_PATH or `watch_path`");
        }
        Ok(())
    }
}

/// Load configuration from defaults, then `file`, then `EXPIRE_*` variables.
pub fn load_config(file: &Option<PathBuf>) -> anyhow::Result<PruneConfig> {
    let mut figment = Figment::new();
    if let Some(path) = file {
        figment = figment.merge(toml_provider(path)?);
    }
    figment = figment.merge(env_provider());
    let config: PruneConfig = figment
        .extract()
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

pub fn display_config(config: &PruneConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to serialize configuration")
}

fn toml_provider(path: &Path) -> anyhow::Result<figment::providers::Data<Toml>> {
    if !path.is_file() {
        anyhow::bail!("configuration file {path:?} does not exist");
    }
    Ok(Toml::file_exact(path))
}

/// Variables that are set but empty are treated as unset.
fn env_provider() -> Env {
    let empty: Vec<String> = env::vars_os()
        .filter_map(|(key, value)| {
            let key = key.to_str()?.strip_prefix(ENV_PREFIX)?;
            value.is_empty().then(|| key.to_lowercase())
        })
        .collect();
    let empty: Vec<&str> = empty.iter().map(String::as_str).collect();
    log::trace!("ignored empty environment variables: {empty:?}");
    Env::prefixed(ENV_PREFIX).ignore(&empty)
}

fn default_modified_expiration() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_check_frequency() -> Duration {
    Duration::from_secs(60)
}
