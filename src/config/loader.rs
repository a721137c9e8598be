// Configuration loader
// Layers ~/.fleetctl/config.toml and FLEETCTL_* environment variables over defaults

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::settings::Config;

const ENV_PREFIX: &str = "FLEETCTL";

/// `~/.fleetctl/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".fleetctl/config.toml"))
}

/// Load configuration. A missing file is not an error; defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    debug!(path = %path.display(), "Loading configuration");

    let layered = ::config::Config::builder()
        .add_source(
            ::config::File::from(path.as_path())
                .format(::config::FileFormat::Toml)
                .required(false),
        )
        .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    layered
        .try_deserialize()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Write configuration as TOML, creating the parent directory if needed
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), "Configuration saved");
    Ok(())
}
