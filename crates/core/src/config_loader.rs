use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use tracing::debug;

/// Default location of the TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix of environment overrides, e.g. `BID_LEDGER_CALIBRATION__TAX_AND_REBATE_RATE`.
pub const ENV_PREFIX: &str = "BID_LEDGER_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, `config/Config.toml`,
    /// environment variables and `config/Config.json`.
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let json = path.with_extension("json");
        debug!(toml = %path.display(), json = %json.display(), "Loading configuration");

        let config: AppConfig = Self::base()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(json))
            .extract()?;

        Ok(config)
    }

    /// Loads configuration with a profile layered over the default file,
    /// e.g. `config/Config.audit.toml` for profile `audit`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::load_profile_from(DEFAULT_CONFIG_PATH, profile)
    }

    /// Loads a base TOML file and the profile file next to it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_profile_from(path: impl AsRef<Path>, profile: &str) -> Result<AppConfig> {
        let path = path.as_ref();
        let profile_file = profile_path(path, profile);
        debug!(
            toml = %path.display(),
            profile = %profile_file.display(),
            "Loading configuration profile"
        );

        let config: AppConfig = Self::base()
            .merge(Toml::file(path))
            .merge(Toml::file(profile_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .join(Json::file(path.with_extension("json")))
            .extract()?;

        Ok(config)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }
}

fn profile_path(base: &Path, profile: &str) -> PathBuf {
    base.with_extension(format!("{profile}.toml"))
}
