//! Configuration for the engine, read with the `config` crate from an
//! optional `kindred.toml` next to the process plus `KINDRED_*` environment
//! overrides. Everything has a default, so a missing file is not an error.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{KindredError, Result};
use crate::privatize::DEFAULT_LIFETIME_THRESHOLD;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Settings {
    /// Years after which an event is assumed to outlive its subject.
    #[serde(default = "default_lifetime_threshold")]
    pub lifetime_threshold: u16,
    /// BCP 47 identifier handed to the localization context.
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_lifetime_threshold() -> u16 {
    DEFAULT_LIFETIME_THRESHOLD
}

fn default_locale() -> String {
    "en-US".to_owned()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lifetime_threshold: default_lifetime_threshold(),
            locale: default_locale(),
        }
    }
}

impl Settings {
    /// Loads `kindred.toml` from the working directory when present, then
    /// applies `KINDRED_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::from_file("kindred")
    }

    pub fn from_file(name: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("KINDRED"))
            .build()
            .map_err(|error| KindredError::Config(error.to_string()))?;
        config
            .try_deserialize()
            .map_err(|error| KindredError::Config(error.to_string()))
    }
}
