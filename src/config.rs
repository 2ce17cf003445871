//! Layered configuration: optional file, then `ELTEK_*` environment.

use std::path::Path;

use config::{Config, Environment, File, Map};
use eltek_types::Levels;
use serde::Deserialize;
use tracing::debug;

use crate::check::TemperatureParams;
use crate::error::ConfigError;
use crate::plugin::{SourceRole, BATTERY_LEVELS, RECTIFIER_LEVELS};

/// Doctor settings.
///
/// ```toml
/// refresh = 5
///
/// [temperature.rectifier]
/// warn = 45.0
/// crit = 55.0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorConfig {
    /// Levels per temperature source; unset sources use the variant defaults.
    pub temperature: TemperatureParams,
    /// Seconds between polls in watch mode.
    pub refresh: u64,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            temperature: TemperatureParams::default(),
            refresh: 1,
        }
    }
}

/// Settings as read from the file and environment layers.
///
/// Each bound is optional so that a single `warn` or `crit` can be set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    temperature: RawTemperature,
    refresh: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTemperature {
    rectifier: RawLevels,
    battery: RawLevels,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLevels {
    warn: Option<f64>,
    crit: Option<f64>,
}

impl DoctorConfig {
    /// Load from an optional file plus environment overrides such as
    /// `ELTEK_TEMPERATURE__RECTIFIER__WARN=45`.
    ///
    /// A source with only one bound configured takes the other from the
    /// variant defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`load`](Self::load), reading the environment layer from
    /// `env` instead of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("ELTEK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let raw: RawConfig = config.try_deserialize()?;
        let mut loaded = Self::default();
        if let Some(refresh) = raw.refresh {
            loaded.refresh = refresh;
        }
        let RawTemperature { rectifier, battery } = raw.temperature;
        loaded.override_levels(SourceRole::Rectifier, rectifier.warn, rectifier.crit);
        loaded.override_levels(SourceRole::Battery, battery.warn, battery.crit);

        loaded.validate()?;
        debug!(?loaded, "configuration loaded");
        Ok(loaded)
    }

    /// Replace one or both bounds of a source's levels.
    ///
    /// A single bound is combined with the configured levels, or with the
    /// variant defaults when none are configured.
    pub fn override_levels(&mut self, role: SourceRole, warn: Option<f64>, crit: Option<f64>) {
        if warn.is_none() && crit.is_none() {
            return;
        }
        let (slot, default) = match role {
            SourceRole::Rectifier => (&mut self.temperature.rectifier, RECTIFIER_LEVELS),
            SourceRole::Battery => (&mut self.temperature.battery, BATTERY_LEVELS),
        };
        let current = slot.unwrap_or(default);
        *slot = Some(Levels::new(
            warn.unwrap_or(current.warn),
            crit.unwrap_or(current.crit),
        ));
    }

    /// Reject levels that can never classify a reading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sources = [
            ("rectifier", self.temperature.rectifier),
            ("battery", self.temperature.battery),
        ];
        for (name, levels) in sources {
            if let Some(levels) = levels {
                check_levels(name, levels)?;
            }
        }
        if self.refresh == 0 {
            return Err(ConfigError::Invalid("refresh must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

fn check_levels(name: &str, levels: Levels) -> Result<(), ConfigError> {
    if !levels.is_finite() {
        return Err(ConfigError::Invalid(format!(
            "{} levels must be finite (warn={}, crit={})",
            name, levels.warn, levels.crit
        )));
    }
    if levels.warn > levels.crit {
        return Err(ConfigError::Invalid(format!(
            "{} warn level {} exceeds crit level {}",
            name, levels.warn, levels.crit
        )));
    }
    Ok(())
}
