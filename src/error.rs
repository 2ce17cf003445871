//! Error types for parsing, checks and configuration.

use thiserror::Error;

/// Errors raised while coercing a single raw value.
///
/// These never abort a parse: the affected parameter is left out of the
/// resulting map.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The parameter table declares a divisor of zero.
    #[error("parameter {parameter} has a zero divisor")]
    ZeroDivisor { parameter: &'static str },
}

/// Errors raised while evaluating a service.
///
/// The check boundary turns every one of these into an UNKNOWN verdict
/// carrying the message as its summary.
#[derive(Debug, Error, PartialEq)]
pub enum CheckError {
    /// No data source in this variant matches the requested service.
    #[error("Unknown service '{service}' for {variant}")]
    UnknownService {
        service: String,
        variant: &'static str,
    },

    /// Configured levels are not usable numbers.
    #[error("Invalid levels for {service}: warn={warn}, crit={crit}")]
    InvalidLevels {
        service: &'static str,
        warn: f64,
        crit: f64,
    },
}

/// Errors loading the doctor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configured values that can never be applied.
    #[error("Invalid threshold configuration: {0}")]
    Invalid(String),
}
