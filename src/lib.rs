//! # eltek-doctor
//!
//! Monitoring checks for Eltek power systems (Smartpack controllers and
//! Flatpack2 rectifier shelves) read over SNMP.
//!
//! The crate turns the raw strings an SNMP transport fetched from a device
//! into typed parameters, decides which services to monitor, and evaluates
//! each service into a [`Verdict`] with a state, a summary and metrics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Doctor                             │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │ source  │───▶│   data   │───▶│  check  │───▶│  report  │  │
//! │  │ (input) │    │ (parse)  │    │(verdict)│    │(text/json│  │
//! │  └─────────┘    └────┬─────┘    └────┬────┘    └──────────┘  │
//! │                      │               │                       │
//! │                      └──── plugin ───┘                       │
//! │                    (variant descriptors)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`plugin`]**: The four variants (`eltek`, `eltek_temperature`,
//!   `flatpack2`, `flatpack2_temperature`) with their OID tables, detection
//!   and service names
//! - **[`data`]**: Positional parsing into a [`ParameterMap`] and evaluation
//!   of a whole poll into a [`PollReport`]
//! - **[`check`]**: Discovery, the info/status/temperature evaluators and the
//!   Eltek alarm-code table
//! - **[`source`]**: The [`DataSource`] trait with file and channel inputs
//! - **[`report`]**: Status lines with perfdata and JSON export
//! - **[`config`]**: Layered configuration of temperature levels
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Evaluate a poll file once, exit with the worst state
//! eltek-doctor --file poll.json
//!
//! # Re-evaluate whenever the file changes
//! eltek-doctor --file poll.json --watch
//! ```
//!
//! ### As a library
//!
//! ```
//! use eltek_doctor::{check, discover, parse, plugin, TemperatureParams};
//!
//! let variant = &plugin::ELTEK_TEMPERATURE;
//! let params = parse(&["55", "3", "N/A", "N/A"], &variant.fetch);
//!
//! for service in discover(variant, &params) {
//!     let verdict = check(variant, service, &params, &TemperatureParams::default());
//!     println!("{} {}: {}", verdict.state, service, verdict.summary);
//! }
//! ```
//!
//! ### With a channel source
//!
//! ```
//! use eltek_doctor::{ChannelSource, Doctor, TemperatureParams};
//!
//! let (tx, source) = ChannelSource::create("snmp://10.0.0.5");
//! let doctor = Doctor::new(Box::new(source), TemperatureParams::default());
//! ```

pub mod app;
pub mod check;
pub mod config;
pub mod data;
pub mod error;
pub mod plugin;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use app::Doctor;
pub use check::{check, discover, evaluate_info, evaluate_status, TemperatureParams};
pub use config::DoctorConfig;
pub use data::{parse, parse_table, PollReport, SectionReport, ServiceResult};
pub use eltek_types::{Levels, Metric, ParamValue, ParameterMap, ParsedParameter, State, Verdict};
pub use error::{CheckError, ConfigError, ParseError};
pub use plugin::Variant;
pub use source::{ChannelSource, DataSource, FileSource, PollSnapshot};
