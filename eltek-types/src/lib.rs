//! # eltek-types
//!
//! Core types shared between the Eltek checks and the host monitoring
//! framework. This crate defines what one poll of a rectifier/battery
//! controller looks like after parsing, and what a check hands back.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to persist or export results
//! - **Host agnostic**: Verdicts carry only a state, a summary and plain numeric metrics
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/TOML/etc. serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use eltek_types::{Levels, Metric, ParamValue, ParameterMap, ParsedParameter, State, Verdict};
//!
//! let params: ParameterMap = [(
//!     "rectifier_temperature".to_string(),
//!     ParsedParameter::new(ParamValue::Integer(42), "Rectifier temperature", true),
//! )]
//! .into_iter()
//! .collect();
//!
//! let temp = params.value("rectifier_temperature").and_then(|v| v.as_f64());
//! assert_eq!(temp, Some(42.0));
//!
//! let verdict = Verdict::new(State::Warning, "Rectifier: 42.0°C")
//!     .with_metric(Metric::new("rectifier_temperature", 42.0).with_levels(Levels::new(40.0, 50.0)));
//! assert_eq!(verdict.metrics.len(), 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod value;
mod verdict;

pub use value::*;
pub use verdict::*;
