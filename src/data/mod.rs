//! Parsing and processing of raw poll results.
//!
//! This module handles the transformation of the raw strings returned by
//! the SNMP transport into typed parameters, and of a whole poll snapshot
//! into an evaluated report.
//!
//! ## Submodules
//!
//! - [`parse`]: Positional parsing of raw values into a [`ParameterMap`](eltek_types::ParameterMap)
//! - [`render`]: Units and value formatting for summaries
//! - [`poll`]: Evaluation of a full snapshot ([`PollReport`])
//!
//! ## Data Flow
//!
//! ```text
//! PollSnapshot (section -> string table)
//!        │
//!        ▼
//! parse::parse_table()        per section, driven by its Variant
//!        │
//!        ├──▶ check::discover()   services for this device
//!        │
//!        └──▶ check::check()      one Verdict per service
//! ```

pub mod parse;
pub mod poll;
pub mod render;

pub use parse::{coerce, parse, parse_table};
pub use poll::{PollReport, SectionReport, ServiceResult};
pub use render::{display_rounded, render_decimal, render_value, round_to, Unit};
