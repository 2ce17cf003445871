//! Check results: states, metrics and verdicts.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Monitoring state of a single service.
///
/// Variants are declared in escalation order so that `max()` picks the
/// state a host would report for a group of services
/// (`OK < WARNING < UNKNOWN < CRITICAL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum State {
    #[default]
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl State {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            State::Ok => "OK",
            State::Warning => "WARN",
            State::Unknown => "UNKN",
            State::Critical => "CRIT",
        }
    }

    /// Plugin exit code for this state.
    pub fn exit_code(&self) -> i32 {
        match self {
            State::Ok => 0,
            State::Warning => 1,
            State::Critical => 2,
            State::Unknown => 3,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Ok => "OK",
            State::Warning => "WARNING",
            State::Unknown => "UNKNOWN",
            State::Critical => "CRITICAL",
        })
    }
}

/// Warning and critical levels for an upper-bound check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Levels {
    /// Values strictly above this raise a warning.
    pub warn: f64,
    /// Values strictly above this are critical.
    pub crit: f64,
}

impl Levels {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }

    /// Both levels are usable numbers.
    pub fn is_finite(&self) -> bool {
        self.warn.is_finite() && self.crit.is_finite()
    }

    /// State of `value` against these levels, using "greater than" semantics.
    pub fn state_of(&self, value: f64) -> State {
        if value > self.crit {
            State::Critical
        } else if value > self.warn {
            State::Warning
        } else {
            State::Ok
        }
    }
}

/// A named numeric value for the host to graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub name: String,
    pub value: f64,

    /// Levels shown alongside the value, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub levels: Option<Levels>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            levels: None,
        }
    }

    pub fn with_levels(mut self, levels: Levels) -> Self {
        self.levels = Some(levels);
        self
    }
}

/// Outcome of one check invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    pub state: State,
    pub summary: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: Vec<Metric>,
}

impl Verdict {
    pub fn new(state: State, summary: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
            metrics: Vec::new(),
        }
    }

    /// An UNKNOWN verdict without metrics.
    pub fn unknown(summary: impl Into<String>) -> Self {
        Self::new(State::Unknown, summary)
    }

    /// Append a metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Find a metric by name.
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }
}
