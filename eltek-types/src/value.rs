//! Parsed parameter values for a single poll.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Placeholder stored in place of a value the device reported as empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single coerced value read from the device.
///
/// Integer readings with a divisor of one stay integers, scaled readings
/// become decimals and everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl ParamValue {
    /// The sentinel used for empty readings.
    pub fn not_available() -> Self {
        ParamValue::Text(String::from(NOT_AVAILABLE))
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Decimal(d) => Some(*d),
            ParamValue::Text(_) => None,
        }
    }

    /// Integer view of the value.
    ///
    /// Decimals are only accepted when they carry no fractional part, so a
    /// status code scaled by accident still compares as the same code.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            ParamValue::Decimal(d) if is_whole(*d) => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ParamValue::Text(_))
    }

    /// Returns true for the `"N/A"` sentinel.
    pub fn is_not_available(&self) -> bool {
        self.as_text() == Some(NOT_AVAILABLE)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Decimal(d) => f.write_str(&format_decimal(*d)),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

/// Format a decimal with its shortest exact representation, keeping at
/// least one fractional digit (`23.0`, `12.05`).
pub fn format_decimal(value: f64) -> String {
    if is_whole(value) {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && (value as i64) as f64 == value
}

/// A parameter after parsing, together with its display metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedParameter {
    /// The coerced value.
    pub value: ParamValue,

    /// Human label used in summaries.
    pub display_name: String,

    /// Whether this parameter is ever emitted as a metric.
    pub is_metric: bool,
}

impl ParsedParameter {
    pub fn new(value: ParamValue, display_name: impl Into<String>, is_metric: bool) -> Self {
        Self {
            value,
            display_name: display_name.into(),
            is_metric,
        }
    }
}

/// All parameters parsed from one poll, keyed by their stable identifier.
///
/// An empty map is a valid state and means the device returned no data.
/// The map is built once via [`FromIterator`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterMap {
    params: BTreeMap<String, ParsedParameter>,
}

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Get a parameter by identifier.
    pub fn get(&self, id: &str) -> Option<&ParsedParameter> {
        self.params.get(id)
    }

    /// Get just the value of a parameter.
    pub fn value(&self, id: &str) -> Option<&ParamValue> {
        self.params.get(id).map(|p| &p.value)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.params.contains_key(id)
    }

    /// Returns true if the parameter exists and is not the `"N/A"` sentinel.
    pub fn is_available(&self, id: &str) -> bool {
        self.value(id).is_some_and(|v| !v.is_not_available())
    }

    /// Iterate over all parameters in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParsedParameter)> {
        self.params.iter()
    }
}

impl FromIterator<(String, ParsedParameter)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (String, ParsedParameter)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}
