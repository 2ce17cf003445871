//! Units and value formatting.

use eltek_types::{format_decimal, ParamValue};

/// Physical unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Kelvin,
    Volt,
    Ampere,
    Watt,
    WattHour,
    Hertz,
    Pascal,
    Percent,
    MicrogramsPerCubicMeter,
}

impl Unit {
    /// Display symbol appended to values.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
            Unit::Volt => "V",
            Unit::Ampere => "A",
            Unit::Watt => "W",
            Unit::WattHour => "Wh",
            Unit::Hertz => "Hz",
            Unit::Pascal => "Pa",
            Unit::Percent => "%",
            Unit::MicrogramsPerCubicMeter => "µg/m³",
        }
    }
}

/// Render a decimal with one fractional digit and an optional unit.
pub fn render_decimal(value: f64, unit: Option<Unit>) -> String {
    format!("{:.1}{}", value, unit.map_or("", |u| u.symbol()))
}

/// Render a parsed value for display.
///
/// Integers are shown as-is, decimals with one fractional digit, and text
/// verbatim without a unit.
pub fn render_value(value: &ParamValue, unit: Option<Unit>) -> String {
    let symbol = unit.map_or("", |u| u.symbol());
    match value {
        ParamValue::Integer(i) => format!("{}{}", i, symbol),
        ParamValue::Decimal(d) => render_decimal(*d, unit),
        ParamValue::Text(s) => s.clone(),
    }
}

/// Round to a number of decimal places, for display only.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Round and format a value the way summaries show quantities.
pub fn display_rounded(value: f64, places: u32) -> String {
    format_decimal(round_to(value, places))
}
