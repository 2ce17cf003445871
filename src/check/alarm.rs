//! Status code tables.

use std::borrow::Cow;

use eltek_types::State;

/// Alarm status texts reported by temperature sources, indexed by code.
const ALARM_STATUS: [&str; 20] = [
    "Error",
    "Normal",
    "Minor alarm",
    "Major alarm",
    "Disabled",
    "Disconnected",
    "Not present",
    "Minor and major alarm",
    "Major low",
    "Minor low",
    "Major high",
    "Minor high",
    "Event",
    "Value (volt)",
    "Value (amp)",
    "Value (temperature)",
    "Value (unit)",
    "Value (percent)",
    "Critical",
    "Warning",
];

/// How an alarm code affects the state of a temperature service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmClass {
    /// Forces CRITICAL.
    Critical,
    /// Forces WARNING unless already CRITICAL.
    Warning,
    /// The sensor gave no reading: UNKNOWN, but only over an OK state.
    NoData,
    /// Leaves the state alone.
    Neutral,
}

/// Human text for an alarm code.
pub fn alarm_text(code: i64) -> Cow<'static, str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| ALARM_STATUS.get(i))
        .map(|s| Cow::Borrowed(*s))
        .unwrap_or_else(|| Cow::Owned(format!("Unknown Status ({})", code)))
}

pub fn classify(code: i64) -> AlarmClass {
    match code {
        0 | 3 | 7 | 8 | 10 | 18 => AlarmClass::Critical,
        2 | 9 | 11 | 19 => AlarmClass::Warning,
        4..=6 => AlarmClass::NoData,
        _ => AlarmClass::Neutral,
    }
}

/// Apply an alarm code on top of the state derived from the temperature.
///
/// Never lowers a state: WARNING does not replace CRITICAL and a no-data
/// code only replaces OK.
pub fn escalate(state: State, code: i64) -> State {
    match (classify(code), state) {
        (AlarmClass::Critical, _) => State::Critical,
        (AlarmClass::Warning, State::Critical) => State::Critical,
        (AlarmClass::Warning, _) => State::Warning,
        (AlarmClass::NoData, State::Ok) => State::Unknown,
        (AlarmClass::NoData, other) | (AlarmClass::Neutral, other) => other,
    }
}

/// Name of a controller system status code.
pub fn system_status_name(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("normal"),
        2 => Some("minor alarm"),
        3 => Some("major alarm"),
        _ => None,
    }
}

/// State of a controller system status code.
pub fn system_state(code: i64) -> State {
    match code {
        1 => State::Ok,
        2 => State::Warning,
        3 => State::Critical,
        _ => State::Unknown,
    }
}
