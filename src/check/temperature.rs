//! Rectifier and battery temperature checks.

use eltek_types::{Levels, Metric, ParamValue, ParameterMap, State, Verdict};
use serde::{Deserialize, Serialize};

use super::alarm::{alarm_text, escalate};
use crate::data::{render_decimal, Unit};
use crate::error::CheckError;
use crate::plugin::{SourceRole, TemperatureSource};

/// Configured levels per temperature source.
///
/// Unset sources fall back to the variant defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureParams {
    #[serde(default)]
    pub rectifier: Option<Levels>,
    #[serde(default)]
    pub battery: Option<Levels>,
}

impl TemperatureParams {
    pub fn levels_for(&self, role: SourceRole) -> Option<Levels> {
        match role {
            SourceRole::Rectifier => self.rectifier,
            SourceRole::Battery => self.battery,
        }
    }
}

/// Evaluate one temperature source.
///
/// The temperature sets the initial state against the levels; the alarm
/// code can only raise it afterwards. Readings holding the `"N/A"`
/// sentinel count as absent, other text is echoed without affecting the
/// state.
pub fn evaluate(
    source: &TemperatureSource,
    params: &ParameterMap,
    levels: Option<Levels>,
) -> Result<Verdict, CheckError> {
    let levels = levels.unwrap_or(source.default_levels);
    if !levels.is_finite() {
        return Err(CheckError::InvalidLevels {
            service: source.service,
            warn: levels.warn,
            crit: levels.crit,
        });
    }

    let mut state = State::Ok;
    let mut clauses: Vec<String> = Vec::new();
    let mut temperature_metric = None;
    let mut status_metric = None;

    if let Some(value) = reading(params, source.temperature) {
        match value.as_f64() {
            Some(temp) => {
                clauses.push(render_decimal(temp, Some(Unit::Celsius)));
                state = levels.state_of(temp);
                temperature_metric =
                    Some(Metric::new(source.temperature, temp).with_levels(levels));
            }
            None => clauses.push(value.to_string()),
        }
    }

    if let Some(value) = reading(params, source.status) {
        match value.as_i64() {
            Some(code) => {
                clauses.push(alarm_text(code).into_owned());
                state = escalate(state, code);
                status_metric = Some(Metric::new(source.status, code as f64));
            }
            None => clauses.push(value.to_string()),
        }
    }

    if clauses.is_empty() {
        return Ok(Verdict::unknown(format!("No data for {}", source.label)));
    }

    let mut verdict = Verdict::new(state, format!("{}: {}", source.label, clauses.join(", ")));
    verdict.metrics.extend(temperature_metric);
    verdict.metrics.extend(status_metric);
    Ok(verdict)
}

fn reading<'a>(params: &'a ParameterMap, id: &str) -> Option<&'a ParamValue> {
    params.value(id).filter(|v| !v.is_not_available())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse;
    use crate::plugin::{BATTERY_LEVELS, ELTEK_TEMPERATURE};

    fn rectifier() -> &'static TemperatureSource {
        ELTEK_TEMPERATURE
            .temperature_source("Rectifier Temperature")
            .unwrap()
    }

    fn battery() -> &'static TemperatureSource {
        ELTEK_TEMPERATURE
            .temperature_source("Battery Temperature")
            .unwrap()
    }

    fn params(raw: &[&str]) -> ParameterMap {
        parse(raw, &ELTEK_TEMPERATURE.fetch)
    }

    fn state_for(temp: &str) -> State {
        evaluate(rectifier(), &params(&[temp, "1"]), None).unwrap().state
    }

    #[test]
    fn test_temperature_levels() {
        assert_eq!(state_for("39"), State::Ok);
        assert_eq!(state_for("40"), State::Ok);
        assert_eq!(state_for("45"), State::Warning);
        assert_eq!(state_for("50"), State::Warning);
        assert_eq!(state_for("51"), State::Critical);
    }

    #[test]
    fn test_decimal_temperature_levels() {
        let source = rectifier();
        let levels = Some(Levels::new(40.0, 50.0));
        for (temp, expected) in [
            (39.9, State::Ok),
            (45.0, State::Warning),
            (50.0, State::Warning),
            (50.1, State::Critical),
        ] {
            let params: ParameterMap = [(
                "rectifier_temperature".to_string(),
                eltek_types::ParsedParameter::new(ParamValue::Decimal(temp), "Rectifier temperature", true),
            )]
            .into_iter()
            .collect();
            assert_eq!(evaluate(source, &params, levels).unwrap().state, expected, "{}", temp);
        }
    }

    #[test]
    fn test_critical_temperature_and_alarm() {
        let verdict = evaluate(rectifier(), &params(&["55", "3", "N/A", "N/A"]), None).unwrap();
        assert_eq!(verdict.state, State::Critical);
        assert_eq!(verdict.summary, "Rectifier: 55.0°C, Major alarm");

        let temp = verdict.metric("rectifier_temperature").unwrap();
        assert_eq!(temp.value, 55.0);
        assert_eq!(temp.levels, Some(Levels::new(40.0, 50.0)));
        assert_eq!(verdict.metric("rectifier_status").unwrap().value, 3.0);
    }

    #[test]
    fn test_alarm_raises_ok_temperature() {
        let verdict = evaluate(rectifier(), &params(&["20", "11"]), None).unwrap();
        assert_eq!(verdict.state, State::Warning);
        assert_eq!(verdict.summary, "Rectifier: 20.0°C, Minor high");
    }

    #[test]
    fn test_no_data_code_keeps_warning() {
        let verdict = evaluate(rectifier(), &params(&["45", "5"]), None).unwrap();
        assert_eq!(verdict.state, State::Warning);

        let verdict = evaluate(rectifier(), &params(&["55", "6"]), None).unwrap();
        assert_eq!(verdict.state, State::Critical);

        let verdict = evaluate(rectifier(), &params(&["20", "4"]), None).unwrap();
        assert_eq!(verdict.state, State::Unknown);
    }

    #[test]
    fn test_warning_code_keeps_critical() {
        let verdict = evaluate(rectifier(), &params(&["55", "19"]), None).unwrap();
        assert_eq!(verdict.state, State::Critical);
    }

    #[test]
    fn test_status_only() {
        let verdict = evaluate(rectifier(), &params(&["", "1"]), None).unwrap();
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.summary, "Rectifier: Normal");
        assert!(verdict.metric("rectifier_temperature").is_none());
        assert_eq!(verdict.metrics.len(), 1);
    }

    #[test]
    fn test_unknown_alarm_code() {
        let verdict = evaluate(rectifier(), &params(&["25", "42"]), None).unwrap();
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.summary, "Rectifier: 25.0°C, Unknown Status (42)");
    }

    #[test]
    fn test_text_readings_are_echoed() {
        let verdict = evaluate(rectifier(), &params(&["hot", "alarm"]), None).unwrap();
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.summary, "Rectifier: hot, alarm");
        assert!(verdict.metrics.is_empty());
    }

    #[test]
    fn test_battery_defaults() {
        let verdict = evaluate(battery(), &params(&["N/A", "N/A", "35", "1"]), None).unwrap();
        assert_eq!(verdict.state, State::Warning);
        assert_eq!(
            verdict.metric("battery_temperature").unwrap().levels,
            Some(BATTERY_LEVELS)
        );
    }

    #[test]
    fn test_configured_levels() {
        let levels = Some(Levels::new(60.0, 70.0));
        let verdict = evaluate(rectifier(), &params(&["55", "1"]), levels).unwrap();
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.metric("rectifier_temperature").unwrap().levels, levels);
    }

    #[test]
    fn test_no_data() {
        let verdict = evaluate(battery(), &params(&["55", "3", "N/A", "N/A"]), None).unwrap();
        assert_eq!(verdict.state, State::Unknown);
        assert_eq!(verdict.summary, "No data for Battery");
        assert!(verdict.metrics.is_empty());

        let verdict = evaluate(rectifier(), &ParameterMap::new(), None).unwrap();
        assert_eq!(verdict.summary, "No data for Rectifier");
    }

    #[test]
    fn test_invalid_levels() {
        let err = evaluate(rectifier(), &params(&["55", "1"]), Some(Levels::new(f64::NAN, 50.0)))
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidLevels { .. }));
    }

    #[test]
    fn test_params_lookup() {
        let params = TemperatureParams {
            rectifier: Some(Levels::new(1.0, 2.0)),
            battery: None,
        };
        assert_eq!(params.levels_for(SourceRole::Rectifier), Some(Levels::new(1.0, 2.0)));
        assert_eq!(params.levels_for(SourceRole::Battery), None);
    }
}
