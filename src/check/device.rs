//! Controller identity and system status checks.

use eltek_types::{Metric, ParamValue, ParameterMap, State, Verdict};

use super::alarm::{system_state, system_status_name};
use crate::data::display_rounded;

const MODEL_NAME: &str = "model_name";
const FIRMWARE_VERSION: &str = "firmware_version";
const SITE_NAME: &str = "site_name";
const SYSTEM_STATUS: &str = "system_status";
const SYSTEM_VOLTAGE: &str = "system_voltage";
const SYSTEM_CURRENT_LOAD: &str = "system_current_load";
const SYSTEM_AC: &str = "system_ac";

/// Summary line with model, firmware and site name.
///
/// Always OK when any data was parsed; missing fields read "Unknown".
pub fn evaluate_info(params: &ParameterMap) -> Verdict {
    if params.is_empty() {
        return Verdict::unknown("No data");
    }

    let text = |id: &str| {
        params
            .value(id)
            .map(ToString::to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    };

    Verdict::new(
        State::Ok,
        format!(
            "Model: {}, Firmware: {}, Site name: {}",
            text(MODEL_NAME),
            text(FIRMWARE_VERSION),
            text(SITE_NAME)
        ),
    )
}

/// System status with voltage, load and AC readings.
///
/// Missing numeric readings default to zero and all four metrics are
/// always emitted. Rounding applies to the summary only.
pub fn evaluate_status(params: &ParameterMap) -> Verdict {
    if params.is_empty() {
        return Verdict::unknown("No data");
    }

    let number = |id: &str| params.value(id).and_then(ParamValue::as_f64).unwrap_or(0.0);
    let voltage = number(SYSTEM_VOLTAGE);
    let current_load = number(SYSTEM_CURRENT_LOAD);
    let ac = number(SYSTEM_AC);

    let (code, status_text, state) = match params.value(SYSTEM_STATUS) {
        None => (0, describe_code(0), system_state(0)),
        Some(value) => match value.as_i64() {
            Some(code) => (code, describe_code(code), system_state(code)),
            None => (0, format!("unparseable ({})", value), State::Unknown),
        },
    };

    let summary = format!(
        "Status: {}, AC: {}V, Voltage: {}V, Current load: {}A",
        status_text,
        display_rounded(ac, 1),
        display_rounded(voltage, 2),
        display_rounded(current_load, 2)
    );

    Verdict::new(state, summary)
        .with_metric(Metric::new(SYSTEM_STATUS, code as f64))
        .with_metric(Metric::new(SYSTEM_VOLTAGE, voltage))
        .with_metric(Metric::new(SYSTEM_CURRENT_LOAD, current_load))
        .with_metric(Metric::new(SYSTEM_AC, ac))
}

fn describe_code(code: i64) -> String {
    system_status_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("unknown ({})", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse;
    use crate::plugin::ELTEK;

    fn status_params(raw: &[&str]) -> ParameterMap {
        parse(raw, &ELTEK.fetch)
    }

    #[test]
    fn test_info_summary() {
        let params = status_params(&["EL-1", "1.2.3", "SiteA", "1", "1205", "102", "2300"]);
        let verdict = evaluate_info(&params);
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.summary, "Model: EL-1, Firmware: 1.2.3, Site name: SiteA");
        assert!(verdict.metrics.is_empty());
    }

    #[test]
    fn test_info_missing_fields() {
        let params = status_params(&["EL-1"]);
        let verdict = evaluate_info(&params);
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(
            verdict.summary,
            "Model: EL-1, Firmware: Unknown, Site name: Unknown"
        );
    }

    #[test]
    fn test_info_no_data() {
        let verdict = evaluate_info(&ParameterMap::new());
        assert_eq!(verdict.state, State::Unknown);
    }

    #[test]
    fn test_status_normal() {
        let params = status_params(&["EL-1", "1.2.3", "SiteA", "1", "1205", "102", "2300"]);
        let verdict = evaluate_status(&params);

        assert_eq!(verdict.state, State::Ok);
        assert_eq!(
            verdict.summary,
            "Status: normal, AC: 23.0V, Voltage: 12.05V, Current load: 10.2A"
        );
        let values: Vec<f64> = verdict.metrics.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![1.0, 12.05, 10.2, 23.0]);
        let names: Vec<&str> = verdict.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["system_status", "system_voltage", "system_current_load", "system_ac"]
        );
    }

    #[test]
    fn test_status_codes() {
        for (code, state) in [
            ("2", State::Warning),
            ("3", State::Critical),
            ("0", State::Unknown),
            ("4", State::Unknown),
            ("-1", State::Unknown),
        ] {
            let params = status_params(&["EL-1", "1.2.3", "SiteA", code, "1205", "102", "2300"]);
            assert_eq!(evaluate_status(&params).state, state, "code {}", code);
        }
    }

    #[test]
    fn test_status_rounding_is_display_only() {
        let params = status_params(&["EL-1", "1.2.3", "SiteA", "1", "5437", "1234", "23049"]);
        let verdict = evaluate_status(&params);
        assert!(verdict.summary.contains("AC: 230.5V"));
        assert!(verdict.summary.contains("Voltage: 54.37V"));
        assert!(verdict.summary.contains("Current load: 123.4A"));
        assert_eq!(verdict.metric("system_ac").unwrap().value, 230.49);
    }

    #[test]
    fn test_status_defaults_missing_readings() {
        let params = status_params(&["EL-1", "1.2.3", "SiteA", "1"]);
        let verdict = evaluate_status(&params);
        assert_eq!(verdict.state, State::Ok);
        assert_eq!(verdict.metrics.len(), 4);
        assert_eq!(verdict.metric("system_voltage").unwrap().value, 0.0);
        assert!(verdict.summary.contains("Voltage: 0.0V"));
    }

    #[test]
    fn test_status_unparseable_code() {
        let params = status_params(&["EL-1", "1.2.3", "SiteA", "ok", "1205", "102", "2300"]);
        let verdict = evaluate_status(&params);
        assert_eq!(verdict.state, State::Unknown);
        assert!(verdict.summary.starts_with("Status: unparseable (ok)"));
        assert_eq!(verdict.metric("system_status").unwrap().value, 0.0);
        assert_eq!(verdict.metrics.len(), 4);
    }

    #[test]
    fn test_status_no_data() {
        let verdict = evaluate_status(&ParameterMap::new());
        assert_eq!(verdict.state, State::Unknown);
        assert!(verdict.metrics.is_empty());
    }
}
