//! Service discovery.

use eltek_types::ParameterMap;
use tracing::debug;

use crate::plugin::{Variant, VariantKind};

/// Services to monitor for a device, given its parsed parameters.
///
/// Status variants declare their two fixed services whenever any data was
/// parsed. Temperature variants declare one service per source whose
/// temperature reading is present and not `"N/A"`.
pub fn discover(variant: &Variant, params: &ParameterMap) -> Vec<&'static str> {
    let services: Vec<&'static str> = match &variant.kind {
        VariantKind::Status {
            info_service,
            status_service,
        } => {
            if params.is_empty() {
                Vec::new()
            } else {
                vec![*info_service, *status_service]
            }
        }
        VariantKind::Temperature { sources } => sources
            .iter()
            .filter(|s| params.is_available(s.temperature))
            .map(|s| s.service)
            .collect(),
    };

    debug!(variant = variant.name, ?services, "discovered services");
    services
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse;
    use crate::plugin::{ELTEK, ELTEK_TEMPERATURE, FLATPACK2, FLATPACK2_TEMPERATURE};

    #[test]
    fn test_status_services() {
        let params = parse(&["EL-1"], &ELTEK.fetch);
        assert_eq!(discover(&ELTEK, &params), vec!["Eltek Info", "Eltek Status"]);
        assert_eq!(
            discover(&FLATPACK2, &params),
            vec!["Flatpack2 Info", "Flatpack2 Status"]
        );
    }

    #[test]
    fn test_status_no_data() {
        assert!(discover(&ELTEK, &ParameterMap::new()).is_empty());
    }

    #[test]
    fn test_rectifier_only() {
        let params = parse(&["55", "3", "N/A", "N/A"], &ELTEK_TEMPERATURE.fetch);
        assert_eq!(
            discover(&ELTEK_TEMPERATURE, &params),
            vec!["Rectifier Temperature"]
        );
    }

    #[test]
    fn test_battery_only() {
        let params = parse(&["", "", "25", "1"], &ELTEK_TEMPERATURE.fetch);
        assert_eq!(discover(&ELTEK_TEMPERATURE, &params), vec!["Battery Temperature"]);
    }

    #[test]
    fn test_both_sources() {
        let params = parse(&["30", "1", "25", "1"], &FLATPACK2_TEMPERATURE.fetch);
        assert_eq!(
            discover(&FLATPACK2_TEMPERATURE, &params),
            vec![
                "Flatpack2 Rectifier Temperature",
                "Flatpack2 Battery Temperature"
            ]
        );
    }

    #[test]
    fn test_no_sensors() {
        let params = parse(&["N/A", "1", "N/A", "1"], &ELTEK_TEMPERATURE.fetch);
        assert!(discover(&ELTEK_TEMPERATURE, &params).is_empty());
        assert!(discover(&ELTEK_TEMPERATURE, &ParameterMap::new()).is_empty());
    }
}
