//! The four variant descriptors.

use eltek_types::Levels;

use super::{
    Detect, ParameterSpec, SnmpTree, SourceRole, TemperatureSource, Variant, VariantKind,
    SNMP_BASE,
};
use crate::data::Unit;

/// Default levels for rectifier temperature services.
pub const RECTIFIER_LEVELS: Levels = Levels::new(40.0, 50.0);

/// Default levels for battery temperature services.
pub const BATTERY_LEVELS: Levels = Levels::new(30.0, 40.0);

const MODEL_OID: &str = ".1.3.6.1.4.1.12148.10.2.6.0";

// Order is the wire order.
static STATUS_PARAMETERS: [ParameterSpec; 7] = [
    ParameterSpec::new("model_name", "2.6.0", "Model"),
    ParameterSpec::new("firmware_version", "2.7.0", "Firmware"),
    ParameterSpec::new("site_name", "2.5.0", "Site name"),
    ParameterSpec::new("system_status", "2.1.0", "System status").metric(None, 1),
    ParameterSpec::new("system_voltage", "10.5.5.0", "Voltage").metric(Some(Unit::Volt), 100),
    ParameterSpec::new("system_current_load", "9.2.5.0", "Current load")
        .metric(Some(Unit::Ampere), 10),
    ParameterSpec::new("system_ac", "3.4.1.6.1", "AC voltage").metric(Some(Unit::Volt), 100),
];

static TEMPERATURE_PARAMETERS: [ParameterSpec; 4] = [
    ParameterSpec::new("rectifier_temperature", "5.18.5.0", "Rectifier temperature")
        .metric(Some(Unit::Celsius), 1),
    ParameterSpec::new("rectifier_status", "5.18.1.0", "Rectifier status").metric(None, 1),
    ParameterSpec::new("battery_temperature", "10.7.5.0", "Battery temperature")
        .metric(Some(Unit::Celsius), 1),
    ParameterSpec::new("battery_status", "10.7.1.0", "Battery status").metric(None, 1),
];

const fn temperature_sources(rectifier: &'static str, battery: &'static str) -> [TemperatureSource; 2] {
    [
        TemperatureSource {
            role: SourceRole::Rectifier,
            label: "Rectifier",
            service: rectifier,
            temperature: "rectifier_temperature",
            status: "rectifier_status",
            default_levels: RECTIFIER_LEVELS,
        },
        TemperatureSource {
            role: SourceRole::Battery,
            label: "Battery",
            service: battery,
            temperature: "battery_temperature",
            status: "battery_status",
            default_levels: BATTERY_LEVELS,
        },
    ]
}

/// Smartpack controller status and identity.
pub static ELTEK: Variant = Variant {
    name: "eltek",
    fetch: SnmpTree {
        base: SNMP_BASE,
        parameters: &STATUS_PARAMETERS,
    },
    detect: Detect {
        oid: MODEL_OID,
        prefix: "Eltek",
    },
    kind: VariantKind::Status {
        info_service: "Eltek Info",
        status_service: "Eltek Status",
    },
};

/// Smartpack rectifier and battery temperatures.
pub static ELTEK_TEMPERATURE: Variant = Variant {
    name: "eltek_temperature",
    fetch: SnmpTree {
        base: SNMP_BASE,
        parameters: &TEMPERATURE_PARAMETERS,
    },
    detect: Detect {
        oid: MODEL_OID,
        prefix: "Eltek",
    },
    kind: VariantKind::Temperature {
        sources: temperature_sources("Rectifier Temperature", "Battery Temperature"),
    },
};

/// Flatpack2 system status and identity.
pub static FLATPACK2: Variant = Variant {
    name: "flatpack2",
    fetch: SnmpTree {
        base: SNMP_BASE,
        parameters: &STATUS_PARAMETERS,
    },
    detect: Detect {
        oid: MODEL_OID,
        prefix: "Flatpack2",
    },
    kind: VariantKind::Status {
        info_service: "Flatpack2 Info",
        status_service: "Flatpack2 Status",
    },
};

/// Flatpack2 rectifier and battery temperatures.
pub static FLATPACK2_TEMPERATURE: Variant = Variant {
    name: "flatpack2_temperature",
    fetch: SnmpTree {
        base: SNMP_BASE,
        parameters: &TEMPERATURE_PARAMETERS,
    },
    detect: Detect {
        oid: MODEL_OID,
        prefix: "Flatpack2",
    },
    kind: VariantKind::Temperature {
        sources: temperature_sources(
            "Flatpack2 Rectifier Temperature",
            "Flatpack2 Battery Temperature",
        ),
    },
};
