//! Variant descriptors for the Eltek SNMP plugins.
//!
//! A [`Variant`] bundles everything that differs between the four plugin
//! flavours: the SNMP fetch tree (base OID plus an ordered parameter
//! table), the detection predicate, the service names and the default
//! levels for temperature sources. Parsing, discovery and checks are
//! written once and driven by these descriptors.
//!
//! ## Positional contract
//!
//! The host fetches the OIDs of a [`SnmpTree`] in declaration order and
//! hands back one string per OID in that same order. The parser maps
//! position `n` of the result to `parameters[n]`, so reordering a table
//! changes the meaning of every poll.

mod tables;

pub use tables::{
    BATTERY_LEVELS, ELTEK, ELTEK_TEMPERATURE, FLATPACK2, FLATPACK2_TEMPERATURE, RECTIFIER_LEVELS,
};

use eltek_types::Levels;

use crate::data::Unit;

/// Base of all Eltek object identifiers.
pub const SNMP_BASE: &str = ".1.3.6.1.4.1.12148.10";

/// All known variants, in registration order.
pub static ALL: [&Variant; 4] = [&ELTEK, &ELTEK_TEMPERATURE, &FLATPACK2, &FLATPACK2_TEMPERATURE];

/// Look up a variant by its section name.
pub fn by_name(name: &str) -> Option<&'static Variant> {
    ALL.into_iter().find(|v| v.name == name)
}

/// Static description of one parameter read from the device.
///
/// The wire position is the index of the entry in its [`SnmpTree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Stable key used downstream.
    pub id: &'static str,
    /// OID suffix relative to the tree base.
    pub oid: &'static str,
    pub display_name: &'static str,
    /// Whether the value is ever emitted as a metric.
    pub is_metric: bool,
    pub unit: Option<Unit>,
    /// Integer readings are divided by this to recover the real quantity.
    pub divisor: u32,
}

impl ParameterSpec {
    /// A plain informational parameter.
    pub const fn new(id: &'static str, oid: &'static str, display_name: &'static str) -> Self {
        Self {
            id,
            oid,
            display_name,
            is_metric: false,
            unit: None,
            divisor: 1,
        }
    }

    /// Mark the parameter as a metric with the given unit and divisor.
    pub const fn metric(mut self, unit: Option<Unit>, divisor: u32) -> Self {
        self.is_metric = true;
        self.unit = unit;
        self.divisor = divisor;
        self
    }
}

/// An SNMP fetch declaration: a base OID and an ordered parameter table.
#[derive(Debug, Clone, Copy)]
pub struct SnmpTree {
    pub base: &'static str,
    pub parameters: &'static [ParameterSpec],
}

impl SnmpTree {
    /// Fully qualified OIDs in fetch order.
    pub fn oids(&self) -> impl Iterator<Item = String> + '_ {
        self.parameters
            .iter()
            .map(move |p| format!("{}.{}", self.base, p.oid))
    }

    /// Wire position of a parameter.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Device detection predicate evaluated by the host.
///
/// The host only hands data to a variant when the value at `oid` starts
/// with `prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detect {
    pub oid: &'static str,
    pub prefix: &'static str,
}

impl Detect {
    pub fn matches(&self, value: &str) -> bool {
        value.starts_with(self.prefix)
    }
}

/// Which physical sensor a temperature source reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRole {
    Rectifier,
    Battery,
}

/// A temperature/status pair monitored as one service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSource {
    pub role: SourceRole,
    /// Prefix used in summaries ("Rectifier", "Battery").
    pub label: &'static str,
    pub service: &'static str,
    pub temperature: &'static str,
    pub status: &'static str,
    /// Levels applied when the service has no configured levels.
    pub default_levels: Levels,
}

/// Services of a variant and how they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantKind {
    /// Fixed "info" and "status" services.
    Status {
        info_service: &'static str,
        status_service: &'static str,
    },
    /// Data-dependent temperature services.
    Temperature { sources: [TemperatureSource; 2] },
}

/// One plugin flavour.
#[derive(Debug, Clone, Copy)]
pub struct Variant {
    /// Section name the host registers this variant under.
    pub name: &'static str,
    pub fetch: SnmpTree,
    pub detect: Detect,
    pub kind: VariantKind,
}

impl Variant {
    /// Every service this variant can ever declare.
    pub fn services(&self) -> Vec<&'static str> {
        match &self.kind {
            VariantKind::Status {
                info_service,
                status_service,
            } => vec![*info_service, *status_service],
            VariantKind::Temperature { sources } => sources.iter().map(|s| s.service).collect(),
        }
    }

    /// The temperature source monitored under `service`, if any.
    pub fn temperature_source(&self, service: &str) -> Option<&TemperatureSource> {
        match &self.kind {
            VariantKind::Temperature { sources } => sources.iter().find(|s| s.service == service),
            VariantKind::Status { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_positions_follow_declaration_order() {
        for variant in ALL {
            for (n, spec) in variant.fetch.parameters.iter().enumerate() {
                assert_eq!(variant.fetch.position_of(spec.id), Some(n));
            }
        }
    }

    #[test]
    fn test_identifiers_are_unique() {
        for variant in ALL {
            let ids: HashSet<_> = variant.fetch.parameters.iter().map(|p| p.id).collect();
            assert_eq!(ids.len(), variant.fetch.len(), "{}", variant.name);
        }
    }

    #[test]
    fn test_status_oids() {
        let oids: Vec<String> = ELTEK.fetch.oids().collect();
        assert_eq!(
            oids,
            vec![
                ".1.3.6.1.4.1.12148.10.2.6.0",
                ".1.3.6.1.4.1.12148.10.2.7.0",
                ".1.3.6.1.4.1.12148.10.2.5.0",
                ".1.3.6.1.4.1.12148.10.2.1.0",
                ".1.3.6.1.4.1.12148.10.10.5.5.0",
                ".1.3.6.1.4.1.12148.10.9.2.5.0",
                ".1.3.6.1.4.1.12148.10.3.4.1.6.1",
            ]
        );
    }

    #[test]
    fn test_temperature_oids() {
        let oids: Vec<String> = ELTEK_TEMPERATURE.fetch.oids().collect();
        assert_eq!(
            oids,
            vec![
                ".1.3.6.1.4.1.12148.10.5.18.5.0",
                ".1.3.6.1.4.1.12148.10.5.18.1.0",
                ".1.3.6.1.4.1.12148.10.10.7.5.0",
                ".1.3.6.1.4.1.12148.10.10.7.1.0",
            ]
        );
    }

    #[test]
    fn test_flatpack2_shares_wire_layout() {
        let base: Vec<String> = ELTEK.fetch.oids().collect();
        let fp2: Vec<String> = FLATPACK2.fetch.oids().collect();
        assert_eq!(base, fp2);

        let base: Vec<String> = ELTEK_TEMPERATURE.fetch.oids().collect();
        let fp2: Vec<String> = FLATPACK2_TEMPERATURE.fetch.oids().collect();
        assert_eq!(base, fp2);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("eltek").map(|v| v.name), Some("eltek"));
        assert_eq!(
            by_name("flatpack2_temperature").map(|v| v.name),
            Some("flatpack2_temperature")
        );
        assert!(by_name("unknown").is_none());
    }

    #[test]
    fn test_service_names_are_unique() {
        let services: Vec<&str> = ALL.iter().flat_map(|v| v.services()).collect();
        let unique: HashSet<_> = services.iter().collect();
        assert_eq!(unique.len(), services.len());
    }

    #[test]
    fn test_detect() {
        assert!(ELTEK.detect.matches("Eltek Smartpack2"));
        assert!(!ELTEK.detect.matches("eltek"));
        assert!(FLATPACK2.detect.matches("Flatpack2 HE"));
        assert_eq!(ELTEK.detect.oid, ".1.3.6.1.4.1.12148.10.2.6.0");
    }

    #[test]
    fn test_temperature_source_lookup() {
        let source = ELTEK_TEMPERATURE
            .temperature_source("Rectifier Temperature")
            .unwrap();
        assert_eq!(source.role, SourceRole::Rectifier);
        assert_eq!(source.default_levels, Levels::new(40.0, 50.0));
        assert!(ELTEK.temperature_source("Rectifier Temperature").is_none());
        assert!(ELTEK_TEMPERATURE.temperature_source("Eltek Status").is_none());
    }
}
