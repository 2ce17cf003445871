//! One evaluated poll across all registered variants.
//!
//! Turns a raw [`PollSnapshot`] into per-section parameter maps and
//! per-service verdicts, the same way the host would run parse, discover
//! and check for every section it fetched.

use std::time::Instant;

use eltek_types::{ParameterMap, State, Verdict};
use tracing::debug;

use super::parse::parse_table;
use crate::check::{check, discover, TemperatureParams};
use crate::plugin;
use crate::source::PollSnapshot;

/// Verdict of one discovered service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResult {
    pub service: String,
    pub verdict: Verdict,
}

/// Parsed parameters and service results of one variant section.
#[derive(Debug, Clone)]
pub struct SectionReport {
    /// Variant (section) name.
    pub variant: &'static str,
    pub parameters: ParameterMap,
    pub services: Vec<ServiceResult>,
}

/// Complete evaluated poll ready for display or export.
#[derive(Debug, Clone)]
pub struct PollReport {
    pub sections: Vec<SectionReport>,
    pub last_updated: Instant,
}

impl PollReport {
    /// Evaluate every known section of a snapshot.
    ///
    /// Sections are reported in variant registration order. Sections without
    /// a matching variant are skipped.
    pub fn from_snapshot(snapshot: &PollSnapshot, levels: &TemperatureParams) -> Self {
        for name in snapshot.keys() {
            if plugin::by_name(name).is_none() {
                debug!(section = %name, "ignoring section without a matching variant");
            }
        }

        let sections = plugin::ALL
            .into_iter()
            .filter_map(|variant| {
                let table = snapshot.get(variant.name)?;
                let parameters = parse_table(table, &variant.fetch);
                let services = discover(variant, &parameters)
                    .into_iter()
                    .map(|service| ServiceResult {
                        service: service.to_string(),
                        verdict: check(variant, service, &parameters, levels),
                    })
                    .collect();

                Some(SectionReport {
                    variant: variant.name,
                    parameters,
                    services,
                })
            })
            .collect();

        Self {
            sections,
            last_updated: Instant::now(),
        }
    }

    /// All service results across sections.
    pub fn services(&self) -> impl Iterator<Item = &ServiceResult> {
        self.sections.iter().flat_map(|s| s.services.iter())
    }

    /// The state a host would report for the whole device.
    ///
    /// A poll without any discovered service is UNKNOWN.
    pub fn worst_state(&self) -> State {
        self.services()
            .map(|s| s.verdict.state)
            .max()
            .unwrap_or(State::Unknown)
    }

    /// Number of services in the given state.
    pub fn count(&self, state: State) -> usize {
        self.services().filter(|s| s.verdict.state == state).count()
    }

    /// Services not in OK state, worst first, then by name.
    pub fn unhealthy_services(&self) -> Vec<&ServiceResult> {
        let mut unhealthy: Vec<&ServiceResult> = self
            .services()
            .filter(|s| s.verdict.state != State::Ok)
            .collect();
        unhealthy.sort_by(|a, b| {
            b.verdict
                .state
                .cmp(&a.verdict.state)
                .then_with(|| a.service.cmp(&b.service))
        });
        unhealthy
    }
}
