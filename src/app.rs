//! Doctor state: a data source, the configured levels and the last report.

use anyhow::Result;
use eltek_types::State;
use tracing::debug;

use crate::check::TemperatureParams;
use crate::data::PollReport;
use crate::source::DataSource;

/// Owns a data source and evaluates every snapshot it produces.
pub struct Doctor {
    source: Box<dyn DataSource>,
    pub params: TemperatureParams,
    pub report: Option<PollReport>,
    pub load_error: Option<String>,
}

impl Doctor {
    /// Create a new Doctor with the given data source and levels.
    pub fn new(source: Box<dyn DataSource>, params: TemperatureParams) -> Self {
        Self {
            source,
            params,
            report: None,
            load_error: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if a new snapshot was evaluated, Ok(false) if there
    /// was nothing new. A failed read keeps the previous report and records
    /// the source error in `load_error`.
    pub fn reload_data(&mut self) -> Result<bool> {
        if let Some(snapshot) = self.source.poll() {
            let report = PollReport::from_snapshot(&snapshot, &self.params);
            debug!(
                source = self.source.description(),
                sections = report.sections.len(),
                "evaluated snapshot"
            );
            self.report = Some(report);
            self.load_error = None;
            return Ok(true);
        }

        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        Ok(false)
    }

    /// True once the source can deliver nothing more.
    pub fn is_exhausted(&self) -> bool {
        self.source.is_exhausted()
    }

    /// State of the whole device, UNKNOWN until a snapshot was evaluated.
    pub fn state(&self) -> State {
        self.report
            .as_ref()
            .map_or(State::Unknown, PollReport::worst_state)
    }
}

impl std::fmt::Debug for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doctor")
            .field("source", &self.source.description())
            .field("params", &self.params)
            .field("has_report", &self.report.is_some())
            .field("load_error", &self.load_error)
            .finish()
    }
}
