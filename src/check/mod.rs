//! Discovery and evaluation of Eltek services.
//!
//! [`check`] is the single entry point the host calls per service. It
//! resolves the service against the variant, runs the matching evaluator
//! and converts any [`CheckError`] into an UNKNOWN verdict, so a check
//! never fails outward.

pub mod alarm;
pub mod device;
pub mod discover;
pub mod temperature;

pub use device::{evaluate_info, evaluate_status};
pub use discover::discover;
pub use temperature::TemperatureParams;

use eltek_types::{ParameterMap, Verdict};
use tracing::warn;

use crate::error::CheckError;
use crate::plugin::{Variant, VariantKind};

/// Evaluate one service of a variant.
pub fn check(
    variant: &Variant,
    service: &str,
    params: &ParameterMap,
    levels: &TemperatureParams,
) -> Verdict {
    match try_check(variant, service, params, levels) {
        Ok(verdict) => verdict,
        Err(err) => {
            warn!(variant = variant.name, service, error = %err, "check failed");
            Verdict::unknown(err.to_string())
        }
    }
}

fn try_check(
    variant: &Variant,
    service: &str,
    params: &ParameterMap,
    levels: &TemperatureParams,
) -> Result<Verdict, CheckError> {
    let unknown_service = || CheckError::UnknownService {
        service: service.to_string(),
        variant: variant.name,
    };

    match &variant.kind {
        VariantKind::Status {
            info_service,
            status_service,
        } => {
            if service == *info_service {
                Ok(evaluate_info(params))
            } else if service == *status_service {
                Ok(evaluate_status(params))
            } else {
                Err(unknown_service())
            }
        }
        VariantKind::Temperature { sources } => {
            let source = sources
                .iter()
                .find(|s| s.service == service)
                .ok_or_else(unknown_service)?;
            temperature::evaluate(source, params, levels.levels_for(source.role))
        }
    }
}
