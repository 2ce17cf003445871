//! Positional parsing of raw SNMP values.

use eltek_types::{ParamValue, ParameterMap, ParsedParameter};
use tracing::debug;

use crate::error::ParseError;
use crate::plugin::{ParameterSpec, SnmpTree};

/// Parse one row of raw values against a fetch tree.
///
/// Position `n` of `raw` belongs to `tree.parameters[n]`. Positions past the
/// end of `raw` are left out of the map, as are values that fail to coerce.
/// An empty row yields an empty map.
pub fn parse<S: AsRef<str>>(raw: &[S], tree: &SnmpTree) -> ParameterMap {
    if raw.is_empty() {
        debug!("empty poll result");
        return ParameterMap::new();
    }

    tree.parameters
        .iter()
        .enumerate()
        .filter_map(|(position, spec)| {
            let Some(value) = raw.get(position) else {
                debug!(parameter = spec.id, position, "value missing from poll result");
                return None;
            };
            match coerce(value.as_ref(), spec) {
                Ok(value) => Some((
                    spec.id.to_string(),
                    ParsedParameter::new(value, spec.display_name, spec.is_metric),
                )),
                Err(e) => {
                    debug!(parameter = spec.id, error = %e, "skipping parameter");
                    None
                }
            }
        })
        .collect()
}

/// Parse a host string table, which carries the values in its first row.
pub fn parse_table<S: AsRef<str>>(table: &[Vec<S>], tree: &SnmpTree) -> ParameterMap {
    match table.first() {
        Some(row) => parse(row, tree),
        None => {
            debug!("empty string table");
            ParameterMap::new()
        }
    }
}

/// Coerce a single raw value.
///
/// Integers stay integers when the divisor is one and are scaled into
/// decimals otherwise. Anything else is kept as text, with empty strings
/// replaced by the `"N/A"` sentinel.
pub fn coerce(raw: &str, spec: &ParameterSpec) -> Result<ParamValue, ParseError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if spec.divisor == 1 => Ok(ParamValue::Integer(value)),
        Ok(_) if spec.divisor == 0 => Err(ParseError::ZeroDivisor { parameter: spec.id }),
        Ok(value) => Ok(ParamValue::Decimal(value as f64 / f64::from(spec.divisor))),
        Err(_) if trimmed.is_empty() => Ok(ParamValue::not_available()),
        Err(_) => Ok(ParamValue::Text(raw.to_string())),
    }
}
