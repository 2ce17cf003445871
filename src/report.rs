//! Text and JSON rendering of evaluated polls.

use eltek_types::{Metric, State, Verdict};
use serde_json::{json, Value};

use crate::data::{render_value, PollReport};
use crate::plugin::{self, Variant};

/// One status line per service, worst state first.
///
/// `<STATE> - <service> - <summary> | name=value;warn;crit ...`
pub fn render_text(report: &PollReport) -> String {
    let mut services: Vec<_> = report.services().collect();
    services.sort_by(|a, b| b.verdict.state.cmp(&a.verdict.state));

    services
        .iter()
        .map(|s| status_line(&s.service, &s.verdict))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status line for a single service.
pub fn status_line(service: &str, verdict: &Verdict) -> String {
    let mut line = format!("{} - {} - {}", verdict.state, service, verdict.summary);
    if !verdict.metrics.is_empty() {
        let perfdata: Vec<String> = verdict.metrics.iter().map(perfdata).collect();
        line.push_str(" | ");
        line.push_str(&perfdata.join(" "));
    }
    line
}

fn perfdata(metric: &Metric) -> String {
    match metric.levels {
        Some(levels) => format!(
            "{}={};{};{}",
            metric.name, metric.value, levels.warn, levels.crit
        ),
        None => format!("{}={}", metric.name, metric.value),
    }
}

/// Build the export document for a report.
pub fn export_json(report: &PollReport) -> Value {
    let summary = json!({
        "state": report.worst_state(),
        "total_services": report.services().count(),
        "ok": report.count(State::Ok),
        "warning": report.count(State::Warning),
        "critical": report.count(State::Critical),
        "unknown": report.count(State::Unknown),
    });

    let sections: Vec<Value> = report
        .sections
        .iter()
        .map(|section| {
            let units = plugin::by_name(section.variant).map(|v| &v.fetch);
            let parameters: serde_json::Map<String, Value> = section
                .parameters
                .iter()
                .map(|(id, param)| {
                    let unit = units.and_then(|t| t.get(id)).and_then(|spec| spec.unit);
                    (
                        id.clone(),
                        json!({
                            "name": param.display_name,
                            "value": param.value,
                            "display": render_value(&param.value, unit),
                            "is_metric": param.is_metric,
                        }),
                    )
                })
                .collect();

            json!({
                "variant": section.variant,
                "parameters": parameters,
                "services": section.services.iter().map(|s| {
                    json!({
                        "service": s.service,
                        "state": s.verdict.state,
                        "summary": s.verdict.summary,
                        "metrics": s.verdict.metrics,
                    })
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    let unhealthy: Vec<Value> = report
        .unhealthy_services()
        .iter()
        .map(|s| {
            json!({
                "service": s.service,
                "state": s.verdict.state,
                "summary": s.verdict.summary,
            })
        })
        .collect();

    json!({
        "summary": summary,
        "sections": sections,
        "unhealthy": unhealthy,
    })
}

/// Fetch declaration of every variant, one OID per line.
pub fn render_oids() -> String {
    plugin::ALL
        .into_iter()
        .map(render_variant_oids)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_variant_oids(variant: &Variant) -> String {
    let mut lines = vec![format!(
        "{} (detect: {} starts with \"{}\")",
        variant.name, variant.detect.oid, variant.detect.prefix
    )];
    for (position, (oid, spec)) in variant
        .fetch
        .oids()
        .zip(variant.fetch.parameters)
        .enumerate()
    {
        let mut line = format!("  {:>2} {:<34} {}", position, oid, spec.id);
        if spec.divisor != 1 {
            line.push_str(&format!(" /{}", spec.divisor));
        }
        if let Some(unit) = spec.unit {
            line.push_str(&format!(" [{}]", unit.symbol()));
        }
        lines.push(line);
    }
    lines.join("\n")
}
