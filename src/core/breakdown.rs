use crate::core::price::monthly_fee_label;
use crate::domain::catalog::{PriceCatalog, NORMAL_TIMELINE};
use crate::domain::model::{BreakdownLine, EstimateRequest};

/// Line items behind [`compute_estimate`](crate::core::estimate::compute_estimate).
///
/// Order: base package, features and services in selection order, timeline
/// adjustment (skipped for `normal`), maintenance. Empty until a known
/// category is chosen.
pub fn compute_breakdown(catalog: &PriceCatalog, request: &EstimateRequest) -> Vec<BreakdownLine> {
    let Some(base) = catalog.base_package(&request.project_type) else {
        return Vec::new();
    };
    let maintenance_fee = catalog.maintenance_fee(&request.project_type);

    let mut lines = Vec::with_capacity(
        1 + request.selected_features.len() + request.selected_additional_services.len() + 2,
    );

    lines.push(BreakdownLine {
        item: base.name.clone(),
        price: format!("£{}-£{}", base.min, base.max),
        included_in_total: true,
    });

    for key in &request.selected_features {
        lines.push(match catalog.features.get(key) {
            Some(feature) => BreakdownLine {
                item: feature.name.clone(),
                price: format!("£{}", feature.price),
                included_in_total: true,
            },
            None => unknown_line(key),
        });
    }

    for key in &request.selected_additional_services {
        lines.push(match catalog.additional_services.get(key) {
            Some(service) => BreakdownLine {
                item: service.name.clone(),
                price: service.price.display(maintenance_fee),
                included_in_total: service.price.one_time_amount().is_some(),
            },
            None => unknown_line(key),
        });
    }

    if request.timeline != NORMAL_TIMELINE {
        lines.push(BreakdownLine {
            item: format!("{} timeline adjustment", capitalize(&request.timeline)),
            price: percent_change(catalog.timeline_multiplier(&request.timeline)),
            included_in_total: true,
        });
    }

    if request.needs_maintenance {
        lines.push(BreakdownLine {
            item: format!("{} maintenance", request.project_type),
            price: monthly_fee_label(maintenance_fee),
            included_in_total: false,
        });
    }

    lines
}

fn unknown_line(key: &str) -> BreakdownLine {
    BreakdownLine {
        item: key.to_string(),
        price: "£0".to_string(),
        included_in_total: false,
    }
}

fn percent_change(multiplier: f64) -> String {
    let pct = ((multiplier - 1.0) * 100.0).round() as i64;
    if pct >= 0 {
        format!("+{}%", pct)
    } else {
        format!("{}%", pct)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
