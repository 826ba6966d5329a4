use crate::domain::catalog::PriceCatalog;
use crate::domain::model::{EstimateRequest, EstimateResult};

/// Price range for the visitor's current selections.
///
/// Returns [`EstimateResult::PENDING`] until a known category is chosen.
/// Unknown feature or service keys cost nothing.
pub fn compute_estimate(catalog: &PriceCatalog, request: &EstimateRequest) -> EstimateResult {
    let Some(base) = catalog.base_package(&request.project_type) else {
        if request.has_project_type() {
            tracing::debug!(project_type = %request.project_type, "unknown project type, no estimate");
        }
        return EstimateResult::PENDING;
    };

    let extras = feature_total(catalog, request).saturating_add(service_total(catalog, request));
    let multiplier = catalog.timeline_multiplier(&request.timeline);

    EstimateResult {
        min: scale(base.min.saturating_add(extras), multiplier),
        max: scale(base.max.saturating_add(extras), multiplier),
    }
}

fn feature_total(catalog: &PriceCatalog, request: &EstimateRequest) -> u64 {
    request
        .selected_features
        .iter()
        .filter_map(|key| match catalog.features.get(key) {
            Some(feature) => Some(feature.price),
            None => {
                tracing::debug!(feature = %key, "ignoring unknown feature");
                None
            }
        })
        .fold(0, u64::saturating_add)
}

fn service_total(catalog: &PriceCatalog, request: &EstimateRequest) -> u64 {
    request
        .selected_additional_services
        .iter()
        .filter_map(|key| match catalog.additional_services.get(key) {
            Some(service) => service.price.one_time_amount(),
            None => {
                tracing::debug!(service = %key, "ignoring unknown additional service");
                None
            }
        })
        .fold(0, u64::saturating_add)
}

// Whole pounds, half rounds up. The cast saturates at u64::MAX.
fn scale(amount: u64, multiplier: f64) -> u64 {
    (amount as f64 * multiplier).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_blog_rush() {
        let catalog = PriceCatalog::default();
        let request = EstimateRequest::new("business")
            .with_features(["blog"])
            .with_timeline("rush");

        let result = compute_estimate(&catalog, &request);

        assert_eq!(result, EstimateResult { min: 780, max: 1170 });
    }

    #[test]
    fn test_empty_project_type_is_pending() {
        let catalog = PriceCatalog::default();
        let request = EstimateRequest::new("")
            .with_features(["blog", "seo"])
            .with_timeline("rush");

        let result = compute_estimate(&catalog, &request);
        assert!(result.is_pending());
    }

    #[test]
    fn test_unknown_project_type_is_pending() {
        let catalog = PriceCatalog::default();
        let result = compute_estimate(&catalog, &EstimateRequest::new("spaceship"));
        assert_eq!(result, EstimateResult::PENDING);
    }

    #[test]
    fn test_range_service_adds_its_minimum() {
        let catalog = PriceCatalog::default();
        let request = EstimateRequest::new("personal").with_services(["copywriting"]);

        let result = compute_estimate(&catalog, &request);
        assert_eq!(result, EstimateResult { min: 400, max: 600 });
    }

    #[test]
    fn test_displayed_only_services_do_not_change_total() {
        let catalog = PriceCatalog::default();
        let plain = compute_estimate(&catalog, &EstimateRequest::new("saas"));
        let with_extras = compute_estimate(
            &catalog,
            &EstimateRequest::new("saas").with_services(["priority_support", "seo_retainer", "maintenance"]),
        );
        assert_eq!(plain, with_extras);
    }

    #[test]
    fn test_unknown_timeline_uses_unit_multiplier() {
        let catalog = PriceCatalog::default();
        let result = compute_estimate(
            &catalog,
            &EstimateRequest::new("business").with_timeline("yesterday"),
        );
        assert_eq!(result, EstimateResult { min: 500, max: 800 });
    }

    #[test]
    fn test_flexible_rounds_to_whole_pounds() {
        let catalog = PriceCatalog::default();
        let request = EstimateRequest::new("business")
            .with_features(["analytics"])
            .with_timeline("flexible");

        // (575, 875) * 0.9 = (517.5, 787.5)
        let result = compute_estimate(&catalog, &request);
        assert_eq!(result, EstimateResult { min: 518, max: 788 });
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_overflowing() {
        let mut catalog = PriceCatalog::default();
        if let Some(feature) = catalog.features.get_mut("blog") {
            feature.price = u64::MAX;
        }
        let request = EstimateRequest::new("business")
            .with_features(["blog", "seo"])
            .with_services(["logo_design"])
            .with_timeline("rush");

        let result = compute_estimate(&catalog, &request);
        assert_eq!(result, EstimateResult { min: u64::MAX, max: u64::MAX });
    }
}
