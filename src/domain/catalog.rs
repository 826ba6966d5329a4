use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NORMAL_TIMELINE: &str = "normal";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasePackage {
    pub min: u64,
    pub max: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub price: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

/// How an additional service is charged.
///
/// Only `Flat` and `Range` are one-time costs; the other kinds are shown to
/// the visitor but never folded into the estimate. Parsed from and written
/// back to the catalog's price strings (see `core::price`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServicePrice {
    Flat(u64),
    Range { min: u64, max: u64 },
    Percentage(u32),
    Recurring { min: u64, max: Option<u64> },
    /// Monthly fee taken from `maintenance_pricing` for the selected category.
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub price: ServicePrice,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalog {
    pub base_packages: BTreeMap<String, BasePackage>,
    #[serde(default)]
    pub features: BTreeMap<String, Feature>,
    #[serde(default)]
    pub additional_services: BTreeMap<String, AdditionalService>,
    pub timeline_multipliers: BTreeMap<String, f64>,
    #[serde(default)]
    pub maintenance_pricing: BTreeMap<String, u64>,
}

impl PriceCatalog {
    pub fn base_package(&self, project_type: &str) -> Option<&BasePackage> {
        self.base_packages.get(project_type)
    }

    /// Unknown timeline keys price at 1.0.
    pub fn timeline_multiplier(&self, timeline: &str) -> f64 {
        self.timeline_multipliers
            .get(timeline)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn maintenance_fee(&self, project_type: &str) -> Option<u64> {
        self.maintenance_pricing.get(project_type).copied()
    }
}

fn package(min: u64, max: u64, name: &str) -> BasePackage {
    BasePackage {
        min,
        max,
        name: name.to_string(),
    }
}

fn feature(price: u64, name: &str, description: &str, category: &str) -> Feature {
    Feature {
        price,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
    }
}

fn service(price: ServicePrice, name: &str, description: &str) -> AdditionalService {
    AdditionalService {
        price,
        name: name.to_string(),
        description: description.to_string(),
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        let base_packages = BTreeMap::from([
            ("personal".to_string(), package(300, 500, "Personal Website")),
            ("business".to_string(), package(500, 800, "Business Website")),
            ("ecommerce".to_string(), package(800, 1500, "E-commerce Store")),
            ("saas".to_string(), package(2000, 5000, "SaaS Application")),
            ("enterprise".to_string(), package(5000, 15000, "Enterprise Solution")),
        ]);

        let features = BTreeMap::from([
            (
                "blog".to_string(),
                feature(100, "Blog", "Articles with categories and RSS", "content"),
            ),
            (
                "contact_form".to_string(),
                feature(50, "Contact Form", "Validated form with email delivery", "functionality"),
            ),
            (
                "cms".to_string(),
                feature(200, "Content Management", "Edit pages without touching code", "content"),
            ),
            (
                "seo".to_string(),
                feature(150, "SEO Optimisation", "Metadata, sitemap and structured data", "marketing"),
            ),
            (
                "analytics".to_string(),
                feature(75, "Analytics", "Privacy-friendly visitor analytics", "marketing"),
            ),
            (
                "auth".to_string(),
                feature(250, "User Accounts", "Sign-up, login and password reset", "functionality"),
            ),
            (
                "payments".to_string(),
                feature(300, "Payment Integration", "Stripe checkout and webhooks", "functionality"),
            ),
            (
                "multilingual".to_string(),
                feature(200, "Multi-language", "Translated content and locale routing", "content"),
            ),
        ]);

        let additional_services = BTreeMap::from([
            (
                "logo_design".to_string(),
                service(ServicePrice::Flat(150), "Logo Design", "A simple wordmark or icon"),
            ),
            (
                "copywriting".to_string(),
                service(
                    ServicePrice::Range { min: 100, max: 500 },
                    "Copywriting",
                    "Page copy written for your audience",
                ),
            ),
            (
                "hosting_setup".to_string(),
                service(ServicePrice::Flat(50), "Hosting Setup", "Domain, DNS and deployment"),
            ),
            (
                "priority_support".to_string(),
                service(
                    ServicePrice::Percentage(15),
                    "Priority Support",
                    "Same-day responses during the build",
                ),
            ),
            (
                "seo_retainer".to_string(),
                service(
                    ServicePrice::Recurring {
                        min: 50,
                        max: Some(300),
                    },
                    "SEO Retainer",
                    "Monthly content and ranking work",
                ),
            ),
            (
                "maintenance".to_string(),
                service(
                    ServicePrice::Maintenance,
                    "Ongoing Maintenance",
                    "Updates, backups and security patches",
                ),
            ),
        ]);

        let timeline_multipliers = BTreeMap::from([
            ("rush".to_string(), 1.3),
            (NORMAL_TIMELINE.to_string(), 1.0),
            ("flexible".to_string(), 0.9),
        ]);

        let maintenance_pricing = BTreeMap::from([
            ("personal".to_string(), 50),
            ("business".to_string(), 100),
            ("ecommerce".to_string(), 150),
            ("saas".to_string(), 300),
            ("enterprise".to_string(), 500),
        ]);

        Self {
            base_packages,
            features,
            additional_services,
            timeline_multipliers,
            maintenance_pricing,
        }
    }
}
