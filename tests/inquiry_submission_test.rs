use anyhow::Result;
use hire_estimator::domain::ports::InquirySink;
use hire_estimator::{
    EstimateRequest, EstimatorConfig, EstimatorError, HttpInquirySink, InquiryFlow, InquiryForm,
    Notification, PriceCatalog,
};
use httpmock::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn bakery_inquiry() -> InquiryForm {
    InquiryForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        company: Some("Doe's Bakery".to_string()),
        phone: None,
        project_description: "A site for my bakery with a blog".to_string(),
        request: EstimateRequest::new("business")
            .with_features(["blog"])
            .with_timeline("rush"),
    }
}

#[tokio::test]
async fn test_submit_posts_estimate_and_breakdown() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/inquiries")
            .header("content-type", "application/json")
            .json_body_partial(
                r#"{
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "company": "Doe's Bakery",
                    "projectType": "business",
                    "selectedFeatures": ["blog"],
                    "timeline": "rush",
                    "estimate": { "min": 780, "max": 1170 }
                }"#,
            );
        then.status(201)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "id": "inq_42" }));
    });

    let catalog = PriceCatalog::default();
    let flow = InquiryFlow::new(&catalog, HttpInquirySink::new(server.url("/api/inquiries")));

    let notification = flow.submit(&bakery_inquiry()).await?;

    api_mock.assert();
    match notification {
        Notification::Success { reference, .. } => assert_eq!(reference.as_deref(), Some("inq_42")),
        other => panic!("expected success, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_breakdown_lines_are_sent_in_order() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/inquiries").json_body_partial(
            r#"{
                "breakdown": [
                    { "item": "Business Website", "price": "£500-£800", "includedInTotal": true },
                    { "item": "Blog", "price": "£100", "includedInTotal": true },
                    { "item": "Rush timeline adjustment", "price": "+30%", "includedInTotal": true }
                ]
            }"#,
        );
        then.status(204);
    });

    let catalog = PriceCatalog::default();
    let flow = InquiryFlow::new(&catalog, HttpInquirySink::new(server.url("/api/inquiries")));

    let notification = flow.submit(&bakery_inquiry()).await?;

    api_mock.assert();
    assert!(notification.is_success());
    Ok(())
}

#[tokio::test]
async fn test_server_error_becomes_notification_without_retry() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/inquiries");
        then.status(500).body("database unavailable");
    });

    let catalog = PriceCatalog::default();
    let flow = InquiryFlow::new(&catalog, HttpInquirySink::new(server.url("/api/inquiries")));

    let notification = flow.submit(&bakery_inquiry()).await?;

    api_mock.assert_hits(1);
    assert!(matches!(notification, Notification::Error { .. }));
    Ok(())
}

#[tokio::test]
async fn test_sink_reports_rejection_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/inquiries");
        then.status(422).body("email already used");
    });

    let catalog = PriceCatalog::default();
    let payload = bakery_inquiry().to_payload(&catalog);
    let sink = HttpInquirySink::new(server.url("/api/inquiries"));

    match sink.submit(&payload).await {
        Err(EstimatorError::SubmissionRejected { status, body }) => {
            assert_eq!(status, 422);
            assert_eq!(body, "email already used");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_becomes_notification() -> Result<()> {
    let catalog = PriceCatalog::default();
    // Nothing listens on port 9 locally.
    let sink = HttpInquirySink::new("http://127.0.0.1:9/api/inquiries")
        .with_timeout(Duration::from_secs(2))?;
    let flow = InquiryFlow::new(&catalog, sink);

    let notification = flow.submit(&bakery_inquiry()).await?;

    assert!(!notification.is_success());
    Ok(())
}

#[tokio::test]
async fn test_invalid_form_does_not_hit_the_endpoint() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/inquiries");
        then.status(201);
    });

    let catalog = PriceCatalog::default();
    let flow = InquiryFlow::new(&catalog, HttpInquirySink::new(server.url("/api/inquiries")));
    let mut form = bakery_inquiry();
    form.email = "not-an-email".to_string();

    let result = flow.submit(&form).await;

    assert!(matches!(
        result,
        Err(EstimatorError::ValidationError { ref field, .. }) if field == "email"
    ));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_configured_headers_and_catalog_are_used() -> Result<()> {
    std::env::set_var("HIRE_ESTIMATOR_IT_TOKEN", "s3cret");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/inquiries")
            .header("authorization", "Bearer s3cret")
            .json_body_partial(r#"{ "estimate": { "min": 1000, "max": 1200 } }"#);
        then.status(200).json_body(serde_json::json!({ "reference": 7 }));
    });

    let config_content = format!(
        r#"
[inquiry]
endpoint = "{}"
timeout_seconds = 5
headers = {{ Authorization = "Bearer ${{HIRE_ESTIMATOR_IT_TOKEN}}" }}

[catalog.base_packages.landing]
min = 1000
max = 1200
name = "Landing Page"

[catalog.timeline_multipliers]
normal = 1.0
"#,
        server.url("/inquiries")
    );
    let mut config_file = NamedTempFile::new()?;
    config_file.write_all(config_content.as_bytes())?;

    let config = EstimatorConfig::from_file(config_file.path())?;
    hire_estimator::utils::validation::Validate::validate(&config)?;
    let inquiry = config.inquiry.clone().expect("inquiry section");

    let sink = HttpInquirySink::new(inquiry.endpoint)
        .with_timeout(Duration::from_secs(inquiry.timeout_seconds.unwrap_or(10)))?
        .with_headers(&inquiry.headers.unwrap_or_else(HashMap::new))?;
    let flow = InquiryFlow::new(&config.catalog, sink);

    let mut form = bakery_inquiry();
    form.request = EstimateRequest::new("landing");
    let notification = flow.submit(&form).await?;

    api_mock.assert();
    match notification {
        Notification::Success { reference, .. } => assert_eq!(reference.as_deref(), Some("7")),
        other => panic!("expected success, got {:?}", other),
    }

    std::env::remove_var("HIRE_ESTIMATOR_IT_TOKEN");
    Ok(())
}
