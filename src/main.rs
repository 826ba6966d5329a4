use clap::Parser;
use hire_estimator::utils::error::ErrorSeverity;
use hire_estimator::utils::{logger, validation::Validate};
use hire_estimator::{
    compute_breakdown, compute_estimate, CliConfig, EstimatorConfig, EstimatorError,
    HttpInquirySink, InquiryFlow, Notification,
};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> hire_estimator::Result<()> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            EstimatorConfig::from_file(path)?
        }
        None => EstimatorConfig::default(),
    };
    config.validate()?;

    let request = cli.to_request();
    let estimate = compute_estimate(&config.catalog, &request);
    let breakdown = compute_breakdown(&config.catalog, &request);

    if cli.json {
        let output = serde_json::json!({
            "estimate": estimate,
            "breakdown": breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if estimate.is_pending() {
        println!("Choose a project type to see an estimate.");
        println!(
            "Available: {}",
            config
                .catalog
                .base_packages
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        println!("Estimate: {}", estimate);
        for line in &breakdown {
            let marker = if line.included_in_total { " " } else { "*" };
            println!("  {}{:<36} {}", marker, line.item, line.price);
        }
        if breakdown.iter().any(|l| !l.included_in_total) {
            println!("  * shown for reference, not part of the estimate");
        }
    }

    if !cli.submit {
        return Ok(());
    }

    let endpoint = cli
        .endpoint
        .as_deref()
        .or_else(|| config.inquiry_endpoint())
        .ok_or_else(|| EstimatorError::MissingConfigError {
            field: "inquiry.endpoint".to_string(),
        })?;

    let mut sink = HttpInquirySink::new(endpoint);
    if let Some(inquiry) = &config.inquiry {
        if let Some(timeout) = inquiry.timeout_seconds {
            sink = sink.with_timeout(Duration::from_secs(timeout))?;
        }
        if let Some(headers) = &inquiry.headers {
            sink = sink.with_headers(headers)?;
        }
    }

    let flow = InquiryFlow::new(&config.catalog, sink);
    match flow.submit(&cli.to_form()).await? {
        Notification::Success { message, reference } => {
            println!("✅ {}", message);
            if let Some(reference) = reference {
                println!("Reference: {}", reference);
            }
        }
        Notification::Error { message } => {
            eprintln!("❌ {}", message);
            std::process::exit(2);
        }
    }

    Ok(())
}
