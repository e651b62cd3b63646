// Main entry point for the model export run

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aggregation::{
    aggregate, AggregateOptions, AggregationResult, CatalogSource, ModelSource, RegistrySource,
};
use export_cli::config::Config;
use export_cli::report;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aggregation=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AI Foundry model export");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        region = %config.location,
        registries = config.registry_names.len(),
        "Configuration loaded"
    );

    // Build the configured sources: catalog first, then registries in order
    let mut sources: Vec<Arc<dyn ModelSource>> = vec![Arc::new(CatalogSource::new(
        config.access_token.clone(),
        config.subscription_id.clone(),
        config.location.clone(),
    ))];
    for name in &config.registry_names {
        sources.push(Arc::new(RegistrySource::new(
            config.access_token.clone(),
            name.clone(),
        )));
    }

    // Ctrl-C cancels the run; whatever was gathered still gets written
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received; finishing with partial results");
                cancel.cancel();
            }
        });
    }

    let options = AggregateOptions::new().with_cancellation(cancel);
    let result = aggregate(&sources, &options).await;

    // Write the report
    let output_path = config
        .output_path
        .clone()
        .unwrap_or_else(default_output_path);
    report::write_report(Path::new(&output_path), &result)
        .with_context(|| format!("Failed to write report to {}", output_path))?;
    tracing::info!(path = %output_path, records = result.records.len(), "Report written");

    print_summary(&result, &output_path);

    Ok(())
}

fn default_output_path() -> String {
    format!(
        "ai_foundry_models_{}.xlsx",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

fn print_summary(result: &AggregationResult, output_path: &str) {
    println!();
    println!("{}", "Export summary".bold());
    println!("{}", "=".repeat(60));

    for (source, count) in result.counts_by_source() {
        println!("  {:>6}  {}", count, source.label());
    }
    println!(
        "  {:>6}  total -> {}",
        result.records.len(),
        output_path.bright_cyan()
    );

    if result.is_complete() {
        println!();
        println!("{}", "All sources exported successfully.".bright_green());
    } else {
        println!();
        println!("{}", "Sources with failures:".bright_yellow().bold());
        for failure in &result.source_errors {
            println!(
                "  {} {} - {} ({})",
                "✗".bright_red(),
                failure.source.label(),
                failure.message,
                failure.kind
            );
        }
    }
}
