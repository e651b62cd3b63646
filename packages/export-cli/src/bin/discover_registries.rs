// Probe known registry names and report which are accessible.
//
// The documented registry list drifts: some names never existed, some need
// entitlements. This tool samples each candidate and prints a ready-to-paste
// AZURE_ML_REGISTRY_NAMES line of the ones that actually answer.

use anyhow::{Context, Result};
use colored::Colorize;
use futures::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aggregation::{AccessToken, ModelSource, RegistrySource};

/// Candidate names from provider documentation plus a few speculative ones.
const KNOWN_REGISTRIES: &[&str] = &[
    "azureml",              // Main registry (Microsoft/Phi models, OpenAI, etc.)
    "azureml-meta",         // Meta/Llama models
    "azureml-cohere",       // Cohere models
    "azureml-mistral",      // Mistral models
    "azureml-xai",          // xAI models (Grok)
    "azureml-deepseek",     // DeepSeek models
    "azureml-core42",       // Core42 models (Jais)
    "azureml-stabilityai",  // Stability AI models
    "azureml-nvidia",       // NVIDIA models
    "HuggingFace",          // Hugging Face models
    "azureml-gretel",       // Gretel models
    "azureml-anthropic",    // Speculative - may not exist
    "azureml-google",       // Speculative - may not exist
    "azureml-ai21",         // Speculative - may not exist
    "azureml-databricks",   // Speculative - may not exist
    "azureml-openai",       // Speculative - may not exist
];

/// Sample size kept small so a probe pass stays fast.
const COUNT_LIMIT: usize = 10;
const SAMPLE_LIMIT: usize = 5;

struct ProbeOutcome {
    name: String,
    accessible: bool,
    model_count: String,
    sample_models: Vec<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();
    let token: AccessToken = std::env::var("AZURE_ACCESS_TOKEN")
        .context("AZURE_ACCESS_TOKEN must be set")?
        .into();

    println!("{}", "Registry discovery".bold());
    println!("{}", "=".repeat(60));
    println!();

    let mut outcomes = Vec::with_capacity(KNOWN_REGISTRIES.len());
    for name in KNOWN_REGISTRIES {
        let outcome = probe(&token, name).await;
        if outcome.accessible {
            println!(
                "  {} {} - {} models",
                "✓".bright_green(),
                name,
                outcome.model_count
            );
            if !outcome.sample_models.is_empty() {
                let shown = outcome.sample_models.len().min(3);
                println!("      sample: {}", outcome.sample_models[..shown].join(", "));
            }
        } else {
            println!(
                "  {} {} - {}",
                "✗".bright_red(),
                name,
                outcome.error.as_deref().unwrap_or("not accessible")
            );
        }
        outcomes.push(outcome);
    }

    print_summary(&outcomes);
    Ok(())
}

/// Try to list a few models from one registry.
///
/// Any failure marks the registry not accessible; a registry that answers
/// with zero models still counts as accessible.
async fn probe(token: &AccessToken, name: &str) -> ProbeOutcome {
    let source = RegistrySource::new(token.clone(), name);
    let mut records = source.list_models();

    let mut count = 0usize;
    let mut samples = Vec::new();

    loop {
        if count >= COUNT_LIMIT {
            break;
        }
        match records.next().await {
            Some(Ok(record)) => {
                count += 1;
                if samples.len() < SAMPLE_LIMIT {
                    samples.push(
                        record
                            .lookup_text("name")
                            .unwrap_or_else(|| "N/A".to_string()),
                    );
                }
            }
            Some(Err(error)) => {
                return ProbeOutcome {
                    name: name.to_string(),
                    accessible: false,
                    model_count: "0".to_string(),
                    sample_models: samples,
                    error: Some(error.to_string()),
                };
            }
            None => break,
        }
    }

    ProbeOutcome {
        name: name.to_string(),
        accessible: true,
        model_count: if count >= COUNT_LIMIT {
            format!("{}+", count)
        } else {
            count.to_string()
        },
        sample_models: samples,
        error: None,
    }
}

fn print_summary(outcomes: &[ProbeOutcome]) {
    let accessible: Vec<_> = outcomes.iter().filter(|o| o.accessible).collect();

    println!();
    println!("{}", "Discovery summary".bold());
    println!("{}", "=".repeat(60));
    println!("  tested:      {}", outcomes.len());
    println!(
        "  accessible:  {}",
        accessible.len().to_string().bright_green()
    );
    println!(
        "  unavailable: {}",
        (outcomes.len() - accessible.len()).to_string().bright_red()
    );

    if !accessible.is_empty() {
        let names: Vec<&str> = accessible.iter().map(|o| o.name.as_str()).collect();
        println!();
        println!("{}", "Recommended .env entry:".bold());
        println!(
            "  {}",
            format!("AZURE_ML_REGISTRY_NAMES={}", names.join(",")).bright_cyan()
        );
    }
}
