//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use claimguard_core::{
    AnalyticsSummary, ClaimGuardConfig, ClaimPipeline, ClaimReport, HeuristicAnalyzer,
    TopicExtractor,
};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::Path;

/// Output of `batch`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchOutput {
    reports: Vec<ClaimReport>,
    skipped: Vec<SkippedClaim>,
    summary: AnalyticsSummary,
}

#[derive(Debug, Serialize)]
struct SkippedClaim {
    line: usize,
    reason: String,
}

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    config: &ClaimGuardConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze { text } => handle_analyze(&text, config).await,
        Commands::Score { text } => handle_score(&text),
        Commands::Sources { topic } => handle_sources(&topic, config).await,
        Commands::Counter { text, topic } => handle_counter(&text, topic, config).await,
        Commands::Batch { file, concurrency } => handle_batch(&file, concurrency, config).await,
        Commands::Config { action } => handle_config(action, config, workspace),
    }
}

fn build_pipeline(config: &ClaimGuardConfig) -> anyhow::Result<ClaimPipeline> {
    ClaimPipeline::from_config(config)
        .map_err(|e| anyhow::anyhow!("Failed to build pipeline: {}", e))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn handle_analyze(text: &str, config: &ClaimGuardConfig) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let report = pipeline.process(text).await?;
    print_json(&report)
}

fn handle_score(text: &str) -> anyhow::Result<()> {
    let result = HeuristicAnalyzer::default().analyze(text);
    print_json(&result)
}

async fn handle_sources(topic: &str, config: &ClaimGuardConfig) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let sources = pipeline.find_fact_sources(topic).await;
    if sources.is_empty() {
        eprintln!("No fact sources found for '{}'.", topic);
    }
    print_json(&sources)
}

async fn handle_counter(
    text: &str,
    topic: Option<String>,
    config: &ClaimGuardConfig,
) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let topic = topic.unwrap_or_else(|| TopicExtractor::new().extract_topic(text));
    let sources = pipeline.find_fact_sources(&topic).await;
    let narrative = pipeline
        .generate_counter_narrative(text, &topic, &sources)
        .await;
    println!("{}", narrative);
    Ok(())
}

/// Non-empty lines with their 1-based line numbers.
fn read_claims(contents: &str) -> Vec<(usize, &str)> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
        .collect()
}

async fn run_batch(
    contents: &str,
    concurrency: usize,
    pipeline: &ClaimPipeline,
) -> BatchOutput {
    let results: Vec<_> = stream::iter(read_claims(contents))
        .map(|(line, text)| async move { (line, pipeline.process(text).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    for (line, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => skipped.push(SkippedClaim {
                line,
                reason: e.to_string(),
            }),
        }
    }

    let summary = AnalyticsSummary::from_reports(&reports);
    BatchOutput {
        reports,
        skipped,
        summary,
    }
}

async fn handle_batch(
    file: &Path,
    concurrency: usize,
    config: &ClaimGuardConfig,
) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e))?;
    let pipeline = build_pipeline(config)?;
    let output = run_batch(&contents, concurrency, &pipeline).await;

    for skip in &output.skipped {
        eprintln!("Skipped line {}: {}", skip.line, skip.reason);
    }
    print_json(&output)
}

fn handle_config(
    action: ConfigAction,
    config: &ClaimGuardConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = claimguard_core::config::workspace_config_path(workspace);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            let written = claimguard_core::config::write_default_config(workspace)
                .map_err(|e| anyhow::anyhow!("Failed to write config: {}", e))?;
            println!("Created default configuration at: {}", written.display());
            Ok(())
        }
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}
