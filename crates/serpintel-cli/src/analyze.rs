//! The `analyze` subcommand: configuration, cost preview, pipeline run,
//! JSON output.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use serpintel_core::AppConfig;
use serpintel_dataforseo::{Credentials, DataForSeoClient, FetchParams};
use serpintel_pipeline::{
    estimate_cost, AnalysisRequest, CostRates, KeywordAnalyzer, PipelineConfig,
};

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Keyword to analyze; repeat the flag for more than one.
    #[arg(long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Newline-delimited keyword file, merged with --keyword values.
    #[arg(long, value_name = "PATH")]
    keywords_file: Option<PathBuf>,

    /// Brand domain used to filter organic positions to your own listings.
    #[arg(long)]
    brand_domain: Option<String>,

    /// Skip organic position lookups.
    #[arg(long)]
    no_organic: bool,

    /// Fetch ad-traffic forecasts (slow: one spaced request per keyword).
    #[arg(long)]
    forecast: bool,

    /// Write the JSON result list to this file instead of stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = serpintel_core::load_app_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.clone())),
        )
        .init();

    // AppConfig's Debug impl redacts the password.
    tracing::debug!(?config, "loaded configuration");

    let file_content = match &args.keywords_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading keywords file {}", path.display()))?,
        ),
        None => None,
    };
    let keywords = collect_keywords(args.keywords, file_content.as_deref());
    anyhow::ensure!(
        !keywords.is_empty(),
        "no keywords supplied; use --keyword or --keywords-file"
    );

    let include_organic = !args.no_organic;
    let estimate = estimate_cost(
        &CostRates::default(),
        keywords.len(),
        include_organic,
        args.forecast,
    );
    eprintln!(
        "analyzing {} keywords — estimated API cost: {} USD (~{} EUR)",
        keywords.len(),
        estimate.total_usd,
        estimate.total_eur
    );

    let analyzer = build_analyzer(&config)?;
    let request = AnalysisRequest {
        keywords,
        target_domain: args.brand_domain,
        include_organic,
        include_forecast: args.forecast,
    };

    let results = analyzer
        .analyze_with_progress(&request, |current, total| {
            eprintln!("[{current}/{total}] keyword processed");
        })
        .await
        .context("keyword analysis failed")?;

    let json = serde_json::to_string_pretty(&results).context("serializing results")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing results to {}", path.display()))?;
            eprintln!("results written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn build_analyzer(config: &AppConfig) -> anyhow::Result<KeywordAnalyzer> {
    let credentials = Credentials::new(
        config.dataforseo_login.clone(),
        config.dataforseo_password.clone(),
    );
    let params = FetchParams {
        location_code: config.location_code,
        language_code: config.language_code.clone(),
        task_wait: Duration::from_secs(config.task_wait_secs),
        task_poll_interval: Duration::from_secs(config.task_poll_interval_secs),
        task_poll_max_attempts: config.task_poll_max_attempts,
    };
    let client = DataForSeoClient::new(credentials, params, config.request_timeout_secs)
        .context("building DataForSEO client")?;

    let pipeline_config = PipelineConfig {
        keyword_concurrency: config.keyword_concurrency,
        forecast_delay: Duration::from_millis(config.forecast_delay_ms),
    };
    Ok(KeywordAnalyzer::new(client, pipeline_config))
}

/// Merges --keyword flags with the lines of a keywords file, trimming
/// whitespace, dropping blanks, and deduplicating while preserving first
/// occurrence order. Duplicates would only burn API quota.
fn collect_keywords(flag_keywords: Vec<String>, file_content: Option<&str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();

    let from_file = file_content
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned);

    for keyword in flag_keywords.into_iter().chain(from_file) {
        let keyword = keyword.trim().to_owned();
        if !keyword.is_empty() && seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }
    keywords
}
