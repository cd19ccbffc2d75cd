use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use inlay::application::dto::{AttemptOutcome, Submission, SubmissionInput};
use inlay::application::{ContentLoader, ImageValidator, UploadOrchestrator};
use inlay::config::PipelineConfig;
use inlay::domain::services::{DimensionProber, FormatSniffer};
use inlay::infrastructure::decoding::NativeImageDecoder;
use inlay::infrastructure::http::{
    HttpAssetUploader, HttpDocumentInserter, ReqwestContentTypeProbe, build_client,
};
use inlay::presentation::cli::{Cli, Commands, StatusSpinner, UploadArgs};

type NativeValidator = ImageValidator<ReqwestContentTypeProbe, NativeImageDecoder>;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "inlay=debug" } else { "inlay=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = PipelineConfig::from_env().context("Invalid configuration")?;
    let client = build_client(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Inspect { input } => {
            inspect(&config, client, input.into_submission_input()).await
        }
        Commands::Upload(args) => upload(config, client, args).await,
    }
}

fn build_validator(config: &PipelineConfig, client: reqwest::Client) -> NativeValidator {
    let loader = ContentLoader::new(config.max_payload_bytes);
    let sniffer = FormatSniffer::new(ReqwestContentTypeProbe::new(client.clone()))
        .with_probe_timeout(config.probe_timeout);
    let prober = DimensionProber::new(NativeImageDecoder::new(
        client,
        config.request_timeout,
        config.max_payload_bytes,
    ));
    ImageValidator::new(loader, sniffer, prober)
}

async fn inspect(
    config: &PipelineConfig,
    client: reqwest::Client,
    input: SubmissionInput,
) -> Result<ExitCode> {
    let validator = build_validator(config, client);

    match validator.validate(&input).await {
        Ok(descriptor) => {
            let json = serde_json::to_string_pretty(&descriptor.summary())
                .context("Failed to serialize descriptor")?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {} ({})", style("[x]").red().bold(), err, err.kind());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn upload(
    mut config: PipelineConfig,
    client: reqwest::Client,
    args: UploadArgs,
) -> Result<ExitCode> {
    if let Some(url) = args.upload_url.clone() {
        config = config.with_upload_endpoint(url);
    }
    if let Some(url) = args.insert_url.clone() {
        config = config.with_insert_endpoint(url);
    }
    let upload_endpoint = config.require_upload_endpoint()?.clone();
    let insert_endpoint = config.require_insert_endpoint()?.clone();

    let uploader = HttpAssetUploader::new(client.clone(), upload_endpoint, config.request_timeout)
        .with_store_polling(config.store_poll_interval, config.store_poll_attempts);
    let inserter =
        HttpDocumentInserter::new(client.clone(), insert_endpoint, config.request_timeout);
    let orchestrator =
        UploadOrchestrator::new(build_validator(&config, client), uploader, inserter);

    let submission = Submission {
        alt_text: args.alt_text(),
        ai_generated: args.ai_generated,
        input: args.input.into_submission_input(),
    };

    let spinner = StatusSpinner::new();
    let outcome = tokio::select! {
        outcome = orchestrator.submit(submission) => outcome,
        _ = spinner.follow(orchestrator.subscribe()) => {
            anyhow::bail!("Status channel closed before the upload finished")
        }
    };
    spinner.finish();

    match outcome {
        AttemptOutcome::Completed(Ok(result)) => {
            let source = if result.descriptor.payload().is_embedded() {
                "embedded"
            } else {
                "remote"
            };
            println!(
                "{} Inserted {} ({}, {}) as {}",
                style("[+]").green().bold(),
                result.descriptor.mime_type().name(),
                result.descriptor.dimensions(),
                source,
                style(&result.asset_reference).cyan()
            );
            Ok(ExitCode::SUCCESS)
        }
        AttemptOutcome::Completed(Err(err)) => {
            eprintln!("{} {} ({})", style("[x]").red().bold(), err, err.kind());
            Ok(ExitCode::FAILURE)
        }
        AttemptOutcome::Superseded => {
            eprintln!("{} Upload was superseded", style("[!]").yellow());
            Ok(ExitCode::FAILURE)
        }
    }
}
