mod cli;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use careerwise::access::{AccessGate, AccessGrant};
use careerwise::config::CareerwiseConfig;
use careerwise::document::{DocumentTextExtractor, UploadedDocument};
use careerwise::generation::{GeminiBackend, GenerativeModelClient};
use careerwise::profile::RawProfile;
use careerwise::workflow::{AdviceWorkflow, ResumeRequest, ResumeWorkflow};
use cli::{Cli, Command};
use ui::RunProgress;

type Client = GenerativeModelClient<GeminiBackend>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            ui::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "careerwise=debug" } else { "careerwise=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether the workflow succeeded. Errors are problems outside the
/// workflow itself: config, sign-in or reading input files.
async fn run(cli: Cli) -> Result<bool> {
    let config =
        CareerwiseConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let timeout = cli
        .timeout_secs
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| config.timeout());
    debug!(model = %config.model, timeout_secs = timeout.as_secs(), "configuration loaded");

    let gate = AccessGate::new(config.access.clone());
    let grant = gate
        .authorize(
            cli.username.as_deref().unwrap_or_default(),
            cli.password.as_deref().unwrap_or_default(),
        )
        .context("sign-in failed")?;

    let backend = GeminiBackend::with_base_url(config.api_key, config.model, config.base_url)
        .context("failed to set up the model client")?;
    let client = GenerativeModelClient::with_timeout(backend, timeout);

    match cli.command {
        Command::Advice { profile } => run_advice(&client, &grant, &profile, cli.audit).await,
        Command::Resume {
            resume,
            job_description,
            job_file,
            out_dir,
        } => {
            let request = resume_request(resume, job_description, job_file).await?;
            run_resume(&client, &grant, request, &out_dir, cli.audit).await
        }
    }
}

async fn run_advice(client: &Client, grant: &AccessGrant, path: &Path, audit: bool) -> Result<bool> {
    let raw = RawProfile::from_path(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;

    let progress = RunProgress::start("Generating career advice...");
    let run = AdviceWorkflow::new(client).run(grant, raw).await;

    let succeeded = match &run.outcome {
        Ok(advice) => {
            progress.succeed("Career advice ready");
            println!("{advice}");
            true
        }
        Err(failure) => {
            progress.fail(failure);
            false
        }
    };
    if audit {
        progress.print_record(&run.record);
    }
    Ok(succeeded)
}

async fn resume_request(
    resume: Option<PathBuf>,
    job_description: Option<String>,
    job_file: Option<PathBuf>,
) -> Result<ResumeRequest> {
    let document = match resume {
        Some(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read resume {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(UploadedDocument::new(file_name, bytes))
        }
        None => None,
    };

    let job_description = match (job_description, job_file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read job description {}", path.display()))?,
        (None, None) => String::new(),
    };

    Ok(ResumeRequest {
        document,
        job_description,
    })
}

async fn run_resume(
    client: &Client,
    grant: &AccessGrant,
    request: ResumeRequest,
    out_dir: &Path,
    audit: bool,
) -> Result<bool> {
    let extractor: DocumentTextExtractor = DocumentTextExtractor::default();

    let progress = RunProgress::start("Generating tailored resume...");
    let run = ResumeWorkflow::new(client, &extractor).run(grant, request).await;

    let succeeded = match &run.outcome {
        Ok(resume) => {
            let path = resume
                .artifact
                .write_to(out_dir)
                .await
                .with_context(|| format!("failed to write into {}", out_dir.display()))?;
            progress.succeed("Tailored resume ready");
            println!("{}", resume.text);
            progress.saved(&path);
            true
        }
        Err(failure) => {
            progress.fail(failure);
            false
        }
    };
    if audit {
        progress.print_record(&run.record);
    }
    Ok(succeeded)
}
