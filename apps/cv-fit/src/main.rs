mod cli;
mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod pipeline;
mod response;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command, EvaluateArgs, OutputFormat, ServeArgs};
use crate::config::Config;
use crate::pipeline::{evaluate_fit, Pipeline};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &cli.log_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cv-fit v{}", env!("CARGO_PKG_VERSION"));

    match cli.cmd {
        Command::Evaluate(args) => evaluate(&cli.config, args).await,
        Command::Serve(args) => serve(&cli.config, args).await,
    }
}

async fn evaluate(config_path: &Path, args: EvaluateArgs) -> Result<()> {
    let job_description = match (args.job, args.job_file) {
        (Some(job), _) => job,
        (None, Some(path)) => read_job_file(&path)?,
        (None, None) => anyhow::bail!("either --job or --job-file is required"),
    };

    match args.format {
        OutputFormat::Text => {
            let assessment = evaluate_fit(config_path, &args.cv, &job_description).await?;
            println!("{assessment}");
        }
        OutputFormat::Json => {
            let pipeline = Pipeline::from_config(&Config::load(config_path)?)?;
            let evaluation = pipeline.run_with_profile(&args.cv, &job_description).await?;
            let fit = evaluation.assessment.parse()?;
            let output = json!({
                "profile": evaluation.profile.parse(),
                "fit": {
                    "summary": fit.summary,
                    "category": fit.category,
                    "description": fit.category.description(),
                },
                "raw_assessment": evaluation.assessment.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn read_job_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read job description from {}", path.display()))
}

async fn serve(config_path: &Path, args: ServeArgs) -> Result<()> {
    // Configuration problems are fatal before the listener binds
    let pipeline = Pipeline::from_config(&Config::load(config_path)?)?;
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
