use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "cv-fit",
    version,
    about = "Summarise a PDF résumé with a language model and rate the candidate against a job description"
)]
pub struct Cli {
    /// JSON configuration file containing at least `api_key`
    #[arg(long, global = true, env = "CV_FIT_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one CV against one job description
    Evaluate(EvaluateArgs),
    /// Serve the evaluation pipeline over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Path to the candidate's CV (PDF)
    #[arg(long)]
    pub cv: PathBuf,

    /// Job description text
    #[arg(long, conflicts_with = "job_file", required_unless_present = "job_file")]
    pub job: Option<String>,

    /// File containing the job description
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The assessment exactly as the model returned it
    Text,
    /// Parsed profile and assessment as JSON
    Json,
}
