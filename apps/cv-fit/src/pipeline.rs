//! Pipeline: orchestrates CV analysis and fit evaluation.
//!
//! Flow: analyze(path) → CandidateProfile → evaluate(job_description, profile) → FitAssessment.
//!
//! Stages run strictly in sequence. If stage 1 fails, stage 2 never runs and the error is
//! returned unchanged.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::evaluation::assessment::FitAssessment;
use crate::evaluation::evaluator::{FitEvaluator, LlmFitEvaluator};
use crate::extraction::analyzer::{CvAnalyzer, LlmCvAnalyzer};
use crate::extraction::pdf::PdfTextExtractor;
use crate::extraction::profile::CandidateProfile;
use crate::llm_client::retry::RetryingClient;
use crate::llm_client::{CompletionClient, OpenAiClient};

/// Output of both stages, for callers that want the intermediate profile too.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub profile: CandidateProfile,
    pub assessment: FitAssessment,
}

pub struct Pipeline {
    analyzer: Arc<dyn CvAnalyzer>,
    evaluator: Arc<dyn FitEvaluator>,
}

impl Pipeline {
    pub fn new(analyzer: Arc<dyn CvAnalyzer>, evaluator: Arc<dyn FitEvaluator>) -> Self {
        Self {
            analyzer,
            evaluator,
        }
    }

    /// Wires the production stages around one shared completion client.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let openai = OpenAiClient::from_config(config)?;
        info!(
            "Completion client initialized (model: {}, retries: {})",
            openai.model(),
            config.max_retries
        );

        let llm: Arc<dyn CompletionClient> = if config.max_retries > 0 {
            Arc::new(RetryingClient::new(openai, config.max_retries))
        } else {
            Arc::new(openai)
        };

        Ok(Self::with_client(llm, config.reject_empty_documents))
    }

    /// Production stages over an arbitrary completion client.
    pub fn with_client(llm: Arc<dyn CompletionClient>, reject_empty_documents: bool) -> Self {
        let analyzer = LlmCvAnalyzer::new(Arc::new(PdfTextExtractor), llm.clone())
            .reject_empty_documents(reject_empty_documents);
        let evaluator = LlmFitEvaluator::new(llm);
        Self::new(Arc::new(analyzer), Arc::new(evaluator))
    }

    /// Runs both stages and returns the fit assessment text.
    pub async fn run(&self, path: &Path, job_description: &str) -> Result<FitAssessment, AppError> {
        Ok(self.run_with_profile(path, job_description).await?.assessment)
    }

    /// Runs both stages and returns the intermediate profile alongside the assessment.
    pub async fn run_with_profile(
        &self,
        path: &Path,
        job_description: &str,
    ) -> Result<Evaluation, AppError> {
        info!("Analyzing CV {}", path.display());
        let profile = self.analyzer.analyze(path).await?;

        info!("Evaluating fit against job description");
        let assessment = self.evaluator.evaluate(job_description, &profile).await?;

        Ok(Evaluation {
            profile,
            assessment,
        })
    }
}

/// Loads configuration from `config_path`, then runs the pipeline once.
///
/// Configuration problems surface before any document is read or any network call is made.
pub async fn evaluate_fit(
    config_path: &Path,
    cv_path: &Path,
    job_description: &str,
) -> Result<FitAssessment, AppError> {
    let config = Config::load(config_path)?;
    Pipeline::from_config(&config)?
        .run(cv_path, job_description)
        .await
}
