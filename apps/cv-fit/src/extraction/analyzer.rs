//! CV analysis, the first pipeline stage.
//!
//! Flow: extract PDF text → build `extraction` prompt → completion → `CandidateProfile`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::pdf::TextExtractor;
use crate::extraction::profile::CandidateProfile;
use crate::llm_client::prompts::{build_prompt, TemplateName};
use crate::llm_client::{CompletionClient, CompletionRequest};

/// Turns a CV document into a profile summary.
#[async_trait]
pub trait CvAnalyzer: Send + Sync {
    async fn analyze(&self, path: &Path) -> Result<CandidateProfile, AppError>;
}

/// `CvAnalyzer` that asks the language model to summarise the extracted text.
pub struct LlmCvAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    llm: Arc<dyn CompletionClient>,
    reject_empty_documents: bool,
}

impl LlmCvAnalyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, llm: Arc<dyn CompletionClient>) -> Self {
        Self {
            extractor,
            llm,
            reject_empty_documents: false,
        }
    }

    /// Fail with `EmptyDocument` instead of sending an empty CV to the model.
    pub fn reject_empty_documents(mut self, reject: bool) -> Self {
        self.reject_empty_documents = reject;
        self
    }
}

#[async_trait]
impl CvAnalyzer for LlmCvAnalyzer {
    async fn analyze(&self, path: &Path) -> Result<CandidateProfile, AppError> {
        // File I/O and PDF parsing are blocking; a parser panic on a broken document
        // surfaces as a join error.
        let extractor = Arc::clone(&self.extractor);
        let owned_path = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&owned_path))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    AppError::DocumentOpen {
                        path: path.display().to_string(),
                        reason: "document could not be parsed".to_string(),
                    }
                } else {
                    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
                }
            })??;
        info!("Extracted {} chars from {}", text.len(), path.display());

        if text.trim().is_empty() {
            if self.reject_empty_documents {
                return Err(AppError::EmptyDocument(path.display().to_string()));
            }
            // Scanned PDFs have no text layer; the model still gets asked and answers with
            // placeholders.
            warn!(
                "No extractable text in {}; continuing with an empty CV",
                path.display()
            );
        }

        let values = HashMap::from([("candidate_text", text.as_str())]);
        let prompt = build_prompt(TemplateName::Extraction, &values)?;

        let profile = self.llm.complete(&CompletionRequest::new(prompt)).await?;
        info!("CV analysis complete ({} chars)", profile.len());

        Ok(CandidateProfile::new(profile))
    }
}
