//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::evaluation::assessment::FitAssessment;
use crate::evaluation::evaluator::FitEvaluator;
use crate::extraction::analyzer::CvAnalyzer;
use crate::extraction::pdf::{concat_pages, TextExtractor};
use crate::extraction::profile::CandidateProfile;
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};

/// Completion client that replays scripted responses and records every request.
/// Clones share the same script and request log.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        next.expect("ScriptedClient ran out of responses")
            .map(|text| text.trim().to_string())
    }
}

/// Text extractor over in-memory pages, or one that always fails to open.
pub struct StaticTextExtractor {
    pages: Option<Vec<String>>,
}

impl StaticTextExtractor {
    pub fn new(pages: Vec<&str>) -> Self {
        Self {
            pages: Some(pages.into_iter().map(String::from).collect()),
        }
    }

    pub fn failing() -> Self {
        Self { pages: None }
    }
}

impl TextExtractor for StaticTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, AppError> {
        match &self.pages {
            Some(pages) => Ok(concat_pages(pages)),
            None => Err(AppError::DocumentOpen {
                path: path.display().to_string(),
                reason: "not a PDF".to_string(),
            }),
        }
    }
}

/// Stage 1 stub returning a fixed profile.
pub struct FixedAnalyzer(pub CandidateProfile);

#[async_trait]
impl CvAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _path: &Path) -> Result<CandidateProfile, AppError> {
        Ok(self.0.clone())
    }
}

/// Stage 2 stub returning a fixed assessment and recording its inputs.
#[derive(Clone)]
pub struct RecordingEvaluator {
    assessment: FitAssessment,
    calls: Arc<Mutex<Vec<(String, CandidateProfile)>>>,
}

impl RecordingEvaluator {
    pub fn new(assessment: FitAssessment) -> Self {
        Self {
            assessment,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, CandidateProfile)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FitEvaluator for RecordingEvaluator {
    async fn evaluate(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<FitAssessment, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((job_description.to_string(), profile.clone()));
        Ok(self.assessment.clone())
    }
}

/// Builds a minimal PDF with one text line per page, using the standard Helvetica font.
/// With `declare_font` false, pages reference `/F1` without any `/Resources`.
pub fn pdf_with_pages(pages: &[&str], declare_font: bool) -> Vec<u8> {
    // 1: catalog, 2: page tree, 3: font, then a (page, content) pair per page.
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 4 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let resources = if declare_font {
            " /Resources << /Font << /F1 3 0 R >> >>"
        } else {
            ""
        };
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R{resources} >>",
            5 + 2 * i
        ));
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_start = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.into_bytes()
}

/// Writes `bytes` to a fresh temporary `.pdf` file.
pub fn write_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}
