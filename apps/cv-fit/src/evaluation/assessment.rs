//! The fit assessment returned by the pipeline and its optional typed parse.

use std::fmt;

use serde::Serialize;

use crate::errors::AppError;
use crate::response::parse_labeled;

const SUMMARY: &str = "Summary";
const FIT_CATEGORY: &str = "Fit Category";

/// Fit classification requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitCategory {
    A,
    B,
    C,
}

impl FitCategory {
    pub fn description(self) -> &'static str {
        match self {
            FitCategory::A => "good fit",
            FitCategory::B => "medium fit",
            FitCategory::C => "not a good fit",
        }
    }

    /// Reads the category letter from a value like `A`, `[B]`, `**C**` or `A: Good fit`.
    /// Unfilled placeholders like `A/B/C` are rejected.
    fn from_value(value: &str) -> Option<Self> {
        let value = value.trim_start_matches(['[', '(', '"', '\'', '*', ' ']);
        let mut chars = value.chars();
        let category = match chars.next()?.to_ascii_uppercase() {
            'A' => FitCategory::A,
            'B' => FitCategory::B,
            'C' => FitCategory::C,
            _ => return None,
        };
        match chars.next() {
            Some(c) if c.is_alphanumeric() || c == '/' || c == '|' => None,
            _ => Some(category),
        }
    }
}

impl fmt::Display for FitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            FitCategory::A => "A",
            FitCategory::B => "B",
            FitCategory::C => "C",
        };
        write!(f, "{letter} ({})", self.description())
    }
}

/// The model's verdict text, returned exactly as produced (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitAssessment {
    text: String,
}

/// Typed view of a `FitAssessment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFit {
    pub summary: String,
    pub category: FitCategory,
}

impl FitAssessment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parses the `Summary:` and `Fit Category:` lines.
    /// Fails with `MalformedResponse` when either is missing or the category is not A, B or C.
    pub fn parse(&self) -> Result<ParsedFit, AppError> {
        let fields = parse_labeled(&self.text, &[SUMMARY, FIT_CATEGORY]);

        let summary = fields
            .get(SUMMARY)
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse("missing `Summary:` line".to_string()))?;

        let raw_category = fields.get(FIT_CATEGORY).ok_or_else(|| {
            AppError::MalformedResponse("missing `Fit Category:` line".to_string())
        })?;

        let category = FitCategory::from_value(raw_category).ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "fit category must be A, B or C, got {raw_category:?}"
            ))
        })?;

        Ok(ParsedFit { summary, category })
    }
}

impl fmt::Display for FitAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
