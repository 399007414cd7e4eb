//! Candidate profile produced by the extraction stage.

use serde::Serialize;

use crate::response::parse_labeled;

const NAME: &str = "Name";
const KEY_SKILLS: &str = "Key Skills";
const YEARS: &str = "Years of Experience";
const EDUCATION: &str = "Education Level";
const RECENT_ROLE: &str = "Most Recent Job Title and Company";
const SUMMARY: &str = "Summary";

const PROFILE_LABELS: [&str; 6] = [NAME, KEY_SKILLS, YEARS, EDUCATION, RECENT_ROLE, SUMMARY];

/// The model's textual summary of a CV. Passed between stages unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    text: String,
}

/// Best-effort structured view of a `CandidateProfile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub key_skills: Vec<String>,
    /// Raw value as written by the model, e.g. "5+ years".
    pub years_of_experience: Option<String>,
    /// First number found in `years_of_experience`.
    pub years_numeric: Option<f32>,
    pub education_level: Option<String>,
    pub most_recent_role: Option<String>,
    pub summary: Option<String>,
}

impl CandidateProfile {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Extracts the labeled fields. Never fails: absent or empty labels become `None`.
    pub fn parse(&self) -> ProfileFields {
        let mut fields = parse_labeled(&self.text, &PROFILE_LABELS);
        let mut take = |label: &str| fields.remove(label).filter(|v| !is_placeholder(v));

        let years_of_experience = take(YEARS);
        let years_numeric = years_of_experience.as_deref().and_then(first_number);

        ProfileFields {
            name: take(NAME),
            key_skills: take(KEY_SKILLS).map(|s| split_skills(&s)).unwrap_or_default(),
            years_numeric,
            years_of_experience,
            education_level: take(EDUCATION),
            most_recent_role: take(RECENT_ROLE),
            summary: take(SUMMARY),
        }
    }
}

/// Empty values and unfilled template placeholders such as `[Name]` or `[Skill1, ...]`.
/// A bracketed list without an ellipsis is a real answer.
fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    let bracketed = v.starts_with('[') && v.ends_with(']');
    v.is_empty()
        || v.eq_ignore_ascii_case("n/a")
        || (bracketed && (!v.contains(',') || v.contains("...")))
}

fn split_skills(value: &str) -> Vec<String> {
    value
        .trim_matches(|c: char| c == '[' || c == ']')
        .split([',', ';'])
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn first_number(value: &str) -> Option<f32> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let rest = &value[start..];
    let mut end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    // Allow a single decimal part, e.g. "3.5 years".
    if rest[end..].starts_with('.') {
        let frac = &rest[end + 1..];
        let frac_len = frac
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(frac.len());
        if frac_len > 0 {
            end += 1 + frac_len;
        }
    }
    rest[..end].parse().ok()
}
