// Prompt templates and the builder that fills their slots.
// Each pipeline stage defines its own template in a prompts.rs alongside it.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::prompts::FIT_TEMPLATE;
use crate::extraction::prompts::EXTRACTION_TEMPLATE;

/// A named, versioned instruction pattern with `{slot}` placeholders.
#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub version: u32,
    pub slots: &'static [&'static str],
    pub body: &'static str,
}

/// The templates this system knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    Extraction,
    Fit,
}

impl TemplateName {
    pub fn template(self) -> &'static PromptTemplate {
        match self {
            TemplateName::Extraction => &EXTRACTION_TEMPLATE,
            TemplateName::Fit => &FIT_TEMPLATE,
        }
    }
}

/// Builds the prompt for `name`, substituting every declared slot from `values`.
pub fn build_prompt(name: TemplateName, values: &HashMap<&str, &str>) -> Result<String, AppError> {
    let template = name.template();
    let prompt = template.render(values)?;
    debug!(
        "Built prompt '{}' v{} ({} chars)",
        template.name,
        template.version,
        prompt.len()
    );
    Ok(prompt)
}

impl PromptTemplate {
    /// Fails with `MissingSlot` if any declared slot has no value. Values for undeclared
    /// slots are ignored.
    ///
    /// Substitution is a single pass over the template body, so slot markers that appear
    /// inside substituted text are left untouched.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, AppError> {
        if let Some(slot) = self.slots.iter().copied().find(|s| !values.contains_key(s)) {
            return Err(AppError::MissingSlot {
                template: self.name,
                slot,
            });
        }

        let extra: usize = values.values().map(|v| v.len()).sum();
        let mut out = String::with_capacity(self.body.len() + extra);
        let mut rest = self.body;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if self.slots.contains(&&after[..close]) => {
                    out.push_str(values[&after[..close]]);
                    rest = &after[close + 1..];
                }
                _ => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Ok(out)
    }

    /// Slot markers referenced by the body, in order of appearance.
    #[cfg(test)]
    pub fn markers(&self) -> Vec<&'static str> {
        let mut found = Vec::new();
        let mut rest = self.body;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    found.push(&after[..close]);
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }
        found
    }
}
