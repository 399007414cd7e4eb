// Stage 1: turn a CV document into a candidate profile.
// All completion calls go through llm_client.

pub mod analyzer;
pub mod pdf;
pub mod profile;
pub mod prompts;
