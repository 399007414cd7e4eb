// Stage 2: score a candidate profile against a job description.
// All completion calls go through llm_client.

pub mod assessment;
pub mod evaluator;
pub mod prompts;
