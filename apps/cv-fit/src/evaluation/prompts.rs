// Prompt template for fit evaluation (pipeline stage 2).

use crate::llm_client::prompts::PromptTemplate;

/// Asks the model for a summary line and a fit category line.
/// Labels must stay in sync with `evaluation::assessment`.
pub const FIT_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "fit",
    version: 1,
    slots: &["job_description", "parsed_cv_info"],
    body: "Based on the following job description and the candidate's CV information, \
evaluate the candidate's fit for the role and provide a summary. \
Classify the candidate into one of the following categories:
A: Good fit
B: Medium fit
C: Not a good fit

Job Description:
{job_description}

Candidate CV Information:
{parsed_cv_info}

Provide a summary of the candidate's fit for the role and classify their fit as follows:
Summary: [Brief summary]
Fit Category: [A/B/C]",
};
