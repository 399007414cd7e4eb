// Prompt template for CV extraction (pipeline stage 1).

use crate::llm_client::prompts::PromptTemplate;

/// Asks the model for six labeled profile fields, one per line.
/// Labels must stay in sync with `extraction::profile`.
pub const EXTRACTION_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "extraction",
    version: 1,
    slots: &["candidate_text"],
    body: "Extract and summarize the following key information from the candidate's CV:

{candidate_text}

Please provide the following information:
1. Candidate's name
2. Key skills (list of 5-10 most relevant skills)
3. Years of experience
4. Education level
5. Most recent job title and company
6. A brief summary of the candidate's profile (2-3 sentences).

Format your response as follows:
Name: [Name]
Key Skills: [Skill1, Skill2, ...]
Years of Experience: [Number]
Education Level: [Degree]
Most Recent Job Title and Company: [Job Title at Company]
Summary: [Brief summary]",
};
