//! Prompt templates for application generation.
//!
//! Inputs are cut to a fixed character prefix before substitution to bound
//! upstream token cost. The cut is positional and may split a word.

use crate::generation::GenerationKind;

pub const RESUME_PREFIX_CHARS: usize = 1500;
pub const JOB_DESCRIPTION_PREFIX_CHARS: usize = 1000;

/// Cover letter prompt. Replace `{resume}` and `{job_description}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an experienced career advisor. Write a persuasive cover letter for the job application below.

Resume Summary: {resume}

Job Description: {job_description}

Requirements:
1. Address the hiring manager professionally
2. Draw on resume experience that matches the job requirements
3. Show genuine enthusiasm for this specific role and company
4. Tie the candidate's skills directly to the requirements
5. Use concrete examples and achievements where possible
6. Close with a clear call to action
7. Stay concise and professional (3-4 paragraphs)

IMPORTANT: Output ONLY the cover letter itself. No thinking process, explanations or commentary. Begin directly with "Dear Hiring Manager" and finish with the signature."#;

/// Bullet prompt. Replace `{resume}` and `{job_description}`.
pub const BULLETS_PROMPT_TEMPLATE: &str = r#"You are an experienced resume writer. Produce exactly 7 CV bullet points tailored to the job application below.

Resume: {resume}

Job Description: {job_description}

Requirements:
1. Open every bullet with a strong action verb
2. Quantify achievements with metrics wherever possible
3. Emphasize skills and experience that match the job requirements
4. Keep each bullet concise but impactful (1-2 lines)
5. Reuse keywords from the job description
6. Focus on accomplishments rather than duties
7. Make every bullet demonstrate value and impact

Return exactly 7 bullet points in this format:
• [bullet point 1]
• [bullet point 2]
• [bullet point 3]
• [bullet point 4]
• [bullet point 5]
• [bullet point 6]
• [bullet point 7]

IMPORTANT: Output ONLY the bullet points. No thinking process or explanations."#;

/// Appended to the cover letter prompt on the completeness retry.
pub const COMPLETE_LETTER_INSTRUCTION: &str = "\n\nIMPORTANT: Make sure to complete the entire cover letter with a proper closing and signature.";

/// Builds the single user message sent upstream for `kind`.
pub fn build_prompt(kind: GenerationKind, resume: &str, job_description: &str) -> String {
    let template = match kind {
        GenerationKind::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE,
        GenerationKind::Bullets => BULLETS_PROMPT_TEMPLATE,
    };

    template
        .replace("{resume}", prefix(resume, RESUME_PREFIX_CHARS))
        .replace(
            "{job_description}",
            prefix(job_description, JOB_DESCRIPTION_PREFIX_CHARS),
        )
}

/// The retry prompt: the original prompt plus the completion instruction.
pub fn build_retry_prompt(prompt: &str) -> String {
    format!("{prompt}{COMPLETE_LETTER_INSTRUCTION}")
}

/// First `max_chars` characters of `text`, never splitting a UTF-8 sequence.
fn prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
