// Prompt constants for résumé review and ATS scoring.

/// Shared system prompt: the parsers downstream expect plain text headings.
pub const PLAIN_TEXT_SYSTEM: &str =
    "You are a professional resume reviewer, career coach and ATS optimization engine. \
    Respond in plain text only. \
    Follow the requested section structure exactly and emit each section once. \
    Do NOT wrap the answer in code fences. \
    Do NOT add greetings, apologies or closing remarks.";

/// Review prompt. Replace `{resume_text}` before sending.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and return your feedback in plain text.

Use this exact structure:

## Resume Summary
- Write 2-3 lines about the overall quality and tone.

## ATS Compatibility Suggestions
- Point out any formatting issues for ATS.
- Note any missing resume sections or weak keywords.

## Recommended Improvements
- Reword weak bullet points or vague phrasing.
- Recommend better structure, phrasing, or clarity.

## Suggested Skills or Courses
Suggest relevant online courses or certifications, grouped like this:

### Technical Skills
- Example: Coursera - Algorithms Specialization by Stanford

### Tools & Platforms
- Example: Coursera - Google Cloud Professional Certificate

### Soft Skills
- Example: Udemy - Effective Communication for Engineers

## Suggested Job Domains
Based on the resume's skills and experience, recommend 2-3 career paths.

Now evaluate the following resume and return results in the exact format:

Resume:
{resume_text}"#;

/// ATS prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume against the job description and return output using this structure, in plain text (no asterisks, emojis, or Markdown formatting):

1. ATS Score (Score out of 100 with a 2-line explanation)
2. Missing Keywords (List of terms from the job description not found or underused in the resume)
3. Formatting Issues (Only layout and structure issues relevant for ATS parsing)
4. Suggestions (Actionable and non-repetitive advice for improving keyword usage, formatting, and ATS alignment)

Rules:
- Do NOT repeat the same point in multiple sections.
- Each section must appear exactly once.
- Use section titles clearly, and separate each with a blank line.
- Use hyphens (-) for bullet points, NOT asterisks or symbols.
- Be concise but specific. No placeholder or vague phrases.

Now evaluate the resume against the job description:

Resume:
{resume_text}

Job Description:
{job_description}"#;
