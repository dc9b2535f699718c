// Prompt templates for resume field extraction.

/// Resume extraction prompt. Replace `{resume_text}` and `{json_only}` before sending.
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"You are a precise resume data extractor.
Read the resume text below and extract these key details:
- Name
- Skills
- Projects
- Experience
- Education
- Other important details

Return a single JSON object with exactly these keys:
{
  "Name": "string",
  "Skills": ["string"],
  "Projects": ["string or object"],
  "Experience": ["string or object"],
  "Education": ["string or object"],
  "OtherDetails": {}
}

Leave a key out if the resume says nothing about it. Do NOT invent details.

RESUME TEXT:
{resume_text}

{json_only}"#;
