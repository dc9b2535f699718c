// Prompt templates for the multiple-choice skill quiz.

/// MCQ prompt. Replace `{easy_skills}`, `{medium_skills}`, `{hard_skills}`,
/// `{questions_per_band}`, `{options_per_question}` and `{json_only}`.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Generate multiple-choice questions (MCQs) for a technical screening quiz based on the following skills:

- Easy skills: {easy_skills}
- Medium skills: {medium_skills}
- Hard skills: {hard_skills}

RULES:
1. Generate exactly {questions_per_band} questions per difficulty level.
2. Each question has exactly {options_per_question} options and exactly one correct answer.
3. `answer` must repeat the correct option verbatim.
4. Every question targets one skill from its level and names that skill in `skill`.
5. Questions must be unique, clear and directly about the skill.
6. Wrong options must be plausible but clearly wrong to someone who knows the skill.

Return a single JSON object with this EXACT schema:
{
  "easy": [
    {"question": "string", "options": ["A", "B", "C", "D"], "answer": "A", "skill": "string"}
  ],
  "medium": [
    {"question": "string", "options": ["A", "B", "C", "D"], "answer": "B", "skill": "string"}
  ],
  "hard": [
    {"question": "string", "options": ["A", "B", "C", "D"], "answer": "C", "skill": "string"}
  ]
}

{json_only}"#;
