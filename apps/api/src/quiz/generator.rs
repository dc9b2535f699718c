//! Quiz Generator: samples 12 skills into easy/medium/hard bands and asks the
//! model for banded multiple-choice questions.
//!
//! The sample is random on purpose: repeated calls with the same skills can
//! target different skills.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::normalize::parse_reply;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{ModelFailure, ModelGateway, ModelResult};
use crate::quiz::prompts::QUIZ_PROMPT_TEMPLATE;

pub const SKILLS_PER_BAND: usize = 4;
pub const SAMPLED_SKILLS: usize = SKILLS_PER_BAND * 3;
pub const QUESTIONS_PER_BAND: usize = 5;
pub const OPTIONS_PER_QUESTION: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyBand {
    Easy,
    Medium,
    Hard,
}

impl DifficultyBand {
    pub const ALL: [DifficultyBand; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// The skills assigned to each band before the model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBands {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl SkillBands {
    pub fn band(&self, band: DifficultyBand) -> &[String] {
        match band {
            DifficultyBand::Easy => &self.easy,
            DifficultyBand::Medium => &self.medium,
            DifficultyBand::Hard => &self.hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub skill: String,
}

/// The model's banded questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSet {
    pub easy: Vec<QuizQuestion>,
    pub medium: Vec<QuizQuestion>,
    pub hard: Vec<QuizQuestion>,
}

impl QuizSet {
    pub fn band(&self, band: DifficultyBand) -> &[QuizQuestion] {
        match band {
            DifficultyBand::Easy => &self.easy,
            DifficultyBand::Medium => &self.medium,
            DifficultyBand::Hard => &self.hard,
        }
    }

    /// Human-readable shape deviations. Empty when the model followed the rules.
    pub fn shape_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for band in DifficultyBand::ALL {
            let questions = self.band(band);
            if questions.len() != QUESTIONS_PER_BAND {
                issues.push(format!(
                    "{} has {} questions, expected {QUESTIONS_PER_BAND}",
                    band.as_str(),
                    questions.len()
                ));
            }
            for (i, q) in questions.iter().enumerate() {
                if q.options.len() != OPTIONS_PER_QUESTION {
                    issues.push(format!(
                        "{} question {} has {} options, expected {OPTIONS_PER_QUESTION}",
                        band.as_str(),
                        i + 1,
                        q.options.len()
                    ));
                }
                if !q.options.contains(&q.answer) {
                    issues.push(format!(
                        "{} question {} answer is not one of its options",
                        band.as_str(),
                        i + 1
                    ));
                }
            }
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedQuiz {
    pub skill_bands: SkillBands,
    pub questions: QuizSet,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill sampling
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed, non-empty skills with duplicates removed; first occurrence wins.
pub fn distinct_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .map(String::from)
        .collect()
}

/// Draws 12 distinct skills uniformly at random and splits them 4/4/4 in
/// sampled order.
pub fn draw_skill_bands<R: Rng + ?Sized>(
    skills: &[String],
    rng: &mut R,
) -> ModelResult<SkillBands> {
    let pool = distinct_skills(skills);
    if pool.len() < SAMPLED_SKILLS {
        return Err(ModelFailure::Precondition(format!(
            "Not enough skills available to generate MCQs: need at least {SAMPLED_SKILLS} distinct skills, found {}",
            pool.len()
        )));
    }

    // `index::sample` returns the indices in shuffled order.
    let mut sampled: Vec<String> = rand::seq::index::sample(rng, pool.len(), SAMPLED_SKILLS)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect();

    let hard = sampled.split_off(SKILLS_PER_BAND * 2);
    let medium = sampled.split_off(SKILLS_PER_BAND);
    Ok(SkillBands {
        easy: sampled,
        medium,
        hard,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

pub fn build_quiz_prompt(bands: &SkillBands) -> String {
    let questions_per_band = QUESTIONS_PER_BAND.to_string();
    let options_per_question = OPTIONS_PER_QUESTION.to_string();
    let easy = bands.band(DifficultyBand::Easy).join(", ");
    let medium = bands.band(DifficultyBand::Medium).join(", ");
    let hard = bands.band(DifficultyBand::Hard).join(", ");

    fill_template(
        QUIZ_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("questions_per_band", questions_per_band.as_str()),
            ("options_per_question", options_per_question.as_str()),
            ("easy_skills", easy.as_str()),
            ("medium_skills", medium.as_str()),
            ("hard_skills", hard.as_str()),
        ],
    )
}

/// Generates a banded quiz. Fewer than 12 distinct skills fails before any
/// model call.
///
/// Only replies that are not JSON, or not a `QuizSet`, fail. A `QuizSet` with
/// the wrong band size, option count or an answer outside its options is
/// still returned; the deviations are logged as warnings.
pub async fn generate_quiz(skills: &[String], llm: &dyn ModelGateway) -> ModelResult<GeneratedQuiz> {
    let skill_bands = {
        let mut rng = rand::rng();
        draw_skill_bands(skills, &mut rng)?
    };
    let prompt = build_quiz_prompt(&skill_bands);

    let raw = llm.generate(&prompt).await?;
    let questions: QuizSet = parse_reply(&raw)?;

    let issues = questions.shape_issues();
    if !issues.is_empty() {
        warn!("Quiz reply deviates from the requested shape: {}", issues.join("; "));
    }

    Ok(GeneratedQuiz {
        skill_bands,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubGateway;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn skills(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("S{i}")).collect()
    }

    fn question(skill: &str, answer: &str) -> serde_json::Value {
        serde_json::json!({
            "question": format!("What does {skill} do?"),
            "options": ["A", "B", "C", "D"],
            "answer": answer,
            "skill": skill
        })
    }

    fn well_formed_reply() -> String {
        let band = |answer: &str| (0..5).map(|_| question("S1", answer)).collect::<Vec<_>>();
        serde_json::json!({"easy": band("A"), "medium": band("B"), "hard": band("C")}).to_string()
    }

    #[test]
    fn test_fifteen_skills_partition_into_three_bands_of_four() {
        let input = skills(15);
        let mut rng = StdRng::seed_from_u64(7);
        let bands = draw_skill_bands(&input, &mut rng).unwrap();

        for band in DifficultyBand::ALL {
            assert_eq!(bands.band(band).len(), SKILLS_PER_BAND);
        }

        let all: Vec<&String> = DifficultyBand::ALL
            .iter()
            .flat_map(|b| bands.band(*b))
            .collect();
        let unique: HashSet<&String> = all.iter().copied().collect();
        assert_eq!(all.len(), SAMPLED_SKILLS);
        assert_eq!(unique.len(), SAMPLED_SKILLS, "a skill appeared in two bands");
        assert!(all.iter().all(|s| input.contains(s)));
    }

    #[test]
    fn test_exactly_twelve_skills_uses_all_of_them() {
        let input = skills(12);
        let bands = draw_skill_bands(&input, &mut StdRng::seed_from_u64(1)).unwrap();
        let mut all: Vec<String> = [bands.easy, bands.medium, bands.hard].concat();
        all.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_sampling_varies_across_seeds() {
        let input = skills(30);
        let first = draw_skill_bands(&input, &mut StdRng::seed_from_u64(1)).unwrap();
        let differs = (2..20).any(|seed| {
            draw_skill_bands(&input, &mut StdRng::seed_from_u64(seed)).unwrap() != first
        });
        assert!(differs);
    }

    #[test]
    fn test_duplicates_do_not_count_towards_twelve() {
        let mut input = skills(11);
        input.push("S1".to_string());
        input.push(" S2 ".to_string());
        input.push(String::new());
        let failure = draw_skill_bands(&input, &mut StdRng::seed_from_u64(3)).unwrap_err();
        assert!(matches!(failure, ModelFailure::Precondition(_)));
        assert!(failure.to_string().contains("found 11"));
    }

    #[test]
    fn test_distinct_skills_keeps_first_occurrence_order() {
        let input: Vec<String> = ["Rust", " Go", "Rust", "", "SQL", "Go"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(distinct_skills(&input), vec!["Rust", "Go", "SQL"]);
    }

    #[test]
    fn test_prompt_names_every_band_and_skill() {
        let bands = draw_skill_bands(&skills(12), &mut StdRng::seed_from_u64(5)).unwrap();
        let prompt = build_quiz_prompt(&bands);
        assert!(prompt.contains(&format!("Easy skills: {}", bands.easy.join(", "))));
        assert!(prompt.contains(&format!("Medium skills: {}", bands.medium.join(", "))));
        assert!(prompt.contains(&format!("Hard skills: {}", bands.hard.join(", "))));
        assert!(prompt.contains("exactly 5 questions per difficulty level"));
        assert!(prompt.contains("exactly 4 options"));
        assert!(!prompt.contains("{json_only}"));
    }

    #[test]
    fn test_placeholder_named_skill_stays_in_its_band() {
        let bands = SkillBands {
            easy: ["{hard_skills}", "b", "c", "d"].map(String::from).to_vec(),
            medium: ["{easy_skills}", "f", "g", "h"].map(String::from).to_vec(),
            hard: ["i", "j", "k", "l"].map(String::from).to_vec(),
        };
        let prompt = build_quiz_prompt(&bands);
        assert!(prompt.contains("- Easy skills: {hard_skills}, b, c, d\n"));
        assert!(prompt.contains("- Medium skills: {easy_skills}, f, g, h\n"));
        assert!(prompt.contains("- Hard skills: i, j, k, l\n"));
    }

    #[tokio::test]
    async fn test_too_few_skills_makes_no_model_call() {
        for n in [0, 1, 11] {
            let llm = StubGateway::replying(&[&well_formed_reply()]);
            let failure = generate_quiz(&skills(n), &llm).await.unwrap_err();
            assert!(matches!(failure, ModelFailure::Precondition(_)));
            assert_eq!(llm.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_well_formed_reply_has_expected_shape() {
        let reply = format!("```json\n{}\n```", well_formed_reply());
        let llm = StubGateway::replying(&[&reply]);
        let quiz = generate_quiz(&skills(15), &llm).await.unwrap();

        assert_eq!(llm.calls(), 1);
        for band in DifficultyBand::ALL {
            assert_eq!(quiz.skill_bands.band(band).len(), SKILLS_PER_BAND);
            let questions = quiz.questions.band(band);
            assert_eq!(questions.len(), QUESTIONS_PER_BAND);
            for q in questions {
                assert_eq!(q.options.len(), OPTIONS_PER_QUESTION);
                assert!(q.options.contains(&q.answer));
            }
        }
        assert!(quiz.questions.shape_issues().is_empty());
    }

    #[tokio::test]
    async fn test_deviating_shape_is_returned_not_rejected() {
        let reply = serde_json::json!({
            "easy": [question("S1", "A")],
            "medium": [],
            "hard": [question("S2", "not an option")]
        })
        .to_string();
        let llm = StubGateway::replying(&[reply.as_str()]);
        let quiz = generate_quiz(&skills(12), &llm).await.unwrap();

        assert_eq!(quiz.questions.easy.len(), 1);
        assert!(quiz.questions.medium.is_empty());
        assert!(!quiz.questions.shape_issues().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_reply_keeps_raw_text() {
        let llm = StubGateway::replying(&["not json at all"]);
        let failure = generate_quiz(&skills(12), &llm).await.unwrap_err();
        assert_eq!(failure.raw_response(), Some("not json at all"));
    }

    #[tokio::test]
    async fn test_json_of_wrong_shape_is_malformed() {
        let llm = StubGateway::replying(&[r#"{"easy": []}"#]);
        let failure = generate_quiz(&skills(12), &llm).await.unwrap_err();
        assert!(matches!(failure, ModelFailure::MalformedOutput { .. }));
    }

    #[test]
    fn test_shape_issues_are_reported() {
        let set = QuizSet {
            easy: vec![QuizQuestion {
                question: "q".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                answer: "Z".to_string(),
                skill: "Rust".to_string(),
            }],
            medium: Vec::new(),
            hard: Vec::new(),
        };
        let issues = set.shape_issues();
        assert!(issues.iter().any(|i| i.contains("easy has 1 questions")));
        assert!(issues.iter().any(|i| i.contains("2 options")));
        assert!(issues.iter().any(|i| i.contains("not one of its options")));
        assert!(issues.iter().any(|i| i.starts_with("hard has 0")));
    }

    #[test]
    fn test_difficulty_band_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DifficultyBand::Medium).unwrap(),
            "\"medium\""
        );
    }
}
