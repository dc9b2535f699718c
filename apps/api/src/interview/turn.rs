//! Interview Turn Generator: produces the next interviewer question, or the
//! end-of-interview sentinel.
//!
//! Stateless: every call receives the full candidate context and at most the
//! latest utterance.

use serde::{Deserialize, Serialize};

use crate::interview::prompts::{
    FIRST_TURN_CONTEXT, FOLLOW_UP_CONTEXT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE, NO_EXPERIENCE,
    NO_PROJECTS, UNKNOWN_NAME,
};
use crate::llm_client::normalize::parse_reply;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{ModelGateway, ModelResult};
use crate::models::StringOrStructured;

pub const INTERVIEW_ENDED: &str = "Interview ended.";
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterviewTurn {
    Question { question: String },
    Ended { message: String },
}

impl InterviewTurn {
    pub fn ended() -> Self {
        InterviewTurn::Ended {
            message: INTERVIEW_ENDED.to_string(),
        }
    }
}

/// What the interviewer knows about the candidate.
#[derive(Debug, Clone, Default)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub projects: Vec<StringOrStructured>,
    pub experience: Vec<StringOrStructured>,
}

/// `exit` in any letter case, nothing else.
pub fn is_exit(candidate_response: Option<&str>) -> bool {
    candidate_response.is_some_and(|r| r.eq_ignore_ascii_case(EXIT_COMMAND))
}

fn listing(entries: &[StringOrStructured], fallback: &str) -> String {
    // Structured entries become compact JSON before they are joined.
    let texts: Vec<String> = entries
        .iter()
        .map(StringOrStructured::to_prompt_text)
        .filter(|t| !t.trim().is_empty())
        .collect();
    if texts.is_empty() {
        fallback.to_string()
    } else {
        texts.join(", ")
    }
}

pub fn build_interview_prompt(
    profile: &CandidateProfile,
    candidate_response: Option<&str>,
) -> String {
    let turn_context = match candidate_response.filter(|r| !r.trim().is_empty()) {
        Some(response) => fill_template(
            FOLLOW_UP_CONTEXT_TEMPLATE,
            &[("candidate_response", response)],
        ),
        None => FIRST_TURN_CONTEXT.to_string(),
    };

    let experience = listing(&profile.experience, NO_EXPERIENCE);
    let projects = listing(&profile.projects, NO_PROJECTS);

    fill_template(
        INTERVIEW_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("name", profile.name.as_deref().unwrap_or(UNKNOWN_NAME)),
            ("experience", experience.as_str()),
            ("projects", projects.as_str()),
            ("turn_context", turn_context.as_str()),
        ],
    )
}

/// Returns the next turn. `exit` ends the interview without a model call.
pub async fn next_turn(
    profile: &CandidateProfile,
    candidate_response: Option<&str>,
    llm: &dyn ModelGateway,
) -> ModelResult<InterviewTurn> {
    if is_exit(candidate_response) {
        return Ok(InterviewTurn::ended());
    }

    let prompt = build_interview_prompt(profile, candidate_response);
    let raw = llm.generate(&prompt).await?;
    parse_reply(&raw)
}
