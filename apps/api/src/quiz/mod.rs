// Skill quiz: random skill bands, MCQ generation, and the generate-mcqs endpoint.

pub mod generator;
pub mod handlers;
pub mod prompts;
