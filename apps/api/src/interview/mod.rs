// Mock interview: one stateless model call per turn.
// Only the latest candidate utterance is sent; callers that want longer
// memory must fold the transcript into that utterance themselves.

pub mod handlers;
pub mod prompts;
pub mod turn;
