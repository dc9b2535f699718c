// Resume intake: PDF text extraction, model-driven field extraction, and the
// resume endpoints (upload, lookup, list, re-extract).
// All model calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod pdf;
pub mod prompts;
