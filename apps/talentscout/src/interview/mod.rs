// Interview question pipeline: tech-stack classification, tiered prompts, generation.
// All inference calls go through llm_client::TextGenerator.

pub mod classifier;
pub mod generator;
pub mod handlers;
pub mod prompts;
