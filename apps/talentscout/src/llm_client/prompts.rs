// Shared prompt fragments.
// Tier-specific templates live in interview/prompts.rs.

/// Length cap appended to every question prompt.
pub const WORD_LIMIT_INSTRUCTION: &str = "In no more than 250 words";

/// Some models echo the length cap before the question itself
/// ("In no more than 250 words, what is ..."). Text up to and including
/// this marker is discarded from generated output.
pub const ECHO_MARKER: &str = "250 words, ";
