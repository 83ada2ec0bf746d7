//! Question Generator — builds tiered prompts, calls the inference endpoint and
//! turns its reply into interview question text.
//!
//! Flow per question: classify tech stack → tier prompt → `TextGenerator::generate` →
//! strip echoed instructions → capitalize.
//!
//! A batch runs tiers 1..=count one after another. Upstream rejections and empty
//! generations stay in their slot as `Error: ...` text; transport failures are handled
//! according to `BatchFailurePolicy`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::interview::classifier::classify_tech_stack;
use crate::interview::prompts::{build_question_prompt, Tier};
use crate::llm_client::prompts::ECHO_MARKER;
use crate::llm_client::{InferenceReply, LlmError, TextGenerator};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum QuestionError {
    /// The endpoint answered with a non-success status.
    #[error("Error: {0}")]
    Upstream(Value),

    #[error("Error: No valid question generated")]
    Empty,

    /// The endpoint could not be reached or its success body was unusable.
    #[error(transparent)]
    Transport(#[from] LlmError),
}

/// One generated question, tagged with the tier it was generated at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub tier: Tier,
    pub text: String,
    /// True when `text` is an `Error: ...` message rather than a question.
    pub generation_failed: bool,
}

/// What to do with already generated questions when a transport failure interrupts a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchFailurePolicy {
    /// Fail the whole batch; nothing generated so far is kept.
    #[default]
    DiscardAll,
    /// Keep the questions generated before the failure.
    KeepPartial,
}

impl FromStr for BatchFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard_all" => Ok(BatchFailurePolicy::DiscardAll),
            "keep_partial" => Ok(BatchFailurePolicy::KeepPartial),
            other => anyhow::bail!(
                "unknown batch failure policy '{other}' (expected 'discard_all' or 'keep_partial')"
            ),
        }
    }
}

/// Result of a question batch that was not discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionBatch {
    pub questions: Vec<InterviewQuestion>,
    /// Set only under `KeepPartial` when a transport failure cut the batch short.
    pub interrupted_by: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Single question
// ────────────────────────────────────────────────────────────────────────────

/// Generates one question for `tech_stack` at tier `tier_number` (out-of-range → tier 1).
pub async fn generate_question(
    generator: &dyn TextGenerator,
    tech_stack: &str,
    tier_number: i64,
) -> Result<String, QuestionError> {
    let tier = Tier::from_number(tier_number);
    let tech_category = classify_tech_stack(tech_stack);
    let prompt = build_question_prompt(tier, tech_stack, &tech_category);

    match generator.generate(&prompt).await? {
        InferenceReply::Generated(text) => extract_question(&text),
        InferenceReply::Rejected { status, payload } => {
            warn!(
                "Question generation at tier {} rejected with {}",
                tier.number(),
                status
            );
            Err(QuestionError::Upstream(payload))
        }
    }
}

/// Turns raw generated text into question text.
///
/// Text up to and including the first `ECHO_MARKER` is dropped, then the first
/// character is upper-cased.
pub fn extract_question(generated_text: &str) -> Result<String, QuestionError> {
    let text = generated_text.trim();
    if text.is_empty() {
        return Err(QuestionError::Empty);
    }

    let question = match text.split_once(ECHO_MARKER) {
        Some((_, rest)) => rest.trim(),
        None => text,
    };

    Ok(capitalize_first(question))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Batch
// ────────────────────────────────────────────────────────────────────────────

/// Generates `count` questions sequentially at tiers 1..=count.
///
/// Returns `Err` only under `DiscardAll` when a transport failure occurs.
pub async fn generate_question_batch(
    generator: &dyn TextGenerator,
    tech_stack: &str,
    count: usize,
    policy: BatchFailurePolicy,
) -> Result<QuestionBatch, LlmError> {
    let mut questions = Vec::with_capacity(count);

    for index in 0..count {
        let tier_number = index as i64 + 1;
        let tier = Tier::from_number(tier_number);

        let (text, generation_failed) =
            match generate_question(generator, tech_stack, tier_number).await {
                Ok(text) => (text, false),
                Err(QuestionError::Transport(e)) => {
                    return match policy {
                        BatchFailurePolicy::DiscardAll => {
                            warn!(
                                "Question batch aborted at question {}/{}; discarding {} generated",
                                index + 1,
                                count,
                                questions.len()
                            );
                            Err(e)
                        }
                        BatchFailurePolicy::KeepPartial => {
                            warn!(
                                "Question batch interrupted at question {}/{}; keeping {} generated",
                                index + 1,
                                count,
                                questions.len()
                            );
                            Ok(QuestionBatch {
                                questions,
                                interrupted_by: Some(e.to_string()),
                            })
                        }
                    };
                }
                Err(e) => (e.to_string(), true),
            };

        questions.push(InterviewQuestion {
            tier,
            text,
            generation_failed,
        });
    }

    info!("Generated {} interview questions", questions.len());

    Ok(QuestionBatch {
        questions,
        interrupted_by: None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{InferenceReply, LlmError, TextGenerator};

    /// Replays scripted replies in order and records every prompt it receives.
    /// Once the script runs out it keeps answering with a fixed question.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<InferenceReply, LlmError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(replies: Vec<Result<InferenceReply, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<InferenceReply, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(InferenceReply::Generated("what is a trait?".to_string())))
        }
    }

    pub fn generated(text: &str) -> Result<InferenceReply, LlmError> {
        Ok(InferenceReply::Generated(text.to_string()))
    }

    pub fn transport_failure() -> Result<InferenceReply, LlmError> {
        Err(LlmError::UnexpectedResponse("connection reset".to_string()))
    }
}
