//! Session Orchestrator — applies one user action at a time to a `SessionState`.
//!
//! Phases: collecting_info → questions_presented → awaiting_followup, and any → exited.
//! Every transition takes the session by `&mut`; the store decides whether the
//! session may still be mutated at all.

use rand::Rng;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::candidate::models::{CandidateForm, CandidateRecord};
use crate::config::Config;
use crate::errors::AppError;
use crate::interview::generator::{generate_question_batch, InterviewQuestion};
use crate::llm_client::TextGenerator;
use crate::session::models::{SessionPhase, SessionState};
use crate::session::store::SessionStore;

pub const RECORDED_MESSAGE: &str = "Your details have been securely recorded!";
pub const SPECIFY_NUMBER_MESSAGE: &str = "Please specify a valid question number.";
pub const INVALID_NUMBER_MESSAGE: &str =
    "Invalid question number. Please ask about a valid question.";
pub const FAREWELL_MESSAGE: &str = "Thank you for using TalentScout! Have a great day! 👋";
pub const FALLBACK_MESSAGE: &str =
    "I'm not sure I understand. Try asking about a question or type 'help' for guidance.";

const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];

impl SessionState {
    /// Replaces the candidate record and starts a new submission, returning its id.
    /// Questions from an earlier submission are untouched.
    pub fn record_candidate(&mut self, record: CandidateRecord) -> Uuid {
        let submission = Uuid::new_v4();
        self.candidate = Some(record);
        self.submission_id = Some(submission);
        submission
    }

    /// Installs a new question set together with an empty answer for every question.
    pub fn present_questions(&mut self, questions: Vec<InterviewQuestion>) {
        self.answers = (0..questions.len()).map(|i| (i, String::new())).collect();
        self.questions = questions;
        self.phase = SessionPhase::QuestionsPresented;
    }

    /// Installs `questions` only while `submission` is still the latest submission and
    /// the session has not exited. Returns whether the set was installed.
    pub fn present_questions_for(
        &mut self,
        submission: Uuid,
        questions: Vec<InterviewQuestion>,
    ) -> bool {
        if self.is_exited() || self.submission_id != Some(submission) {
            return false;
        }
        self.present_questions(questions);
        true
    }

    pub fn record_answer(&mut self, index: usize, answer: String) -> Result<(), AppError> {
        let slot = self.answers.get_mut(&index).ok_or_else(|| {
            AppError::Validation(format!(
                "No question at index {index}; {} questions are available",
                self.questions.len()
            ))
        })?;
        *slot = answer;
        Ok(())
    }

    /// Handles "Clarify question 2"-style input.
    ///
    /// Every ASCII digit in `text` is concatenated and read as a 1-based question
    /// number, so "question 1 or 2" asks about question 12. Empty input is ignored.
    pub fn request_follow_up(&mut self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let message = if digits.is_empty() {
            SPECIFY_NUMBER_MESSAGE.to_string()
        } else {
            // Overflow means the number is certainly out of range.
            match digits.parse::<usize>() {
                Ok(number) if (1..=self.questions.len()).contains(&number) => format!(
                    "Clarification for Question {number}: {}",
                    self.questions[number - 1].text
                ),
                _ => INVALID_NUMBER_MESSAGE.to_string(),
            }
        };

        self.follow_up = Some(message.clone());
        if matches!(
            self.phase,
            SessionPhase::QuestionsPresented | SessionPhase::AwaitingFollowUp
        ) {
            self.phase = SessionPhase::AwaitingFollowUp;
        }
        Some(message)
    }

    /// Free-text input: exit keywords end the session, anything else non-blank is logged.
    pub fn handle_message(&mut self, text: &str) -> Option<&'static str> {
        if EXIT_KEYWORDS.contains(&text.to_lowercase().as_str()) {
            self.phase = SessionPhase::Exited;
            Some(FAREWELL_MESSAGE)
        } else if !text.trim().is_empty() {
            self.conversation.push(text.to_string());
            Some(FALLBACK_MESSAGE)
        } else {
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form submission
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SubmissionOutcome {
    pub message: &'static str,
    /// Error banner when question generation failed or was cut short.
    pub error: Option<String>,
    pub session: SessionState,
}

/// Uniform draw from `min..=max`.
pub fn sample_question_count(min: usize, max: usize) -> usize {
    rand::thread_rng().gen_range(min..=max)
}

/// Records the candidate, then (for a non-empty tech stack) generates a fresh question set.
///
/// Generation runs without holding the store lock. A failed batch leaves the previous
/// question set in place and is reported through `SubmissionOutcome::error`. A batch
/// that finishes after the session was reset, exited or resubmitted is dropped.
pub async fn submit_candidate(
    store: &SessionStore,
    generator: &dyn TextGenerator,
    config: &Config,
    session_id: Uuid,
    form: CandidateForm,
) -> Result<SubmissionOutcome, AppError> {
    let record = CandidateRecord::try_from(form)?;
    let tech_stack = record.tech_stack.clone();

    let submission = store
        .update_active(session_id, |session| Ok(session.record_candidate(record)))
        .await?;
    info!("Session {session_id}: candidate recorded (submission {submission})");

    let mut banner = None;
    let mut questions = Vec::new();

    if !tech_stack.is_empty() {
        let count = sample_question_count(config.min_questions, config.max_questions);
        info!("Session {session_id}: generating {count} questions");

        match generate_question_batch(generator, &tech_stack, count, config.batch_failure_policy)
            .await
        {
            Ok(batch) => {
                if let Some(reason) = &batch.interrupted_by {
                    banner = Some(format!("Error generating questions: {reason}"));
                }
                questions = batch.questions;
            }
            Err(e) => {
                error!("Session {session_id}: question generation failed: {e}");
                banner = Some(format!("Error generating questions: {e}"));
            }
        }
    }

    let session = if questions.is_empty() {
        store.get(session_id).await?
    } else {
        store
            .update(session_id, |session| {
                if !session.present_questions_for(submission, questions) {
                    warn!(
                        "Session {session_id}: submission {submission} superseded during generation, discarding its questions"
                    );
                }
                Ok(session.clone())
            })
            .await?
    };

    Ok(SubmissionOutcome {
        message: RECORDED_MESSAGE,
        error: banner,
        session,
    })
}
