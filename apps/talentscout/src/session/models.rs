use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidate::models::CandidateRecord;
use crate::interview::generator::InterviewQuestion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    CollectingInfo,
    QuestionsPresented,
    AwaitingFollowUp,
    Exited,
}

/// Everything one candidate's interaction accumulates between session creation and reset.
///
/// `answers` always has exactly one key per index of `questions` as of the last
/// question batch; both are replaced together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub phase: SessionPhase,
    pub candidate: Option<CandidateRecord>,
    /// Identifies the latest form submission; a question batch is only installed
    /// while it still belongs to this submission.
    pub submission_id: Option<Uuid>,
    pub questions: Vec<InterviewQuestion>,
    pub answers: BTreeMap<usize, String>,
    pub follow_up: Option<String>,
    pub conversation: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phase: SessionPhase::default(),
            candidate: None,
            submission_id: None,
            questions: Vec::new(),
            answers: BTreeMap::new(),
            follow_up: None,
            conversation: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_exited(&self) -> bool {
        self.phase == SessionPhase::Exited
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
