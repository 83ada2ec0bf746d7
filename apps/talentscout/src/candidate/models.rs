use serde::{Deserialize, Serialize};

use crate::candidate::anonymizer::anonymize;
use crate::errors::AppError;

pub const MAX_YEARS_EXPERIENCE: i64 = 30;

fn default_years_experience() -> i64 {
    1
}

/// The candidate information form as submitted.
///
/// `years_experience` accepts any JSON integer so out-of-range values reach
/// `validate` instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_years_experience")]
    pub years_experience: i64,
    #[serde(default)]
    pub desired_position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tech_stack: String,
}

impl CandidateForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0..=MAX_YEARS_EXPERIENCE).contains(&self.years_experience) {
            return Err(AppError::Validation(format!(
                "years_experience must be between 0 and {MAX_YEARS_EXPERIENCE}, got {}",
                self.years_experience
            )));
        }
        Ok(())
    }
}

/// Candidate profile held in the session. Email and phone survive only as `anonymized_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub full_name: String,
    pub anonymized_id: String,
    pub years_experience: u8,
    pub desired_position: String,
    pub location: String,
    pub tech_stack: String,
}

impl TryFrom<CandidateForm> for CandidateRecord {
    type Error = AppError;

    fn try_from(form: CandidateForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let years_experience = u8::try_from(form.years_experience).map_err(|_| {
            AppError::Validation(format!(
                "years_experience out of range: {}",
                form.years_experience
            ))
        })?;
        Ok(CandidateRecord {
            anonymized_id: anonymize(&form.email, &form.phone),
            full_name: form.full_name,
            years_experience,
            desired_position: form.desired_position,
            location: form.location,
            tech_stack: form.tech_stack,
        })
    }
}
