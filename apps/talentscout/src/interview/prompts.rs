use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::WORD_LIMIT_INSTRUCTION;

/// Difficulty tier of a generated question. Question `i` of a batch uses tier `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic = 1,
    Intermediate = 2,
    Advanced = 3,
    VeryAdvanced = 4,
    Expert = 5,
}

impl Tier {
    /// Any value outside 1..=5 falls back to `Basic`.
    pub fn from_number(n: i64) -> Self {
        match n {
            2 => Tier::Intermediate,
            3 => Tier::Advanced,
            4 => Tier::VeryAdvanced,
            5 => Tier::Expert,
            _ => Tier::Basic,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Builds the tier's prompt around the raw tech stack and its classifier categories.
pub fn build_question_prompt(tier: Tier, tech_stack: &str, tech_category: &str) -> String {
    let body = match tier {
        Tier::Basic => format!(
            "Generate a basic technical interview question for a candidate skilled in {tech_stack}. \
             The question should be related to {tech_category}. Focus on basic concepts."
        ),
        Tier::Intermediate => format!(
            "Generate an intermediate technical interview question for a candidate skilled in {tech_stack}. \
             Ensure the question covers {tech_category} and includes a practical scenario."
        ),
        Tier::Advanced => format!(
            "Generate an advanced technical interview question for a candidate skilled in {tech_stack}. \
             Focus on {tech_category} with a real-world problem or case study."
        ),
        Tier::VeryAdvanced => format!(
            "Generate a very advanced technical interview question for a candidate skilled in {tech_stack}. \
             Ensure it challenges the candidate on {tech_category} optimization and problem-solving."
        ),
        Tier::Expert => format!(
            "Generate an expert-level technical interview question for a candidate skilled in {tech_stack}. \
             The question should assess expertise in {tech_category}, scalability, and design thinking."
        ),
    };

    // The templates run straight into the length cap with no separating space.
    format!("{body}{WORD_LIMIT_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_number_in_range() {
        assert_eq!(Tier::from_number(1), Tier::Basic);
        assert_eq!(Tier::from_number(2), Tier::Intermediate);
        assert_eq!(Tier::from_number(3), Tier::Advanced);
        assert_eq!(Tier::from_number(4), Tier::VeryAdvanced);
        assert_eq!(Tier::from_number(5), Tier::Expert);
    }

    #[test]
    fn test_tier_out_of_range_defaults_to_basic() {
        for n in [0, -1, 6, 42, i64::MAX, i64::MIN] {
            assert_eq!(Tier::from_number(n), Tier::Basic, "tier {n}");
        }
    }

    #[test]
    fn test_tier_number_round_trips() {
        for n in 1..=5 {
            assert_eq!(Tier::from_number(n).number() as i64, n);
        }
    }

    #[test]
    fn test_basic_prompt_is_exact() {
        let prompt = build_question_prompt(Tier::Basic, "Python", "General programming");
        assert_eq!(
            prompt,
            "Generate a basic technical interview question for a candidate skilled in Python. \
             The question should be related to General programming. Focus on basic concepts.\
             In no more than 250 words"
        );
    }

    #[test]
    fn test_every_prompt_embeds_inputs_and_word_limit() {
        for n in 1..=5 {
            let prompt = build_question_prompt(Tier::from_number(n), "Rust, Docker", "Containers");
            assert!(prompt.contains("skilled in Rust, Docker."));
            assert!(prompt.contains("Containers"));
            assert!(prompt.ends_with("In no more than 250 words"));
        }
    }

    #[test]
    fn test_prompts_differ_per_tier() {
        let expert = build_question_prompt(Tier::Expert, "SQL", "Databases");
        assert!(expert.starts_with("Generate an expert-level"));
        assert!(expert.contains("scalability, and design thinking"));

        let very_advanced = build_question_prompt(Tier::VeryAdvanced, "SQL", "Databases");
        assert!(very_advanced.contains("Databases optimization and problem-solving"));
    }
}
