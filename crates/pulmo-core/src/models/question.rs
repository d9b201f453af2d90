use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A multiple-choice self-assessment question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u32,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }

    pub fn feedback(&self, selected: usize) -> AnswerFeedback {
        AnswerFeedback {
            selected,
            correct_answer: self.correct_answer,
            is_correct: self.is_correct(selected),
            explanation: self.explanation.clone(),
            next_step: None,
        }
    }
}

/// Shown once an answer is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerFeedback {
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
    /// Narrative continuation, only present for case scenario steps.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_step: Option<String>,
}
