use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::question::AnswerFeedback;

/// A clinical vignette worked through as a sequence of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseScenario {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub presentation: String,
    pub questions: Vec<CaseQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub next_step: Option<String>,
}

impl CaseQuestion {
    pub fn feedback(&self, selected: usize) -> AnswerFeedback {
        AnswerFeedback {
            selected,
            correct_answer: self.correct_answer,
            is_correct: selected == self.correct_answer,
            explanation: self.explanation.clone(),
            next_step: self.next_step.clone(),
        }
    }
}
