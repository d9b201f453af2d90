use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The clinical topic modules the reference is organized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TopicId {
    Asthma,
    Copd,
    Pneumonia,
    Tuberculosis,
    PulmonaryEmbolism,
    Ards,
    Osa,
}

impl TopicId {
    pub const ALL: [TopicId; 7] = [
        TopicId::Asthma,
        TopicId::Copd,
        TopicId::Pneumonia,
        TopicId::Tuberculosis,
        TopicId::PulmonaryEmbolism,
        TopicId::Ards,
        TopicId::Osa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicId::Asthma => "asthma",
            TopicId::Copd => "copd",
            TopicId::Pneumonia => "pneumonia",
            TopicId::Tuberculosis => "tuberculosis",
            TopicId::PulmonaryEmbolism => "pulmonary_embolism",
            TopicId::Ards => "ards",
            TopicId::Osa => "osa",
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicId {
    type Err = CoreError;

    /// Accepts the snake_case id as well as the hyphenated route form
    /// (`pulmonary-embolism`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TopicId::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownTopic(s.to_string()))
    }
}

/// A titled block of reference bullet points within a topic page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub title: String,
    pub items: Vec<String>,
}

/// A topic module: static reference content plus the calculators that
/// belong to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: String,
    /// Route path used by the web front end (e.g. `/pulmonary-embolism`).
    pub path: String,
    pub sections: Vec<Section>,
    pub calculator_ids: Vec<String>,
}
