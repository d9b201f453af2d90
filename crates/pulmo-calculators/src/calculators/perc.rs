use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Criterion, Evaluation, InputField, InputSnapshot, count_present, read_flags};

pub const CRITERIA: [Criterion; 8] = [
    Criterion {
        id: "age_50",
        label: "Age ≥50 years",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "heart_rate_100",
        label: "Heart rate ≥100 bpm",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "spo2_below_95",
        label: "SpO₂ <95% on room air",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "hemoptysis",
        label: "Hemoptysis",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "estrogen",
        label: "Estrogen use (oral contraceptives, HRT)",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "prior_pe_dvt",
        label: "Prior PE or DVT",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "surgery_trauma",
        label: "Surgery or trauma within 4 weeks",
        description: "",
        weight: 1.0,
    },
    Criterion {
        id: "unilateral_leg_swelling",
        label: "Unilateral leg swelling",
        description: "",
        weight: 1.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PercOutcome {
    Negative,
    Positive,
}

impl PercOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PercOutcome::Negative => "PERC Negative",
            PercOutcome::Positive => "PERC Positive",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            PercOutcome::Negative => {
                "PE can be safely ruled out. No further testing needed (in low-risk patients)"
            }
            PercOutcome::Positive => {
                "Cannot rule out PE with PERC. Proceed to Wells score and/or D-dimer"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercResult {
    pub positive_count: u32,
    pub outcome: PercOutcome,
    pub recommendation: String,
}

/// `present` follows the order of [`CRITERIA`].
pub fn assess(present: &[bool; 8]) -> PercResult {
    let positive_count = count_present(present);
    let outcome = if positive_count == 0 {
        PercOutcome::Negative
    } else {
        PercOutcome::Positive
    };
    PercResult {
        positive_count,
        outcome,
        recommendation: outcome.recommendation().to_string(),
    }
}

impl From<&PercResult> for Evaluation {
    fn from(r: &PercResult) -> Self {
        Evaluation::new("perc", r.outcome.label())
            .with_score(f64::from(r.positive_count))
            .detail("Criteria present", format!("{} / 8", r.positive_count))
            .guidance([r.recommendation.clone()])
    }
}

/// Pulmonary Embolism Rule-out Criteria, for low clinical suspicion only.
pub struct Perc;

impl Calculator for Perc {
    fn id(&self) -> &str {
        "perc"
    }

    fn name(&self) -> &str {
        "PERC Rule"
    }

    fn topic(&self) -> TopicId {
        TopicId::PulmonaryEmbolism
    }

    fn description(&self) -> &str {
        "Rule out PE without testing when all eight criteria are absent"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> =
            std::sync::LazyLock::new(|| CRITERIA.iter().map(InputField::flag).collect());
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let flags = read_flags(input, &CRITERIA)?;
        Ok(Evaluation::from(&assess(&flags)))
    }
}
