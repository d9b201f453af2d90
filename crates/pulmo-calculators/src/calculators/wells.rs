use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Criterion, Evaluation, InputField, InputSnapshot, read_flags, weighted_total};

pub const CRITERIA: [Criterion; 7] = [
    Criterion {
        id: "dvt_signs",
        label: "Clinical signs/symptoms of DVT",
        description: "Leg swelling, pain, etc. (3 points)",
        weight: 3.0,
    },
    Criterion {
        id: "pe_most_likely",
        label: "PE is #1 diagnosis OR equally likely",
        description: "No alternative diagnosis more likely (3 points)",
        weight: 3.0,
    },
    Criterion {
        id: "heart_rate",
        label: "Heart rate >100 bpm",
        description: "Tachycardia (1.5 points)",
        weight: 1.5,
    },
    Criterion {
        id: "immobilization",
        label: "Immobilization ≥3 days or surgery in past 4 weeks",
        description: "Risk factor (1.5 points)",
        weight: 1.5,
    },
    Criterion {
        id: "previous_pe_dvt",
        label: "Previous PE or DVT",
        description: "Past history (1.5 points)",
        weight: 1.5,
    },
    Criterion {
        id: "hemoptysis",
        label: "Hemoptysis",
        description: "Coughing blood (1 point)",
        weight: 1.0,
    },
    Criterion {
        id: "malignancy",
        label: "Malignancy",
        description: "Active cancer or treatment within 6 months (1 point)",
        weight: 1.0,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WellsInput {
    pub dvt_signs: bool,
    pub pe_most_likely: bool,
    pub heart_rate: bool,
    pub immobilization: bool,
    pub previous_pe_dvt: bool,
    pub hemoptysis: bool,
    pub malignancy: bool,
}

impl WellsInput {
    pub fn flags(&self) -> [bool; 7] {
        [
            self.dvt_signs,
            self.pe_most_likely,
            self.heart_rate,
            self.immobilization,
            self.previous_pe_dvt,
            self.hemoptysis,
            self.malignancy,
        ]
    }

    pub fn from_flags(f: [bool; 7]) -> Self {
        Self {
            dvt_signs: f[0],
            pe_most_likely: f[1],
            heart_rate: f[2],
            immobilization: f[3],
            previous_pe_dvt: f[4],
            hemoptysis: f[5],
            malignancy: f[6],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WellsProbability {
    Low,
    Moderate,
    High,
}

impl WellsProbability {
    /// `< 2` low, `2..=6` moderate, `> 6` high.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 2.0 => WellsProbability::Low,
            s if s <= 6.0 => WellsProbability::Moderate,
            _ => WellsProbability::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WellsProbability::Low => "Low",
            WellsProbability::Moderate => "Moderate",
            WellsProbability::High => "High",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            WellsProbability::Low => {
                "PE unlikely. Consider PERC rule or D-dimer if PERC positive"
            }
            WellsProbability::Moderate => "Consider D-dimer. If elevated, proceed to CTPA",
            WellsProbability::High => {
                "High pre-test probability. Proceed directly to CTPA (avoid D-dimer in high-risk)"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WellsResult {
    pub score: f64,
    pub probability: WellsProbability,
    pub recommendation: String,
}

pub fn assess(input: &WellsInput) -> WellsResult {
    let score = weighted_total(&CRITERIA, &input.flags());
    let probability = WellsProbability::from_score(score);
    WellsResult {
        score,
        probability,
        recommendation: probability.recommendation().to_string(),
    }
}

impl From<&WellsResult> for Evaluation {
    fn from(r: &WellsResult) -> Self {
        Evaluation::new("wells", r.probability.label())
            .with_score(r.score)
            .detail("Score", format!("{}", r.score))
            .guidance([r.recommendation.clone()])
    }
}

/// Wells pre-test probability score for pulmonary embolism.
pub struct WellsPe;

impl Calculator for WellsPe {
    fn id(&self) -> &str {
        "wells"
    }

    fn name(&self) -> &str {
        "Wells Score for PE"
    }

    fn topic(&self) -> TopicId {
        TopicId::PulmonaryEmbolism
    }

    fn description(&self) -> &str {
        "Pre-test probability of PE guiding D-dimer versus direct imaging"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> =
            std::sync::LazyLock::new(|| CRITERIA.iter().map(InputField::flag).collect());
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let flags = read_flags(input, &CRITERIA)?;
        Ok(Evaluation::from(&assess(&WellsInput::from_flags(flags))))
    }
}
