use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, Rule, first_match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TestResult {
    PositiveQuantiferon,
    PositivePpd,
    Negative,
    NotDone,
}

impl TestResult {
    pub fn is_positive(&self) -> bool {
        matches!(self, TestResult::PositiveQuantiferon | TestResult::PositivePpd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TbSymptom {
    Cough,
    Hemoptysis,
    Fever,
    NightSweats,
    WeightLoss,
    Fatigue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CxrFinding {
    Normal,
    Infiltrates,
    Cavitation,
    Miliary,
    PleuralEffusion,
}

impl CxrFinding {
    /// Patterns that point at active disease.
    pub fn suggests_active(&self) -> bool {
        matches!(
            self,
            CxrFinding::Infiltrates | CxrFinding::Cavitation | CxrFinding::Miliary
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TbInput {
    pub test_result: Option<TestResult>,
    pub symptoms: BTreeSet<TbSymptom>,
    pub cxr: Option<CxrFinding>,
}

impl TbInput {
    fn positive_test(&self) -> bool {
        self.test_result.is_some_and(|t| t.is_positive())
    }

    fn has_symptoms(&self) -> bool {
        !self.symptoms.is_empty()
    }

    fn active_cxr(&self) -> bool {
        self.cxr.is_some_and(|c| c.suggests_active())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TbClassification {
    Latent,
    Active,
    Possible,
    LowProbability,
}

impl TbClassification {
    pub fn label(&self) -> &'static str {
        match self {
            TbClassification::Latent => "Latent TB Infection (LTBI)",
            TbClassification::Active => "Active TB (Suspected or Confirmed)",
            TbClassification::Possible => "TB Possible - Further Testing Needed",
            TbClassification::LowProbability => "Low Probability of TB",
        }
    }

    pub fn isolation_required(&self) -> bool {
        matches!(self, TbClassification::Active)
    }

    pub fn management(&self) -> &'static [&'static str] {
        match self {
            TbClassification::Latent => &[
                "No active disease - patient is not contagious",
                "Treatment to prevent progression to active TB (educational)",
                "Typical regimen: Isoniazid or rifampin (educational concept)",
                "No isolation required",
            ],
            TbClassification::Active => &[
                "Patient is potentially contagious",
                "Airborne isolation required",
                "Sputum AFB smear and culture needed",
                "Multi-drug treatment regimen (educational)",
                "Typical regimen: RIPE (Rifampin, Isoniazid, Pyrazinamide, Ethambutol)",
                "Treatment duration: 6-9 months minimum",
            ],
            TbClassification::Possible => &[
                "Consider TB even with negative screening tests",
                "Obtain chest X-ray if not done",
                "Sputum AFB smear and culture",
                "Consider molecular testing (GeneXpert MTB/RIF)",
            ],
            TbClassification::LowProbability => &[
                "No evidence of TB infection",
                "Consider alternative diagnoses",
            ],
        }
    }
}

fn latent(i: &TbInput) -> bool {
    i.positive_test() && !i.has_symptoms() && i.cxr == Some(CxrFinding::Normal)
}

fn active(i: &TbInput) -> bool {
    i.positive_test() && (i.has_symptoms() || i.active_cxr())
}

fn possible(i: &TbInput) -> bool {
    !i.positive_test() && i.has_symptoms()
}

/// Checked top to bottom; anything unmatched is low probability.
pub const RULES: &[Rule<TbInput, TbClassification>] = &[
    Rule {
        name: "positive test, asymptomatic, normal CXR",
        when: latent,
        outcome: TbClassification::Latent,
    },
    Rule {
        name: "positive test with symptoms or active CXR pattern",
        when: active,
        outcome: TbClassification::Active,
    },
    Rule {
        name: "negative or missing test with symptoms",
        when: possible,
        outcome: TbClassification::Possible,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TbResult {
    pub classification: TbClassification,
    pub management: Vec<String>,
    pub isolation: bool,
}

pub fn classify(input: &TbInput) -> TbResult {
    let classification = first_match(RULES, input)
        .map_or(TbClassification::LowProbability, |rule| rule.outcome);
    TbResult {
        classification,
        management: classification
            .management()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        isolation: classification.isolation_required(),
    }
}

impl From<&TbResult> for Evaluation {
    fn from(r: &TbResult) -> Self {
        Evaluation::new("tuberculosis", r.classification.label())
            .guidance(r.management.iter().cloned())
            .flag("isolation", "Airborne isolation required", r.isolation)
    }
}

/// Latent versus active tuberculosis triage.
pub struct TbClassifier;

impl Calculator for TbClassifier {
    fn id(&self) -> &str {
        "tuberculosis"
    }

    fn name(&self) -> &str {
        "TB Classification"
    }

    fn topic(&self) -> TopicId {
        TopicId::Tuberculosis
    }

    fn description(&self) -> &str {
        "Latent versus active TB from screening test, symptoms and chest X-ray"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::choice(
                    "test_result",
                    "TB screening test",
                    &[
                        ("positive_quantiferon", "Positive QuantiFERON/IGRA"),
                        ("positive_ppd", "Positive PPD/TST"),
                        ("negative", "Negative test"),
                        ("not_done", "Not performed"),
                    ],
                ),
                InputField::multi_select(
                    "symptoms",
                    "Symptoms",
                    &[
                        ("cough", "Persistent cough (>3 weeks)"),
                        ("hemoptysis", "Hemoptysis (coughing blood)"),
                        ("fever", "Fever"),
                        ("night_sweats", "Night sweats"),
                        ("weight_loss", "Weight loss"),
                        ("fatigue", "Fatigue"),
                    ],
                ),
                InputField::choice(
                    "cxr",
                    "Chest X-ray findings",
                    &[
                        ("normal", "Normal"),
                        ("infiltrates", "Infiltrates (upper lobe)"),
                        ("cavitation", "Cavitation"),
                        ("miliary", "Miliary pattern (small nodules)"),
                        ("pleural_effusion", "Pleural effusion"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let parsed = TbInput {
            test_result: input.choice("test_result")?,
            symptoms: input.selections("symptoms")?,
            cxr: input.choice("cxr")?,
        };
        Ok(Evaluation::from(&classify(&parsed)))
    }
}
