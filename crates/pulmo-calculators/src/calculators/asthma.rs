use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{
    Evaluation, InputField, InputSnapshot, Rule, ValueRange, check_range, first_match,
};

pub const PEAK_FLOW_RANGE: ValueRange = ValueRange::new(0.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AsthmaSymptom {
    Wheezing,
    SobRest,
    SobActivity,
    ChestTight,
    SpeakSentences,
    SpeakWords,
    Accessory,
    Altered,
}

impl AsthmaSymptom {
    /// Any one of these makes the exacerbation severe.
    pub fn is_severe_marker(&self) -> bool {
        matches!(
            self,
            AsthmaSymptom::SpeakWords | AsthmaSymptom::Accessory | AsthmaSymptom::Altered
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AsthmaInput {
    pub symptoms: BTreeSet<AsthmaSymptom>,
    /// Peak expiratory flow as % of predicted. Optional.
    pub peak_flow: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AsthmaSeverityTier {
    Mild,
    Moderate,
    Severe,
}

impl AsthmaSeverityTier {
    pub fn label(&self) -> &'static str {
        match self {
            AsthmaSeverityTier::Mild => "Mild Exacerbation",
            AsthmaSeverityTier::Moderate => "Moderate Exacerbation",
            AsthmaSeverityTier::Severe => "Severe Exacerbation",
        }
    }

    pub fn management(&self) -> &'static [&'static str] {
        match self {
            AsthmaSeverityTier::Mild => &[
                "Short-acting beta-2 agonist (SABA) every 4-6 hours",
                "Continue controller medications",
                "Monitor symptoms closely",
                "Outpatient management typically appropriate",
            ],
            AsthmaSeverityTier::Moderate => &[
                "SABA every 1-2 hours initially",
                "Systemic corticosteroids (educational)",
                "Oxygen to maintain SpO₂ ≥90%",
                "Consider ED evaluation",
                "May require hospitalization",
            ],
            AsthmaSeverityTier::Severe => &[
                "EMERGENCY - Immediate ED care required",
                "Continuous nebulized SABA",
                "Ipratropium bromide added to SABA",
                "Systemic corticosteroids IV (educational)",
                "High-flow oxygen",
                "Consider magnesium sulfate",
                "ICU consultation if no rapid improvement",
                "Avoid NIPPV in asthma (typically not indicated)",
            ],
        }
    }
}

fn severe(i: &AsthmaInput) -> bool {
    i.symptoms.iter().any(AsthmaSymptom::is_severe_marker) || i.peak_flow.is_some_and(|p| p < 40.0)
}

fn moderate(i: &AsthmaInput) -> bool {
    i.symptoms.contains(&AsthmaSymptom::SpeakSentences)
        || i.peak_flow.is_some_and(|p| (40.0..60.0).contains(&p))
}

/// Anything that matches neither rule is mild.
pub const RULES: &[Rule<AsthmaInput, AsthmaSeverityTier>] = &[
    Rule {
        name: "severe symptom or peak flow <40%",
        when: severe,
        outcome: AsthmaSeverityTier::Severe,
    },
    Rule {
        name: "speaks in sentences or peak flow 40-59%",
        when: moderate,
        outcome: AsthmaSeverityTier::Moderate,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AsthmaAssessment {
    pub severity: AsthmaSeverityTier,
    pub management: Vec<String>,
}

pub fn assess(input: &AsthmaInput) -> Result<AsthmaAssessment, CalculatorError> {
    if let Some(peak_flow) = input.peak_flow {
        check_range("peak_flow", peak_flow, PEAK_FLOW_RANGE)?;
    }

    let severity =
        first_match(RULES, input).map_or(AsthmaSeverityTier::Mild, |rule| rule.outcome);

    Ok(AsthmaAssessment {
        severity,
        management: severity.management().iter().map(|s| s.to_string()).collect(),
    })
}

impl From<&AsthmaAssessment> for Evaluation {
    fn from(a: &AsthmaAssessment) -> Self {
        Evaluation::new("asthma", a.severity.label()).guidance(a.management.iter().cloned())
    }
}

/// Acute asthma exacerbation severity sorter.
pub struct AsthmaSeverity;

impl Calculator for AsthmaSeverity {
    fn id(&self) -> &str {
        "asthma"
    }

    fn name(&self) -> &str {
        "Asthma Severity Sorter"
    }

    fn topic(&self) -> TopicId {
        TopicId::Asthma
    }

    fn description(&self) -> &str {
        "Exacerbation severity from presenting symptoms and peak flow"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::multi_select(
                    "symptoms",
                    "Symptoms",
                    &[
                        ("wheezing", "Wheezing"),
                        ("sob_rest", "Shortness of breath at rest"),
                        ("sob_activity", "Shortness of breath with activity"),
                        ("chest_tight", "Chest tightness"),
                        ("speak_sentences", "Can only speak in sentences"),
                        ("speak_words", "Can only speak in words"),
                        ("accessory", "Using accessory muscles"),
                        ("altered", "Altered mental status"),
                    ],
                ),
                InputField::number(
                    "peak_flow",
                    "Peak flow",
                    PEAK_FLOW_RANGE,
                    Some("% of predicted"),
                )
                .optional(),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let parsed = AsthmaInput {
            symptoms: input.selections("symptoms")?,
            peak_flow: input.optional_number("peak_flow")?,
        };
        Ok(Evaluation::from(&assess(&parsed)?))
    }
}
