use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, Rule, first_match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CareSetting {
    Community,
    HospitalFloor,
    Icu,
    MechanicallyVentilated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Onset {
    BeforeAdmission,
    #[serde(rename = "within_48h")]
    Within48h,
    #[serde(rename = "after_48h_hospital")]
    After48hHospital,
    #[serde(rename = "after_48h_intubation")]
    After48hIntubation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PneumoniaInput {
    pub setting: Option<CareSetting>,
    pub onset: Option<Onset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PneumoniaType {
    Cap,
    Hap,
    Vap,
    Unclassified,
}

impl PneumoniaType {
    pub fn label(&self) -> &'static str {
        match self {
            PneumoniaType::Cap => "CAP (Community-Acquired Pneumonia)",
            PneumoniaType::Hap => "HAP (Hospital-Acquired Pneumonia)",
            PneumoniaType::Vap => "VAP (Ventilator-Associated Pneumonia)",
            PneumoniaType::Unclassified => "Unclassified",
        }
    }

    /// Likely organisms to cover empirically.
    pub fn pathogens(&self) -> &'static [&'static str] {
        match self {
            PneumoniaType::Cap => &[
                "Streptococcus pneumoniae",
                "Haemophilus influenzae",
                "Atypicals (Mycoplasma, Chlamydia, Legionella)",
                "Respiratory viruses",
            ],
            PneumoniaType::Hap => &[
                "Pseudomonas aeruginosa",
                "MRSA",
                "Enterobacteriaceae",
                "Acinetobacter",
            ],
            PneumoniaType::Vap => &[
                "Pseudomonas aeruginosa",
                "MRSA",
                "Acinetobacter",
                "Klebsiella pneumoniae",
            ],
            PneumoniaType::Unclassified => &[],
        }
    }

    pub fn notes(&self) -> &'static [&'static str] {
        match self {
            PneumoniaType::Cap => &[
                "Onset in community or <48 hours after hospital admission",
                "Use CURB-65 for severity assessment",
            ],
            PneumoniaType::Hap => &[
                "Onset ≥48 hours after hospital admission",
                "Higher antibiotic resistance risk",
                "Broader empiric coverage needed",
            ],
            PneumoniaType::Vap => &[
                "Onset ≥48 hours after intubation",
                "Highest antibiotic resistance risk",
                "Requires aggressive empiric therapy",
            ],
            PneumoniaType::Unclassified => {
                &["Select the care setting and time of onset to classify"]
            }
        }
    }
}

fn community(i: &PneumoniaInput) -> bool {
    i.setting == Some(CareSetting::Community) || i.onset == Some(Onset::BeforeAdmission)
}

fn hospital(i: &PneumoniaInput) -> bool {
    i.onset == Some(Onset::After48hHospital)
}

fn ventilated(i: &PneumoniaInput) -> bool {
    i.setting == Some(CareSetting::MechanicallyVentilated)
}

/// A community setting wins over any onset, so a ventilated patient with
/// onset before admission is still CAP. Onset after intubation alone does
/// not classify.
pub const RULES: &[Rule<PneumoniaInput, PneumoniaType>] = &[
    Rule {
        name: "community setting or onset before admission",
        when: community,
        outcome: PneumoniaType::Cap,
    },
    Rule {
        name: "onset ≥48h after hospital admission",
        when: hospital,
        outcome: PneumoniaType::Hap,
    },
    Rule {
        name: "mechanically ventilated",
        when: ventilated,
        outcome: PneumoniaType::Vap,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PneumoniaResult {
    pub kind: PneumoniaType,
    pub pathogens: Vec<String>,
    pub notes: Vec<String>,
}

pub fn classify(input: &PneumoniaInput) -> PneumoniaResult {
    let kind = first_match(RULES, input).map_or(PneumoniaType::Unclassified, |rule| rule.outcome);
    PneumoniaResult {
        kind,
        pathogens: kind.pathogens().iter().map(|s| s.to_string()).collect(),
        notes: kind.notes().iter().map(|s| s.to_string()).collect(),
    }
}

impl From<&PneumoniaResult> for Evaluation {
    fn from(r: &PneumoniaResult) -> Self {
        let evaluation = Evaluation::new("pneumonia", r.kind.label());
        let evaluation = if r.pathogens.is_empty() {
            evaluation
        } else {
            evaluation.detail("Common pathogens", r.pathogens.join(", "))
        };
        evaluation.guidance(r.notes.iter().cloned())
    }
}

/// CAP / HAP / VAP classifier.
pub struct PneumoniaClassifier;

impl Calculator for PneumoniaClassifier {
    fn id(&self) -> &str {
        "pneumonia"
    }

    fn name(&self) -> &str {
        "Pneumonia Classification"
    }

    fn topic(&self) -> TopicId {
        TopicId::Pneumonia
    }

    fn description(&self) -> &str {
        "Community, hospital or ventilator-associated pneumonia from setting and onset"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::choice(
                    "setting",
                    "Care setting",
                    &[
                        ("community", "Community/Outpatient"),
                        ("hospital_floor", "Hospital floor (non-ICU)"),
                        ("icu", "ICU (non-ventilated)"),
                        ("mechanically_ventilated", "Mechanically ventilated"),
                    ],
                ),
                InputField::choice(
                    "onset",
                    "Time of onset",
                    &[
                        ("before_admission", "Before hospital admission"),
                        ("within_48h", "Within 48 hours of admission"),
                        ("after_48h_hospital", "≥48 hours after hospital admission"),
                        ("after_48h_intubation", "≥48 hours after intubation"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let parsed = PneumoniaInput {
            setting: input.choice("setting")?,
            onset: input.choice("onset")?,
        };
        Ok(Evaluation::from(&classify(&parsed)))
    }
}
