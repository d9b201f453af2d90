use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Criterion, Evaluation, InputField, InputSnapshot, count_present, read_flags};

pub const CRITERIA: [Criterion; 8] = [
    Criterion {
        id: "snoring",
        label: "S - Snoring",
        description: "Do you snore loudly (louder than talking or loud enough to be heard through closed door)?",
        weight: 1.0,
    },
    Criterion {
        id: "tired",
        label: "T - Tired",
        description: "Do you often feel tired, fatigued, or sleepy during the daytime?",
        weight: 1.0,
    },
    Criterion {
        id: "observed",
        label: "O - Observed",
        description: "Has anyone observed you stop breathing or choking/gasping during sleep?",
        weight: 1.0,
    },
    Criterion {
        id: "pressure",
        label: "P - Pressure",
        description: "Do you have or are you being treated for high blood pressure?",
        weight: 1.0,
    },
    Criterion {
        id: "bmi",
        label: "B - BMI",
        description: "BMI >35 kg/m²?",
        weight: 1.0,
    },
    Criterion {
        id: "age",
        label: "A - Age",
        description: "Age >50 years?",
        weight: 1.0,
    },
    Criterion {
        id: "neck",
        label: "N - Neck",
        description: "Neck circumference >17 inches (male) or >16 inches (female)?",
        weight: 1.0,
    },
    Criterion {
        id: "gender",
        label: "G - Gender",
        description: "Male gender?",
        weight: 1.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StopBangRisk {
    Low,
    Intermediate,
    High,
}

impl StopBangRisk {
    /// 0–2 low, 3–4 intermediate, 5–8 high.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=2 => StopBangRisk::Low,
            3 | 4 => StopBangRisk::Intermediate,
            _ => StopBangRisk::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StopBangRisk::Low => "Low Risk",
            StopBangRisk::Intermediate => "Intermediate Risk",
            StopBangRisk::High => "High Risk",
        }
    }

    pub fn severity(&self) -> &'static str {
        match self {
            StopBangRisk::Low => "Low probability of OSA",
            StopBangRisk::Intermediate => "Intermediate probability of OSA",
            StopBangRisk::High => "High probability of moderate to severe OSA",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            StopBangRisk::Low => {
                "Continue monitoring symptoms. Consider sleep study if symptoms worsen"
            }
            StopBangRisk::Intermediate => "Sleep study recommended to confirm diagnosis",
            StopBangRisk::High => {
                "Sleep study strongly recommended. High likelihood of needing CPAP therapy"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StopBangResult {
    pub score: u32,
    pub risk: StopBangRisk,
    pub severity: String,
    pub recommendation: String,
}

/// `present` follows the S-T-O-P-B-A-N-G order of [`CRITERIA`].
pub fn assess(present: &[bool; 8]) -> StopBangResult {
    let score = count_present(present);
    let risk = StopBangRisk::from_score(score);
    StopBangResult {
        score,
        risk,
        severity: risk.severity().to_string(),
        recommendation: risk.recommendation().to_string(),
    }
}

impl From<&StopBangResult> for Evaluation {
    fn from(r: &StopBangResult) -> Self {
        Evaluation::new("stop_bang", r.risk.label())
            .with_score(f64::from(r.score))
            .detail("Score", format!("{} / 8", r.score))
            .detail("Severity", r.severity.clone())
            .guidance([r.recommendation.clone()])
    }
}

/// STOP-BANG obstructive sleep apnea screening questionnaire.
pub struct StopBang;

impl Calculator for StopBang {
    fn id(&self) -> &str {
        "stop_bang"
    }

    fn name(&self) -> &str {
        "STOP-BANG"
    }

    fn topic(&self) -> TopicId {
        TopicId::Osa
    }

    fn description(&self) -> &str {
        "Screening questionnaire for obstructive sleep apnea risk"
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
