use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Criterion, Evaluation, InputField, InputSnapshot, count_present, read_flags};

pub const CRITERIA: [Criterion; 5] = [
    Criterion {
        id: "confusion",
        label: "Confusion (new onset)",
        description: "Altered mental status",
        weight: 1.0,
    },
    Criterion {
        id: "urea",
        label: "Urea (BUN) >19 mg/dL",
        description: "Or >7 mmol/L",
        weight: 1.0,
    },
    Criterion {
        id: "respiratory_rate",
        label: "Respiratory rate ≥30/min",
        description: "Tachypnea",
        weight: 1.0,
    },
    Criterion {
        id: "blood_pressure",
        label: "Blood pressure",
        description: "SBP <90 mmHg or DBP ≤60 mmHg",
        weight: 1.0,
    },
    Criterion {
        id: "age_65",
        label: "Age ≥65 years",
        description: "Elderly",
        weight: 1.0,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Curb65Input {
    pub confusion: bool,
    pub urea: bool,
    pub respiratory_rate: bool,
    pub blood_pressure: bool,
    pub age_65: bool,
}

impl Curb65Input {
    pub fn flags(&self) -> [bool; 5] {
        [
            self.confusion,
            self.urea,
            self.respiratory_rate,
            self.blood_pressure,
            self.age_65,
        ]
    }

    pub fn from_flags(f: [bool; 5]) -> Self {
        Self {
            confusion: f[0],
            urea: f[1],
            respiratory_rate: f[2],
            blood_pressure: f[3],
            age_65: f[4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Curb65Band {
    Low,
    Moderate,
    High,
}

impl Curb65Band {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 | 1 => Curb65Band::Low,
            2 => Curb65Band::Moderate,
            _ => Curb65Band::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Curb65Band::Low => "Low",
            Curb65Band::Moderate => "Moderate",
            Curb65Band::High => "High",
        }
    }

    pub fn mortality(&self) -> &'static str {
        match self {
            Curb65Band::Low => "<3%",
            Curb65Band::Moderate => "9%",
            Curb65Band::High => "15-40%",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Curb65Band::Low => "Consider outpatient treatment",
            Curb65Band::Moderate => {
                "Consider short inpatient stay or closely monitored outpatient"
            }
            Curb65Band::High => "Hospital admission, consider ICU if score ≥4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Curb65Result {
    pub score: u32,
    pub severity: Curb65Band,
    pub mortality: String,
    pub recommendation: String,
}

pub fn assess(input: &Curb65Input) -> Curb65Result {
    let score = count_present(&input.flags());
    let severity = Curb65Band::from_score(score);
    Curb65Result {
        score,
        severity,
        mortality: severity.mortality().to_string(),
        recommendation: severity.recommendation().to_string(),
    }
}

impl From<&Curb65Result> for Evaluation {
    fn from(r: &Curb65Result) -> Self {
        Evaluation::new("curb65", r.severity.label())
            .with_score(f64::from(r.score))
            .detail("Score", format!("{} / 5", r.score))
            .detail("30-day mortality", r.mortality.clone())
            .guidance([r.recommendation.clone()])
    }
}

/// CURB-65 severity score for community-acquired pneumonia.
pub struct Curb65;

impl Calculator for Curb65 {
    fn id(&self) -> &str {
        "curb65"
    }

    fn name(&self) -> &str {
        "CURB-65"
    }

    fn topic(&self) -> TopicId {
        TopicId::Pneumonia
    }

    fn description(&self) -> &str {
        "Community-acquired pneumonia severity and disposition"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> =
            std::sync::LazyLock::new(|| CRITERIA.iter().map(InputField::flag).collect());
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let flags = read_flags(input, &CRITERIA)?;
        Ok(Evaluation::from(&assess(&Curb65Input::from_flags(flags))))
    }
}
