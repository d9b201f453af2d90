use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, ValueRange, check_range};

pub const PH_RANGE: ValueRange = ValueRange::with_step(6.8, 7.6, 0.01);
pub const PACO2_RANGE: ValueRange = ValueRange::new(20.0, 120.0);
pub const RESPIRATORY_RATE_RANGE: ValueRange = ValueRange::new(8.0, 50.0);

/// Managed the same way whatever the severity.
pub const GENERAL_MANAGEMENT: [&str; 5] = [
    "Bronchodilator therapy (SABA ± anticholinergics)",
    "Systemic corticosteroids (educational concept)",
    "Antibiotics if purulent sputum or severe exacerbation",
    "Monitor ABG, oxygen saturation, respiratory rate",
    "Assess for complications (pneumonia, PE, pneumothorax)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MentalStatus {
    Alert,
    Sleepy,
    Altered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CopdSeverity {
    Mild,
    Moderate,
    Severe,
}

impl CopdSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            CopdSeverity::Mild => "Mild",
            CopdSeverity::Moderate => "Moderate",
            CopdSeverity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CopdInput {
    pub ph: f64,
    /// mmHg.
    pub paco2: f64,
    /// Breaths per minute.
    pub respiratory_rate: f64,
    pub mental_status: Option<MentalStatus>,
}

impl CopdInput {
    fn altered(&self) -> bool {
        self.mental_status == Some(MentalStatus::Altered)
    }

    fn acidemic_hypercapnia(&self) -> bool {
        self.ph < 7.35 && self.paco2 > 45.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CopdAssessment {
    pub severity: CopdSeverity,
    pub nippv_indicated: bool,
    pub hypercapnic_failure: bool,
    pub recommendations: Vec<String>,
    pub general_management: Vec<String>,
}

pub fn assess(input: &CopdInput) -> Result<CopdAssessment, CalculatorError> {
    check_range("ph", input.ph, PH_RANGE)?;
    check_range("paco2", input.paco2, PACO2_RANGE)?;
    check_range("respiratory_rate", input.respiratory_rate, RESPIRATORY_RATE_RANGE)?;
    // Counted in whole breaths.
    let respiratory_rate = input.respiratory_rate.trunc();

    let mut recommendations = Vec::new();

    let severity = if input.ph < 7.30
        || input.paco2 > 60.0
        || input.altered()
        || respiratory_rate > 30.0
    {
        recommendations.extend([
            "Immediate medical attention required",
            "Continuous monitoring",
            "Consider ICU consultation",
        ]);
        CopdSeverity::Severe
    } else if input.ph < 7.35 || input.paco2 > 50.0 || respiratory_rate > 25.0 {
        CopdSeverity::Moderate
    } else {
        CopdSeverity::Mild
    };

    // The two add-on checks below are independent of the tier and of each other.
    let nippv_indicated = input.acidemic_hypercapnia() && !input.altered();
    if nippv_indicated {
        recommendations.extend([
            "NIPPV may be considered (educational concept)",
            "Ensure patient can protect airway",
            "Monitor closely for improvement or deterioration",
        ]);
    }

    let hypercapnic_failure = input.acidemic_hypercapnia();
    if hypercapnic_failure {
        recommendations.extend([
            "Hypercapnic respiratory failure identified",
            "Controlled oxygen therapy (target SpO₂ 88-92%)",
            "Avoid excessive oxygen (risk of worsening hypercapnia)",
        ]);
    }

    Ok(CopdAssessment {
        severity,
        nippv_indicated,
        hypercapnic_failure,
        recommendations: recommendations.into_iter().map(str::to_string).collect(),
        general_management: GENERAL_MANAGEMENT.iter().map(|s| s.to_string()).collect(),
    })
}

impl From<&CopdAssessment> for Evaluation {
    fn from(a: &CopdAssessment) -> Self {
        Evaluation::new("copd", a.severity.label())
            .detail(
                "NIPPV",
                if a.nippv_indicated {
                    "May be indicated (educational)"
                } else {
                    "Not indicated by these values"
                },
            )
            .guidance(a.recommendations.iter().cloned())
            .guidance(a.general_management.iter().cloned())
            .flag("nippv_indicated", "NIPPV may be considered", a.nippv_indicated)
            .flag(
                "hypercapnic_failure",
                "Hypercapnic respiratory failure",
                a.hypercapnic_failure,
            )
    }
}

/// COPD exacerbation navigator.
pub struct CopdExacerbation;

impl Calculator for CopdExacerbation {
    fn id(&self) -> &str {
        "copd"
    }

    fn name(&self) -> &str {
        "COPD Exacerbation Navigator"
    }

    fn topic(&self) -> TopicId {
        TopicId::Copd
    }

    fn description(&self) -> &str {
        "Exacerbation severity, NIPPV candidacy and hypercapnic failure from the ABG"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::number("ph", "Arterial pH", PH_RANGE, None),
                InputField::number("paco2", "PaCO₂", PACO2_RANGE, Some("mmHg")),
                InputField::number(
                    "respiratory_rate",
                    "Respiratory rate",
                    RESPIRATORY_RATE_RANGE,
                    Some("breaths/min"),
                )
                .with_help("Whole breaths per minute; any fraction is dropped"),
                InputField::choice(
                    "mental_status",
                    "Mental status",
                    &[
                        ("alert", "Alert and oriented"),
                        ("sleepy", "Sleepy but arousable"),
                        ("altered", "Altered/confused"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let parsed = CopdInput {
            ph: input.number("ph")?,
            paco2: input.number("paco2")?,
            respiratory_rate: input.number("respiratory_rate")?,
            mental_status: input.choice("mental_status")?,
        };
        Ok(Evaluation::from(&assess(&parsed)?))
    }
}
