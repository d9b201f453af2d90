use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, ValueRange, check_range};

pub const AHI_RANGE: ValueRange = ValueRange::new(0.0, 150.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OsaSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl OsaSeverity {
    /// 30 itself is still moderate.
    pub fn from_ahi(events_per_hour: f64) -> Self {
        match events_per_hour {
            a if a < 5.0 => OsaSeverity::None,
            a if a < 15.0 => OsaSeverity::Mild,
            a if a <= 30.0 => OsaSeverity::Moderate,
            _ => OsaSeverity::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsaSeverity::None => "No OSA",
            OsaSeverity::Mild => "Mild OSA",
            OsaSeverity::Moderate => "Moderate OSA",
            OsaSeverity::Severe => "Severe OSA",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            OsaSeverity::None => "AHI below the diagnostic threshold of 5 events/hour",
            OsaSeverity::Mild => "May benefit from lifestyle modifications ± CPAP",
            OsaSeverity::Moderate => "CPAP therapy typically recommended",
            OsaSeverity::Severe => {
                "CPAP therapy strongly recommended; high risk of complications"
            }
        }
    }
}

pub fn classify(events_per_hour: f64) -> Result<OsaSeverity, CalculatorError> {
    check_range("ahi", events_per_hour, AHI_RANGE).map(OsaSeverity::from_ahi)
}

/// Sleep apnea severity from a polysomnography AHI.
pub struct AhiSeverity;

impl Calculator for AhiSeverity {
    fn id(&self) -> &str {
        "ahi"
    }

    fn name(&self) -> &str {
        "OSA Severity (AHI)"
    }

    fn topic(&self) -> TopicId {
        TopicId::Osa
    }

    fn description(&self) -> &str {
        "OSA severity from the apnea-hypopnea index of a sleep study"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![InputField::number("ahi", "Apnea-hypopnea index", AHI_RANGE, Some("events/hour"))]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let ahi = input.number("ahi")?;
        let severity = classify(ahi)?;
        Ok(Evaluation::new("ahi", severity.label())
            .with_score(ahi)
            .guidance([severity.recommendation()]))
    }
}
