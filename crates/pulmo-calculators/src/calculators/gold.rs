use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, ValueRange, check_range};

pub const FEV1_RANGE: ValueRange = ValueRange::new(0.0, 150.0);

/// Spirometric airflow limitation grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GoldStage {
    Gold1,
    Gold2,
    Gold3,
    Gold4,
}

impl GoldStage {
    pub fn from_fev1(fev1_percent: f64) -> Self {
        match fev1_percent {
            p if p >= 80.0 => GoldStage::Gold1,
            p if p >= 50.0 => GoldStage::Gold2,
            p if p >= 30.0 => GoldStage::Gold3,
            _ => GoldStage::Gold4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoldStage::Gold1 => "GOLD 1 (Mild)",
            GoldStage::Gold2 => "GOLD 2 (Moderate)",
            GoldStage::Gold3 => "GOLD 3 (Severe)",
            GoldStage::Gold4 => "GOLD 4 (Very Severe)",
        }
    }

    pub fn criterion(&self) -> &'static str {
        match self {
            GoldStage::Gold1 => "FEV₁ ≥80% predicted",
            GoldStage::Gold2 => "50% ≤ FEV₁ <80% predicted",
            GoldStage::Gold3 => "30% ≤ FEV₁ <50% predicted",
            GoldStage::Gold4 => "FEV₁ <30% predicted",
        }
    }
}

pub fn grade(fev1_percent: f64) -> Result<GoldStage, CalculatorError> {
    let fev1 = check_range("fev1_percent", fev1_percent, FEV1_RANGE)?;
    Ok(GoldStage::from_fev1(fev1))
}

/// GOLD spirometric grading. Assumes FEV₁/FVC < 0.70 is already established.
pub struct GoldGrade;

impl Calculator for GoldGrade {
    fn id(&self) -> &str {
        "gold"
    }

    fn name(&self) -> &str {
        "GOLD Spirometric Grade"
    }

    fn topic(&self) -> TopicId {
        TopicId::Copd
    }

    fn description(&self) -> &str {
        "Airflow limitation grade from post-bronchodilator FEV₁ % predicted"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::number("fev1_percent", "FEV₁", FEV1_RANGE, Some("% predicted"))
                    .with_help("Post-bronchodilator, in a patient with FEV₁/FVC <0.70"),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let fev1 = input.number("fev1_percent")?;
        let stage = grade(fev1)?;
        Ok(Evaluation::new("gold", stage.label())
            .with_score(fev1)
            .detail("Criterion", stage.criterion()))
    }
}
