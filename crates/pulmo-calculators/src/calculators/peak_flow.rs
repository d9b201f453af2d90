use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, ValueRange, check_range};

pub const PERSONAL_BEST_RANGE: ValueRange = ValueRange::new(0.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Zone {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Zone {
    pub fn from_percent(percent_of_best: f64) -> Self {
        match percent_of_best {
            p if p >= 80.0 => Zone::Green,
            p if p >= 60.0 => Zone::Yellow,
            p if p >= 40.0 => Zone::Orange,
            _ => Zone::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Green => "Green Zone",
            Zone::Yellow => "Yellow Zone",
            Zone::Orange => "Orange Zone",
            Zone::Red => "Red Zone",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Zone::Green => "Good control - continue maintenance therapy",
            Zone::Yellow => "Moderate exacerbation - consider increasing treatment",
            Zone::Orange => "Moderate to severe - requires immediate intervention",
            Zone::Red => "Severe exacerbation - emergency care needed",
        }
    }
}

pub fn zone(percent_of_best: f64) -> Result<Zone, CalculatorError> {
    check_range("percent_of_best", percent_of_best, PERSONAL_BEST_RANGE).map(Zone::from_percent)
}

/// Asthma action-plan zone from a peak flow reading.
pub struct PeakFlowZone;

impl Calculator for PeakFlowZone {
    fn id(&self) -> &str {
        "peak_flow"
    }

    fn name(&self) -> &str {
        "Peak Flow Zone"
    }

    fn topic(&self) -> TopicId {
        TopicId::Asthma
    }

    fn description(&self) -> &str {
        "Action-plan zone from peak flow as a percentage of personal best"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![InputField::number(
                "percent_of_best",
                "Peak flow",
                PERSONAL_BEST_RANGE,
                Some("% of personal best"),
            )]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let percent = input.number("percent_of_best")?;
        let zone = zone(percent)?;
        Ok(Evaluation::new("peak_flow", zone.label())
            .with_score(percent)
            .guidance([zone.action()]))
    }
}
