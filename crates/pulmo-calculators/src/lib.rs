//! pulmo-calculators
//!
//! Bedside scoring rules and severity classifiers. Pure functions, no I/O.
//! Each calculator exposes a typed `assess` function plus a [`Calculator`]
//! implementation that reads a raw [`InputSnapshot`] from a form.

pub mod calculators;
pub mod error;
pub mod scoring;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use error::CalculatorError;
use scoring::{Evaluation, InputField, InputSnapshot};

/// Trait implemented by each calculator.
pub trait Calculator: Send + Sync {
    /// Unique identifier (e.g., "ards", "curb65").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ARDS Severity (Berlin)").
    fn name(&self) -> &str;

    /// The topic page this calculator belongs to.
    fn topic(&self) -> TopicId;

    fn description(&self) -> &str;

    /// The inputs this calculator reads, in form order.
    fn fields(&self) -> &[InputField];

    /// Validate the snapshot and classify it.
    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError>;

    fn field(&self, id: &str) -> Option<&InputField> {
        self.fields().iter().find(|f| f.id == id)
    }
}

/// Serializable description of a calculator, for listings and form building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorInfo {
    pub id: String,
    pub name: String,
    pub topic: TopicId,
    pub description: String,
    pub fields: Vec<InputField>,
}

impl From<&dyn Calculator> for CalculatorInfo {
    fn from(c: &dyn Calculator) -> Self {
        Self {
            id: c.id().to_string(),
            name: c.name().to_string(),
            topic: c.topic(),
            description: c.description().to_string(),
            fields: c.fields().to_vec(),
        }
    }
}

/// Return all registered calculators, grouped by topic.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(calculators::asthma::AsthmaSeverity),
        Box::new(calculators::peak_flow::PeakFlowZone),
        Box::new(calculators::copd::CopdExacerbation),
        Box::new(calculators::gold::GoldGrade),
        Box::new(calculators::pneumonia::PneumoniaClassifier),
        Box::new(calculators::curb65::Curb65),
        Box::new(calculators::tuberculosis::TbClassifier),
        Box::new(calculators::wells::WellsPe),
        Box::new(calculators::perc::Perc),
        Box::new(calculators::pe_risk::PeRisk),
        Box::new(calculators::ards::ArdsSeverity),
        Box::new(calculators::stop_bang::StopBang),
        Box::new(calculators::ahi::AhiSeverity),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    all_calculators().into_iter().find(|c| c.id() == id)
}

/// Calculators belonging to one topic, in registry order.
pub fn calculators_for(topic: TopicId) -> Vec<Box<dyn Calculator>> {
    all_calculators()
        .into_iter()
        .filter(|c| c.topic() == topic)
        .collect()
}

/// Look up a calculator by ID and evaluate a snapshot with it.
pub fn evaluate(id: &str, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
    let calculator =
        get_calculator(id).ok_or_else(|| CalculatorError::UnknownCalculator(id.to_string()))?;

    match calculator.evaluate(input) {
        Ok(evaluation) => {
            tracing::debug!(
                calculator = id,
                tier = %evaluation.tier,
                score = ?evaluation.score,
                "evaluated"
            );
            Ok(evaluation)
        }
        Err(e) => {
            tracing::debug!(calculator = id, error = %e, "rejected input");
            Err(e)
        }
    }
}
