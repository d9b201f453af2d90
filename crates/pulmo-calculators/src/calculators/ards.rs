use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{Evaluation, InputField, InputSnapshot, ValueRange, check_range, round1};

pub const PAO2_RANGE: ValueRange = ValueRange::new(40.0, 500.0);
pub const FIO2_RANGE: ValueRange = ValueRange::with_step(0.21, 1.0, 0.01);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Timing {
    WithinWeek,
    OverWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChestImaging {
    Bilateral,
    Unilateral,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ArdsSeverityTier {
    NotArds,
    Mild,
    Moderate,
    Severe,
}

impl ArdsSeverityTier {
    /// Berlin oxygenation cutoffs. Each band is closed at its upper bound.
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r > 300.0 => ArdsSeverityTier::NotArds,
            r if r > 200.0 => ArdsSeverityTier::Mild,
            r if r > 100.0 => ArdsSeverityTier::Moderate,
            _ => ArdsSeverityTier::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArdsSeverityTier::NotArds => "Not ARDS",
            ArdsSeverityTier::Mild => "Mild ARDS",
            ArdsSeverityTier::Moderate => "Moderate ARDS",
            ArdsSeverityTier::Severe => "Severe ARDS",
        }
    }

    pub fn ventilation_strategy(&self) -> &'static str {
        match self {
            ArdsSeverityTier::NotArds => "Standard ventilation principles",
            ArdsSeverityTier::Mild => "Lung-protective ventilation",
            ArdsSeverityTier::Moderate => "Lung-protective ventilation + higher PEEP",
            ArdsSeverityTier::Severe => {
                "Lung-protective ventilation + high PEEP + consider proning"
            }
        }
    }

    pub fn peep_range(&self) -> Option<&'static str> {
        match self {
            ArdsSeverityTier::NotArds => None,
            ArdsSeverityTier::Mild => Some("5-10 cm H₂O (educational concept)"),
            ArdsSeverityTier::Moderate => Some("10-15 cm H₂O (educational concept)"),
            ArdsSeverityTier::Severe => Some("15+ cm H₂O (educational concept)"),
        }
    }

    pub fn mortality(&self) -> Option<&'static str> {
        match self {
            ArdsSeverityTier::NotArds => None,
            ArdsSeverityTier::Mild => Some("~27%"),
            ArdsSeverityTier::Moderate => Some("~32%"),
            ArdsSeverityTier::Severe => Some("~45%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArdsInput {
    /// Arterial oxygen tension, mmHg.
    pub pao2: f64,
    /// Inspired oxygen fraction as a decimal (0.60 for 60%).
    pub fio2: f64,
    pub timing: Option<Timing>,
    pub imaging: Option<ChestImaging>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArdsAssessment {
    /// PaO₂/FiO₂, rounded to one decimal. The tier comes from the unrounded
    /// ratio, so 300.04 reports as 300.0 yet is Not ARDS.
    pub ratio: f64,
    pub severity: ArdsSeverityTier,
    pub ventilation_strategy: String,
    pub peep_range: Option<String>,
    pub mortality: Option<String>,
    pub meets_timing: bool,
    pub meets_bilateral: bool,
    pub warnings: Vec<String>,
}

pub fn assess(input: &ArdsInput) -> Result<ArdsAssessment, CalculatorError> {
    if input.fio2 == 0.0 {
        return Err(CalculatorError::invalid(
            "fio2",
            "FiO₂ of zero makes the PaO₂/FiO₂ ratio undefined",
        ));
    }
    let pao2 = check_range("pao2", input.pao2, PAO2_RANGE)?;
    let fio2 = check_range("fio2", input.fio2, FIO2_RANGE)?;

    let ratio = pao2 / fio2;
    let severity = ArdsSeverityTier::from_ratio(ratio);

    // Timing and imaging are reported but never change the tier.
    let meets_timing = input.timing == Some(Timing::WithinWeek);
    let meets_bilateral = input.imaging == Some(ChestImaging::Bilateral);

    let mut warnings = Vec::new();
    if !meets_timing {
        warnings.push("Timing criteria not met for Berlin definition".to_string());
    }
    if !meets_bilateral {
        warnings.push("Bilateral opacities required for ARDS diagnosis".to_string());
    }

    Ok(ArdsAssessment {
        ratio: round1(ratio),
        severity,
        ventilation_strategy: severity.ventilation_strategy().to_string(),
        peep_range: severity.peep_range().map(str::to_string),
        mortality: severity.mortality().map(str::to_string),
        meets_timing,
        meets_bilateral,
        warnings,
    })
}

impl From<&ArdsAssessment> for Evaluation {
    fn from(a: &ArdsAssessment) -> Self {
        let mut evaluation = Evaluation::new("ards", a.severity.label())
            .with_score(a.ratio)
            .detail("PaO₂/FiO₂ ratio", format!("{:.1}", a.ratio))
            .detail("Ventilation strategy", a.ventilation_strategy.clone());
        if let Some(peep) = &a.peep_range {
            evaluation = evaluation.detail("Typical PEEP range", peep.clone());
        }
        if let Some(mortality) = &a.mortality {
            evaluation = evaluation.detail("Mortality", mortality.clone());
        }
        evaluation
            .guidance(a.warnings.iter().cloned())
            .flag("meets_timing", "Onset within 1 week of insult", a.meets_timing)
            .flag("meets_bilateral", "Bilateral opacities on imaging", a.meets_bilateral)
    }
}

/// Berlin-definition severity from the PaO₂/FiO₂ ratio.
pub struct ArdsSeverity;

impl Calculator for ArdsSeverity {
    fn id(&self) -> &str {
        "ards"
    }

    fn name(&self) -> &str {
        "ARDS Severity (Berlin)"
    }

    fn topic(&self) -> TopicId {
        TopicId::Ards
    }

    fn description(&self) -> &str {
        "PaO₂/FiO₂ ratio and Berlin severity tier with typical ventilation strategy"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> = std::sync::LazyLock::new(|| {
            vec![
                InputField::number("pao2", "PaO₂", PAO2_RANGE, Some("mmHg")),
                InputField::number("fio2", "FiO₂", FIO2_RANGE, None)
                    .with_help("Enter as decimal (e.g., 0.60 for 60% oxygen)"),
                InputField::choice(
                    "timing",
                    "Timing",
                    &[
                        ("within_week", "Within 1 week of insult"),
                        ("over_week", "More than 1 week"),
                    ],
                ),
                InputField::choice(
                    "imaging",
                    "Chest imaging",
                    &[
                        ("bilateral", "Bilateral opacities"),
                        ("unilateral", "Unilateral opacity"),
                        ("normal", "Normal"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let parsed = ArdsInput {
            pao2: input.number("pao2")?,
            fio2: input.number("fio2")?,
            timing: input.choice("timing")?,
            imaging: input.choice("imaging")?,
        };
        Ok(Evaluation::from(&assess(&parsed)?))
    }
}
