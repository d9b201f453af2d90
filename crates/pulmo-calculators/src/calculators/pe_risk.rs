use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pulmo_core::models::topic::TopicId;

use crate::Calculator;
use crate::error::CalculatorError;
use crate::scoring::{
    Criterion, Evaluation, InputField, InputSnapshot, Rule, first_match, read_flags,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PeRiskInput {
    /// Hypotension, shock or cardiac arrest.
    pub hemodynamically_unstable: bool,
    pub rv_dysfunction: bool,
    /// Elevated troponin.
    pub myocardial_necrosis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PeRiskClass {
    Low,
    Submassive,
    Massive,
}

impl PeRiskClass {
    pub fn label(&self) -> &'static str {
        match self {
            PeRiskClass::Massive => "Massive PE (High-Risk)",
            PeRiskClass::Submassive => "Submassive PE (Intermediate-Risk)",
            PeRiskClass::Low => "Low-Risk PE",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            PeRiskClass::Massive => "Hemodynamically unstable: hypotension, shock, or cardiac arrest",
            PeRiskClass::Submassive => {
                "Hemodynamically stable but with RV dysfunction or myocardial necrosis"
            }
            PeRiskClass::Low => "Hemodynamically stable, no RV dysfunction",
        }
    }

    pub fn management(&self) -> &'static str {
        match self {
            PeRiskClass::Massive => "Thrombolysis or embolectomy consideration (educational)",
            PeRiskClass::Submassive => "Anticoagulation, monitor closely, selective thrombolysis",
            PeRiskClass::Low => "Anticoagulation, consider outpatient treatment",
        }
    }
}

/// Scored as a rule table, not summed, so the weights are unused.
pub const CRITERIA: [Criterion; 3] = [
    Criterion {
        id: "hemodynamically_unstable",
        label: "Hemodynamically unstable",
        description: "Hypotension, shock, or cardiac arrest",
        weight: 0.0,
    },
    Criterion {
        id: "rv_dysfunction",
        label: "RV dysfunction on echo or CT",
        description: "",
        weight: 0.0,
    },
    Criterion {
        id: "myocardial_necrosis",
        label: "Myocardial necrosis",
        description: "Elevated troponin",
        weight: 0.0,
    },
];

fn unstable(i: &PeRiskInput) -> bool {
    i.hemodynamically_unstable
}

fn rv_strain(i: &PeRiskInput) -> bool {
    i.rv_dysfunction || i.myocardial_necrosis
}

pub const RULES: &[Rule<PeRiskInput, PeRiskClass>] = &[
    Rule {
        name: "hemodynamically unstable",
        when: unstable,
        outcome: PeRiskClass::Massive,
    },
    Rule {
        name: "RV dysfunction or myocardial necrosis",
        when: rv_strain,
        outcome: PeRiskClass::Submassive,
    },
];

pub fn classify(input: &PeRiskInput) -> PeRiskClass {
    first_match(RULES, input).map_or(PeRiskClass::Low, |rule| rule.outcome)
}

/// Hemodynamic risk class of a confirmed PE.
pub struct PeRisk;

impl Calculator for PeRisk {
    fn id(&self) -> &str {
        "pe_risk"
    }

    fn name(&self) -> &str {
        "PE Risk Stratification"
    }

    fn topic(&self) -> TopicId {
        TopicId::PulmonaryEmbolism
    }

    fn description(&self) -> &str {
        "Massive, submassive or low-risk PE from hemodynamics and RV strain"
    }

    fn fields(&self) -> &[InputField] {
        static FIELDS: std::sync::LazyLock<Vec<InputField>> =
            std::sync::LazyLock::new(|| CRITERIA.iter().map(InputField::flag).collect());
        &FIELDS
    }

    fn evaluate(&self, input: &InputSnapshot) -> Result<Evaluation, CalculatorError> {
        let [hemodynamically_unstable, rv_dysfunction, myocardial_necrosis] =
            read_flags(input, &CRITERIA)?;
        let parsed = PeRiskInput {
            hemodynamically_unstable,
            rv_dysfunction,
            myocardial_necrosis,
        };
        let class = classify(&parsed);
        Ok(Evaluation::new("pe_risk", class.label())
            .detail("Definition", class.definition())
            .guidance([class.management()]))
    }
}
