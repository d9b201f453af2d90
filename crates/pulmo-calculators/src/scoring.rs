use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CalculatorError;

/// Plausible physiological range for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    /// Input granularity hint for form controls. Not enforced.
    pub step: Option<f64>,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    pub const fn with_step(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step: Some(step),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Reject `value` unless it lies inside `range`.
pub fn check_range(field: &str, value: f64, range: ValueRange) -> Result<f64, CalculatorError> {
    if !value.is_finite() {
        return Err(CalculatorError::invalid(field, "value must be a finite number"));
    }
    if !range.contains(value) {
        return Err(CalculatorError::invalid(
            field,
            format!(
                "{value} is outside the plausible range [{}, {}]",
                range.min, range.max
            ),
        ));
    }
    Ok(value)
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One selectable token of a choice or multi-select field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// What kind of control a field needs and how it is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Number {
        range: ValueRange,
        unit: Option<String>,
    },
    /// A yes/no criterion contributing `weight` to a summed score.
    Flag { weight: f64 },
    /// Single selection. Leaving it blank is a valid "unset" answer.
    Choice { options: Vec<ChoiceOption> },
    MultiSelect { options: Vec<ChoiceOption> },
}

/// Describes one input a calculator reads from an [`InputSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub optional: bool,
    pub help: Option<String>,
}

impl InputField {
    pub fn number(id: &str, label: &str, range: ValueRange, unit: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number {
                range,
                unit: unit.map(str::to_string),
            },
            optional: false,
            help: None,
        }
    }

    pub fn flag(criterion: &Criterion) -> Self {
        Self {
            id: criterion.id.to_string(),
            label: criterion.label.to_string(),
            kind: FieldKind::Flag {
                weight: criterion.weight,
            },
            optional: true,
            help: (!criterion.description.is_empty()).then(|| criterion.description.to_string()),
        }
    }

    pub fn choice(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Choice {
                options: options.iter().map(|(v, l)| ChoiceOption::new(v, l)).collect(),
            },
            optional: true,
            help: None,
        }
    }

    pub fn multi_select(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::MultiSelect {
                options: options.iter().map(|(v, l)| ChoiceOption::new(v, l)).collect(),
            },
            optional: true,
            help: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }
}

/// A raw field value as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum InputValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for InputValue {
    fn from(v: bool) -> Self {
        InputValue::Flag(v)
    }
}

impl From<f64> for InputValue {
    fn from(v: f64) -> Self {
        InputValue::Number(v)
    }
}

impl From<&str> for InputValue {
    fn from(v: &str) -> Self {
        InputValue::Text(v.to_string())
    }
}

impl From<String> for InputValue {
    fn from(v: String) -> Self {
        InputValue::Text(v)
    }
}

impl From<Vec<String>> for InputValue {
    fn from(v: Vec<String>) -> Self {
        InputValue::List(v)
    }
}

impl From<&[&str]> for InputValue {
    fn from(v: &[&str]) -> Self {
        InputValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// The current state of every field on a calculator form, keyed by field id.
///
/// Evaluation reads a snapshot and never mutates it; missing keys are treated
/// as blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputSnapshot {
    pub values: BTreeMap<String, InputValue>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: &str, value: impl Into<InputValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<InputValue>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&InputValue> {
        self.values.get(field)
    }

    /// A required number. Range checks are left to the calculator.
    pub fn number(&self, field: &str) -> Result<f64, CalculatorError> {
        self.optional_number(field)?
            .ok_or_else(|| CalculatorError::invalid(field, "a value is required"))
    }

    /// A number that may be left blank.
    pub fn optional_number(&self, field: &str) -> Result<Option<f64>, CalculatorError> {
        let value = match self.get(field) {
            None => return Ok(None),
            Some(InputValue::Number(n)) => *n,
            Some(InputValue::Text(s)) if s.trim().is_empty() => return Ok(None),
            Some(InputValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CalculatorError::invalid(field, format!("'{s}' is not a number")))?,
            Some(_) => return Err(CalculatorError::invalid(field, "expected a number")),
        };
        if !value.is_finite() {
            return Err(CalculatorError::invalid(field, "value must be a finite number"));
        }
        Ok(Some(value))
    }

    /// A checkbox. Missing or blank means unchecked.
    pub fn flag(&self, field: &str) -> Result<bool, CalculatorError> {
        match self.get(field) {
            None => Ok(false),
            Some(InputValue::Flag(b)) => Ok(*b),
            Some(InputValue::Number(n)) => Ok(*n != 0.0),
            Some(InputValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(true),
                "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
                other => Err(CalculatorError::invalid(
                    field,
                    format!("'{other}' is not a yes/no value"),
                )),
            },
            Some(InputValue::List(_)) => {
                Err(CalculatorError::invalid(field, "expected a yes/no value"))
            }
        }
    }

    /// A single selection decoded into `T` through its snake_case serde
    /// name. Blank means unset and yields `None`.
    pub fn choice<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, CalculatorError> {
        match self.get(field) {
            None => Ok(None),
            Some(InputValue::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(InputValue::Text(s)) => decode_token(field, s).map(Some),
            Some(_) => Err(CalculatorError::invalid(field, "expected a single option")),
        }
    }

    /// A set of selections. Accepts a list, a comma-separated string, or a
    /// list whose items are themselves comma-separated; duplicates collapse.
    pub fn selections<T: DeserializeOwned + Ord>(
        &self,
        field: &str,
    ) -> Result<BTreeSet<T>, CalculatorError> {
        let tokens: Vec<&str> = match self.get(field) {
            None => Vec::new(),
            Some(InputValue::List(items)) => items.iter().flat_map(|i| i.split(',')).collect(),
            Some(InputValue::Text(s)) => s.split(',').collect(),
            Some(_) => return Err(CalculatorError::invalid(field, "expected a list of options")),
        };

        tokens
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| decode_token(field, t))
            .collect()
    }
}

fn decode_token<T: DeserializeOwned>(field: &str, token: &str) -> Result<T, CalculatorError> {
    let trimmed = token.trim();
    serde_json::from_value(serde_json::Value::String(trimmed.to_string()))
        .map_err(|_| CalculatorError::invalid(field, format!("unknown option '{trimmed}'")))
}

/// A yes/no item of a summed score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

/// Sum of the weights of the criteria that are present.
pub fn weighted_total(criteria: &[Criterion], present: &[bool]) -> f64 {
    criteria
        .iter()
        .zip(present)
        .filter(|(_, p)| **p)
        .map(|(c, _)| c.weight)
        .sum()
}

/// Number of criteria present, for tools where every item scores one point.
pub fn count_present(present: &[bool]) -> u32 {
    present.iter().filter(|p| **p).count() as u32
}

/// Read every criterion of a score from a snapshot, in table order.
pub fn read_flags<const N: usize>(
    input: &InputSnapshot,
    criteria: &[Criterion; N],
) -> Result<[bool; N], CalculatorError> {
    let mut flags = [false; N];
    for (slot, criterion) in flags.iter_mut().zip(criteria) {
        *slot = input.flag(criterion.id)?;
    }
    Ok(flags)
}

/// One entry of an ordered, first-match-wins rule table.
pub struct Rule<I, O> {
    pub name: &'static str,
    pub when: fn(&I) -> bool,
    pub outcome: O,
}

/// Return the first rule whose predicate holds. Later rules are never
/// consulted once one matches.
pub fn first_match<'a, I, O>(rules: &'a [Rule<I, O>], input: &I) -> Option<&'a Rule<I, O>> {
    rules.iter().find(|rule| (rule.when)(input))
}

/// A labelled value shown alongside a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

impl Detail {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A boolean side result such as "isolation required".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlagOutcome {
    pub id: String,
    pub label: String,
    pub value: bool,
}

impl FlagOutcome {
    pub fn new(id: &str, label: &str, value: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// Uniform result shape every calculator produces, ready to render as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub calculator_id: String,
    /// Summed score or computed ratio, when the tool has one.
    pub score: Option<f64>,
    pub tier: String,
    pub details: Vec<Detail>,
    pub guidance: Vec<String>,
    pub flags: Vec<FlagOutcome>,
}

impl Evaluation {
    pub fn new(calculator_id: &str, tier: impl Into<String>) -> Self {
        Self {
            calculator_id: calculator_id.to_string(),
            score: None,
            tier: tier.into(),
            details: Vec::new(),
            guidance: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn detail(mut self, label: &str, value: impl Into<String>) -> Self {
        self.details.push(Detail::new(label, value));
        self
    }

    pub fn guidance<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.guidance.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn flag(mut self, id: &str, label: &str, value: bool) -> Self {
        self.flags.push(FlagOutcome::new(id, label, value));
        self
    }
}
