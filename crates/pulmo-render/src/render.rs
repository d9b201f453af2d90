use serde::Serialize;
use tera::{Context, Tera};

use pulmo_calculators::CalculatorInfo;
use pulmo_calculators::scoring::Evaluation;
use pulmo_core::models::case::CaseScenario;
use pulmo_core::models::glossary::GlossaryTerm;
use pulmo_core::models::question::AnswerFeedback;
use pulmo_core::models::topic::Topic;

use crate::error::RenderError;
use crate::templates;

/// An answer option with its display letter (A, B, C...).
#[derive(Debug, Clone, Serialize)]
pub struct LetteredOption<'a> {
    pub letter: char,
    pub text: &'a str,
}

/// Letter for a zero-based option index.
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

/// Holds every built-in template, parsed once.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates::builtin())
            .map_err(|e| RenderError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        tracing::trace!(template, "rendering");
        Ok(self.tera.render(template, context)?)
    }

    pub fn evaluation(&self, name: &str, evaluation: &Evaluation) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("name", name);
        context.insert("evaluation", evaluation);
        context.insert("disclaimer", templates::DISCLAIMER);
        self.render(templates::EVALUATION, &context)
    }

    pub fn calculators(&self, calculators: &[CalculatorInfo]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("calculators", calculators);
        self.render(templates::CALCULATORS, &context)
    }

    /// Field-by-field description of one calculator's inputs.
    pub fn calculator(&self, calculator: &CalculatorInfo) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("calc", calculator);
        self.render(templates::CALCULATOR, &context)
    }

    pub fn topics(&self, topics: &[Topic]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("topics", topics);
        self.render(templates::TOPICS, &context)
    }

    pub fn topic(&self, topic: &Topic) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("topic", topic);
        self.render(templates::TOPIC, &context)
    }

    pub fn glossary(&self, terms: &[&GlossaryTerm]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("terms", terms);
        self.render(templates::GLOSSARY, &context)
    }

    /// A question with lettered options. `header` is printed above it when
    /// non-empty.
    pub fn question(
        &self,
        header: &str,
        question: &str,
        options: &[String],
    ) -> Result<String, RenderError> {
        let lettered: Vec<LetteredOption<'_>> = options
            .iter()
            .enumerate()
            .map(|(i, text)| LetteredOption {
                letter: option_letter(i),
                text,
            })
            .collect();

        let mut context = Context::new();
        context.insert("header", header);
        context.insert("question", question);
        context.insert("options", &lettered);
        self.render(templates::QUESTION, &context)
    }

    pub fn feedback(&self, feedback: &AnswerFeedback) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("feedback", feedback);
        context.insert("correct_letter", &option_letter(feedback.correct_answer));
        self.render(templates::FEEDBACK, &context)
    }

    pub fn cases(&self, cases: &[CaseScenario]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("cases", cases);
        self.render(templates::CASES, &context)
    }

    /// The title and presentation shown before the first step.
    pub fn case(&self, case: &CaseScenario) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("case", case);
        self.render(templates::CASE, &context)
    }
}
