use std::io::{BufRead, Write};

use eyre::Result;
use serde::Serialize;

use pulmo_calculators::error::CalculatorError;
use pulmo_calculators::scoring::{InputSnapshot, InputValue};
use pulmo_calculators::{CalculatorInfo, all_calculators, get_calculator};
use pulmo_core::models::question::AnswerFeedback;
use pulmo_reference::cases::{self, CaseSession};
use pulmo_reference::quiz::QuizSession;
use pulmo_reference::{glossary, topics};
use pulmo_render::error::RenderError;
use pulmo_render::render::{Renderer, option_letter};

use crate::cli::{CalcArgs, CaseArgs, Cli, Commands, GlossaryArgs};
use crate::config::{Config, OutputFormat};

// ── Output ───────────────────────────────────────────────────

/// Writes each result either as rendered text or as pretty JSON.
pub struct Printer<W> {
    renderer: Renderer,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(format: OutputFormat, out: W) -> Result<Self> {
        Ok(Self {
            renderer: Renderer::new()?,
            format,
            out,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T, F>(&mut self, value: &T, text: F) -> Result<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&Renderer) -> Result<String, RenderError>,
    {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, value)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                let rendered = text(&self.renderer)?;
                write!(self.out, "{rendered}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Prompts and hints. Suppressed in JSON mode so stdout stays parseable.
    fn note(&mut self, line: &str) -> Result<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn blank(&mut self) -> Result<()> {
        self.note("")
    }
}

/// A question as shown to the learner, without its answer.
#[derive(Debug, Serialize)]
struct Prompt<'a> {
    number: usize,
    total: usize,
    question: &'a str,
    options: &'a [String],
}

#[derive(Debug, Serialize)]
struct CaseIntro<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    presentation: &'a str,
}

#[derive(Debug, Serialize)]
struct QuizSummary {
    score: usize,
    answered: usize,
    total: usize,
}

// ── Dispatch ─────────────────────────────────────────────────

/// Run one parsed command against stdin and stdout.
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let format = cli.format.unwrap_or(config.output);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut printer = Printer::new(format, std::io::stdout().lock())?;
    execute(cli.command, &mut printer, &mut input)
}

pub fn execute<W: Write, R: BufRead>(
    command: Commands,
    printer: &mut Printer<W>,
    input: &mut R,
) -> Result<()> {
    match command {
        Commands::Calculators => {
            let infos: Vec<CalculatorInfo> = all_calculators()
                .iter()
                .map(|c| CalculatorInfo::from(c.as_ref()))
                .collect();
            printer.emit(&infos, |r| r.calculators(&infos))
        }
        Commands::Describe(args) => {
            let calculator = get_calculator(&args.id)
                .ok_or_else(|| CalculatorError::UnknownCalculator(args.id.clone()))?;
            let info = CalculatorInfo::from(calculator.as_ref());
            printer.emit(&info, |r| r.calculator(&info))
        }
        Commands::Calc(args) => calc(args, printer),
        Commands::Topics => {
            let all = topics::all_topics();
            printer.emit(all, |r| r.topics(all))
        }
        Commands::Topic(args) => {
            let topic = topics::find_topic(&args.id)?;
            printer.emit(topic, |r| r.topic(topic))
        }
        Commands::Glossary(args) => glossary_search(args, printer),
        Commands::Quiz => quiz(printer, input),
        Commands::Case(args) => case(args, printer, input),
    }
}

// ── Calculators ──────────────────────────────────────────────

/// Build a snapshot from `field=value` pairs. A field given more than once
/// becomes a list, which is how multi-select fields are filled in.
pub fn snapshot_from(inputs: &[(String, String)]) -> InputSnapshot {
    let mut snapshot = InputSnapshot::new();
    for (field, value) in inputs {
        let merged = match snapshot.values.remove(field) {
            Some(InputValue::Text(previous)) => InputValue::List(vec![previous, value.clone()]),
            Some(InputValue::List(mut items)) => {
                items.push(value.clone());
                InputValue::List(items)
            }
            _ => InputValue::Text(value.clone()),
        };
        snapshot.values.insert(field.clone(), merged);
    }
    snapshot
}

fn calc<W: Write>(args: CalcArgs, printer: &mut Printer<W>) -> Result<()> {
    let calculator = get_calculator(&args.id)
        .ok_or_else(|| CalculatorError::UnknownCalculator(args.id.clone()))?;
    let snapshot = snapshot_from(&args.inputs);
    let evaluation = pulmo_calculators::evaluate(calculator.id(), &snapshot)?;
    printer.emit(&evaluation, |r| r.evaluation(calculator.name(), &evaluation))
}

fn glossary_search<W: Write>(args: GlossaryArgs, printer: &mut Printer<W>) -> Result<()> {
    let terms = glossary::search(args.search.as_deref().unwrap_or(""), args.category.as_deref());
    printer.emit(&terms, |r| r.glossary(&terms))
}

// ── Interactive ──────────────────────────────────────────────

/// Parse an answer typed as a letter (`b`) or a 1-based number (`2`).
pub fn parse_answer(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n.checked_sub(1);
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(usize::from(c.to_ascii_uppercase() as u8 - b'A'))
        }
        _ => None,
    }
}

/// Read answers until one names a valid option. `None` on quit or end of
/// input.
fn read_choice<W: Write, R: BufRead>(
    printer: &mut Printer<W>,
    input: &mut R,
    len: usize,
) -> Result<Option<usize>> {
    let last = option_letter(len.saturating_sub(1));
    loop {
        printer.note(&format!("Answer [A-{last}], q to quit:"))?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match parse_answer(line) {
            Some(choice) if choice < len => return Ok(Some(choice)),
            _ => printer.note(&format!("'{line}' is not one of A-{last}."))?,
        }
    }
}

fn show_feedback<W: Write>(printer: &mut Printer<W>, feedback: &AnswerFeedback) -> Result<()> {
    printer.emit(feedback, |r| r.feedback(feedback))?;
    printer.blank()
}

fn quiz<W: Write, R: BufRead>(printer: &mut Printer<W>, input: &mut R) -> Result<()> {
    let mut session = QuizSession::new();

    loop {
        let question = session.current();
        let prompt = Prompt {
            number: session.index() + 1,
            total: session.len(),
            question: &question.question,
            options: &question.options,
        };
        let header = format!(
            "Question {} of {} ({})",
            prompt.number, prompt.total, question.category
        );
        printer.emit(&prompt, |r| r.question(&header, prompt.question, prompt.options))?;

        let Some(choice) = read_choice(printer, input, prompt.options.len())? else {
            break;
        };
        session.select(choice)?;
        let feedback = session.submit()?;
        show_feedback(printer, &feedback)?;

        if !session.next() {
            break;
        }
    }

    let progress = session.progress();
    let summary = QuizSummary {
        score: session.score(),
        answered: progress.answered,
        total: progress.total,
    };
    tracing::debug!(score = summary.score, answered = summary.answered, "quiz finished");
    printer.emit(&summary, |_| {
        Ok(format!(
            "Score: {} of {} correct ({} of {} answered)\n",
            summary.score, summary.answered, summary.answered, summary.total
        ))
    })
}

fn case<W: Write, R: BufRead>(
    args: CaseArgs,
    printer: &mut Printer<W>,
    input: &mut R,
) -> Result<()> {
    let Some(id) = args.id else {
        let all = cases::all_cases();
        return printer.emit(all, |r| r.cases(all));
    };

    let mut session = CaseSession::start(&id)?;
    let scenario = session.case();
    let intro = CaseIntro {
        id: &scenario.id,
        title: &scenario.title,
        category: &scenario.category,
        presentation: &scenario.presentation,
    };
    printer.emit(&intro, |r| r.case(scenario))?;
    printer.blank()?;

    loop {
        let step = session.current();
        let prompt = Prompt {
            number: session.step() + 1,
            total: scenario.questions.len(),
            question: &step.question,
            options: &step.options,
        };
        let header = format!("Step {} of {}", prompt.number, prompt.total);
        printer.emit(&prompt, |r| r.question(&header, prompt.question, prompt.options))?;

        let Some(choice) = read_choice(printer, input, prompt.options.len())? else {
            return Ok(());
        };
        session.select(choice)?;
        let feedback = session.submit()?;
        show_feedback(printer, &feedback)?;

        if !session.advance()? {
            break;
        }
    }

    printer.note("Case complete.")
}
