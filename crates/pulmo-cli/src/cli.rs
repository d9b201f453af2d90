use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "pulmo",
    version,
    about = "Pulmonary medicine reference and bedside calculators (educational use only)"
)]
pub struct Cli {
    /// Output format. Defaults to the config file's `output`, then text.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file path.
    #[arg(long, global = true, env = "PULMO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every calculator.
    Calculators,
    /// Show the inputs a calculator reads.
    Describe(DescribeArgs),
    /// Evaluate a calculator.
    Calc(CalcArgs),
    /// List the reference topics.
    Topics,
    /// Show one topic's reference sections.
    Topic(TopicArgs),
    /// Search the glossary.
    Glossary(GlossaryArgs),
    /// Interactive self-assessment quiz.
    Quiz,
    /// Work through a clinical case. Lists the cases when no id is given.
    Case(CaseArgs),
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Calculator id, e.g. `ards`.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Calculator id, e.g. `ards`.
    pub id: String,

    #[arg(
        short = 'i',
        long = "input",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        help = "Field value (repeatable). A bare FIELD sets a yes/no field; repeating a FIELD builds a selection list"
    )]
    pub inputs: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct TopicArgs {
    /// Topic id, e.g. `copd` or `pulmonary-embolism`.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct GlossaryArgs {
    /// Matched case-insensitively against terms and definitions.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Restrict to one category. `All` matches every category.
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct CaseArgs {
    /// Case id, e.g. `case-1`.
    pub id: Option<String>,
}

/// Split `field=value`. A bare `field` means `field=true`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw.split_once('=').unwrap_or((raw, "true"));
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}
