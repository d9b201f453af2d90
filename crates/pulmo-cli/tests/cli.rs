use assert_cmd::Command;
use clap::Parser;
use pulmo_cli::cli::{Cli, Commands, parse_assignment};
use pulmo_cli::config::OutputFormat;

/// A `pulmo` command that ignores any config file on the machine.
fn pulmo(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pulmo").unwrap();
    cmd.env("PULMO_CONFIG", dir.path().join("absent.json"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn cli_help_smoke() {
    let dir = tempfile::tempdir().unwrap();
    pulmo(&dir).arg("--help").assert().success();
}

#[test]
fn lists_calculators() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(pulmo(&dir).arg("calculators"));
    assert!(out.contains("ards - "));
    assert!(out.contains("stop_bang - "));
}

#[test]
fn calc_ards_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(pulmo(&dir).args(["calc", "ards", "-i", "pao2=80", "-i", "fio2=0.6"]));
    assert!(out.contains("Result: Moderate ARDS (score 133.3)"));
    assert!(out.contains("Educational use only."));
}

#[test]
fn calc_ards_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(pulmo(&dir).args([
        "calc", "ards", "-i", "pao2=80", "-i", "fio2=0.6", "--format", "json",
    ]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["calculator_id"], "ards");
    assert_eq!(value["tier"], "Moderate ARDS");
    assert_eq!(value["score"], 133.3);
}

#[test]
fn config_file_sets_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 1, "output": "json"}"#).unwrap();

    let mut cmd = Command::cargo_bin("pulmo").unwrap();
    cmd.env("PULMO_CONFIG", &path).args(["calc", "ahi", "-i", "ahi=20"]);
    let out = stdout_of(&mut cmd);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["tier"], "Moderate OSA");
}

#[test]
fn config_migration_is_logged_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"format": "text"}"#).unwrap();

    let output = Command::cargo_bin("pulmo")
        .unwrap()
        .env("PULMO_CONFIG", &path)
        .env("RUST_LOG", "pulmo_cli=info")
        .arg("topics")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("migrated config in memory"), "{stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("migrated"));
}

#[test]
fn unknown_calculator_fails() {
    let dir = tempfile::tempdir().unwrap();
    pulmo(&dir).args(["calc", "apgar"]).assert().failure();
}

#[test]
fn invalid_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    pulmo(&dir)
        .args(["calc", "ards", "-i", "pao2=abc", "-i", "fio2=0.6"])
        .assert()
        .failure();
}

#[test]
fn glossary_search_from_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(pulmo(&dir).args(["glossary", "--search", "tidal volume"]));
    assert!(out.contains("Lung-Protective Ventilation ["));
    assert!(out.contains("Volutrauma ["));
}

#[test]
fn quiz_reads_answers_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(pulmo(&dir).arg("quiz").write_stdin("a\nq\n"));
    assert!(out.contains("Question 1 of 15"));
    assert!(out.contains("Question 2 of 15"));
    assert!(out.contains("(1 of 15 answered)"));
}

// ── Argument parsing ─────────────────────────────────────────

#[test]
fn format_flag_is_global() {
    let cli = Cli::parse_from(["pulmo", "topics", "--format", "json"]);
    assert_eq!(cli.format, Some(OutputFormat::Json));
    assert!(matches!(cli.command, Commands::Topics));
}

#[test]
fn repeated_inputs_are_kept_in_order() {
    let cli = Cli::parse_from([
        "pulmo", "calc", "asthma", "-i", "symptoms=wheezing", "-i", "symptoms=cough",
    ]);
    match cli.command {
        Commands::Calc(args) => {
            assert_eq!(args.id, "asthma");
            assert_eq!(
                args.inputs,
                vec![
                    ("symptoms".to_string(), "wheezing".to_string()),
                    ("symptoms".to_string(), "cough".to_string()),
                ]
            );
        }
        _ => panic!("expected calc command"),
    }
}

#[test]
fn case_id_is_optional() {
    let cli = Cli::parse_from(["pulmo", "case"]);
    match cli.command {
        Commands::Case(args) => assert_eq!(args.id, None),
        _ => panic!("expected case command"),
    }
}

#[test]
fn assignment_parsing() {
    assert_eq!(
        parse_assignment("pao2=80").unwrap(),
        ("pao2".to_string(), "80".to_string())
    );
    assert_eq!(
        parse_assignment("confusion").unwrap(),
        ("confusion".to_string(), "true".to_string())
    );
    assert_eq!(
        parse_assignment("pao2=").unwrap(),
        ("pao2".to_string(), String::new())
    );
    assert!(parse_assignment("=5").is_err());
}
