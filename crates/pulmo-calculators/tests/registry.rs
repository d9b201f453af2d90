use std::collections::{BTreeSet, HashSet};

use pulmo_calculators::calculators::tuberculosis::TbSymptom;
use pulmo_calculators::error::CalculatorError;
use pulmo_calculators::scoring::{FieldKind, InputSnapshot, InputValue};
use pulmo_calculators::{all_calculators, calculators_for, evaluate, get_calculator};
use pulmo_core::models::topic::TopicId;

#[test]
fn registry_ids_are_unique_and_resolvable() {
    let all = all_calculators();
    assert_eq!(all.len(), 13);

    let ids: HashSet<String> = all.iter().map(|c| c.id().to_string()).collect();
    assert_eq!(ids.len(), all.len());

    for id in &ids {
        let calc = get_calculator(id).unwrap();
        assert_eq!(calc.id(), id);
        assert!(!calc.fields().is_empty(), "{id} has no fields");
    }
}

#[test]
fn every_topic_has_a_calculator() {
    for topic in TopicId::ALL {
        assert!(!calculators_for(topic).is_empty(), "{topic} has no calculator");
    }
    let pe: Vec<String> = calculators_for(TopicId::PulmonaryEmbolism)
        .iter()
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(pe, vec!["wells", "perc", "pe_risk"]);
}

#[test]
fn unknown_calculator_is_an_error() {
    let err = evaluate("apache2", &InputSnapshot::new()).unwrap_err();
    assert_eq!(err, CalculatorError::UnknownCalculator("apache2".to_string()));
}

#[test]
fn ards_from_text_snapshot() {
    let input = InputSnapshot::new()
        .with("pao2", "80")
        .with("fio2", "0.6")
        .with("timing", "within_week")
        .with("imaging", "bilateral");

    let result = evaluate("ards", &input).unwrap();
    assert_eq!(result.tier, "Moderate ARDS");
    assert_eq!(result.score, Some(133.3));
    assert!(result.guidance.is_empty());
    assert!(result.flags.iter().all(|f| f.value));
}

#[test]
fn ards_rejects_blank_and_malformed_numbers() {
    for pao2 in ["", "abc", "NaN"] {
        let input = InputSnapshot::new().with("pao2", pao2).with("fio2", "0.5");
        let err = evaluate("ards", &input).unwrap_err();
        assert!(
            matches!(err, CalculatorError::InvalidInput { ref field, .. } if field == "pao2"),
            "pao2 = {pao2:?} gave {err:?}"
        );
    }
}

#[test]
fn ards_rejects_zero_fio2() {
    let input = InputSnapshot::new().with("pao2", 80.0).with("fio2", 0.0);
    assert!(matches!(
        evaluate("ards", &input),
        Err(CalculatorError::InvalidInput { .. })
    ));
}

#[test]
fn evaluation_is_idempotent() {
    let input = InputSnapshot::new()
        .with("confusion", true)
        .with("urea", "yes")
        .with("age_65", 1.0);

    let first = evaluate("curb65", &input).unwrap();
    let second = evaluate("curb65", &input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.score, Some(3.0));
    assert_eq!(first.tier, "High");
}

#[test]
fn missing_flags_are_unchecked() {
    let result = evaluate("perc", &InputSnapshot::new()).unwrap();
    assert_eq!(result.tier, "PERC Negative");
}

#[test]
fn bad_flag_text_is_rejected() {
    let input = InputSnapshot::new().with("snoring", "loudly");
    assert!(evaluate("stop_bang", &input).is_err());
}

#[test]
fn multi_select_accepts_list_or_comma_text() {
    let list = InputSnapshot::new()
        .with("test_result", "positive_ppd")
        .with("symptoms", &["cough", "fever"][..]);
    let text = InputSnapshot::new()
        .with("test_result", "positive_ppd")
        .with("symptoms", "cough, fever,cough");

    let a = evaluate("tuberculosis", &list).unwrap();
    let b = evaluate("tuberculosis", &text).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.tier, "Active TB (Suspected or Confirmed)");
    assert!(a.flags.iter().any(|f| f.id == "isolation" && f.value));
}

#[test]
fn list_items_may_hold_comma_separated_selections() {
    let mixed = InputSnapshot::new()
        .with("test_result", "negative")
        .with("symptoms", &["cough,fever", "fatigue"][..]);
    let symptoms: BTreeSet<TbSymptom> = mixed.selections("symptoms").unwrap();
    assert_eq!(
        symptoms,
        BTreeSet::from([TbSymptom::Cough, TbSymptom::Fever, TbSymptom::Fatigue])
    );

    let flat = InputSnapshot::new()
        .with("test_result", "negative")
        .with("symptoms", &["cough", "fever", "fatigue"][..]);
    let result = evaluate("tuberculosis", &mixed).unwrap();
    assert_eq!(result, evaluate("tuberculosis", &flat).unwrap());
    assert_eq!(result.tier, "TB Possible - Further Testing Needed");
}

#[test]
fn unknown_choice_token_is_rejected() {
    let input = InputSnapshot::new().with("setting", "nursing_home");
    let err = evaluate("pneumonia", &input).unwrap_err();
    assert!(matches!(err, CalculatorError::InvalidInput { ref field, .. } if field == "setting"));
}

#[test]
fn blank_choice_means_unset() {
    let input = InputSnapshot::new().with("setting", "").with("onset", "after_48h_hospital");
    let result = evaluate("pneumonia", &input).unwrap();
    assert_eq!(result.tier, "HAP (Hospital-Acquired Pneumonia)");
}

#[test]
fn asthma_peak_flow_is_optional() {
    let input = InputSnapshot::new().with("symptoms", "speak_words");
    let result = evaluate("asthma", &input).unwrap();
    assert_eq!(result.tier, "Severe Exacerbation");

    let field = get_calculator("asthma").unwrap();
    assert!(field.field("peak_flow").unwrap().optional);
}

#[test]
fn copd_requires_every_gas_value() {
    let input = InputSnapshot::new().with("ph", 7.3).with("paco2", 50.0);
    let err = evaluate("copd", &input).unwrap_err();
    assert!(matches!(
        err,
        CalculatorError::InvalidInput { ref field, .. } if field == "respiratory_rate"
    ));
}

#[test]
fn field_descriptions_serialize_with_kind_tag() {
    let wells = get_calculator("wells").unwrap();
    let json = serde_json::to_value(wells.field("dvt_signs").unwrap()).unwrap();
    assert_eq!(json["kind"]["type"], "flag");
    assert_eq!(json["kind"]["weight"], 3.0);

    let ards = get_calculator("ards").unwrap();
    assert!(matches!(
        ards.field("fio2").unwrap().kind,
        FieldKind::Number { .. }
    ));
}

#[test]
fn snapshot_deserializes_from_plain_json() {
    let input: InputSnapshot = serde_json::from_str(
        r#"{"values": {"ahi": 22, "note": "x", "on": true, "list": ["a"]}}"#,
    )
    .unwrap();
    assert_eq!(input.get("ahi"), Some(&InputValue::Number(22.0)));
    assert_eq!(input.get("on"), Some(&InputValue::Flag(true)));
    assert_eq!(evaluate("ahi", &input).unwrap().tier, "Moderate OSA");
}
