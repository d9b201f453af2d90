use pulmo_core::error::CoreError;
use pulmo_core::models::case::CaseQuestion;
use pulmo_core::models::question::Question;
use pulmo_core::models::topic::TopicId;

#[test]
fn topic_id_parses_snake_and_route_forms() {
    assert_eq!("ards".parse::<TopicId>().unwrap(), TopicId::Ards);
    assert_eq!(
        "pulmonary-embolism".parse::<TopicId>().unwrap(),
        TopicId::PulmonaryEmbolism
    );
    assert_eq!(
        "Pulmonary_Embolism".parse::<TopicId>().unwrap(),
        TopicId::PulmonaryEmbolism
    );
}

#[test]
fn unknown_topic_is_an_error() {
    let err = "cystic-fibrosis".parse::<TopicId>().unwrap_err();
    assert!(matches!(err, CoreError::UnknownTopic(ref id) if id == "cystic-fibrosis"));
}

#[test]
fn topic_id_serializes_as_snake_case() {
    let json = serde_json::to_string(&TopicId::PulmonaryEmbolism).unwrap();
    assert_eq!(json, "\"pulmonary_embolism\"");
}

#[test]
fn question_feedback_reports_correctness() {
    let q = Question {
        id: 1,
        category: "OSA".to_string(),
        question: "STOP-BANG of 6?".to_string(),
        options: vec!["Low".into(), "Intermediate".into(), "High".into()],
        correct_answer: 2,
        explanation: "≥5 is high risk".to_string(),
    };

    let right = q.feedback(2);
    assert!(right.is_correct);
    assert_eq!(right.next_step, None);

    let wrong = q.feedback(0);
    assert!(!wrong.is_correct);
    assert_eq!(wrong.correct_answer, 2);
}

#[test]
fn case_feedback_carries_next_step() {
    let q = CaseQuestion {
        id: 1,
        question: "Initial priority?".to_string(),
        options: vec!["X-ray".into(), "Oxygen and bronchodilators".into()],
        correct_answer: 1,
        explanation: "ABCs first".to_string(),
        next_step: Some("SpO₂ improves".to_string()),
    };
    let fb = q.feedback(0);
    assert!(!fb.is_correct);
    assert_eq!(fb.next_step.as_deref(), Some("SpO₂ improves"));
}
