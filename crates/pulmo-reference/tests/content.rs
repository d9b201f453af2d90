use pulmo_core::models::topic::TopicId;
use pulmo_reference::error::ReferenceError;
use pulmo_reference::{cases, glossary, quiz, topics};

#[test]
fn every_topic_is_present_once() {
    let all = topics::all_topics();
    assert_eq!(all.len(), TopicId::ALL.len());
    for id in TopicId::ALL {
        let topic = topics::get_topic(id).unwrap();
        assert!(!topic.sections.is_empty(), "{id} has no sections");
        assert!(topic.path.starts_with('/'));
    }
}

#[test]
fn topic_calculators_belong_to_that_topic() {
    for topic in topics::all_topics() {
        for calc_id in &topic.calculator_ids {
            let calc = pulmo_calculators::get_calculator(calc_id)
                .unwrap_or_else(|| panic!("{calc_id} is not registered"));
            assert_eq!(calc.topic(), topic.id);
        }
        let registered = pulmo_calculators::calculators_for(topic.id).len();
        assert_eq!(topic.calculator_ids.len(), registered, "{}", topic.id);
    }
}

#[test]
fn find_topic_accepts_route_form() {
    let pe = topics::find_topic("pulmonary-embolism").unwrap();
    assert_eq!(pe.path, "/pulmonary-embolism");
    assert!(matches!(
        topics::find_topic("sarcoidosis"),
        Err(ReferenceError::Core(_))
    ));
}

// ── Glossary ─────────────────────────────────────────────────

#[test]
fn glossary_has_every_term() {
    assert_eq!(glossary::all_terms().len(), 39);
    assert_eq!(glossary::search("", None).len(), 39);
}

#[test]
fn glossary_categories_are_sorted_and_unique() {
    let cats = glossary::categories();
    let mut sorted = cats.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(cats, sorted);
    assert!(cats.contains(&"Ventilation"));
}

#[test]
fn glossary_search_is_case_insensitive() {
    let upper = glossary::search("HYPERCAPNIA", None);
    let lower = glossary::search("hypercapnia", None);
    assert_eq!(upper, lower);
    assert!(upper.iter().any(|t| t.term == "Hypercapnia"));
    assert!(upper.iter().any(|t| t.term == "Permissive Hypercapnia"));
}

#[test]
fn glossary_search_matches_definitions_and_sorts_by_term() {
    let hits = glossary::search("tidal volume", None);
    let terms: Vec<&str> = hits.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(terms, vec!["Lung-Protective Ventilation", "Volutrauma"]);

    let mut sorted = terms.clone();
    sorted.sort_by_key(|t| t.to_lowercase());
    assert_eq!(terms, sorted);
}

#[test]
fn glossary_category_filter() {
    let pneumonia = glossary::search("", Some("pneumonia"));
    assert_eq!(pneumonia.len(), 4);
    assert!(pneumonia.iter().all(|t| t.category == "Pneumonia"));

    assert_eq!(glossary::search("", Some("All")).len(), 39);
    assert!(glossary::search("", Some("Cardiology")).is_empty());
}

// ── Quiz ─────────────────────────────────────────────────────

#[test]
fn quiz_bank_is_well_formed() {
    let bank = quiz::questions();
    assert_eq!(bank.len(), 15);
    for q in bank {
        assert!(q.correct_answer < q.options.len(), "question {}", q.id);
    }
}

#[test]
fn quiz_submit_requires_selection() {
    let mut session = quiz::QuizSession::new();
    assert!(matches!(session.submit(), Err(ReferenceError::NoSelection)));
    assert!(matches!(
        session.select(9),
        Err(ReferenceError::OptionOutOfRange { index: 9, len: 4 })
    ));
}

#[test]
fn quiz_selection_is_frozen_after_submit() {
    let mut session = quiz::QuizSession::new();
    let correct = session.current().correct_answer;

    session.select(correct).unwrap();
    let feedback = session.submit().unwrap();
    assert!(feedback.is_correct);

    session.select((correct + 1) % 4).unwrap();
    assert_eq!(session.selected(), Some(correct));
    assert_eq!(session.progress().answered, 1);
    assert_eq!(session.score(), 1);
}

#[test]
fn quiz_navigation_clears_answer_but_keeps_progress() {
    let mut session = quiz::QuizSession::new();
    assert!(!session.previous());

    session.select(0).unwrap();
    session.submit().unwrap();
    assert!(session.next());
    assert_eq!(session.index(), 1);
    assert_eq!(session.selected(), None);
    assert!(!session.is_submitted());

    assert!(session.previous());
    assert_eq!(session.index(), 0);
    assert_eq!(session.selected(), None);
    assert_eq!(session.progress().answered, 1);
}

#[test]
fn quiz_stops_at_last_question_and_resets() {
    let mut session = quiz::QuizSession::new();
    while session.next() {}
    assert!(session.is_last());
    assert_eq!(session.index(), 14);
    assert!(!session.next());

    session.select(0).unwrap();
    session.submit().unwrap();
    session.reset();
    assert_eq!(session.index(), 0);
    assert_eq!(session.progress(), quiz::Progress { answered: 0, total: 15 });
}

// ── Cases ────────────────────────────────────────────────────

#[test]
fn cases_have_three_steps_with_narrative() {
    let all = cases::all_cases();
    assert_eq!(all.len(), 4);
    for case in all {
        assert_eq!(case.questions.len(), 3, "{}", case.id);
        assert!(case.questions.iter().all(|q| q.next_step.is_some()));
    }
}

#[test]
fn unknown_case_is_an_error() {
    assert!(matches!(
        cases::CaseSession::start("case-9"),
        Err(ReferenceError::UnknownCase(ref id)) if id == "case-9"
    ));
}

#[test]
fn case_walkthrough() {
    let mut session = cases::CaseSession::start("case-1").unwrap();
    assert!(matches!(session.advance(), Err(ReferenceError::NotSubmitted)));

    session.select(1).unwrap();
    let feedback = session.submit().unwrap();
    assert!(feedback.is_correct);
    assert!(feedback.next_step.unwrap().contains("albuterol"));
    assert!(!session.is_complete());

    assert!(session.advance().unwrap());
    assert_eq!(session.step(), 1);
    assert_eq!(session.selected(), None);

    session.select(0).unwrap();
    assert!(!session.submit().unwrap().is_correct);
    assert!(session.advance().unwrap());

    session.select(1).unwrap();
    session.submit().unwrap();
    assert!(session.is_complete());
    assert!(!session.advance().unwrap());
    assert_eq!(session.step(), 2);
}
