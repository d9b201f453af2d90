use std::collections::BTreeSet;

use pulmo_calculators::calculators::ards::{self, ArdsInput, ArdsSeverityTier, ChestImaging, Timing};
use pulmo_calculators::calculators::asthma::{self, AsthmaInput, AsthmaSeverityTier, AsthmaSymptom};
use pulmo_calculators::calculators::copd::{self, CopdInput, CopdSeverity, MentalStatus};
use pulmo_calculators::calculators::curb65::{self, Curb65Band, Curb65Input};
use pulmo_calculators::calculators::pe_risk::{self, PeRiskClass, PeRiskInput};
use pulmo_calculators::calculators::perc::{self, PercOutcome};
use pulmo_calculators::calculators::pneumonia::{
    self, CareSetting, Onset, PneumoniaInput, PneumoniaType,
};
use pulmo_calculators::calculators::stop_bang::{self, StopBangRisk};
use pulmo_calculators::calculators::tuberculosis::{
    self, CxrFinding, TbClassification, TbInput, TbSymptom, TestResult,
};
use pulmo_calculators::calculators::wells::{self, WellsInput, WellsProbability};
use pulmo_calculators::calculators::{ahi, gold, peak_flow};
use pulmo_calculators::error::CalculatorError;

fn ards_input(pao2: f64, fio2: f64) -> ArdsInput {
    ArdsInput {
        pao2,
        fio2,
        timing: Some(Timing::WithinWeek),
        imaging: Some(ChestImaging::Bilateral),
    }
}

// ── ARDS ─────────────────────────────────────────────────────

#[test]
fn ards_moderate_from_typical_abg() {
    let a = ards::assess(&ards_input(80.0, 0.6)).unwrap();
    assert_eq!(a.ratio, 133.3);
    assert_eq!(a.severity, ArdsSeverityTier::Moderate);
    assert_eq!(a.peep_range.as_deref(), Some("10-15 cm H₂O (educational concept)"));
    assert!(a.warnings.is_empty());
}

#[test]
fn ards_band_edges_are_closed_above() {
    assert_eq!(
        ards::assess(&ards_input(300.0, 1.0)).unwrap().severity,
        ArdsSeverityTier::Mild
    );
    assert_eq!(
        ards::assess(&ards_input(200.0, 1.0)).unwrap().severity,
        ArdsSeverityTier::Moderate
    );
    assert_eq!(
        ards::assess(&ards_input(100.0, 1.0)).unwrap().severity,
        ArdsSeverityTier::Severe
    );
    assert_eq!(
        ards::assess(&ards_input(301.0, 1.0)).unwrap().severity,
        ArdsSeverityTier::NotArds
    );
}

#[test]
fn ards_tier_uses_unrounded_ratio() {
    let a = ards::assess(&ards_input(300.04, 1.0)).unwrap();
    assert_eq!(a.ratio, 300.0);
    assert_eq!(a.severity, ArdsSeverityTier::NotArds);

    let b = ards::assess(&ards_input(299.96, 1.0)).unwrap();
    assert_eq!(b.ratio, 300.0);
    assert_eq!(b.severity, ArdsSeverityTier::Mild);
}

#[test]
fn ards_not_ards_has_no_peep_or_mortality() {
    let a = ards::assess(&ards_input(450.0, 1.0)).unwrap();
    assert_eq!(a.peep_range, None);
    assert_eq!(a.mortality, None);
}

#[test]
fn ards_warnings_do_not_change_tier() {
    let input = ArdsInput {
        timing: Some(Timing::OverWeek),
        imaging: Some(ChestImaging::Unilateral),
        ..ards_input(80.0, 0.6)
    };
    let a = ards::assess(&input).unwrap();
    assert_eq!(a.severity, ArdsSeverityTier::Moderate);
    assert!(!a.meets_timing);
    assert!(!a.meets_bilateral);
    assert_eq!(a.warnings.len(), 2);
}

#[test]
fn ards_zero_fio2_is_rejected() {
    let err = ards::assess(&ards_input(80.0, 0.0)).unwrap_err();
    assert!(matches!(err, CalculatorError::InvalidInput { ref field, .. } if field == "fio2"));
}

#[test]
fn ards_out_of_range_values_are_rejected() {
    assert!(ards::assess(&ards_input(80.0, 1.5)).is_err());
    assert!(ards::assess(&ards_input(10.0, 0.5)).is_err());
    assert!(ards::assess(&ards_input(f64::NAN, 0.5)).is_err());
}

// ── Tuberculosis ─────────────────────────────────────────────

fn tb(test: Option<TestResult>, symptoms: &[TbSymptom], cxr: Option<CxrFinding>) -> TbInput {
    TbInput {
        test_result: test,
        symptoms: symptoms.iter().copied().collect::<BTreeSet<_>>(),
        cxr,
    }
}

#[test]
fn tb_positive_asymptomatic_normal_cxr_is_latent() {
    let r = tuberculosis::classify(&tb(
        Some(TestResult::PositiveQuantiferon),
        &[],
        Some(CxrFinding::Normal),
    ));
    assert_eq!(r.classification, TbClassification::Latent);
    assert!(!r.isolation);
    assert_eq!(r.management[0], "No active disease - patient is not contagious");
}

#[test]
fn tb_positive_with_cavitation_is_active() {
    let r = tuberculosis::classify(&tb(
        Some(TestResult::PositivePpd),
        &[TbSymptom::Cough, TbSymptom::Hemoptysis],
        Some(CxrFinding::Cavitation),
    ));
    assert_eq!(r.classification, TbClassification::Active);
    assert!(r.isolation);
    assert!(r.management.iter().any(|m| m == "Airborne isolation required"));
}

#[test]
fn tb_positive_asymptomatic_with_active_cxr_is_active() {
    let r = tuberculosis::classify(&tb(
        Some(TestResult::PositivePpd),
        &[],
        Some(CxrFinding::Miliary),
    ));
    assert_eq!(r.classification, TbClassification::Active);
}

#[test]
fn tb_symptoms_without_positive_test_is_possible() {
    let r = tuberculosis::classify(&tb(Some(TestResult::Negative), &[TbSymptom::Fever], None));
    assert_eq!(r.classification, TbClassification::Possible);
    assert!(!r.isolation);

    let unset = tuberculosis::classify(&tb(None, &[TbSymptom::NightSweats], None));
    assert_eq!(unset.classification, TbClassification::Possible);
}

#[test]
fn tb_positive_asymptomatic_without_cxr_is_low_probability() {
    let r = tuberculosis::classify(&tb(Some(TestResult::PositiveQuantiferon), &[], None));
    assert_eq!(r.classification, TbClassification::LowProbability);
}

#[test]
fn tb_empty_input_is_low_probability() {
    let r = tuberculosis::classify(&TbInput::default());
    assert_eq!(r.classification, TbClassification::LowProbability);
    assert_eq!(r.management, vec!["No evidence of TB infection", "Consider alternative diagnoses"]);
}

// ── CURB-65 ──────────────────────────────────────────────────

#[test]
fn curb65_bands() {
    let none = curb65::assess(&Curb65Input::default());
    assert_eq!(none.score, 0);
    assert_eq!(none.severity, Curb65Band::Low);
    assert_eq!(none.mortality, "<3%");

    let two = curb65::assess(&Curb65Input {
        confusion: true,
        age_65: true,
        ..Default::default()
    });
    assert_eq!(two.score, 2);
    assert_eq!(two.severity, Curb65Band::Moderate);

    let all = curb65::assess(&Curb65Input::from_flags([true; 5]));
    assert_eq!(all.score, 5);
    assert_eq!(all.severity, Curb65Band::High);
    assert_eq!(all.mortality, "15-40%");
}

#[test]
fn curb65_band_edges() {
    let one = curb65::assess(&Curb65Input {
        urea: true,
        ..Default::default()
    });
    assert_eq!(one.score, 1);
    assert_eq!(one.severity, Curb65Band::Low);

    let three = curb65::assess(&Curb65Input::from_flags([true, true, true, false, false]));
    assert_eq!(three.score, 3);
    assert_eq!(three.severity, Curb65Band::High);

    let expected = [
        Curb65Band::Low,
        Curb65Band::Low,
        Curb65Band::Moderate,
        Curb65Band::High,
        Curb65Band::High,
        Curb65Band::High,
    ];
    for (score, band) in expected.into_iter().enumerate() {
        assert_eq!(Curb65Band::from_score(score as u32), band, "score {score}");
    }
}

// ── Wells / PERC / PE risk ───────────────────────────────────

#[test]
fn wells_weighted_sum_above_six_is_high() {
    let r = wells::assess(&WellsInput {
        dvt_signs: true,
        pe_most_likely: true,
        heart_rate: true,
        ..Default::default()
    });
    assert_eq!(r.score, 7.5);
    assert_eq!(r.probability, WellsProbability::High);
}

#[test]
fn wells_boundaries_fall_into_moderate() {
    assert_eq!(WellsProbability::from_score(2.0), WellsProbability::Moderate);
    assert_eq!(WellsProbability::from_score(6.0), WellsProbability::Moderate);
    assert_eq!(WellsProbability::from_score(1.5), WellsProbability::Low);

    let six = wells::assess(&WellsInput {
        dvt_signs: true,
        pe_most_likely: true,
        ..Default::default()
    });
    assert_eq!(six.score, 6.0);
    assert_eq!(six.probability, WellsProbability::Moderate);
}

#[test]
fn perc_negative_only_when_every_criterion_absent() {
    let clear = perc::assess(&[false; 8]);
    assert_eq!(clear.outcome, PercOutcome::Negative);
    assert_eq!(clear.positive_count, 0);

    let mut one = [false; 8];
    one[3] = true;
    let r = perc::assess(&one);
    assert_eq!(r.outcome, PercOutcome::Positive);
    assert_eq!(r.positive_count, 1);

    let all = perc::assess(&[true; 8]);
    assert_eq!(all.outcome, PercOutcome::Positive);
    assert_eq!(all.positive_count, 8);
}

#[test]
fn pe_risk_instability_outranks_rv_strain() {
    let all = PeRiskInput {
        hemodynamically_unstable: true,
        rv_dysfunction: true,
        myocardial_necrosis: true,
    };
    assert_eq!(pe_risk::classify(&all), PeRiskClass::Massive);

    let troponin = PeRiskInput {
        myocardial_necrosis: true,
        ..Default::default()
    };
    assert_eq!(pe_risk::classify(&troponin), PeRiskClass::Submassive);
    assert_eq!(pe_risk::classify(&PeRiskInput::default()), PeRiskClass::Low);
}

// ── OSA ──────────────────────────────────────────────────────

#[test]
fn stop_bang_tiers() {
    let mut six = [true; 8];
    six[0] = false;
    six[1] = false;
    let r = stop_bang::assess(&six);
    assert_eq!(r.score, 6);
    assert_eq!(r.risk, StopBangRisk::High);

    assert_eq!(StopBangRisk::from_score(2), StopBangRisk::Low);
    assert_eq!(StopBangRisk::from_score(3), StopBangRisk::Intermediate);
    assert_eq!(StopBangRisk::from_score(4), StopBangRisk::Intermediate);
    assert_eq!(StopBangRisk::from_score(5), StopBangRisk::High);
}

#[test]
fn ahi_thresholds() {
    assert_eq!(ahi::classify(4.9).unwrap().label(), "No OSA");
    assert_eq!(ahi::classify(5.0).unwrap().label(), "Mild OSA");
    assert_eq!(ahi::classify(15.0).unwrap().label(), "Moderate OSA");
    assert_eq!(ahi::classify(30.0).unwrap().label(), "Moderate OSA");
    assert_eq!(ahi::classify(30.1).unwrap().label(), "Severe OSA");
    assert!(ahi::classify(-1.0).is_err());
}

// ── Asthma ───────────────────────────────────────────────────

fn asthma_input(symptoms: &[AsthmaSymptom], peak_flow: Option<f64>) -> AsthmaInput {
    AsthmaInput {
        symptoms: symptoms.iter().copied().collect(),
        peak_flow,
    }
}

#[test]
fn asthma_severe_marker_wins_over_good_peak_flow() {
    let a = asthma::assess(&asthma_input(&[AsthmaSymptom::Accessory], Some(85.0))).unwrap();
    assert_eq!(a.severity, AsthmaSeverityTier::Severe);
    assert_eq!(a.management[0], "EMERGENCY - Immediate ED care required");
}

#[test]
fn asthma_peak_flow_bands() {
    let severity = |pf| asthma::assess(&asthma_input(&[], Some(pf))).unwrap().severity;
    assert_eq!(severity(39.0), AsthmaSeverityTier::Severe);
    assert_eq!(severity(40.0), AsthmaSeverityTier::Moderate);
    assert_eq!(severity(59.0), AsthmaSeverityTier::Moderate);
    assert_eq!(severity(60.0), AsthmaSeverityTier::Mild);
}

#[test]
fn asthma_without_peak_flow_uses_symptoms_only() {
    let a = asthma::assess(&asthma_input(&[AsthmaSymptom::SpeakSentences], None)).unwrap();
    assert_eq!(a.severity, AsthmaSeverityTier::Moderate);

    let mild = asthma::assess(&asthma_input(&[AsthmaSymptom::Wheezing], None)).unwrap();
    assert_eq!(mild.severity, AsthmaSeverityTier::Mild);
}

#[test]
fn asthma_rejects_peak_flow_over_100() {
    assert!(asthma::assess(&asthma_input(&[], Some(120.0))).is_err());
}

#[test]
fn peak_flow_zones() {
    assert_eq!(peak_flow::zone(80.0).unwrap().label(), "Green Zone");
    assert_eq!(peak_flow::zone(79.9).unwrap().label(), "Yellow Zone");
    assert_eq!(peak_flow::zone(40.0).unwrap().label(), "Orange Zone");
    assert_eq!(peak_flow::zone(39.0).unwrap().label(), "Red Zone");
}

// ── COPD ─────────────────────────────────────────────────────

fn copd_input(ph: f64, paco2: f64, rr: f64, mental: Option<MentalStatus>) -> CopdInput {
    CopdInput {
        ph,
        paco2,
        respiratory_rate: rr,
        mental_status: mental,
    }
}

#[test]
fn copd_hypercapnic_acidosis_suggests_nippv() {
    let a = copd::assess(&copd_input(7.32, 55.0, 24.0, Some(MentalStatus::Alert))).unwrap();
    assert_eq!(a.severity, CopdSeverity::Moderate);
    assert!(a.nippv_indicated);
    assert!(a.hypercapnic_failure);
    assert_eq!(a.recommendations.len(), 6);
    assert_eq!(a.general_management.len(), 5);
}

#[test]
fn copd_altered_mental_status_is_severe_without_nippv() {
    let a = copd::assess(&copd_input(7.32, 55.0, 20.0, Some(MentalStatus::Altered))).unwrap();
    assert_eq!(a.severity, CopdSeverity::Severe);
    assert!(!a.nippv_indicated);
    assert!(a.hypercapnic_failure);
    assert_eq!(a.recommendations[0], "Immediate medical attention required");
}

#[test]
fn copd_normal_gas_is_mild() {
    let a = copd::assess(&copd_input(7.40, 40.0, 18.0, None)).unwrap();
    assert_eq!(a.severity, CopdSeverity::Mild);
    assert!(a.recommendations.is_empty());
}

#[test]
fn copd_respiratory_rate_counts_whole_breaths() {
    let a = copd::assess(&copd_input(7.40, 40.0, 30.5, None)).unwrap();
    assert_eq!(a.severity, CopdSeverity::Moderate);

    let b = copd::assess(&copd_input(7.40, 40.0, 31.0, None)).unwrap();
    assert_eq!(b.severity, CopdSeverity::Severe);

    let c = copd::assess(&copd_input(7.40, 40.0, 25.9, None)).unwrap();
    assert_eq!(c.severity, CopdSeverity::Mild);
}

#[test]
fn gold_grades() {
    assert_eq!(gold::grade(85.0).unwrap().label(), "GOLD 1 (Mild)");
    assert_eq!(gold::grade(50.0).unwrap().label(), "GOLD 2 (Moderate)");
    assert_eq!(gold::grade(30.0).unwrap().label(), "GOLD 3 (Severe)");
    assert_eq!(gold::grade(29.9).unwrap().label(), "GOLD 4 (Very Severe)");
}

// ── Pneumonia ────────────────────────────────────────────────

#[test]
fn pneumonia_classification_order() {
    let classify = |setting, onset| pneumonia::classify(&PneumoniaInput { setting, onset }).kind;

    assert_eq!(classify(Some(CareSetting::Community), None), PneumoniaType::Cap);
    assert_eq!(
        classify(Some(CareSetting::MechanicallyVentilated), Some(Onset::BeforeAdmission)),
        PneumoniaType::Cap
    );
    assert_eq!(
        classify(Some(CareSetting::Icu), Some(Onset::After48hHospital)),
        PneumoniaType::Hap
    );
    assert_eq!(
        classify(Some(CareSetting::MechanicallyVentilated), Some(Onset::After48hIntubation)),
        PneumoniaType::Vap
    );
    assert_eq!(
        classify(Some(CareSetting::HospitalFloor), Some(Onset::After48hIntubation)),
        PneumoniaType::Unclassified
    );
    assert_eq!(classify(None, None), PneumoniaType::Unclassified);
}

#[test]
fn pneumonia_cap_lists_pathogens_and_notes() {
    let r = pneumonia::classify(&PneumoniaInput {
        setting: Some(CareSetting::Community),
        onset: None,
    });
    assert_eq!(r.pathogens[0], "Streptococcus pneumoniae");
    assert_eq!(r.notes[1], "Use CURB-65 for severity assessment");
}
