use pulmo_core::models::case::{CaseQuestion, CaseScenario};
use pulmo_core::models::question::AnswerFeedback;

use crate::error::ReferenceError;

fn step<const N: usize>(
    id: u32,
    question: &str,
    options: [&str; N],
    correct_answer: usize,
    explanation: &str,
    next_step: Option<&str>,
) -> CaseQuestion {
    CaseQuestion {
        id,
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: explanation.to_string(),
        next_step: next_step.map(str::to_string),
    }
}

pub fn all_cases() -> &'static [CaseScenario] {
    static CASES: std::sync::LazyLock<Vec<CaseScenario>> = std::sync::LazyLock::new(|| {
        vec![
            CaseScenario {
                id: "case-1".to_string(),
                title: "Acute Dyspnea in the ED".to_string(),
                category: "Asthma vs COPD".to_string(),
                description: "A challenging case of acute respiratory distress requiring rapid differentiation".to_string(),
                presentation: "45-year-old female presents with acute onset dyspnea, wheezing, and chest tightness. History of seasonal allergies. Non-smoker. Vitals: HR 110, RR 28, SpO₂ 91% on room air, BP 135/85. Exam shows diffuse wheezing, speaking in short sentences.".to_string(),
                questions: vec![
                    step(
                        1,
                        "What is your initial priority?",
                        [
                            "Order chest X-ray",
                            "Administer supplemental oxygen and bronchodilators",
                            "Obtain arterial blood gas",
                            "Start antibiotics",
                        ],
                        1,
                        "Initial stabilization with oxygen and bronchodilators is the priority in acute bronchospasm. ABCs come first.",
                        Some("Patient receives albuterol nebulizer and oxygen. SpO₂ improves to 94%. Peak flow is 60% of predicted."),
                    ),
                    step(
                        2,
                        "Based on peak flow 60% of predicted and current symptoms, what is the severity?",
                        [
                            "Mild exacerbation",
                            "Moderate exacerbation",
                            "Severe exacerbation",
                            "Life-threatening exacerbation",
                        ],
                        1,
                        "Peak flow 40-69% with moderate symptoms indicates moderate exacerbation. Requires aggressive treatment but not ICU-level care yet.",
                        Some("You diagnose moderate asthma exacerbation and initiate appropriate therapy."),
                    ),
                    step(
                        3,
                        "What additional treatment should be added?",
                        [
                            "NIPPV",
                            "Systemic corticosteroids",
                            "Intubation",
                            "Magnesium sulfate",
                        ],
                        1,
                        "Systemic corticosteroids are indicated for moderate to severe asthma exacerbations. They reduce inflammation and speed recovery.",
                        Some("Patient improves with treatment. Peak flow increases to 75%. She is ready for disposition planning."),
                    ),
                ],
            },
            CaseScenario {
                id: "case-2".to_string(),
                title: "Hypercapnic Respiratory Failure".to_string(),
                category: "COPD".to_string(),
                description: "Managing acute COPD exacerbation with respiratory acidosis".to_string(),
                presentation: "68-year-old male with COPD presents with worsening dyspnea over 3 days. Increased sputum production (yellow-green). Smoker 50 pack-years. Vitals: HR 105, RR 32, SpO₂ 85% on room air, BP 145/90. ABG: pH 7.28, PaCO₂ 68, PaO₂ 55, HCO₃ 28.".to_string(),
                questions: vec![
                    step(
                        1,
                        "What is the acid-base disturbance?",
                        [
                            "Metabolic acidosis",
                            "Respiratory alkalosis",
                            "Acute respiratory acidosis",
                            "Compensated respiratory acidosis",
                        ],
                        2,
                        "pH <7.35 with elevated PaCO₂ indicates respiratory acidosis. The normal HCO₃ suggests this is acute (no metabolic compensation yet).",
                        Some("You recognize acute hypercapnic respiratory failure. What is your oxygen target?"),
                    ),
                    step(
                        2,
                        "What is the appropriate oxygen saturation target?",
                        [
                            "SpO₂ 95-100%",
                            "SpO₂ 88-92%",
                            "SpO₂ 85-88%",
                            "No supplemental oxygen needed",
                        ],
                        1,
                        "In COPD patients with hypercapnia, target SpO₂ 88-92%. Excessive oxygen can worsen CO₂ retention by reducing hypoxic drive.",
                        Some("You titrate oxygen to SpO₂ 90%. Patient remains tachypneic with pH 7.28. Mental status is sleepy but arousable."),
                    ),
                    step(
                        3,
                        "What is the next best intervention?",
                        [
                            "Immediate intubation",
                            "Initiate NIPPV (BiPAP)",
                            "Increase oxygen to 100%",
                            "Observe and reassess in 2 hours",
                        ],
                        1,
                        "NIPPV is indicated for hypercapnic respiratory failure (pH <7.35, PaCO₂ >45) in patients who can protect their airway. This can prevent intubation.",
                        Some("NIPPV initiated with improvement in respiratory effort and ABG. Case resolved successfully!"),
                    ),
                ],
            },
            CaseScenario {
                id: "case-3".to_string(),
                title: "Febrile Pneumonia Decision".to_string(),
                category: "Pneumonia".to_string(),
                description: "Determining appropriate disposition for community-acquired pneumonia".to_string(),
                presentation: "72-year-old female with 4-day history of cough, fever (38.9°C), and dyspnea. No recent hospitalizations. Vitals: HR 95, RR 24, SpO₂ 93% on RA, BP 110/70. Chest X-ray shows right lower lobe infiltrate. Labs: WBC 14,000, BUN 22 mg/dL.".to_string(),
                questions: vec![
                    step(
                        1,
                        "Calculate the CURB-65 score: Age ≥65 (yes), Confusion (no), BUN >19 (yes), RR ≥30 (no), BP low (no)",
                        [
                            "CURB-65 = 1",
                            "CURB-65 = 2",
                            "CURB-65 = 3",
                            "CURB-65 = 4",
                        ],
                        1,
                        "Age ≥65 (1 point) + BUN >19 (1 point) = CURB-65 score of 2. This indicates moderate risk.",
                        Some("CURB-65 score is 2, suggesting moderate risk with ~9% 30-day mortality."),
                    ),
                    step(
                        2,
                        "What is the appropriate disposition?",
                        [
                            "Outpatient treatment with oral antibiotics",
                            "Admission to general medical floor",
                            "Direct ICU admission",
                            "Observation unit only",
                        ],
                        1,
                        "CURB-65 score of 2 warrants consideration for inpatient admission or closely monitored outpatient therapy. Given age and comorbidities, admission is reasonable.",
                        Some("Patient admitted to medical floor. What type of pneumonia is this?"),
                    ),
                    step(
                        3,
                        "How would you classify this pneumonia?",
                        [
                            "Hospital-Acquired Pneumonia (HAP)",
                            "Ventilator-Associated Pneumonia (VAP)",
                            "Community-Acquired Pneumonia (CAP)",
                            "Healthcare-Associated Pneumonia (HCAP)",
                        ],
                        2,
                        "Symptom onset before hospital admission with no recent healthcare exposure = Community-Acquired Pneumonia (CAP).",
                        Some("CAP diagnosis confirmed. Appropriate antibiotic therapy initiated. Case complete!"),
                    ),
                ],
            },
            CaseScenario {
                id: "case-4".to_string(),
                title: "Chest Pain and Dyspnea".to_string(),
                category: "Pulmonary Embolism".to_string(),
                description: "Working up a patient with suspected pulmonary embolism".to_string(),
                presentation: "52-year-old male presents with sudden onset right-sided chest pain and dyspnea. Recent 8-hour flight from Europe 2 days ago. Vitals: HR 115, RR 22, SpO₂ 94% on RA, BP 125/80. Exam shows tachycardia, clear lungs, no leg swelling.".to_string(),
                questions: vec![
                    step(
                        1,
                        "Should you calculate Wells score or PERC rule first?",
                        [
                            "Wells score - proceed directly",
                            "PERC rule - to potentially rule out PE",
                            "Skip both and order CTPA",
                            "Order D-dimer without risk stratification",
                        ],
                        0,
                        "With clear clinical suspicion (recent travel, acute symptoms), Wells score is more appropriate. PERC is for LOW suspicion cases only.",
                        Some("Wells Score: HR >100 (1.5), Recent surgery/immobilization - flight (1.5), No alternative diagnosis (3) = 6 points"),
                    ),
                    step(
                        2,
                        "Wells score is 6 (high probability). What is the next step?",
                        [
                            "D-dimer testing",
                            "V/Q scan",
                            "CTPA (CT pulmonary angiography)",
                            "Lower extremity ultrasound",
                        ],
                        2,
                        "High Wells score (>6) should proceed directly to CTPA. D-dimer is often elevated and would delay diagnosis without adding value.",
                        Some("CTPA shows large right-sided pulmonary embolism. Patient remains hemodynamically stable."),
                    ),
                    step(
                        3,
                        "How would you classify this PE?",
                        [
                            "Massive PE (requires thrombolysis)",
                            "Submassive PE",
                            "Low-risk PE",
                            "Chronic PE",
                        ],
                        2,
                        "Hemodynamically stable patient with large PE but no RV dysfunction signs = Low-risk PE. Start anticoagulation, no thrombolysis needed.",
                        Some("Anticoagulation initiated. Patient improving. Case resolved!"),
                    ),
                ],
            },
        ]
    });
    &CASES
}

pub fn get_case(id: &str) -> Option<&'static CaseScenario> {
    all_cases().iter().find(|c| c.id == id)
}

/// Progress through one case scenario.
///
/// Each step must be submitted before the case can advance to the next one;
/// there is no going back.
#[derive(Debug, Clone)]
pub struct CaseSession {
    case: &'static CaseScenario,
    step: usize,
    selected: Option<usize>,
    submitted: bool,
}

impl CaseSession {
    pub fn start(case_id: &str) -> Result<Self, ReferenceError> {
        let case = get_case(case_id).ok_or_else(|| ReferenceError::UnknownCase(case_id.to_string()))?;
        tracing::debug!(case = case_id, steps = case.questions.len(), "case started");
        Ok(Self {
            case,
            step: 0,
            selected: None,
            submitted: false,
        })
    }

    pub fn case(&self) -> &'static CaseScenario {
        self.case
    }

    pub fn current(&self) -> &'static CaseQuestion {
        &self.case.questions[self.step]
    }

    /// Zero-based index of the current step.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 == self.case.questions.len()
    }

    /// The last step has been answered.
    pub fn is_complete(&self) -> bool {
        self.is_last() && self.submitted
    }

    pub fn select(&mut self, option: usize) -> Result<(), ReferenceError> {
        if self.submitted {
            return Ok(());
        }
        let len = self.current().options.len();
        if option >= len {
            return Err(ReferenceError::OptionOutOfRange { index: option, len });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Reveal the explanation and the narrative that follows this step.
    pub fn submit(&mut self) -> Result<AnswerFeedback, ReferenceError> {
        let selected = self.selected.ok_or(ReferenceError::NoSelection)?;
        self.submitted = true;
        let feedback = self.current().feedback(selected);
        tracing::debug!(
            case = %self.case.id,
            step = self.step,
            correct = feedback.is_correct,
            "case step submitted"
        );
        Ok(feedback)
    }

    /// Move to the next step. Returns `false` when the case is already on
    /// its last step.
    pub fn advance(&mut self) -> Result<bool, ReferenceError> {
        if !self.submitted {
            return Err(ReferenceError::NotSubmitted);
        }
        if self.is_last() {
            return Ok(false);
        }
        self.step += 1;
        self.selected = None;
        self.submitted = false;
        Ok(true)
    }
}
