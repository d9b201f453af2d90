use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pulmo_core::models::question::{AnswerFeedback, Question};

use crate::error::ReferenceError;

fn question<const N: usize>(
    id: u32,
    category: &str,
    text: &str,
    options: [&str; N],
    correct_answer: usize,
    explanation: &str,
) -> Question {
    Question {
        id,
        category: category.to_string(),
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: explanation.to_string(),
    }
}

/// The self-assessment question bank, in presentation order.
pub fn questions() -> &'static [Question] {
    static BANK: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
        vec![
            question(
                1,
                "Asthma",
                "A 25-year-old with known asthma presents with peak flow 35% of predicted, speaking in words only, and using accessory muscles. What is the severity?",
                [
                    "Mild exacerbation",
                    "Moderate exacerbation",
                    "Severe exacerbation",
                    "Life-threatening exacerbation",
                ],
                2,
                "Peak flow <40% with inability to speak in sentences and accessory muscle use indicates severe exacerbation requiring aggressive treatment.",
            ),
            question(
                2,
                "COPD",
                "What is the appropriate oxygen saturation target in a COPD patient with chronic hypercapnia?",
                [
                    "SpO₂ 95-100%",
                    "SpO₂ 88-92%",
                    "SpO₂ 85-88%",
                    "No supplemental oxygen",
                ],
                1,
                "Target SpO₂ 88-92% in COPD with chronic hypercapnia to avoid worsening CO₂ retention from suppressed hypoxic drive.",
            ),
            question(
                3,
                "COPD",
                "Which finding suggests severe COPD exacerbation requiring possible NIPPV?",
                [
                    "pH 7.38, PaCO₂ 42",
                    "pH 7.28, PaCO₂ 68",
                    "pH 7.45, PaCO₂ 35",
                    "pH 7.35, PaCO₂ 40",
                ],
                1,
                "pH <7.35 with elevated PaCO₂ indicates acute hypercapnic respiratory failure, which may benefit from NIPPV if patient can protect airway.",
            ),
            question(
                4,
                "Pneumonia",
                "A patient develops pneumonia 72 hours after hospital admission. How is this classified?",
                [
                    "Community-Acquired Pneumonia (CAP)",
                    "Hospital-Acquired Pneumonia (HAP)",
                    "Ventilator-Associated Pneumonia (VAP)",
                    "Aspiration pneumonia",
                ],
                1,
                "Pneumonia developing ≥48 hours after hospital admission (in non-ventilated patients) is classified as Hospital-Acquired Pneumonia (HAP).",
            ),
            question(
                5,
                "Pneumonia",
                "CURB-65 score of 3 indicates what action?",
                [
                    "Outpatient treatment",
                    "Observation unit",
                    "Hospital admission, consider ICU",
                    "ICU admission required",
                ],
                2,
                "CURB-65 ≥3 indicates high mortality risk (15-40%) and warrants hospital admission with consideration for ICU, especially if score ≥4.",
            ),
            question(
                6,
                "Tuberculosis",
                "Which finding differentiates active TB from latent TB?",
                [
                    "Positive PPD test alone",
                    "Positive QuantiFERON test alone",
                    "Cavitary lesions on chest X-ray with cough",
                    "Exposure to TB patient",
                ],
                2,
                "Active TB requires clinical symptoms (cough, fever) AND abnormal chest imaging. Positive test alone without symptoms/CXR findings = latent TB.",
            ),
            question(
                7,
                "Tuberculosis",
                "A patient has positive QuantiFERON, no symptoms, and normal chest X-ray. What is the diagnosis?",
                [
                    "Active pulmonary TB",
                    "Latent TB infection (LTBI)",
                    "Extrapulmonary TB",
                    "False positive test",
                ],
                1,
                "Positive TB test + no symptoms + normal CXR = Latent TB Infection (LTBI). Patient is not contagious but has infection requiring treatment to prevent activation.",
            ),
            question(
                8,
                "Pulmonary Embolism",
                "A patient with Wells score of 7 (high probability) for PE should undergo:",
                [
                    "D-dimer testing first",
                    "PERC rule application",
                    "Direct CTPA imaging",
                    "Lower extremity ultrasound only",
                ],
                2,
                "High Wells score (>6) should proceed directly to CTPA. D-dimer is often elevated in high-risk patients and would only delay diagnosis without adding value.",
            ),
            question(
                9,
                "Pulmonary Embolism",
                "PERC rule is most appropriate in which scenario?",
                [
                    "High clinical suspicion for PE",
                    "Low clinical suspicion, to potentially rule out PE",
                    "After positive D-dimer",
                    "In all patients with chest pain",
                ],
                1,
                "PERC rule is designed for LOW clinical suspicion cases. If all 8 PERC criteria are absent (PERC negative), PE can be ruled out without further testing.",
            ),
            question(
                10,
                "ARDS",
                "A patient has bilateral infiltrates on CXR, PaO₂/FiO₂ ratio of 150, and symptoms started 3 days after aspiration. What is the ARDS severity?",
                [
                    "Not ARDS",
                    "Mild ARDS",
                    "Moderate ARDS",
                    "Severe ARDS",
                ],
                2,
                "PaO₂/FiO₂ ratio 100-200 = Moderate ARDS. Berlin criteria met: timing <1 week, bilateral opacities, hypoxemia.",
            ),
            question(
                11,
                "ARDS",
                "What is the target tidal volume in lung-protective ventilation for ARDS?",
                [
                    "10-12 mL/kg predicted body weight",
                    "8-10 mL/kg predicted body weight",
                    "6 mL/kg predicted body weight",
                    "4 mL/kg predicted body weight",
                ],
                2,
                "Lung-protective ventilation targets 6 mL/kg predicted body weight to minimize volutrauma and ventilator-induced lung injury (VILI).",
            ),
            question(
                12,
                "ARDS",
                "Prone positioning is indicated in ARDS when:",
                [
                    "All ARDS patients",
                    "Mild ARDS (PaO₂/FiO₂ 200-300)",
                    "Severe ARDS (PaO₂/FiO₂ <150)",
                    "Only after ECMO fails",
                ],
                2,
                "Prone positioning shows mortality benefit in severe ARDS (PaO₂/FiO₂ <150) despite lung-protective ventilation. Start early for best results.",
            ),
            question(
                13,
                "OSA",
                "A patient has STOP-BANG score of 6. What is the risk level?",
                [
                    "Low risk",
                    "Intermediate risk",
                    "High risk",
                    "No OSA",
                ],
                2,
                "STOP-BANG ≥5 indicates high risk of moderate to severe OSA. Sleep study strongly recommended.",
            ),
            question(
                14,
                "OSA",
                "What is the most common cardiovascular complication of untreated OSA?",
                [
                    "Myocardial infarction",
                    "Hypertension",
                    "Atrial fibrillation",
                    "Stroke",
                ],
                1,
                "Hypertension is the most common cardiovascular complication of OSA, affecting up to 50% of patients with OSA. OSA contributes to resistant hypertension.",
            ),
            question(
                15,
                "General",
                "Which condition is LEAST likely to benefit from NIPPV?",
                [
                    "COPD with hypercapnic respiratory failure",
                    "Cardiogenic pulmonary edema",
                    "Severe asthma exacerbation",
                    "Obesity hypoventilation syndrome",
                ],
                2,
                "NIPPV is typically NOT indicated in severe asthma exacerbation and may be harmful. Asthma management focuses on bronchodilators, steroids, and oxygen. NIPPV is beneficial in COPD, CHF, and OHS.",
            ),
        ]
    });
    &BANK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

/// Walks the question bank one question at a time.
///
/// A question is answered by selecting an option and then submitting it.
/// Once submitted the selection is frozen until the learner moves to another
/// question, which clears it. The set of answered questions survives
/// navigation and is only cleared by [`QuizSession::reset`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: &'static [Question],
    index: usize,
    selected: Option<usize>,
    submitted: bool,
    answered: BTreeSet<usize>,
    correct: BTreeSet<usize>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            questions: questions(),
            index: 0,
            selected: None,
            submitted: false,
            answered: BTreeSet::new(),
            correct: BTreeSet::new(),
        }
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    /// Zero-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    /// Choose an option. Has no effect once the answer is submitted.
    pub fn select(&mut self, option: usize) -> Result<(), ReferenceError> {
        if self.submitted {
            tracing::debug!(question = self.current().id, option, "selection ignored after submit");
            return Ok(());
        }
        let len = self.current().options.len();
        if option >= len {
            return Err(ReferenceError::OptionOutOfRange { index: option, len });
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Lock in the selected option and reveal the explanation.
    pub fn submit(&mut self) -> Result<AnswerFeedback, ReferenceError> {
        let selected = self.selected.ok_or(ReferenceError::NoSelection)?;
        let feedback = self.current().feedback(selected);

        self.submitted = true;
        self.answered.insert(self.index);
        if feedback.is_correct {
            self.correct.insert(self.index);
        } else {
            self.correct.remove(&self.index);
        }

        tracing::debug!(
            question = self.current().id,
            selected,
            correct = feedback.is_correct,
            "quiz answer submitted"
        );
        Ok(feedback)
    }

    /// Move forward. Returns `false` when already on the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.clear_answer();
        true
    }

    /// Move back. Returns `false` when already on the first question.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.clear_answer();
        true
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.clear_answer();
        self.answered.clear();
        self.correct.clear();
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered.len(),
            total: self.questions.len(),
        }
    }

    /// Questions whose latest submitted answer was right.
    pub fn score(&self) -> usize {
        self.correct.len()
    }

    fn clear_answer(&mut self) {
        self.selected = None;
        self.submitted = false;
    }
}
