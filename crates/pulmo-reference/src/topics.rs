use pulmo_core::error::CoreError;
use pulmo_core::models::topic::{Section, Topic, TopicId};

use crate::error::ReferenceError;

fn section(title: &str, items: &[&str]) -> Section {
    Section {
        title: title.to_string(),
        items: items.iter().map(|i| i.to_string()).collect(),
    }
}

fn topic(
    id: TopicId,
    title: &str,
    description: &str,
    path: &str,
    sections: Vec<Section>,
    calculator_ids: &[&str],
) -> Topic {
    Topic {
        id,
        title: title.to_string(),
        description: description.to_string(),
        path: path.to_string(),
        sections,
        calculator_ids: calculator_ids.iter().map(|c| c.to_string()).collect(),
    }
}

/// The seven topic modules, in menu order.
pub fn all_topics() -> &'static [Topic] {
    static TOPICS: std::sync::LazyLock<Vec<Topic>> = std::sync::LazyLock::new(|| {
        vec![
            topic(
                TopicId::Asthma,
                "Asthma Exacerbation",
                "Learn to assess severity and manage acute asthma exacerbations",
                "/asthma",
                vec![
                    section(
                        "Pathophysiology",
                        &[
                            "Airway inflammation: Bronchial wall edema and mucus production",
                            "Bronchospasm: Smooth muscle constriction",
                            "Air trapping: Increased residual volume",
                            "V/Q mismatch: Leading to hypoxemia",
                        ],
                    ),
                    section(
                        "Red Flags - ICU Criteria",
                        &[
                            "Altered mental status or confusion",
                            "Silent chest (minimal air movement)",
                            "Inability to speak",
                            "Cyanosis",
                            "Peak flow <25% predicted",
                            "Bradycardia or hypotension",
                            "Respiratory acidosis (PaCO₂ >45 mmHg)",
                        ],
                    ),
                    section(
                        "Peak Flow Zones",
                        &[
                            "Green Zone (80-100% of personal best): Good control - continue maintenance therapy",
                            "Yellow Zone (60-80%): Moderate exacerbation - consider increasing treatment",
                            "Orange Zone (40-60%): Moderate to severe - requires immediate intervention",
                            "Red Zone (<40%): Severe exacerbation - emergency care needed",
                        ],
                    ),
                ],
                &["asthma", "peak_flow"],
            ),
            topic(
                TopicId::Copd,
                "COPD Exacerbation",
                "Master COPD exacerbation management including NIPPV initiation and hypercapnia recognition",
                "/copd",
                vec![
                    section(
                        "Common Exacerbation Triggers",
                        &[
                            "Respiratory infections: Viral or bacterial",
                            "Air pollution: Environmental irritants",
                            "Non-adherence: To maintenance medications",
                            "Weather changes: Cold air exposure",
                            "Comorbidities: Heart failure, PE, pneumonia",
                            "Unknown: ~30% of exacerbations",
                        ],
                    ),
                    section(
                        "Stepwise Acute Management (Educational)",
                        &[
                            "Oxygen Therapy: Controlled oxygen, target SpO₂ 88-92% (avoid excessive oxygen in hypercapnic patients)",
                            "Bronchodilator Therapy: Short-acting beta-2 agonists (SABA) and/or anticholinergics (educational concept)",
                            "Systemic Corticosteroids: Educational concept - reduces recovery time and improves outcomes",
                            "Antibiotics (If Indicated): Purulent sputum (increased volume + color change) or severe exacerbation",
                            "Ventilatory Support (If Needed): NIPPV for acute hypercapnic respiratory failure; intubation if NIPPV fails",
                        ],
                    ),
                    section(
                        "Indications for NIPPV",
                        &[
                            "Acute hypercapnic respiratory failure (pH <7.35, PaCO₂ >45)",
                            "Severe dyspnea with respiratory distress",
                            "Moderate to severe acidosis",
                            "Patient able to protect airway and cooperate",
                        ],
                    ),
                    section(
                        "Contraindications for NIPPV",
                        &[
                            "Altered mental status/inability to protect airway",
                            "Hemodynamic instability",
                            "Recent facial/upper airway surgery",
                            "Inability to clear secretions",
                            "Severe respiratory acidosis (pH <7.25)",
                        ],
                    ),
                    section(
                        "Hypercapnia: Clinical Signs",
                        &[
                            "Headache",
                            "Confusion, drowsiness (CO₂ narcosis)",
                            "Asterixis (flapping tremor)",
                            "Bounding pulse",
                            "Warm peripheries, flushed skin",
                        ],
                    ),
                ],
                &["copd", "gold"],
            ),
            topic(
                TopicId::Pneumonia,
                "Pneumonia",
                "CAP vs HAP vs VAP differentiation, severity assessment, and management pathways",
                "/pneumonia",
                vec![
                    section(
                        "Pneumonia Classification Overview",
                        &[
                            "CAP - Community-Acquired Pneumonia: Onset in the community or <48 hours after hospital admission",
                            "HAP - Hospital-Acquired Pneumonia: Onset ≥48 hours after hospital admission (non-ventilated patients)",
                            "VAP - Ventilator-Associated Pneumonia: Onset ≥48 hours after endotracheal intubation and mechanical ventilation",
                        ],
                    ),
                    section(
                        "Potential Complications",
                        &[
                            "Respiratory failure: Requiring oxygen or ventilatory support",
                            "Sepsis/septic shock: Systemic inflammatory response",
                            "Pleural effusion/empyema: Fluid collection in pleural space",
                            "Lung abscess: Necrotic lung parenchyma",
                            "ARDS: Acute respiratory distress syndrome",
                            "Multi-organ failure: In severe cases",
                        ],
                    ),
                ],
                &["pneumonia", "curb65"],
            ),
            topic(
                TopicId::Tuberculosis,
                "Tuberculosis (TB)",
                "Differentiate latent vs active TB, understand screening, and learn treatment algorithms",
                "/tuberculosis",
                vec![
                    section(
                        "Latent TB Infection (LTBI)",
                        &[
                            "Positive TB test (TST/IGRA)",
                            "No symptoms",
                            "Normal chest X-ray",
                            "Not contagious",
                            "~5-10% lifetime risk of progression to active TB",
                            "Treatment prevents activation (educational)",
                        ],
                    ),
                    section(
                        "Active TB Disease",
                        &[
                            "Positive TB test + symptoms/CXR findings",
                            "Patient is contagious (pulmonary TB)",
                            "Requires airborne isolation",
                            "Sputum AFB positive",
                            "Abnormal chest X-ray findings",
                            "Requires multi-drug therapy for 6-9 months",
                        ],
                    ),
                    section(
                        "TST Interpretation",
                        &[
                            "≥5mm: HIV+, close contacts, CXR findings",
                            "≥10mm: Recent immigrants, IVDU, healthcare workers",
                            "≥15mm: Low-risk individuals",
                        ],
                    ),
                    section(
                        "IGRA (Interferon-Gamma Release Assay)",
                        &[
                            "More specific than TST",
                            "Not affected by BCG vaccination",
                            "Single visit (vs 2 for TST)",
                            "Preferred in BCG-vaccinated populations",
                        ],
                    ),
                    section(
                        "Contact Tracing Principles (Educational)",
                        &[
                            "Identify close contacts (household, prolonged exposure)",
                            "Screen contacts with TST or IGRA",
                            "Obtain chest X-rays for symptomatic contacts",
                            "Treat LTBI in high-risk contacts",
                            "Monitor for symptom development",
                            "Public health notification for confirmed cases",
                        ],
                    ),
                ],
                &["tuberculosis"],
            ),
            topic(
                TopicId::PulmonaryEmbolism,
                "Pulmonary Embolism (PE)",
                "Master Wells score, PERC rule, imaging strategies, and hemodynamic classification",
                "/pulmonary-embolism",
                vec![
                    section(
                        "Pathophysiology",
                        &[
                            "Increased dead space: Ventilation without perfusion",
                            "Hypoxemia: V/Q mismatch and right-to-left shunting",
                            "Increased RV afterload: Pulmonary vascular obstruction",
                            "RV dysfunction: Can lead to hemodynamic collapse",
                        ],
                    ),
                    section(
                        "CTPA (CT Pulmonary Angiography)",
                        &[
                            "First-line imaging for most patients",
                            "Chest X-ray abnormalities present",
                            "Need to evaluate alternative diagnoses",
                            "Better sensitivity and specificity",
                        ],
                    ),
                    section(
                        "V/Q Scan (Ventilation-Perfusion)",
                        &[
                            "Renal insufficiency (avoid contrast)",
                            "Contrast allergy",
                            "Pregnancy (lower radiation)",
                            "Normal chest X-ray",
                        ],
                    ),
                    section(
                        "D-Dimer Strategy",
                        &[
                            "D-Dimer Negative: In low to moderate probability patients, PE effectively ruled out, no imaging needed",
                            "D-Dimer Positive: Non-specific. Proceed to imaging (CTPA or V/Q)",
                        ],
                    ),
                    section(
                        "Anticoagulation Basics (Educational)",
                        &[
                            "Low molecular weight heparin (educational)",
                            "Unfractionated heparin (for unstable patients)",
                            "Direct oral anticoagulants (DOACs) - educational concept",
                        ],
                    ),
                ],
                &["wells", "perc", "pe_risk"],
            ),
            topic(
                TopicId::Ards,
                "ARDS (Acute Respiratory Distress Syndrome)",
                "Berlin definition, severity classification, and lung-protective ventilation principles",
                "/ards",
                vec![
                    section(
                        "Berlin Definition of ARDS",
                        &[
                            "Timing: Within 1 week of known clinical insult or new/worsening respiratory symptoms",
                            "Chest Imaging: Bilateral opacities not fully explained by effusions, lobar/lung collapse, or nodules",
                            "Origin of Edema: Respiratory failure not fully explained by cardiac failure or fluid overload",
                            "Oxygenation: Mild 200-300 mmHg, Moderate 100-200 mmHg, Severe ≤100 mmHg (with PEEP ≥5)",
                        ],
                    ),
                    section(
                        "Common Causes of ARDS",
                        &[
                            "Direct: Pneumonia (most common)",
                            "Direct: Aspiration",
                            "Direct: Inhalational injury",
                            "Direct: Lung contusion",
                            "Direct: Near-drowning",
                            "Indirect: Sepsis (most common indirect cause)",
                            "Indirect: Severe trauma",
                            "Indirect: Pancreatitis",
                            "Indirect: Multiple transfusions (TRALI)",
                            "Indirect: Drug overdose",
                        ],
                    ),
                    section(
                        "Lung-Protective Ventilation Principles (Educational)",
                        &[
                            "Low tidal volume: 6 mL/kg predicted body weight (educational concept)",
                            "Plateau pressure <30 cm H₂O (educational concept)",
                            "PEEP optimization: enough PEEP to recruit alveoli, not too much to overdistend",
                            "FiO₂ titration: target SpO₂ 88-95% (educational target)",
                        ],
                    ),
                    section(
                        "Common Pitfalls in ARDS Management",
                        &[
                            "Using high tidal volumes: Increases VILI and mortality",
                            "Over-aggressive fluid resuscitation: Worsens pulmonary edema",
                            "Delayed prone positioning: Proning works best when started early in severe ARDS",
                            "Excessive oxygen: FiO₂ 1.0 not always necessary; use PEEP to recruit lung",
                            "Missing the underlying cause: Treat sepsis, drain empyema, etc.",
                            "Plateau pressure >30: Increases risk of barotrauma",
                        ],
                    ),
                ],
                &["ards"],
            ),
            topic(
                TopicId::Osa,
                "Obstructive Sleep Apnea (OSA)",
                "Understanding risk factors, STOP-BANG screening, and treatment principles",
                "/osa",
                vec![
                    section(
                        "Major Risk Factors",
                        &[
                            "Obesity: Most significant modifiable risk factor",
                            "Male gender: 2-3x higher prevalence",
                            "Age: Increases with age (peak 50-60 years)",
                            "Neck circumference: >17\" (men), >16\" (women)",
                            "Craniofacial abnormalities: Retrognathia, macroglossia",
                            "Family history: Genetic predisposition",
                        ],
                    ),
                    section(
                        "Clinical Presentation",
                        &[
                            "Loud snoring",
                            "Witnessed apneas",
                            "Gasping/choking episodes",
                            "Excessive daytime sleepiness",
                            "Morning headaches",
                            "Difficulty concentrating",
                        ],
                    ),
                    section(
                        "CPAP (Continuous Positive Airway Pressure)",
                        &[
                            "Provides pneumatic splint to keep airway open",
                            "Eliminates apneas and hypopneas",
                            "Improves oxygenation and sleep quality",
                            "Adherence critical for success (≥4 hours/night)",
                        ],
                    ),
                    section(
                        "When Sleep Studies Are Indicated",
                        &[
                            "High clinical suspicion or high STOP-BANG score (≥3)",
                            "Witnessed apneas or significant daytime sleepiness",
                            "Refractory hypertension",
                            "Atrial fibrillation (especially recurrent after cardioversion)",
                            "Prior to bariatric surgery",
                            "Professional drivers or safety-sensitive occupations",
                        ],
                    ),
                ],
                &["stop_bang", "ahi"],
            ),
        ]
    });
    &TOPICS
}

pub fn get_topic(id: TopicId) -> Option<&'static Topic> {
    all_topics().iter().find(|t| t.id == id)
}

/// Resolve a topic from user input such as `pulmonary-embolism` or `ARDS`.
pub fn find_topic(id: &str) -> Result<&'static Topic, ReferenceError> {
    let topic_id: TopicId = id.parse()?;
    get_topic(topic_id).ok_or_else(|| CoreError::UnknownTopic(id.to_string()).into())
}
