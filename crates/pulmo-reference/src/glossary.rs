use std::collections::BTreeSet;

use pulmo_core::models::glossary::GlossaryTerm;

/// Matches every category when passed as the filter.
pub const ALL_CATEGORIES: &str = "All";

/// (term, category, definition)
const TERMS: [(&str, &str, &str); 39] = [
    (
        "ABG (Arterial Blood Gas)",
        "Diagnostics",
        "Laboratory test measuring arterial blood pH, PaCO₂, PaO₂, and bicarbonate. Essential for assessing respiratory and metabolic status.",
    ),
    (
        "AHI (Apnea-Hypopnea Index)",
        "OSA",
        "Number of apnea and hypopnea events per hour of sleep. Used to classify OSA severity: Mild (5-15), Moderate (15-30), Severe (>30).",
    ),
    (
        "ARDS (Acute Respiratory Distress Syndrome)",
        "Critical Care",
        "Acute inflammatory lung injury causing bilateral infiltrates and severe hypoxemia. Defined by Berlin criteria with PaO₂/FiO₂ ratio <300.",
    ),
    (
        "Barotrauma",
        "Ventilation",
        "Lung injury from excessive airway pressure during mechanical ventilation. Prevented by limiting plateau pressure <30 cm H₂O.",
    ),
    (
        "Berlin Criteria",
        "ARDS",
        "Diagnostic criteria for ARDS including timing, bilateral opacities, PaO₂/FiO₂ ratio, and ruling out cardiogenic edema.",
    ),
    (
        "Bronchodilator",
        "Pharmacology",
        "Medication that relaxes bronchial smooth muscle. Includes beta-2 agonists (albuterol) and anticholinergics (ipratropium).",
    ),
    (
        "CAP (Community-Acquired Pneumonia)",
        "Pneumonia",
        "Pneumonia acquired outside hospital settings or <48 hours after admission. Common pathogens include S. pneumoniae and atypicals.",
    ),
    (
        "CPAP (Continuous Positive Airway Pressure)",
        "OSA",
        "First-line treatment for moderate-severe OSA. Provides continuous positive pressure to keep upper airway open during sleep.",
    ),
    (
        "CTPA (CT Pulmonary Angiography)",
        "Imaging",
        "Gold standard imaging for pulmonary embolism. Contrast-enhanced CT visualizing pulmonary arteries.",
    ),
    (
        "CURB-65",
        "Pneumonia",
        "Pneumonia severity score: Confusion, Urea, Respiratory rate, Blood pressure, age ≥65. Guides admission decisions.",
    ),
    (
        "D-dimer",
        "Lab Tests",
        "Fibrin degradation product. High sensitivity but low specificity for PE. Used in low-moderate probability patients.",
    ),
    (
        "FEV₁",
        "Pulmonary Function",
        "Forced Expiratory Volume in 1 second. Primary measure of airflow obstruction in COPD and asthma.",
    ),
    (
        "FiO₂",
        "Ventilation",
        "Fraction of Inspired Oxygen. Expressed as decimal (0.21-1.0) or percentage (21-100%).",
    ),
    (
        "GOLD Classification",
        "COPD",
        "Global Initiative for Chronic Obstructive Lung Disease. Classifies COPD severity by FEV₁: 1 (≥80%), 2 (50-80%), 3 (30-50%), 4 (<30%).",
    ),
    (
        "HAP (Hospital-Acquired Pneumonia)",
        "Pneumonia",
        "Pneumonia developing ≥48 hours after hospital admission. Higher antibiotic resistance risk than CAP.",
    ),
    (
        "Hypercapnia",
        "Physiology",
        "Elevated PaCO₂ >45 mmHg. Can cause respiratory acidosis. Common in COPD exacerbations.",
    ),
    (
        "IGRA (Interferon-Gamma Release Assay)",
        "Tuberculosis",
        "Blood test for TB infection (QuantiFERON, T-SPOT). More specific than TST, unaffected by BCG vaccination.",
    ),
    (
        "Latent TB Infection (LTBI)",
        "Tuberculosis",
        "Positive TB test without symptoms or active disease. Not contagious. Treated to prevent progression to active TB.",
    ),
    (
        "Lung-Protective Ventilation",
        "ARDS",
        "Low tidal volume (6 mL/kg PBW), plateau pressure <30 cm H₂O, appropriate PEEP. Reduces VILI in ARDS.",
    ),
    (
        "NIPPV (Non-Invasive Positive Pressure Ventilation)",
        "Ventilation",
        "Ventilatory support via face mask (BiPAP). Used in COPD hypercapnic respiratory failure, cardiogenic pulmonary edema.",
    ),
    (
        "PaCO₂",
        "Lab Values",
        "Partial pressure of carbon dioxide in arterial blood. Normal: 35-45 mmHg. Elevated in hypoventilation.",
    ),
    (
        "PaO₂",
        "Lab Values",
        "Partial pressure of oxygen in arterial blood. Normal: 80-100 mmHg. Low in hypoxemia.",
    ),
    (
        "PaO₂/FiO₂ Ratio",
        "ARDS",
        "P/F ratio. Measure of oxygenation. Normal >400. ARDS: <300 (mild), <200 (moderate), <100 (severe).",
    ),
    (
        "Peak Flow",
        "Asthma",
        "Maximum speed of expiration. Used to assess asthma severity. Expressed as % of personal best or predicted.",
    ),
    (
        "PEEP (Positive End-Expiratory Pressure)",
        "Ventilation",
        "Pressure maintained in airways at end of expiration. Prevents atelectasis, improves oxygenation in ARDS.",
    ),
    (
        "PERC Rule",
        "Pulmonary Embolism",
        "Pulmonary Embolism Rule-out Criteria. 8 criteria; if all absent in low-risk patients, PE can be ruled out.",
    ),
    (
        "Permissive Hypercapnia",
        "Ventilation",
        "Tolerating elevated PaCO₂ to achieve lung-protective ventilation in ARDS. pH >7.2 generally acceptable.",
    ),
    (
        "Prone Positioning",
        "ARDS",
        "Turning patient face-down. Improves V/Q matching and oxygenation in severe ARDS. Mortality benefit when PaO₂/FiO₂ <150.",
    ),
    (
        "RIPE Therapy",
        "Tuberculosis",
        "First-line active TB treatment: Rifampin, Isoniazid, Pyrazinamide, Ethambutol. Intensive phase 2 months, then continuation phase.",
    ),
    (
        "SABA (Short-Acting Beta-2 Agonist)",
        "Pharmacology",
        "Bronchodilator for acute asthma/COPD (albuterol, levalbuterol). Rapid onset, used for rescue therapy.",
    ),
    (
        "SpO₂",
        "Vital Signs",
        "Oxygen saturation by pulse oximetry. Normal >95%. Target 88-92% in COPD with chronic hypercapnia.",
    ),
    (
        "STOP-BANG",
        "OSA",
        "OSA screening: Snoring, Tired, Observed apnea, Pressure (HTN), BMI>35, Age>50, Neck circumference, Gender (male). Score ≥5 = high risk.",
    ),
    (
        "TST (Tuberculin Skin Test)",
        "Tuberculosis",
        "PPD test. Intradermal TB antigen. Read at 48-72h. Interpretation depends on induration size and risk factors.",
    ),
    (
        "V/Q Mismatch",
        "Physiology",
        "Imbalance between ventilation and perfusion. Causes hypoxemia. Seen in PE, pneumonia, ARDS.",
    ),
    (
        "V/Q Scan",
        "Imaging",
        "Ventilation-perfusion scintigraphy. Alternative to CTPA for PE diagnosis. Preferred when contrast contraindicated.",
    ),
    (
        "VAP (Ventilator-Associated Pneumonia)",
        "Pneumonia",
        "Pneumonia developing ≥48h after intubation. Highest antibiotic resistance risk. Pathogens: Pseudomonas, MRSA, Acinetobacter.",
    ),
    (
        "VILI (Ventilator-Induced Lung Injury)",
        "Critical Care",
        "Lung damage from mechanical ventilation. Includes volutrauma, barotrauma, atelectrauma. Prevented by lung-protective strategies.",
    ),
    (
        "Volutrauma",
        "Ventilation",
        "Lung injury from overdistension due to excessive tidal volumes. Prevented by low tidal volume ventilation (6 mL/kg).",
    ),
    (
        "Wells Score",
        "Pulmonary Embolism",
        "Pre-test probability score for PE. <2 = low, 2-6 = moderate, >6 = high. Guides D-dimer vs imaging decisions.",
    ),
];

/// Every glossary entry, in table order.
pub fn all_terms() -> &'static [GlossaryTerm] {
    static TABLE: std::sync::LazyLock<Vec<GlossaryTerm>> = std::sync::LazyLock::new(|| {
        TERMS
            .iter()
            .map(|(term, category, definition)| GlossaryTerm {
                term: term.to_string(),
                category: category.to_string(),
                definition: definition.to_string(),
            })
            .collect()
    });
    &TABLE
}

/// Distinct categories, sorted.
pub fn categories() -> Vec<&'static str> {
    TERMS
        .iter()
        .map(|(_, category, _)| *category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Case-insensitive substring search over term and definition, optionally
/// restricted to one category. An empty query matches everything. Results
/// are ordered by term, ignoring case.
pub fn search(query: &str, category: Option<&str>) -> Vec<&'static GlossaryTerm> {
    let needle = query.trim().to_lowercase();
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));

    let mut hits: Vec<&GlossaryTerm> = all_terms()
        .iter()
        .filter(|t| {
            t.term.to_lowercase().contains(&needle) || t.definition.to_lowercase().contains(&needle)
        })
        .filter(|t| category.is_none_or(|c| t.category.eq_ignore_ascii_case(c)))
        .collect();

    hits.sort_by_cached_key(|t| t.term.to_lowercase());
    tracing::debug!(query, ?category, hits = hits.len(), "glossary search");
    hits
}
