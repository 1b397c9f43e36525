//! Symptom-to-disease diagnostic scoring.
//!
//! Two entry points share the candidate model. `diagnose_from_text` scans a
//! narrative for a fixed vocabulary of known symptom phrases, each carrying
//! its own fixed probability. `diagnose_from_symptoms` scores an explicit
//! symptom list against the symptom sets of the catalogue's clinically
//! annotated records (share of submitted symptoms found, as a percentage).
//! Neither path claims certainty; rendered reports always carry the fixed
//! disclaimer.

use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;

/// Fixed disclaimer attached to every rendered report.
pub const DISCLAIMER: &str = "Este sistema não substitui avaliação médica profissional. \
Procure um médico para diagnóstico definitivo.";

pub const MAX_CANDIDATES: usize = 10;

const PLACEHOLDER_CONFIDENCE: f64 = 75.0;

// ═══════════════════════════════════════════
// Vocabulary
// ═══════════════════════════════════════════

/// One known symptom phrase with its associated condition.
///
/// Phrases are stored lowercase; the narrative scan is a case-insensitive
/// substring presence test per phrase, not word-boundary tokenization.
pub struct VocabularyEntry {
    pub phrase: &'static str,
    pub disease_name: &'static str,
    pub cid_code: &'static str,
    pub probability: f64,
}

const fn entry(
    phrase: &'static str,
    disease_name: &'static str,
    cid_code: &'static str,
    probability: f64,
) -> VocabularyEntry {
    VocabularyEntry { phrase, disease_name, cid_code, probability }
}

pub const DEFAULT_VOCABULARY: &[VocabularyEntry] = &[
    entry("febre", "Febre não especificada", "R50", 85.0),
    entry("dor de cabeça", "Cefaleia", "R51", 80.0),
    entry("tosse", "Pneumonia por organismo não especificado", "J18", 70.0),
    entry("dispneia", "Asma", "J45", 75.0),
    entry("falta de ar", "Asma", "J45", 75.0),
    entry("sibilos", "Asma", "J45", 70.0),
    entry("náusea", "Gastrite e duodenite", "K29", 60.0),
    entry("dor epigástrica", "Gastrite e duodenite", "K29", 70.0),
    entry("queimação", "Gastrite e duodenite", "K29", 60.0),
    entry("tristeza", "Episódios depressivos", "F32", 75.0),
    entry("anedonia", "Episódios depressivos", "F32", 80.0),
    entry("ansiedade", "Outros transtornos ansiosos", "F41", 75.0),
    entry("sede excessiva", "Diabetes mellitus não-insulino-dependente", "E11", 70.0),
    entry("poliúria", "Diabetes mellitus insulino-dependente", "E10", 75.0),
    entry("convulsões", "Epilepsia", "G40", 85.0),
    entry("tontura", "Hipertensão essencial", "I10", 60.0),
    entry("palpitações", "Hipertensão essencial", "I10", 65.0),
];

/// Qualitative label for a probability or confidence figure.
pub fn confidence_label(probability: f64) -> &'static str {
    if probability >= 80.0 {
        "Alta"
    } else if probability >= 60.0 {
        "Moderada"
    } else {
        "Baixa"
    }
}

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// Ranked candidate produced by either entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticCandidate {
    pub disease_name: String,
    pub cid_code: String,
    pub probability: f64,
    pub confidence_level: String,
    pub matching_symptoms: Vec<String>,
}

/// Per-symptom validation entry for the explicit-list path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomValidation {
    pub condition: String,
    pub confidence: f64,
    pub matching_symptoms: u32,
    pub total_symptoms: u32,
}

/// Outcome of the narrative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextDiagnosis {
    pub candidates: Vec<DiagnosticCandidate>,
    pub report: Option<String>,
}

/// Outcome of the explicit-list path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomDiagnosis {
    pub validation: Vec<SymptomValidation>,
    pub candidates: Vec<DiagnosticCandidate>,
    pub report: Option<String>,
}

// ═══════════════════════════════════════════
// Engine
// ═══════════════════════════════════════════

/// Turns symptom input into ranked disease candidates.
pub struct DiagnosticEngine {
    catalog: Arc<Catalog>,
    vocabulary: &'static [VocabularyEntry],
}

impl DiagnosticEngine {
    pub fn new(catalog: Arc<Catalog>, vocabulary: &'static [VocabularyEntry]) -> Self {
        Self { catalog, vocabulary }
    }

    /// Scans a natural-language symptom narrative for known phrases.
    ///
    /// Every vocabulary phrase present in the narrative contributes its
    /// fixed-probability candidate; phrases pointing at the same code merge
    /// into one candidate keeping the first entry's probability.
    pub fn diagnose_from_text(
        &self,
        report: &str,
        include_report: bool,
    ) -> Result<TextDiagnosis, CoreError> {
        if report.trim().is_empty() {
            return Err(CoreError::InvalidQuery);
        }
        let narrative = report.to_lowercase();

        let mut candidates: Vec<DiagnosticCandidate> = Vec::new();
        for entry in self.vocabulary {
            if !narrative.contains(entry.phrase) {
                continue;
            }
            match candidates.iter().position(|c| c.cid_code == entry.cid_code) {
                Some(idx) => candidates[idx].matching_symptoms.push(entry.phrase.to_string()),
                None => candidates.push(DiagnosticCandidate {
                    disease_name: entry.disease_name.to_string(),
                    cid_code: entry.cid_code.to_string(),
                    probability: entry.probability,
                    confidence_level: confidence_label(entry.probability).to_string(),
                    matching_symptoms: vec![entry.phrase.to_string()],
                }),
            }
        }
        tracing::debug!(found = candidates.len(), "narrative scan complete");

        let report = include_report.then(|| render_report(&candidates, None));
        Ok(TextDiagnosis { candidates, report })
    }

    /// Scores an explicit symptom list against the catalogue.
    ///
    /// Emits one validation entry per submitted symptom (placeholder
    /// behavior kept from the minimal service), then ranks the clinically
    /// annotated records by overlap: share of submitted symptoms found as
    /// substrings of the record's symptom set, as a percentage with two
    /// decimals. Zero-match records are excluded, ties keep catalogue
    /// order, and results truncate to the top ten.
    pub fn diagnose_from_symptoms(
        &self,
        symptoms: &[String],
        include_report: bool,
    ) -> Result<SymptomDiagnosis, CoreError> {
        if symptoms.is_empty() {
            return Err(CoreError::InvalidQuery);
        }

        let validation = symptoms
            .iter()
            .map(|symptom| SymptomValidation {
                condition: format!("Condição relacionada a {symptom}"),
                confidence: PLACEHOLDER_CONFIDENCE,
                matching_symptoms: 1,
                total_symptoms: 1,
            })
            .collect();

        let candidates = self.score_against_catalog(symptoms);
        let report = include_report.then(|| render_report(&candidates, Some(symptoms.len())));
        Ok(SymptomDiagnosis { validation, candidates, report })
    }

    fn score_against_catalog(&self, symptoms: &[String]) -> Vec<DiagnosticCandidate> {
        let submitted: Vec<String> = symptoms.iter().map(|s| s.trim().to_lowercase()).collect();

        let mut candidates = Vec::new();
        for record in &self.catalog.records {
            if record.symptoms.is_empty() {
                continue;
            }
            let matched: Vec<String> = submitted
                .iter()
                .filter(|symptom| {
                    record
                        .symptoms
                        .iter()
                        .any(|known| known.to_lowercase().contains(symptom.as_str()))
                })
                .cloned()
                .collect();
            if matched.is_empty() {
                continue;
            }
            let confidence = round2(matched.len() as f64 / submitted.len() as f64 * 100.0);
            candidates.push(DiagnosticCandidate {
                disease_name: record.name.clone(),
                cid_code: record.code.clone(),
                probability: confidence,
                confidence_level: confidence_label(confidence).to_string(),
                matching_symptoms: matched,
            });
        }

        candidates.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        candidates.truncate(MAX_CANDIDATES);
        candidates
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders the human-readable Portuguese summary.
fn render_report(candidates: &[DiagnosticCandidate], symptom_count: Option<usize>) -> String {
    let mut report = format!("Relatório gerado em {}.\n", Local::now().format("%d/%m/%Y"));
    match symptom_count {
        Some(count) => report.push_str(&format!(
            "Análise baseada em {count} sintomas selecionados. Recomenda-se avaliação médica.\n"
        )),
        None => report.push_str(
            "Baseado nos sintomas relatados, recomenda-se consulta médica para avaliação adequada.\n",
        ),
    }
    if candidates.is_empty() {
        report.push_str("Nenhuma condição conhecida foi identificada.\n");
    } else {
        for candidate in candidates {
            report.push_str(&format!(
                "- {} ({}): {:.2}% ({})\n",
                candidate.disease_name,
                candidate.cid_code,
                candidate.probability,
                candidate.confidence_level
            ));
        }
    }
    report.push_str(DISCLAIMER);
    report
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_records, Catalog};

    fn test_engine() -> DiagnosticEngine {
        let catalog = Arc::new(Catalog::assemble(default_records(), false));
        DiagnosticEngine::new(catalog, DEFAULT_VOCABULARY)
    }

    fn symptoms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ───────────────────────────────────────
    // narrative path
    // ───────────────────────────────────────

    #[test]
    fn blank_narrative_is_rejected() {
        let err = test_engine().diagnose_from_text("  \n ", false).unwrap_err();
        assert_eq!(err, CoreError::InvalidQuery);
    }

    #[test]
    fn fever_narrative_yields_fixed_candidate() {
        let outcome = test_engine()
            .diagnose_from_text("Estou com febre alta há dois dias", false)
            .unwrap();
        let fever = outcome.candidates.iter().find(|c| c.cid_code == "R50").unwrap();
        assert_eq!(fever.probability, 85.0);
        assert_eq!(fever.confidence_level, "Alta");
        assert_eq!(fever.matching_symptoms, vec!["febre"]);
    }

    #[test]
    fn narrative_scan_is_case_insensitive() {
        let outcome = test_engine()
            .diagnose_from_text("FEBRE e DOR DE CABEÇA", false)
            .unwrap();
        let codes: Vec<_> = outcome.candidates.iter().map(|c| c.cid_code.as_str()).collect();
        assert_eq!(codes, vec!["R50", "R51"]);
    }

    #[test]
    fn phrases_for_same_code_merge_into_one_candidate() {
        let outcome = test_engine()
            .diagnose_from_text("sinto falta de ar e dispneia ao deitar", false)
            .unwrap();
        let asthma: Vec<_> = outcome
            .candidates
            .iter()
            .filter(|c| c.cid_code == "J45")
            .collect();
        assert_eq!(asthma.len(), 1);
        assert_eq!(asthma[0].matching_symptoms.len(), 2);
    }

    #[test]
    fn unknown_narrative_yields_no_candidates() {
        let outcome = test_engine()
            .diagnose_from_text("sem queixas relevantes", false)
            .unwrap();
        assert!(outcome.candidates.is_empty());
    }

    #[test]
    fn narrative_report_is_gated() {
        let engine = test_engine();
        let without = engine.diagnose_from_text("febre", false).unwrap();
        assert!(without.report.is_none());

        let with = engine.diagnose_from_text("febre", true).unwrap();
        let report = with.report.unwrap();
        assert!(report.contains("consulta médica"));
        assert!(report.contains(DISCLAIMER));
    }

    // ───────────────────────────────────────
    // explicit-list path
    // ───────────────────────────────────────

    #[test]
    fn empty_symptom_list_is_rejected() {
        let err = test_engine().diagnose_from_symptoms(&[], false).unwrap_err();
        assert_eq!(err, CoreError::InvalidQuery);
    }

    #[test]
    fn each_symptom_gets_a_validation_entry() {
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["febre", "tosse"]), false)
            .unwrap();
        assert_eq!(outcome.validation.len(), 2);
        assert_eq!(outcome.validation[0].condition, "Condição relacionada a febre");
        assert_eq!(outcome.validation[0].confidence, 75.0);
    }

    #[test]
    fn full_overlap_scores_exactly_one_hundred() {
        // J18 carries both "tosse" and "febre" in its symptom set.
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["tosse", "febre"]), false)
            .unwrap();
        let pneumonia = outcome.candidates.iter().find(|c| c.cid_code == "J18").unwrap();
        assert_eq!(pneumonia.probability, 100.0);
        assert_eq!(pneumonia.matching_symptoms.len(), 2);
    }

    #[test]
    fn partial_overlap_rounds_to_two_decimals() {
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["tosse", "febre", "inexistente"]), false)
            .unwrap();
        let pneumonia = outcome.candidates.iter().find(|c| c.cid_code == "J18").unwrap();
        assert_eq!(pneumonia.probability, 66.67);
    }

    #[test]
    fn submitted_symptom_matches_as_substring() {
        // "sede" is a substring of E11's "sede excessiva".
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["sede"]), false)
            .unwrap();
        let diabetes = outcome.candidates.iter().find(|c| c.cid_code == "E11").unwrap();
        assert_eq!(diabetes.probability, 100.0);
    }

    #[test]
    fn zero_match_candidates_are_excluded() {
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["sintoma inexistente"]), false)
            .unwrap();
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.validation.len(), 1);
    }

    #[test]
    fn candidates_sort_descending_with_stable_ties() {
        // "tosse" fully matches J18 and J45; catalogue order puts J18 first.
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["tosse"]), false)
            .unwrap();
        let codes: Vec<_> = outcome.candidates.iter().map(|c| c.cid_code.as_str()).collect();
        assert_eq!(codes, vec!["J18", "J45"]);
    }

    #[test]
    fn list_report_counts_symptoms() {
        let outcome = test_engine()
            .diagnose_from_symptoms(&symptoms(&["febre", "tosse"]), true)
            .unwrap();
        let report = outcome.report.unwrap();
        assert!(report.contains("2 sintomas selecionados"));
        assert!(report.contains(DISCLAIMER));
    }

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(confidence_label(85.0), "Alta");
        assert_eq!(confidence_label(80.0), "Alta");
        assert_eq!(confidence_label(66.67), "Moderada");
        assert_eq!(confidence_label(33.33), "Baixa");
    }
}
