//! Pairwise drug-interaction checking.
//!
//! Every unordered pair of the submitted drug list is looked up in a static
//! knowledge base with case-insensitive identity. Unknown pairs contribute
//! nothing; absence of data is not an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ═══════════════════════════════════════════
// Severity scale
// ═══════════════════════════════════════════

/// Interaction severity, ordered from none to severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "Nenhuma")]
    None,
    #[serde(rename = "Leve")]
    Mild,
    #[serde(rename = "Moderada")]
    Moderate,
    #[serde(rename = "Grave")]
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "Nenhuma",
            Severity::Mild => "Leve",
            Severity::Moderate => "Moderada",
            Severity::Severe => "Grave",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════
// Knowledge base
// ═══════════════════════════════════════════

/// One known interacting pair. Drug names are stored lowercase.
pub struct KnownInteraction {
    pub pair: (&'static str, &'static str),
    pub severity: Severity,
    pub mechanism: &'static str,
    pub clinical_effects: &'static [&'static str],
}

const fn known(
    pair: (&'static str, &'static str),
    severity: Severity,
    mechanism: &'static str,
    clinical_effects: &'static [&'static str],
) -> KnownInteraction {
    KnownInteraction { pair, severity, mechanism, clinical_effects }
}

pub const DEFAULT_INTERACTIONS: &[KnownInteraction] = &[
    known(
        ("warfarina", "aspirina"),
        Severity::Severe,
        "Inibição aditiva da agregação plaquetária e da síntese de fatores de coagulação",
        &["Risco aumentado de sangramento", "Hemorragia gastrointestinal"],
    ),
    known(
        ("warfarina", "fluconazol"),
        Severity::Severe,
        "Inibição do metabolismo hepático da warfarina",
        &["Elevação do INR", "Risco de hemorragia"],
    ),
    known(
        ("fluoxetina", "tramadol"),
        Severity::Severe,
        "Efeito serotoninérgico aditivo",
        &["Síndrome serotoninérgica", "Agitação", "Hipertermia"],
    ),
    known(
        ("enalapril", "espironolactona"),
        Severity::Moderate,
        "Retenção aditiva de potássio",
        &["Hipercalemia", "Arritmias em casos graves"],
    ),
    known(
        ("sinvastatina", "amiodarona"),
        Severity::Moderate,
        "Inibição do metabolismo da sinvastatina",
        &["Risco aumentado de miopatia", "Rabdomiólise em casos raros"],
    ),
    known(
        ("omeprazol", "clopidogrel"),
        Severity::Moderate,
        "Redução da ativação do clopidogrel",
        &["Menor efeito antiagregante"],
    ),
    known(
        ("digoxina", "verapamil"),
        Severity::Moderate,
        "Redução da depuração renal da digoxina",
        &["Toxicidade digitálica", "Bradicardia"],
    ),
    known(
        ("captopril", "ibuprofeno"),
        Severity::Moderate,
        "Antagonismo do efeito anti-hipertensivo por inibição de prostaglandinas",
        &["Redução do controle pressórico", "Piora da função renal"],
    ),
    known(
        ("metformina", "cimetidina"),
        Severity::Mild,
        "Competição pela secreção tubular renal",
        &["Pequena elevação dos níveis de metformina", "Monitoramento recomendado"],
    ),
    known(
        ("amoxicilina", "metotrexato"),
        Severity::Moderate,
        "Redução da excreção renal do metotrexato",
        &["Toxicidade do metotrexato"],
    ),
];

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// One interaction found between two submitted drugs, reported with the
/// names as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub drug1: String,
    pub drug2: String,
    pub severity: Severity,
    pub mechanism: String,
    pub clinical_effects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSummary {
    pub total_interactions: usize,
    pub highest_severity: String,
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionCheck {
    pub summary: InteractionSummary,
    pub detailed_report: Option<String>,
}

// ═══════════════════════════════════════════
// Checker
// ═══════════════════════════════════════════

/// Evaluates all unordered drug pairs against the knowledge base.
pub struct InteractionChecker {
    known: &'static [KnownInteraction],
}

impl InteractionChecker {
    pub fn new(known: &'static [KnownInteraction]) -> Self {
        Self { known }
    }

    /// Checks every unordered pair of the submitted list.
    ///
    /// Fails with `InsufficientInput` below two drugs. The summary's
    /// highest severity is the maximum over the found interactions,
    /// `"Nenhuma"` when none were found.
    pub fn check(
        &self,
        drugs: &[String],
        include_report: bool,
    ) -> Result<InteractionCheck, CoreError> {
        if drugs.len() < 2 {
            return Err(CoreError::InsufficientInput { required: 2, got: drugs.len() });
        }

        let mut interactions = Vec::new();
        for (i, first) in drugs.iter().enumerate() {
            for second in &drugs[i + 1..] {
                if let Some(found) = self.lookup(first, second) {
                    interactions.push(Interaction {
                        drug1: first.clone(),
                        drug2: second.clone(),
                        severity: found.severity,
                        mechanism: found.mechanism.to_string(),
                        clinical_effects: found
                            .clinical_effects
                            .iter()
                            .map(|e| e.to_string())
                            .collect(),
                    });
                }
            }
        }

        let highest = interactions
            .iter()
            .map(|interaction| interaction.severity)
            .max()
            .unwrap_or(Severity::None);
        tracing::debug!(
            drugs = drugs.len(),
            found = interactions.len(),
            highest = %highest,
            "interaction check complete"
        );

        let detailed_report = include_report.then(|| {
            format!(
                "Análise de {} medicamentos. {} interações encontradas.",
                drugs.len(),
                interactions.len()
            )
        });

        Ok(InteractionCheck {
            summary: InteractionSummary {
                total_interactions: interactions.len(),
                highest_severity: highest.as_str().to_string(),
                interactions,
            },
            detailed_report,
        })
    }

    fn lookup(&self, first: &str, second: &str) -> Option<&KnownInteraction> {
        let first = first.trim().to_lowercase();
        let second = second.trim().to_lowercase();
        self.known.iter().find(|known| {
            (known.pair.0 == first && known.pair.1 == second)
                || (known.pair.0 == second && known.pair.1 == first)
        })
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
