//! CID-10 chapter metadata and symptom reference categories.
//!
//! Chapters group codes by leading letter. Metadata is static reference
//! data; membership is computed by prefix against the live catalogue, so a
//! letter without metadata still yields its diseases.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, DiseaseRecord};

// ═══════════════════════════════════════════
// Static reference data
// ═══════════════════════════════════════════

/// Static CID-10 chapter metadata.
pub struct CategoryMeta {
    pub letter: char,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CATEGORY_METADATA: &[CategoryMeta] = &[
    CategoryMeta {
        letter: 'A',
        title: "Doenças infecciosas e parasitárias",
        description: "Infecções causadas por vírus, bactérias, parasitas",
    },
    CategoryMeta {
        letter: 'B',
        title: "Doenças infecciosas e parasitárias",
        description: "Continuação das doenças infecciosas",
    },
    CategoryMeta {
        letter: 'C',
        title: "Neoplasias",
        description: "Tumores malignos e benignos",
    },
    CategoryMeta {
        letter: 'D',
        title: "Doenças do sangue",
        description: "Doenças do sangue e órgãos hematopoéticos",
    },
    CategoryMeta {
        letter: 'E',
        title: "Doenças endócrinas",
        description: "Doenças endócrinas, nutricionais e metabólicas",
    },
    CategoryMeta {
        letter: 'F',
        title: "Transtornos mentais",
        description: "Transtornos mentais e comportamentais",
    },
    CategoryMeta {
        letter: 'G',
        title: "Doenças do sistema nervoso",
        description: "Doenças do sistema nervoso",
    },
    CategoryMeta {
        letter: 'I',
        title: "Doenças do aparelho circulatório",
        description: "Doenças do coração e vasos sanguíneos",
    },
    CategoryMeta {
        letter: 'J',
        title: "Doenças do aparelho respiratório",
        description: "Doenças dos pulmões e vias respiratórias",
    },
    CategoryMeta {
        letter: 'K',
        title: "Doenças do aparelho digestivo",
        description: "Doenças do sistema digestivo",
    },
];

pub const SYMPTOM_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Sintomas Gerais",
        &["Febre", "Fadiga", "Perda de peso", "Mal-estar"],
    ),
    (
        "Sintomas Respiratórios",
        &["Tosse", "Falta de ar", "Dor no peito", "Chiado"],
    ),
    (
        "Sintomas Digestivos",
        &["Náusea", "Vômito", "Dor abdominal", "Diarreia"],
    ),
    (
        "Sintomas Neurológicos",
        &["Dor de cabeça", "Tontura", "Confusão", "Convulsões"],
    ),
    (
        "Sintomas Cardiovasculares",
        &["Palpitações", "Dor no peito", "Inchaço", "Pressão alta"],
    ),
];

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// Chapter view returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub letter: String,
    pub title: String,
    pub description: String,
}

/// Named symptom group for the guided symptom picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCategory {
    pub name: String,
    pub symptoms: Vec<String>,
}

// ═══════════════════════════════════════════
// Categorizer
// ═══════════════════════════════════════════

/// Groups catalogue codes into chapters by leading letter.
pub struct Categorizer {
    catalog: Arc<Catalog>,
}

impl Categorizer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// All chapters with static metadata, in reference order.
    pub fn categories(&self) -> Vec<Category> {
        CATEGORY_METADATA
            .iter()
            .map(|meta| Category {
                letter: meta.letter.to_string(),
                title: meta.title.to_string(),
                description: meta.description.to_string(),
            })
            .collect()
    }

    /// Static metadata for one chapter letter, if any.
    pub fn metadata_for(letter: char) -> Option<&'static CategoryMeta> {
        let letter = letter.to_ascii_uppercase();
        CATEGORY_METADATA.iter().find(|meta| meta.letter == letter)
    }

    /// All records whose code starts with the uppercased letter, in
    /// catalogue order. Unknown letters yield an empty list.
    pub fn diseases_in_category(&self, letter: &str) -> Vec<&DiseaseRecord> {
        let prefix = letter.trim().to_uppercase();
        self.catalog
            .records
            .iter()
            .filter(|record| record.code.starts_with(&prefix))
            .collect()
    }

    /// The static symptom reference groups.
    pub fn symptom_categories(&self) -> Vec<SymptomCategory> {
        SYMPTOM_CATEGORIES
            .iter()
            .map(|&(name, symptoms)| SymptomCategory {
                name: name.to_string(),
                symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
