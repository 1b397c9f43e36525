//! Disease catalogue loading and normalization.
//!
//! Reads the raw CID-10 catalogue (a JSON list of code/name objects that is
//! frequently truncated or malformed in the wild), repairs it, normalizes
//! the two historical field spellings and enriches known codes with static
//! clinical details. Loading never fails: malformed or missing source data
//! degrades to the built-in default dataset, observable only through
//! `used_fallback`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════
// Records
// ═══════════════════════════════════════════

/// One catalogue entry, normalized to canonical field names.
///
/// `code` is canonical uppercase (`E10.1` style). Clinical fields are empty
/// for codes the enrichment table does not know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub non_medication_treatment: Vec<String>,
    pub severity: Option<String>,
    pub prognosis: Option<String>,
}

impl DiseaseRecord {
    fn new(code: &str, name: &str) -> Self {
        let code = code.to_uppercase();
        Self {
            category: chapter_of(&code),
            code,
            name: name.to_string(),
            symptoms: Vec::new(),
            medications: Vec::new(),
            non_medication_treatment: Vec::new(),
            severity: None,
            prognosis: None,
        }
    }
}

/// The loaded catalogue. Read-only after load; shared for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub records: Vec<DiseaseRecord>,
    pub used_fallback: bool,
}

impl Catalog {
    /// Dedupes, derives categories and applies clinical enrichment.
    pub fn assemble(records: Vec<DiseaseRecord>, used_fallback: bool) -> Self {
        let mut records = dedupe(records);
        for record in &mut records {
            if record.category.is_none() {
                record.category = chapter_of(&record.code);
            }
            enrich(record);
        }
        Self { records, used_fallback }
    }
}

/// Chapter letter of a code, `None` for an empty code.
fn chapter_of(code: &str) -> Option<String> {
    code.chars().next().map(|c| c.to_uppercase().to_string())
}

// ═══════════════════════════════════════════
// Repair and parse
// ═══════════════════════════════════════════

/// Repairs the common malformations of the raw catalogue text.
///
/// Applied in order: trim whitespace; empty content returns `None` (callers
/// fall back to the default dataset); strip a single trailing item
/// separator; append the closing bracket if missing; prepend the opening
/// bracket if missing. The result still has to survive a structured parse.
pub fn repair_json(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut repaired = trimmed.strip_suffix(',').unwrap_or(trimmed).to_string();
    if !repaired.ends_with(']') {
        repaired.push(']');
    }
    if !repaired.starts_with('[') {
        repaired.insert(0, '[');
    }
    Some(repaired)
}

/// Parses raw catalogue text after repair. `None` means unusable content.
pub fn parse_catalog(raw: &str) -> Option<Vec<DiseaseRecord>> {
    let repaired = repair_json(raw)?;
    let entries: Vec<Value> = serde_json::from_str(&repaired).ok()?;
    Some(entries.iter().map(normalize_entry).collect())
}

/// Normalizes one raw entry to canonical field names.
///
/// The source data carries either spelling per field (`codigo`/`code`,
/// `nome`/`description`), with the Portuguese spelling preferred. Missing
/// values normalize to the empty string, never a missing field.
fn normalize_entry(entry: &Value) -> DiseaseRecord {
    let pick = |primary: &str, fallback: &str| -> String {
        let get = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let value = get(primary);
        if value.is_empty() {
            get(fallback)
        } else {
            value
        }
    };

    let mut record = DiseaseRecord::new(&pick("codigo", "code"), &pick("nome", "description"));
    let category = pick("category", "categoria");
    if !category.is_empty() {
        record.category = Some(category);
    }
    record
}

/// Last-write-wins on duplicate codes, keeping the first occurrence's
/// position so catalogue order stays stable. Pure overwrite, no merge.
fn dedupe(records: Vec<DiseaseRecord>) -> Vec<DiseaseRecord> {
    let mut out: Vec<DiseaseRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records {
        match seen.get(&record.code).copied() {
            Some(idx) => out[idx] = record,
            None => {
                seen.insert(record.code.clone(), out.len());
                out.push(record);
            }
        }
    }
    out
}

// ═══════════════════════════════════════════
// Load
// ═══════════════════════════════════════════

/// Loads the catalogue from `path`. Never fails: an unreadable file or
/// unusable content degrades to the built-in default dataset.
pub fn load(path: &Path) -> Catalog {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "catalogue not readable, using default dataset");
            return Catalog::assemble(default_records(), true);
        }
    };
    match parse_catalog(&raw) {
        Some(records) => {
            tracing::info!(path = %path.display(), records = records.len(), "catalogue loaded");
            Catalog::assemble(records, false)
        }
        None => {
            tracing::warn!(path = %path.display(), "catalogue unusable after repair, using default dataset");
            Catalog::assemble(default_records(), true)
        }
    }
}

// ═══════════════════════════════════════════
// Built-in default dataset
// ═══════════════════════════════════════════

/// The built-in CID-10 subset served when the source file is missing or
/// beyond repair.
pub fn default_records() -> Vec<DiseaseRecord> {
    [
        ("A01.0", "Febre tifóide"),
        ("A01.1", "Febre paratifóide A"),
        ("I10", "Hipertensão essencial"),
        ("I10.0", "Hipertensão arterial sistêmica"),
        ("E11", "Diabetes mellitus não-insulino-dependente"),
        ("E10", "Diabetes mellitus insulino-dependente"),
        ("E14", "Diabetes mellitus não especificado"),
        ("J44", "Outras doenças pulmonares obstrutivas crônicas"),
        ("K29", "Gastrite e duodenite"),
        ("F32", "Episódios depressivos"),
        ("F41", "Outros transtornos ansiosos"),
        ("F20", "Esquizofrenia"),
        ("F20.0", "Esquizofrenia paranoide"),
        ("F20.1", "Esquizofrenia hebefrênica"),
        ("F20.2", "Esquizofrenia catatônica"),
        ("F25", "Transtornos esquizoafetivos"),
        ("G40", "Epilepsia"),
        ("M79", "Outros transtornos dos tecidos moles"),
        ("N18", "Doença renal crônica"),
        ("R50", "Febre não especificada"),
        ("J18", "Pneumonia por organismo não especificado"),
        ("J45", "Asma"),
        ("J11", "Influenza devida a vírus não identificado"),
    ]
    .iter()
    .map(|&(code, name)| DiseaseRecord::new(code, name))
    .collect()
}

// ═══════════════════════════════════════════
// Clinical enrichment
// ═══════════════════════════════════════════

/// Static clinical reference for a catalogue code.
pub struct ClinicalDetails {
    pub severity: &'static str,
    pub symptoms: &'static [&'static str],
    pub medications: &'static [&'static str],
    pub non_medication_treatment: &'static [&'static str],
    pub prognosis: &'static str,
}

/// Clinical reference data for the codes the service annotates.
pub fn clinical_details_for(code: &str) -> Option<ClinicalDetails> {
    match code {
        "E10" => Some(ClinicalDetails {
            severity: "Grave",
            symptoms: &["polidipsia", "poliúria", "perda de peso", "fadiga"],
            medications: &["Insulina", "Metformina"],
            non_medication_treatment: &[
                "Dieta controlada",
                "Exercícios físicos",
                "Monitoramento glicêmico",
            ],
            prognosis: "Controlável com tratamento adequado",
        }),
        "E11" => Some(ClinicalDetails {
            severity: "Moderada a Grave",
            symptoms: &["sede excessiva", "micção frequente", "fadiga", "visão turva"],
            medications: &["Metformina", "Glibenclamida", "Insulina (casos avançados)"],
            non_medication_treatment: &["Dieta", "Exercícios", "Controle de peso"],
            prognosis: "Bom com controle adequado",
        }),
        "I10" => Some(ClinicalDetails {
            severity: "Moderada a Grave",
            symptoms: &["dor de cabeça", "tontura", "palpitações"],
            medications: &["Enalapril", "Losartana", "Hidroclorotiazida", "Amlodipina"],
            non_medication_treatment: &[
                "Dieta hipossódica",
                "Exercícios",
                "Redução do estresse",
            ],
            prognosis: "Controlável com tratamento contínuo",
        }),
        "N30" => Some(ClinicalDetails {
            severity: "Leve a Moderada",
            symptoms: &["disúria", "urgência urinária", "polaciúria", "dor suprapúbica"],
            medications: &[
                "Nitrofurantoína",
                "Sulfametoxazol + Trimetoprima",
                "Ciprofloxacino",
            ],
            non_medication_treatment: &["Hidratação abundante", "Higiene adequada"],
            prognosis: "Excelente com tratamento adequado",
        }),
        "J18" => Some(ClinicalDetails {
            severity: "Moderada a Grave",
            symptoms: &["tosse", "febre", "dispneia", "dor torácica"],
            medications: &["Amoxicilina", "Azitromicina", "Ceftriaxona"],
            non_medication_treatment: &["Repouso", "Hidratação", "Fisioterapia respiratória"],
            prognosis: "Bom com tratamento precoce",
        }),
        "F32" => Some(ClinicalDetails {
            severity: "Leve a Grave",
            symptoms: &["tristeza", "anedonia", "fadiga", "alterações do sono"],
            medications: &["Fluoxetina", "Sertralina", "Escitalopram", "Amitriptilina"],
            non_medication_treatment: &[
                "Psicoterapia",
                "Terapia cognitivo-comportamental",
                "Exercícios",
            ],
            prognosis: "Bom com tratamento adequado",
        }),
        "K29" => Some(ClinicalDetails {
            severity: "Leve a Moderada",
            symptoms: &["dor epigástrica", "náuseas", "vômitos", "queimação"],
            medications: &["Omeprazol", "Ranitidina", "Sucralfato"],
            non_medication_treatment: &[
                "Dieta adequada",
                "Evitar irritantes",
                "Controle do estresse",
            ],
            prognosis: "Excelente com mudanças no estilo de vida",
        }),
        "J45" => Some(ClinicalDetails {
            severity: "Leve a Grave",
            symptoms: &["dispneia", "sibilos", "tosse", "opressão torácica"],
            medications: &["Salbutamol", "Budesonida", "Formoterol", "Prednisolona"],
            non_medication_treatment: &["Evitar alérgenos", "Exercícios respiratórios"],
            prognosis: "Controlável com tratamento adequado",
        }),
        _ => None,
    }
}

/// Fills empty clinical fields from the reference table. Fields already
/// present on the loaded record are left untouched.
fn enrich(record: &mut DiseaseRecord) {
    let Some(details) = clinical_details_for(&record.code) else {
        return;
    };
    let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    if record.symptoms.is_empty() {
        record.symptoms = to_vec(details.symptoms);
    }
    if record.medications.is_empty() {
        record.medications = to_vec(details.medications);
    }
    if record.non_medication_treatment.is_empty() {
        record.non_medication_treatment = to_vec(details.non_medication_treatment);
    }
    if record.severity.is_none() {
        record.severity = Some(details.severity.to_string());
    }
    if record.prognosis.is_none() {
        record.prognosis = Some(details.prognosis.to_string());
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
