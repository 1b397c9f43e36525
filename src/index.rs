//! Lookup structures over the loaded catalogue.
//!
//! Codes are keyed by canonical uppercase form and all queries are
//! case-insensitive. `by_code` is O(1); prefix and token lookups scan the
//! catalogue, which is fine at catalogue sizes in the tens of thousands.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::{Catalog, DiseaseRecord};

/// Code, prefix and name-token lookups over the catalogue.
pub struct DiseaseIndex {
    catalog: Arc<Catalog>,
    by_code: HashMap<String, usize>,
}

impl DiseaseIndex {
    pub fn build(catalog: Arc<Catalog>) -> Self {
        let mut by_code = HashMap::with_capacity(catalog.records.len());
        for (idx, record) in catalog.records.iter().enumerate() {
            by_code.insert(record.code.to_uppercase(), idx);
        }
        Self { catalog, by_code }
    }

    /// Exact code lookup, case-insensitive.
    pub fn by_code(&self, code: &str) -> Option<&DiseaseRecord> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&idx| &self.catalog.records[idx])
    }

    /// All records whose code starts with the uppercased prefix, in
    /// insertion order.
    pub fn by_prefix(&self, prefix: &str) -> Vec<&DiseaseRecord> {
        let prefix = prefix.trim().to_uppercase();
        self.catalog
            .records
            .iter()
            .filter(|record| record.code.starts_with(&prefix))
            .collect()
    }

    /// Lowercase word tokens of a record's name.
    pub fn tokens_of(record: &DiseaseRecord) -> HashSet<String> {
        record
            .name
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
