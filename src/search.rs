//! Free-text and code search over the catalogue.

use std::cmp::Reverse;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;

pub const DEFAULT_LIMIT: usize = 10;

const CODE_RELEVANCE: u8 = 90;
const NAME_RELEVANCE: u8 = 70;

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub code: String,
    pub description: String,
    pub relevance: u8,
    pub subcategory: Subcategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    pub category: String,
}

/// Ranks catalogue entries against a free-text or code query.
pub struct SearchMatcher {
    catalog: Arc<Catalog>,
}

impl SearchMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Searches by CID code or name fragment.
    ///
    /// A record matches when the uppercased query is a substring of its
    /// code, or the lowercased query (or any of its whitespace tokens) is a
    /// substring of its name. Code matches score 90, name matches 70. All
    /// matches are collected in catalogue order and stable-sorted by
    /// relevance before truncation, so every code match precedes every name
    /// match even across the limit boundary.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::InvalidQuery);
        }
        let query_upper = query.to_uppercase();
        let query_lower = query.to_lowercase();
        let tokens: Vec<&str> = query_lower.split_whitespace().collect();

        let mut hits = Vec::new();
        for record in &self.catalog.records {
            let name_lower = record.name.to_lowercase();
            let code_match = record.code.contains(&query_upper);
            let name_match = name_lower.contains(&query_lower)
                || tokens.iter().any(|token| name_lower.contains(token));
            if !code_match && !name_match {
                continue;
            }
            hits.push(SearchHit {
                code: record.code.clone(),
                description: record.name.clone(),
                relevance: if code_match { CODE_RELEVANCE } else { NAME_RELEVANCE },
                subcategory: Subcategory {
                    category: record
                        .code
                        .chars()
                        .next()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "N/A".to_string()),
                },
            });
        }

        hits.sort_by_key(|hit| Reverse(hit.relevance));
        hits.truncate(limit);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_records, Catalog, DiseaseRecord};

    fn default_matcher() -> SearchMatcher {
        SearchMatcher::new(Arc::new(Catalog::assemble(default_records(), false)))
    }

    #[test]
    fn empty_query_is_rejected() {
        let err = default_matcher().search("   ", DEFAULT_LIMIT).unwrap_err();
        assert_eq!(err, CoreError::InvalidQuery);
    }

    #[test]
    fn code_match_scores_ninety() {
        let hits = default_matcher().search("E10", DEFAULT_LIMIT).unwrap();
        let e10 = hits.iter().find(|h| h.code == "E10").unwrap();
        assert_eq!(e10.relevance, 90);
        assert_eq!(e10.subcategory.category, "E");
    }

    #[test]
    fn name_match_scores_seventy() {
        let hits = default_matcher().search("asma", DEFAULT_LIMIT).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "J45");
        assert_eq!(hits[0].relevance, 70);
    }

    #[test]
    fn query_tokens_match_name_words() {
        // Neither full phrase nor code matches, but the "essencial" token does.
        let hits = default_matcher()
            .search("essencial desconhecida", DEFAULT_LIMIT)
            .unwrap();
        assert!(hits.iter().any(|h| h.code == "I10"));
    }

    fn bare_record(code: &str, name: &str) -> DiseaseRecord {
        DiseaseRecord {
            code: code.to_string(),
            name: name.to_string(),
            category: None,
            symptoms: vec![],
            medications: vec![],
            non_medication_treatment: vec![],
            severity: None,
            prognosis: None,
        }
    }

    #[test]
    fn code_matches_precede_name_matches() {
        let records = vec![
            bare_record("A01", "Condição com tosse"),
            bare_record("B02", "Tosse crônica"),
            bare_record("TOS1", "Outra condição"),
        ];
        let matcher = SearchMatcher::new(Arc::new(Catalog::assemble(records, false)));

        let hits = matcher.search("tos", DEFAULT_LIMIT).unwrap();
        let relevances: Vec<_> = hits.iter().map(|h| h.relevance).collect();
        assert_eq!(relevances, vec![90, 70, 70]);
        assert_eq!(hits[0].code, "TOS1");
    }

    #[test]
    fn tier_sort_happens_before_truncation() {
        // Catalogue order: twelve name-tier records first, then one
        // code-tier record. A first-N-found policy would drop the code hit.
        let mut records: Vec<DiseaseRecord> = (0..12)
            .map(|i| bare_record(&format!("A{i:02}"), "Febre recorrente"))
            .collect();
        records.push(bare_record("FEB1", "Outra condição"));
        let matcher = SearchMatcher::new(Arc::new(Catalog::assemble(records, false)));

        let hits = matcher.search("feb", DEFAULT_LIMIT).unwrap();
        assert_eq!(hits.len(), DEFAULT_LIMIT);
        assert_eq!(hits[0].code, "FEB1");
        assert_eq!(hits[0].relevance, 90);
    }

    #[test]
    fn ties_keep_catalogue_order() {
        let hits = default_matcher().search("F20", DEFAULT_LIMIT).unwrap();
        let codes: Vec<_> = hits.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["F20", "F20.0", "F20.1", "F20.2"]);
    }

    #[test]
    fn limit_truncates_results() {
        let hits = default_matcher().search("e", 3).unwrap();
        assert!(hits.len() <= 3);
    }

    #[test]
    fn fallback_catalogue_searches_like_the_default_dataset() {
        let fallback = crate::catalog::load(std::path::Path::new("/no/such/file.json"));
        assert!(fallback.used_fallback);

        let from_fallback = SearchMatcher::new(Arc::new(fallback))
            .search("E10", DEFAULT_LIMIT)
            .unwrap();
        let from_default = default_matcher().search("E10", DEFAULT_LIMIT).unwrap();

        let codes = |hits: &[SearchHit]| hits.iter().map(|h| h.code.clone()).collect::<Vec<_>>();
        assert_eq!(codes(&from_fallback), codes(&from_default));
    }
}
