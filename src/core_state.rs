//! Process-wide read-only state, assembled once at start-up.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::category::Categorizer;
use crate::diagnostic::{DiagnosticEngine, DEFAULT_VOCABULARY};
use crate::index::DiseaseIndex;
use crate::interaction::{InteractionChecker, DEFAULT_INTERACTIONS};
use crate::search::SearchMatcher;

/// Shared state for every request handler.
///
/// All components are read-only after construction, so concurrent requests
/// need no coordination. Swapping in a new catalogue means building a fresh
/// `CoreState` and replacing the shared `Arc` wholesale; in-flight requests
/// keep the snapshot they started with.
pub struct CoreState {
    pub catalog: Arc<Catalog>,
    pub index: DiseaseIndex,
    pub matcher: SearchMatcher,
    pub categorizer: Categorizer,
    pub diagnostics: DiagnosticEngine,
    pub interactions: InteractionChecker,
}

impl CoreState {
    pub fn new(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            index: DiseaseIndex::build(catalog.clone()),
            matcher: SearchMatcher::new(catalog.clone()),
            categorizer: Categorizer::new(catalog.clone()),
            diagnostics: DiagnosticEngine::new(catalog.clone(), DEFAULT_VOCABULARY),
            interactions: InteractionChecker::new(DEFAULT_INTERACTIONS),
            catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_records, Catalog};

    #[test]
    fn components_share_one_catalogue_snapshot() {
        let state = CoreState::new(Catalog::assemble(default_records(), false));
        let total = state.catalog.records.len();
        assert_eq!(state.index.by_prefix("").len(), total);
        assert!(state.index.by_code("E10").is_some());
    }
}
