//! Description-chain resolution
//!
//! For every result code the labels of all ancestor prefixes are resolved,
//! root to leaf. Labels already present in the raw search results are reused;
//! missing ancestors are looked up through the search provider, at most once
//! per prefix per call, with up to `max_concurrent_lookups` in flight.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::{stream, StreamExt};
use tracing::{debug, warn};

use crate::domain::tariff::{Classified, TariffRecord, TariffSearchProvider};

/// Code → ancestor descriptions, root to leaf
pub type DescriptionChains = HashMap<String, Vec<String>>;

/// Per-call lookup state. Created for one query and dropped afterwards.
#[derive(Debug, Default)]
struct LookupScope {
    resolved: HashMap<String, String>,
    attempted: HashSet<String>,
}

impl LookupScope {
    fn seeded(records: &[TariffRecord]) -> Self {
        let mut scope = Self::default();
        for record in records {
            if let Some(code) = record.code() {
                scope
                    .resolved
                    .entry(code.to_string())
                    .or_insert_with(|| record.description.clone());
            }
        }
        scope
    }

    /// Prefixes that still need a lookup, each claimed exactly once.
    fn claim_missing(&mut self, code: &str) -> Vec<String> {
        ancestor_prefixes(code)
            .into_iter()
            .filter(|prefix| !self.resolved.contains_key(prefix))
            .filter(|prefix| self.attempted.insert(prefix.clone()))
            .collect()
    }

    fn chain_for(&self, code: &str) -> Vec<String> {
        ancestor_prefixes(code)
            .iter()
            .filter_map(|prefix| self.resolved.get(prefix).cloned())
            .collect()
    }
}

/// `1704.90.35` → `["1704", "1704.90", "1704.90.35"]`
pub fn ancestor_prefixes(code: &str) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut current = String::new();
    for segment in code.split('.') {
        if !current.is_empty() {
            current.push('.');
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }
    prefixes
}

pub struct DescriptionChainBuilder {
    provider: Arc<dyn TariffSearchProvider>,
    max_concurrent_lookups: usize,
}

impl DescriptionChainBuilder {
    pub fn new(provider: Arc<dyn TariffSearchProvider>, max_concurrent_lookups: usize) -> Self {
        Self {
            provider,
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        }
    }

    /// Build chains for `results`, seeding labels from `raw`, the unfiltered
    /// search results of the same query.
    pub async fn build<T: Classified>(&self, raw: &[TariffRecord], results: &[T]) -> DescriptionChains {
        let mut scope = LookupScope::seeded(raw);

        let pending: Vec<String> = results
            .iter()
            .filter_map(Classified::code)
            .flat_map(|code| scope.claim_missing(code))
            .collect();

        if !pending.is_empty() {
            debug!(lookups = pending.len(), "Resolving ancestor descriptions");
        }

        let provider = &self.provider;
        let found: Vec<(String, Option<String>)> = stream::iter(pending)
            .map(|prefix| async move {
                let description = lookup_exact(provider.as_ref(), &prefix).await;
                (prefix, description)
            })
            .buffer_unordered(self.max_concurrent_lookups)
            .collect()
            .await;

        for (prefix, description) in found {
            match description {
                Some(description) => {
                    scope.resolved.insert(prefix, description);
                }
                None => debug!(prefix = prefix.as_str(), "Ancestor description unresolved"),
            }
        }

        results
            .iter()
            .filter_map(Classified::code)
            .map(|code| (code.to_string(), scope.chain_for(code)))
            .collect()
    }
}

async fn lookup_exact(provider: &dyn TariffSearchProvider, prefix: &str) -> Option<String> {
    match provider.search(prefix).await {
        Ok(records) => records
            .into_iter()
            .find(|record| record.code() == Some(prefix))
            .map(|record| record.description),
        Err(e) => {
            warn!(prefix, error = %e, "Ancestor lookup failed");
            None
        }
    }
}
