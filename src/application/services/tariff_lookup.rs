//! Tariff search pipeline

use std::sync::Arc;

use tracing::info;

use super::description_chain::DescriptionChainBuilder;
use crate::domain::country::{normalize_code, CountryRegistry};
use crate::domain::tariff::{
    extract_country_rates, next_level, rank, Classified, TariffEntry, TariffQuery,
    TariffSearchProvider,
};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Turns a keyword or code into ranked, enriched tariff lines one level
/// below the query.
pub struct TariffLookupService {
    provider: Arc<dyn TariffSearchProvider>,
    countries: Arc<dyn CountryRegistry>,
    chains: DescriptionChainBuilder,
}

impl TariffLookupService {
    pub fn new(
        provider: Arc<dyn TariffSearchProvider>,
        countries: Arc<dyn CountryRegistry>,
        max_concurrent_lookups: usize,
    ) -> Self {
        Self {
            chains: DescriptionChainBuilder::new(provider.clone(), max_concurrent_lookups),
            provider,
            countries,
        }
    }

    pub async fn search(
        &self,
        raw_query: &str,
        country: Option<&str>,
    ) -> DomainResult<Vec<TariffEntry>> {
        let query = TariffQuery::parse(raw_query)?;
        let country = country.map(|c| self.validate_country(c)).transpose()?;

        let raw = self.provider.search(query.as_str()).await?;
        let level: Vec<_> = next_level(&query, &raw).into_iter().cloned().collect();

        if level.is_empty() {
            return Err(DomainError::not_found(
                "Tariff",
                if query.is_code() { "code" } else { "keyword" },
                query.as_str(),
            ));
        }

        let chains = self.chains.build(&raw, &level).await;

        let entries: Vec<TariffEntry> = level
            .into_iter()
            .map(|record| {
                let rates = extract_country_rates(
                    record.general_rate.as_deref(),
                    record.special_rate.as_deref(),
                    self.countries.as_ref(),
                );
                let applicable_rate = country
                    .as_deref()
                    .and_then(|c| rates.rate_for(c))
                    .map(str::to_string);
                let description_chain = record
                    .code()
                    .and_then(|code| chains.get(code).cloned())
                    .unwrap_or_default();
                TariffEntry {
                    record,
                    description_chain,
                    rates,
                    applicable_rate,
                }
            })
            .collect();

        let ranked = rank(entries, query.as_str());

        info!(
            query = %query,
            raw = raw.len(),
            results = ranked.len(),
            "Tariff search completed"
        );

        Ok(ranked)
    }

    fn validate_country(&self, country: &str) -> DomainResult<String> {
        if self.countries.is_valid_code(country) {
            Ok(normalize_code(country))
        } else {
            Err(DomainError::InvalidInput(format!(
                "unknown country code '{}'",
                country.trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::country::IsoCountryRegistry;
    use crate::domain::tariff::TariffRecord;
    use crate::infrastructure::search::InMemorySearchProvider;

    fn service() -> TariffLookupService {
        let catalog = vec![
            TariffRecord::new("1704", "Sugar confectionery (including white chocolate), not containing cocoa"),
            TariffRecord::new("1704.10", "Chewing gum, whether or not sugar-coated")
                .with_rates(Some("4%"), Some("Free (A+, AU, SG)")),
            TariffRecord::new("1704.90", "Other:"),
            TariffRecord::new("1704.90.10", "Candied nuts")
                .with_rates(Some("5.5¢/kg"), Some("Free (AU,SG,NZ)")),
            TariffRecord::new("1704.90.35", "Confections or sweetmeats ready for consumption")
                .with_rates(Some("5.6%"), Some("Free (AU)")),
            TariffRecord::new("1704.90.35.10", "Sugar free"),
            TariffRecord::new("1806", "Chocolate and other food preparations containing cocoa"),
        ];
        TariffLookupService::new(
            Arc::new(InMemorySearchProvider::new(catalog)),
            Arc::new(IsoCountryRegistry::new()),
            4,
        )
    }

    fn codes(entries: &[TariffEntry]) -> Vec<&str> {
        entries.iter().filter_map(|e| e.record.code()).collect()
    }

    #[tokio::test]
    async fn keyword_search_returns_top_level_headings() {
        let entries = service().search("chocolate", None).await.unwrap();
        // "chocolate" occurs at index 0 in 1806 and later in 1704
        assert_eq!(codes(&entries), vec!["1806", "1704"]);
        assert_eq!(entries[0].description_chain.len(), 1);
    }

    #[tokio::test]
    async fn code_search_returns_next_level_with_chains() {
        let entries = service().search("1704.90", None).await.unwrap();
        // no keyword hit in any leaf, so ordered by general rate
        assert_eq!(
            codes(&entries),
            vec!["1704.90.35", "1704.90.10", "1704.90.35.10"]
        );

        let candied = &entries[1];
        assert_eq!(
            candied.description_chain,
            vec![
                "Sugar confectionery (including white chocolate), not containing cocoa",
                "Other:",
                "Candied nuts"
            ]
        );
    }

    #[tokio::test]
    async fn statistical_suffix_appears_beside_children() {
        let entries = service().search("1704", None).await.unwrap();
        assert_eq!(
            codes(&entries),
            vec!["1704.90.35", "1704.90.10", "1704.10", "1704.90"]
        );

        let entries = service().search("1704.90.35", None).await.unwrap();
        assert_eq!(codes(&entries), vec!["1704.90.35.10"]);
    }

    #[tokio::test]
    async fn country_selects_applicable_rate() {
        let entries = service().search("1704.90", Some("nz")).await.unwrap();
        let candied = entries
            .iter()
            .find(|e| e.record.code() == Some("1704.90.10"))
            .unwrap();
        assert_eq!(candied.applicable_rate.as_deref(), Some("Free"));
        assert_eq!(
            candied.rates.special_country_names(),
            vec!["Australia", "Singapore", "New Zealand"]
        );

        let confections = entries
            .iter()
            .find(|e| e.record.code() == Some("1704.90.35"))
            .unwrap();
        assert_eq!(confections.applicable_rate.as_deref(), Some("5.6%"));
    }

    #[tokio::test]
    async fn duplicate_records_share_the_same_chain() {
        let catalog = vec![
            TariffRecord::new("1704", "Sugar confectionery"),
            TariffRecord::new("1704.10", "Chewing gum"),
            TariffRecord::new("1704.10", "Chewing gum"),
        ];
        let service = TariffLookupService::new(
            Arc::new(InMemorySearchProvider::new(catalog)),
            Arc::new(IsoCountryRegistry::new()),
            4,
        );

        let entries = service.search("1704", None).await.unwrap();
        assert_eq!(codes(&entries), vec!["1704.10", "1704.10"]);
        for entry in &entries {
            assert_eq!(
                entry.description_chain,
                vec!["Sugar confectionery", "Chewing gum"]
            );
        }
    }

    #[tokio::test]
    async fn no_next_level_is_not_found() {
        let err = service().search("9999", None).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { field: "code", .. }));
    }

    #[tokio::test]
    async fn invalid_inputs_are_rejected_before_searching() {
        assert!(matches!(
            service().search("  ", None).await,
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service().search("1704", Some("ZZ")).await,
            Err(DomainError::InvalidInput(_))
        ));
    }
}
