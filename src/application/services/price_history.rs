//! Price history, per-country rate maps and category browsing over stored
//! dated price records

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::domain::country::{normalize_code, CountryRegistry};
use crate::domain::tariff::{
    dedupe_by_code, historical_prices, map_country_to_price, next_level, rank,
    select_price_for_country, PriceRecordRepository, ProductPriceRecord, TariffQuery,
};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Rate for every recognized country as of the latest record for a code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPriceMap {
    pub hts_code: String,
    pub fetch_date: NaiveDate,
    pub prices: BTreeMap<String, String>,
}

/// Rate applying to one country as of the latest record for a code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryPrice {
    pub hts_code: String,
    pub country: String,
    pub fetch_date: NaiveDate,
    pub rate: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

pub struct PriceHistoryService {
    records: Arc<dyn PriceRecordRepository>,
    countries: Arc<dyn CountryRegistry>,
}

impl PriceHistoryService {
    pub fn new(records: Arc<dyn PriceRecordRepository>, countries: Arc<dyn CountryRegistry>) -> Self {
        Self { records, countries }
    }

    /// Rate for `country` on every stored date of `code`.
    pub async fn historical_prices(
        &self,
        code: &str,
        country: &str,
    ) -> DomainResult<BTreeMap<NaiveDate, String>> {
        let code = parse_code(code)?;
        let country = self.validate_country(country)?;

        let series = self.records.find_all_by_code(&code).await?;
        if series.is_empty() {
            return Err(DomainError::not_found("ProductPrice", "hts_code", code));
        }

        let history = historical_prices(&series, &country, self.countries.as_ref());
        info!(
            code = code.as_str(),
            country = country.as_str(),
            records = series.len(),
            dates = history.len(),
            "Price history resolved"
        );
        Ok(history)
    }

    /// Rate for `country` according to the latest record of `code`.
    pub async fn price_for_country(&self, code: &str, country: &str) -> DomainResult<CountryPrice> {
        let record = self.latest(code).await?;
        let country = self.validate_country(country)?;
        let rate = select_price_for_country(&record, &country, self.countries.as_ref());

        Ok(CountryPrice {
            hts_code: record.hts_code,
            country,
            fetch_date: record.fetch_date,
            rate,
        })
    }

    /// Dense country → rate map from the latest record of `code`.
    pub async fn country_price_map(&self, code: &str) -> DomainResult<CountryPriceMap> {
        let record = self.latest(code).await?;
        let prices = map_country_to_price(&record, self.countries.as_ref());

        info!(
            code = record.hts_code.as_str(),
            fetch_date = %record.fetch_date,
            countries = prices.len(),
            "Country price map built"
        );

        Ok(CountryPriceMap {
            hts_code: record.hts_code,
            fetch_date: record.fetch_date,
            prices,
        })
    }

    /// Next classification level below a keyword (category) or code, using
    /// only the latest record of each code.
    pub async fn browse(&self, raw_query: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        let query = TariffQuery::parse(raw_query)?;
        let candidates = match &query {
            TariffQuery::Keyword(keyword) => self.records.find_by_category_containing(keyword).await?,
            TariffQuery::Code(prefix) => self.records.find_by_code_prefix(prefix).await?,
        };

        let latest = dedupe_by_code(candidates);
        let level: Vec<ProductPriceRecord> =
            next_level(&query, &latest).into_iter().cloned().collect();

        if level.is_empty() {
            return Err(DomainError::not_found(
                "ProductPrice",
                if query.is_code() { "hts_code" } else { "category" },
                query.as_str(),
            ));
        }

        Ok(rank(level, query.as_str()))
    }

    pub async fn browse_category(&self, keyword: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        match TariffQuery::parse(keyword)? {
            TariffQuery::Keyword(k) => self.browse(&k).await,
            TariffQuery::Code(c) => Err(DomainError::InvalidInput(format!(
                "'{}' is a code, not a category keyword",
                c
            ))),
        }
    }

    pub async fn browse_code_prefix(&self, prefix: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        let prefix = parse_code(prefix)?;
        self.browse(&prefix).await
    }

    /// Store fetched records. Already stored (code, date) pairs are skipped.
    ///
    /// Every code is checked before the first write; one bad code stores nothing.
    pub async fn import(&self, records: Vec<ProductPriceRecord>) -> DomainResult<ImportSummary> {
        for record in &records {
            parse_code(&record.hts_code)?;
        }

        let mut summary = ImportSummary::default();
        for record in records {
            if self.records.save(record).await? {
                summary.inserted += 1;
            } else {
                summary.skipped += 1;
            }
        }
        info!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            "Price records imported"
        );
        Ok(summary)
    }

    async fn latest(&self, code: &str) -> DomainResult<ProductPriceRecord> {
        let code = parse_code(code)?;
        self.records
            .find_latest_by_code(&code)
            .await?
            .ok_or_else(|| DomainError::not_found("ProductPrice", "hts_code", code))
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

fn parse_code(raw: &str) -> DomainResult<String> {
    match TariffQuery::parse(raw)? {
        TariffQuery::Code(code) => Ok(code),
        TariffQuery::Keyword(text) => Err(DomainError::InvalidInput(format!(
            "'{}' is not a hierarchical code",
            text
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::country::IsoCountryRegistry;
    use crate::infrastructure::storage::InMemoryPriceStore;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn service() -> PriceHistoryService {
        let store = Arc::new(InMemoryPriceStore::new());
        let service = PriceHistoryService::new(store, Arc::new(IsoCountryRegistry::new()));
        service
            .import(vec![
                ProductPriceRecord::new("1704.90.35", date("2025-04-01"))
                    .with_rates(Some("5.5¢/t"), Some("Free (AU,SG)"))
                    .with_description("Confections")
                    .with_category("sugar"),
                ProductPriceRecord::new("1704.90.35", date("2025-12-01"))
                    .with_rates(Some("5.5¢/t"), Some("Free (AU,SG,NZ)"))
                    .with_description("Confections")
                    .with_category("sugar"),
                ProductPriceRecord::new("1704", date("2025-04-01"))
                    .with_description("Sugar confectionery")
                    .with_category("sugar"),
                ProductPriceRecord::new("1704", date("2025-12-01"))
                    .with_description("Sugar confectionery")
                    .with_category("sugar"),
                ProductPriceRecord::new("1704.90", date("2025-12-01"))
                    .with_rates(Some("2%"), None)
                    .with_description("Other sugar confectionery")
                    .with_category("sugar"),
                ProductPriceRecord::new("1704.10", date("2025-12-01"))
                    .with_rates(Some("4%"), None)
                    .with_description("Chewing gum")
                    .with_category("sugar"),
            ])
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn history_per_country() {
        let history = service().await.historical_prices("1704.90.35", "NZ").await.unwrap();
        let expected: BTreeMap<_, _> = [
            (date("2025-04-01"), "5.5¢/t".to_string()),
            (date("2025-12-01"), "Free".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(history, expected);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found_not_empty() {
        let service = service().await;
        assert!(matches!(
            service.historical_prices("0101.21", "NZ").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.country_price_map("0101.21").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_inputs_are_rejected() {
        let service = service().await;
        assert!(matches!(
            service.historical_prices("sugar", "NZ").await,
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service.historical_prices("1704.90.35", "XX").await,
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            service.browse_category("1704").await,
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn country_map_uses_latest_record() {
        let map = service().await.country_price_map("1704.90.35").await.unwrap();
        assert_eq!(map.fetch_date, date("2025-12-01"));
        assert_eq!(map.prices["NZ"], "Free");
        assert_eq!(map.prices["FR"], "5.5¢/t");
        assert_eq!(map.prices.len(), IsoCountryRegistry::new().codes().len());
    }

    #[tokio::test]
    async fn price_for_country_uses_latest_record() {
        let price = service().await.price_for_country("1704.90.35", "nz").await.unwrap();
        assert_eq!(price.country, "NZ");
        assert_eq!(price.rate.as_deref(), Some("Free"));
    }

    #[tokio::test]
    async fn browse_category_shows_top_level_once() {
        let found = service().await.browse_category("sugar").await.unwrap();
        let codes: Vec<_> = found.iter().map(|r| r.hts_code.as_str()).collect();
        assert_eq!(codes, vec!["1704"]);
        assert_eq!(found[0].fetch_date, date("2025-12-01"));
    }

    #[tokio::test]
    async fn browse_code_prefix_ranks_next_level() {
        let found = service().await.browse_code_prefix("1704").await.unwrap();
        let codes: Vec<_> = found.iter().map(|r| r.hts_code.as_str()).collect();
        // 1704.90.35 rides along as a statistical suffix
        assert_eq!(codes, vec!["1704.90.35", "1704.10", "1704.90"]);
    }

    #[tokio::test]
    async fn batch_with_a_bad_code_stores_nothing() {
        let store = Arc::new(InMemoryPriceStore::new());
        let service = PriceHistoryService::new(store.clone(), Arc::new(IsoCountryRegistry::new()));

        let result = service
            .import(vec![
                ProductPriceRecord::new("1704", date("2025-01-01")),
                ProductPriceRecord::new("sugar", date("2025-01-01")),
            ])
            .await;

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        assert!(store.find_all_by_code("1704").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reimport_skips_existing_dates() {
        let service = service().await;
        let summary = service
            .import(vec![
                ProductPriceRecord::new("1704.90.35", date("2025-12-01")),
                ProductPriceRecord::new("1704.90.35", date("2026-06-01")),
            ])
            .await
            .unwrap();
        assert_eq!(summary, ImportSummary { inserted: 1, skipped: 1 });
    }
}
