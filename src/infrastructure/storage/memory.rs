//! In-memory price-record storage for development and testing

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::tariff::{PriceRecordRepository, ProductPriceRecord};
use crate::domain::DomainResult;

/// Price records keyed by code, each code's series ordered by fetch date
pub struct InMemoryPriceStore {
    series: DashMap<String, BTreeMap<NaiveDate, ProductPriceRecord>>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self {
            series: DashMap::new(),
        }
    }

    fn collect_where(&self, keep: impl Fn(&ProductPriceRecord) -> bool) -> Vec<ProductPriceRecord> {
        let mut found: Vec<ProductPriceRecord> = self
            .series
            .iter()
            .flat_map(|entry| entry.value().values().cloned().collect::<Vec<_>>())
            .filter(|record| keep(record))
            .collect();
        found.sort_by(|a, b| {
            a.hts_code
                .cmp(&b.hts_code)
                .then(a.fetch_date.cmp(&b.fetch_date))
        });
        found
    }
}

impl Default for InMemoryPriceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceRecordRepository for InMemoryPriceStore {
    async fn find_latest_by_code(&self, code: &str) -> DomainResult<Option<ProductPriceRecord>> {
        Ok(self
            .series
            .get(code)
            .and_then(|series| series.values().next_back().cloned()))
    }

    async fn find_all_by_code(&self, code: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        Ok(self
            .series
            .get(code)
            .map(|series| series.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_code_prefix(&self, prefix: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        Ok(self.collect_where(|record| record.hts_code.starts_with(prefix)))
    }

    async fn find_by_category_containing(
        &self,
        keyword: &str,
    ) -> DomainResult<Vec<ProductPriceRecord>> {
        let needle = keyword.to_lowercase();
        Ok(self.collect_where(|record| {
            record
                .category
                .as_deref()
                .is_some_and(|category| category.to_lowercase().contains(&needle))
        }))
    }

    async fn save(&self, record: ProductPriceRecord) -> DomainResult<bool> {
        let mut series = self.series.entry(record.hts_code.clone()).or_default();
        if series.contains_key(&record.fetch_date) {
            return Ok(false);
        }
        series.insert(record.fetch_date, record);
        Ok(true)
    }
}
