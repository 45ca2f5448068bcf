//! Tariff collaborator interfaces

use async_trait::async_trait;

use super::model::{ProductPriceRecord, TariffRecord};
use crate::domain::DomainResult;

/// External tariff search. Results may be unsorted and contain duplicates.
#[async_trait]
pub trait TariffSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> DomainResult<Vec<TariffRecord>>;
}

/// Read access to dated price records.
#[async_trait]
pub trait PriceRecordRepository: Send + Sync {
    async fn find_latest_by_code(&self, code: &str) -> DomainResult<Option<ProductPriceRecord>>;
    /// All dated records for `code`, oldest first.
    async fn find_all_by_code(&self, code: &str) -> DomainResult<Vec<ProductPriceRecord>>;
    async fn find_by_code_prefix(&self, prefix: &str) -> DomainResult<Vec<ProductPriceRecord>>;
    async fn find_by_category_containing(
        &self,
        keyword: &str,
    ) -> DomainResult<Vec<ProductPriceRecord>>;
    /// Insert a record; an existing (code, fetch date) pair is left untouched.
    async fn save(&self, record: ProductPriceRecord) -> DomainResult<bool>;
}
