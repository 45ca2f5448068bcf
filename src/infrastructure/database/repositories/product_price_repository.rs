//! SeaORM implementation of PriceRecordRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::tariff::{PriceRecordRepository, ProductPriceRecord};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::product_price;
use crate::shared::errors::{DomainError, InfraError};

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::Database(e).into()
}

fn entity_to_domain(m: product_price::Model) -> ProductPriceRecord {
    ProductPriceRecord {
        hts_code: m.hts_code,
        fetch_date: m.fetch_date,
        general_rate: m.general_rate,
        special_rate: m.special_rate,
        description: m.description,
        category: m.category,
    }
}

// ── SeaOrmPriceRecordRepository ─────────────────────────────────

pub struct SeaOrmPriceRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmPriceRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceRecordRepository for SeaOrmPriceRecordRepository {
    async fn find_latest_by_code(&self, code: &str) -> DomainResult<Option<ProductPriceRecord>> {
        let model = product_price::Entity::find()
            .filter(product_price::Column::HtsCode.eq(code))
            .order_by_desc(product_price::Column::FetchDate)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all_by_code(&self, code: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        let models = product_price::Entity::find()
            .filter(product_price::Column::HtsCode.eq(code))
            .order_by_asc(product_price::Column::FetchDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_code_prefix(&self, prefix: &str) -> DomainResult<Vec<ProductPriceRecord>> {
        let models = product_price::Entity::find()
            .filter(product_price::Column::HtsCode.starts_with(prefix))
            .order_by_asc(product_price::Column::HtsCode)
            .order_by_asc(product_price::Column::FetchDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_category_containing(
        &self,
        keyword: &str,
    ) -> DomainResult<Vec<ProductPriceRecord>> {
        let models = product_price::Entity::find()
            .filter(product_price::Column::Category.contains(keyword))
            .order_by_asc(product_price::Column::HtsCode)
            .order_by_asc(product_price::Column::FetchDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, r: ProductPriceRecord) -> DomainResult<bool> {
        let existing = product_price::Entity::find()
            .filter(product_price::Column::HtsCode.eq(r.hts_code.as_str()))
            .filter(product_price::Column::FetchDate.eq(r.fetch_date))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_some() {
            debug!(code = r.hts_code.as_str(), fetch_date = %r.fetch_date, "Price record already stored");
            return Ok(false);
        }

        let model = product_price::ActiveModel {
            hts_code: Set(r.hts_code),
            fetch_date: Set(r.fetch_date),
            general_rate: Set(r.general_rate),
            special_rate: Set(r.special_rate),
            description: Set(r.description),
            category: Set(r.category),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        debug!(code = result.hts_code.as_str(), id = result.id, "Price record saved");
        Ok(true)
    }
}
