//! Product price entity - one dated snapshot of a tariff line

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product price model. (hts_code, fetch_date) is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_prices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Hierarchical code (e.g., "1704.90.35")
    pub hts_code: String,

    /// Date the snapshot was fetched
    pub fetch_date: NaiveDate,

    /// General rate text (e.g., "5.5¢/kg")
    pub general_rate: Option<String>,

    /// Special rate text (e.g., "Free (AU, SG)")
    pub special_rate: Option<String>,

    pub description: Option<String>,

    /// Category label the line was fetched under
    pub category: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
