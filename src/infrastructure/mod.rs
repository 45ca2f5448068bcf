//! Infrastructure layer - external concerns

pub mod database;
pub mod search;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmPriceRecordRepository};
pub use search::InMemorySearchProvider;
pub use storage::InMemoryPriceStore;
