//! Database repository implementations

pub mod product_price_repository;

pub use product_price_repository::SeaOrmPriceRecordRepository;
