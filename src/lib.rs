//! # Tariff Lookup
//!
//! Tariff classification and country-rate resolution engine.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Tariff records, the classification query, country registry
//!   and the pure engine (rate parsing, hierarchy navigation, ranking,
//!   country-rate extraction, price history)
//! - **application**: Search pipeline, description chains, price history
//!   services
//! - **infrastructure**: Price-record stores (SeaORM, in-memory) and the
//!   local search provider
//! - **shared**: Error types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};

pub use application::{PriceHistoryService, TariffLookupService};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::{init_database, DatabaseConfig};
pub use telemetry::init_tracing;
