pub mod country;
pub mod repositories;
pub mod tariff;

// Re-export commonly used types
pub use country::{CountryRegistry, IsoCountryRegistry};
pub use repositories::DomainResult;
pub use tariff::{
    CountryRates, PriceRecordRepository, ProductPriceRecord, TariffEntry, TariffQuery,
    TariffRecord, TariffSearchProvider,
};

pub use crate::shared::errors::DomainError;
