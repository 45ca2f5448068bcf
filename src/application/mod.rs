pub mod services;

// Re-export key types for convenience
pub use services::{
    CountryPrice, CountryPriceMap, DescriptionChainBuilder, ImportSummary, PriceHistoryService,
    TariffLookupService,
};
