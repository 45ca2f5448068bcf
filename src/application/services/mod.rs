//! Application services

pub mod description_chain;
mod price_history;
mod tariff_lookup;

pub use description_chain::{DescriptionChainBuilder, DescriptionChains};
pub use price_history::{CountryPrice, CountryPriceMap, ImportSummary, PriceHistoryService};
pub use tariff_lookup::TariffLookupService;
