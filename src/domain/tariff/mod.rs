//! Tariff aggregate
//!
//! Records, the classification query, and the pure engine: rate parsing,
//! hierarchy navigation, ranking, country-rate extraction and price history.

pub mod country_rates;
pub mod hierarchy;
pub mod model;
pub mod price_history;
pub mod query;
pub mod ranking;
pub mod rate_parser;
pub mod reducer;
pub mod repository;

pub use country_rates::{extract_country_rates, CountryRates, SpecialCountry};
pub use hierarchy::{is_next_level, next_level};
pub use model::{Classified, ProductPriceRecord, Rankable, TariffEntry, TariffRecord};
pub use price_history::{historical_prices, map_country_to_price, select_price_for_country};
pub use query::TariffQuery;
pub use ranking::{keyword_position, rank};
pub use rate_parser::{count_dots, parse_tariff_value, NO_RATE};
pub use reducer::dedupe_by_code;
pub use repository::{PriceRecordRepository, TariffSearchProvider};
