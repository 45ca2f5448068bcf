//! Point-in-time and per-country rate resolution over dated price records

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::country_rates::{extract_country_rates, CountryRates};
use super::model::ProductPriceRecord;
use crate::domain::country::CountryRegistry;

pub fn country_rates_of(record: &ProductPriceRecord, registry: &dyn CountryRegistry) -> CountryRates {
    extract_country_rates(
        record.general_rate.as_deref(),
        record.special_rate.as_deref(),
        registry,
    )
}

/// Rate applying to `country` on the record's own date.
pub fn select_price_for_country(
    record: &ProductPriceRecord,
    country: &str,
    registry: &dyn CountryRegistry,
) -> Option<String> {
    country_rates_of(record, registry)
        .rate_for(country)
        .map(str::to_string)
}

/// Rate applying to `country` for every dated record, keyed by fetch date.
///
/// Each date is resolved on its own. Dates with no applicable rate are left
/// out rather than filled with a placeholder.
pub fn historical_prices(
    records: &[ProductPriceRecord],
    country: &str,
    registry: &dyn CountryRegistry,
) -> BTreeMap<NaiveDate, String> {
    records
        .iter()
        .filter_map(|record| {
            select_price_for_country(record, country, registry)
                .map(|rate| (record.fetch_date, rate))
        })
        .collect()
}

/// Dense country → rate map for one record.
///
/// Enumerated countries get the special rate, every other recognized country
/// the general rate. With no general rate only the special countries appear.
pub fn map_country_to_price(
    record: &ProductPriceRecord,
    registry: &dyn CountryRegistry,
) -> BTreeMap<String, String> {
    let rates = country_rates_of(record, registry);
    registry
        .codes()
        .into_iter()
        .filter_map(|code| rates.rate_for(code).map(|rate| (code.to_string(), rate.to_string())))
        .collect()
}
