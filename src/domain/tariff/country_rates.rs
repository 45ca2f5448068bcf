//! Country-rate extraction from special-rate text
//!
//! Special rates arrive as `<rate> (<code>, <code>, ...)`, e.g.
//! `Free (A+, AU, BH, SG)`. Entries that are not ISO country codes (trade
//! program indicators such as `A+`, or garbage) are dropped without error.

use serde::Serialize;

use crate::domain::country::{normalize_code, CountryRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialCountry {
    pub code: String,
    pub name: String,
}

/// General-vs-special rate split for one tariff line
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CountryRates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_countries: Option<Vec<SpecialCountry>>,
}

impl CountryRates {
    /// Rate applying to `country`: the special rate when the country is
    /// enumerated, otherwise the general rate.
    pub fn rate_for(&self, country: &str) -> Option<&str> {
        let code = normalize_code(country);
        let is_special = self
            .special_countries
            .as_ref()
            .is_some_and(|countries| countries.iter().any(|c| c.code == code));

        if is_special {
            if let Some(rate) = self.special_rate.as_deref() {
                return Some(rate);
            }
        }
        self.general_rate.as_deref()
    }

    pub fn special_country_names(&self) -> Vec<&str> {
        self.special_countries
            .iter()
            .flatten()
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Split rate texts into general rate, special rate and special countries.
pub fn extract_country_rates(
    general: Option<&str>,
    special: Option<&str>,
    registry: &dyn CountryRegistry,
) -> CountryRates {
    let mut rates = CountryRates {
        general_rate: general
            .filter(|g| !g.trim().is_empty())
            .map(str::to_string),
        ..Default::default()
    };

    let Some((rate, list)) = special.and_then(split_special) else {
        return rates;
    };

    let countries = list
        .split(',')
        .map(str::trim)
        .filter_map(|candidate| {
            let name = registry.display_name(candidate)?;
            Some(SpecialCountry {
                code: normalize_code(candidate),
                name: name.to_string(),
            })
        })
        .collect();

    rates.special_rate = Some(rate.to_string());
    rates.special_countries = Some(countries);
    rates
}

/// `"Free (AU, SG)"` → `("Free", "AU, SG")`; `None` without a `( ... )` block.
///
/// The block runs from the first `(` to the first `)` after it. A stray `)`
/// before the `(` stays in the rate text.
fn split_special(text: &str) -> Option<(&str, &str)> {
    if text.trim().is_empty() {
        return None;
    }
    let open = text.find('(')?;
    let close = open + text[open..].find(')')?;
    Some((text[..open].trim(), &text[open + 1..close]))
}
