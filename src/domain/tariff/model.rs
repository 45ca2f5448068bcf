//! Tariff domain entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything addressed by a dotted hierarchical code (e.g. `1704.90.35`).
pub trait Classified {
    /// The hierarchical code, or `None` when the record carries none.
    fn code(&self) -> Option<&str>;
}

/// Anything the relevance ranker can order.
pub trait Rankable {
    /// Text searched for the keyword (the leaf description).
    fn leaf_description(&self) -> &str;
    /// Free-text general duty rate.
    fn general_rate(&self) -> Option<&str>;
}

/// Tariff line as returned by the external search provider
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TariffRecord {
    /// Hierarchical code (`htsno` upstream); blank for heading rows
    #[serde(rename = "htsno", default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Unit of measure (e.g. "kg")
    #[serde(default)]
    pub units: Option<String>,
    /// General (column 1) rate text, e.g. "5.5¢/kg"
    #[serde(rename = "general", default)]
    pub general_rate: Option<String>,
    /// Special rate text, e.g. "Free (AU, SG)"
    #[serde(rename = "special", default)]
    pub special_rate: Option<String>,
}

impl TariffRecord {
    pub fn new(code: &str, description: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn with_rates(mut self, general: Option<&str>, special: Option<&str>) -> Self {
        self.general_rate = general.map(str::to_string);
        self.special_rate = special.map(str::to_string);
        self
    }
}

impl Classified for TariffRecord {
    fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Dated snapshot of one tariff line, unique per (code, fetch date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceRecord {
    pub hts_code: String,
    pub fetch_date: NaiveDate,
    #[serde(default)]
    pub general_rate: Option<String>,
    #[serde(default)]
    pub special_rate: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Category label the line was fetched under
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductPriceRecord {
    pub fn new(hts_code: &str, fetch_date: NaiveDate) -> Self {
        Self {
            hts_code: hts_code.to_string(),
            fetch_date,
            general_rate: None,
            special_rate: None,
            description: None,
            category: None,
        }
    }

    pub fn with_rates(mut self, general: Option<&str>, special: Option<&str>) -> Self {
        self.general_rate = general.map(str::to_string);
        self.special_rate = special.map(str::to_string);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

impl Classified for ProductPriceRecord {
    fn code(&self) -> Option<&str> {
        Some(self.hts_code.as_str()).filter(|c| !c.trim().is_empty())
    }
}

impl Rankable for ProductPriceRecord {
    fn leaf_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn general_rate(&self) -> Option<&str> {
        self.general_rate.as_deref()
    }
}

/// A search result enriched with its description chain and country rates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffEntry {
    pub record: TariffRecord,
    /// Resolved ancestor descriptions, root to leaf
    pub description_chain: Vec<String>,
    pub rates: super::CountryRates,
    /// Rate applying to the requested country, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicable_rate: Option<String>,
}

impl Classified for TariffEntry {
    fn code(&self) -> Option<&str> {
        self.record.code()
    }
}

impl Rankable for TariffEntry {
    fn leaf_description(&self) -> &str {
        self.description_chain.last().map(String::as_str).unwrap_or("")
    }

    fn general_rate(&self) -> Option<&str> {
        self.record.general_rate.as_deref()
    }
}
