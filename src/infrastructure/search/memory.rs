//! In-memory tariff search over a loaded catalog

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::domain::tariff::{TariffRecord, TariffSearchProvider};
use crate::domain::DomainResult;
use crate::shared::errors::InfraError;

/// Searches a fixed catalog of tariff records.
///
/// A record matches when its code starts with the query or its description
/// contains the query (case-insensitive). Catalog order is preserved.
pub struct InMemorySearchProvider {
    records: Vec<TariffRecord>,
}

impl InMemorySearchProvider {
    pub fn new(records: Vec<TariffRecord>) -> Self {
        Self { records }
    }

    /// Load a catalog from a JSON array of tariff records.
    pub async fn from_json_file(path: &Path) -> Result<Self, InfraError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let records: Vec<TariffRecord> = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            records = records.len(),
            "Tariff catalog loaded"
        );
        Ok(Self::new(records))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TariffSearchProvider for InMemorySearchProvider {
    async fn search(&self, query: &str) -> DomainResult<Vec<TariffRecord>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        Ok(self
            .records
            .iter()
            .filter(|record| {
                record
                    .code
                    .as_deref()
                    .is_some_and(|code| code.starts_with(query))
                    || record.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> InMemorySearchProvider {
        InMemorySearchProvider::new(vec![
            TariffRecord::new("1704", "Sugar confectionery"),
            TariffRecord::new("1704.10", "Chewing gum"),
            TariffRecord::new("1806", "Chocolate containing cocoa"),
        ])
    }

    #[tokio::test]
    async fn matches_code_prefix() {
        let found = provider().search("1704").await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn matches_description_case_insensitively() {
        let found = provider().search("COCOA").await.unwrap();
        assert_eq!(found[0].code.as_deref(), Some("1806"));
    }

    #[tokio::test]
    async fn blank_query_finds_nothing() {
        assert!(provider().search("  ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_catalog_from_json() {
        let path = std::env::temp_dir().join(format!(
            "tariff-catalog-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"htsno": "1704", "description": "Sugar", "general": "", "special": ""}]"#,
        )
        .unwrap();

        let provider = InMemorySearchProvider::from_json_file(&path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!provider.is_empty());
        assert_eq!(provider.search("sugar").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_catalog_is_an_io_error() {
        let result = InMemorySearchProvider::from_json_file(Path::new("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(InfraError::Io(_))));
    }
}
