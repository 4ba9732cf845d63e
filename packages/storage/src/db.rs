// ABOUTME: Profile, income book and alert persistence on top of a BlobStore
// ABOUTME: Every mutation reads the whole document, changes it and writes it back

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taxify_core::{Alert, Income, UserProfile};
use tracing::{debug, error, info};

use crate::blob::BlobStore;
use crate::error::{StorageError, StorageResult};

pub const PROFILE_KEY: &str = "taxify_profile";
pub const INCOMES_KEY: &str = "taxify_incomes";
pub const ALERTS_KEY: &str = "taxify_alerts";
pub const META_KEY: &str = "taxify_meta";

/// Version of the stored document layout.
/// Data written before the meta document existed counts as version 1.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMeta {
    pub schema_version: u32,
}

/// Typed access to the Taxify documents.
///
/// Reads hand out owned snapshots; nothing is cached between calls.
pub struct TaxifyDb<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> TaxifyDb<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn schema_version(&self) -> StorageResult<u32> {
        match self.store.get(META_KEY).await? {
            Some(raw) => {
                let meta: SchemaMeta = parse_document(META_KEY, &raw)?;
                Ok(meta.schema_version)
            }
            None => Ok(1),
        }
    }

    async fn ensure_supported_schema(&self) -> StorageResult<()> {
        let found = self.schema_version().await?;
        if found > CURRENT_SCHEMA_VERSION {
            error!(
                "Stored schema version {} is newer than supported {}",
                found, CURRENT_SCHEMA_VERSION
            );
            return Err(StorageError::UnsupportedSchema {
                found,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    async fn read_document<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        self.ensure_supported_schema().await?;
        match self.store.get(key).await? {
            Some(raw) => parse_document(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    async fn write_document<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        self.ensure_supported_schema().await?;
        let meta = SchemaMeta {
            schema_version: CURRENT_SCHEMA_VERSION,
        };
        self.store.set(META_KEY, &serde_json::to_string(&meta)?).await?;

        let json = serde_json::to_string_pretty(value)?;
        self.store.set(key, &json).await
    }

    /// Stored profile, or the default shell profile when none exists yet
    pub async fn get_profile(&self) -> StorageResult<UserProfile> {
        Ok(self.read_document(PROFILE_KEY).await?.unwrap_or_default())
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        debug!("Saving profile for {:?}", profile.email);
        self.write_document(PROFILE_KEY, profile).await
    }

    /// Deletes the profile document (logout). Incomes are left untouched.
    pub async fn clear_profile(&self) -> StorageResult<()> {
        info!("Clearing stored profile");
        self.store.remove(PROFILE_KEY).await
    }

    /// All incomes, newest first
    pub async fn get_incomes(&self) -> StorageResult<Vec<Income>> {
        Ok(self.read_document(INCOMES_KEY).await?.unwrap_or_default())
    }

    /// Prepends an income to the book
    pub async fn add_income(&self, income: Income) -> StorageResult<()> {
        let mut incomes = self.get_incomes().await?;
        if incomes.iter().any(|i| i.id == income.id) {
            return Err(StorageError::DuplicateId(income.id));
        }
        debug!("Adding income {} ({} {})", income.id, income.amount, income.currency);
        incomes.insert(0, income);
        self.write_document(INCOMES_KEY, &incomes).await
    }

    /// Removes the income with `id`. Returns false, without writing, when no
    /// such income exists.
    pub async fn delete_income(&self, id: &str) -> StorageResult<bool> {
        let incomes = self.get_incomes().await?;
        let before = incomes.len();
        let remaining: Vec<Income> = incomes.into_iter().filter(|i| i.id != id).collect();

        if remaining.len() == before {
            debug!("Income {} not found, nothing to delete", id);
            return Ok(false);
        }

        self.write_document(INCOMES_KEY, &remaining).await?;
        info!("Deleted income {}", id);
        Ok(true)
    }

    pub async fn get_alerts(&self) -> StorageResult<Vec<Alert>> {
        Ok(self.read_document(ALERTS_KEY).await?.unwrap_or_default())
    }
}

fn parse_document<T: DeserializeOwned>(key: &str, raw: &str) -> StorageResult<T> {
    serde_json::from_str(raw).map_err(|e| {
        error!("Failed to parse stored document '{}': {}", key, e);
        StorageError::Corrupted {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use taxify_core::{Currency, FopGroup, IncomeSource};

    fn income(id: &str) -> Income {
        Income {
            id: id.to_string(),
            amount: dec!(100),
            currency: Currency::Uah,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            description: format!("income {id}"),
            source: IncomeSource::Manual,
            original_document_url: None,
        }
    }

    fn db() -> TaxifyDb<MemoryBlobStore> {
        TaxifyDb::new(MemoryBlobStore::new())
    }

    #[tokio::test]
    async fn test_default_profile_when_empty() {
        let db = db();
        assert_eq!(db.get_profile().await.unwrap(), UserProfile::default());
        assert!(db.get_incomes().await.unwrap().is_empty());
        assert!(db.get_alerts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_clear_profile() {
        let db = db();
        let profile = UserProfile {
            name: "Тарас".to_string(),
            email: Some("taras@example.com".to_string()),
            group: FopGroup::Group2,
            ..UserProfile::default()
        };
        db.save_profile(&profile).await.unwrap();
        assert_eq!(db.get_profile().await.unwrap(), profile);

        db.clear_profile().await.unwrap();
        assert_eq!(db.get_profile().await.unwrap(), UserProfile::default());
    }

    #[tokio::test]
    async fn test_incomes_newest_first() {
        let db = db();
        db.add_income(income("a")).await.unwrap();
        db.add_income(income("b")).await.unwrap();
        db.add_income(income("c")).await.unwrap();

        let ids: Vec<String> = db.get_incomes().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = db();
        db.add_income(income("a")).await.unwrap();
        let result = db.add_income(income("a")).await;
        assert!(matches!(result, Err(StorageError::DuplicateId(id)) if id == "a"));
        assert_eq!(db.get_incomes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_income() {
        let db = db();
        db.add_income(income("a")).await.unwrap();
        db.add_income(income("b")).await.unwrap();

        assert!(db.delete_income("a").await.unwrap());
        let incomes = db.get_incomes().await.unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].id, "b");
    }

    #[tokio::test]
    async fn test_delete_unknown_income_is_noop() {
        let db = db();
        db.add_income(income("a")).await.unwrap();
        let before = db.store().get(INCOMES_KEY).await.unwrap();

        assert!(!db.delete_income("missing").await.unwrap());

        assert_eq!(db.store().get(INCOMES_KEY).await.unwrap(), before);
        assert_eq!(db.get_incomes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_document_is_reported() {
        let db = db();
        db.store().set(INCOMES_KEY, "[{not json").await.unwrap();

        let result = db.get_incomes().await;
        assert!(matches!(result, Err(StorageError::Corrupted { key, .. }) if key == INCOMES_KEY));

        // Must not silently overwrite the corrupted book
        assert!(db.add_income(income("x")).await.is_err());
        assert_eq!(
            db.store().get(INCOMES_KEY).await.unwrap().as_deref(),
            Some("[{not json")
        );
    }

    #[tokio::test]
    async fn test_schema_meta_written_on_first_save() {
        let db = db();
        assert_eq!(db.schema_version().await.unwrap(), 1);
        assert!(db.store().get(META_KEY).await.unwrap().is_none());

        db.save_profile(&UserProfile::default()).await.unwrap();

        let raw = db.store().get(META_KEY).await.unwrap().unwrap();
        let meta: SchemaMeta = serde_json::from_str(&raw).unwrap();
        assert_eq!(meta.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_newer_schema_rejected() {
        let db = db();
        db.store()
            .set(META_KEY, r#"{"schemaVersion":99}"#)
            .await
            .unwrap();

        assert!(matches!(
            db.get_profile().await,
            Err(StorageError::UnsupportedSchema { found: 99, .. })
        ));
        assert!(matches!(
            db.add_income(income("a")).await,
            Err(StorageError::UnsupportedSchema { .. })
        ));
    }

    #[tokio::test]
    async fn test_legacy_documents_without_meta() {
        let db = db();
        db.store()
            .set(
                INCOMES_KEY,
                r#"[{"id":"old","amount":250.5,"currency":"EUR","date":"2025-12-31","source":"manual"}]"#,
            )
            .await
            .unwrap();

        let incomes = db.get_incomes().await.unwrap();
        assert_eq!(incomes[0].amount, dec!(250.5));
        assert_eq!(incomes[0].description, "");
    }
}
