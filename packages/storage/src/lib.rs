// ABOUTME: Persistence for the Taxify profile, income book and alerts
// ABOUTME: Whole-document JSON storage under fixed keys in the local data directory

pub mod blob;
pub mod db;
pub mod error;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use db::{
    SchemaMeta, TaxifyDb, ALERTS_KEY, CURRENT_SCHEMA_VERSION, INCOMES_KEY, META_KEY, PROFILE_KEY,
};
pub use error::{StorageError, StorageResult};

/// Database backed by files in `data_dir`
pub fn open_file_db(data_dir: impl Into<std::path::PathBuf>) -> TaxifyDb<FileBlobStore> {
    TaxifyDb::new(FileBlobStore::new(data_dir))
}
