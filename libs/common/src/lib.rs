//! Common library for the Lifeblood client
//!
//! This crate provides shared functionality used by the API client, the
//! session store and the command-line front end: configuration loading,
//! key-value storage backends and their error types.
//!
//! ```rust,no_run
//! use common::{ClientConfig, FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load()?;
//!     let store = FileStore::open(&config.storage_path)?;
//!     println!("Token present: {}", store.contains("token")?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod storage;

pub use crate::config::ClientConfig;
pub use crate::error::{ConfigError, StorageError, StorageResult};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
