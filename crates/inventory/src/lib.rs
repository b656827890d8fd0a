//! Inventory domain module.
//!
//! This crate holds the product entity, the keyed inventory store with its
//! query/mutation operations, the valuation report, and the JSON persistence
//! boundary. It performs no console IO and no text formatting.

pub mod config;
pub mod persistence;
pub mod product;
pub mod report;
pub mod store;

pub use config::{DEFAULT_DATA_PATH, DEFAULT_LOW_ALERT_THRESHOLD, StoreConfig};
pub use persistence::{Items, PersistenceError};
pub use product::Product;
pub use report::{InventoryReport, ReportRow, StockStatus};
pub use store::{InventoryStore, KeywordMatches};
