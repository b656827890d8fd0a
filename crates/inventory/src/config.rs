//! Store configuration.

use std::path::{Path, PathBuf};

/// Quantity at or below which a product counts as low stock.
pub const DEFAULT_LOW_ALERT_THRESHOLD: u64 = 2;

/// Where the inventory document lives when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/inventory.json";

/// Explicit configuration for an [`InventoryStore`](crate::InventoryStore).
///
/// Both values are fixed at construction; the store never consults ambient
/// state for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub low_alert_threshold: u64,
    pub data_path: PathBuf,
}

impl StoreConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            low_alert_threshold: DEFAULT_LOW_ALERT_THRESHOLD,
            data_path: data_path.into(),
        }
    }

    pub fn with_low_alert_threshold(mut self, threshold: u64) -> Self {
        self.low_alert_threshold = threshold;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}
