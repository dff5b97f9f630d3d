//! # Catalog Snapshots
//!
//! Exports and imports the catalog together with its pricing parameters as
//! one JSON document, so a cost setup can be moved between machines.
//!
//! ## File Format
//! ```json
//! {
//!   "pricing": {
//!     "exchangeRate": 4.2,
//!     "surchargePct": 10.0,
//!     "marginTiers": { "tier0_299": 35.0, "tier300_499": 30.0, "tier500Plus": 25.0,
//!                      "midFrom": 300.0, "highFrom": 500.0 },
//!     "referenceUnitPrice": 950.0,
//!     "distinguishedItemId": "implantBody"
//!   },
//!   "items": [
//!     { "id": "implantBody", "name": "Implant Body", "quantity": 0,
//!       "unitCost": 51.0, "isLocalCurrency": false }
//!   ]
//! }
//! ```
//!
//! A snapshot is checked on import: item ids must be unique and the pricing
//! parameters must pass the same validation as `config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use offer_core::validation::validate_pricing_config;
use offer_core::{Catalog, CoreError, LineItem, PricingConfig};

/// Snapshot read/write failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CoreError),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Serializable catalog plus pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub pricing: PricingConfig,
    pub items: Vec<LineItem>,
}

impl CatalogSnapshot {
    pub fn new(catalog: &Catalog, pricing: &PricingConfig) -> Self {
        CatalogSnapshot {
            pricing: pricing.clone(),
            items: catalog.items().to_vec(),
        }
    }

    /// Validates the snapshot and splits it into engine inputs.
    pub fn into_parts(self) -> SnapshotResult<(Catalog, PricingConfig)> {
        validate_pricing_config(&self.pricing).map_err(CoreError::from)?;
        let catalog = Catalog::new(self.items)?;
        Ok((catalog, self.pricing))
    }

    /// Reads a snapshot file without validating it.
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&contents)?;
        info!(?path, items = snapshot.items.len(), "Catalog snapshot loaded");
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SnapshotResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        info!(?path, items = self.items.len(), "Catalog snapshot saved");
        Ok(())
    }
}
