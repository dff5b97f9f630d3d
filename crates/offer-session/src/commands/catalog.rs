//! # Catalog Commands
//!
//! Catalog listing, plus snapshot export and import for master mode.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use offer_core::{LineItem, PricingConfig};

use crate::commands::offer::OfferView;
use crate::error::ApiError;
use crate::snapshot::CatalogSnapshot;
use crate::state::{OfferSession, SessionState};

/// One catalog row. `unit_cost` is withheld while master mode is locked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryView {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub is_local_currency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
}

/// Catalog listing. `pricing` is present only in master mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub unlocked: bool,
    pub items: Vec<CatalogEntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingConfig>,
}

impl CatalogEntryView {
    fn new(item: &LineItem, unlocked: bool) -> Self {
        CatalogEntryView {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            is_local_currency: item.is_local_currency,
            unit_cost: unlocked.then_some(item.unit_cost),
        }
    }
}

impl From<&OfferSession> for CatalogView {
    fn from(session: &OfferSession) -> Self {
        let unlocked = session.is_unlocked();
        CatalogView {
            unlocked,
            items: session
                .catalog()
                .iter()
                .map(|item| CatalogEntryView::new(item, unlocked))
                .collect(),
            pricing: unlocked.then(|| session.pricing().clone()),
        }
    }
}

/// Lists catalog items in display order.
pub fn get_catalog(state: &SessionState) -> CatalogView {
    debug!("get_catalog command");
    state.with_session(|s| CatalogView::from(s))
}

/// Writes the catalog and pricing parameters to a JSON file.
///
/// ## Errors
/// - `ACCESS_DENIED` while locked
/// - `SNAPSHOT_ERROR` if the file cannot be written
pub fn export_catalog(state: &SessionState, path: &Path) -> Result<(), ApiError> {
    debug!(?path, "export_catalog command");

    let snapshot = state.with_session(|s| {
        if !s.is_unlocked() {
            return Err(ApiError::master_mode_required("export the catalog"));
        }
        Ok(CatalogSnapshot::new(s.catalog(), s.pricing()))
    })?;

    snapshot.save(path)?;
    Ok(())
}

/// Replaces the catalog and pricing parameters from a JSON file.
///
/// The file is read and validated before the session is touched, so a bad
/// file leaves the session unchanged.
pub fn import_catalog(state: &SessionState, path: &Path) -> Result<OfferView, ApiError> {
    debug!(?path, "import_catalog command");

    if !state.with_session(|s| s.is_unlocked()) {
        return Err(ApiError::master_mode_required("import a catalog"));
    }

    let (catalog, pricing) = CatalogSnapshot::load(path)?.into_parts()?;
    let items = catalog.len();

    let view = state.with_session_mut(|s| {
        s.replace_catalog(catalog, pricing)?;
        Ok::<_, ApiError>(OfferView::from(&*s))
    })?;

    info!(items, "Catalog imported");
    Ok(view)
}
