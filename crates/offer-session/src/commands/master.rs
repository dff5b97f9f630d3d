//! # Master Mode Commands
//!
//! Unlocking, and the cost-side writes that unlocking permits.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐  unlock_master_mode(pw)   ┌──────────┐                    │
//! │  │  Locked  │ ─────────────────────────►│ Unlocked │                    │
//! │  │          │◄───────────────────────── │          │                    │
//! │  └──────────┘    lock_master_mode()     └──────────┘                    │
//! │       │                                      │                          │
//! │  update_unit_cost ──► ACCESS_DENIED     update_unit_cost                │
//! │  update_exchange_rate                   update_exchange_rate            │
//! │  update_surcharge                       update_surcharge                │
//! │  update_margin_tier                     update_margin_tier              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use offer_core::validation::coerce_number;
use offer_core::MarginTier;

use crate::commands::offer::OfferView;
use crate::error::ApiError;
use crate::state::{AppConfig, SessionState};

/// Unlocks master mode.
///
/// ## Errors
/// `ACCESS_DENIED` with "Incorrect password. Please try again." when the
/// password does not match `[access] master_password`.
pub fn unlock_master_mode(
    state: &SessionState,
    config: &AppConfig,
    password: &str,
) -> Result<OfferView, ApiError> {
    debug!("unlock_master_mode command");

    state.with_session_mut(|s| {
        s.unlock(password, config)?;
        Ok(OfferView::from(&*s))
    })
}

/// Returns to the restricted view.
pub fn lock_master_mode(state: &SessionState) -> OfferView {
    debug!("lock_master_mode command");

    state.with_session_mut(|s| {
        s.lock();
        OfferView::from(&*s)
    })
}

/// Sets an item's ex-factory unit cost from raw input.
pub fn update_unit_cost(
    state: &SessionState,
    item_id: &str,
    raw: &str,
) -> Result<OfferView, ApiError> {
    let unit_cost = coerce_number(raw);
    debug!(item_id = %item_id, unit_cost, "update_unit_cost command");

    state.with_session_mut(|s| {
        s.set_unit_cost(item_id, unit_cost)?;
        Ok(OfferView::from(&*s))
    })
}

/// Sets the foreign-to-settlement exchange rate from raw input.
pub fn update_exchange_rate(state: &SessionState, raw: &str) -> Result<OfferView, ApiError> {
    let rate = coerce_number(raw);
    debug!(rate, "update_exchange_rate command");

    state.with_session_mut(|s| {
        s.set_exchange_rate(rate)?;
        Ok(OfferView::from(&*s))
    })
}

/// Sets the import surcharge percentage from raw input.
pub fn update_surcharge(state: &SessionState, raw: &str) -> Result<OfferView, ApiError> {
    let pct = coerce_number(raw);
    debug!(pct, "update_surcharge command");

    state.with_session_mut(|s| {
        s.set_surcharge(pct)?;
        Ok(OfferView::from(&*s))
    })
}

/// Sets one band's minimum margin percentage from raw input.
pub fn update_margin_tier(
    state: &SessionState,
    tier: MarginTier,
    raw: &str,
) -> Result<OfferView, ApiError> {
    let pct = coerce_number(raw);
    debug!(%tier, pct, "update_margin_tier command");

    state.with_session_mut(|s| {
        s.set_margin_tier(tier, pct)?;
        Ok(OfferView::from(&*s))
    })
}
