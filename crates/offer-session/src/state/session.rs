//! # Offer Session State
//!
//! The snapshot of inputs the calculator works from: catalog, pricing
//! parameters, proposed selling price and master-mode flag.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so that writes are serialized.
//! Every command takes the lock, applies its write and re-evaluates the offer
//! before releasing it, so a reader never sees a half-applied update.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  User Action              Command                 Session Change        │
//! │  ───────────              ───────                 ──────────────        │
//! │                                                                         │
//! │  Type quantity ──────────► update_quantity() ───► catalog[id].qty = n  │
//! │                                                                         │
//! │  Type selling price ─────► update_selling_price ► input.price = p      │
//! │                                                                         │
//! │  Enter password ─────────► unlock_master_mode() ► unlocked = true      │
//! │                                                                         │
//! │  Edit cost (unlocked) ───► update_unit_cost() ──► catalog[id].cost = c │
//! │                                                                         │
//! │  View result ────────────► get_offer() ─────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Cost, rate, surcharge and tier writes require unlocked = true.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use offer_core::validation::non_negative;
use offer_core::{evaluate_offer, Catalog, MarginTier, OfferInput, OfferResult, PricingConfig};

use crate::error::ApiError;
use crate::state::AppConfig;

/// One user's working set of inputs.
///
/// ## Invariants
/// - Quantities, costs and pricing parameters are finite and ≥ 0
/// - Cost and pricing writes fail with `ACCESS_DENIED` while locked
#[derive(Debug, Clone)]
pub struct OfferSession {
    /// Session identifier (UUID v4)
    pub id: String,

    /// When the session was opened
    pub created_at: DateTime<Utc>,

    catalog: Catalog,
    pricing: PricingConfig,
    input: OfferInput,
    unlocked: bool,
}

impl OfferSession {
    /// Opens a locked session with a selling price of 0.
    pub fn new(catalog: Catalog, pricing: PricingConfig) -> Self {
        OfferSession {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            catalog,
            pricing,
            input: OfferInput::default(),
            unlocked: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn input(&self) -> &OfferInput {
        &self.input
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Evaluates the current snapshot.
    pub fn evaluate(&self) -> OfferResult {
        evaluate_offer(&self.catalog, &self.pricing, &self.input)
    }

    // =========================================================================
    // Master Mode
    // =========================================================================

    /// Unlocks master mode if `candidate` is the configured master password.
    pub fn unlock(&mut self, candidate: &str, config: &AppConfig) -> Result<(), ApiError> {
        if !config.password_matches(candidate) {
            warn!(session_id = %self.id, "Rejected master mode unlock attempt");
            return Err(ApiError::incorrect_password());
        }

        if !self.unlocked {
            info!(session_id = %self.id, "Master mode unlocked");
        }
        self.unlocked = true;
        Ok(())
    }

    /// Returns to the restricted view.
    pub fn lock(&mut self) {
        if self.unlocked {
            info!(session_id = %self.id, "Master mode locked");
        }
        self.unlocked = false;
    }

    fn require_unlocked(&self, operation: &str) -> Result<(), ApiError> {
        if self.unlocked {
            Ok(())
        } else {
            Err(ApiError::master_mode_required(operation))
        }
    }

    // =========================================================================
    // Unrestricted Writes
    // =========================================================================

    pub fn set_quantity(&mut self, id: &str, quantity: f64) -> Result<(), ApiError> {
        self.catalog.set_quantity(id, quantity)?;
        Ok(())
    }

    pub fn set_selling_price(&mut self, price: f64) {
        self.input.unit_selling_price = non_negative(price);
    }

    pub fn reset_quantities(&mut self) {
        self.catalog.reset_quantities();
    }

    // =========================================================================
    // Master-Only Writes
    // =========================================================================

    pub fn set_unit_cost(&mut self, id: &str, unit_cost: f64) -> Result<(), ApiError> {
        self.require_unlocked("edit unit costs")?;
        self.catalog.set_unit_cost(id, unit_cost)?;
        Ok(())
    }

    pub fn set_exchange_rate(&mut self, rate: f64) -> Result<(), ApiError> {
        self.require_unlocked("edit the exchange rate")?;
        self.pricing.exchange_rate = non_negative(rate);
        Ok(())
    }

    pub fn set_surcharge(&mut self, pct: f64) -> Result<(), ApiError> {
        self.require_unlocked("edit the surcharge")?;
        self.pricing.surcharge_pct = non_negative(pct);
        Ok(())
    }

    pub fn set_margin_tier(&mut self, tier: MarginTier, pct: f64) -> Result<(), ApiError> {
        self.require_unlocked("edit margin tiers")?;
        self.pricing.margin_tiers.set_pct(tier, non_negative(pct));
        Ok(())
    }

    /// Replaces the catalog and pricing parameters wholesale.
    pub fn replace_catalog(
        &mut self,
        catalog: Catalog,
        pricing: PricingConfig,
    ) -> Result<(), ApiError> {
        self.require_unlocked("import a catalog")?;
        self.catalog = catalog;
        self.pricing = pricing;
        Ok(())
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// Shared, lock-protected session handle.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<OfferSession>>,
}

impl SessionState {
    pub fn new(session: OfferSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let result = state.with_session(|s| s.evaluate());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OfferSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_session_mut(|s| s.set_quantity("implantBody", 400.0))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OfferSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(OfferSession::new(
            Catalog::default_implant_catalog(),
            PricingConfig::default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn session() -> OfferSession {
        OfferSession::new(Catalog::default_implant_catalog(), PricingConfig::default())
    }

    #[test]
    fn test_new_session_is_locked_and_empty() {
        let s = session();
        assert!(!s.is_unlocked());
        assert_eq!(s.input().unit_selling_price, 0.0);
        assert_eq!(s.catalog().len(), 18);
        assert!(Uuid::parse_str(&s.id).is_ok());
    }

    #[test]
    fn test_unlock_with_wrong_password() {
        let mut s = session();
        let err = s.unlock("guess", &AppConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccessDenied);
        assert_eq!(err.message, "Incorrect password. Please try again.");
        assert!(!s.is_unlocked());
    }

    #[test]
    fn test_unlock_and_lock() {
        let mut s = session();
        s.unlock("admin", &AppConfig::default()).unwrap();
        assert!(s.is_unlocked());
        s.lock();
        assert!(!s.is_unlocked());
    }

    #[test]
    fn test_unlock_uses_configured_password() {
        let mut config = AppConfig::default();
        config.access.master_password = "clinic".to_string();

        let mut s = session();
        assert!(s.unlock("admin", &config).is_err());
        assert!(!s.is_unlocked());

        s.unlock("clinic", &config).unwrap();
        assert!(s.is_unlocked());
    }

    #[test]
    fn test_cost_writes_require_master_mode() {
        let mut s = session();

        let err = s.set_unit_cost("implantBody", 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::AccessDenied);
        assert!(s.set_exchange_rate(5.0).is_err());
        assert!(s.set_surcharge(0.0).is_err());
        assert!(s.set_margin_tier(MarginTier::Base, 10.0).is_err());
        assert_eq!(s.pricing(), &PricingConfig::default());

        s.unlock("admin", &AppConfig::default()).unwrap();
        s.set_unit_cost("implantBody", 48.0).unwrap();
        s.set_exchange_rate(4.0).unwrap();
        s.set_margin_tier(MarginTier::High, 20.0).unwrap();

        assert_eq!(s.catalog().get("implantBody").unwrap().unit_cost, 48.0);
        assert_eq!(s.pricing().exchange_rate, 4.0);
        assert_eq!(s.pricing().margin_tiers.tier_500_plus, 20.0);
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let mut s = session();
        let err = s.set_quantity("nope", 1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_negative_price_clamps_to_zero() {
        let mut s = session();
        s.set_selling_price(-10.0);
        assert_eq!(s.input().unit_selling_price, 0.0);
    }

    #[test]
    fn test_state_round_trip() {
        let state = SessionState::default();
        state
            .with_session_mut(|s| s.set_quantity("implantBody", 400.0))
            .unwrap();
        state.with_session_mut(|s| s.set_selling_price(500.0));

        let result = state.with_session(|s| s.evaluate());
        assert_eq!(result.total_offer, 200_000.0);
        assert!(result.accepted);
    }
}
