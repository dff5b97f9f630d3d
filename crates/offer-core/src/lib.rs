//! # offer-core: Pure Pricing Engine for Implant Offers
//!
//! This crate is the **heart** of the offer calculator. It turns a catalog of
//! line items, currency parameters and a proposed selling price into a landed
//! cost, a margin, an acceptance decision and promotional unit counts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Implant Offer Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   implant-offer CLI                             │   │
//! │  │    --qty ──► --price ──► --unlock ──► human / JSON output       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    offer-session                                │   │
//! │  │    update_quantity, unlock_master_mode, get_offer, etc.         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ offer-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  pricing  │  │ validation│  │   │
//! │  │   │ LineItem  │  │  Catalog  │  │ landed    │  │  coerce   │  │   │
//! │  │   │ Pricing   │  │  defaults │  │ evaluate  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, PricingConfig, OfferResult, etc.)
//! - [`catalog`] - Ordered catalog and the default implant catalog
//! - [`pricing`] - Landed cost, margin tiers and offer evaluation
//! - [`validation`] - Boundary coercion and configuration checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog + config + price = same result
//! 2. **Total**: evaluation never fails on non-negative inputs
//! 3. **Coerce at the Boundary**: bad numeric input becomes 0 before it gets here
//!
//! ## Example Usage
//!
//! ```rust
//! use offer_core::catalog::Catalog;
//! use offer_core::pricing::evaluate_offer;
//! use offer_core::types::{OfferInput, PricingConfig};
//!
//! let mut catalog = Catalog::default_implant_catalog();
//! catalog.set_quantity("implantBody", 400.0).unwrap();
//!
//! let result = evaluate_offer(&catalog, &PricingConfig::default(), &OfferInput::new(500.0));
//!
//! assert!(result.accepted);
//! assert!((result.total_cost - 94_248.0).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{evaluate_offer, landed_cost, line_costs, min_margin_pct, total_landed_cost};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id of the principal billable unit in the default catalog.
///
/// Its quantity drives total-offer revenue and margin-tier selection.
pub const DEFAULT_DISTINGUISHED_ITEM_ID: &str = "implantBody";

/// Default EUR → SAR exchange rate.
pub const DEFAULT_EXCHANGE_RATE: f64 = 4.2;

/// Default shipping, customs and clearance surcharge (%).
pub const DEFAULT_SURCHARGE_PCT: f64 = 10.0;

/// Promotional price per distinguished unit used to derive bonus units.
pub const DEFAULT_REFERENCE_UNIT_PRICE: f64 = 950.0;

/// First quantity that selects the middle margin tier.
pub const DEFAULT_MID_TIER_FROM: f64 = 300.0;

/// First quantity that selects the high-volume margin tier.
pub const DEFAULT_HIGH_TIER_FROM: f64 = 500.0;

/// Default minimum margins (%) for the low, middle and high tiers.
pub const DEFAULT_MARGIN_TIERS_PCT: [f64; 3] = [35.0, 30.0, 25.0];
