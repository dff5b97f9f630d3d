//! # Domain Types
//!
//! Core domain types for offer evaluation.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  PricingConfig  │   │   OfferInput    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  exchange_rate  │   │  unit_selling_  │       │
//! │  │  name           │   │  surcharge_pct  │   │    price        │       │
//! │  │  quantity       │   │  margin_tiers   │   └─────────────────┘       │
//! │  │  unit_cost      │   │  reference_     │                              │
//! │  │  is_local_      │   │    unit_price   │   ┌─────────────────┐       │
//! │  │    currency     │   │  distinguished_ │   │   OfferResult   │       │
//! │  └─────────────────┘   │    item_id      │   │  totals, margin │       │
//! │                        └─────────────────┘   │  accepted, promo│       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Number Representation
//! Amounts are `f64`. Landed costs are products of an exchange rate and a
//! surcharge factor, and promotional unit counts are fractional by nature
//! (200 000 / 950 = 210.53 units), so there is no integer minor unit to
//! anchor on. Rounding only happens when a value is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{
    DEFAULT_DISTINGUISHED_ITEM_ID, DEFAULT_EXCHANGE_RATE, DEFAULT_HIGH_TIER_FROM,
    DEFAULT_MARGIN_TIERS_PCT, DEFAULT_MID_TIER_FROM, DEFAULT_REFERENCE_UNIT_PRICE,
    DEFAULT_SURCHARGE_PCT,
};

// =============================================================================
// Line Item
// =============================================================================

/// A priceable line in the offer (implant body, abutment, course, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Stable identifier, unique within a catalog.
    pub id: String,

    /// Display label. Not used in any computation.
    pub name: String,

    /// Units in the offer. Fractional values are allowed.
    #[serde(default)]
    pub quantity: f64,

    /// Ex-factory cost per unit, in the foreign reference currency unless
    /// `is_local_currency` is set.
    pub unit_cost: f64,

    /// Cost is already in the settlement currency; skip conversion.
    #[serde(default)]
    pub is_local_currency: bool,
}

impl LineItem {
    /// Creates an item whose cost is quoted in the foreign currency.
    pub fn foreign(id: impl Into<String>, name: impl Into<String>, unit_cost: f64) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            quantity: 0.0,
            unit_cost,
            is_local_currency: false,
        }
    }

    /// Creates an item whose cost is already in the settlement currency.
    pub fn local(id: impl Into<String>, name: impl Into<String>, unit_cost: f64) -> Self {
        LineItem {
            is_local_currency: true,
            ..LineItem::foreign(id, name, unit_cost)
        }
    }

    /// Returns the item with the given quantity.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }
}

// =============================================================================
// Margin Tiers
// =============================================================================

/// Which quantity band a distinguished quantity falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MarginTier {
    /// `[0, mid_from)`
    Base,
    /// `[mid_from, high_from)`
    Mid,
    /// `[high_from, ∞)`
    High,
}

impl fmt::Display for MarginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginTier::Base => write!(f, "base"),
            MarginTier::Mid => write!(f, "mid"),
            MarginTier::High => write!(f, "high"),
        }
    }
}

/// Quantity-banded minimum margin percentages.
///
/// ## Boundaries
/// ```text
///   0 ──────────── 300 ──────────── 500 ──────────────►
///   │  tier0_299    │  tier300_499   │  tier500Plus
///   │  (35%)        │  (30%)         │  (25%)
///                   ▲                ▲
///            inclusive lower bound of the higher tier
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct MarginTiers {
    /// Minimum margin (%) below `mid_from`.
    #[serde(rename = "tier0_299")]
    pub tier_0_299: f64,

    /// Minimum margin (%) from `mid_from` up to `high_from`.
    #[serde(rename = "tier300_499")]
    pub tier_300_499: f64,

    /// Minimum margin (%) from `high_from` upward.
    #[serde(rename = "tier500Plus")]
    pub tier_500_plus: f64,

    /// First quantity of the middle band.
    pub mid_from: f64,

    /// First quantity of the high band.
    pub high_from: f64,
}

impl MarginTiers {
    /// Returns the configured percentage for a band.
    pub fn pct(&self, tier: MarginTier) -> f64 {
        match tier {
            MarginTier::Base => self.tier_0_299,
            MarginTier::Mid => self.tier_300_499,
            MarginTier::High => self.tier_500_plus,
        }
    }

    /// Sets the percentage for a band.
    pub fn set_pct(&mut self, tier: MarginTier, pct: f64) {
        match tier {
            MarginTier::Base => self.tier_0_299 = pct,
            MarginTier::Mid => self.tier_300_499 = pct,
            MarginTier::High => self.tier_500_plus = pct,
        }
    }
}

impl Default for MarginTiers {
    fn default() -> Self {
        let [base, mid, high] = DEFAULT_MARGIN_TIERS_PCT;
        MarginTiers {
            tier_0_299: base,
            tier_300_499: mid,
            tier_500_plus: high,
            mid_from: DEFAULT_MID_TIER_FROM,
            high_from: DEFAULT_HIGH_TIER_FROM,
        }
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Currency and margin parameters for an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    /// Foreign → settlement currency rate (EUR → SAR).
    pub exchange_rate: f64,

    /// Shipping, customs and clearance surcharge (%) on foreign costs.
    pub surcharge_pct: f64,

    /// Minimum margin per quantity band.
    pub margin_tiers: MarginTiers,

    /// Promotional unit price used to derive bonus units.
    pub reference_unit_price: f64,

    /// Id of the item whose quantity drives revenue and tier selection.
    pub distinguished_item_id: String,
}

impl PricingConfig {
    /// Multiplier applied after currency conversion (`1 + surcharge/100`).
    #[inline]
    pub fn surcharge_factor(&self) -> f64 {
        1.0 + self.surcharge_pct / 100.0
    }
}

impl Default for PricingConfig {
    /// Returns the defaults the calculator ships with.
    ///
    /// ## Default Values
    /// - Exchange rate: 4.2 SAR per EUR
    /// - Surcharge: 10%
    /// - Margin tiers: 35 / 30 / 25 %, boundaries 300 / 500
    /// - Reference unit price: 950
    /// - Distinguished item: `implantBody`
    fn default() -> Self {
        PricingConfig {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            surcharge_pct: DEFAULT_SURCHARGE_PCT,
            margin_tiers: MarginTiers::default(),
            reference_unit_price: DEFAULT_REFERENCE_UNIT_PRICE,
            distinguished_item_id: DEFAULT_DISTINGUISHED_ITEM_ID.to_string(),
        }
    }
}

// =============================================================================
// Offer Input
// =============================================================================

/// The proposed price the caller wants to evaluate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OfferInput {
    /// Settlement-currency price per distinguished unit.
    pub unit_selling_price: f64,
}

impl OfferInput {
    #[inline]
    pub const fn new(unit_selling_price: f64) -> Self {
        OfferInput { unit_selling_price }
    }
}

// =============================================================================
// Offer Result
// =============================================================================

/// Outcome of an acceptance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Accepted,
    NotAccepted,
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferStatus::Accepted => write!(f, "Accepted"),
            OfferStatus::NotAccepted => write!(f, "Not Accepted"),
        }
    }
}

/// Everything the engine derives from one snapshot of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OfferResult {
    /// Quantity of the distinguished item (0 if it is not in the catalog).
    pub distinguished_quantity: f64,

    /// `unit_selling_price × distinguished_quantity`.
    pub total_offer: f64,

    /// Σ quantity × landed cost over the whole catalog.
    pub total_cost: f64,

    /// Band selected by the distinguished quantity.
    pub tier: MarginTier,

    /// Minimum margin (%) for that band.
    pub required_min_margin_pct: f64,

    /// Smallest total offer that is accepted.
    pub required_threshold: f64,

    /// `total_offer ≥ required_threshold`.
    pub accepted: bool,

    /// Margin the offer achieves over cost (0 when cost is 0).
    pub achieved_margin_pct: f64,

    /// Units the total offer buys at the reference price (0 unless accepted).
    pub units_at_reference_price: f64,

    /// Units given on top of those bought at the reference price
    /// (0 unless accepted).
    pub bonus_units: f64,
}

impl OfferResult {
    /// Returns the acceptance outcome as a status.
    pub fn status(&self) -> OfferStatus {
        if self.accepted {
            OfferStatus::Accepted
        } else {
            OfferStatus::NotAccepted
        }
    }
}

// =============================================================================
// Line Cost
// =============================================================================

/// Landed cost of one catalog line, for the cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineCost {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub is_local_currency: bool,
    /// Per-unit cost in the settlement currency.
    pub landed_unit_cost: f64,
    /// `quantity × landed_unit_cost`.
    pub line_total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
