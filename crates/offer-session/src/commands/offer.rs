//! # Offer Commands
//!
//! Quantity and selling-price input, and the evaluated offer view.
//!
//! ## Visibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What the Offer View Shows                            │
//! │                                                                         │
//! │                        Locked             Unlocked                      │
//! │                        ──────             ────────                      │
//! │  Total offer             ✓                   ✓                          │
//! │  Achieved margin         ✓                   ✓                          │
//! │  Status                  ✓                   ✓                          │
//! │  Promotion             accepted only       accepted only               │
//! │  Cost summary            ✗                   ✓                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use offer_core::validation::coerce_number;
use offer_core::{LineCost, MarginTier, OfferStatus};

use crate::error::ApiError;
use crate::state::{OfferSession, SessionState};

/// Evaluated offer, filtered by master mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
    pub session_id: String,
    pub unlocked: bool,
    pub distinguished_quantity: f64,
    pub unit_selling_price: f64,
    pub total_offer: f64,
    pub achieved_margin_pct: f64,
    pub status: OfferStatus,

    /// Present only when the offer is accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PromotionView>,

    /// Present only in master mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_summary: Option<CostSummaryView>,
}

/// How an accepted offer splits into paid and bonus units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionView {
    pub reference_unit_price: f64,
    pub units_at_reference_price: f64,
    pub bonus_units: f64,
}

/// Cost side of the evaluation, for master mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummaryView {
    pub total_landed_cost: f64,
    pub tier: MarginTier,
    pub required_min_margin_pct: f64,
    pub min_accepted_offer: f64,
    pub lines: Vec<LineCost>,
}

impl From<&OfferSession> for OfferView {
    fn from(session: &OfferSession) -> Self {
        let result = session.evaluate();

        let promotion = result.accepted.then(|| PromotionView {
            reference_unit_price: session.pricing().reference_unit_price,
            units_at_reference_price: result.units_at_reference_price,
            bonus_units: result.bonus_units,
        });

        let cost_summary = session.is_unlocked().then(|| CostSummaryView {
            total_landed_cost: result.total_cost,
            tier: result.tier,
            required_min_margin_pct: result.required_min_margin_pct,
            min_accepted_offer: result.required_threshold,
            lines: offer_core::line_costs(session.catalog(), session.pricing()),
        });

        OfferView {
            session_id: session.id.clone(),
            unlocked: session.is_unlocked(),
            distinguished_quantity: result.distinguished_quantity,
            unit_selling_price: session.input().unit_selling_price,
            total_offer: result.total_offer,
            achieved_margin_pct: result.achieved_margin_pct,
            status: result.status(),
            promotion,
            cost_summary,
        }
    }
}

/// Gets the current offer evaluation.
pub fn get_offer(state: &SessionState) -> OfferView {
    debug!("get_offer command");
    state.with_session(|s| OfferView::from(s))
}

/// Sets an item's quantity from raw input.
///
/// ## Arguments
/// * `item_id` - Catalog item id
/// * `raw` - User text; non-numeric or negative input becomes 0
pub fn update_quantity(
    state: &SessionState,
    item_id: &str,
    raw: &str,
) -> Result<OfferView, ApiError> {
    let quantity = coerce_number(raw);
    debug!(item_id = %item_id, quantity, "update_quantity command");

    state.with_session_mut(|s| {
        s.set_quantity(item_id, quantity)?;
        Ok(OfferView::from(&*s))
    })
}

/// Sets the proposed price per distinguished unit from raw input.
pub fn update_selling_price(state: &SessionState, raw: &str) -> OfferView {
    let price = coerce_number(raw);
    debug!(price, "update_selling_price command");

    state.with_session_mut(|s| {
        s.set_selling_price(price);
        OfferView::from(&*s)
    })
}

/// Zeroes every quantity.
pub fn reset_quantities(state: &SessionState) -> OfferView {
    debug!("reset_quantities command");

    state.with_session_mut(|s| {
        s.reset_quantities();
        OfferView::from(&*s)
    })
}
