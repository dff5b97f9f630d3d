//! # Pricing Module
//!
//! Landed cost, margin tiers and offer evaluation.
//!
//! ## Evaluation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        evaluate_offer()                                 │
//! │                                                                         │
//! │  Catalog ──► landed_cost() per item ──► total_landed_cost()            │
//! │                                              │                          │
//! │  distinguished qty ──► min_margin_pct() ─────┤                          │
//! │         │                                    ▼                          │
//! │         │                     threshold = cost × (1 + margin/100)      │
//! │         ▼                                    │                          │
//! │  total_offer = price × qty ──────────────────┤                          │
//! │                                              ▼                          │
//! │                               accepted = offer ≥ threshold             │
//! │                                              │                          │
//! │                                   accepted? ─┴─► units at 950, bonus   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure and total. Inputs are assumed to be
//! non-negative; the catalog setters and [`crate::validation`] make sure of it.

use crate::catalog::Catalog;
use crate::types::{
    LineCost, LineItem, MarginTier, MarginTiers, OfferInput, OfferResult, PricingConfig,
};

// =============================================================================
// Landed Cost
// =============================================================================

/// Per-unit cost of an item in the settlement currency.
///
/// ## Formula
/// - Local-currency item: `unit_cost`
/// - Foreign item: `unit_cost × exchange_rate × (1 + surcharge_pct / 100)`
///
/// ## Example
/// ```rust
/// use offer_core::pricing::landed_cost;
/// use offer_core::types::{LineItem, PricingConfig};
///
/// let implant = LineItem::foreign("implantBody", "Implant Body", 51.0);
/// // 51 € × 4.2 × 1.10 = 235.62 SAR
/// assert!((landed_cost(&implant, &PricingConfig::default()) - 235.62).abs() < 1e-9);
/// ```
pub fn landed_cost(item: &LineItem, config: &PricingConfig) -> f64 {
    if item.is_local_currency {
        return item.unit_cost;
    }
    item.unit_cost * config.exchange_rate * config.surcharge_factor()
}

/// Σ `quantity × landed_cost` over the catalog. An empty catalog costs 0.
pub fn total_landed_cost(catalog: &Catalog, config: &PricingConfig) -> f64 {
    catalog
        .iter()
        .map(|item| item.quantity * landed_cost(item, config))
        .sum()
}

/// Per-line landed costs, in catalog order.
pub fn line_costs(catalog: &Catalog, config: &PricingConfig) -> Vec<LineCost> {
    catalog
        .iter()
        .map(|item| {
            let landed_unit_cost = landed_cost(item, config);
            LineCost {
                id: item.id.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                is_local_currency: item.is_local_currency,
                landed_unit_cost,
                line_total: item.quantity * landed_unit_cost,
            }
        })
        .collect()
}

// =============================================================================
// Margin Tiers
// =============================================================================

/// Band a distinguished quantity falls into.
///
/// Boundaries belong to the higher band: exactly `mid_from` is `Mid` and
/// exactly `high_from` is `High`.
pub fn margin_tier(quantity: f64, tiers: &MarginTiers) -> MarginTier {
    if quantity >= tiers.high_from {
        MarginTier::High
    } else if quantity >= tiers.mid_from {
        MarginTier::Mid
    } else {
        MarginTier::Base
    }
}

/// Minimum acceptable margin (%) for a distinguished quantity.
///
/// ## Example
/// ```rust
/// use offer_core::pricing::min_margin_pct;
/// use offer_core::types::MarginTiers;
///
/// let tiers = MarginTiers::default();
/// assert_eq!(min_margin_pct(299.0, &tiers), 35.0);
/// assert_eq!(min_margin_pct(300.0, &tiers), 30.0);
/// assert_eq!(min_margin_pct(500.0, &tiers), 25.0);
/// ```
pub fn min_margin_pct(quantity: f64, tiers: &MarginTiers) -> f64 {
    tiers.pct(margin_tier(quantity, tiers))
}

// =============================================================================
// Offer Evaluation
// =============================================================================

/// Evaluates a proposed selling price against the catalog's landed cost.
///
/// ## Rules
/// - Revenue comes only from the distinguished item:
///   `total_offer = unit_selling_price × distinguished_quantity`
/// - Cost comes from every item in the catalog
/// - `accepted` is a closed inequality: an offer exactly at the threshold
///   is accepted
/// - `achieved_margin_pct` is 0 when the total cost is 0
/// - Promotional fields are 0 unless accepted; a reference price of 0 also
///   yields 0 units
///
/// ## Example
/// ```rust
/// use offer_core::catalog::Catalog;
/// use offer_core::pricing::evaluate_offer;
/// use offer_core::types::{LineItem, OfferInput, PricingConfig};
///
/// let catalog = Catalog::new(vec![
///     LineItem::foreign("implantBody", "Implant Body", 51.0).with_quantity(400.0),
/// ])
/// .unwrap();
///
/// let result = evaluate_offer(&catalog, &PricingConfig::default(), &OfferInput::new(500.0));
///
/// assert_eq!(result.total_offer, 200_000.0);
/// assert_eq!(result.required_min_margin_pct, 30.0);
/// assert!(result.accepted);
/// ```
pub fn evaluate_offer(
    catalog: &Catalog,
    config: &PricingConfig,
    input: &OfferInput,
) -> OfferResult {
    let distinguished_quantity = catalog.quantity_of(&config.distinguished_item_id);
    let total_offer = input.unit_selling_price * distinguished_quantity;
    let total_cost = total_landed_cost(catalog, config);

    let tier = margin_tier(distinguished_quantity, &config.margin_tiers);
    let required_min_margin_pct = config.margin_tiers.pct(tier);
    let required_threshold = total_cost * (1.0 + required_min_margin_pct / 100.0);
    let accepted = total_offer >= required_threshold;

    let achieved_margin_pct = if total_cost > 0.0 {
        (total_offer - total_cost) / total_cost * 100.0
    } else {
        0.0
    };

    let (units_at_reference_price, bonus_units) = if accepted && config.reference_unit_price > 0.0 {
        let units = total_offer / config.reference_unit_price;
        (units, distinguished_quantity - units)
    } else {
        (0.0, 0.0)
    };

    OfferResult {
        distinguished_quantity,
        total_offer,
        total_cost,
        tier,
        required_min_margin_pct,
        required_threshold,
        accepted,
        achieved_margin_pct,
        units_at_reference_price,
        bonus_units,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn implant_only(quantity: f64) -> Catalog {
        Catalog::new(vec![
            LineItem::foreign("implantBody", "Implant Body", 51.0).with_quantity(quantity)
        ])
        .unwrap()
    }

    #[test]
    fn test_landed_cost_foreign() {
        let config = PricingConfig {
            exchange_rate: 4.0,
            surcharge_pct: 25.0,
            ..PricingConfig::default()
        };
        let item = LineItem::foreign("x", "X", 10.0);
        assert!((landed_cost(&item, &config) - 50.0).abs() < EPS);
    }

    #[test]
    fn test_landed_cost_local_ignores_rate_and_surcharge() {
        let item = LineItem::local("regionalCourse", "Regional Course", 10_000.0);
        for (rate, surcharge) in [(4.2, 10.0), (1.0, 0.0), (9.9, 250.0)] {
            let config = PricingConfig {
                exchange_rate: rate,
                surcharge_pct: surcharge,
                ..PricingConfig::default()
            };
            assert_eq!(landed_cost(&item, &config), 10_000.0);
        }
    }

    #[test]
    fn test_total_landed_cost_mixed_currencies() {
        let catalog = Catalog::new(vec![
            LineItem::foreign("implantBody", "Implant Body", 51.0).with_quantity(10.0),
            LineItem::local("regionalCourse", "Regional Course", 10_000.0).with_quantity(1.0),
            LineItem::foreign("tiBase", "Ti-Base", 22.5),
        ])
        .unwrap();
        let config = PricingConfig::default();

        // 10 × 235.62 + 1 × 10 000 + 0
        let expected = 2_356.2 + 10_000.0;
        assert!((total_landed_cost(&catalog, &config) - expected).abs() < EPS);
    }

    #[test]
    fn test_total_landed_cost_empty_catalog() {
        assert_eq!(total_landed_cost(&Catalog::default(), &PricingConfig::default()), 0.0);
    }

    #[test]
    fn test_line_costs_follow_catalog_order() {
        let mut catalog = Catalog::default_implant_catalog();
        catalog.set_quantity("implantBody", 2.0).unwrap();
        let lines = line_costs(&catalog, &PricingConfig::default());

        assert_eq!(lines.len(), catalog.len());
        assert_eq!(lines[0].id, "implantBody");
        assert!((lines[0].landed_unit_cost - 235.62).abs() < EPS);
        assert!((lines[0].line_total - 471.24).abs() < EPS);
        assert_eq!(lines[1].line_total, 0.0);
    }

    #[test]
    fn test_tier_boundaries() {
        let tiers = MarginTiers::default();
        assert_eq!(min_margin_pct(0.0, &tiers), 35.0);
        assert_eq!(min_margin_pct(299.0, &tiers), 35.0);
        assert_eq!(min_margin_pct(299.99, &tiers), 35.0);
        assert_eq!(min_margin_pct(300.0, &tiers), 30.0);
        assert_eq!(min_margin_pct(499.0, &tiers), 30.0);
        assert_eq!(min_margin_pct(500.0, &tiers), 25.0);
        assert_eq!(min_margin_pct(10_000.0, &tiers), 25.0);
    }

    #[test]
    fn test_tier_boundaries_are_configurable() {
        let tiers = MarginTiers {
            mid_from: 100.0,
            high_from: 200.0,
            ..MarginTiers::default()
        };
        assert_eq!(margin_tier(99.0, &tiers), MarginTier::Base);
        assert_eq!(margin_tier(100.0, &tiers), MarginTier::Mid);
        assert_eq!(margin_tier(200.0, &tiers), MarginTier::High);
    }

    #[test]
    fn test_reference_scenario() {
        let config = PricingConfig::default();
        let result = evaluate_offer(&implant_only(400.0), &config, &OfferInput::new(500.0));

        assert_eq!(result.distinguished_quantity, 400.0);
        assert!((result.total_cost - 94_248.0).abs() < EPS);
        assert_eq!(result.total_offer, 200_000.0);
        assert_eq!(result.tier, MarginTier::Mid);
        assert_eq!(result.required_min_margin_pct, 30.0);
        assert!((result.required_threshold - 122_522.4).abs() < EPS);
        assert!(result.accepted);
        assert!((result.achieved_margin_pct - 112.2061).abs() < 1e-3);
        assert!((result.units_at_reference_price - 210.526_315).abs() < 1e-5);
        assert!((result.bonus_units - 189.473_684).abs() < 1e-5);
    }

    #[test]
    fn test_empty_catalog_scenario() {
        let config = PricingConfig::default();
        let result = evaluate_offer(&Catalog::default(), &config, &OfferInput::new(750.0));

        assert_eq!(result.distinguished_quantity, 0.0);
        assert_eq!(result.total_offer, 0.0);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.required_threshold, 0.0);
        assert_eq!(result.achieved_margin_pct, 0.0);
        assert!(result.accepted);
        assert_eq!(result.units_at_reference_price, 0.0);
        assert_eq!(result.bonus_units, 0.0);
    }

    #[test]
    fn test_zero_cost_with_revenue_reports_zero_margin() {
        let catalog = Catalog::new(vec![
            LineItem::foreign("implantBody", "Implant Body", 0.0).with_quantity(10.0)
        ])
        .unwrap();
        let result = evaluate_offer(&catalog, &PricingConfig::default(), &OfferInput::new(900.0));

        assert_eq!(result.total_offer, 9_000.0);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.achieved_margin_pct, 0.0);
        assert!(result.accepted);
    }

    #[test]
    fn test_exact_threshold_is_accepted() {
        // Local cost 100 per unit, 10 units, 35% tier → threshold 1350 → 135/unit.
        let catalog = Catalog::new(vec![
            LineItem::local("implantBody", "Implant Body", 100.0).with_quantity(10.0)
        ])
        .unwrap();
        let result = evaluate_offer(&catalog, &PricingConfig::default(), &OfferInput::new(135.0));

        assert_eq!(result.required_threshold, 1_350.0);
        assert_eq!(result.total_offer, 1_350.0);
        assert!(result.accepted);
    }

    #[test]
    fn test_rejected_offer_zeroes_promotion() {
        let config = PricingConfig::default();
        let result = evaluate_offer(&implant_only(400.0), &config, &OfferInput::new(250.0));

        assert!(!result.accepted);
        assert_eq!(result.units_at_reference_price, 0.0);
        assert_eq!(result.bonus_units, 0.0);
        assert!(result.achieved_margin_pct > 0.0);
    }

    #[test]
    fn test_acceptance_is_monotonic_in_price() {
        let catalog = implant_only(350.0);
        let config = PricingConfig::default();
        let mut was_accepted = false;

        for step in 0..=200 {
            let price = step as f64 * 5.0;
            let accepted = evaluate_offer(&catalog, &config, &OfferInput::new(price)).accepted;
            assert!(!(was_accepted && !accepted), "acceptance flipped back at price {price}");
            was_accepted = accepted;
        }
        assert!(was_accepted);
    }

    #[test]
    fn test_missing_distinguished_item_means_no_revenue() {
        let catalog =
            Catalog::new(vec![LineItem::foreign("tiBase", "Ti-Base", 22.5).with_quantity(4.0)])
                .unwrap();
        let result = evaluate_offer(&catalog, &PricingConfig::default(), &OfferInput::new(1_000.0));

        assert_eq!(result.distinguished_quantity, 0.0);
        assert_eq!(result.total_offer, 0.0);
        assert!(result.total_cost > 0.0);
        assert!(!result.accepted);
        assert!((result.achieved_margin_pct + 100.0).abs() < EPS);
    }

    #[test]
    fn test_zero_reference_price_yields_no_units() {
        let config = PricingConfig {
            reference_unit_price: 0.0,
            ..PricingConfig::default()
        };
        let result = evaluate_offer(&implant_only(400.0), &config, &OfferInput::new(500.0));

        assert!(result.accepted);
        assert_eq!(result.units_at_reference_price, 0.0);
        assert_eq!(result.bonus_units, 0.0);
    }

    #[test]
    fn test_evaluation_does_not_mutate_inputs() {
        let catalog = implant_only(400.0);
        let config = PricingConfig::default();
        let before = (catalog.clone(), config.clone());

        let first = evaluate_offer(&catalog, &config, &OfferInput::new(500.0));
        let second = evaluate_offer(&catalog, &config, &OfferInput::new(500.0));

        assert_eq!(first, second);
        assert_eq!((catalog, config), before);
    }
}
