//! Text and JSON rendering of session views.

use std::fmt::{self, Write};

use anyhow::Result;
use serde::Serialize;

use offer_core::OfferStatus;
use offer_session::commands::{CatalogView, OfferView};
use offer_session::state::DisplaySettings;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn status_icon(status: OfferStatus) -> &'static str {
    match status {
        OfferStatus::Accepted => "[OK]",
        OfferStatus::NotAccepted => "[FAIL]",
    }
}

/// Writes one `label  value` row of a result block.
fn row(out: &mut String, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(out, "  {:<28}{}", label, value)
}

/// Renders an offer view. `distinguished_name` labels the quantity line.
pub fn render_offer(
    view: &OfferView,
    display: &DisplaySettings,
    distinguished_name: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Implant Offer")?;
    writeln!(out, "{}", "-".repeat(60))?;
    row(
        &mut out,
        &format!("{} quantity:", distinguished_name),
        display.format_units(view.distinguished_quantity),
    )?;
    row(&mut out, "Unit selling price:", display.format_settlement(view.unit_selling_price))?;
    row(&mut out, "Total offer:", display.format_settlement_whole(view.total_offer))?;
    row(&mut out, "Achieved margin:", display.format_pct(view.achieved_margin_pct))?;
    row(&mut out, "Status:", format!("{} {}", status_icon(view.status), view.status))?;

    if let Some(promotion) = &view.promotion {
        writeln!(out)?;
        writeln!(out, "Promotion")?;
        row(
            &mut out,
            "Reference unit price:",
            display.format_settlement(promotion.reference_unit_price),
        )?;
        row(
            &mut out,
            "Units at reference price:",
            display.format_units(promotion.units_at_reference_price),
        )?;
        row(&mut out, "Bonus units:", display.format_units(promotion.bonus_units))?;
    }

    if let Some(summary) = &view.cost_summary {
        writeln!(out)?;
        writeln!(out, "Cost Summary (master mode)")?;
        row(&mut out, "Total landed cost:", display.format_settlement(summary.total_landed_cost))?;
        row(&mut out, "Margin tier:", summary.tier)?;
        row(
            &mut out,
            "Required minimum margin:",
            display.format_pct(summary.required_min_margin_pct),
        )?;
        row(
            &mut out,
            "Minimum accepted offer:",
            display.format_settlement(summary.min_accepted_offer),
        )?;

        let costed: Vec<_> = summary.lines.iter().filter(|line| line.quantity > 0.0).collect();
        if !costed.is_empty() {
            writeln!(out, "  Lines:")?;
            for line in costed {
                writeln!(
                    out,
                    "    {:<48} {:>10} x {:>14} = {}",
                    line.name,
                    display.format_units(line.quantity),
                    display.format_settlement(line.landed_unit_cost),
                    display.format_settlement(line.line_total),
                )?;
            }
        }
    }

    Ok(out)
}

/// Renders the catalog as a table. Costs appear only when the view
/// carries them.
pub fn render_catalog(view: &CatalogView, display: &DisplaySettings) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{:<30} {:<48} {:>10} {:>16}", "ID", "NAME", "QTY", "UNIT COST")?;
    for item in &view.items {
        let cost = item
            .unit_cost
            .map(|cost| display.format_cost(cost, item.is_local_currency))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<30} {:<48} {:>10} {:>16}",
            item.id,
            item.name,
            display.format_units(item.quantity),
            cost,
        )?;
    }

    if let Some(pricing) = &view.pricing {
        let tiers = &pricing.margin_tiers;
        writeln!(out)?;
        writeln!(
            out,
            "Exchange rate: {} {} per {}  |  Surcharge: {}",
            display.format_units(pricing.exchange_rate),
            display.settlement_currency,
            display.foreign_currency,
            display.format_pct(pricing.surcharge_pct),
        )?;
        writeln!(
            out,
            "Margins: <{} {}  |  {}-{} {}  |  {}+ {}",
            tiers.mid_from,
            display.format_pct(tiers.tier_0_299),
            tiers.mid_from,
            tiers.high_from,
            display.format_pct(tiers.tier_300_499),
            tiers.high_from,
            display.format_pct(tiers.tier_500_plus),
        )?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_session::commands::{
        get_catalog, get_offer, update_quantity, update_selling_price,
    };
    use offer_session::{AppConfig, SessionState};

    fn reference_state() -> SessionState {
        let state = SessionState::default();
        update_quantity(&state, "implantBody", "400").unwrap();
        update_selling_price(&state, "500");
        state
    }

    #[test]
    fn test_render_locked_offer() {
        let view = get_offer(&reference_state());
        let text = render_offer(&view, &DisplaySettings::default(), "Implant Body").unwrap();

        assert!(text.contains("200,000 SAR"));
        assert!(text.contains("112.21%"));
        assert!(text.contains("[OK] Accepted"));
        assert!(text.contains("210.53"));
        assert!(text.contains("189.47"));
        assert!(!text.contains("Cost Summary"));
    }

    #[test]
    fn test_render_unlocked_offer() {
        let state = reference_state();
        state
            .with_session_mut(|s| s.unlock("admin", &AppConfig::default()))
            .unwrap();
        let view = get_offer(&state);
        let text = render_offer(&view, &DisplaySettings::default(), "Implant Body").unwrap();

        assert!(text.contains("94,248.00 SAR"));
        assert!(text.contains("122,522.40 SAR"));
        assert!(text.contains("30.00%"));
        assert!(text.contains("235.62 SAR"));
    }

    #[test]
    fn test_render_rejected_offer() {
        let state = reference_state();
        let view = update_selling_price(&state, "100");
        let text = render_offer(&view, &DisplaySettings::default(), "Implant Body").unwrap();

        assert!(text.contains("[FAIL] Not Accepted"));
        assert!(!text.contains("Promotion"));
    }

    #[test]
    fn test_render_catalog_hides_costs_when_locked() {
        let view = get_catalog(&SessionState::default());
        let text = render_catalog(&view, &DisplaySettings::default()).unwrap();
        assert!(text.contains("implantBody"));
        assert!(!text.contains("EUR"));
        assert!(!text.contains("Exchange rate"));
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&get_offer(&reference_state())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalOffer"], 200_000.0);
        assert!(value.get("promotion").is_some());
    }
}
