//! # Catalog
//!
//! The ordered list of line items an offer is built from.
//!
//! ## Invariants
//! - Item ids are unique (checked by [`Catalog::new`], which deserialization
//!   also goes through)
//! - Quantities and unit costs are never negative; setters clamp to 0
//! - Order is preserved; it is the display order, never a pricing input

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::LineItem;
use crate::validation::non_negative;

/// Ordered, id-unique collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Catalog {
    items: Vec<LineItem>,
}

impl TryFrom<Vec<LineItem>> for Catalog {
    type Error = CoreError;

    fn try_from(items: Vec<LineItem>) -> CoreResult<Self> {
        Catalog::new(items)
    }
}

impl From<Catalog> for Vec<LineItem> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and clamping negative
    /// quantities and costs to 0.
    pub fn new(items: Vec<LineItem>) -> CoreResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::DuplicateItem(item.id.clone()));
            }
        }

        let items = items
            .into_iter()
            .map(|mut item| {
                item.quantity = non_negative(item.quantity);
                item.unit_cost = non_negative(item.unit_cost);
                item
            })
            .collect();

        Ok(Catalog { items })
    }

    /// The implant catalog the calculator ships with. All quantities are 0.
    ///
    /// Costs are ex-factory EUR, except the courses and crown which are
    /// quoted directly in SAR.
    pub fn default_implant_catalog() -> Self {
        let items = vec![
            LineItem::foreign("implantBody", "Implant Body", 51.0),
            LineItem::foreign("coverScrew", "Cover Screw", 0.0),
            LineItem::foreign("healingAbutment", "Healing Abutment", 0.0),
            LineItem::foreign(
                "traditionalImpressionCoping",
                "Traditional Impression Coping (Open or Closed)",
                15.0,
            ),
            LineItem::foreign("digitalScanBody", "Digital Scan Body", 20.0),
            LineItem::foreign("traditionalAnalog", "Traditional Analog", 10.6),
            LineItem::foreign("digitalAnalog", "Digital Analog", 27.0),
            LineItem::foreign(
                "nonScallopedStraightAbutment",
                "Non-scalloped straight abutment",
                19.6,
            ),
            LineItem::foreign("scallopedStraightAbutment", "Scalloped Straight abutment", 22.0),
            LineItem::foreign("angulatedAbutment", "Angulated abutment", 25.5),
            LineItem::foreign("tiBase", "Ti-Base", 22.5),
            LineItem::foreign(
                "conicalAbutmentMUA",
                "Conical abutment with accessories (MUA)",
                55.0,
            ),
            LineItem::foreign("surgicalKit", "Surgical Kit", 0.0),
            LineItem::foreign("guidedKit", "Guided Kit", 1550.0),
            LineItem::foreign("guidedSleeves", "Guided Sleeves", 10.6),
            LineItem::local("regionalCourse", "Regional Course", 10_000.0),
            LineItem::local("internationalCourse", "International Course", 0.0),
            LineItem::local("crown", "Crown", 0.0),
        ];

        Catalog { items }
    }

    /// Items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))
    }

    /// Quantity of an item, 0 if the id is absent.
    pub fn quantity_of(&self, id: &str) -> f64 {
        self.get(id).map_or(0.0, |item| item.quantity)
    }

    /// Sets an item's quantity. Negative or non-finite values become 0.
    pub fn set_quantity(&mut self, id: &str, quantity: f64) -> CoreResult<()> {
        self.get_mut(id)?.quantity = non_negative(quantity);
        Ok(())
    }

    /// Sets an item's ex-factory unit cost. Negative or non-finite values
    /// become 0.
    pub fn set_unit_cost(&mut self, id: &str, unit_cost: f64) -> CoreResult<()> {
        self.get_mut(id)?.unit_cost = non_negative(unit_cost);
        Ok(())
    }

    /// Zeroes every quantity, keeping costs.
    pub fn reset_quantities(&mut self) {
        for item in &mut self.items {
            item.quantity = 0.0;
        }
    }

    /// Consumes the catalog, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
