//! # Session Commands
//!
//! Every operation a front-end can invoke against a session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── offer.rs    ◄─── Quantities, selling price, offer view
//! ├── master.rs   ◄─── Master mode and cost-side edits
//! └── catalog.rs  ◄─── Catalog listing, snapshot export/import
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_quantity(&state, "implantBody", "400")                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  coerce_number("400") ──► 400.0     (raw text never fails)              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  state.with_session_mut(|s| { write; OfferView::from(s) })              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<OfferView, ApiError>        (freshly evaluated)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod master;
pub mod offer;

pub use catalog::{export_catalog, get_catalog, import_catalog, CatalogEntryView, CatalogView};
pub use master::{
    lock_master_mode, unlock_master_mode, update_exchange_rate, update_margin_tier,
    update_surcharge, update_unit_cost,
};
pub use offer::{
    get_offer, reset_quantities, update_quantity, update_selling_price, CostSummaryView,
    OfferView, PromotionView,
};
