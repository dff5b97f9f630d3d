//! # offer-session: Caller-Side Session Layer
//!
//! Holds one user's inputs between evaluations and exposes them as commands.
//! The pricing engine itself lives in `offer-core`; this crate adds the parts
//! a front-end needs around it.
//!
//! ## Module Organization
//! ```text
//! offer-session/
//! ├── lib.rs        ◄─── You are here
//! ├── error.rs      ◄─── ApiError { code, message }
//! ├── snapshot.rs   ◄─── Catalog + pricing JSON files
//! ├── state/
//! │   ├── config.rs ◄─── AppConfig (config.toml + env)
//! │   └── session.rs◄─── OfferSession, SessionState
//! └── commands/
//!     ├── offer.rs  ◄─── get_offer, update_quantity, ...
//!     ├── master.rs ◄─── unlock_master_mode, update_unit_cost, ...
//!     └── catalog.rs◄─── get_catalog, export_catalog, import_catalog
//! ```
//!
//! ## Example
//! ```rust
//! use offer_session::commands::{get_offer, update_quantity, update_selling_price};
//! use offer_session::SessionState;
//!
//! let state = SessionState::default();
//! update_quantity(&state, "implantBody", "400").unwrap();
//! update_selling_price(&state, "500");
//!
//! let view = get_offer(&state);
//! assert_eq!(view.total_offer, 200_000.0);
//! assert!(view.promotion.is_some());
//! assert!(view.cost_summary.is_none());
//! ```

pub mod commands;
pub mod error;
pub mod snapshot;
pub mod state;

pub use error::{ApiError, ErrorCode};
pub use snapshot::{CatalogSnapshot, SnapshotError, SnapshotResult};
pub use state::{AppConfig, ConfigError, ConfigResult, OfferSession, SessionState};
