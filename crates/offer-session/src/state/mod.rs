//! # State Module
//!
//! Two independent pieces of state, each with one job:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │   SessionState           │        │   AppConfig                  │  │
//! │  │                          │        │                              │  │
//! │  │  Arc<Mutex<              │        │  [pricing]  defaults         │  │
//! │  │    OfferSession          │        │  [display]  currencies       │  │
//! │  │  >>                      │        │  [access]   master password  │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • AppConfig: Read-only after loading                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{
    format_amount, AccessSettings, AppConfig, ConfigError, ConfigResult, DisplaySettings,
    PricingSettings, ENV_CURRENCY, ENV_EXCHANGE_RATE, ENV_MASTER_PASSWORD, ENV_REFERENCE_PRICE,
    ENV_SURCHARGE_PCT,
};
pub use session::{OfferSession, SessionState};
