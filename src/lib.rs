//! Scam Tycoon simulation core.
//!
//! Pure economic rules live under [`tycoon`]; [`time`] and [`config`] hold
//! the plumbing a host needs to drive a [`tycoon::TycoonGame`] session.

pub mod config;
pub mod format;
pub mod time;
pub mod tycoon;

pub use config::{EarningsAccounting, SimConfig};
pub use tycoon::actions::Action;
pub use tycoon::TycoonGame;
