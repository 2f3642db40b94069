//! Simulation configuration: loop cadences, thresholds and accounting policy.

use serde::{Deserialize, Serialize};

/// How income that overflows the bank limit is reflected in lifetime earnings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarningsAccounting {
    /// Lifetime earnings count everything produced, including the part
    /// discarded at the bank cap.
    #[default]
    Production,
    /// Lifetime earnings count only what actually landed in the balance.
    Retained,
}

impl EarningsAccounting {
    /// Amount to add to lifetime earnings given what was produced and what
    /// was banked.
    pub fn lifetime_credit(self, produced: f64, banked: f64) -> f64 {
        match self {
            EarningsAccounting::Production => produced.max(0.0),
            EarningsAccounting::Retained => banked.max(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Passive income tick period.
    pub tick_ms: u64,
    /// Scheme readiness sweep period.
    pub scheme_sweep_ms: u64,
    /// Asset price random walk period.
    pub price_walk_ms: u64,
    /// Random event roll period.
    pub random_event_ms: u64,
    /// Autosave period.
    pub autosave_ms: u64,
    /// Offline absences at or below this many seconds grant nothing.
    pub offline_min_seconds: u64,
    pub accounting: EarningsAccounting,
    /// Minimum price an asset can fall to.
    pub price_floor: f64,
    /// Decimal places asset prices are rounded to.
    pub price_decimals: u32,
    /// Seed for the session RNG. `None` seeds from the clock.
    pub rng_seed: Option<u64>,
    /// Versioned key the save blob is stored under.
    pub storage_key: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1_000,
            scheme_sweep_ms: 1_000,
            price_walk_ms: 3_000,
            random_event_ms: 20_000,
            autosave_ms: 5_000,
            offline_min_seconds: 60,
            accounting: EarningsAccounting::Production,
            price_floor: 0.01,
            price_decimals: 4,
            rng_seed: None,
            storage_key: crate::tycoon::save::STORAGE_KEY.to_string(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
