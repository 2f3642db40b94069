//! Scam Tycoon game state definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default base click value.
pub const DEFAULT_CLICK_VALUE: f64 = 1.0;
/// Default share of revenue paid to workers.
pub const DEFAULT_SALARY_RATE: f64 = 0.4;
pub const MIN_SALARY_RATE: f64 = 0.1;
pub const MAX_SALARY_RATE: f64 = 0.9;
/// The career rung every new game starts on.
pub const STARTING_JOB_ID: &str = "job_start";

/// One-way business progression. Ordering follows the progression, so
/// `stage >= BusinessStage::Office` reads as "has at least an office".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BusinessStage {
    #[default]
    None,
    RemoteTeam,
    Office,
    Network,
}

impl BusinessStage {
    pub fn name(self) -> &'static str {
        match self {
            BusinessStage::None => "No business",
            BusinessStage::RemoteTeam => "Remote team",
            BusinessStage::Office => "Office",
            BusinessStage::Network => "Network",
        }
    }
}

/// Risk/reward dial for the team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamStrategy {
    Safe,
    #[default]
    Balanced,
    Aggressive,
}

impl TeamStrategy {
    pub fn all() -> &'static [TeamStrategy] {
        &[TeamStrategy::Safe, TeamStrategy::Balanced, TeamStrategy::Aggressive]
    }

    /// Revenue multiplier applied to the team's gross output.
    pub fn multiplier(self) -> f64 {
        match self {
            TeamStrategy::Safe => 0.7,
            TeamStrategy::Balanced => 1.0,
            TeamStrategy::Aggressive => 1.5,
        }
    }

    /// Flat risk added to the risk score.
    pub fn risk(self) -> f64 {
        match self {
            TeamStrategy::Safe => 0.0,
            TeamStrategy::Balanced => 15.0,
            TeamStrategy::Aggressive => 40.0,
        }
    }
}

/// A scheme that has been paid for and is running (or waiting to be claimed).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveScheme {
    pub id: String,
    pub scheme_id: String,
    /// Epoch milliseconds.
    pub start_time: u64,
    /// Epoch milliseconds; `start_time + duration_seconds * 1000`.
    pub end_time: u64,
    pub is_ready: bool,
}

impl ActiveScheme {
    /// Milliseconds left until the scheme can be claimed.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.end_time.saturating_sub(now_ms)
    }
}

/// Full persisted state of a game.
///
/// Every field defaults individually so saves from older versions load with
/// the new fields filled in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub balance: f64,
    /// Total ever earned. Never decreases.
    pub lifetime_earnings: f64,
    pub reputation: f64,
    /// Base per-click amount before rentals, salary and traffic.
    pub click_value: f64,
    /// Passive income rate as of the last tick. Display cache only.
    pub profit_per_second: f64,

    /// Upgrade id -> owned level.
    pub upgrades: BTreeMap<String, u32>,
    /// Property id -> owned count.
    pub properties: BTreeMap<String, u32>,
    /// Laundering business id -> owned level.
    pub laundering_upgrades: BTreeMap<String, u32>,
    /// Asset id -> units held.
    pub owned_assets: BTreeMap<String, u32>,
    /// Asset id -> current market price.
    pub asset_prices: BTreeMap<String, f64>,
    pub active_schemes: Vec<ActiveScheme>,
    /// Serial used to mint unique active scheme ids.
    pub scheme_serial: u64,

    pub current_job_id: String,

    pub has_business: bool,
    pub business_stage: BusinessStage,
    pub team_strategy: TeamStrategy,
    pub workers: u32,
    pub office_level: u32,
    pub office_branches: u32,
    /// Share of raw yield paid to workers, in `[0.1, 0.9]`.
    pub worker_salary_rate: f64,

    /// Epoch milliseconds of the last save, if the game was ever saved.
    pub last_save_time: Option<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            balance: 0.0,
            lifetime_earnings: 0.0,
            reputation: 0.0,
            click_value: DEFAULT_CLICK_VALUE,
            profit_per_second: 0.0,
            upgrades: BTreeMap::new(),
            properties: BTreeMap::new(),
            laundering_upgrades: BTreeMap::new(),
            owned_assets: BTreeMap::new(),
            asset_prices: BTreeMap::new(),
            active_schemes: Vec::new(),
            scheme_serial: 0,
            current_job_id: STARTING_JOB_ID.to_string(),
            has_business: false,
            business_stage: BusinessStage::None,
            team_strategy: TeamStrategy::Balanced,
            workers: 0,
            office_level: 1,
            office_branches: 1,
            worker_salary_rate: DEFAULT_SALARY_RATE,
            last_save_time: None,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade_level(&self, id: &str) -> u32 {
        self.upgrades.get(id).copied().unwrap_or(0)
    }

    pub fn property_count(&self, id: &str) -> u32 {
        self.properties.get(id).copied().unwrap_or(0)
    }

    pub fn laundering_level(&self, id: &str) -> u32 {
        self.laundering_upgrades.get(id).copied().unwrap_or(0)
    }

    pub fn asset_units(&self, id: &str) -> u32 {
        self.owned_assets.get(id).copied().unwrap_or(0)
    }

    pub fn ready_scheme_count(&self) -> usize {
        self.active_schemes.iter().filter(|s| s.is_ready).count()
    }
}
