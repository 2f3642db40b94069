//! Static reference tables: upgrades, career ladder, lifestyle, laundering,
//! tradable assets, schemes, office tiers and random events.
//!
//! Tables are plain data. `Catalog::standard()` bundles them once per session
//! and every calculation takes the catalog by reference, so tests can swap in
//! their own tables.

use super::state::BusinessStage;

/// Growth factor between consecutive levels of a repeatable purchase.
pub const COST_GROWTH: f64 = 1.15;

/// Price of the `owned + 1`-th unit of something whose first unit costs `base_cost`.
pub fn scaled_cost(base_cost: f64, owned: u32) -> f64 {
    (base_cost * COST_GROWTH.powi(owned as i32)).floor()
}

// ── Business costs ────────────────────────────────────────────────────

pub const CREATE_TEAM_COST: f64 = 20_000.0;
/// Opening an office straight away, skipping the remote team.
pub const SKIP_TO_OFFICE_COST: f64 = 250_000.0;
pub const CONVERT_TO_OFFICE_COST: f64 = 250_000.0;
pub const OPEN_NEW_BRANCH_COST: f64 = 5_000_000.0;
pub const WORKER_HIRE_COST_BASE: f64 = 500.0;

/// Bank limit with no laundering businesses.
pub const BASE_BANK_LIMIT: f64 = 100_000.0;

// ── Entities ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Rented tools that add to the click value.
    Rental,
    /// Per-worker base yield for the team.
    Software,
    /// Global income multiplier.
    Traffic,
    /// Flat passive income that raises risk.
    BlackMarket,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeItem {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: UpgradeKind,
    pub base_cost: f64,
    pub base_profit: f64,
    pub max_level: Option<u32>,
    /// Names the item goes by as it levels up (software only).
    pub tier_names: &'static [&'static str],
}

impl UpgradeItem {
    /// Display name for the given level. Software evolves every ten levels.
    pub fn tier_name(&self, level: u32) -> &'static str {
        if self.tier_names.is_empty() || level == 0 {
            return self.name;
        }
        let idx = ((level - 1) / 10) as usize;
        self.tier_names[idx.min(self.tier_names.len() - 1)]
    }

    pub fn is_maxed(&self, level: u32) -> bool {
        self.max_level.map_or(false, |max| level >= max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct JobPosition {
    pub id: &'static str,
    pub title: &'static str,
    pub vertical: &'static str,
    pub salary_per_click: f64,
    pub passive_income: f64,
    pub required_reputation: f64,
    pub cost_to_promote: f64,
    pub is_manager: bool,
    pub required_stage: BusinessStage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyItem {
    pub id: &'static str,
    pub name: &'static str,
    pub base_cost: f64,
    /// Reputation per second per owned unit.
    pub reputation_bonus: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaunderingItem {
    pub id: &'static str,
    pub name: &'static str,
    pub base_cost: f64,
    /// Bank limit added per level.
    pub base_limit: f64,
    /// Clean income per second per level.
    pub base_income: f64,
    pub required_stage: BusinessStage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetItem {
    pub id: &'static str,
    pub name: &'static str,
    pub base_price: f64,
    /// Maximum relative move per walk step (0.05 = ±5%).
    pub volatility: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeCategory {
    Grey,
    Black,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemeItem {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub duration_seconds: u64,
    /// Chance of failure in percent.
    pub risk_percentage: f64,
    pub min_profit: f64,
    pub max_profit: f64,
    pub category: SchemeCategory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OfficeTier {
    pub level: u32,
    pub name: &'static str,
    pub max_workers: u32,
    pub cost: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Good,
    Bad,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameEvent {
    pub id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub kind: EventKind,
    /// A fraction of the balance when in `(-1, 0)`, otherwise a flat amount
    /// scaled by traffic.
    pub effect_value: f64,
}

// ── Tables ────────────────────────────────────────────────────────────

pub const UPGRADES: [UpgradeItem; 16] = [
    // Rental tools (click boost)
    UpgradeItem { id: "tool_proxy", name: "Proxy", kind: UpgradeKind::Rental, base_cost: 100.0, base_profit: 2.0, max_level: None, tier_names: &[] },
    UpgradeItem { id: "tool_spam_soft", name: "Spammer", kind: UpgradeKind::Rental, base_cost: 500.0, base_profit: 5.0, max_level: None, tier_names: &[] },
    UpgradeItem { id: "tool_sms", name: "SMS Bot", kind: UpgradeKind::Rental, base_cost: 1_500.0, base_profit: 15.0, max_level: None, tier_names: &[] },
    UpgradeItem { id: "tool_parser", name: "Parser", kind: UpgradeKind::Rental, base_cost: 5_000.0, base_profit: 40.0, max_level: None, tier_names: &[] },
    UpgradeItem { id: "tool_cloaka", name: "Cloaker", kind: UpgradeKind::Rental, base_cost: 15_000.0, base_profit: 100.0, max_level: None, tier_names: &[] },
    // Software (per-worker yield)
    UpgradeItem { id: "soft_dating", name: "Dating Bot", kind: UpgradeKind::Software, base_cost: 10_000.0, base_profit: 5.0, max_level: None, tier_names: &["Dating Bot", "Dating Site", "Dating App"] },
    UpgradeItem { id: "soft_escort", name: "Escort Bot", kind: UpgradeKind::Software, base_cost: 50_000.0, base_profit: 20.0, max_level: None, tier_names: &["Escort Bot", "Elite Agency", "VIP Club App"] },
    UpgradeItem { id: "soft_shop", name: "Trade Bot", kind: UpgradeKind::Software, base_cost: 200_000.0, base_profit: 60.0, max_level: None, tier_names: &["Goods Bot", "Darknet Shop", "Marketplace"] },
    UpgradeItem { id: "soft_crypto", name: "NFT Bot", kind: UpgradeKind::Software, base_cost: 1_000_000.0, base_profit: 250.0, max_level: None, tier_names: &["Minter Bot", "NFT Collection", "Own Exchange"] },
    // Traffic (global multiplier)
    UpgradeItem { id: "traf_spam", name: "Spam", kind: UpgradeKind::Traffic, base_cost: 2_000.0, base_profit: 0.05, max_level: None, tier_names: &[] },
    UpgradeItem { id: "traf_tiktok", name: "TikTok", kind: UpgradeKind::Traffic, base_cost: 10_000.0, base_profit: 0.15, max_level: None, tier_names: &[] },
    UpgradeItem { id: "traf_google", name: "Google Ads", kind: UpgradeKind::Traffic, base_cost: 50_000.0, base_profit: 0.30, max_level: None, tier_names: &[] },
    UpgradeItem { id: "traf_fb", name: "Facebook", kind: UpgradeKind::Traffic, base_cost: 150_000.0, base_profit: 0.50, max_level: None, tier_names: &[] },
    // Black market (flat passive, risky)
    UpgradeItem { id: "bm_drops", name: "Card Drops", kind: UpgradeKind::BlackMarket, base_cost: 75_000.0, base_profit: 150.0, max_level: Some(10), tier_names: &[] },
    UpgradeItem { id: "bm_docs", name: "Forged Documents", kind: UpgradeKind::BlackMarket, base_cost: 400_000.0, base_profit: 700.0, max_level: Some(10), tier_names: &[] },
    UpgradeItem { id: "bm_carding", name: "Carding Shop", kind: UpgradeKind::BlackMarket, base_cost: 2_500_000.0, base_profit: 4_000.0, max_level: Some(10), tier_names: &[] },
];

pub const CAREER_LADDER: [JobPosition; 8] = [
    JobPosition { id: "job_start", title: "Newbie", vertical: "Dating", salary_per_click: 1.0, passive_income: 0.0, required_reputation: 0.0, cost_to_promote: 0.0, is_manager: false, required_stage: BusinessStage::None },
    JobPosition { id: "job_worker", title: "Worker", vertical: "Dating", salary_per_click: 5.0, passive_income: 0.0, required_reputation: 50.0, cost_to_promote: 100.0, is_manager: false, required_stage: BusinessStage::None },
    JobPosition { id: "job_support", title: "Support", vertical: "Office", salary_per_click: 15.0, passive_income: 0.0, required_reputation: 250.0, cost_to_promote: 1_000.0, is_manager: false, required_stage: BusinessStage::None },
    JobPosition { id: "job_cold", title: "Cold Caller", vertical: "Office", salary_per_click: 35.0, passive_income: 0.0, required_reputation: 1_000.0, cost_to_promote: 5_000.0, is_manager: false, required_stage: BusinessStage::None },
    JobPosition { id: "job_closer", title: "Closer", vertical: "Office", salary_per_click: 100.0, passive_income: 0.0, required_reputation: 5_000.0, cost_to_promote: 25_000.0, is_manager: false, required_stage: BusinessStage::None },
    JobPosition { id: "job_team_lead", title: "Team Lead", vertical: "Management", salary_per_click: 300.0, passive_income: 200.0, required_reputation: 20_000.0, cost_to_promote: 100_000.0, is_manager: true, required_stage: BusinessStage::RemoteTeam },
    JobPosition { id: "job_head", title: "Office Boss", vertical: "Management", salary_per_click: 800.0, passive_income: 1_000.0, required_reputation: 100_000.0, cost_to_promote: 1_000_000.0, is_manager: true, required_stage: BusinessStage::Office },
    JobPosition { id: "job_ceo", title: "CEO", vertical: "Owner", salary_per_click: 3_000.0, passive_income: 10_000.0, required_reputation: 500_000.0, cost_to_promote: 15_000_000.0, is_manager: true, required_stage: BusinessStage::Network },
];

pub const PROPERTIES: [PropertyItem; 14] = [
    PropertyItem { id: "prop_coffee", name: "Coffee", base_cost: 500.0, reputation_bonus: 1.0 },
    PropertyItem { id: "prop_gucci", name: "Gucci Outfit", base_cost: 2_500.0, reputation_bonus: 3.0 },
    PropertyItem { id: "prop_sneakers", name: "Sneakers", base_cost: 5_000.0, reputation_bonus: 5.0 },
    PropertyItem { id: "prop_iphone", name: "iPhone", base_cost: 25_000.0, reputation_bonus: 15.0 },
    PropertyItem { id: "prop_macbook", name: "MacBook", base_cost: 100_000.0, reputation_bonus: 50.0 },
    PropertyItem { id: "prop_rolex", name: "Rolex", base_cost: 500_000.0, reputation_bonus: 150.0 },
    PropertyItem { id: "prop_tesla", name: "Tesla", base_cost: 1_500_000.0, reputation_bonus: 350.0 },
    PropertyItem { id: "prop_bmw", name: "BMW M5", base_cost: 4_000_000.0, reputation_bonus: 800.0 },
    PropertyItem { id: "prop_heli", name: "Helicopter", base_cost: 12_000_000.0, reputation_bonus: 2_000.0 },
    PropertyItem { id: "prop_apt", name: "Penthouse", base_cost: 25_000_000.0, reputation_bonus: 4_000.0 },
    PropertyItem { id: "prop_yacht", name: "Yacht", base_cost: 75_000_000.0, reputation_bonus: 9_000.0 },
    PropertyItem { id: "prop_villa", name: "Villa", base_cost: 150_000_000.0, reputation_bonus: 15_000.0 },
    PropertyItem { id: "prop_island", name: "Island", base_cost: 500_000_000.0, reputation_bonus: 40_000.0 },
    PropertyItem { id: "prop_club", name: "Football Club", base_cost: 1_000_000_000.0, reputation_bonus: 100_000.0 },
];

pub const LAUNDERING: [LaunderingItem; 5] = [
    LaunderingItem { id: "laund_carwash", name: "Car Wash", base_cost: 50_000.0, base_limit: 250_000.0, base_income: 50.0, required_stage: BusinessStage::None },
    LaunderingItem { id: "laund_shawarma", name: "Shawarma Stand", base_cost: 150_000.0, base_limit: 750_000.0, base_income: 150.0, required_stage: BusinessStage::None },
    LaunderingItem { id: "laund_nightclub", name: "Nightclub", base_cost: 1_000_000.0, base_limit: 5_000_000.0, base_income: 1_000.0, required_stage: BusinessStage::RemoteTeam },
    LaunderingItem { id: "laund_construction", name: "Construction Firm", base_cost: 10_000_000.0, base_limit: 50_000_000.0, base_income: 8_000.0, required_stage: BusinessStage::Office },
    LaunderingItem { id: "laund_offshore", name: "Offshore Bank", base_cost: 100_000_000.0, base_limit: 1_000_000_000.0, base_income: 60_000.0, required_stage: BusinessStage::Network },
];

pub const ASSETS: [AssetItem; 4] = [
    AssetItem { id: "asset_btc", name: "Bitcoin", base_price: 30_000.0, volatility: 0.05 },
    AssetItem { id: "asset_eth", name: "Ethereum", base_price: 2_000.0, volatility: 0.07 },
    AssetItem { id: "asset_doge", name: "Dogecoin", base_price: 0.1, volatility: 0.15 },
    AssetItem { id: "asset_scam", name: "ScamCoin", base_price: 1.0, volatility: 0.30 },
];

pub const SCHEMES: [SchemeItem; 5] = [
    SchemeItem { id: "scheme_fake_lottery", name: "Fake Lottery", cost: 1_000.0, duration_seconds: 30, risk_percentage: 20.0, min_profit: 1_500.0, max_profit: 3_000.0, category: SchemeCategory::Grey },
    SchemeItem { id: "scheme_drop_cards", name: "Card Drops Run", cost: 5_000.0, duration_seconds: 60, risk_percentage: 10.0, min_profit: 8_000.0, max_profit: 15_000.0, category: SchemeCategory::Grey },
    SchemeItem { id: "scheme_phishing", name: "Phishing Wave", cost: 25_000.0, duration_seconds: 120, risk_percentage: 30.0, min_profit: 40_000.0, max_profit: 90_000.0, category: SchemeCategory::Black },
    SchemeItem { id: "scheme_pump_dump", name: "Pump and Dump", cost: 100_000.0, duration_seconds: 300, risk_percentage: 40.0, min_profit: 180_000.0, max_profit: 400_000.0, category: SchemeCategory::Black },
    SchemeItem { id: "scheme_bank_insider", name: "Bank Insider", cost: 1_000_000.0, duration_seconds: 900, risk_percentage: 55.0, min_profit: 2_500_000.0, max_profit: 6_000_000.0, category: SchemeCategory::Black },
];

pub const OFFICE_TIERS: [OfficeTier; 5] = [
    OfficeTier { level: 1, name: "Telegram Chat", max_workers: 5, cost: 0.0 },
    OfficeTier { level: 2, name: "Coworking", max_workers: 15, cost: 50_000.0 },
    OfficeTier { level: 3, name: "Class B Office", max_workers: 40, cost: 250_000.0 },
    OfficeTier { level: 4, name: "Class A Office", max_workers: 100, cost: 2_000_000.0 },
    OfficeTier { level: 5, name: "City Tower", max_workers: 500, cost: 25_000_000.0 },
];

pub const RANDOM_EVENTS: [GameEvent; 4] = [
    GameEvent { id: "ev_block", title: "Card Locked", message: "A drop went dark.", kind: EventKind::Bad, effect_value: -0.05 },
    GameEvent { id: "ev_raid", title: "Inspection", message: "Had to settle some questions.", kind: EventKind::Bad, effect_value: -0.10 },
    GameEvent { id: "ev_whale", title: "Whale", message: "A fat deposit!", kind: EventKind::Good, effect_value: 2_000.0 },
    GameEvent { id: "ev_pump", title: "Pump", message: "Crypto went up.", kind: EventKind::Good, effect_value: 5_000.0 },
];

/// Rung used when a catalog has no ladder at all.
static STARTING_JOB: &JobPosition = &CAREER_LADDER[0];

// ── Catalog bundle ────────────────────────────────────────────────────

/// All reference tables used by one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub upgrades: Vec<UpgradeItem>,
    pub jobs: Vec<JobPosition>,
    pub properties: Vec<PropertyItem>,
    pub laundering: Vec<LaunderingItem>,
    pub assets: Vec<AssetItem>,
    pub schemes: Vec<SchemeItem>,
    pub offices: Vec<OfficeTier>,
    pub events: Vec<GameEvent>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// The game's shipped tables.
    pub fn standard() -> Self {
        Self {
            upgrades: UPGRADES.to_vec(),
            jobs: CAREER_LADDER.to_vec(),
            properties: PROPERTIES.to_vec(),
            laundering: LAUNDERING.to_vec(),
            assets: ASSETS.to_vec(),
            schemes: SCHEMES.to_vec(),
            offices: OFFICE_TIERS.to_vec(),
            events: RANDOM_EVENTS.to_vec(),
        }
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeItem> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn job(&self, id: &str) -> Option<&JobPosition> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn job_index(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|j| j.id == id)
    }

    /// The job for `id`, falling back to the first rung of the ladder, or
    /// to the shipped starting job when the ladder is empty.
    pub fn job_or_first(&self, id: &str) -> &JobPosition {
        self.job(id)
            .or_else(|| self.jobs.first())
            .unwrap_or(STARTING_JOB)
    }

    /// The rung after `id` (after the first rung when `id` is unknown).
    pub fn next_job(&self, id: &str) -> Option<&JobPosition> {
        let idx = self.job_index(id).unwrap_or(0);
        self.jobs.get(idx + 1)
    }

    pub fn property(&self, id: &str) -> Option<&PropertyItem> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn laundering_item(&self, id: &str) -> Option<&LaunderingItem> {
        self.laundering.iter().find(|l| l.id == id)
    }

    pub fn asset(&self, id: &str) -> Option<&AssetItem> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn scheme(&self, id: &str) -> Option<&SchemeItem> {
        self.schemes.iter().find(|s| s.id == id)
    }

    /// Office tier for `level`, falling back to the first tier.
    pub fn office(&self, level: u32) -> Option<&OfficeTier> {
        self.offices
            .iter()
            .find(|o| o.level == level)
            .or_else(|| self.offices.first())
    }

    pub fn next_office(&self, level: u32) -> Option<&OfficeTier> {
        self.offices.iter().find(|o| o.level == level + 1)
    }
}
