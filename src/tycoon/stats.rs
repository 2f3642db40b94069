//! Derived economic quantities.
//!
//! [`derive_stats`] is a pure function of the state and the catalog. It is
//! recomputed from scratch before every state change; nothing here is
//! cached on the state.
//!
//! Income sources and the modifiers that apply to them:
//!
//! | source              | traffic multiplier |
//! |---------------------|--------------------|
//! | click               | yes                |
//! | team (scam) revenue | yes                |
//! | black market        | yes                |
//! | manager job passive | no                 |
//! | laundering (clean)  | no                 |

use super::catalog::{Catalog, UpgradeKind, BASE_BANK_LIMIT};
use super::state::GameState;

/// Each leverage point of salary rate buys 2.5 points of worker efficiency.
pub const SALARY_EFFICIENCY_LEVERAGE: f64 = 2.5;
/// Flat risk from owning any black market business.
pub const BLACK_MARKET_RISK: f64 = 50.0;
/// Team revenue per point of risk.
pub const SCAM_INCOME_PER_RISK: f64 = 1_000.0;
/// Clean income per point of risk removed.
pub const CLEAN_INCOME_PER_RISK: f64 = 500.0;

/// Passive income thresholds for wanted levels 1..=5.
const WANTED_THRESHOLDS: [f64; 5] = [0.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0];

#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub bank_limit: f64,
    pub traffic_multiplier: f64,
    pub click_rental_buff: f64,
    pub base_potential_per_worker: f64,
    pub has_software: bool,
    pub black_market_passive: f64,
    /// Net team revenue per second, traffic applied.
    pub scam_income: f64,
    /// Laundering income per second.
    pub clean_income: f64,
    /// Manager job passive income per second (0 for non-managers).
    pub job_passive: f64,
    pub total_passive_income: f64,
    pub current_click_value: f64,
    pub passive_reputation: f64,
    pub risk_score: f64,
    pub portfolio_value: f64,
    pub is_bank_full: bool,
    /// 0..=5 stars, driven by passive income.
    pub wanted_level: u8,
    /// Worker capacity over all branches.
    pub max_workers: u32,
}

/// Sum of `level × base_profit` over owned upgrades of one kind.
fn upgrade_sum(state: &GameState, catalog: &Catalog, kind: UpgradeKind) -> f64 {
    catalog
        .upgrades
        .iter()
        .filter(|u| u.kind == kind)
        .map(|u| state.upgrade_level(u.id) as f64 * u.base_profit)
        .sum()
}

/// Net team revenue before traffic.
///
/// Workers produce nothing without software. Raising the salary rate costs
/// `rate` of raw yield but multiplies gross output by `rate × 2.5`.
fn team_revenue(state: &GameState, potential_per_worker: f64) -> f64 {
    let raw_yield =
        potential_per_worker * state.workers as f64 * state.office_branches as f64;
    let efficiency = state.worker_salary_rate * SALARY_EFFICIENCY_LEVERAGE;
    let gross = raw_yield * efficiency * state.team_strategy.multiplier();
    let salary_cost = raw_yield * state.worker_salary_rate;
    gross - salary_cost
}

fn wanted_level(passive: f64) -> u8 {
    WANTED_THRESHOLDS.iter().filter(|&&t| passive > t).count() as u8
}

/// Derive every monetized quantity from a state snapshot.
pub fn derive_stats(state: &GameState, catalog: &Catalog) -> Stats {
    let job = catalog.job_or_first(&state.current_job_id);

    let bank_limit = BASE_BANK_LIMIT
        + catalog
            .laundering
            .iter()
            .map(|l| state.laundering_level(l.id) as f64 * l.base_limit)
            .sum::<f64>();

    let traffic_multiplier = 1.0 + upgrade_sum(state, catalog, UpgradeKind::Traffic);
    let click_rental_buff = upgrade_sum(state, catalog, UpgradeKind::Rental);
    let base_potential_per_worker = upgrade_sum(state, catalog, UpgradeKind::Software);
    let has_software = base_potential_per_worker != 0.0;
    let black_market_passive = upgrade_sum(state, catalog, UpgradeKind::BlackMarket);

    let scam_income = if state.has_business && has_software {
        (team_revenue(state, base_potential_per_worker) * traffic_multiplier).max(0.0)
    } else {
        0.0
    };

    let clean_income: f64 = catalog
        .laundering
        .iter()
        .map(|l| state.laundering_level(l.id) as f64 * l.base_income)
        .sum();

    let job_passive = if job.is_manager { job.passive_income } else { 0.0 };

    let total_passive_income =
        scam_income + clean_income + job_passive + black_market_passive * traffic_multiplier;

    let current_click_value =
        ((state.click_value + click_rental_buff + job.salary_per_click) * traffic_multiplier)
            .floor();

    let passive_reputation: f64 = catalog
        .properties
        .iter()
        .map(|p| state.property_count(p.id) as f64 * p.reputation_bonus)
        .sum();

    let mut risk_score = scam_income / SCAM_INCOME_PER_RISK + state.team_strategy.risk();
    if black_market_passive > 0.0 {
        risk_score += BLACK_MARKET_RISK;
    }
    risk_score = (risk_score - clean_income / CLEAN_INCOME_PER_RISK).max(0.0);

    let portfolio_value: f64 = catalog
        .assets
        .iter()
        .map(|a| {
            let price = state.asset_prices.get(a.id).copied().unwrap_or(a.base_price);
            state.asset_units(a.id) as f64 * price
        })
        .sum();

    let max_workers = catalog
        .office(state.office_level)
        .map_or(0, |o| o.max_workers)
        .saturating_mul(state.office_branches);

    Stats {
        bank_limit,
        traffic_multiplier,
        click_rental_buff,
        base_potential_per_worker,
        has_software,
        black_market_passive,
        scam_income,
        clean_income,
        job_passive,
        total_passive_income,
        current_click_value,
        passive_reputation,
        risk_score,
        portfolio_value,
        is_bank_full: state.balance >= bank_limit,
        wanted_level: wanted_level(total_passive_income),
        max_workers,
    }
}
