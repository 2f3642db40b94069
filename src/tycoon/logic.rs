//! Player actions as pure game logic (no rendering or IO).
//!
//! Every action validates fully before touching the state, so a rejected
//! action leaves the state exactly as it was.

use thiserror::Error;
use tracing::info;

use super::catalog::{
    scaled_cost, Catalog, CONVERT_TO_OFFICE_COST, CREATE_TEAM_COST, OPEN_NEW_BRANCH_COST,
    SKIP_TO_OFFICE_COST, WORKER_HIRE_COST_BASE,
};
use super::state::{BusinessStage, GameState, TeamStrategy, MAX_SALARY_RATE, MIN_SALARY_RATE};
use super::stats::{derive_stats, Stats};
use crate::config::{EarningsAccounting, SimConfig};

/// Reputation gained per manual click.
pub const CLICK_REPUTATION: f64 = 1.0;

/// Why an action was turned into a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejected {
    #[error("unknown catalog id `{0}`")]
    UnknownItem(String),
    #[error("not enough money: need {needed}, have {available}")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("`{0}` is at its max level")]
    MaxLevel(String),
    #[error("`{0}` is not the next rung of the ladder")]
    NotNextRung(String),
    #[error("not enough reputation: need {needed}, have {available}")]
    ReputationTooLow { needed: f64, available: f64 },
    #[error("requires business stage {required:?}, currently {current:?}")]
    StageLocked {
        required: BusinessStage,
        current: BusinessStage,
    },
    #[error("business already at stage {0:?}")]
    WrongStage(BusinessStage),
    #[error("no business to manage")]
    NoBusiness,
    #[error("a business needs at least one software upgrade")]
    NoSoftware,
    #[error("office is full ({0} workers)")]
    CapacityReached(u32),
    #[error("office is already at the top tier")]
    OfficeMaxed,
    #[error("salary rate {0} outside [0.1, 0.9]")]
    InvalidSalaryRate(f64),
    #[error("no units of `{0}` to sell")]
    NoUnits(String),
    #[error("proceeds would overflow the bank limit")]
    BankOverflow,
    #[error("unknown active scheme `{0}`")]
    UnknownInstance(String),
    #[error("scheme `{0}` is not ready yet")]
    NotReady(String),
    #[error("session has been shut down")]
    SessionClosed,
}

/// Read-only dependencies every action needs.
#[derive(Clone, Copy, Debug)]
pub struct Ctx<'a> {
    pub catalog: &'a Catalog,
    pub config: &'a SimConfig,
}

impl<'a> Ctx<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a SimConfig) -> Self {
        Self { catalog, config }
    }

    pub fn stats(&self, state: &GameState) -> Stats {
        derive_stats(state, self.catalog)
    }
}

// ── Money helpers ─────────────────────────────────────────────────────

/// Credit earned income: the balance is capped at the bank limit and
/// lifetime earnings follow the accounting policy. Returns the amount that
/// actually landed in the balance.
pub fn credit_income(
    state: &mut GameState,
    amount: f64,
    bank_limit: f64,
    accounting: EarningsAccounting,
) -> f64 {
    let produced = amount.max(0.0);
    let previous = state.balance;
    state.balance = (previous + produced).min(bank_limit);
    let banked = state.balance - previous;
    state.lifetime_earnings += accounting.lifetime_credit(produced, banked);
    banked
}

fn charge(state: &mut GameState, cost: f64) -> Result<(), Rejected> {
    if state.balance < cost {
        return Err(Rejected::InsufficientFunds {
            needed: cost,
            available: state.balance,
        });
    }
    state.balance -= cost;
    Ok(())
}

fn require_stage(state: &GameState, required: BusinessStage) -> Result<(), Rejected> {
    if state.business_stage < required {
        return Err(Rejected::StageLocked {
            required,
            current: state.business_stage,
        });
    }
    Ok(())
}

// ── Click ─────────────────────────────────────────────────────────────

/// Manual tap. Returns the click value earned.
pub fn click(state: &mut GameState, ctx: Ctx) -> f64 {
    let stats = ctx.stats(state);
    let value = stats.current_click_value;
    credit_income(state, value, stats.bank_limit, ctx.config.accounting);
    state.reputation += CLICK_REPUTATION;
    value
}

// ── Market upgrades & lifestyle ───────────────────────────────────────

pub fn upgrade_cost(catalog: &Catalog, state: &GameState, id: &str) -> Option<f64> {
    let item = catalog.upgrade(id)?;
    Some(scaled_cost(item.base_cost, state.upgrade_level(id)))
}

pub fn buy_upgrade(state: &mut GameState, ctx: Ctx, id: &str) -> Result<(), Rejected> {
    let item = ctx
        .catalog
        .upgrade(id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    let level = state.upgrade_level(id);
    if item.is_maxed(level) {
        return Err(Rejected::MaxLevel(id.to_string()));
    }
    charge(state, scaled_cost(item.base_cost, level))?;
    state.upgrades.insert(id.to_string(), level + 1);
    Ok(())
}

pub fn property_cost(catalog: &Catalog, state: &GameState, id: &str) -> Option<f64> {
    let item = catalog.property(id)?;
    Some(scaled_cost(item.base_cost, state.property_count(id)))
}

pub fn buy_property(state: &mut GameState, ctx: Ctx, id: &str) -> Result<(), Rejected> {
    let cost = property_cost(ctx.catalog, state, id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    let count = state.property_count(id);
    charge(state, cost)?;
    state.properties.insert(id.to_string(), count + 1);
    Ok(())
}

// ── Career ────────────────────────────────────────────────────────────

/// Whether the player may move up to `job_id` right now.
pub fn can_promote(state: &GameState, catalog: &Catalog, job_id: &str) -> Result<(), Rejected> {
    let target = catalog
        .job(job_id)
        .ok_or_else(|| Rejected::UnknownItem(job_id.to_string()))?;
    let next = catalog.next_job(&state.current_job_id);
    if next.map(|j| j.id) != Some(target.id) {
        return Err(Rejected::NotNextRung(job_id.to_string()));
    }
    if state.reputation < target.required_reputation {
        return Err(Rejected::ReputationTooLow {
            needed: target.required_reputation,
            available: state.reputation,
        });
    }
    require_stage(state, target.required_stage)?;
    if state.balance < target.cost_to_promote {
        return Err(Rejected::InsufficientFunds {
            needed: target.cost_to_promote,
            available: state.balance,
        });
    }
    Ok(())
}

pub fn promote(state: &mut GameState, ctx: Ctx, job_id: &str) -> Result<(), Rejected> {
    can_promote(state, ctx.catalog, job_id)?;
    let target = ctx.catalog.job_or_first(job_id);
    charge(state, target.cost_to_promote)?;
    state.current_job_id = target.id.to_string();
    info!(job = target.id, title = target.title, "promoted");
    Ok(())
}

// ── Laundering ────────────────────────────────────────────────────────

pub fn laundering_cost(catalog: &Catalog, state: &GameState, id: &str) -> Option<f64> {
    let item = catalog.laundering_item(id)?;
    Some(scaled_cost(item.base_cost, state.laundering_level(id)))
}

pub fn upgrade_laundering(state: &mut GameState, ctx: Ctx, id: &str) -> Result<(), Rejected> {
    let item = ctx
        .catalog
        .laundering_item(id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    require_stage(state, item.required_stage)?;
    let cost = laundering_cost(ctx.catalog, state, id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    let level = state.laundering_level(id);
    charge(state, cost)?;
    state.laundering_upgrades.insert(id.to_string(), level + 1);
    Ok(())
}

// ── Business stages ───────────────────────────────────────────────────

fn require_software(state: &GameState, ctx: Ctx) -> Result<(), Rejected> {
    if !ctx.stats(state).has_software {
        return Err(Rejected::NoSoftware);
    }
    Ok(())
}

/// Start a remote team (no business → remote team).
pub fn create_team(state: &mut GameState, ctx: Ctx) -> Result<(), Rejected> {
    if state.business_stage != BusinessStage::None {
        return Err(Rejected::WrongStage(state.business_stage));
    }
    require_software(state, ctx)?;
    charge(state, CREATE_TEAM_COST)?;
    state.has_business = true;
    state.business_stage = BusinessStage::RemoteTeam;
    state.workers = 0;
    state.office_level = 1;
    state.office_branches = 1;
    info!("remote team created");
    Ok(())
}

/// Skip the remote team and open an office straight away.
pub fn open_office(state: &mut GameState, ctx: Ctx) -> Result<(), Rejected> {
    if state.business_stage != BusinessStage::None {
        return Err(Rejected::WrongStage(state.business_stage));
    }
    require_software(state, ctx)?;
    charge(state, SKIP_TO_OFFICE_COST)?;
    state.has_business = true;
    state.business_stage = BusinessStage::Office;
    state.workers = 0;
    state.office_level = 2;
    state.office_branches = 1;
    info!("office opened");
    Ok(())
}

/// Move a remote team into an office.
pub fn convert_to_office(state: &mut GameState) -> Result<(), Rejected> {
    if state.business_stage != BusinessStage::RemoteTeam {
        return Err(Rejected::WrongStage(state.business_stage));
    }
    charge(state, CONVERT_TO_OFFICE_COST)?;
    state.business_stage = BusinessStage::Office;
    state.office_level = state.office_level.max(2);
    info!("remote team converted to office");
    Ok(())
}

/// Open another branch; the first one turns the office into a network.
pub fn open_branch(state: &mut GameState) -> Result<(), Rejected> {
    require_stage(state, BusinessStage::Office)?;
    charge(state, OPEN_NEW_BRANCH_COST)?;
    state.business_stage = BusinessStage::Network;
    state.office_branches += 1;
    info!(branches = state.office_branches, "branch opened");
    Ok(())
}

// ── Team ──────────────────────────────────────────────────────────────

pub fn hire_cost(state: &GameState) -> f64 {
    scaled_cost(WORKER_HIRE_COST_BASE, state.workers)
}

pub fn hire_worker(state: &mut GameState, ctx: Ctx) -> Result<(), Rejected> {
    if !state.has_business {
        return Err(Rejected::NoBusiness);
    }
    let capacity = ctx.stats(state).max_workers;
    if state.workers >= capacity {
        return Err(Rejected::CapacityReached(capacity));
    }
    charge(state, hire_cost(state))?;
    state.workers += 1;
    Ok(())
}

pub fn upgrade_office(state: &mut GameState, ctx: Ctx) -> Result<(), Rejected> {
    require_stage(state, BusinessStage::Office)?;
    let next = ctx
        .catalog
        .next_office(state.office_level)
        .ok_or(Rejected::OfficeMaxed)?;
    charge(state, next.cost)?;
    state.office_level = next.level;
    info!(level = next.level, name = next.name, "office upgraded");
    Ok(())
}

pub fn set_salary_rate(state: &mut GameState, rate: f64) -> Result<(), Rejected> {
    if !rate.is_finite() || !(MIN_SALARY_RATE..=MAX_SALARY_RATE).contains(&rate) {
        return Err(Rejected::InvalidSalaryRate(rate));
    }
    state.worker_salary_rate = rate;
    Ok(())
}

pub fn set_strategy(state: &mut GameState, strategy: TeamStrategy) {
    state.team_strategy = strategy;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ctx<R>(f: impl FnOnce(Ctx) -> R) -> R {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        f(Ctx::new(&catalog, &config))
    }

    #[test]
    fn click_earns_value_and_reputation() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            let v = click(&mut s, ctx);
            assert_eq!(v, 2.0);
            assert_eq!(s.balance, 2.0);
            assert_eq!(s.lifetime_earnings, 2.0);
            assert_eq!(s.reputation, 1.0);
        });
    }

    #[test]
    fn click_is_capped_at_bank_limit() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 99_999.0;
            s.current_job_id = "job_closer".into(); // 101 per click
            click(&mut s, ctx);
            assert_eq!(s.balance, 100_000.0);
            assert_eq!(s.lifetime_earnings, 101.0);
        });
    }

    #[test]
    fn retained_accounting_counts_only_banked() {
        let catalog = Catalog::standard();
        let config = SimConfig {
            accounting: EarningsAccounting::Retained,
            ..SimConfig::default()
        };
        let mut s = GameState::new();
        s.balance = 99_999.0;
        s.current_job_id = "job_closer".into();
        click(&mut s, Ctx::new(&catalog, &config));
        assert_eq!(s.lifetime_earnings, 1.0);
    }

    #[test]
    fn buy_upgrade_success_and_scaling() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1_000.0;
            assert!(buy_upgrade(&mut s, ctx, "tool_proxy").is_ok());
            assert_eq!(s.balance, 900.0);
            assert_eq!(s.upgrade_level("tool_proxy"), 1);
            assert_eq!(upgrade_cost(ctx.catalog, &s, "tool_proxy"), Some(114.0));
        });
    }

    #[test]
    fn buy_upgrade_insufficient_funds_is_noop() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 50.0;
            let before = s.clone();
            assert!(matches!(
                buy_upgrade(&mut s, ctx, "tool_proxy"),
                Err(Rejected::InsufficientFunds { .. })
            ));
            assert_eq!(s, before);
        });
    }

    #[test]
    fn buy_upgrade_respects_max_level() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1e12;
            s.upgrades.insert("bm_drops".into(), 10);
            let before = s.clone();
            assert_eq!(
                buy_upgrade(&mut s, ctx, "bm_drops"),
                Err(Rejected::MaxLevel("bm_drops".into()))
            );
            assert_eq!(s, before);
        });
    }

    #[test]
    fn buy_unknown_upgrade_is_noop() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1e9;
            assert!(matches!(
                buy_upgrade(&mut s, ctx, "tool_quantum"),
                Err(Rejected::UnknownItem(_))
            ));
            assert_eq!(s.balance, 1e9);
        });
    }

    #[test]
    fn buy_property_increments_count() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 2_000.0;
            assert!(buy_property(&mut s, ctx, "prop_coffee").is_ok());
            assert!(buy_property(&mut s, ctx, "prop_coffee").is_ok());
            assert_eq!(s.property_count("prop_coffee"), 2);
            assert_eq!(s.balance, 2_000.0 - 500.0 - scaled_cost(500.0, 1));
            assert_eq!(
                property_cost(ctx.catalog, &s, "prop_coffee"),
                Some(scaled_cost(500.0, 2))
            );
            assert_eq!(property_cost(ctx.catalog, &s, "prop_moon"), None);
        });
    }

    #[test]
    fn promote_to_next_rung() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 150.0;
            s.reputation = 50.0;
            assert!(promote(&mut s, ctx, "job_worker").is_ok());
            assert_eq!(s.current_job_id, "job_worker");
            assert_eq!(s.balance, 50.0);
        });
    }

    #[test]
    fn promote_cannot_skip_rungs() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1e9;
            s.reputation = 1e9;
            assert_eq!(
                promote(&mut s, ctx, "job_closer"),
                Err(Rejected::NotNextRung("job_closer".into()))
            );
            assert_eq!(s.current_job_id, "job_start");
        });
    }

    #[test]
    fn promote_needs_reputation() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1_000.0;
            s.reputation = 10.0;
            assert!(matches!(
                promote(&mut s, ctx, "job_worker"),
                Err(Rejected::ReputationTooLow { .. })
            ));
            assert_eq!(s.balance, 1_000.0);
        });
    }

    #[test]
    fn promote_to_manager_needs_team() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.current_job_id = "job_closer".into();
            s.balance = 1e6;
            s.reputation = 1e6;
            assert!(matches!(
                promote(&mut s, ctx, "job_team_lead"),
                Err(Rejected::StageLocked { required: BusinessStage::RemoteTeam, .. })
            ));
            s.business_stage = BusinessStage::RemoteTeam;
            s.has_business = true;
            assert!(promote(&mut s, ctx, "job_team_lead").is_ok());
        });
    }

    #[test]
    fn laundering_requires_stage() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 5_000_000.0;
            assert!(matches!(
                upgrade_laundering(&mut s, ctx, "laund_nightclub"),
                Err(Rejected::StageLocked { .. })
            ));
            assert_eq!(laundering_cost(ctx.catalog, &s, "laund_carwash"), Some(50_000.0));
            assert!(upgrade_laundering(&mut s, ctx, "laund_carwash").is_ok());
            assert_eq!(s.laundering_level("laund_carwash"), 1);
            assert_eq!(
                laundering_cost(ctx.catalog, &s, "laund_carwash"),
                Some(scaled_cost(50_000.0, 1))
            );
            assert_eq!(s.balance, 4_950_000.0);
        });
    }

    /// Fresh state that owns one level of software.
    fn with_software(balance: f64) -> GameState {
        let mut s = GameState::new();
        s.balance = balance;
        s.upgrades.insert("soft_dating".into(), 1);
        s
    }

    #[test]
    fn business_stage_progression() {
        with_ctx(|ctx| {
            let mut s = with_software(10_000_000.0);
            assert!(create_team(&mut s, ctx).is_ok());
            assert_eq!(s.business_stage, BusinessStage::RemoteTeam);
            assert!(s.has_business);
            // Can't create twice or skip to an office anymore
            assert!(create_team(&mut s, ctx).is_err());
            assert!(open_office(&mut s, ctx).is_err());
            assert!(open_branch(&mut s).is_err());
            assert!(convert_to_office(&mut s).is_ok());
            assert_eq!(s.business_stage, BusinessStage::Office);
            assert_eq!(s.office_level, 2);
            assert!(convert_to_office(&mut s).is_err());
            assert!(open_branch(&mut s).is_ok());
            assert_eq!(s.business_stage, BusinessStage::Network);
            assert_eq!(s.office_branches, 2);
        });
    }

    #[test]
    fn open_office_skips_remote_team() {
        with_ctx(|ctx| {
            let mut s = with_software(SKIP_TO_OFFICE_COST);
            assert!(open_office(&mut s, ctx).is_ok());
            assert_eq!(s.business_stage, BusinessStage::Office);
            assert_eq!(s.office_level, 2);
            assert_eq!(s.balance, 0.0);
        });
    }

    #[test]
    fn create_team_insufficient_funds_is_noop() {
        with_ctx(|ctx| {
            let mut s = with_software(19_999.0);
            let before = s.clone();
            assert!(create_team(&mut s, ctx).is_err());
            assert_eq!(s, before);
        });
    }

    #[test]
    fn business_needs_software() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 300_000.0;
            let before = s.clone();
            assert_eq!(create_team(&mut s, ctx), Err(Rejected::NoSoftware));
            assert_eq!(open_office(&mut s, ctx), Err(Rejected::NoSoftware));
            assert_eq!(s, before);

            // Rentals and traffic don't count as software.
            s.upgrades.insert("tool_proxy".into(), 3);
            s.upgrades.insert("traf_spam".into(), 1);
            assert_eq!(create_team(&mut s, ctx), Err(Rejected::NoSoftware));

            s.upgrades.insert("soft_dating".into(), 1);
            assert!(create_team(&mut s, ctx).is_ok());
            assert_eq!(s.business_stage, BusinessStage::RemoteTeam);
            assert_eq!(s.balance, 280_000.0);
        });
    }

    #[test]
    fn hire_worker_respects_capacity() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1e9;
            s.upgrades.insert("soft_dating".into(), 1);
            assert_eq!(hire_worker(&mut s, ctx), Err(Rejected::NoBusiness));
            create_team(&mut s, ctx).unwrap();
            for _ in 0..5 {
                assert!(hire_worker(&mut s, ctx).is_ok());
            }
            assert_eq!(hire_worker(&mut s, ctx), Err(Rejected::CapacityReached(5)));
            assert_eq!(s.workers, 5);
        });
    }

    #[test]
    fn hire_cost_scales() {
        let mut s = GameState::new();
        assert_eq!(hire_cost(&s), 500.0);
        s.workers = 2;
        assert_eq!(hire_cost(&s), 661.0);
    }

    #[test]
    fn upgrade_office_walks_tiers() {
        with_ctx(|ctx| {
            let mut s = GameState::new();
            s.balance = 1e9;
            s.upgrades.insert("soft_dating".into(), 1);
            assert!(upgrade_office(&mut s, ctx).is_err()); // no office yet
            open_office(&mut s, ctx).unwrap();
            assert!(upgrade_office(&mut s, ctx).is_ok());
            assert_eq!(s.office_level, 3);
            s.office_level = 5;
            assert_eq!(upgrade_office(&mut s, ctx), Err(Rejected::OfficeMaxed));
        });
    }

    #[test]
    fn salary_rate_bounds() {
        let mut s = GameState::new();
        assert!(set_salary_rate(&mut s, 0.7).is_ok());
        assert!((s.worker_salary_rate - 0.7).abs() < f64::EPSILON);
        assert!(set_salary_rate(&mut s, 0.95).is_err());
        assert!(set_salary_rate(&mut s, 0.05).is_err());
        assert!(set_salary_rate(&mut s, f64::NAN).is_err());
        assert!((s.worker_salary_rate - 0.7).abs() < f64::EPSILON);
        assert!(set_salary_rate(&mut s, 0.1).is_ok());
        assert!(set_salary_rate(&mut s, 0.9).is_ok());
    }

    #[test]
    fn strategy_is_freely_reassignable() {
        let mut s = GameState::new();
        for &st in TeamStrategy::all() {
            set_strategy(&mut s, st);
            assert_eq!(s.team_strategy, st);
        }
    }

    #[test]
    fn credit_income_reports_banked_amount() {
        let mut s = GameState::new();
        s.balance = 90.0;
        let banked = credit_income(&mut s, 50.0, 100.0, EarningsAccounting::Production);
        assert_eq!(banked, 10.0);
        assert_eq!(s.balance, 100.0);
        assert_eq!(s.lifetime_earnings, 50.0);
    }
}
