//! Schemes: paid, time-boxed side ventures resolved by a dice roll at claim
//! time.
//!
//! Lifecycle per instance: pending (`is_ready == false`) → ready → removed by
//! claim. Failure is only decided when claiming.

use rand::Rng;
use tracing::info;

use super::catalog::SchemeItem;
use super::logic::{credit_income, Ctx, Rejected};
use super::state::{ActiveScheme, GameState};
use crate::format::format_money;

/// Reputation for a successful scheme.
pub const SCHEME_SUCCESS_REPUTATION: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub enum SchemeOutcome {
    Success { scheme_id: String, profit: f64 },
    Failure { scheme_id: String },
}

impl SchemeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SchemeOutcome::Success { .. })
    }

    pub fn message(&self, name: &str) -> String {
        match self {
            SchemeOutcome::Success { profit, .. } => {
                format!("{name} paid off: +${}", format_money(*profit))
            }
            SchemeOutcome::Failure { .. } => format!("{name} fell through. Money lost."),
        }
    }
}

/// Pay for `scheme_id` and start its timer. Returns the new instance id.
pub fn start_scheme(
    state: &mut GameState,
    ctx: Ctx,
    scheme_id: &str,
    now_ms: u64,
) -> Result<String, Rejected> {
    let item = ctx
        .catalog
        .scheme(scheme_id)
        .ok_or_else(|| Rejected::UnknownItem(scheme_id.to_string()))?;
    if state.balance < item.cost {
        return Err(Rejected::InsufficientFunds {
            needed: item.cost,
            available: state.balance,
        });
    }
    state.balance -= item.cost;
    state.scheme_serial += 1;
    let id = format!("as_{}", state.scheme_serial);
    state.active_schemes.push(ActiveScheme {
        id: id.clone(),
        scheme_id: item.id.to_string(),
        start_time: now_ms,
        end_time: now_ms + item.duration_seconds * 1000,
        is_ready: false,
    });
    Ok(id)
}

/// Flip every finished pending scheme to ready. Returns how many flipped.
pub fn sweep_ready(state: &mut GameState, now_ms: u64) -> usize {
    let mut flipped = 0;
    for scheme in state.active_schemes.iter_mut() {
        if !scheme.is_ready && now_ms >= scheme.end_time {
            scheme.is_ready = true;
            flipped += 1;
        }
    }
    flipped
}

/// Roll for success: `roll × 100 > risk`.
pub fn roll_success(item: &SchemeItem, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() * 100.0 > item.risk_percentage
}

/// Uniform integer profit in `[min_profit, max_profit]`.
pub fn roll_profit(item: &SchemeItem, rng: &mut impl Rng) -> f64 {
    let span = item.max_profit - item.min_profit + 1.0;
    (rng.gen::<f64>() * span).floor() + item.min_profit
}

/// Resolve a ready scheme. The instance is consumed either way.
pub fn claim_scheme(
    state: &mut GameState,
    ctx: Ctx,
    instance_id: &str,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Result<SchemeOutcome, Rejected> {
    let idx = state
        .active_schemes
        .iter()
        .position(|s| s.id == instance_id)
        .ok_or_else(|| Rejected::UnknownInstance(instance_id.to_string()))?;
    let active = &state.active_schemes[idx];
    let item = ctx
        .catalog
        .scheme(&active.scheme_id)
        .ok_or_else(|| Rejected::UnknownItem(active.scheme_id.clone()))?;
    if !active.is_ready && now_ms < active.end_time {
        return Err(Rejected::NotReady(instance_id.to_string()));
    }

    state.active_schemes.remove(idx);
    let outcome = if roll_success(item, rng) {
        let profit = roll_profit(item, rng);
        let bank_limit = ctx.stats(state).bank_limit;
        credit_income(state, profit, bank_limit, ctx.config.accounting);
        state.reputation += SCHEME_SUCCESS_REPUTATION;
        SchemeOutcome::Success {
            scheme_id: item.id.to_string(),
            profit,
        }
    } else {
        SchemeOutcome::Failure {
            scheme_id: item.id.to_string(),
        }
    };
    info!(
        scheme = item.id,
        success = outcome.is_success(),
        "scheme claimed"
    );
    Ok(outcome)
}
