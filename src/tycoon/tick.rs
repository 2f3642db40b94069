//! Passive income engine.
//!
//! The single path that advances balance, lifetime earnings and reputation
//! over elapsed time. Callers pass the measured wall-clock delta (see
//! [`crate::time::DeltaTimer`]), never the nominal cadence.

use super::logic::{credit_income, Ctx};
use super::state::GameState;

/// What one tick produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Passive income produced over the delta, before the bank cap.
    pub produced: f64,
    /// Part of `produced` that landed in the balance.
    pub banked: f64,
    pub reputation: f64,
}

/// Advance the state by `delta_seconds` of passive income.
///
/// Non-positive or non-finite deltas are skipped entirely.
pub fn advance(state: &mut GameState, ctx: Ctx, delta_seconds: f64) -> Option<TickOutcome> {
    if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
        return None;
    }
    let stats = ctx.stats(state);
    let produced = stats.total_passive_income * delta_seconds;
    let banked = credit_income(state, produced, stats.bank_limit, ctx.config.accounting);
    let reputation = stats.passive_reputation * delta_seconds;
    state.reputation += reputation;
    state.profit_per_second = stats.total_passive_income;
    Some(TickOutcome {
        produced,
        banked,
        reputation,
    })
}
