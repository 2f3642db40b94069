//! Offline catch-up: credit the time the game was closed in one shot,
//! using the same rate formulas as the tick engine.

use tracing::info;

use super::logic::Ctx;
use super::state::GameState;
use crate::format::format_money;

/// What the player earned while away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineReport {
    pub seconds_away: u64,
    /// Income produced over the absence, before the bank cap.
    pub potential: f64,
    /// Income that fit under the bank limit.
    pub earned: f64,
    pub reputation: f64,
}

impl OfflineReport {
    pub fn message(&self) -> String {
        format!(
            "While you were away ({}s) the crew made ${}",
            self.seconds_away,
            format_money(self.earned)
        )
    }
}

/// Resolve an absence ending at `now_ms`.
///
/// Runs only when the state was saved before and had a positive cached
/// income rate; in that case the save watermark is moved to `now_ms`
/// whether or not anything was granted.
pub fn resolve_offline(state: &mut GameState, ctx: Ctx, now_ms: u64) -> Option<OfflineReport> {
    let last_save = state.last_save_time?;
    if state.profit_per_second <= 0.0 {
        return None;
    }
    state.last_save_time = Some(now_ms);

    let seconds_away = now_ms.saturating_sub(last_save) / 1000;
    if seconds_away <= ctx.config.offline_min_seconds {
        return None;
    }

    let stats = ctx.stats(state);
    let secs = seconds_away as f64;
    let potential = (stats.total_passive_income * secs).floor();
    let space = (stats.bank_limit - state.balance).max(0.0);
    let earned = potential.min(space).max(0.0);
    let reputation = (stats.passive_reputation * secs).floor();
    if earned <= 0.0 && reputation <= 0.0 {
        return None;
    }

    state.balance += earned;
    state.lifetime_earnings += ctx.config.accounting.lifetime_credit(potential, earned);
    state.reputation += reputation;

    let report = OfflineReport {
        seconds_away,
        potential,
        earned,
        reputation,
    };
    info!(seconds_away, earned, reputation, "offline earnings granted");
    Some(report)
}
