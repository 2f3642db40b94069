//! Scam Tycoon: an idle clicker about running a scam operation.
//!
//! [`TycoonGame`] owns one session: the state, the reference tables, the
//! RNG, the save store and the repeating timers. Hosts call [`TycoonGame::pump`]
//! with the current time as often as they like; every due timer fires once,
//! in a fixed order, each as one synchronous state transition.

pub mod actions;
pub mod advisor;
pub mod catalog;
pub mod events;
pub mod logic;
pub mod market;
pub mod offline;
pub mod save;
pub mod schemes;
pub mod state;
pub mod stats;
pub mod tick;

#[cfg(test)]
mod simulator;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::format::format_money;
use crate::time::{DeltaTimer, Interval};

use actions::{Action, Effect};
use advisor::{advice_or_fallback, Advisor, AdvisorSnapshot};
use catalog::Catalog;
use logic::{Ctx, Rejected};
use offline::OfflineReport;
use save::SaveStore;
use state::GameState;
use stats::{derive_stats, Stats};

/// Notices kept for display.
pub const MAX_LOG: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// The session's repeating loops.
#[derive(Clone, Debug)]
struct Timers {
    tick: Interval,
    tick_delta: DeltaTimer,
    scheme_sweep: Interval,
    price_walk: Interval,
    random_event: Interval,
    autosave: Interval,
}

impl Timers {
    fn new(config: &SimConfig, now_ms: u64) -> Self {
        Self {
            tick: Interval::new(config.tick_ms, now_ms),
            tick_delta: DeltaTimer::new(now_ms),
            scheme_sweep: Interval::new(config.scheme_sweep_ms, now_ms),
            price_walk: Interval::new(config.price_walk_ms, now_ms),
            random_event: Interval::new(config.random_event_ms, now_ms),
            autosave: Interval::new(config.autosave_ms, now_ms),
        }
    }
}

pub struct TycoonGame {
    state: GameState,
    catalog: Catalog,
    config: SimConfig,
    rng: ChaCha8Rng,
    store: Box<dyn SaveStore>,
    /// `None` once the session is shut down.
    timers: Option<Timers>,
    log: Vec<LogEntry>,
    /// Entries ever logged, including ones already truncated away.
    logged: u64,
    offline: Option<OfflineReport>,
}

impl TycoonGame {
    /// Start a session at `now_ms`: load the save (or start fresh), seed
    /// missing asset prices, then credit any offline absence.
    pub fn new(config: SimConfig, catalog: Catalog, store: Box<dyn SaveStore>, now_ms: u64) -> Self {
        let state = store.load().unwrap_or_default();
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed.unwrap_or(now_ms));
        let mut game = Self {
            state,
            catalog,
            timers: Some(Timers::new(&config, now_ms)),
            config,
            rng,
            store,
            log: Vec::new(),
            logged: 0,
            offline: None,
        };
        market::seed_prices(&mut game.state, &game.catalog);
        let ctx = Ctx::new(&game.catalog, &game.config);
        if let Some(report) = offline::resolve_offline(&mut game.state, ctx, now_ms) {
            game.add_log(&report.message(), true);
            game.offline = Some(report);
        }
        info!(
            balance = game.state.balance,
            job = %game.state.current_job_id,
            "session started"
        );
        game
    }

    /// Read-only view of the current state, safe to serialize at any time.
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> Stats {
        derive_stats(&self.state, &self.catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn log_total(&self) -> u64 {
        self.logged
    }

    /// Entries logged after `mark` (a previous [`Self::log_total`]) that
    /// are still retained.
    pub fn log_since(&self, mark: u64) -> &[LogEntry] {
        let fresh = self.logged.saturating_sub(mark).min(self.log.len() as u64) as usize;
        &self.log[self.log.len() - fresh..]
    }

    /// Offline earnings credited at startup, if any.
    pub fn offline_report(&self) -> Option<&OfflineReport> {
        self.offline.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.timers.is_some()
    }

    fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        self.logged += 1;
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// Apply a player action. Invalid actions change nothing.
    pub fn dispatch(&mut self, action: &Action, now_ms: u64) -> Result<Effect, Rejected> {
        if self.timers.is_none() {
            return Err(Rejected::SessionClosed);
        }
        let ctx = Ctx::new(&self.catalog, &self.config);
        let result = actions::apply(&mut self.state, action, ctx, now_ms, &mut self.rng);
        match &result {
            Ok(Effect::SchemeClaimed(outcome)) => {
                let name = match outcome {
                    schemes::SchemeOutcome::Success { scheme_id, .. }
                    | schemes::SchemeOutcome::Failure { scheme_id } => self
                        .catalog
                        .scheme(scheme_id)
                        .map_or("Scheme", |s| s.name),
                };
                let text = outcome.message(name);
                self.add_log(&text, outcome.is_success());
            }
            Ok(_) => {}
            Err(reason) => debug!(?action, %reason, "action rejected"),
        }
        result
    }

    /// Fire every timer that is due at `now_ms`. Returns how many fired.
    pub fn pump(&mut self, now_ms: u64) -> usize {
        let Some(timers) = self.timers.as_mut() else {
            return 0;
        };
        let ctx = Ctx::new(&self.catalog, &self.config);
        let mut fired = 0;
        let mut notices = Vec::new();

        if timers.tick.poll(now_ms) {
            fired += 1;
            if let Some(delta) = timers.tick_delta.measure(now_ms) {
                tick::advance(&mut self.state, ctx, delta);
            }
        }
        if timers.scheme_sweep.poll(now_ms) {
            fired += 1;
            let ready = schemes::sweep_ready(&mut self.state, now_ms);
            if ready > 0 {
                notices.push((format!("{ready} scheme(s) ready to claim"), false));
            }
        }
        if timers.price_walk.poll(now_ms) {
            fired += 1;
            market::walk_prices(&mut self.state, ctx, &mut self.rng);
        }
        if timers.random_event.poll(now_ms) {
            fired += 1;
            if let Some(ev) = events::roll_event(&mut self.state, ctx, &mut self.rng) {
                let sign = if ev.change < 0.0 { "-" } else { "+" };
                notices.push((
                    format!("{}: {} ({sign}${})", ev.title, ev.message, format_money(ev.change.abs())),
                    true,
                ));
            }
        }
        let autosave_due = timers.autosave.poll(now_ms);

        for (text, important) in notices {
            self.add_log(&text, important);
        }
        if autosave_due {
            fired += 1;
            self.save(now_ms);
        }
        fired
    }

    /// Stamp the save time and hand the state to the store. Failures are
    /// logged and otherwise ignored.
    pub fn save(&mut self, now_ms: u64) {
        self.state.last_save_time = Some(now_ms);
        if let Err(e) = self.store.save(&self.state) {
            warn!(error = %e, "save failed");
        }
    }

    /// Stop every timer and write a final save. Idempotent.
    pub fn shutdown(&mut self, now_ms: u64) {
        if self.timers.take().is_some() {
            self.save(now_ms);
            info!(balance = self.state.balance, "session shut down");
        }
    }

    /// Ask `advisor` about the current state; never fails.
    pub fn advice(&self, advisor: &mut dyn Advisor) -> String {
        advice_or_fallback(advisor, &AdvisorSnapshot::from_state(&self.state, &self.catalog))
    }
}
