//! Random events: occasional windfalls and losses once the player has money
//! worth taking.

use rand::Rng;
use tracing::info;

use super::catalog::{EventKind, GameEvent};
use super::logic::Ctx;
use super::state::GameState;

/// Events only roll when the balance is above this.
pub const EVENT_MIN_BALANCE: f64 = 5_000.0;
/// Chance per roll that an event fires.
pub const EVENT_CHANCE: f64 = 0.15;

/// An event that fired and the balance change it caused.
#[derive(Clone, Debug, PartialEq)]
pub struct EventOutcome {
    pub event_id: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub kind: EventKind,
    pub change: f64,
}

/// Raw balance change for `event`, before clamping.
///
/// Bad events in `(-1, 0)` take a share of the balance; everything else is
/// a flat amount scaled by traffic.
pub fn event_change(event: &GameEvent, balance: f64, traffic_multiplier: f64) -> f64 {
    let fractional = event.effect_value < 0.0 && event.effect_value > -1.0;
    if event.kind == EventKind::Bad && fractional {
        (balance * event.effect_value).floor()
    } else {
        (event.effect_value * traffic_multiplier).floor()
    }
}

/// Apply `event` to the state. Event money is not income and never counts
/// toward lifetime earnings.
pub fn apply_event(state: &mut GameState, ctx: Ctx, event: &GameEvent) -> EventOutcome {
    let stats = ctx.stats(state);
    let previous = state.balance;
    let raw = event_change(event, previous, stats.traffic_multiplier);
    let ceiling = stats.bank_limit.max(previous);
    state.balance = (previous + raw).max(0.0).min(ceiling);
    EventOutcome {
        event_id: event.id,
        title: event.title,
        message: event.message,
        kind: event.kind,
        change: state.balance - previous,
    }
}

/// One roll of the event timer.
pub fn roll_event(state: &mut GameState, ctx: Ctx, rng: &mut impl Rng) -> Option<EventOutcome> {
    if state.balance <= EVENT_MIN_BALANCE || ctx.catalog.events.is_empty() {
        return None;
    }
    if rng.gen::<f64>() >= EVENT_CHANCE {
        return None;
    }
    let event = &ctx.catalog.events[rng.gen_range(0..ctx.catalog.events.len())];
    let outcome = apply_event(state, ctx, event);
    info!(event = outcome.event_id, change = outcome.change, "random event");
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::tycoon::catalog::Catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn event(id: &str) -> GameEvent {
        Catalog::standard()
            .events
            .into_iter()
            .find(|e| e.id == id)
            .unwrap()
    }

    #[test]
    fn bad_event_takes_share_of_balance() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut s = GameState::new();
        s.balance = 50_000.0;
        let out = apply_event(&mut s, Ctx::new(&catalog, &config), &event("ev_raid"));
        assert_eq!(out.change, -5_000.0);
        assert_eq!(s.balance, 45_000.0);
    }

    #[test]
    fn good_event_scales_with_traffic() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut s = GameState::new();
        s.balance = 10_000.0;
        s.upgrades.insert("traf_fb".into(), 2); // x2.0
        apply_event(&mut s, Ctx::new(&catalog, &config), &event("ev_whale"));
        assert_eq!(s.balance, 14_000.0);
        assert_eq!(s.lifetime_earnings, 0.0);
    }

    #[test]
    fn good_event_respects_bank_limit() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut s = GameState::new();
        s.balance = 99_000.0;
        let out = apply_event(&mut s, Ctx::new(&catalog, &config), &event("ev_pump"));
        assert_eq!(s.balance, 100_000.0);
        assert_eq!(out.change, 1_000.0);
    }

    #[test]
    fn flat_bad_event_clamps_at_zero() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let fine = GameEvent {
            id: "ev_fine",
            title: "Fine",
            message: "Pay up.",
            kind: EventKind::Bad,
            effect_value: -20_000.0,
        };
        let mut s = GameState::new();
        s.balance = 6_000.0;
        apply_event(&mut s, Ctx::new(&catalog, &config), &fine);
        assert_eq!(s.balance, 0.0);
    }

    #[test]
    fn no_events_for_small_balances() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut s = GameState::new();
        s.balance = 5_000.0;
        for _ in 0..500 {
            assert!(roll_event(&mut s, Ctx::new(&catalog, &config), &mut rng).is_none());
        }
        assert_eq!(s.balance, 5_000.0);
    }

    #[test]
    fn events_fire_roughly_fifteen_percent_of_rolls() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut fired = 0;
        for _ in 0..4_000 {
            let mut s = GameState::new();
            s.balance = 50_000.0;
            if roll_event(&mut s, Ctx::new(&catalog, &config), &mut rng).is_some() {
                fired += 1;
            }
        }
        let rate = fired as f64 / 4_000.0;
        assert!((rate - EVENT_CHANCE).abs() < 0.03, "rate {rate}");
    }
}
