//! Player input surface.
//!
//! Every discrete thing the player can do is an [`Action`]. [`apply`] runs
//! one against a state; [`reduce`] is the functional form that leaves the
//! input untouched and returns the next state.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::logic::{self, Ctx, Rejected};
use super::market;
use super::schemes::{self, SchemeOutcome};
use super::state::{GameState, TeamStrategy};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Click,
    BuyUpgrade(String),
    BuyProperty(String),
    Promote(String),
    UpgradeLaundering(String),
    BuyAsset(String),
    SellAsset(String),
    StartScheme(String),
    ClaimScheme(String),
    SetSalaryRate(f64),
    SetStrategy(TeamStrategy),
    CreateTeam,
    OpenOffice,
    ConvertToOffice,
    OpenBranch,
    HireWorker,
    UpgradeOffice,
}

/// Side information an accepted action produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    Clicked(f64),
    SchemeStarted(String),
    SchemeClaimed(SchemeOutcome),
}

/// Run `action` against `state`. A rejected action leaves `state` as it was.
pub fn apply(
    state: &mut GameState,
    action: &Action,
    ctx: Ctx,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Result<Effect, Rejected> {
    let done = |r: Result<(), Rejected>| r.map(|()| Effect::None);
    match action {
        Action::Click => Ok(Effect::Clicked(logic::click(state, ctx))),
        Action::BuyUpgrade(id) => done(logic::buy_upgrade(state, ctx, id)),
        Action::BuyProperty(id) => done(logic::buy_property(state, ctx, id)),
        Action::Promote(id) => done(logic::promote(state, ctx, id)),
        Action::UpgradeLaundering(id) => done(logic::upgrade_laundering(state, ctx, id)),
        Action::BuyAsset(id) => done(market::buy_asset(state, ctx, id)),
        Action::SellAsset(id) => done(market::sell_asset(state, ctx, id)),
        Action::StartScheme(id) => {
            schemes::start_scheme(state, ctx, id, now_ms).map(Effect::SchemeStarted)
        }
        Action::ClaimScheme(id) => {
            schemes::claim_scheme(state, ctx, id, now_ms, rng).map(Effect::SchemeClaimed)
        }
        Action::SetSalaryRate(rate) => done(logic::set_salary_rate(state, *rate)),
        Action::SetStrategy(strategy) => {
            logic::set_strategy(state, *strategy);
            Ok(Effect::None)
        }
        Action::CreateTeam => done(logic::create_team(state, ctx)),
        Action::OpenOffice => done(logic::open_office(state, ctx)),
        Action::ConvertToOffice => done(logic::convert_to_office(state)),
        Action::OpenBranch => done(logic::open_branch(state)),
        Action::HireWorker => done(logic::hire_worker(state, ctx)),
        Action::UpgradeOffice => done(logic::upgrade_office(state, ctx)),
    }
}

/// Previous state → next state. Rejected actions yield an unchanged copy.
pub fn reduce(
    state: &GameState,
    action: &Action,
    ctx: Ctx,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    if let Err(reason) = apply(&mut next, action, ctx, now_ms, rng) {
        debug!(?action, %reason, "action rejected");
        return state.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::tycoon::catalog::Catalog;
    use crate::tycoon::state::BusinessStage;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn reduce_leaves_input_untouched() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let s = GameState::new();
        let next = reduce(&s, &Action::Click, Ctx::new(&catalog, &config), 0, &mut rng);
        assert_eq!(s.balance, 0.0);
        assert_eq!(next.balance, 2.0);
    }

    #[test]
    fn rejected_action_yields_same_state() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let s = GameState::new();
        for action in [
            Action::BuyUpgrade("tool_proxy".into()),
            Action::Promote("job_ceo".into()),
            Action::SellAsset("asset_btc".into()),
            Action::ClaimScheme("as_1".into()),
            Action::SetSalaryRate(2.0),
            Action::OpenBranch,
            Action::HireWorker,
            Action::UpgradeOffice,
        ] {
            let next = reduce(&s, &action, Ctx::new(&catalog, &config), 0, &mut rng);
            assert_eq!(next, s, "{action:?}");
        }
    }

    #[test]
    fn apply_reports_effects() {
        let catalog = Catalog::standard();
        let config = SimConfig::default();
        let ctx = Ctx::new(&catalog, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut s = GameState::new();
        s.balance = 30_000.0;
        s.upgrades.insert("soft_dating".into(), 1);
        assert_eq!(
            apply(&mut s, &Action::Click, ctx, 0, &mut rng),
            Ok(Effect::Clicked(2.0))
        );
        let started = apply(&mut s, &Action::StartScheme("scheme_fake_lottery".into()), ctx, 0, &mut rng);
        assert_eq!(started, Ok(Effect::SchemeStarted("as_1".into())));
        assert_eq!(apply(&mut s, &Action::CreateTeam, ctx, 0, &mut rng), Ok(Effect::None));
        assert_eq!(s.business_stage, BusinessStage::RemoteTeam);
        assert_eq!(
            apply(&mut s, &Action::SetStrategy(TeamStrategy::Safe), ctx, 0, &mut rng),
            Ok(Effect::None)
        );
        assert_eq!(s.team_strategy, TeamStrategy::Safe);
    }

    #[test]
    fn actions_serialize_for_replays() {
        let script = vec![
            Action::Click,
            Action::BuyUpgrade("tool_proxy".into()),
            Action::SetSalaryRate(0.5),
            Action::SetStrategy(TeamStrategy::Aggressive),
        ];
        let json = serde_json::to_string(&script).unwrap();
        let back: Vec<Action> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }
}
