//! Tradable assets: a bounded random walk over prices, plus buying and
//! selling single units at the current price.

use rand::Rng;

use super::catalog::{AssetItem, Catalog};
use super::logic::{Ctx, Rejected};
use super::state::GameState;

/// Chance per step of a pump kick.
pub const PUMP_CHANCE: f64 = 0.05;
pub const PUMP_FACTOR: f64 = 1.15;
/// Chance per step of a dump kick, rolled independently of the pump.
pub const DUMP_CHANCE: f64 = 0.05;
pub const DUMP_FACTOR: f64 = 0.85;

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Fill in a price for every asset that has none yet. Idempotent.
pub fn seed_prices(state: &mut GameState, catalog: &Catalog) {
    for asset in &catalog.assets {
        state
            .asset_prices
            .entry(asset.id.to_string())
            .or_insert(asset.base_price);
    }
}

/// Current price of `id`, or its base price if it was never walked.
pub fn current_price(state: &GameState, asset: &AssetItem) -> f64 {
    state
        .asset_prices
        .get(asset.id)
        .copied()
        .unwrap_or(asset.base_price)
}

/// One step of the walk for a single price.
pub fn next_price(price: f64, volatility: f64, floor: f64, decimals: u32, rng: &mut impl Rng) -> f64 {
    let change = (rng.gen::<f64>() * 2.0 - 1.0) * volatility;
    let mut trend = 1.0;
    if rng.gen::<f64>() < PUMP_CHANCE {
        trend *= PUMP_FACTOR;
    }
    if rng.gen::<f64>() < DUMP_CHANCE {
        trend *= DUMP_FACTOR;
    }
    round_to((price * (1.0 + change) * trend).max(floor), decimals).max(floor)
}

/// Advance every catalog asset one step.
pub fn walk_prices(state: &mut GameState, ctx: Ctx, rng: &mut impl Rng) {
    seed_prices(state, ctx.catalog);
    let floor = ctx.config.price_floor;
    let decimals = ctx.config.price_decimals;
    for asset in &ctx.catalog.assets {
        let price = current_price(state, asset);
        let next = next_price(price, asset.volatility, floor, decimals, rng);
        state.asset_prices.insert(asset.id.to_string(), next);
    }
}

/// Buy one unit at the current price.
pub fn buy_asset(state: &mut GameState, ctx: Ctx, id: &str) -> Result<(), Rejected> {
    let asset = ctx
        .catalog
        .asset(id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    let price = current_price(state, asset);
    if state.balance < price {
        return Err(Rejected::InsufficientFunds {
            needed: price,
            available: state.balance,
        });
    }
    state.balance -= price;
    *state.owned_assets.entry(id.to_string()).or_insert(0) += 1;
    Ok(())
}

/// Sell one unit at the current price. Proceeds that would overflow the
/// bank limit are refused rather than discarded.
pub fn sell_asset(state: &mut GameState, ctx: Ctx, id: &str) -> Result<(), Rejected> {
    let asset = ctx
        .catalog
        .asset(id)
        .ok_or_else(|| Rejected::UnknownItem(id.to_string()))?;
    let units = state.asset_units(id);
    if units == 0 {
        return Err(Rejected::NoUnits(id.to_string()));
    }
    let price = current_price(state, asset);
    if state.balance + price > ctx.stats(state).bank_limit {
        return Err(Rejected::BankOverflow);
    }
    state.balance += price;
    state.owned_assets.insert(id.to_string(), units - 1);
    Ok(())
}
