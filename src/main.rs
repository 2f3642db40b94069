//! Headless runner: plays a session with a simple auto-clicker and logs
//! what happens.
//!
//! Environment:
//! - `TYCOON_CONFIG`: path to a JSON `SimConfig` (optional)
//! - `TYCOON_SAVE`: save file path (defaults to `<storage_key>.json`)
//! - `TYCOON_RUN_SECS`: how long to run (defaults to 60)
//! - `RUST_LOG`: log filter (defaults to `info`)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

/// In the browser the host page drives `TycoonGame` through the library.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use scam_tycoon::time::{Clock, SystemClock};
    use scam_tycoon::tycoon::actions::Action;
    use scam_tycoon::tycoon::advisor::HintAdvisor;
    use scam_tycoon::tycoon::catalog::Catalog;
    use scam_tycoon::tycoon::save::FileStore;
    use scam_tycoon::{SimConfig, TycoonGame};
    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;

    const CONFIG_ENV_VAR: &str = "TYCOON_CONFIG";
    const SAVE_ENV_VAR: &str = "TYCOON_SAVE";
    const RUN_SECS_ENV_VAR: &str = "TYCOON_RUN_SECS";
    const DEFAULT_RUN_SECS: u64 = 60;
    const FRAME: Duration = Duration::from_millis(200);

    fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    fn load_config() -> SimConfig {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return SimConfig::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => SimConfig::from_json(&json).unwrap_or_else(|e| {
                warn!(%path, error = %e, "invalid config, using defaults");
                SimConfig::default()
            }),
            Err(e) => {
                warn!(%path, error = %e, "unreadable config, using defaults");
                SimConfig::default()
            }
        }
    }

    fn run_secs() -> u64 {
        std::env::var(RUN_SECS_ENV_VAR)
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_RUN_SECS)
    }

    pub fn run() {
        init_tracing();
        let config = load_config();
        let save_path = std::env::var(SAVE_ENV_VAR)
            .unwrap_or_else(|_| format!("{}.json", config.storage_key));
        let clock = SystemClock;
        let start = clock.now_ms();
        let deadline = start + run_secs() * 1000;
        info!(save = %save_path, "=== Scam Tycoon ===");

        let store = Box::new(FileStore::new(save_path));
        let mut game = TycoonGame::new(config, Catalog::standard(), store, start);
        let mut mark = 0;

        loop {
            let now = clock.now_ms();
            if now >= deadline {
                break;
            }
            let _ = game.dispatch(&Action::Click, now);
            game.pump(now);

            let ready: Vec<String> = game
                .snapshot()
                .active_schemes
                .iter()
                .filter(|s| s.is_ready)
                .map(|s| s.id.clone())
                .collect();
            for id in ready {
                let _ = game.dispatch(&Action::ClaimScheme(id), now);
            }

            for entry in game.log_since(mark) {
                info!("{}", entry.text);
            }
            mark = game.log_total();
            std::thread::sleep(FRAME);
        }

        game.shutdown(clock.now_ms());
        let stats = game.stats();
        info!(
            balance = game.snapshot().balance,
            lifetime = game.snapshot().lifetime_earnings,
            passive = stats.total_passive_income,
            "run finished"
        );
        info!("advisor: {}", game.advice(&mut HintAdvisor));
    }
}
