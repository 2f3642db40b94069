//! Advisor: free-text tips about what to do next.
//!
//! Purely informational. An advisor only ever sees an [`AdvisorSnapshot`]
//! and any failure collapses to a fixed line via [`advice_or_fallback`].

use thiserror::Error;
use tracing::warn;

use super::catalog::{Catalog, CREATE_TEAM_COST};
use super::state::GameState;
use crate::format::format_money;

/// Shown when the advisor fails.
pub const FALLBACK_ADVICE: &str = "Connection dropped. The cops are jamming the signal.";
/// Shown when the advisor answers with nothing.
pub const EMPTY_ADVICE: &str = "Keep working, the marks won't run out.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor unavailable: {0}")]
    Unavailable(String),
}

/// What an advisor is allowed to know.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisorSnapshot {
    pub balance: f64,
    pub job_title: String,
    pub job_vertical: String,
    pub profit_per_second: f64,
    pub reputation: f64,
    pub has_business: bool,
}

impl AdvisorSnapshot {
    pub fn from_state(state: &GameState, catalog: &Catalog) -> Self {
        let job = catalog.job_or_first(&state.current_job_id);
        Self {
            balance: state.balance,
            job_title: job.title.to_string(),
            job_vertical: job.vertical.to_string(),
            profit_per_second: state.profit_per_second,
            reputation: state.reputation,
            has_business: state.has_business,
        }
    }

    /// One-paragraph summary, suitable as a prompt for a remote advisor.
    pub fn describe(&self) -> String {
        let team = if self.has_business {
            "runs a team"
        } else {
            "works alone"
        };
        format!(
            "Balance ${}, {} in {}, ${}/s, reputation {}, {team}.",
            format_money(self.balance),
            self.job_title,
            self.job_vertical,
            format_money(self.profit_per_second),
            self.reputation.floor()
        )
    }
}

pub trait Advisor {
    fn advise(&mut self, snapshot: &AdvisorSnapshot) -> Result<String, AdvisorError>;
}

/// Ask `advisor`, falling back to a fixed line on any failure.
pub fn advice_or_fallback(advisor: &mut dyn Advisor, snapshot: &AdvisorSnapshot) -> String {
    match advisor.advise(snapshot) {
        Ok(text) if text.trim().is_empty() => EMPTY_ADVICE.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "advisor failed, using fallback");
            FALLBACK_ADVICE.to_string()
        }
    }
}

/// Offline rule-based advisor.
#[derive(Clone, Copy, Debug, Default)]
pub struct HintAdvisor;

impl Advisor for HintAdvisor {
    fn advise(&mut self, s: &AdvisorSnapshot) -> Result<String, AdvisorError> {
        let tip = if s.profit_per_second <= 0.0 && s.balance < 1_000.0 {
            "You're broke. Tap harder and rent some tools.".to_string()
        } else if !s.has_business && s.balance >= CREATE_TEAM_COST {
            format!(
                "${} in the bank and still working alone? Put a team together.",
                format_money(s.balance)
            )
        } else if s.has_business && s.profit_per_second >= 1_000.0 {
            "Money's flowing. Expand the office before someone else does.".to_string()
        } else if s.has_business {
            "The team needs software and bodies. Hire and equip them.".to_string()
        } else {
            "Climb the ladder: reputation opens doors, cash pays for them.".to_string()
        };
        Ok(tip)
    }
}
