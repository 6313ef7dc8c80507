//! Stage definitions for one scrape cycle
//!
//! Stages run strictly in declaration order.
use std::fmt;

/// The step a scrape cycle is in (or failed in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CycleStage {
    Init,
    Login,
    FetchWan,
    FetchClients,
    FetchStats,
    Reconcile,
    Publish,
}

impl CycleStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Login => "login",
            Self::FetchWan => "fetch_wan",
            Self::FetchClients => "fetch_clients",
            Self::FetchStats => "fetch_stats",
            Self::Reconcile => "reconcile",
            Self::Publish => "publish",
        }
    }
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
