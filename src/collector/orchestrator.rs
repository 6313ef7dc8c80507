//! Collector - scrape cycle orchestration
//!
//! Owns the router session and runs the login -> fetch -> reconcile sequence.
//! The session sits behind an async mutex that is held for a whole cycle, so
//! two cycles (or a cycle and a reboot) never race on the session token.

use crate::collector::{retry_bounded, CycleStage};
use crate::config::Config;
use crate::extract::{extract_stats_records, extract_wan_counters, extract_wireless_records};
use crate::model::Snapshot;
use crate::naming::NamingTable;
use crate::reconcile::{apply_naming, merge};
use crate::router::{Page, RouterSession};
use crate::{RouterError, RouterResult};
use chrono::Utc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;

/// Cycles attempted per pull request: the first try plus one retry
pub const PULL_ATTEMPTS: usize = 2;

/// A failed scrape cycle and the stage it failed in
#[derive(Debug, Error)]
#[error("scrape failed at {stage}: {source}")]
pub struct ScrapeError {
    pub stage: CycleStage,
    pub source: RouterError,
}

impl ScrapeError {
    fn at(stage: CycleStage) -> impl FnOnce(RouterError) -> Self {
        move |source| Self { stage, source }
    }
}

/// Scrapes one router
#[derive(Debug)]
pub struct Collector {
    session: Mutex<RouterSession>,
    naming: NamingTable,
    logout_after_scrape: bool,
}

impl Collector {
    /// Creates a collector for the configured router
    ///
    /// No request is made until the first cycle.
    pub fn new(config: &Config, naming: NamingTable) -> RouterResult<Self> {
        let session = RouterSession::new(&config.router)?;
        Ok(Self::with_session(session, naming)
            .logout_after_scrape(config.exporter.logout_after_scrape))
    }

    pub fn with_session(session: RouterSession, naming: NamingTable) -> Self {
        Self {
            session: Mutex::new(session),
            naming,
            logout_after_scrape: false,
        }
    }

    /// Log out of the router at the end of every cycle
    pub fn logout_after_scrape(mut self, enabled: bool) -> Self {
        self.logout_after_scrape = enabled;
        self
    }

    /// Runs a cycle for a pull request, retrying a failed cycle once
    pub async fn scrape(&self) -> Result<Snapshot, ScrapeError> {
        retry_bounded(PULL_ATTEMPTS, move |attempt| async move {
            if attempt > 1 {
                tracing::info!("Retrying scrape cycle (attempt {})", attempt);
            }
            self.run_cycle().await
        })
        .await
    }

    /// Runs exactly one scrape cycle
    ///
    /// Logs in afresh, fetches the WAN, client and statistics pages, and
    /// reconciles the clients. The session lock is held throughout.
    pub async fn run_cycle(&self) -> Result<Snapshot, ScrapeError> {
        let started = Instant::now();
        let mut session = self.session.lock().await;

        let result = self.cycle(&mut session, started).await;

        if self.logout_after_scrape && session.token().is_some() {
            session.logout().await;
        }

        match &result {
            Ok(snapshot) => tracing::debug!(
                "Scrape cycle finished in {:?} with {} clients",
                snapshot.duration,
                snapshot.clients.len()
            ),
            Err(e) => tracing::warn!("Scrape cycle failed: {}", e),
        }

        result
    }

    async fn cycle(
        &self,
        session: &mut RouterSession,
        started: Instant,
    ) -> Result<Snapshot, ScrapeError> {
        let mut stage = CycleStage::Init;
        tracing::trace!("Cycle stage: {}", stage);

        stage = CycleStage::Login;
        tracing::trace!("Cycle stage: {}", stage);
        session.login().await.map_err(ScrapeError::at(stage))?;

        stage = CycleStage::FetchWan;
        tracing::trace!("Cycle stage: {}", stage);
        let wan = session
            .fetch_page(Page::WanStatus)
            .await
            .and_then(|body| extract_wan_counters(&body))
            .map_err(ScrapeError::at(stage))?;

        stage = CycleStage::FetchClients;
        tracing::trace!("Cycle stage: {}", stage);
        let wireless = session
            .fetch_page(Page::ClientList)
            .await
            .map(|body| extract_wireless_records(&body))
            .map_err(ScrapeError::at(stage))?;

        stage = CycleStage::FetchStats;
        tracing::trace!("Cycle stage: {}", stage);
        let stats = session
            .fetch_page(Page::Statistics)
            .await
            .and_then(|body| extract_stats_records(&body))
            .map_err(ScrapeError::at(stage))?;

        stage = CycleStage::Reconcile;
        tracing::trace!("Cycle stage: {}", stage);
        let mut clients = merge(&wireless, &stats);
        apply_naming(&mut clients, &self.naming);

        tracing::trace!("Cycle stage: {}", CycleStage::Publish);
        Ok(Snapshot {
            wan,
            clients,
            taken_at: Utc::now(),
            duration: started.elapsed(),
        })
    }

    /// Reboots the router after a fresh login
    ///
    /// A failed login is returned; the reboot request itself is best effort.
    pub async fn reboot(&self) -> RouterResult<()> {
        let mut session = self.session.lock().await;
        session.login().await?;
        tracing::info!("Rebooting router at {}", session.base());
        session.reboot().await;
        Ok(())
    }
}
