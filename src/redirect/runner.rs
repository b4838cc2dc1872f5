//! Async driver that races the redirect timer against browser events.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use super::session::{BrowserEvent, Navigator, RedirectSession, Resolution};
use super::state::RedirectState;
use crate::error::DeepLinkError;
use crate::options::AppUrls;

/// How long the page waits for a focus or visibility signal before deciding.
///
/// The same value is embedded in the generated script.
pub const REDIRECT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Outcome of a completed redirect race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectReport {
    /// Rule that ended the race.
    pub resolution: Resolution,
    /// URL navigated to on resolution.
    pub target: String,
    /// Time from entering `Racing` to resolution.
    pub elapsed: Duration,
}

/// Drives one [`RedirectSession`] to completion.
///
/// The timer is a tokio sleep, so tests can run the race on a paused clock.
pub struct RedirectRunner<N> {
    session: RedirectSession,
    navigator: N,
    timeout: Duration,
}

impl<N: Navigator> RedirectRunner<N> {
    /// Create a runner for a page load with the given user agent.
    pub fn new(urls: &AppUrls, user_agent: &str, navigator: N) -> Self {
        Self {
            session: RedirectSession::on_load(urls, user_agent),
            navigator,
            timeout: REDIRECT_TIMEOUT,
        }
    }

    /// Override the redirect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(&self) -> &RedirectSession {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Begin the session and race the timer against `events`.
    ///
    /// Returns as soon as the race resolves; the timer is dropped at that
    /// point, so a focus-triggered resolution is never followed by a timer
    /// navigation. If the event source closes first, the timer decides.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<BrowserEvent>,
    ) -> crate::Result<RedirectReport> {
        let started = Instant::now();
        self.session.begin(&mut self.navigator)?;

        let timer = tokio::time::sleep(self.timeout);
        tokio::pin!(timer);
        let mut events_open = true;

        let outcome = loop {
            tokio::select! {
                _ = &mut timer => {
                    break self.session.handle(BrowserEvent::TimerElapsed, &mut self.navigator);
                }
                event = events.recv(), if events_open => match event {
                    Some(event) => {
                        if let Some(resolution) = self.session.handle(event, &mut self.navigator) {
                            break Some(resolution);
                        }
                    }
                    None => {
                        debug!("event source closed, waiting for timer");
                        events_open = false;
                    }
                },
            }
        };

        let resolution = outcome.ok_or_else(|| DeepLinkError::InvalidStateTransition {
            from: self.session.state(),
            to: RedirectState::Resolved,
        })?;

        let report = RedirectReport {
            resolution,
            target: resolution.target(self.session.targets()).to_string(),
            elapsed: started.elapsed(),
        };
        info!(
            resolution = ?report.resolution,
            to_store = report.resolution.is_store(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "redirect race finished"
        );
        Ok(report)
    }
}
