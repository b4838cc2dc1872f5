//! Per-page-load redirect session.

use tracing::{debug, info};

use super::platform::Platform;
use super::state::RedirectState;
use crate::options::AppUrls;

/// Receives navigation requests; the `window.location` setter.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

/// A [`Navigator`] that records every navigation in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationLog {
    entries: Vec<String>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All navigations issued so far, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The navigation that was issued last, if any.
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&mut self, url: &str) {
        self.entries.push(url.to_string());
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, url: &str) {
        (**self).navigate(url);
    }
}

/// `document.visibilityState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Visible,
    Hidden,
}

/// Signals observed while racing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The window lost focus.
    Blur,
    /// The window regained focus.
    Focus,
    /// The document's visibility changed.
    VisibilityChange(VisibilityState),
    /// The redirect timer expired.
    TimerElapsed,
}

/// Which rule ended the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Timer expired while the page still had focus: the scheme had no
    /// handler, so send the user to the store.
    StoreAfterTimeout,
    /// Timer expired after the page lost focus: the app plausibly opened.
    FallbackAfterTimeout,
    /// The page was hidden and then regained focus.
    FallbackOnReturn,
}

impl Resolution {
    /// The URL this resolution navigates to.
    pub fn target<'a>(&self, targets: &'a RedirectTargets) -> &'a str {
        match self {
            Resolution::StoreAfterTimeout => &targets.store_url,
            Resolution::FallbackAfterTimeout | Resolution::FallbackOnReturn => {
                &targets.fallback_url
            }
        }
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Resolution::StoreAfterTimeout)
    }
}

/// The three URLs a session can navigate to, chosen once per page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    pub app_url: String,
    pub store_url: String,
    pub fallback_url: String,
}

impl RedirectTargets {
    /// Pick the app and store pair for `platform`; the fallback is shared.
    pub fn resolve(urls: &AppUrls, platform: Platform) -> Self {
        let (app_url, store_url) = match platform {
            Platform::Ios => (&urls.ios_app, &urls.ios_store),
            Platform::Other => (&urls.android_app, &urls.android_store),
        };

        Self {
            app_url: app_url.clone(),
            store_url: store_url.clone(),
            fallback_url: urls.fallback.clone(),
        }
    }
}

/// State of one redirect attempt.
///
/// Created in [`RedirectState::Idle`] by [`on_load`](Self::on_load), moved to
/// `Racing` by [`begin`](Self::begin), and resolved by the first decisive
/// [`BrowserEvent`]. Events outside `Racing` are ignored.
#[derive(Debug, Clone)]
pub struct RedirectSession {
    state: RedirectState,
    platform: Platform,
    targets: RedirectTargets,
    has_focus: bool,
    did_hide: bool,
    resolution: Option<Resolution>,
}

impl RedirectSession {
    /// Classify `user_agent` and resolve the targets, as on `DOMContentLoaded`.
    pub fn on_load(urls: &AppUrls, user_agent: &str) -> Self {
        let platform = Platform::detect(user_agent);
        debug!(?platform, "classified user agent");

        Self {
            state: RedirectState::Idle,
            platform,
            targets: RedirectTargets::resolve(urls, platform),
            has_focus: true,
            did_hide: false,
            resolution: None,
        }
    }

    /// Enter `Racing` and attempt the app-scheme navigation.
    ///
    /// Fails if the session has already begun.
    pub fn begin<N: Navigator>(&mut self, navigator: &mut N) -> crate::Result<()> {
        self.state.transition_to(RedirectState::Racing)?;
        self.has_focus = true;
        self.did_hide = false;

        debug!(url = %self.targets.app_url, "attempting app navigation");
        navigator.navigate(&self.targets.app_url);
        Ok(())
    }

    /// Apply one browser event.
    ///
    /// Returns the resolution when this event ends the race. Once resolved,
    /// further events are inert and return `None`.
    pub fn handle<N: Navigator>(
        &mut self,
        event: BrowserEvent,
        navigator: &mut N,
    ) -> Option<Resolution> {
        if !self.state.accepts_events() {
            if self.state.is_terminal() {
                debug!(?event, "event after resolution ignored");
            } else {
                debug!(?event, "event before begin ignored");
            }
            return None;
        }

        let resolution = match event {
            BrowserEvent::Blur => {
                self.has_focus = false;
                None
            }
            BrowserEvent::VisibilityChange(VisibilityState::Hidden) => {
                self.did_hide = true;
                None
            }
            BrowserEvent::VisibilityChange(VisibilityState::Visible) => None,
            BrowserEvent::Focus if self.did_hide => Some(Resolution::FallbackOnReturn),
            BrowserEvent::Focus => None,
            BrowserEvent::TimerElapsed if self.has_focus => Some(Resolution::StoreAfterTimeout),
            BrowserEvent::TimerElapsed => Some(Resolution::FallbackAfterTimeout),
        };

        match resolution {
            Some(resolution) => self.resolve(resolution, navigator),
            None => {
                debug!(?event, has_focus = self.has_focus, did_hide = self.did_hide, "observed");
                None
            }
        }
    }

    fn resolve<N: Navigator>(
        &mut self,
        resolution: Resolution,
        navigator: &mut N,
    ) -> Option<Resolution> {
        self.state.transition_to(RedirectState::Resolved).ok()?;
        self.resolution = Some(resolution);

        let target = resolution.target(&self.targets);
        info!(?resolution, url = %target, "redirect resolved");
        navigator.navigate(target);
        Some(resolution)
    }

    pub fn state(&self) -> RedirectState {
        self.state
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn targets(&self) -> &RedirectTargets {
        &self.targets
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn did_hide(&self) -> bool {
        self.did_hide
    }

    /// How the race ended, once it has.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }
}
