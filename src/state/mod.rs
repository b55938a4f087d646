/// Snapshot fan-out to viewers.
pub mod broadcaster;
/// Match clock arithmetic.
pub mod clock;
/// Published scoreboard record.
pub mod match_state;
/// Team abbreviations.
pub mod short_code;
/// Locked match record.
pub mod store;

use std::sync::Arc;

use crate::config::AppConfig;

pub use self::broadcaster::{Broadcaster, Subscription};
pub use self::match_state::MatchState;
pub use self::store::{MatchRecord, StateStore};

/// Handle cloned into every handler and task.
pub type SharedState = Arc<AppState>;

/// Central application state injected into every handler and background task.
pub struct AppState {
    config: AppConfig,
    store: Arc<StateStore>,
    broadcaster: Broadcaster,
    http: reqwest::Client,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The match record starts from [`MatchState::initial`].
    pub fn new(config: AppConfig) -> SharedState {
        let store = Arc::new(StateStore::new(MatchState::initial()));
        let broadcaster = Broadcaster::new(store.clone(), config.subscriber_buffer());
        Arc::new(Self {
            config,
            store,
            broadcaster,
            http: reqwest::Client::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The match record store.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Viewer fan-out.
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Shared HTTP client used to fetch team logos.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
