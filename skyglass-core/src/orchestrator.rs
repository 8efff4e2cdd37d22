//! Per-lookup coordination: fetch, present, record history, report errors.
//!
//! Each lookup moves `Idle/Success/Failed -> Loading -> Success|Failed`.
//! Concurrent lookups are not de-duplicated or cancelled; whichever response
//! resolves last owns the display and the state.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    error::LookupError,
    geolocation::GeolocationProvider,
    history::{HistoryList, HistoryStore},
    model::WeatherQuery,
    presenter,
    provider::WeatherProvider,
    storage::KeyValueStore,
    surface::{LoadingIndicator, PresentationSurface},
    theme::{Theme, ThemeStore},
};

pub const CITY_NOT_FOUND: &str = "City not found. Try again.";
pub const CITY_FAILED: &str = "Failed to fetch weather. Check your connection and try again.";
pub const LOCATION_NOT_FOUND: &str = "Could not fetch weather data for your location.";
pub const LOCATION_FAILED: &str =
    "Failed to fetch weather for your location. Please search manually.";
pub const NO_SUCH_HISTORY_ENTRY: &str = "No such entry in search history.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// User-facing text for a failed lookup.
pub fn failure_message(query: &WeatherQuery, err: &LookupError) -> &'static str {
    match (query, err.is_not_found()) {
        (WeatherQuery::City(_), true) => CITY_NOT_FOUND,
        (WeatherQuery::City(_), false) => CITY_FAILED,
        (WeatherQuery::Coords(_), true) => LOCATION_NOT_FOUND,
        (WeatherQuery::Coords(_), false) => LOCATION_FAILED,
    }
}

pub struct LookupOrchestrator {
    provider: Box<dyn WeatherProvider>,
    surface: Arc<dyn PresentationSurface>,
    history: HistoryStore,
    themes: ThemeStore,
    default_city: String,
    state: Mutex<LookupState>,
}

impl LookupOrchestrator {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        surface: Arc<dyn PresentationSurface>,
        store: Arc<dyn KeyValueStore>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            surface,
            history: HistoryStore::new(store.clone()),
            themes: ThemeStore::new(store),
            default_city: default_city.into(),
            state: Mutex::new(LookupState::Idle),
        }
    }

    pub fn state(&self) -> LookupState {
        *self.state.lock()
    }

    pub fn history(&self) -> HistoryList {
        self.history.load()
    }

    /// Applies the persisted theme and draws the persisted history.
    pub fn start(&self) -> Theme {
        let theme = self.apply_saved_theme();
        self.surface.render_history(&self.history.load());
        theme
    }

    pub fn apply_saved_theme(&self) -> Theme {
        let theme = self.themes.load();
        self.surface.apply_theme(theme.is_dark());
        theme
    }

    pub async fn lookup_by_city(&self, name: &str) -> LookupState {
        self.lookup(WeatherQuery::city(name)).await
    }

    pub async fn lookup_by_coords(&self, latitude: f64, longitude: f64) -> LookupState {
        self.lookup(WeatherQuery::coords(latitude, longitude)).await
    }

    /// Looks up the current position, or the default city if the position
    /// is denied or unavailable.
    pub async fn lookup_from_location(&self, geo: &dyn GeolocationProvider) -> LookupState {
        match geo.current_position().await {
            Ok(pos) => self.lookup_by_coords(pos.latitude, pos.longitude).await,
            Err(err) => {
                warn!(error = %err, city = %self.default_city, "location unavailable, showing default city");
                let city = self.default_city.clone();
                self.lookup_by_city(&city).await
            }
        }
    }

    /// Repeats the lookup for a history entry, 0 being the most recent.
    pub async fn replay(&self, index: usize) -> LookupState {
        let history = self.history.load();
        match history.get(index) {
            Some(city) => self.lookup_by_city(city).await,
            None => {
                self.surface.show_error(NO_SUCH_HISTORY_ENTRY);
                self.set_state(LookupState::Failed)
            }
        }
    }

    pub async fn lookup(&self, query: WeatherQuery) -> LookupState {
        self.set_state(LookupState::Loading);
        self.surface.clear_error();
        let _loading = LoadingIndicator::raise(self.surface.as_ref());

        match self.provider.fetch_current_and_forecast(&query).await {
            Ok((current, forecast)) => {
                let snapshot = presenter::to_snapshot(&current);
                let series = presenter::to_forecast_series(&forecast);

                self.surface.render(&snapshot);
                self.surface.render_forecast(&series);

                let history = self.history.record_success(&snapshot.city_name);
                self.surface.render_history(&history);

                info!(%query, city = %snapshot.city_name, days = series.len(), "weather lookup succeeded");
                self.set_state(LookupState::Success)
            }
            Err(err) => {
                warn!(%query, error = %err, "weather lookup failed");
                self.surface.show_error(failure_message(&query, &err));
                self.set_state(LookupState::Failed)
            }
        }
    }

    fn set_state(&self, state: LookupState) -> LookupState {
        *self.state.lock() = state;
        state
    }
}
