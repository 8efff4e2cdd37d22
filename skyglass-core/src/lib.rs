//! Core library for the `skyglass` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (current conditions + forecast, fetched together)
//! - Presentation of raw payloads into display-ready records
//! - Persistent search history and theme
//! - The lookup orchestrator driving an abstract presentation surface
//!
//! It is used by `skyglass-cli`, but any other front end can implement
//! [`PresentationSurface`] and reuse it.

pub mod config;
pub mod error;
pub mod geolocation;
pub mod history;
pub mod model;
pub mod orchestrator;
pub mod presenter;
pub mod provider;
pub mod storage;
pub mod surface;
pub mod theme;

pub use config::Config;
pub use error::{LookupError, StorageError};
pub use geolocation::{ConfiguredLocation, GeolocationProvider, LocationError};
pub use history::{HistoryList, HistoryStore};
pub use model::{Coordinates, ForecastEntry, WeatherQuery, WeatherSnapshot};
pub use orchestrator::{LookupOrchestrator, LookupState};
pub use presenter::IconKey;
pub use provider::{WeatherProvider, openweather::OpenWeatherClient};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use surface::PresentationSurface;
pub use theme::{Theme, ThemeStore};
