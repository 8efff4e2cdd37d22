use crate::{
    history::HistoryList,
    model::{ForecastEntry, WeatherSnapshot},
};

/// Whatever draws the widget. The orchestrator only calls into it; each call
/// replaces the corresponding region wholesale.
pub trait PresentationSurface: Send + Sync {
    fn render(&self, snapshot: &WeatherSnapshot);

    fn render_forecast(&self, series: &[ForecastEntry]);

    fn render_history(&self, history: &HistoryList);

    /// Replaces any message currently shown.
    fn show_error(&self, message: &str);

    fn clear_error(&self);

    fn show_loading(&self, loading: bool);

    fn apply_theme(&self, is_dark: bool);
}

/// Raises the loading indicator and lowers it again when dropped, on every
/// exit path.
pub(crate) struct LoadingIndicator<'a> {
    surface: &'a dyn PresentationSurface,
}

impl<'a> LoadingIndicator<'a> {
    pub(crate) fn raise(surface: &'a dyn PresentationSurface) -> Self {
        surface.show_loading(true);
        Self { surface }
    }
}

impl Drop for LoadingIndicator<'_> {
    fn drop(&mut self) {
        self.surface.show_loading(false);
    }
}
