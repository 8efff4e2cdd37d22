use std::{
    io::{self, IsTerminal, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use skyglass_core::{ForecastEntry, HistoryList, PresentationSurface, WeatherSnapshot};
use tracing::debug;

const RESET: &str = "\x1b[0m";
const ACCENT_LIGHT: &str = "\x1b[34m";
const ACCENT_DARK: &str = "\x1b[96m";
const LOADING: &str = "Loading...";

/// Draws the widget as plain text: weather on stdout, errors and the loading
/// line on stderr.
///
/// Output is append-only, so the loading line is erased before anything else
/// is written, and an unchanged history is not printed twice.
#[derive(Debug)]
pub struct TerminalSurface {
    dark: AtomicBool,
    color: bool,
    /// Inline indicator on an interactive stderr, a plain line otherwise.
    inline_loading: bool,
    loading_shown: AtomicBool,
    last_history: Mutex<Option<HistoryList>>,
}

impl TerminalSurface {
    pub fn new(color: bool) -> Self {
        Self {
            dark: AtomicBool::new(false),
            color,
            inline_loading: io::stderr().is_terminal(),
            loading_shown: AtomicBool::new(false),
            last_history: Mutex::new(None),
        }
    }

    fn accent(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let accent = if self.dark.load(Ordering::Relaxed) { ACCENT_DARK } else { ACCENT_LIGHT };
        format!("{accent}{text}{RESET}")
    }

    pub fn write_snapshot(&self, out: &mut impl Write, snapshot: &WeatherSnapshot) -> io::Result<()> {
        let heading = format!("{} ({})", snapshot.city_name, snapshot.date.format("%d/%m/%Y"));

        writeln!(out, "{}  {}", self.accent(&heading), snapshot.icon.glyph())?;
        writeln!(out, "  Temperature: {} °C", snapshot.temperature_c)?;
        writeln!(out, "  Humidity: {}%", snapshot.humidity_pct)?;
        writeln!(out, "  Wind Speed: {} m/s", snapshot.wind_speed)
    }

    pub fn write_forecast(&self, out: &mut impl Write, series: &[ForecastEntry]) -> io::Result<()> {
        if series.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", self.accent(&format!("{}-day forecast", series.len())))?;
        for entry in series {
            writeln!(
                out,
                "  {}  {:<3} Temp: {} °C  Humidity: {}%",
                entry.timestamp.format("%d %b %Y"),
                entry.icon.glyph(),
                entry.temperature_c,
                entry.humidity_pct,
            )?;
        }
        Ok(())
    }

    pub fn write_history(&self, out: &mut impl Write, history: &HistoryList) -> io::Result<()> {
        if history.is_empty() {
            return writeln!(out, "No searches yet.");
        }

        writeln!(out)?;
        writeln!(out, "{}", self.accent("Recent searches"))?;
        for (i, city) in history.iter().enumerate() {
            writeln!(out, "  {:>2}. {city}", i + 1)?;
        }
        Ok(())
    }

    /// Removes an inline loading line, if one is on screen.
    fn erase_loading(&self) {
        if self.loading_shown.swap(false, Ordering::Relaxed) && self.inline_loading {
            let mut err = io::stderr().lock();
            let _ = write!(err, "\r{:width$}\r", "", width = LOADING.len());
            let _ = err.flush();
        }
    }

    fn stdout(&self, write: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>) {
        self.erase_loading();
        let mut out = io::stdout().lock();
        // A closed stdout (e.g. piped into `head`) must not abort the lookup.
        if let Err(err) = write(&mut out).and_then(|()| out.flush()) {
            debug!(error = %err, "failed to write to stdout");
        }
    }
}

impl PresentationSurface for TerminalSurface {
    fn render(&self, snapshot: &WeatherSnapshot) {
        self.stdout(|out| self.write_snapshot(out, snapshot));
    }

    fn render_forecast(&self, series: &[ForecastEntry]) {
        self.stdout(|out| self.write_forecast(out, series));
    }

    fn render_history(&self, history: &HistoryList) {
        {
            let mut last = self.last_history.lock();
            if last.as_ref() == Some(history) {
                return;
            }
            *last = Some(history.clone());
        }
        self.stdout(|out| self.write_history(out, history));
    }

    fn show_error(&self, message: &str) {
        self.erase_loading();
        let mut err = io::stderr().lock();
        if let Err(e) = writeln!(err, "{message}") {
            debug!(error = %e, "failed to write to stderr");
        }
    }

    fn clear_error(&self) {}

    fn show_loading(&self, loading: bool) {
        if !loading {
            self.erase_loading();
            return;
        }
        if self.loading_shown.swap(true, Ordering::Relaxed) {
            return;
        }

        let mut err = io::stderr().lock();
        let written = if self.inline_loading {
            write!(err, "{LOADING}")
        } else {
            writeln!(err, "{LOADING}")
        };
        if let Err(e) = written.and_then(|()| err.flush()) {
            debug!(error = %e, "failed to write loading indicator");
        }
    }

    fn apply_theme(&self, is_dark: bool) {
        self.dark.store(is_dark, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use skyglass_core::IconKey;

    fn plain() -> TerminalSurface {
        TerminalSurface::new(false)
    }

    fn text(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        write(&mut buf).expect("write to buffer");
        String::from_utf8(buf).expect("utf-8 output")
    }

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city_name: "Paris".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"),
            temperature_c: 15,
            humidity_pct: 72,
            wind_speed: 3.61,
            condition_code: "10d".into(),
            icon: IconKey::RainDay,
        }
    }

    #[test]
    fn snapshot_heading_uses_day_month_year() {
        let surface = plain();
        let out = text(|buf| surface.write_snapshot(buf, &snapshot()));

        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Paris (19/10/2026)  🌧"));
        assert_eq!(lines.next(), Some("  Temperature: 15 °C"));
        assert_eq!(lines.next(), Some("  Humidity: 72%"));
        assert_eq!(lines.next(), Some("  Wind Speed: 3.61 m/s"));
    }

    #[test]
    fn forecast_dates_use_short_month() {
        let entry = ForecastEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 10, 20, 12, 0, 0).single().expect("timestamp"),
            temperature_c: -2,
            humidity_pct: 90,
            condition_code: "13d".into(),
            icon: IconKey::Snow,
        };

        let surface = plain();
        let out = text(|buf| surface.write_forecast(buf, &[entry]));

        assert!(out.contains("1-day forecast"));
        assert!(out.contains("20 Oct 2026"), "got {out:?}");
        assert!(out.contains("Temp: -2 °C  Humidity: 90%"));
    }

    #[test]
    fn empty_forecast_writes_nothing() {
        let surface = plain();
        assert_eq!(text(|buf| surface.write_forecast(buf, &[])), "");
    }

    #[test]
    fn empty_history_text() {
        let surface = plain();
        let out = text(|buf| surface.write_history(buf, &HistoryList::default()));
        assert_eq!(out, "No searches yet.\n");
    }

    #[test]
    fn history_is_numbered_from_one() {
        let surface = plain();
        let history = HistoryList::from_entries(["Oslo", "Lima"]);
        let out = text(|buf| surface.write_history(buf, &history));

        assert!(out.contains("   1. Oslo\n"));
        assert!(out.contains("   2. Lima\n"));
    }

    #[test]
    fn color_wraps_heading_in_theme_accent() {
        let surface = TerminalSurface::new(true);
        surface.apply_theme(true);
        let out = text(|buf| surface.write_snapshot(buf, &snapshot()));
        assert!(out.starts_with(&format!("{ACCENT_DARK}Paris (19/10/2026){RESET}")));
    }

    #[test]
    fn output_lowers_a_raised_loading_line() {
        let surface = plain();
        surface.show_loading(true);
        assert!(surface.loading_shown.load(Ordering::Relaxed));

        surface.show_error("City not found. Try again.");
        assert!(!surface.loading_shown.load(Ordering::Relaxed));

        surface.show_loading(true);
        surface.render(&snapshot());
        assert!(!surface.loading_shown.load(Ordering::Relaxed));
    }

    #[test]
    fn unchanged_history_is_remembered_once() {
        let surface = plain();
        let history = HistoryList::from_entries(["Oslo"]);

        surface.render_history(&history);
        surface.render_history(&history);
        assert_eq!(surface.last_history.lock().as_ref(), Some(&history));

        let changed = HistoryList::from_entries(["Lima", "Oslo"]);
        surface.render_history(&changed);
        assert_eq!(surface.last_history.lock().as_ref(), Some(&changed));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn closed_output_is_reported_not_raised() {
        let surface = plain();
        let history = HistoryList::from_entries(["Oslo"]);

        let err = surface.write_snapshot(&mut ClosedPipe, &snapshot()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(surface.write_history(&mut ClosedPipe, &history).is_err());
    }
}
