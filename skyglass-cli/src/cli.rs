use std::{io::IsTerminal, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, CustomType, Password, Text};
use skyglass_core::{
    Config, ConfiguredLocation, Coordinates, FileStore, HistoryStore, KeyValueStore,
    LookupOrchestrator, LookupState, PresentationSurface, Theme, ThemeStore,
    provider::provider_from_config,
};

use crate::terminal::TerminalSurface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyglass", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Disable colored headings.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Defaults to `here`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key, default city and home coordinates.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. `Paris` or `New York`.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Show weather for a latitude/longitude pair.
    #[command(allow_negative_numbers = true)]
    Coords { latitude: f64, longitude: f64 },

    /// Show weather for the configured home position, or the default city.
    Here,

    /// List recent searches.
    History {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Repeat a recent search; 1 is the most recent.
    Replay {
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        position: u16,
    },

    /// Show or change the display theme.
    Theme { mode: Option<ThemeMode> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
    Toggle,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let color = !self.no_color && std::io::stdout().is_terminal();
        let surface = Arc::new(TerminalSurface::new(color));
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::in_data_dir()?);

        match self.command.unwrap_or(Command::Here) {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::History { clear } => {
                let history = HistoryStore::new(store);
                let list = if clear { history.clear() } else { history.load() };
                surface.render_history(&list);
                Ok(ExitCode::SUCCESS)
            }
            Command::Theme { mode } => {
                let theme = apply_theme_mode(&ThemeStore::new(store), mode);
                println!("{theme}");
                Ok(ExitCode::SUCCESS)
            }
            lookup => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let orchestrator =
                    LookupOrchestrator::new(provider, surface, store, config.default_city.clone());

                let state = run_lookup(&orchestrator, &config, lookup).await;
                Ok(if state == LookupState::Success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
        }
    }
}

/// Shows the stored theme, or sets/toggles and persists it.
fn apply_theme_mode(themes: &ThemeStore, mode: Option<ThemeMode>) -> Theme {
    match mode {
        None => themes.load(),
        Some(ThemeMode::Toggle) => themes.toggle(),
        Some(ThemeMode::Light) => {
            themes.save(Theme::Light);
            Theme::Light
        }
        Some(ThemeMode::Dark) => {
            themes.save(Theme::Dark);
            Theme::Dark
        }
    }
}

async fn run_lookup(orchestrator: &LookupOrchestrator, config: &Config, cmd: Command) -> LookupState {
    // `here` mirrors a fresh page load: saved history is shown whatever the lookup does.
    if matches!(cmd, Command::Here) {
        orchestrator.start();
    } else {
        orchestrator.apply_saved_theme();
    }

    match cmd {
        Command::Show { city } => orchestrator.lookup_by_city(&city.join(" ")).await,
        Command::Coords { latitude, longitude } => {
            orchestrator.lookup_by_coords(latitude, longitude).await
        }
        Command::Replay { position } => orchestrator.replay(usize::from(position) - 1).await,
        _ => orchestrator.lookup_from_location(&ConfiguredLocation::new(config.home)).await,
    }
}

fn configure() -> anyhow::Result<()> {
    // Read the file directly so an environment key is not written back.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = default_city.trim().to_string();

    let set_home = Confirm::new("Set home coordinates?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read answer")?;

    config.home = if set_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a decimal number")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a decimal number")
            .prompt()
            .context("Failed to read longitude")?;
        Some(Coordinates { latitude, longitude })
    } else {
        None
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
