//! Abalone desktop GUI
//!
//! Play Abalone against another person or the built-in random agent.

use std::path::PathBuf;

use abalone::ui::AbaloneApp;
use abalone::{GameConfig, Layout, MatchType, Player};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MatchArg {
    Hvh,
    Hvc,
    Cvc,
}

impl From<MatchArg> for MatchType {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Hvh => MatchType::HumanVsHuman,
            MatchArg::Hvc => MatchType::HumanVsComputer,
            MatchArg::Cvc => MatchType::ComputerVsComputer,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

#[derive(Debug, Parser)]
#[command(name = "abalone", version, about = "Abalone board game")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting layout: "Standard", "Belgian Daisy" or "German Daisy"
    #[arg(long)]
    layout: Option<String>,

    /// Who controls each side
    #[arg(long, value_enum)]
    match_type: Option<MatchArg>,

    /// Colour seated at the bottom (the human in hvc)
    #[arg(long, value_enum)]
    host: Option<ColorArg>,

    /// Per-turn clock in seconds, both sides
    #[arg(long)]
    clock: Option<u64>,

    /// Move cap per side, 0 for none
    #[arg(long)]
    moves_per_team: Option<u32>,
}

impl Args {
    fn into_config(self) -> abalone::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(layout) = &self.layout {
            config.layout = Layout::from_name(layout);
        }
        if let Some(match_type) = self.match_type {
            config.match_type = match_type.into();
        }
        if let Some(host) = self.host {
            config.host_color = match host {
                ColorArg::Black => Player::Black,
                ColorArg::White => Player::White,
            };
        }
        if let Some(secs) = self.clock {
            config.set_clock(secs);
        }
        if let Some(cap) = self.moves_per_team {
            config.moves_per_team = cap;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("abalone=info")))
        .init();

    let config = Args::parse().into_config()?;
    tracing::info!(
        "Starting {} on {} layout",
        config.match_type.name(),
        config.layout
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([860.0, 600.0])
            .with_title("Abalone"),
        ..Default::default()
    };

    eframe::run_native(
        "Abalone",
        options,
        Box::new(|cc| Ok(Box::new(AbaloneApp::new(cc, config)))),
    )?;
    Ok(())
}
