//! Sing Pong entry point
//!
//! Headless runner: builds a pitch for a virtual screen, places a paddle at
//! each end and plays a few rounds, logging every goal.
//!
//! Usage: `sing-pong [--settings settings.json]`

use std::path::PathBuf;

use clap::Parser;

use sing_pong::sim::{GameEvent, MatchState, Side, TickInput, tick};
use sing_pong::{PitchError, Settings};

const SCREEN_WIDTH: f64 = 1920.0;
const SCREEN_HEIGHT: f64 = 1080.0;
const ROUNDS: u32 = 5;
/// Give up on a rally after this many ticks
const MAX_RALLY_TICKS: u64 = 100_000;
const PADDLE_HALF_LENGTH: u32 = 8;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play headless Sing Pong rounds", long_about = None)]
struct Args {
    /// JSON settings file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Sing Pong (headless) starting...");

    let settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings from {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut state = MatchState::new(settings);
    if let Err(err) = setup_pitch(&mut state) {
        log::error!("Failed to set up pitch: {}", err);
        std::process::exit(1);
    }

    for round in 1..=ROUNDS {
        let start = state.time_ticks;
        let event = loop {
            if let Some(event) = tick(&mut state, &TickInput::default()) {
                break Some(event);
            }
            if state.time_ticks - start >= MAX_RALLY_TICKS {
                break None;
            }
        };

        match event {
            Some(GameEvent::Goal { scorer }) => {
                println!(
                    "Round {}: goal for {:?} after {} ticks",
                    round,
                    scorer,
                    state.time_ticks - start
                );
            }
            Some(GameEvent::WallBreach { position }) => {
                println!("Round {}: ball escaped at {:?}", round, position);
            }
            None => println!("Round {}: rally still going after {} ticks", round, MAX_RALLY_TICKS),
        }

        tick(
            &mut state,
            &TickInput {
                serve: true,
                ..Default::default()
            },
        );
    }

    println!(
        "Final score: Left {} - {} Right",
        state.score.left, state.score.right
    );
}

/// Build the pitch for the virtual screen and add both paddles
fn setup_pitch(state: &mut MatchState) -> Result<(), PitchError> {
    state.rebuild_grid(SCREEN_HEIGHT, SCREEN_WIDTH)?;
    let Some(grid) = state.grid() else {
        return Ok(());
    };
    let centre = grid.centre_spot();
    let grid = grid
        .with_paddle(2, centre.y, PADDLE_HALF_LENGTH, Side::Left)?
        .with_paddle(grid.width() - 3, centre.y, PADDLE_HALF_LENGTH, Side::Right)?;
    state.replace_grid(grid);
    Ok(())
}
