//! Lone Survivor headless driver
//!
//! Runs an attract-mode session with the autopilot at a simulated 60 fps
//! and prints the final render snapshot as JSON.
//!
//! Usage: `lone-survivor [settings.json]`

use std::path::PathBuf;

use lone_survivor::sim::autopilot;
use lone_survivor::{FixedTimestep, GameSession, InputEvent, SessionState, Settings};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after two minutes of simulated play
const MAX_FRAMES: u32 = 60 * 120;
/// Ticks between autopilot shots
const FIRE_COOLDOWN: u64 = 6;

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let mut clock = FixedTimestep::new(settings.tick_rate_hz);
    let mut session = GameSession::new(settings);
    log::info!("Lone Survivor (headless) starting...");

    session.handle_input(InputEvent::PointerClick);

    let mut frames = 0;
    'frames: while frames < MAX_FRAMES {
        frames += 1;
        for _ in 0..clock.advance(FRAME_DT) {
            match session.state() {
                SessionState::Playing { .. } => {
                    let cmd = autopilot(session.arena());
                    if let Some(dir) = cmd.move_to {
                        session.handle_input(InputEvent::Move(dir));
                    }
                    if cmd.fire && session.ticks() % FIRE_COOLDOWN == 0 {
                        session.handle_input(InputEvent::Fire);
                    }
                    for event in session.tick() {
                        log::debug!("{event:?}");
                    }
                }
                SessionState::Break => session.handle_input(InputEvent::PointerClick),
                SessionState::End(outcome) => {
                    log::info!("{outcome:?} after {} ticks", session.ticks());
                    break 'frames;
                }
                SessionState::Splash => break 'frames,
            }
        }
    }
    if frames >= MAX_FRAMES {
        log::warn!("Stopped after {MAX_FRAMES} frames in {:?}", session.state());
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
