//! The Lone Survivor - a two-round top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, per-tick step)
//! - `session`: Splash/Playing/Break/End state machine driven by input events
//! - `snapshot`: Read-only view of the session for renderers
//! - `tuning`: Data-driven game balance
//! - `settings`: Loadable runtime settings (tuning, cheat phrase, tick rate, seed)
//! - `clock`: Fixed timestep accumulator

pub mod clock;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use clock::FixedTimestep;
pub use session::{GameSession, InputEvent, Outcome, Round, SessionState};
pub use settings::{Settings, SettingsError};
pub use snapshot::RenderSnapshot;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Maximum ticks run per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena is a square of this side length, origin at the top-left corner
    pub const ARENA_SIZE: f32 = 500.0;
    pub const ENEMIES_PER_ROUND: u32 = 5;

    /// Player defaults (speed in units per tick, size is the circle radius)
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_SIZE: f32 = 15.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_SIZE: f32 = 10.0;

    /// Bullet defaults - long side follows the direction of travel
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_LENGTH: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 2.0;

    /// Typed on the splash screen to start with the triple-shot player
    pub const CHEAT_CODE: &str = "CHEAT";
}
