//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod entity;
pub mod shape;
pub mod state;
pub mod tick;

pub use autopilot::{PilotCommand, autopilot};
pub use entity::{Bullet, Direction, Enemy, EnemyKind, EntityId, EntityIds, FireMode, Player};
pub use shape::{Shape, intersects};
pub use state::ArenaState;
pub use tick::{OutcomeEvent, SimulationEngine};
