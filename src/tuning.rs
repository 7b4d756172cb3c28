//! Gameplay tuning
//!
//! Keep this separate from runtime settings (tick rate, seed, cheat phrase).
//! A `Tuning` is fixed for the lifetime of a session.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Side length of the square arena
    pub arena_size: f32,
    /// Enemies spawned at the start of each round
    pub enemies_per_round: u32,

    /// Player translation per move input
    pub player_speed: f32,
    /// Player circle radius (also the lateral spacing of triple shots)
    pub player_size: f32,

    /// Enemy speed in units per tick
    pub enemy_speed: f32,
    /// Enemy circle radius
    pub enemy_size: f32,

    /// Bullet speed in units per tick
    pub bullet_speed: f32,
    /// Bullet extent along its direction of travel
    pub bullet_length: f32,
    /// Bullet extent across its direction of travel
    pub bullet_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_size: ARENA_SIZE,
            enemies_per_round: ENEMIES_PER_ROUND,
            player_speed: PLAYER_SPEED,
            player_size: PLAYER_SIZE,
            enemy_speed: ENEMY_SPEED,
            enemy_size: ENEMY_SIZE,
            bullet_speed: BULLET_SPEED,
            bullet_length: BULLET_LENGTH,
            bullet_width: BULLET_WIDTH,
        }
    }
}

impl Tuning {
    /// Center of the arena (player spawn point)
    pub fn arena_center(&self) -> glam::Vec2 {
        glam::Vec2::splat(self.arena_size / 2.0)
    }

    /// Lowest and highest coordinate the player center may take on either axis
    pub fn player_bounds(&self) -> (f32, f32) {
        (self.player_size, self.arena_size - self.player_size)
    }

    /// Returns the name of the first field that is not a positive finite number
    pub(crate) fn first_invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("arena_size", self.arena_size),
            ("player_speed", self.player_speed),
            ("player_size", self.player_size),
            ("enemy_speed", self.enemy_speed),
            ("enemy_size", self.enemy_size),
            ("bullet_speed", self.bullet_speed),
            ("bullet_length", self.bullet_length),
            ("bullet_width", self.bullet_width),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Some(name);
        }
        // The player must fit inside the arena with room to spare
        if self.player_size * 2.0 >= self.arena_size {
            return Some("player_size");
        }
        None
    }
}
