//! Player, enemy and bullet entities
//!
//! Entities hold value data only (position, velocity, shape). Renderers map
//! them to display nodes through their [`EntityId`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shape::Shape;
use crate::tuning::Tuning;

/// Stable entity identity, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Monotonic id allocator
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in arena space (+y is down)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// How many bullets a single trigger pull produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    Single,
    /// Center shot plus one on each flank (cheat)
    Triple,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub facing: Direction,
    pub radius: f32,
    pub fire_mode: FireMode,
}

impl Player {
    /// New player at the arena center, facing up
    pub fn new(id: EntityId, fire_mode: FireMode, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: tuning.arena_center(),
            facing: Direction::Up,
            radius: tuning.player_size,
            fire_mode,
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::circle(self.pos, self.radius)
    }

    /// Turn to `direction` and step along it, staying inside the arena.
    /// Facing changes even when the step is fully clamped.
    pub fn move_toward(&mut self, direction: Direction, tuning: &Tuning) {
        self.facing = direction;
        let (lo, hi) = tuning.player_bounds();
        let target = self.pos + direction.unit() * tuning.player_speed;
        self.pos = target.clamp(Vec2::splat(lo), Vec2::splat(hi));
    }

    /// Bullets produced by one trigger pull, all travelling along `facing`
    pub fn fire(&self, tuning: &Tuning, ids: &mut EntityIds) -> Vec<Bullet> {
        match self.fire_mode {
            FireMode::Single => vec![Bullet::new(ids.next_id(), self.pos, self.facing, tuning)],
            FireMode::Triple => {
                let lateral = if self.facing.is_horizontal() {
                    Vec2::new(0.0, tuning.player_size)
                } else {
                    Vec2::new(tuning.player_size, 0.0)
                };
                [-1.0, 0.0, 1.0]
                    .into_iter()
                    .map(|k| Bullet::new(ids.next_id(), self.pos + lateral * k, self.facing, tuning))
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    /// Minimum corner of the bullet rectangle
    pub pos: Vec2,
    /// Fixed at creation
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    pub fn new(id: EntityId, pos: Vec2, direction: Direction, tuning: &Tuning) -> Self {
        let (width, height) = if direction.is_horizontal() {
            (tuning.bullet_length, tuning.bullet_width)
        } else {
            (tuning.bullet_width, tuning.bullet_length)
        };
        Self {
            id,
            pos,
            vel: direction.unit() * tuning.bullet_speed,
            width,
            height,
        }
    }

    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    pub fn shape(&self) -> Shape {
        Shape::rect(self.pos, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Diagonal drift, reflecting off the arena edges (round 1)
    Wandering,
    /// Homes in on the player every tick (round 2)
    Pursuing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, vel: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: tuning.enemy_size,
            kind,
        }
    }

    /// Spawn in one of the arena's corner bands with the kind's initial velocity
    pub fn spawn(id: EntityId, kind: EnemyKind, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            spawn_coordinate(tuning.arena_size, rng),
            spawn_coordinate(tuning.arena_size, rng),
        );
        let vel = match kind {
            EnemyKind::Wandering => {
                let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                Vec2::new(sx, sy) * tuning.enemy_speed
            }
            // Steered on the first tick
            EnemyKind::Pursuing => Vec2::ZERO,
        };
        Self::new(id, kind, pos, vel, tuning)
    }

    pub fn shape(&self) -> Shape {
        Shape::circle(self.pos, self.radius)
    }

    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Per-kind steering, run after `step`
    pub fn update_velocity(&mut self, player_pos: Vec2, tuning: &Tuning) {
        match self.kind {
            EnemyKind::Wandering => {
                let size = tuning.arena_size;
                if self.pos.x >= size || self.pos.x <= 0.0 {
                    self.vel.x = -self.vel.x;
                }
                if self.pos.y >= size || self.pos.y <= 0.0 {
                    self.vel.y = -self.vel.y;
                }
            }
            EnemyKind::Pursuing => {
                // Standing on the player: keep the previous heading
                if let Some(dir) = (player_pos - self.pos).try_normalize() {
                    self.vel = dir * tuning.enemy_speed;
                }
            }
        }
    }
}

/// One spawn coordinate, uniform over `[0, size)` minus the open middle band
/// `(size/5, 4*size/5)`
fn spawn_coordinate(size: f32, rng: &mut impl Rng) -> f32 {
    let (band_lo, band_hi) = (size / 5.0, size * 4.0 / 5.0);
    // The outer bands are 2/5 of the range, so this converges fast
    loop {
        let c = rng.random_range(0.0..size);
        if c <= band_lo || c >= band_hi {
            return c;
        }
    }
}
