//! Fixed timestep simulation tick
//!
//! Advances the arena by one tick in a fixed order: bullets move, enemies
//! move and steer, bullets hit enemies, enemies hit the player, then the
//! round-clear check. Input is applied by the session before `step`.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::shape::Shape;
use super::state::ArenaState;
use crate::tuning::Tuning;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutcomeEvent {
    EnemyKilled { enemy: EntityId, bullet: EntityId },
    /// Terminal for the round
    PlayerHit { enemy: EntityId },
    /// Enemy collection emptied without the player being hit
    RoundCleared,
}

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    tuning: Tuning,
}

impl SimulationEngine {
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Advance the arena by one tick and report what happened, in order.
    /// The arena's own tuning drives the tick.
    pub fn step(&self, arena: &mut ArenaState) -> Vec<OutcomeEvent> {
        debug_assert_eq!(self.tuning, arena.tuning, "engine and arena tuning differ");
        let tuning = arena.tuning;
        let mut events = Vec::new();

        for bullet in &mut arena.bullets {
            bullet.step();
        }
        cull_stray_bullets(arena);

        let player_pos = arena.player.pos;
        for enemy in &mut arena.enemies {
            enemy.step();
            enemy.update_velocity(player_pos, &tuning);
        }

        resolve_bullet_hits(arena, &mut events);

        let player_shape = arena.player.shape();
        if let Some(enemy) = arena
            .enemies
            .iter()
            .find(|e| player_shape.intersects(&e.shape()))
        {
            events.push(OutcomeEvent::PlayerHit { enemy: enemy.id });
            return events;
        }

        if arena.enemies.is_empty() {
            events.push(OutcomeEvent::RoundCleared);
        }

        events
    }

}

/// Drop bullets that have left the arena with no chance of a hit
fn cull_stray_bullets(arena: &mut ArenaState) {
    let margin = arena.tuning.bullet_length + arena.tuning.enemy_size;
    let size = arena.tuning.arena_size;
    let field = Shape::rect(
        glam::Vec2::splat(-margin),
        size + 2.0 * margin,
        size + 2.0 * margin,
    );
    arena.bullets.retain(|b| field.intersects(&b.shape()));
}

/// Pair each bullet with the first live enemy it touches (collection order),
/// then remove all pairs at once. A bullet kills at most one enemy and an
/// enemy dies to at most one bullet.
fn resolve_bullet_hits(arena: &mut ArenaState, events: &mut Vec<OutcomeEvent>) {
    let mut spent_bullets = Vec::new();
    let mut dead_enemies = Vec::new();

    for bullet in &arena.bullets {
        let shape = bullet.shape();
        let hit = arena
            .enemies
            .iter()
            .find(|e| !dead_enemies.contains(&e.id) && shape.intersects(&e.shape()));
        if let Some(enemy) = hit {
            dead_enemies.push(enemy.id);
            spent_bullets.push(bullet.id);
            events.push(OutcomeEvent::EnemyKilled {
                enemy: enemy.id,
                bullet: bullet.id,
            });
        }
    }

    if dead_enemies.is_empty() {
        return;
    }
    arena.enemies.retain(|e| !dead_enemies.contains(&e.id));
    arena.bullets.retain(|b| !spent_bullets.contains(&b.id));
    log::debug!(
        "{} enemies killed, {} remaining",
        dead_enemies.len(),
        arena.enemies.len()
    );
}
