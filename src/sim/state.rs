//! Arena state
//!
//! Owns every live entity. Collections never hold destroyed entries: removal
//! happens inside the tick that destroys them.

use rand::Rng;

use super::entity::{Bullet, Enemy, EnemyKind, EntityId, EntityIds, FireMode, Player};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct ArenaState {
    /// Fixed for the session
    pub tuning: Tuning,
    pub player: Player,
    /// Spawn order
    pub enemies: Vec<Enemy>,
    /// Fire order
    pub bullets: Vec<Bullet>,
    pub second_round: bool,
    /// Sticky once set; decides the player's fire mode
    pub cheat_enabled: bool,
    ids: EntityIds,
}

impl ArenaState {
    /// Empty arena with a centered single-shot player
    pub fn new(tuning: Tuning) -> Self {
        let mut ids = EntityIds::default();
        let player = Player::new(ids.next_id(), FireMode::Single, &tuning);
        Self {
            tuning,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            second_round: false,
            cheat_enabled: false,
            ids,
        }
    }

    pub fn arena_size(&self) -> f32 {
        self.tuning.arena_size
    }

    pub fn fire_mode(&self) -> FireMode {
        if self.cheat_enabled {
            FireMode::Triple
        } else {
            FireMode::Single
        }
    }

    pub fn enemy_kind(&self) -> EnemyKind {
        if self.second_round {
            EnemyKind::Pursuing
        } else {
            EnemyKind::Wandering
        }
    }

    /// Clear the field, re-center the player and spawn the round's wave
    pub fn start_round(&mut self, rng: &mut impl Rng) {
        self.bullets.clear();
        self.enemies.clear();
        self.player = Player::new(self.ids.next_id(), self.fire_mode(), &self.tuning);
        self.spawn_wave(rng);
    }

    /// Spawn `enemies_per_round` enemies of the current round's kind
    pub fn spawn_wave(&mut self, rng: &mut impl Rng) {
        let kind = self.enemy_kind();
        for _ in 0..self.tuning.enemies_per_round {
            let enemy = Enemy::spawn(self.ids.next_id(), kind, &self.tuning, rng);
            self.enemies.push(enemy);
        }
        log::debug!("Spawned {} {:?} enemies", self.tuning.enemies_per_round, kind);
    }

    /// Pull the trigger; bullets join the arena immediately.
    /// Returns how many were fired.
    pub fn fire(&mut self) -> usize {
        let volley = self.player.fire(&self.tuning, &mut self.ids);
        let count = volley.len();
        self.bullets.extend(volley);
        count
    }

    /// Allocate an id for an entity created outside the arena
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }
}
