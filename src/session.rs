//! Game session state machine
//!
//! Splash -> Playing(round 1) -> Break -> Playing(round 2) -> End(Win).
//! Getting hit in either round ends the session with a loss; a click on
//! the end screen starts over from the splash screen.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{ArenaState, Direction, OutcomeEvent, SimulationEngine};
use crate::snapshot::RenderSnapshot;

/// Discrete input delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Arrow key
    Move(Direction),
    /// Fire button
    Fire,
    /// Typed character (cheat entry on the splash screen)
    Character(char),
    /// Mouse/touch press: start, continue, restart, or fire while playing
    PointerClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Splash,
    Playing { round: Round },
    /// Between rounds; the round 2 wave is already spawned
    Break,
    End(Outcome),
}

pub struct GameSession {
    settings: Settings,
    engine: SimulationEngine,
    rng: Pcg32,
    state: SessionState,
    arena: ArenaState,
    cheat_buffer: String,
    /// Moves received since the last tick, applied in order at the next one
    pending_moves: VecDeque<Direction>,
    ticks: u64,
}

impl GameSession {
    /// Settings are sanitized first: see [`Settings::sanitized`]
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New session (seed {seed})");
        let tuning = settings.tuning;
        Self {
            engine: SimulationEngine::new(tuning),
            rng: Pcg32::seed_from_u64(seed),
            state: SessionState::Splash,
            arena: ArenaState::new(tuning),
            cheat_buffer: String::new(),
            pending_moves: VecDeque::new(),
            ticks: 0,
            settings,
        }
    }

    /// Back to the splash screen with a fresh arena and an empty cheat buffer
    pub fn initialize(&mut self) {
        self.state = SessionState::Splash;
        self.arena = ArenaState::new(self.settings.tuning);
        self.cheat_buffer.clear();
        self.pending_moves.clear();
    }

    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.initialize();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn arena(&self) -> &ArenaState {
        &self.arena
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cheat_buffer(&self) -> &str {
        &self.cheat_buffer
    }

    /// Simulation ticks run so far (across restarts)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        match (self.state, input) {
            (SessionState::Splash, InputEvent::Character(c)) => self.type_cheat(c),
            (SessionState::Splash, InputEvent::PointerClick) => self.begin_game(false),
            (SessionState::Playing { .. }, InputEvent::Move(dir)) => {
                self.pending_moves.push_back(dir);
            }
            (SessionState::Playing { .. }, InputEvent::Fire | InputEvent::PointerClick) => {
                let fired = self.arena.fire();
                log::debug!("Fired {fired} bullet(s)");
            }
            (SessionState::Break, InputEvent::PointerClick) => {
                self.set_state(SessionState::Playing {
                    round: Round::Second,
                });
            }
            (SessionState::End(_), InputEvent::PointerClick) => self.restart(),
            _ => {}
        }
    }

    /// Run one simulation tick if a round is in progress
    pub fn tick(&mut self) -> Vec<OutcomeEvent> {
        let SessionState::Playing { round } = self.state else {
            return Vec::new();
        };
        self.ticks += 1;

        let tuning = self.settings.tuning;
        while let Some(dir) = self.pending_moves.pop_front() {
            self.arena.player.move_toward(dir, &tuning);
        }

        let events = self.engine.step(&mut self.arena);
        for event in &events {
            match (event, round) {
                (OutcomeEvent::PlayerHit { .. }, _) => self.set_state(SessionState::End(Outcome::Loss)),
                (OutcomeEvent::RoundCleared, Round::First) => self.enter_break(),
                (OutcomeEvent::RoundCleared, Round::Second) => {
                    self.set_state(SessionState::End(Outcome::Win))
                }
                (OutcomeEvent::EnemyKilled { .. }, _) => {}
            }
        }
        events
    }

    fn type_cheat(&mut self, c: char) {
        self.cheat_buffer.extend(c.to_uppercase());
        if self.cheat_buffer == self.settings.cheat_code {
            self.begin_game(true);
        } else if !self.settings.cheat_code.starts_with(&self.cheat_buffer) {
            self.cheat_buffer.clear();
        }
    }

    /// Start round 1. `cheat` only ever turns the cheat on.
    fn begin_game(&mut self, cheat: bool) {
        self.cheat_buffer.clear();
        self.arena.cheat_enabled |= cheat;
        self.arena.second_round = false;
        self.arena.start_round(&mut self.rng);
        if self.arena.cheat_enabled {
            log::info!("Cheat enabled: triple shot");
        }
        self.set_state(SessionState::Playing {
            round: Round::First,
        });
    }

    /// Round 1 cleared: clear the field and stage the pursuing wave
    fn enter_break(&mut self) {
        self.arena.second_round = true;
        self.arena.start_round(&mut self.rng);
        self.set_state(SessionState::Break);
    }

    fn set_state(&mut self, state: SessionState) {
        log::info!("{:?} -> {:?}", self.state, state);
        self.state = state;
        self.pending_moves.clear();
    }

    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut ArenaState {
        &mut self.arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyKind, EntityId, FireMode, autopilot};
    use glam::Vec2;

    fn session() -> GameSession {
        GameSession::new(Settings {
            seed: Some(1234),
            ..Default::default()
        })
    }

    fn type_str(s: &mut GameSession, text: &str) {
        for c in text.chars() {
            s.handle_input(InputEvent::Character(c));
        }
    }

    /// Replace the wave with stationary enemies at known positions
    fn place_enemies(s: &mut GameSession, kind: EnemyKind, positions: &[Vec2]) -> Vec<EntityId> {
        let arena = s.arena_mut();
        let tuning = arena.tuning;
        arena.enemies.clear();
        positions
            .iter()
            .map(|&pos| {
                let id = arena.next_entity_id();
                arena.enemies.push(Enemy::new(id, kind, pos, Vec2::ZERO, &tuning));
                id
            })
            .collect()
    }

    #[test]
    fn test_starts_on_splash() {
        let s = session();
        assert_eq!(s.state(), SessionState::Splash);
        assert!(s.arena().enemies.is_empty());
        assert!(!s.arena().cheat_enabled);
    }

    #[test]
    fn test_cheat_phrase_starts_game() {
        let mut s = session();
        type_str(&mut s, "CHEA");
        assert_eq!(s.state(), SessionState::Splash);
        assert_eq!(s.cheat_buffer(), "CHEA");
        type_str(&mut s, "T");
        assert_eq!(s.state(), SessionState::Playing { round: Round::First });
        assert!(s.arena().cheat_enabled);
        assert_eq!(s.arena().player.fire_mode, FireMode::Triple);
        assert_eq!(s.arena().enemies.len(), 5);
    }

    #[test]
    fn test_cheat_is_case_insensitive() {
        let mut s = session();
        type_str(&mut s, "cheat");
        assert_eq!(s.state(), SessionState::Playing { round: Round::First });
        assert!(s.arena().cheat_enabled);
    }

    #[test]
    fn test_lowercase_cheat_phrase_in_settings() {
        let mut s = GameSession::new(Settings {
            cheat_code: "xyzzy".into(),
            seed: Some(1234),
            ..Default::default()
        });
        type_str(&mut s, "xyzzy");
        assert_eq!(s.state(), SessionState::Playing { round: Round::First });
        assert!(s.arena().cheat_enabled);
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let mut settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        settings.tuning.arena_size = 0.0;
        let mut s = GameSession::new(settings);
        assert_eq!(s.settings().tuning.arena_size, 500.0);
        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.state(), SessionState::Playing { round: Round::First });
        assert_eq!(s.arena().enemies.len(), 5);
    }

    #[test]
    fn test_wrong_key_resets_buffer() {
        let mut s = session();
        type_str(&mut s, "CHX");
        assert_eq!(s.cheat_buffer(), "");
        type_str(&mut s, "CH");
        assert_eq!(s.cheat_buffer(), "CH");
        assert_eq!(s.state(), SessionState::Splash);
    }

    #[test]
    fn test_click_starts_without_cheat() {
        let mut s = session();
        type_str(&mut s, "CHE");
        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.state(), SessionState::Playing { round: Round::First });
        assert!(!s.arena().cheat_enabled);
        assert!(s.arena().enemies.iter().all(|e| e.kind == EnemyKind::Wandering));
    }

    #[test]
    fn test_cheat_fire_appends_three_bullets() {
        let mut s = session();
        type_str(&mut s, "CHEAT");
        s.handle_input(InputEvent::Fire);
        assert_eq!(s.arena().bullets.len(), 3);

        let mut plain = session();
        plain.handle_input(InputEvent::PointerClick);
        plain.handle_input(InputEvent::Fire);
        assert_eq!(plain.arena().bullets.len(), 1);
    }

    #[test]
    fn test_moves_wait_for_tick() {
        let mut s = session();
        s.handle_input(InputEvent::PointerClick);
        place_enemies(&mut s, EnemyKind::Wandering, &[Vec2::new(40.0, 40.0)]);
        s.handle_input(InputEvent::Move(Direction::Right));
        s.handle_input(InputEvent::Move(Direction::Right));
        assert_eq!(s.arena().player.pos, Vec2::new(250.0, 250.0));
        s.tick();
        assert_eq!(s.arena().player.pos, Vec2::new(270.0, 250.0));
        assert_eq!(s.arena().player.facing, Direction::Right);
    }

    #[test]
    fn test_no_ticks_outside_playing() {
        let mut s = session();
        assert!(s.tick().is_empty());
        assert_eq!(s.ticks(), 0);
        // Input that does not apply to the splash screen is ignored
        s.handle_input(InputEvent::Fire);
        s.handle_input(InputEvent::Move(Direction::Left));
        assert_eq!(s.state(), SessionState::Splash);
        assert!(s.arena().bullets.is_empty());
    }

    #[test]
    fn test_clear_both_rounds_to_win() {
        let mut s = session();
        s.handle_input(InputEvent::PointerClick);
        let column: Vec<Vec2> = (0..5).map(|i| Vec2::new(250.0, 40.0 + 30.0 * i as f32)).collect();
        place_enemies(&mut s, EnemyKind::Wandering, &column);

        let mut kills = 0;
        for _ in 0..500 {
            if s.state() != (SessionState::Playing { round: Round::First }) {
                break;
            }
            s.handle_input(InputEvent::Fire);
            for event in s.tick() {
                assert!(!matches!(event, OutcomeEvent::PlayerHit { .. }));
                if matches!(event, OutcomeEvent::EnemyKilled { .. }) {
                    kills += 1;
                }
            }
        }
        assert_eq!(kills, 5);
        assert_eq!(s.state(), SessionState::Break);
        assert!(s.arena().second_round);

        // Clicks are the only way out of the break
        s.handle_input(InputEvent::Fire);
        assert_eq!(s.state(), SessionState::Break);
        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.state(), SessionState::Playing { round: Round::Second });
        assert_eq!(s.arena().enemies.len(), 5);
        assert!(s.arena().enemies.iter().all(|e| e.kind == EnemyKind::Pursuing));
        assert!(s.arena().bullets.is_empty());

        // Round 2: one pursuer lined up below the player
        place_enemies(&mut s, EnemyKind::Pursuing, &[Vec2::new(250.0, 400.0)]);
        s.handle_input(InputEvent::Move(Direction::Down));
        s.tick();
        for _ in 0..100 {
            if s.state() != (SessionState::Playing { round: Round::Second }) {
                break;
            }
            s.handle_input(InputEvent::Fire);
            s.tick();
        }
        assert_eq!(s.state(), SessionState::End(Outcome::Win));

        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.state(), SessionState::Splash);
        assert!(s.arena().enemies.is_empty());
        assert!(!s.arena().second_round);
        assert_eq!(s.cheat_buffer(), "");
    }

    #[test]
    fn test_player_hit_is_loss_on_same_tick() {
        let mut s = session();
        s.handle_input(InputEvent::PointerClick);
        let ids = place_enemies(
            &mut s,
            EnemyKind::Wandering,
            &[Vec2::new(251.0, 232.0), Vec2::new(262.0, 260.0)],
        );
        // Both touch the player; the first one is shot this tick
        s.handle_input(InputEvent::Fire);
        let events = s.tick();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], OutcomeEvent::EnemyKilled { enemy, .. } if enemy == ids[0]));
        assert_eq!(events[1], OutcomeEvent::PlayerHit { enemy: ids[1] });
        assert!(!events.contains(&OutcomeEvent::RoundCleared));
        assert_eq!(s.state(), SessionState::End(Outcome::Loss));

        // Terminal: ticks do nothing until restart
        assert!(s.tick().is_empty());
        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.state(), SessionState::Splash);
    }

    #[test]
    fn test_cheat_persists_into_round_two() {
        let mut s = session();
        type_str(&mut s, "CHEAT");
        place_enemies(&mut s, EnemyKind::Wandering, &[]);
        s.tick();
        assert_eq!(s.state(), SessionState::Break);
        s.handle_input(InputEvent::PointerClick);
        assert_eq!(s.arena().player.fire_mode, FireMode::Triple);
        s.handle_input(InputEvent::Fire);
        assert_eq!(s.arena().bullets.len(), 3);
    }

    #[test]
    fn test_autopilot_session_respects_invariants() {
        let mut s = session();
        s.handle_input(InputEvent::PointerClick);
        let (lo, hi) = s.arena().tuning.player_bounds();
        for _ in 0..3000 {
            match s.state() {
                SessionState::Playing { .. } => {
                    let cmd = autopilot(s.arena());
                    if let Some(dir) = cmd.move_to {
                        s.handle_input(InputEvent::Move(dir));
                    }
                    if cmd.fire && s.ticks() % 6 == 0 {
                        s.handle_input(InputEvent::Fire);
                    }
                    s.tick();
                }
                SessionState::Break => s.handle_input(InputEvent::PointerClick),
                SessionState::End(_) | SessionState::Splash => break,
            }
            let p = s.arena().player.pos;
            assert!(p.x >= lo && p.x <= hi && p.y >= lo && p.y <= hi);
            assert!(s.arena().enemies.len() <= 5);
        }
    }

    #[test]
    fn test_same_seed_same_wave() {
        let mut a = session();
        let mut b = session();
        a.handle_input(InputEvent::PointerClick);
        b.handle_input(InputEvent::PointerClick);
        let pa: Vec<Vec2> = a.arena().enemies.iter().map(|e| e.pos).collect();
        let pb: Vec<Vec2> = b.arena().enemies.iter().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }
}
