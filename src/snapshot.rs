//! Render snapshot
//!
//! Read-only copy of what a renderer needs after a tick: shapes with a
//! category and color while playing, title/subtitle text otherwise.

use serde::{Deserialize, Serialize};

use crate::session::{GameSession, Outcome, SessionState};
use crate::sim::{EntityId, Shape};

/// RGBA color in 0-1 range
pub type Color = [f32; 4];

pub const PLAYER_COLOR: Color = [0.0, 0.0, 1.0, 1.0];
pub const ENEMY_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
pub const BULLET_COLOR: Color = [1.0, 1.0, 0.0, 1.0];
pub const BACKGROUND_COLOR: Color = [0.0, 0.0, 0.0, 1.0];
pub const TITLE_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
pub const SUBTITLE_COLOR: Color = [0.698, 0.133, 0.133, 1.0]; // firebrick

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Player,
    Enemy,
    Bullet,
}

impl Category {
    pub fn color(self) -> Color {
        match self {
            Category::Player => PLAYER_COLOR,
            Category::Enemy => ENEMY_COLOR,
            Category::Bullet => BULLET_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub id: EntityId,
    pub category: Category,
    pub shape: Shape,
    pub color: Color,
}

/// Full-screen text shown outside of play
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_color: Color,
    pub subtitle_color: Color,
}

impl Banner {
    pub fn for_state(state: SessionState) -> Option<Self> {
        let (title, subtitle) = match state {
            SessionState::Playing { .. } => return None,
            SessionState::Splash => ("The Lone Survivor", "Click mouse to continue..."),
            SessionState::Break => ("YOU ESCAPED!", "But it's not over..."),
            SessionState::End(Outcome::Win) => ("YOU'VE WON!", "Click to play again..."),
            SessionState::End(Outcome::Loss) => ("GAME OVER.", "Humanity is lost...try again?"),
        };
        Some(Self {
            title,
            subtitle,
            title_color: TITLE_COLOR,
            subtitle_color: SUBTITLE_COLOR,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub state: SessionState,
    pub arena_size: f32,
    pub background: Color,
    /// Player first, then enemies, then bullets; empty outside of play
    pub drawables: Vec<Drawable>,
    pub banner: Option<Banner>,
}

impl RenderSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let state = session.state();
        let arena = session.arena();

        let mut drawables = Vec::new();
        if matches!(state, SessionState::Playing { .. }) {
            drawables.reserve(1 + arena.enemies.len() + arena.bullets.len());
            let mut push = |id: EntityId, category: Category, shape: Shape| {
                drawables.push(Drawable {
                    id,
                    category,
                    shape,
                    color: category.color(),
                })
            };
            push(arena.player.id, Category::Player, arena.player.shape());
            for enemy in &arena.enemies {
                push(enemy.id, Category::Enemy, enemy.shape());
            }
            for bullet in &arena.bullets {
                push(bullet.id, Category::Bullet, bullet.shape());
            }
        }

        Self {
            tick: session.ticks(),
            state,
            arena_size: arena.arena_size(),
            background: BACKGROUND_COLOR,
            drawables,
            banner: Banner::for_state(state),
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.drawables
            .iter()
            .filter(|d| d.category == category)
            .count()
    }
}
