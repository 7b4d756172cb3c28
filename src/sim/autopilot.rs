//! Attract-mode pilot
//!
//! Plays the player ship for demos: line up with the nearest enemy on a row
//! or column, turn toward it and shoot.

use super::entity::Direction;
use super::state::ArenaState;

/// What the pilot wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotCommand {
    pub move_to: Option<Direction>,
    pub fire: bool,
}

pub fn autopilot(arena: &ArenaState) -> PilotCommand {
    let player = &arena.player;
    let Some(target) = arena.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .total_cmp(&b.pos.distance_squared(player.pos))
    }) else {
        return PilotCommand::default();
    };

    let delta = target.pos - player.pos;
    // Close enough that a shot along the axis will connect
    let tolerance = target.radius;

    let aim = if delta.x.abs() <= tolerance {
        Some(if delta.y < 0.0 { Direction::Up } else { Direction::Down })
    } else if delta.y.abs() <= tolerance {
        Some(if delta.x < 0.0 { Direction::Left } else { Direction::Right })
    } else {
        None
    };

    match aim {
        Some(dir) if dir == player.facing => PilotCommand {
            move_to: None,
            fire: true,
        },
        Some(dir) => PilotCommand {
            move_to: Some(dir),
            fire: false,
        },
        // Slide along the shorter axis to line up
        None if delta.x.abs() < delta.y.abs() => PilotCommand {
            move_to: Some(if delta.x < 0.0 { Direction::Left } else { Direction::Right }),
            fire: false,
        },
        None => PilotCommand {
            move_to: Some(if delta.y < 0.0 { Direction::Up } else { Direction::Down }),
            fire: false,
        },
    }
}
