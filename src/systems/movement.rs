use bevy_ecs::component::Component;
use glam::{IVec2, Vec2};

use crate::map::direction::Direction;

/// Where an actor is on the tile grid.
///
/// An actor is either resting exactly on a tile centre, or part of the way through a
/// one-tile step. Direction changes only happen from `Stopped`, so turning is limited to
/// tile centres.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub enum Position {
    Stopped {
        tile: IVec2,
    },
    Moving {
        from: IVec2,
        to: IVec2,
        /// Fraction of the step still to travel, in `(0, 1]`.
        remaining: f32,
    },
}

impl Position {
    /// Advances along the current step by `distance` tiles.
    ///
    /// Returns the leftover distance once the destination centre is reached, at which
    /// point the position becomes `Stopped` on it. Returns `None` while still in transit
    /// or when not moving at all.
    pub fn tick(&mut self, distance: f32) -> Option<f32> {
        if let Position::Moving { to, remaining, .. } = self {
            if distance >= *remaining {
                let (tile, overflow) = (*to, distance - *remaining);
                *self = Position::Stopped { tile };
                return Some(overflow);
            }
            *remaining -= distance;
        }
        None
    }

    /// The tile the actor's centre is in: the departure tile until halfway, then the destination.
    pub fn tile(&self) -> IVec2 {
        match *self {
            Position::Stopped { tile } => tile,
            Position::Moving { from, to, remaining } => {
                if remaining > 0.5 {
                    from
                } else {
                    to
                }
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Position::Stopped { .. })
    }

    /// The interpolated centre in tile coordinates.
    ///
    /// Steps through the side tunnel run off the board edge; the result is kept within
    /// `[-0.5, width - 0.5)` so it can be drawn on either side.
    pub fn center(&self, width: i32) -> Vec2 {
        match *self {
            Position::Stopped { tile } => tile.as_vec2(),
            Position::Moving { from, to, remaining } => {
                let mut delta = to - from;
                // A wrapping step appears as a jump across the whole board.
                if delta.x.abs() > 1 {
                    delta.x = -delta.x.signum();
                }
                let mut center = from.as_vec2() + delta.as_vec2() * (1.0 - remaining);
                let w = width as f32;
                if center.x < -0.5 {
                    center.x += w;
                } else if center.x >= w - 0.5 {
                    center.x -= w;
                }
                center
            }
        }
    }
}

/// Current heading and base speed, in tiles per second.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct Velocity {
    pub direction: Direction,
    pub speed: f32,
}

/// The direction the player asked for, held until it can be taken at a tile centre.
#[derive(Component, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NextDirection(pub Option<Direction>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_overflow() {
        let mut position = Position::Moving {
            from: IVec2::new(1, 1),
            to: IVec2::new(2, 1),
            remaining: 0.25,
        };
        let overflow = position.tick(0.5);
        assert_eq!(overflow, Some(0.25));
        assert_eq!(position, Position::Stopped { tile: IVec2::new(2, 1) });
    }

    #[test]
    fn test_tile_switches_halfway() {
        let mut position = Position::Moving {
            from: IVec2::new(1, 1),
            to: IVec2::new(1, 2),
            remaining: 1.0,
        };
        assert_eq!(position.tile(), IVec2::new(1, 1));
        position.tick(0.6);
        assert_eq!(position.tile(), IVec2::new(1, 2));
    }

    #[test]
    fn test_center_through_tunnel() {
        let position = Position::Moving {
            from: IVec2::new(18, 9),
            to: IVec2::new(0, 9),
            remaining: 0.75,
        };
        let center = position.center(19);
        assert!((center.x - 18.25).abs() < 1e-5);

        let position = Position::Moving {
            from: IVec2::new(18, 9),
            to: IVec2::new(0, 9),
            remaining: 0.25,
        };
        let center = position.center(19);
        assert!((center.x + 0.25).abs() < 1e-5);
    }
}
