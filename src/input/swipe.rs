use glam::Vec2;

use crate::constants::SWIPE_THRESHOLD;
use crate::map::direction::Direction;

/// Picks a direction from a drag delta along its dominant axis.
///
/// Vertical wins when both axes are equal. A zero delta reads as `Up`.
pub fn direction_from_delta(delta: Vec2) -> Direction {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Tracks one pointer gesture (mouse drag or finger) and reports a direction once per gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start: Option<Vec2>,
    fired: bool,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            start: None,
            fired: false,
            threshold,
        }
    }

    /// Starts a gesture at `position`, discarding any unfinished one.
    pub fn begin(&mut self, position: Vec2) {
        self.start = Some(position);
        self.fired = false;
    }

    /// Feeds the pointer's current position.
    ///
    /// Returns a direction the first time the drag crosses the threshold along its
    /// dominant axis; afterwards the gesture is spent until the next [`begin`](Self::begin).
    pub fn update(&mut self, position: Vec2) -> Option<Direction> {
        let start = self.start?;
        if self.fired {
            return None;
        }

        let delta = position - start;
        if delta.x.abs().max(delta.y.abs()) < self.threshold {
            return None;
        }

        self.fired = true;
        Some(direction_from_delta(delta))
    }

    pub fn end(&mut self) {
        self.start = None;
        self.fired = false;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}
