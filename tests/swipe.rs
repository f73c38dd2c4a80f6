use glam::Vec2;
use pacman_tick::input::{direction_from_delta, SwipeTracker};
use pacman_tick::map::direction::Direction;
use speculoos::prelude::*;

#[test]
fn test_direction_uses_dominant_axis() {
    let test_cases = [
        (Vec2::new(40.0, 5.0), Direction::Right),
        (Vec2::new(-40.0, 5.0), Direction::Left),
        (Vec2::new(3.0, 40.0), Direction::Down),
        (Vec2::new(3.0, -40.0), Direction::Up),
        // Equal magnitudes prefer vertical
        (Vec2::new(5.0, 5.0), Direction::Down),
        (Vec2::ZERO, Direction::Up),
    ];

    for (delta, expected) in test_cases {
        assert_that(&direction_from_delta(delta)).is_equal_to(expected);
    }
}

#[test]
fn test_swipe_fires_after_threshold() {
    let mut tracker = SwipeTracker::default();
    tracker.begin(Vec2::new(100.0, 100.0));

    assert_that(&tracker.update(Vec2::new(120.0, 105.0))).is_none();
    assert_that(&tracker.update(Vec2::new(131.0, 105.0))).is_equal_to(Some(Direction::Right));
}

#[test]
fn test_swipe_fires_once_per_gesture() {
    let mut tracker = SwipeTracker::default();
    tracker.begin(Vec2::ZERO);

    assert_that(&tracker.update(Vec2::new(0.0, -35.0))).is_equal_to(Some(Direction::Up));
    assert_that(&tracker.update(Vec2::new(0.0, -90.0))).is_none();
    assert_that(&tracker.update(Vec2::new(-90.0, -90.0))).is_none();

    tracker.end();
    assert_that(&tracker.is_active()).is_false();
    assert_that(&tracker.update(Vec2::new(-90.0, 0.0))).is_none();

    tracker.begin(Vec2::ZERO);
    assert_that(&tracker.update(Vec2::new(-30.0, 0.0))).is_equal_to(Some(Direction::Left));
}

#[test]
fn test_custom_threshold() {
    let mut tracker = SwipeTracker::new(5.0);
    tracker.begin(Vec2::ZERO);
    assert_that(&tracker.update(Vec2::new(0.0, 6.0))).is_equal_to(Some(Direction::Down));
}
