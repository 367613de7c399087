//! Throttled movement with collision-aware sliding.
//!
//! A movable entity owns a [`Mobility`]: per-axis increments applied each
//! step, plus a minimum delay between steps. Direction is never stored,
//! it is classified from the increments' signs on every step. The
//! [`Movable`] trait's default methods supply the whole movement
//! algorithm: a cardinal move either applies in full or not at all, while
//! a diagonal move decomposes into its vertical and horizontal components
//! and applies whichever of the two is clear. Sliding along a wall falls
//! out of that decomposition without any special casing.
//!
//! # Rust Learning Notes
//!
//! This module demonstrates:
//! - **Default trait methods**: implementors supply three accessors and
//!   inherit the whole movement algorithm
//! - **Option-wrapped timestamps**: `Option<Instant>` distinguishes "never
//!   moved" from "moved at t", so a fresh entity moves immediately

use crate::collision::{check_scenario_areas, check_scenario_limits};
use crate::direction::Direction;
use crate::entity::{Collidable, CollisionSink};
use crate::scenario::Scenario;
use std::time::{Duration, Instant};

/// Per-axis movement increments and throttle state.
#[derive(Debug, Clone)]
pub struct Mobility {
    x_increment: i32,
    y_increment: i32,
    movement_delay: Duration,
    last_movement_time: Option<Instant>,
}

impl Mobility {
    /// Creates a stationary mobility that steps at most once per
    /// `movement_delay`. The first step is never throttled.
    pub fn new(movement_delay: Duration) -> Self {
        Mobility {
            x_increment: 0,
            y_increment: 0,
            movement_delay,
            last_movement_time: None,
        }
    }

    pub fn with_increments(mut self, dx: i32, dy: i32) -> Self {
        self.set_increments(dx, dy);
        self
    }

    /// Displacement applied per step. Signs give the heading, magnitudes
    /// the step size; the axes need not agree.
    pub fn increments(&self) -> (i32, i32) {
        (self.x_increment, self.y_increment)
    }

    pub fn set_increments(&mut self, dx: i32, dy: i32) {
        self.x_increment = dx;
        self.y_increment = dy;
    }

    /// Zeroes both increments; subsequent steps resolve to `Standing`.
    pub fn stop(&mut self) {
        self.set_increments(0, 0);
    }

    /// Heading classified from the increments' signs.
    pub fn current_direction(&self) -> Direction {
        Direction::from_increments(self.x_increment, self.y_increment)
    }

    pub fn movement_delay(&self) -> Duration {
        self.movement_delay
    }

    pub fn set_movement_delay(&mut self, movement_delay: Duration) {
        self.movement_delay = movement_delay;
    }

    /// Whether enough time has passed since the last step.
    pub fn is_due(&self) -> bool {
        match self.last_movement_time {
            Some(at) => at.elapsed() >= self.movement_delay,
            None => true,
        }
    }

    /// Restarts the throttle window.
    pub fn mark_moved(&mut self) {
        self.last_movement_time = Some(Instant::now());
    }
}

/// An entity that can walk around the scenario.
///
/// Implementors provide the two mobility accessors and `apply_movement`;
/// `step` and `slide` come for free. All scenario collision notifications
/// (`LimitReached`, `ScenarioAreaReached`) fire through the entity's own
/// `CollisionSink` during the move.
pub trait Movable: Collidable + CollisionSink {
    fn mobility(&self) -> &Mobility;

    fn mobility_mut(&mut self) -> &mut Mobility;

    /// Shifts the entity's geometry by the given deltas. Called only for
    /// displacements the movement algorithm has already cleared.
    fn apply_movement(&mut self, dx: i32, dy: i32);

    /// Throttled step: delegates to [`slide`](Movable::slide) when the
    /// mobility delay has elapsed, otherwise does nothing. Returns the
    /// displacement actually applied.
    ///
    /// The throttle restarts on every attempt, including fully blocked
    /// ones; pressing into a wall does not accumulate pent-up moves. A
    /// stopped entity is not attempting anything, so it neither moves nor
    /// touches the throttle.
    fn step(&mut self, scenario: &Scenario) -> (i32, i32) {
        if self.mobility().current_direction() == Direction::Standing {
            return (0, 0);
        }
        if !self.mobility().is_due() {
            return (0, 0);
        }

        let moved = self.slide(scenario);
        self.mobility_mut().mark_moved();
        moved
    }

    /// Unthrottled move-and-slide of the current increments. A cardinal
    /// move is all-or-nothing; a diagonal move tries its vertical
    /// component first, then its horizontal component, each checked and
    /// applied independently, so a wall on one axis still lets the other
    /// axis through.
    fn slide(&mut self, scenario: &Scenario) -> (i32, i32) {
        let (dx, dy) = self.mobility().increments();

        match self.mobility().current_direction() {
            Direction::North | Direction::South => {
                cardinal_move(self, Direction::from_increments(0, dy), 0, dy, scenario)
            }
            Direction::East | Direction::West => {
                cardinal_move(self, Direction::from_increments(dx, 0), dx, 0, scenario)
            }
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest
            | Direction::NorthWest => {
                let (_, applied_dy) =
                    cardinal_move(self, Direction::from_increments(0, dy), 0, dy, scenario);
                let (applied_dx, _) =
                    cardinal_move(self, Direction::from_increments(dx, 0), dx, 0, scenario);
                (applied_dx, applied_dy)
            }
            Direction::Standing | Direction::Any => (0, 0),
        }
    }
}

/// Applies a single-axis move if neither the scenario limits nor its
/// obstacle areas block it. The limit check runs first and short-circuits
/// the obstacle check, so a blocked entity receives exactly one
/// notification.
fn cardinal_move<M>(
    mover: &mut M,
    direction: Direction,
    dx: i32,
    dy: i32,
    scenario: &Scenario,
) -> (i32, i32)
where
    M: Movable + ?Sized,
{
    let blocked = check_scenario_limits(mover, direction, scenario)
        || check_scenario_areas(mover, direction, scenario);

    if blocked {
        (0, 0)
    } else {
        mover.apply_movement(dx, dy);
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionType;
    use crate::entity::{Body, Causer};
    use sdl2::rect::{Point, Rect};

    struct Walker {
        body: Body,
        mobility: Mobility,
        hits: Vec<(CollisionType, Direction)>,
    }

    impl Walker {
        fn new(x: i32, y: i32, dx: i32, dy: i32) -> Self {
            Walker {
                body: Body::new(x, y, 10, 10, 0),
                mobility: Mobility::new(Duration::ZERO).with_increments(dx, dy),
                hits: Vec::new(),
            }
        }
    }

    impl Collidable for Walker {
        fn scenario_coordinates(&self) -> Point {
            self.body.position()
        }
        fn z_index(&self) -> i32 {
            self.body.z_index()
        }
        fn collision_area(&self) -> Rect {
            self.body.bounds()
        }
        fn collision_areas(&self) -> &[Rect] {
            self.body.collision_areas()
        }
    }

    impl CollisionSink for Walker {
        fn receive_collision(&mut self, _causer: Causer, _kind: CollisionType) {}
        fn receive_directional_collision(
            &mut self,
            _causer: Causer,
            kind: CollisionType,
            direction: Direction,
        ) {
            self.hits.push((kind, direction));
        }
    }

    impl Movable for Walker {
        fn mobility(&self) -> &Mobility {
            &self.mobility
        }
        fn mobility_mut(&mut self) -> &mut Mobility {
            &mut self.mobility
        }
        fn apply_movement(&mut self, dx: i32, dy: i32) {
            self.body.translate(dx, dy);
        }
    }

    fn open_scenario() -> Scenario {
        Scenario::new(0, 0, 100, 100, 0)
    }

    #[test]
    fn test_stopped_walker_does_not_move() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 50, 4, -4);
        walker.mobility.stop();

        assert_eq!(walker.mobility.current_direction(), Direction::Standing);
        assert_eq!(walker.step(&scenario), (0, 0));
        assert_eq!(walker.body.position(), Point::new(50, 50));
    }

    #[test]
    fn test_free_cardinal_step_applies_in_full() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 50, 0, -4);
        assert_eq!(walker.step(&scenario), (0, -4));
        assert_eq!(walker.body.position(), Point::new(50, 46));
        assert!(walker.hits.is_empty());
    }

    #[test]
    fn test_blocked_cardinal_step_does_not_move() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 0, 0, -4);
        assert_eq!(walker.step(&scenario), (0, 0));
        assert_eq!(walker.body.position(), Point::new(50, 0));
        assert_eq!(
            walker.hits,
            vec![(CollisionType::LimitReached, Direction::North)]
        );
    }

    #[test]
    fn test_diagonal_step_slides_along_a_wall() {
        let scenario = open_scenario();
        // Flush against the east limit: the east component is blocked, the
        // north component still goes through
        let mut walker = Walker::new(90, 50, 3, -3);
        assert_eq!(walker.mobility.current_direction(), Direction::NorthEast);
        assert_eq!(walker.step(&scenario), (0, -3));
        assert_eq!(walker.body.position(), Point::new(90, 47));
        assert_eq!(
            walker.hits,
            vec![(CollisionType::LimitReached, Direction::East)]
        );
    }

    #[test]
    fn test_diagonal_step_slides_along_an_obstacle() {
        let mut scenario = open_scenario();
        // Wall segment just east of the walker, starting below its top
        // edge so only the east-facing surface test can hit it
        scenario.set_obstacles(vec![Rect::new(60, 41, 10, 59)]);

        let mut walker = Walker::new(52, 40, 3, -3);
        assert_eq!(walker.mobility.current_direction(), Direction::NorthEast);

        // North component clears, east component hits the wall face
        assert_eq!(walker.step(&scenario), (0, -3));
        assert_eq!(walker.body.position(), Point::new(52, 37));
        assert_eq!(
            walker.hits,
            vec![(CollisionType::ScenarioAreaReached, Direction::East)]
        );
    }

    #[test]
    fn test_free_diagonal_step_applies_both_components() {
        let scenario = open_scenario();
        // Uneven magnitudes stay uneven
        let mut walker = Walker::new(50, 50, -4, 2);
        assert_eq!(walker.mobility.current_direction(), Direction::SouthWest);
        assert_eq!(walker.step(&scenario), (-4, 2));
        assert_eq!(walker.body.position(), Point::new(46, 52));
    }

    #[test]
    fn test_obstacle_blocks_a_cardinal_step() {
        let mut scenario = open_scenario();
        scenario.set_obstacles(vec![Rect::new(60, 0, 10, 100)]);

        let mut walker = Walker::new(52, 40, 4, 0);
        assert_eq!(walker.step(&scenario), (0, 0));
        assert_eq!(
            walker.hits,
            vec![(CollisionType::ScenarioAreaReached, Direction::East)]
        );
    }

    #[test]
    fn test_throttle_blocks_rapid_steps() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 50, 4, 0);
        walker.mobility.set_movement_delay(Duration::from_secs(60));

        // Fresh mobility: the first step goes through immediately
        assert_eq!(walker.step(&scenario), (4, 0));
        // The second is inside the delay window
        assert_eq!(walker.step(&scenario), (0, 0));
        assert_eq!(walker.body.position(), Point::new(54, 50));
    }

    #[test]
    fn test_standing_tick_leaves_the_throttle_alone() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 50, 4, 0);
        walker.mobility.set_movement_delay(Duration::from_secs(60));
        walker.mobility.stop();

        // A standing tick is not a move attempt
        assert_eq!(walker.step(&scenario), (0, 0));

        // So restarting inside the delay window still moves immediately
        walker.mobility.set_increments(0, -4);
        assert_eq!(walker.step(&scenario), (0, -4));
        assert_eq!(walker.body.position(), Point::new(50, 46));
    }

    #[test]
    fn test_zero_delay_never_throttles() {
        let scenario = open_scenario();
        let mut walker = Walker::new(50, 50, 0, 2);
        assert_eq!(walker.step(&scenario), (0, 2));
        assert_eq!(walker.step(&scenario), (0, 2));
        assert_eq!(walker.body.position(), Point::new(50, 54));
    }
}
