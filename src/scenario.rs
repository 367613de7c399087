//! The playing field: boundaries plus static obstacles.
//!
//! A [`Scenario`] is the rectangle entities move inside. Its four scalar
//! limits are derived from its geometry at construction (north from the
//! top edge, south from the bottom, west and east from the sides) but can
//! be tightened afterwards for effects like shrinking arenas. Obstacles
//! are plain rectangles in scenario coordinates; the collision engine
//! walks them in [`crate::collision::check_scenario_areas`] and
//! [`crate::collision::check_falling`].
//!
//! The scenario participates in collision checks as a `Collidable` like
//! any entity, but it never reacts to being hit, so its `CollisionSink`
//! impl discards notifications.

use crate::collision::CollisionType;
use crate::direction::Direction;
use crate::entity::{Body, Causer, Collidable, CollisionSink};
use crate::save::{SaveData, SaveError, Saveable, ScenarioState};
use sdl2::rect::{Point, Rect};

pub struct Scenario {
    body: Body,
    north_limit: i32,
    east_limit: i32,
    south_limit: i32,
    west_limit: i32,
}

impl Scenario {
    /// Creates a scenario whose limits coincide with its bounding
    /// rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32, z_index: i32) -> Self {
        Scenario {
            body: Body::new(x, y, width, height, z_index),
            north_limit: y,
            east_limit: x + width as i32,
            south_limit: y + height as i32,
            west_limit: x,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn north_limit(&self) -> i32 {
        self.north_limit
    }

    pub fn east_limit(&self) -> i32 {
        self.east_limit
    }

    pub fn south_limit(&self) -> i32 {
        self.south_limit
    }

    pub fn west_limit(&self) -> i32 {
        self.west_limit
    }

    pub fn set_north_limit(&mut self, limit: i32) {
        self.north_limit = limit;
    }

    pub fn set_east_limit(&mut self, limit: i32) {
        self.east_limit = limit;
    }

    pub fn set_south_limit(&mut self, limit: i32) {
        self.south_limit = limit;
    }

    pub fn set_west_limit(&mut self, limit: i32) {
        self.west_limit = limit;
    }

    /// Replaces the obstacle set.
    pub fn set_obstacles(&mut self, obstacles: Vec<Rect>) {
        self.body.set_collision_areas(obstacles);
    }

    /// Adds obstacles, skipping duplicates and rectangles already covered
    /// by an existing obstacle.
    pub fn add_obstacles(&mut self, obstacles: Vec<Rect>) {
        self.body.add_collision_areas(obstacles);
    }
}

impl Collidable for Scenario {
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

impl CollisionSink for Scenario {
    // The scenario is a passive participant
    fn receive_collision(&mut self, causer: Causer, kind: CollisionType) {
        log::trace!("scenario ignoring {:?} collision from {:?}", kind, causer);
    }

    fn receive_directional_collision(
        &mut self,
        causer: Causer,
        kind: CollisionType,
        direction: Direction,
    ) {
        log::trace!(
            "scenario ignoring {:?} collision from {:?} heading {:?}",
            kind,
            causer,
            direction
        );
    }
}

impl Saveable for Scenario {
    fn to_save_data(&self) -> Result<SaveData, SaveError> {
        let bounds = self.body.bounds();
        let state = ScenarioState {
            x: bounds.x(),
            y: bounds.y(),
            width: bounds.width(),
            height: bounds.height(),
            z_index: self.body.z_index(),
            north_limit: self.north_limit,
            east_limit: self.east_limit,
            south_limit: self.south_limit,
            west_limit: self.west_limit,
            obstacles: self
                .body
                .collision_areas()
                .iter()
                .map(|r| (r.x(), r.y(), r.width(), r.height()))
                .collect(),
        };

        Ok(SaveData {
            data_type: "scenario".to_string(),
            json_data: serde_json::to_string(&state)?,
        })
    }

    fn from_save_data(data: &SaveData) -> Result<Self, SaveError> {
        if data.data_type != "scenario" {
            return Err(SaveError::CorruptedData(format!(
                "expected scenario data, got: {}",
                data.data_type
            )));
        }

        let state: ScenarioState = serde_json::from_str(&data.json_data)?;
        let mut scenario = Scenario::new(state.x, state.y, state.width, state.height, state.z_index);
        scenario.north_limit = state.north_limit;
        scenario.east_limit = state.east_limit;
        scenario.south_limit = state.south_limit;
        scenario.west_limit = state.west_limit;
        scenario.set_obstacles(
            state
                .obstacles
                .iter()
                .map(|&(x, y, w, h)| Rect::new(x, y, w, h))
                .collect(),
        );
        Ok(scenario)
    }
}
