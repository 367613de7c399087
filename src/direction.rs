use serde::{Deserialize, Serialize};

/// Compass direction of a moving entity, derived from the sign of its
/// per-tick increments.
///
/// `Standing` means both increments are zero. `Any` is never produced by
/// classification; it exists so a reaction can be registered against every
/// direction at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Standing,
    Any,
}

impl Direction {
    /// Classifies an `(x_increment, y_increment)` pair into exactly one of
    /// the nine concrete directions. Only the signs matter; the magnitude is
    /// the step size, not the heading.
    ///
    /// Screen coordinates: y grows southward, so a negative `dy` points north.
    pub fn from_increments(dx: i32, dy: i32) -> Direction {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Direction::North,
            (1, -1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, -1) => Direction::NorthWest,
            _ => Direction::Standing,
        }
    }

    /// True for the four axis-aligned directions.
    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    /// True for the four compound directions.
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// The north/south component of a diagonal direction.
    ///
    /// Cardinal, `Standing` and `Any` have no vertical component to split off.
    pub fn vertical_component(self) -> Option<Direction> {
        match self {
            Direction::NorthEast | Direction::NorthWest => Some(Direction::North),
            Direction::SouthEast | Direction::SouthWest => Some(Direction::South),
            _ => None,
        }
    }

    /// The east/west component of a diagonal direction.
    pub fn horizontal_component(self) -> Option<Direction> {
        match self {
            Direction::NorthEast | Direction::SouthEast => Some(Direction::East),
            Direction::NorthWest | Direction::SouthWest => Some(Direction::West),
            _ => None,
        }
    }
}
