//! Grid geometry types

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A position on the blueprint grid, in tiles
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_array(arr: [f64; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }
}

impl Add for Position {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Axis-aligned collision box relative to an entity's center
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    pub min: Position,
    pub max: Position,
}

impl CollisionBox {
    /// Build from the `[[x1, y1], [x2, y2]]` form used by prototype data
    pub fn from_corners(corners: [[f64; 2]; 2]) -> Self {
        Self {
            min: Position::from_array(corners[0]),
            max: Position::from_array(corners[1]),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Footprint in whole tiles, rounding partial tiles up
    pub fn tile_dimensions(&self) -> (u32, u32) {
        (
            self.width().ceil().max(0.0) as u32,
            self.height().ceil().max(0.0) as u32,
        )
    }

    /// The same box moved by `by`
    pub fn offset(&self, by: Position) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Smallest box containing both
    pub fn union(&self, other: &CollisionBox) -> Self {
        Self {
            min: Position::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Position::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// One of the eight grid directions, exported as an integer `0..=7`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_dimensions_round_up() {
        let cbox = CollisionBox::from_corners([[-1.4, -1.4], [1.4, 1.4]]);
        assert_eq!(cbox.tile_dimensions(), (3, 3));

        let wagon = CollisionBox::from_corners([[-0.6, -2.4], [0.6, 2.4]]);
        assert_eq!(wagon.tile_dimensions(), (2, 5));
    }

    #[test]
    fn test_box_union() {
        let a = CollisionBox::from_corners([[-0.5, -0.5], [0.5, 0.5]]);
        let b = a.offset(Position::new(3.0, 1.0));
        assert_eq!(b.min, Position::new(2.5, 0.5));

        let both = a.union(&b);
        assert_eq!(both, CollisionBox::from_corners([[-0.5, -0.5], [3.5, 1.5]]));
        assert_eq!(both.tile_dimensions(), (4, 2));
    }

    #[test]
    fn test_direction_from_index() {
        assert_eq!(Direction::from_index(0), Some(Direction::North));
        assert_eq!(Direction::from_index(4), Some(Direction::South));
        assert_eq!(Direction::from_index(8), None);
        assert_eq!(Direction::from_index(-1), None);
    }

    #[test]
    fn test_position_add() {
        let p = Position::new(1.5, 2.0) + Position::new(3.0, -1.0);
        assert_eq!(p, Position::new(4.5, 1.0));
    }
}
