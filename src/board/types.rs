//! Board value types: squares, knight directions, and visited sets.

use crate::error::{Result, TourError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: i32 = 8;

/// Number of squares on the board, i.e. the length of a complete tour.
pub const SQUARES: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Knight offsets indexed by `direction - 1`.
///
/// Persisted chromosomes store these numbers, so the order is fixed.
pub const MOVE_TABLE: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (1, -2),
    (2, -1),
    (-2, -1),
    (-1, -2),
    (-1, 2),
    (-2, 1),
];

// Every entry is an L-shaped jump and no two entries coincide.
const _: () = {
    let mut i = 0;
    while i < MOVE_TABLE.len() {
        let (dx, dy) = MOVE_TABLE[i];
        assert!(dx * dx + dy * dy == 5, "move table entry is not a knight move");
        let mut j = i + 1;
        while j < MOVE_TABLE.len() {
            assert!(
                MOVE_TABLE[j].0 != dx || MOVE_TABLE[j].1 != dy,
                "duplicate move table entry"
            );
            j += 1;
        }
        i += 1;
    }
};

/// A square on the board.
///
/// Coordinates are signed so that [`apply`](super::apply) can produce
/// off-board candidates that [`legal`](super::legal) then rejects.
/// Serialises as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The fixed starting square `(0, 0)`.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Creates a position without bounds checking.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a position, rejecting coordinates outside the board.
    pub fn try_new(x: i32, y: i32) -> Result<Self> {
        let pos = Self::new(x, y);
        if pos.in_bounds() {
            Ok(pos)
        } else {
            Err(TourError::InvalidPosition { x, y })
        }
    }

    /// Whether both coordinates lie in `0..BOARD_SIZE`.
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    /// Row-major square index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.y * BOARD_SIZE + self.x) as usize)
        } else {
            None
        }
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for [i32; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight knight moves, numbered `1..=8`.
///
/// The numeric value is what genomes and persisted chromosomes store.
/// Construction through [`Direction::new`] or `TryFrom<u8>` rejects values
/// outside `1..=8`, so every `Direction` indexes [`MOVE_TABLE`] safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Direction(u8);

impl Direction {
    /// All directions in ascending order.
    pub const ALL: [Direction; 8] = [
        Direction(1),
        Direction(2),
        Direction(3),
        Direction(4),
        Direction(5),
        Direction(6),
        Direction(7),
        Direction(8),
    ];

    /// Validates and wraps a raw direction value.
    pub fn new(value: u8) -> Result<Self> {
        if (1..=8).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TourError::InvalidDirection(value))
        }
    }

    /// Raw value in `1..=8`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// `(dx, dy)` displacement of this move.
    pub fn offset(self) -> (i32, i32) {
        MOVE_TABLE[usize::from(self.0 - 1)]
    }

    /// Samples a direction uniformly from `1..=8`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(1..=8))
    }

    /// The `step`-th neighbour of this direction in cyclic order.
    ///
    /// Forward cycling visits `d+1, d+2, ...` wrapping from 8 to 1;
    /// backward cycling mirrors it (`d-1, d-2, ...` wrapping from 1 to 8).
    pub fn cycled(self, step: u8, forward: bool) -> Self {
        let d = i32::from(self.0);
        let s = i32::from(step);
        let next = if forward {
            (d + s - 1).rem_euclid(8) + 1
        } else {
            (d - s - 1).rem_euclid(8) + 1
        };
        Self(next as u8)
    }

    /// The direction that moves a knight from `from` to `to`, if any.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let delta = (to.x - from.x, to.y - from.y);
        MOVE_TABLE
            .iter()
            .position(|&m| m == delta)
            .map(|i| Self(i as u8 + 1))
    }
}

impl TryFrom<u8> for Direction {
    type Error = TourError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> Self {
        d.0
    }
}

/// Set of visited squares, stored as a 64-bit board mask.
///
/// Off-board positions are never members; inserting one is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Visited(u64);

impl Visited {
    /// An empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Whether `pos` has been visited.
    pub fn contains(&self, pos: Position) -> bool {
        pos.index().is_some_and(|i| self.0 & (1u64 << i) != 0)
    }

    /// Marks `pos` visited. Returns `true` if it was newly inserted.
    pub fn insert(&mut self, pos: Position) -> bool {
        match pos.index() {
            Some(i) => {
                let bit = 1u64 << i;
                let fresh = self.0 & bit == 0;
                self.0 |= bit;
                fresh
            }
            None => false,
        }
    }

    /// Unmarks `pos`. Returns `true` if it was present.
    pub fn remove(&mut self, pos: Position) -> bool {
        match pos.index() {
            Some(i) => {
                let bit = 1u64 << i;
                let present = self.0 & bit != 0;
                self.0 &= !bit;
                present
            }
            None => false,
        }
    }

    /// A copy of this set with `pos` added.
    pub fn with(mut self, pos: Position) -> Self {
        self.insert(pos);
        self
    }

    /// Number of visited squares.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Position> for Visited {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut set = Self::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_range() {
        assert!(Direction::new(0).is_err());
        assert!(Direction::new(9).is_err());
        for v in 1..=8 {
            assert_eq!(Direction::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_offsets_match_numbering() {
        assert_eq!(Direction::new(1).unwrap().offset(), (2, 1));
        assert_eq!(Direction::new(3).unwrap().offset(), (1, -2));
        assert_eq!(Direction::new(8).unwrap().offset(), (-2, 1));
    }

    #[test]
    fn test_cycled_forward_wraps() {
        let d = Direction::new(7).unwrap();
        let order: Vec<u8> = (1..=7).map(|j| d.cycled(j, true).value()).collect();
        assert_eq!(order, vec![8, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_cycled_backward_mirrors() {
        let d = Direction::new(2).unwrap();
        let order: Vec<u8> = (1..=7).map(|j| d.cycled(j, false).value()).collect();
        assert_eq!(order, vec![1, 8, 7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_between() {
        let from = Position::new(3, 3);
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            let to = Position::new(3 + dx, 3 + dy);
            assert_eq!(Direction::between(from, to), Some(d));
        }
        assert_eq!(Direction::between(from, Position::new(4, 4)), None);
    }

    #[test]
    fn test_position_serde_as_pair() {
        let json = serde_json::to_string(&Position::new(2, 5)).unwrap();
        assert_eq!(json, "[2,5]");
        let back: Position = serde_json::from_str("[7,1]").unwrap();
        assert_eq!(back, Position::new(7, 1));
    }

    #[test]
    fn test_direction_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Direction>("9").is_err());
        let d: Direction = serde_json::from_str("4").unwrap();
        assert_eq!(d.value(), 4);
    }

    #[test]
    fn test_try_new_bounds() {
        assert!(Position::try_new(7, 7).is_ok());
        assert!(matches!(
            Position::try_new(8, 0),
            Err(TourError::InvalidPosition { x: 8, y: 0 })
        ));
    }

    #[test]
    fn test_visited_ignores_off_board() {
        let mut v = Visited::new();
        assert!(!v.insert(Position::new(-1, 0)));
        assert!(v.is_empty());
        assert!(v.insert(Position::new(7, 7)));
        assert!(!v.insert(Position::new(7, 7)));
        assert_eq!(v.len(), 1);
        assert!(v.remove(Position::new(7, 7)));
        assert!(v.is_empty());
    }
}
