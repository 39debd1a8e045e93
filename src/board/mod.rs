//! Board and knight-move model.
//!
//! Everything here is a pure function of its arguments. The solvers in
//! [`crate::ga`] and [`crate::backtrack`] build on four primitives:
//!
//! - [`apply`]: position plus direction offset, no bounds check
//! - [`legal`]: on the board and not yet visited
//! - [`count_onward`]: Warnsdorff degree of a square given a visited set
//! - [`successors`]: legal knight moves out of a square
//!
//! [`check_path`] validates externally supplied paths (artifacts and
//! backtracking prefixes).

mod types;

pub use types::{Direction, Position, Visited, BOARD_SIZE, MOVE_TABLE, SQUARES};

use crate::error::{Result, TourError};

/// Whether `candidate` is on the board and not in `visited`.
pub fn legal(candidate: Position, visited: &Visited) -> bool {
    candidate.in_bounds() && !visited.contains(candidate)
}

/// Moves `position` by the offset of `direction`.
///
/// The result may be off the board; callers validate with [`legal`].
pub fn apply(position: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.offset();
    Position::new(position.x + dx, position.y + dy)
}

/// Number of directions leading from `position` to a legal square.
pub fn count_onward(position: Position, visited: &Visited) -> usize {
    Direction::ALL
        .iter()
        .filter(|&&d| legal(apply(position, d), visited))
        .count()
}

/// Legal squares reachable from `position`, in direction order.
pub fn successors(position: Position, visited: &Visited) -> Vec<Position> {
    Direction::ALL
        .iter()
        .map(|&d| apply(position, d))
        .filter(|&p| legal(p, visited))
        .collect()
}

/// Whether `a` and `b` are one knight move apart.
pub fn is_knight_move(a: Position, b: Position) -> bool {
    Direction::between(a, b).is_some()
}

/// Checks that `path` is a legal partial tour.
///
/// The path must be non-empty, start at the origin, stay on the board,
/// never repeat a square, and step by knight moves throughout.
pub fn check_path(path: &[Position]) -> Result<()> {
    match path.first() {
        None => return Err(TourError::InvalidPath("path is empty".into())),
        Some(&first) if first != Position::ORIGIN => {
            return Err(TourError::InvalidPath(format!(
                "path starts at {first}, expected {}",
                Position::ORIGIN
            )));
        }
        Some(_) => {}
    }
    let mut visited = Visited::new();
    for (i, &pos) in path.iter().enumerate() {
        if !pos.in_bounds() {
            return Err(TourError::InvalidPosition { x: pos.x, y: pos.y });
        }
        if !visited.insert(pos) {
            return Err(TourError::InvalidPath(format!(
                "square {pos} repeated at step {i}"
            )));
        }
        if i > 0 && !is_knight_move(path[i - 1], pos) {
            return Err(TourError::InvalidPath(format!(
                "{} -> {pos} at step {i} is not a knight move",
                path[i - 1]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_two_moves() {
        let visited = Visited::new().with(Position::ORIGIN);
        assert_eq!(count_onward(Position::ORIGIN, &visited), 2);
        assert_eq!(
            successors(Position::ORIGIN, &visited),
            vec![Position::new(2, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_center_has_eight_moves() {
        let visited = Visited::new();
        assert_eq!(count_onward(Position::new(3, 4), &visited), 8);
    }

    #[test]
    fn test_legal_rejects_visited_and_off_board() {
        let visited = Visited::new().with(Position::new(2, 1));
        assert!(!legal(Position::new(2, 1), &visited));
        assert!(!legal(Position::new(-1, 2), &visited));
        assert!(!legal(Position::new(0, 8), &visited));
        assert!(legal(Position::new(1, 2), &visited));
    }

    #[test]
    fn test_apply_does_not_clamp() {
        let d = Direction::new(5).unwrap();
        assert_eq!(apply(Position::ORIGIN, d), Position::new(-2, -1));
    }

    #[test]
    fn test_count_onward_shrinks_with_visits() {
        let pos = Position::new(3, 4);
        let visited: Visited = successors(pos, &Visited::new()).into_iter().take(5).collect();
        assert_eq!(count_onward(pos, &visited), 3);
    }

    #[test]
    fn test_check_path() {
        let ok = [Position::ORIGIN, Position::new(2, 1), Position::new(4, 2)];
        assert!(check_path(&ok).is_ok());
        assert!(check_path(&[]).is_err());
        assert!(check_path(&[Position::new(2, 1)]).is_err());
        let repeat = [Position::ORIGIN, Position::new(2, 1), Position::ORIGIN];
        assert!(matches!(check_path(&repeat), Err(TourError::InvalidPath(_))));
        let jump = [Position::ORIGIN, Position::new(3, 3)];
        assert!(check_path(&jump).is_err());
        let off = [Position::ORIGIN, Position::new(-2, 1)];
        assert!(matches!(
            check_path(&off),
            Err(TourError::InvalidPosition { x: -2, y: 1 })
        ));
    }

    #[test]
    fn test_is_knight_move() {
        assert!(is_knight_move(Position::new(0, 0), Position::new(1, 2)));
        assert!(!is_knight_move(Position::new(0, 0), Position::new(2, 2)));
    }
}
