//! # Game Mathematics
//!
//! Small geometric helpers shared by monster AI and generation.

use crate::game::Position;

/// Returns the single-tile step that moves `from` towards `to`.
///
/// The direction vector is normalised to length one and each axis is then
/// rounded independently, so the result is always in `{-1, 0, 1}²`.
/// Returns a zero step when both positions coincide.
///
/// # Examples
///
/// ```
/// use delve::{step_towards, Position};
///
/// let step = step_towards(Position::new(0, 0), Position::new(10, 1));
/// assert_eq!(step, Position::new(1, 0));
///
/// let step = step_towards(Position::new(5, 5), Position::new(2, 2));
/// assert_eq!(step, Position::new(-1, -1));
/// ```
pub fn step_towards(from: Position, to: Position) -> Position {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return Position::new(0, 0);
    }

    Position::new((dx / distance).round() as i32, (dy / distance).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_unit() {
        let origin = Position::new(10, 10);
        for x in 0..21 {
            for y in 0..21 {
                let step = step_towards(origin, Position::new(x, y));
                assert!(step.x.abs() <= 1 && step.y.abs() <= 1);
            }
        }
    }

    #[test]
    fn test_step_cardinal_and_diagonal() {
        let origin = Position::new(0, 0);
        assert_eq!(step_towards(origin, Position::new(0, -7)), Position::new(0, -1));
        assert_eq!(step_towards(origin, Position::new(4, 4)), Position::new(1, 1));
        // 2:1 slope rounds the minor axis (0.447) down
        assert_eq!(step_towards(origin, Position::new(-6, 3)), Position::new(-1, 0));
        assert_eq!(step_towards(origin, origin), Position::new(0, 0));
    }
}
