use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::grid::{Direction, Position};

pub const GUARD_COUNT: usize = 3;

/// Where the temple guards stand when the temple is first entered.
pub const GUARD_START_POSITIONS: [Position; GUARD_COUNT] = [
    Position::new(13, 1),
    Position::new(5, 9),
    Position::new(16, 17),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    pub position: Position,
}

impl Guard {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn starting_squad() -> Vec<Guard> {
        GUARD_START_POSITIONS.iter().copied().map(Guard::new).collect()
    }

    /// Random walk: pick one of the four directions uniformly and take it
    /// unless it would leave the map, in which case the guard stays put.
    pub fn wander<R: Rng>(&mut self, rng: &mut R) -> Direction {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        if let Some(next) = self.position.checked_step(direction) {
            self.position = next;
        }
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn squad_starts_at_fixed_posts() {
        let squad = Guard::starting_squad();
        assert_eq!(squad.len(), GUARD_COUNT);
        assert_eq!(squad[0].position, Position::new(13, 1));
        assert_eq!(squad[2].position, Position::new(16, 17));
    }

    #[test]
    fn wander_moves_at_most_one_cell_and_stays_on_map() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut guard = Guard::new(Position::ORIGIN);

        for _ in 0..2_000 {
            let before = guard.position;
            let direction = guard.wander(&mut rng);
            let after = guard.position;

            assert!(after.in_bounds());
            let moved = (after.x - before.x).abs() + (after.y - before.y).abs();
            assert!(moved <= 1);
            if moved == 0 {
                assert_eq!(before.checked_step(direction), None);
            } else {
                assert_eq!(before.checked_step(direction), Some(after));
            }
        }
    }

    #[test]
    fn cornered_guard_discards_outward_moves() {
        let mut rng = StdRng::seed_from_u64(11);
        let corner = Position::new(19, 19);

        for _ in 0..200 {
            let mut guard = Guard::new(corner);
            match guard.wander(&mut rng) {
                Direction::Down | Direction::Right => assert_eq!(guard.position, corner),
                Direction::Up => assert_eq!(guard.position, Position::new(19, 18)),
                Direction::Left => assert_eq!(guard.position, Position::new(18, 19)),
            }
        }
    }
}
