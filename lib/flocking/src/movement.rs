/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::MoveError;
use crate::world::{BirdId, FlockId, Location, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) delta of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl Location {
    /// The neighboring cell in `direction`. Might be off the grid.
    pub fn step(self, direction: Direction) -> Location {
        let (d_row, d_col) = direction.delta();
        Location::new(self.row + d_row, self.col + d_col)
    }
}

impl World {
    /// Check if `bird` can step in `direction`: the destination must be on the grid and no other
    /// bird may be standing on it. Returns the destination.
    pub fn can_move(&self, bird: BirdId, direction: Direction) -> Result<Location, MoveError> {
        let destination = self.location(bird).step(direction);
        if !self.in_bounds(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if let Some(occupant) = self.occupant(destination, Some(bird)) {
            return Err(MoveError::Occupied {
                destination,
                occupant,
            });
        }
        Ok(destination)
    }

    /// Step `bird` one cell in `direction` if [`World::can_move`] allows it. On error nothing
    /// changes.
    pub fn move_bird(&mut self, bird: BirdId, direction: Direction) -> Result<Location, MoveError> {
        match self.can_move(bird, direction) {
            Ok(destination) => {
                self.birds[bird].location = destination;
                Ok(destination)
            }
            Err(e) => {
                trace!(bird = %self.birds[bird].name, %direction, error = %e, "move rejected");
                Err(e)
            }
        }
    }

    /// Check if every member of `flock` stays on the grid after a step in `direction`.
    ///
    /// Unlike [`World::can_move`] this does not look at other birds, so a flock can fly over (and
    /// land on) anyone.
    pub fn can_move_flock(&self, flock: FlockId, direction: Direction) -> Result<(), MoveError> {
        let flock = self.flocks.get(flock).ok_or(MoveError::UnknownFlock(flock))?;
        for &member in &flock.members {
            let destination = self.location(member).step(direction);
            if !self.in_bounds(destination) {
                return Err(MoveError::OutOfBounds { destination });
            }
        }
        Ok(())
    }

    /// Step the whole flock one cell in `direction`. Either every member moves or none does.
    pub fn move_flock(&mut self, flock: FlockId, direction: Direction) -> Result<(), MoveError> {
        match self.can_move_flock(flock, direction) {
            Ok(()) => {
                for &member in &self.flocks[flock].members {
                    let bird = &mut self.birds[member];
                    bird.location = bird.location.step(direction);
                }
                Ok(())
            }
            Err(e) => {
                trace!(flock, %direction, error = %e, "flock move rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn world(locations: &[(i32, i32)]) -> World {
        let locations: Vec<Location> = locations
            .iter()
            .map(|&(row, col)| Location::new(row, col))
            .collect();
        World::with_birds(10, 10, &locations, 0).expect("valid world")
    }

    #[test]
    fn test_directions_are_unit_steps() {
        let origin = Location::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Location::new(4, 5));
        assert_eq!(origin.step(Direction::Down), Location::new(6, 5));
        assert_eq!(origin.step(Direction::Left), Location::new(5, 4));
        assert_eq!(origin.step(Direction::Right), Location::new(5, 6));
    }

    #[test]
    fn test_move_off_grid_rejected() {
        let mut world = world(&[(0, 9)]);
        let bird = world.bird_ids()[0];
        assert_eq!(
            world.move_bird(bird, Direction::Up),
            Err(MoveError::OutOfBounds {
                destination: Location::new(-1, 9)
            })
        );
        assert_eq!(
            world.move_bird(bird, Direction::Right),
            Err(MoveError::OutOfBounds {
                destination: Location::new(0, 10)
            })
        );
        assert_eq!(world.location(bird), Location::new(0, 9));
    }

    #[test]
    fn test_move_onto_occupied_cell_rejected() {
        let mut world = world(&[(3, 3), (3, 4)]);
        let ids = world.bird_ids().to_vec();
        assert_eq!(
            world.move_bird(ids[0], Direction::Right),
            Err(MoveError::Occupied {
                destination: Location::new(3, 4),
                occupant: ids[1],
            })
        );
        assert_eq!(world.location(ids[0]), Location::new(3, 3));
    }

    #[test]
    fn test_move_into_open_cell() {
        let mut world = world(&[(3, 3), (3, 4)]);
        let ids = world.bird_ids().to_vec();
        assert_eq!(
            world.move_bird(ids[0], Direction::Down),
            Ok(Location::new(4, 3))
        );
        assert_eq!(world.location(ids[0]), Location::new(4, 3));
    }

    #[test]
    fn test_flock_blocked_by_edge_moves_nobody() {
        let mut world = world(&[(2, 8), (2, 9)]);
        let ids = world.bird_ids().to_vec();
        let flock = world.form_flock(ids[0], ids[1]);
        assert!(world.move_flock(flock, Direction::Right).is_err());
        assert_eq!(world.location(ids[0]), Location::new(2, 8));
        assert_eq!(world.location(ids[1]), Location::new(2, 9));
    }

    #[test]
    fn test_flock_moves_together() {
        let mut world = world(&[(2, 7), (2, 8)]);
        let ids = world.bird_ids().to_vec();
        let flock = world.form_flock(ids[0], ids[1]);
        assert_eq!(world.move_flock(flock, Direction::Right), Ok(()));
        assert_eq!(world.location(ids[0]), Location::new(2, 8));
        assert_eq!(world.location(ids[1]), Location::new(2, 9));
    }

    #[test]
    fn test_flock_ignores_other_birds() {
        let mut world = world(&[(5, 5), (5, 6), (5, 7)]);
        let ids = world.bird_ids().to_vec();
        let flock = world.form_flock(ids[0], ids[1]);
        assert_eq!(world.move_flock(flock, Direction::Right), Ok(()));
        assert_eq!(world.location(ids[1]), world.location(ids[2]));
    }

    #[test]
    fn test_unknown_flock_rejected() {
        let mut world = world(&[(5, 5)]);
        assert_eq!(
            world.move_flock(3, Direction::Up),
            Err(MoveError::UnknownFlock(3))
        );
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn test_move_is_one_unit_or_nothing(
            row in 0..10i32,
            col in 0..10i32,
            other_row in 0..10i32,
            other_col in 0..10i32,
            direction in direction(),
        ) {
            prop_assume!((row, col) != (other_row, other_col));
            let mut world = world(&[(row, col), (other_row, other_col)]);
            let bird = world.bird_ids()[0];
            let before = world.location(bird);
            match world.move_bird(bird, direction) {
                Ok(after) => {
                    prop_assert_eq!(after, world.location(bird));
                    prop_assert_eq!(crate::spatial::distance(before, after), 1);
                    prop_assert!(world.in_bounds(after));
                    prop_assert_ne!(after, Location::new(other_row, other_col));
                }
                Err(_) => prop_assert_eq!(before, world.location(bird)),
            }
        }

        #[test]
        fn test_flock_moves_all_or_nothing(
            row in 0..10i32,
            col in 0..9i32,
            direction in direction(),
        ) {
            let mut world = world(&[(row, col), (row, col + 1)]);
            let ids = world.bird_ids().to_vec();
            let flock = world.form_flock(ids[0], ids[1]);
            let before: Vec<Location> = ids.iter().map(|&id| world.location(id)).collect();
            let moved = world.move_flock(flock, direction).is_ok();
            let (d_row, d_col) = if moved { direction.delta() } else { (0, 0) };
            for (i, &id) in ids.iter().enumerate() {
                prop_assert_eq!(
                    world.location(id),
                    Location::new(before[i].row + d_row, before[i].col + d_col)
                );
            }
        }
    }
}
