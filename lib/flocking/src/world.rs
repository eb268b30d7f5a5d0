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

use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::config::{validate_grid, WorldConfig};
use crate::error::FlockError;
use crate::Rng;

new_key_type! { pub struct BirdId; }

/// Flocks are never dissolved, so a flock's index in the world is a stable id.
pub type FlockId = usize;

/// A grid cell. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bird {
    pub name: String,

    // Only the movement validator writes this.
    pub(crate) location: Location,
}

impl Bird {
    pub fn location(&self) -> Location {
        self.location
    }
}

/// Birds that move together. The first member leads: it is the one that acts for the whole flock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flock {
    pub(crate) members: Vec<BirdId>,
}

impl Flock {
    pub fn members(&self) -> &[BirdId] {
        &self.members
    }

    pub fn leader(&self) -> BirdId {
        self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, bird: BirdId) -> bool {
        self.members.contains(&bird)
    }
}

/// The whole simulation state: grid size, birds in scheduling order, flocks and the random
/// number generator every behavior draws from.
pub struct World {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) birds: SlotMap<BirdId, Bird>,
    pub(crate) order: Vec<BirdId>,
    pub(crate) flocks: Vec<Flock>,
    pub(crate) membership: FxHashMap<BirdId, FlockId>,
    pub(crate) rng: Rng,
    pub(crate) tick: u64,
}

impl World {
    /// Scatter `config.birds` birds over distinct random cells.
    pub fn new(config: &WorldConfig) -> Result<Self, FlockError> {
        config.validate()?;
        let mut world = Self::empty(config.width, config.height, config.rng());

        let cells = config.width * config.height;
        let picks = rand::seq::index::sample(&mut world.rng, cells, config.birds);
        for (i, cell) in picks.into_iter().enumerate() {
            let location = Location::new((cell / config.width) as i32, (cell % config.width) as i32);
            world.add_bird(format!("Bird {}", i), location)?;
        }
        Ok(world)
    }

    /// Place one bird at each of `locations`, in order. Mostly useful for setting up a scenario.
    pub fn with_birds(
        width: usize,
        height: usize,
        locations: &[Location],
        seed: u64,
    ) -> Result<Self, FlockError> {
        validate_grid(width, height, locations.len())?;
        let mut world = Self::empty(width, height, Rng::seed_from_u64(seed));
        for (i, location) in locations.iter().enumerate() {
            world.add_bird(format!("Bird {}", i), *location)?;
        }
        Ok(world)
    }

    // Callers have validated the grid, so the casts can't truncate.
    fn empty(width: usize, height: usize, rng: Rng) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            birds: SlotMap::with_key(),
            order: Vec::new(),
            flocks: Vec::new(),
            membership: FxHashMap::default(),
            rng,
            tick: 0,
        }
    }

    pub fn add_bird(
        &mut self,
        name: impl Into<String>,
        location: Location,
    ) -> Result<BirdId, FlockError> {
        if !self.in_bounds(location) {
            return Err(FlockError::OutOfBounds(location));
        }
        if self.occupant(location, None).is_some() {
            return Err(FlockError::Occupied(location));
        }
        let id = self.birds.insert(Bird {
            name: name.into(),
            location,
        });
        self.order.push(id);
        Ok(id)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of ticks stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn bird(&self, bird: BirdId) -> Option<&Bird> {
        self.birds.get(bird)
    }

    pub fn location(&self, bird: BirdId) -> Location {
        self.birds[bird].location
    }

    /// Bird ids in scheduling order, which is the order they were added in.
    pub fn bird_ids(&self) -> &[BirdId] {
        &self.order
    }

    pub fn birds(&self) -> impl Iterator<Item = (BirdId, &Bird)> + '_ {
        self.order.iter().map(move |&id| (id, &self.birds[id]))
    }

    pub fn bird_count(&self) -> usize {
        self.order.len()
    }

    pub fn flocks(&self) -> &[Flock] {
        &self.flocks
    }

    pub fn flock(&self, flock: FlockId) -> Option<&Flock> {
        self.flocks.get(flock)
    }

    pub fn flock_of(&self, bird: BirdId) -> Option<FlockId> {
        self.membership.get(&bird).copied()
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        (0..self.height).contains(&location.row) && (0..self.width).contains(&location.col)
    }

    /// The first bird (in scheduling order) standing on `location`, ignoring `except`.
    pub fn occupant(&self, location: Location, except: Option<BirdId>) -> Option<BirdId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| Some(id) != except)
            .find(|&id| self.birds[id].location == location)
    }

    pub(crate) fn form_flock(&mut self, first: BirdId, second: BirdId) -> FlockId {
        debug_assert!(self.flock_of(first).is_none() && self.flock_of(second).is_none());
        let flock = self.flocks.len();
        self.flocks.push(Flock {
            members: vec![first, second],
        });
        self.membership.insert(first, flock);
        self.membership.insert(second, flock);
        flock
    }

    pub(crate) fn add_to_flock(&mut self, flock: FlockId, bird: BirdId) {
        debug_assert!(self.flock_of(bird).is_none());
        self.flocks[flock].members.push(bird);
        self.membership.insert(bird, flock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_places_birds_on_distinct_cells() {
        let config = WorldConfig {
            seed: Some(42),
            ..WorldConfig::default()
        };
        let world = World::new(&config).expect("valid config");
        assert_eq!(world.bird_count(), 5);
        let mut seen = std::collections::HashSet::new();
        for (_, bird) in world.birds() {
            assert!(world.in_bounds(bird.location()));
            assert!(seen.insert(bird.location()), "{} shares a cell", bird.name);
        }
        assert!(world.flocks().is_empty());
    }

    #[test]
    fn test_new_world_can_fill_every_cell() {
        let config = WorldConfig {
            width: 3,
            height: 2,
            birds: 6,
            seed: Some(1),
            ..WorldConfig::default()
        };
        let world = World::new(&config).expect("valid config");
        assert_eq!(world.bird_count(), 6);
    }

    #[test]
    fn test_same_seed_same_placement() {
        let config = WorldConfig {
            seed: Some(7),
            ..WorldConfig::default()
        };
        let first: Vec<Location> = World::new(&config)
            .unwrap()
            .birds()
            .map(|(_, b)| b.location())
            .collect();
        let second: Vec<Location> = World::new(&config)
            .unwrap()
            .birds()
            .map(|(_, b)| b.location())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_birds_keeps_order_and_names() {
        let world =
            World::with_birds(10, 10, &[Location::new(0, 0), Location::new(4, 5)], 0).unwrap();
        let names: Vec<&str> = world.birds().map(|(_, b)| b.name.as_str()).collect();
        assert_eq!(names, vec!["Bird 0", "Bird 1"]);
        assert_eq!(world.location(world.bird_ids()[1]), Location::new(4, 5));
    }

    #[test]
    fn test_with_birds_rejects_shared_cell() {
        let result = World::with_birds(10, 10, &[Location::new(1, 1), Location::new(1, 1)], 0);
        assert!(matches!(result, Err(FlockError::Occupied(_))));
    }

    #[test]
    fn test_with_birds_rejects_out_of_bounds() {
        let result = World::with_birds(10, 10, &[Location::new(10, 0)], 0);
        assert!(matches!(result, Err(FlockError::OutOfBounds(_))));
    }

    #[test]
    fn test_with_birds_rejects_grid_too_far_across() {
        let far_corner = Location::new(1_999_999_999, 1_999_999_999);
        let result = World::with_birds(
            2_000_000_000,
            2_000_000_000,
            &[Location::new(0, 0), far_corner],
            0,
        );
        assert!(matches!(result, Err(FlockError::GridTooLarge { .. })));
    }

    #[test]
    fn test_flock_membership_is_tracked() {
        let mut world = World::with_birds(
            10,
            10,
            &[
                Location::new(0, 0),
                Location::new(0, 1),
                Location::new(5, 5),
            ],
            0,
        )
        .unwrap();
        let ids = world.bird_ids().to_vec();
        let flock = world.form_flock(ids[0], ids[1]);
        assert_eq!(world.flock_of(ids[0]), Some(flock));
        assert_eq!(world.flock_of(ids[1]), Some(flock));
        assert_eq!(world.flock_of(ids[2]), None);

        world.add_to_flock(flock, ids[2]);
        let members = world.flock(flock).unwrap();
        assert_eq!(members.len(), 3);
        assert_eq!(members.leader(), ids[0]);
        assert!(members.contains(ids[2]));
    }
}
