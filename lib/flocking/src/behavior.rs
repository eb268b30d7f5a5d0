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

//! What a bird does with its turn.
//!
//! Every tick each bird is looked at fresh: a bird in a flock flies the whole flock somewhere,
//! a bird on its own looks at how close the others are and either wanders, closes in on them or
//! joins up.

use rand::seq::SliceRandom;
use tracing::debug;

use crate::movement::Direction;
use crate::spatial::distance;
use crate::world::{BirdId, FlockId, Location, World};

/// Birds closer than this join (or start) a flock.
pub const JOIN_DISTANCE: i32 = 2;

/// Birds exactly this far apart close in on each other.
pub const APPROACH_DISTANCE: i32 = 2;

/// How a bird on its own reads its neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Wander,
    Approach,
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupStatus {
    Ungrouped,
    Grouped(FlockId),
}

/// What acting actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Wandered(Direction),

    /// Every direction was blocked, so the bird sat this tick out.
    Boxed,

    Approached {
        toward: Location,
        moved: Option<Direction>,
        joined: Option<FlockId>,
    },

    FormedFlock {
        flock: FlockId,
        partner: BirdId,
    },

    JoinedFlock(FlockId),

    FlockMoved {
        flock: FlockId,
        direction: Direction,
    },

    /// No direction keeps the whole flock on the grid.
    FlockStuck(FlockId),

    /// There was nobody to approach or join.
    Idle,
}

/// The single direction that closes the larger of the row and column gaps between `from` and
/// `to`. Equal gaps are closed along the column. `None` when already there.
pub fn step_toward(from: Location, to: Location) -> Option<Direction> {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    if d_row == 0 && d_col == 0 {
        None
    } else if d_row.abs() > d_col.abs() {
        Some(if d_row > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        Some(if d_col > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    }
}

impl World {
    pub fn group_status(&self, bird: BirdId) -> GroupStatus {
        match self.flock_of(bird) {
            Some(flock) => GroupStatus::Grouped(flock),
            None => GroupStatus::Ungrouped,
        }
    }

    /// Scan the other birds in scheduling order. The first one at exactly [`APPROACH_DISTANCE`]
    /// means approach, the first one closer than [`JOIN_DISTANCE`] means join; whichever is met
    /// first wins.
    pub fn classify(&self, bird: BirdId) -> Classification {
        let origin = self.location(bird);
        for &other in &self.order {
            if other == bird {
                continue;
            }
            let d = distance(origin, self.location(other));
            if d == APPROACH_DISTANCE {
                return Classification::Approach;
            }
            if d < JOIN_DISTANCE {
                return Classification::Join;
            }
        }
        Classification::Wander
    }

    /// Let `bird` take its turn.
    pub fn act(&mut self, bird: BirdId) -> Outcome {
        let outcome = match self.group_status(bird) {
            GroupStatus::Grouped(flock) => self.fly_flock(flock),
            GroupStatus::Ungrouped => match self.classify(bird) {
                Classification::Wander => self.wander(bird),
                Classification::Approach => self.approach(bird),
                Classification::Join if self.flocks.is_empty() => self.start_flock(bird),
                Classification::Join => self.join_nearest_flock(bird),
            },
        };
        debug!(tick = self.tick, bird = %self.birds[bird].name, ?outcome, "bird acted");
        outcome
    }

    // Random directions, each tried at most once.
    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }

    fn wander(&mut self, bird: BirdId) -> Outcome {
        for direction in self.shuffled_directions() {
            if self.move_bird(bird, direction).is_ok() {
                return Outcome::Wandered(direction);
            }
        }
        Outcome::Boxed
    }

    fn fly_flock(&mut self, flock: FlockId) -> Outcome {
        for direction in self.shuffled_directions() {
            if self.move_flock(flock, direction).is_ok() {
                return Outcome::FlockMoved { flock, direction };
            }
        }
        Outcome::FlockStuck(flock)
    }

    fn approach(&mut self, bird: BirdId) -> Outcome {
        let target = if self.flocks.is_empty() {
            self.nearest_other(bird, self.order.iter().copied())
        } else {
            self.nearest_other(bird, self.grouped_birds())
        };
        let Some(target) = target else {
            return Outcome::Idle;
        };

        // A blocked step is not retried; the bird just stays put this tick.
        let toward = self.location(target);
        let mut moved = None;
        if let Some(direction) = step_toward(self.location(bird), toward) {
            if self.move_bird(bird, direction).is_ok() {
                moved = Some(direction);
            }
        }

        let joined = self.flock_within_join_distance(bird);
        if let Some(flock) = joined {
            self.add_to_flock(flock, bird);
        }
        Outcome::Approached {
            toward,
            moved,
            joined,
        }
    }

    fn flock_within_join_distance(&self, bird: BirdId) -> Option<FlockId> {
        let nearest = self.nearest_other(bird, self.grouped_birds())?;
        if self.distance_between(bird, nearest) < JOIN_DISTANCE {
            self.flock_of(nearest)
        } else {
            None
        }
    }

    fn start_flock(&mut self, bird: BirdId) -> Outcome {
        let partner = self.nearest_other(bird, self.order.iter().copied());
        match partner {
            Some(partner) => Outcome::FormedFlock {
                flock: self.form_flock(bird, partner),
                partner,
            },
            None => Outcome::Idle,
        }
    }

    /// Join whichever flock has the member closest to `bird`. There is no distance limit here: the
    /// neighbor that made `bird` classify as a join may be on its own while the nearest flock is
    /// across the grid, and `bird` still joins that flock from where it stands.
    fn join_nearest_flock(&mut self, bird: BirdId) -> Outcome {
        let flock = self
            .nearest_other(bird, self.grouped_birds())
            .and_then(|member| self.flock_of(member));
        match flock {
            Some(flock) => {
                self.add_to_flock(flock, bird);
                Outcome::JoinedFlock(flock)
            }
            None => Outcome::Idle,
        }
    }
}
