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

use crate::world::{BirdId, Location, World};

/// Manhattan distance between two cells.
pub fn distance(a: Location, b: Location) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

impl World {
    pub fn distance_between(&self, a: BirdId, b: BirdId) -> i32 {
        distance(self.location(a), self.location(b))
    }

    /// The candidate closest to `bird`, skipping `bird` itself. Ties go to whichever candidate
    /// comes first.
    pub fn nearest_other<I>(&self, bird: BirdId, candidates: I) -> Option<BirdId>
    where
        I: IntoIterator<Item = BirdId>,
    {
        let origin = self.location(bird);
        let mut nearest: Option<(BirdId, i32)> = None;
        for candidate in candidates {
            if candidate == bird {
                continue;
            }
            let d = distance(origin, self.location(candidate));
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((candidate, d));
            }
        }
        nearest.map(|(candidate, _)| candidate)
    }

    /// Every other bird no further than `radius` from `bird`, in scheduling order.
    pub fn birds_within(&self, bird: BirdId, radius: i32) -> Vec<BirdId> {
        let origin = self.location(bird);
        self.order
            .iter()
            .copied()
            .filter(|&other| other != bird && distance(origin, self.location(other)) <= radius)
            .collect()
    }

    /// Members of every flock, flock by flock.
    pub fn grouped_birds(&self) -> impl Iterator<Item = BirdId> + '_ {
        self.flocks
            .iter()
            .flat_map(|flock| flock.members.iter().copied())
    }
}
