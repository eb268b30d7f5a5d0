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

use agents::TickEnvironment;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::behavior::Outcome;
use crate::world::{BirdId, World};

/// Everything that happened during one tick, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub outcomes: Vec<(BirdId, Outcome)>,
}

impl TickEnvironment for World {
    type Report = TickReport;

    fn has_live_agents(&self) -> bool {
        !self.order.is_empty()
    }

    /// Birds on their own act first, in scheduling order, checked as the tick goes along so that
    /// a bird swept into a flock earlier in the tick is skipped. Then every flock acts once through
    /// its leader, unless the leader already had its turn this tick.
    fn step(&mut self) -> TickReport {
        self.tick += 1;
        let mut acted: FxHashSet<BirdId> = FxHashSet::default();
        let mut outcomes = Vec::with_capacity(self.order.len());

        let order = self.order.clone();
        for bird in order {
            if self.flock_of(bird).is_some() {
                continue;
            }
            outcomes.push((bird, self.act(bird)));
            acted.insert(bird);
        }

        for flock in 0..self.flocks.len() {
            let leader = self.flocks[flock].leader();
            if acted.insert(leader) {
                outcomes.push((leader, self.act(leader)));
            }
        }

        debug!(
            tick = self.tick,
            acted = outcomes.len(),
            flocks = self.flocks.len(),
            "tick complete"
        );
        TickReport {
            tick: self.tick,
            outcomes,
        }
    }
}
