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

use std::time::Duration;

use agents::TickEnvironment;
use tracing::info;

use crate::config::WorldConfig;
use crate::error::FlockError;
use crate::render::Frame;
use crate::scheduler::TickReport;
use crate::world::World;

/// Continuous stepping never goes faster than this.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Start, stop and single-step a world, keeping the latest frame around for a display to poll.
///
/// Nothing here sleeps or spawns: whoever drives the controller calls [`Controller::poll`] every
/// [`Controller::delay`].
pub struct Controller {
    world: World,
    state: RunState,
    cell_width: u32,
    delay: Duration,
    frame: Frame,
}

impl Controller {
    pub fn new(world: World, cell_width: u32) -> Self {
        let frame = Frame::capture(&world, cell_width, None);
        Self {
            world,
            state: RunState::Stopped,
            cell_width,
            delay: Duration::from_secs(1),
            frame,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self, FlockError> {
        let mut controller = Self::new(World::new(config)?, config.cell_width);
        controller.set_delay(Duration::from_millis(config.step_delay_ms));
        Ok(controller)
    }

    pub fn start(&mut self) {
        if self.state == RunState::Stopped {
            info!(tick = self.world.tick(), "running");
        }
        self.state = RunState::Running;
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            info!(tick = self.world.tick(), "stopped");
        }
        self.state = RunState::Stopped;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Advance exactly one tick, whether running or not.
    pub fn single_step(&mut self) -> TickReport {
        let report = self.world.step();
        self.frame = Frame::capture(&self.world, self.cell_width, Some(&self.frame));
        report
    }

    /// Advance one tick if running. Stops by itself once the world has nobody left to step.
    pub fn poll(&mut self) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        if self.world.is_done() {
            self.stop();
            return None;
        }
        Some(self.single_step())
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// The pause between two ticks while running, never below [`MIN_STEP_DELAY`].
    pub fn delay(&self) -> Duration {
        self.delay.max(MIN_STEP_DELAY)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }
}
