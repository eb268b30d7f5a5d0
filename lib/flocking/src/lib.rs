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

//! Birds on a small grid that wander on their own, find each other and then fly together as
//! flocks.
//!
//! A [`World`] owns every bird and flock. It is advanced one tick at a time through
//! [`TickEnvironment::step`]; during a tick each ungrouped bird acts once and each flock acts once
//! through its leader.

pub mod behavior;
pub mod config;
pub mod control;
pub mod error;
pub mod movement;
pub mod render;
pub mod scheduler;
pub mod spatial;
pub mod world;

pub use agents::TickEnvironment;

pub use behavior::{Classification, GroupStatus, Outcome};
pub use config::WorldConfig;
pub use control::{Controller, RunState};
pub use error::{FlockError, MoveError};
pub use movement::Direction;
pub use render::{Frame, Sprite};
pub use scheduler::TickReport;
pub use world::{Bird, BirdId, Flock, FlockId, Location, World};

pub type Rng = agents::Rng;
