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

use std::path::PathBuf;

use crate::world::{BirdId, FlockId, Location};

/// Errors building a world, either from a config or from explicit placements.
#[derive(Debug, thiserror::Error)]
pub enum FlockError {
    /// Width or height is zero.
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// Coordinates, or distances between them, would not fit in an i32.
    #[error("grid is too large: {width}x{height}")]
    GridTooLarge { width: usize, height: usize },

    /// Birds never share a cell at setup, so there must be a cell for each.
    #[error("{birds} birds do not fit on a grid with {cells} cells")]
    TooManyBirds { birds: usize, cells: usize },

    #[error("location {0} is outside the grid")]
    OutOfBounds(Location),

    #[error("location {0} is already occupied")]
    Occupied(Location),

    #[error("failed to read config {path:?}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

/// Why a single bird or a whole flock could not move. Only the movement validator hands these
/// out; the behavior policy swallows them and tries something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("destination {destination} is outside the grid")]
    OutOfBounds { destination: Location },

    #[error("destination {destination} is occupied by {occupant:?}")]
    Occupied {
        destination: Location,
        occupant: BirdId,
    },

    #[error("no such flock: {0}")]
    UnknownFlock(FlockId),
}
