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

use std::path::Path;

use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::FlockError;
use crate::Rng;

/// Everything needed to set up a world and drive it. Missing keys in a TOML file fall back to the
/// defaults: 5 birds on a 10x10 grid for 1000 ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub birds: usize,
    pub ticks: usize,

    /// Seed for placement and behavior. Without one every run is different.
    pub seed: Option<u64>,

    /// Pixel size of one grid cell, for whoever draws the world.
    pub cell_width: u32,

    /// Pause between ticks while running continuously.
    pub step_delay_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            birds: 5,
            ticks: 1000,
            seed: None,
            cell_width: 50,
            step_delay_ms: 1000,
        }
    }
}

impl WorldConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, FlockError> {
        let config: WorldConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlockError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| FlockError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        validate_grid(self.width, self.height, self.birds)
    }

    pub fn rng(&self) -> Rng {
        match self.seed {
            Some(seed) => Rng::seed_from_u64(seed),
            None => Rng::from_entropy(),
        }
    }
}

/// Checks that a `width` x `height` grid exists, is addressable with i32 coordinates and has room
/// for `birds` birds on distinct cells. The distance between opposite corners has to fit in an i32
/// too.
pub(crate) fn validate_grid(width: usize, height: usize, birds: usize) -> Result<(), FlockError> {
    if width == 0 || height == 0 {
        return Err(FlockError::EmptyGrid { width, height });
    }
    let too_large = FlockError::GridTooLarge { width, height };
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(too_large);
    }
    if i32::try_from((width - 1) + (height - 1)).is_err() {
        return Err(too_large);
    }
    let cells = width.checked_mul(height).ok_or(too_large)?;
    if birds > cells {
        return Err(FlockError::TooManyBirds { birds, cells });
    }
    Ok(())
}
