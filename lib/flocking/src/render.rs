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

//! What a display needs to draw the world: pixel positions per bird, and a plain text grid.

use serde::Serialize;

use crate::world::{FlockId, Location, World};

/// Top-left pixel of the cell at `location`, for cells `cell_width` pixels wide.
pub fn pixel_offset(location: Location, cell_width: u32) -> (i64, i64) {
    let cell_width = i64::from(cell_width);
    (
        i64::from(location.col) * cell_width,
        i64::from(location.row) * cell_width,
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sprite {
    pub name: String,
    pub location: Location,
    pub flock: Option<FlockId>,
    pub x: i64,
    pub y: i64,

    /// How far the sprite has to slide since the previous frame.
    pub dx: i64,
    pub dy: i64,
}

/// One snapshot of the world, taken after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub cell_width: u32,
    pub sprites: Vec<Sprite>,
}

impl Frame {
    /// Birds are never removed, so sprites line up with `previous` by position.
    pub fn capture(world: &World, cell_width: u32, previous: Option<&Frame>) -> Self {
        let sprites = world
            .birds()
            .enumerate()
            .map(|(i, (id, bird))| {
                let (x, y) = pixel_offset(bird.location(), cell_width);
                let (dx, dy) = previous
                    .and_then(|frame| frame.sprites.get(i))
                    .map_or((0, 0), |sprite| (x - sprite.x, y - sprite.y));
                Sprite {
                    name: bird.name.clone(),
                    location: bird.location(),
                    flock: world.flock_of(id),
                    x,
                    y,
                    dx,
                    dy,
                }
            })
            .collect();
        Self {
            tick: world.tick(),
            cell_width,
            sprites,
        }
    }
}

// Column numbers across the top, row numbers down the left. '.' is empty, 'o' a bird on its own,
// a letter a member of that flock (a for the first flock) and '*' more than one bird.
impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        s.push_str("  ");
        for col in 0..self.width {
            s.push_str(&format!("{}", col % 10));
            if col < self.width - 1 {
                s.push(' ');
            }
        }
        s.push('\n');

        for row in 0..self.height {
            s.push_str(&format!("{} ", row % 10));
            for col in 0..self.width {
                let here = Location::new(row, col);
                let mut birds = self.birds().filter(|(_, bird)| bird.location() == here);
                let c = match (birds.next(), birds.next()) {
                    (None, _) => '.',
                    (Some(_), Some(_)) => '*',
                    (Some((id, _)), None) => match self.flock_of(id) {
                        Some(flock) => (b'a' + (flock % 26) as u8) as char,
                        None => 'o',
                    },
                };
                s.push(c);
                if col < self.width - 1 {
                    s.push(' ');
                }
            }
            if row < self.height - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}
