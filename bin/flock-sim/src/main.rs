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

use anyhow::Context;
use clap::Parser;
use flocking::{Controller, TickEnvironment, WorldConfig};
use tracing::info;

/// Birds on a grid find each other and fly in flocks.
#[derive(Parser, Debug)]
#[command(name = "flock-sim")]
struct Args {
    /// TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Number of birds
    #[arg(long)]
    birds: Option<usize>,

    /// Ticks to run
    #[arg(long)]
    ticks: Option<usize>,

    /// Seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print one JSON frame per tick for a display to consume
    #[arg(long)]
    frames: bool,

    /// Pause between ticks like an on-screen run would
    #[arg(long)]
    live: bool,

    /// Pause between ticks in milliseconds when --live (at least 500)
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Args {
    fn config(&self) -> anyhow::Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => WorldConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(birds) = self.birds {
            config.birds = birds;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.step_delay_ms = delay_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate().context("invalid world config")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    let args = Args::parse();
    let config = args.config()?;

    let mut controller = Controller::from_config(&config)?;
    for (_, bird) in controller.world().birds() {
        info!(bird = %bird.name, location = %bird.location(), "placed");
    }

    controller.start();
    for _ in 0..config.ticks {
        if controller.poll().is_none() {
            break;
        }
        if args.frames {
            println!("{}", serde_json::to_string(controller.frame())?);
        }
        if args.live {
            std::thread::sleep(controller.delay());
        }
    }
    controller.stop();

    let world = controller.into_world();
    info!(
        ticks = world.tick(),
        flocks = world.flocks().len(),
        done = world.is_done(),
        "finished"
    );
    if !args.frames {
        println!("{}", world);
        println!();
        println!("flocks: {}", world.flocks().len());
        for (id, bird) in world.birds() {
            match world.flock_of(id) {
                Some(flock) => println!("{} {} flock {}", bird.name, bird.location(), flock),
                None => println!("{} {}", bird.name, bird.location()),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["flock-sim", "--birds", "3", "--seed", "9", "--width", "4"]);
        let config = args.config().unwrap();
        assert_eq!(config.birds, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 10);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = Args::parse_from(["flock-sim", "--width", "1", "--height", "1", "--birds", "2"]);
        assert!(args.config().is_err());
    }

    #[test]
    fn test_short_run_finishes() {
        let config = WorldConfig {
            seed: Some(3),
            ticks: 50,
            ..WorldConfig::default()
        };
        let mut controller = Controller::from_config(&config).unwrap();
        controller.start();
        let mut ticks = 0;
        while ticks < config.ticks && controller.poll().is_some() {
            ticks += 1;
        }
        assert_eq!(controller.world().tick(), 50);
    }
}
