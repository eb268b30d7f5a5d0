/*
 * Copyright 2023 Asim Ihsan
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use agents::compare::{compare_agents, NamedAgentFactory};
use agents::vacuum_world::{
    table_driven_vacuum_agent, ModelBasedVacuumAgent, RandomVacuumAgent, ReflexVacuumAgent,
    TraceAgent, TrivialVacuumEnvironment,
};
use agents::{Rng, Simulation};
use clap::Parser;
use rand::SeedableRng;
use tracing::info;

/// Run vacuum world agents and compare how well they do.
#[derive(Parser, Debug)]
#[command(name = "vacuum-agents")]
struct Args {
    /// Time steps per run
    #[arg(long, default_value_t = 1000)]
    steps: i32,

    /// Environments each agent is compared on
    #[arg(long, default_value_t = 10)]
    envs: usize,

    /// Seed for environment setup and random agents
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log every percept and action of the single reflex agent run
    #[arg(long)]
    trace: bool,
}

type Factory = NamedAgentFactory<TrivialVacuumEnvironment>;

// Chapter 2 Intelligent Agents Exercise 11.
//
// Implement a performance-measuring environment simulator for the vacuum-cleaner world depicted in
// Figure 2.8 and specified on page . Your implementation should be modular so that the sensors,
// actuators, and environment characteristics (size, shape, dirt placement, etc.) can be changed
// easily. (Note: for some choices of programming language and operating system there are already
// implementations in the online code repository.)
fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let args = Args::parse();
    anyhow::ensure!(args.steps >= 0, "steps must not be negative");

    let mut rng = Rng::seed_from_u64(args.seed);
    let environment = TrivialVacuumEnvironment::new(&mut rng);
    let score = if args.trace {
        let agent = TraceAgent::new("reflex", ReflexVacuumAgent::new());
        let mut simulation = Simulation::new(environment, agent, args.steps);
        simulation.run();
        simulation.score()
    } else {
        let mut simulation = Simulation::new(environment, ReflexVacuumAgent::new(), args.steps);
        simulation.run();
        simulation.score()
    };
    println!("reflex agent score: {}", score);

    let seed = args.seed;
    let factories = vec![
        Factory::new("reflex", |_| Box::new(ReflexVacuumAgent::new())),
        Factory::new("random", move |env_index| {
            Box::new(RandomVacuumAgent::new(seed.wrapping_add(env_index as u64)))
        }),
        Factory::new("table-driven", |_| Box::new(table_driven_vacuum_agent())),
        Factory::new("model-based", |_| Box::new(ModelBasedVacuumAgent::new())),
    ];
    info!(envs = args.envs, steps = args.steps, "comparing agents");
    let results = compare_agents(
        TrivialVacuumEnvironment::new,
        &factories,
        args.envs,
        args.steps,
        args.seed,
    );

    println!("{:<14} {:>10}", "agent", "mean score");
    for (name, mean) in results {
        println!("{:<14} {:>10.2}", name, mean);
    }
    Ok(())
}
