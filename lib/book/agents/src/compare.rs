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

//! See how well several agent programs do across many instances of an environment.

use num_traits::ToPrimitive;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use crate::{Agent, Environment, Rng, Simulation};

pub type BoxedAgent<_Environment> = Box<
    dyn Agent<
        Action = <_Environment as Environment>::Action,
        Percept = <_Environment as Environment>::Percept,
    >,
>;

/// Builds a fresh agent for the environment with the given index, so that stateful or random
/// agents never share anything between runs.
pub struct NamedAgentFactory<_Environment: Environment> {
    pub name: String,
    build: Box<dyn Fn(usize) -> BoxedAgent<_Environment> + Sync>,
}

impl<_Environment: Environment> NamedAgentFactory<_Environment> {
    pub fn new(
        name: impl Into<String>,
        build: impl Fn(usize) -> BoxedAgent<_Environment> + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            build: Box::new(build),
        }
    }

    pub fn build(&self, env_index: usize) -> BoxedAgent<_Environment> {
        (self.build)(env_index)
    }
}

/// Return the mean performance of running an agent in each of the environments for `steps`.
pub fn test_agent<_Environment, _Agent, F>(
    agent_factory: F,
    steps: i32,
    envs: Vec<_Environment>,
) -> f64
where
    _Environment: Environment + Send,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
    F: Fn(usize) -> _Agent + Sync,
{
    if envs.is_empty() {
        return 0.0;
    }
    let n = envs.len() as f64;
    let total: f64 = envs
        .into_par_iter()
        .enumerate()
        .map(|(env_index, env)| {
            let mut simulation = Simulation::new(env, agent_factory(env_index), steps);
            simulation.run();
            simulation.score().to_f64().unwrap_or(0.0)
        })
        .sum();
    total / n
}

/// Create `n` instances of the environment and run each agent in its own copy of every one of
/// them for `steps`. Returns `(agent name, mean performance)` in the order the factories were
/// given.
pub fn compare_agents<_Environment, F>(
    env_factory: F,
    agent_factories: &[NamedAgentFactory<_Environment>],
    n: usize,
    steps: i32,
    seed: u64,
) -> Vec<(String, f64)>
where
    _Environment: Environment + Clone + Send,
    F: Fn(&mut Rng) -> _Environment,
{
    let mut rng = Rng::seed_from_u64(seed);
    let envs: Vec<_Environment> = (0..n).map(|_| env_factory(&mut rng)).collect();

    agent_factories
        .iter()
        .map(|factory| {
            let mean = test_agent(|env_index| factory.build(env_index), steps, envs.clone());
            info!(agent = %factory.name, envs = n, steps, mean, "compared agent");
            (factory.name.clone(), mean)
        })
        .collect()
}
