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

// PEAS - Performance, Environment, Action, Sensing
//
// See:
// -  Chapter 2: Intelligent Agents, page 40

pub mod compare;
pub mod vacuum_world;

pub type Rng = rand_pcg::Pcg64;

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Perception, the Agent will return an Action.
///
/// If the Agent wants to implement a table-driven agent, implementations can
/// store state of all previous Perceptions.
///
/// If the Agent wants to implement e.g. ReflexVacuumAgent, it does not need
/// to store any state.
///
/// Notice that the Agent is not aware of an Environment, it's only interface
/// is the Perception coming in then the Action going out.
pub trait Agent {
    type Action;
    type Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action;
}

impl<_Agent: Agent + ?Sized> Agent for Box<_Agent> {
    type Action = _Agent::Action;
    type Percept = _Agent::Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        (**self).act(percept)
    }
}

/// An Environment runs a single Agent in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    type Action;
    type Percept;
    type Score: num_traits::NumAssign + num_traits::ToPrimitive + Copy;

    fn percept(&self) -> Self::Percept;
    fn execute_action(&mut self, action: &Self::Action);

    /// Returns the performance measure the Environment has accumulated for its agent so far. The
    /// Environment owns the measure, so an agent program can't cheat by scoring itself.
    fn performance(&self) -> Self::Score;

    /// By default an Environment never finishes on its own; the Simulation's time steps bound it.
    fn is_done(&self) -> bool {
        false
    }
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles.
///
/// The Simulation is aware of both the Environment and the single Agent. Notice that the Agent's
/// generic Action and Percept come from the Environment. The Agent still does not need to know that
/// the Environment exists, but the Agent definitely needs the Environment's Action and Percept
/// types.
pub struct Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    environment: _Environment,
    agent: _Agent,
    time_steps: i32,
    steps_taken: i32,
}

impl<_Environment, _Agent> Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    pub fn new(environment: _Environment, agent: _Agent, time_steps: i32) -> Self {
        Self {
            environment,
            agent,
            time_steps,
            steps_taken: 0,
        }
    }

    pub fn run(&mut self) {
        for _ in 0..self.time_steps {
            if self.environment.is_done() {
                break;
            }
            let percept = self.environment.percept();
            let action = self.agent.act(&percept);
            self.environment.execute_action(&action);
            self.steps_taken += 1;
        }
    }

    pub fn score(&self) -> <_Environment as Environment>::Score {
        self.environment.performance()
    }

    pub fn steps_taken(&self) -> i32 {
        self.steps_taken
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }
}

/// A TickEnvironment advances every agent living in it together, one tick at a time. Unlike
/// [`Environment`] it owns its agents, so it decides for itself who acts during a tick.
pub trait TickEnvironment {
    /// Whatever the environment wants to say about a single tick.
    type Report;

    fn has_live_agents(&self) -> bool;
    fn step(&mut self) -> Self::Report;

    /// By default, we're done when we can't find a live agent.
    fn is_done(&self) -> bool {
        !self.has_live_agents()
    }

    /// Run for at most `steps` ticks and return how many ticks actually ran.
    fn run(&mut self, steps: usize) -> usize {
        let mut ticks = 0;
        for _ in 0..steps {
            if self.is_done() {
                break;
            }
            self.step();
            ticks += 1;
        }
        ticks
    }
}
