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

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{Agent, Environment, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VacuumWorldLocation {
    pub x: i32,
    pub y: i32,
}

/// The two locations of the vacuum world, see Figure 2.2.
pub const LOC_A: VacuumWorldLocation = VacuumWorldLocation { x: 0, y: 0 };
pub const LOC_B: VacuumWorldLocation = VacuumWorldLocation { x: 1, y: 0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacuumWorldAction {
    Left,
    Right,
    Suck,
    NoOp,
}

/// VacuumWorldPercept is the Percept that the Agent receives from the Environment for just
/// a single location, e.g imagine a dirt sensor looking right down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VacuumWorldPercept {
    pub location: VacuumWorldLocation,
    pub square_state: SquareState,
}

/// Reflex agent for the two-square vacuum world, see Figure 2.8.
#[derive(Default)]
pub struct ReflexVacuumAgent {}

impl ReflexVacuumAgent {
    pub fn new() -> Self {
        Self {}
    }
}

impl Agent for ReflexVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        if percept.square_state == SquareState::Dirty {
            VacuumWorldAction::Suck
        } else if percept.location == LOC_A {
            VacuumWorldAction::Right
        } else {
            VacuumWorldAction::Left
        }
    }
}

/// Ignores its percepts and picks any vacuum world action at random.
pub struct RandomVacuumAgent {
    rng: Rng,
}

impl RandomVacuumAgent {
    const ACTIONS: [VacuumWorldAction; 4] = [
        VacuumWorldAction::Right,
        VacuumWorldAction::Left,
        VacuumWorldAction::Suck,
        VacuumWorldAction::NoOp,
    ];

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;

    fn act(&mut self, _percept: &Self::Percept) -> Self::Action {
        *Self::ACTIONS
            .choose(&mut self.rng)
            .unwrap_or(&VacuumWorldAction::NoOp)
    }
}

/// Selects an action by looking up the whole percept sequence seen so far, see Figure 2.7.
///
/// Only practical for tiny domains. Sequences missing from the table map to `default_action`.
pub struct TableDrivenAgent<_Percept, _Action> {
    table: FxHashMap<Vec<_Percept>, _Action>,
    percepts: Vec<_Percept>,
    default_action: _Action,
}

impl<_Percept, _Action> TableDrivenAgent<_Percept, _Action>
where
    _Percept: Clone + Eq + Hash,
    _Action: Copy,
{
    pub fn new(table: FxHashMap<Vec<_Percept>, _Action>, default_action: _Action) -> Self {
        Self {
            table,
            percepts: Vec::new(),
            default_action,
        }
    }

    pub fn percepts_seen(&self) -> usize {
        self.percepts.len()
    }
}

impl<_Percept, _Action> Agent for TableDrivenAgent<_Percept, _Action>
where
    _Percept: Clone + Eq + Hash,
    _Action: Copy,
{
    type Action = _Action;
    type Percept = _Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        self.percepts.push(percept.clone());
        self.table
            .get(&self.percepts)
            .copied()
            .unwrap_or(self.default_action)
    }
}

/// The partial tabulation of Figure 2.3. Anything longer than what's listed falls back to NoOp.
pub fn table_driven_vacuum_agent() -> TableDrivenAgent<VacuumWorldPercept, VacuumWorldAction> {
    let p = |location, square_state| VacuumWorldPercept {
        location,
        square_state,
    };
    let a_clean = p(LOC_A, SquareState::Clean);
    let a_dirty = p(LOC_A, SquareState::Dirty);
    let b_clean = p(LOC_B, SquareState::Clean);
    let b_dirty = p(LOC_B, SquareState::Dirty);

    let mut table = FxHashMap::default();
    table.insert(vec![a_clean], VacuumWorldAction::Right);
    table.insert(vec![a_dirty], VacuumWorldAction::Suck);
    table.insert(vec![b_clean], VacuumWorldAction::Left);
    table.insert(vec![b_dirty], VacuumWorldAction::Suck);
    table.insert(vec![a_clean, a_clean], VacuumWorldAction::Right);
    table.insert(vec![a_clean, a_dirty], VacuumWorldAction::Suck);
    table.insert(vec![a_clean, a_clean, a_clean], VacuumWorldAction::Right);
    table.insert(vec![a_clean, a_clean, a_dirty], VacuumWorldAction::Suck);
    TableDrivenAgent::new(table, VacuumWorldAction::NoOp)
}

/// Same as ReflexVacuumAgent, except it remembers what it has seen of each square and stops once
/// everything is known to be clean.
#[derive(Default)]
pub struct ModelBasedVacuumAgent {
    model: HashMap<VacuumWorldLocation, SquareState>,
}

impl ModelBasedVacuumAgent {
    pub fn new() -> Self {
        Self::default()
    }

    fn known_clean(&self, location: VacuumWorldLocation) -> bool {
        self.model.get(&location) == Some(&SquareState::Clean)
    }
}

impl Agent for ModelBasedVacuumAgent {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        self.model.insert(percept.location, percept.square_state);
        if self.known_clean(LOC_A) && self.known_clean(LOC_B) {
            VacuumWorldAction::NoOp
        } else if percept.square_state == SquareState::Dirty {
            VacuumWorldAction::Suck
        } else if percept.location == LOC_A {
            VacuumWorldAction::Right
        } else {
            VacuumWorldAction::Left
        }
    }
}

/// Wraps an agent and logs every percept it sees and the action it picks.
pub struct TraceAgent<_Agent> {
    name: String,
    inner: _Agent,
}

impl<_Agent> TraceAgent<_Agent> {
    pub fn new(name: impl Into<String>, inner: _Agent) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl<_Agent> Agent for TraceAgent<_Agent>
where
    _Agent: Agent,
    _Agent::Percept: Debug,
    _Agent::Action: Debug,
{
    type Action = _Agent::Action;
    type Percept = _Agent::Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        let action = self.inner.act(percept);
        info!(agent = %self.name, ?percept, ?action, "agent acted");
        action
    }
}

/// The two-square vacuum world. Scores 10 for each dirt cleaned and -1 for each move.
#[derive(Debug, Clone)]
pub struct TrivialVacuumEnvironment {
    squares: HashMap<VacuumWorldLocation, SquareState>,
    agent_location: VacuumWorldLocation,
    performance: i32,
}

impl TrivialVacuumEnvironment {
    /// Both squares start Clean or Dirty at random, and the agent starts in either one.
    pub fn new(rng: &mut Rng) -> Self {
        let states = [SquareState::Clean, SquareState::Dirty];
        let locations = [LOC_A, LOC_B];
        let state_a = *states.choose(rng).unwrap_or(&SquareState::Dirty);
        let state_b = *states.choose(rng).unwrap_or(&SquareState::Dirty);
        let start = *locations.choose(rng).unwrap_or(&LOC_A);
        Self::with_state(state_a, state_b, start)
    }

    pub fn with_state(
        state_a: SquareState,
        state_b: SquareState,
        agent_location: VacuumWorldLocation,
    ) -> Self {
        let mut squares = HashMap::new();
        squares.insert(LOC_A, state_a);
        squares.insert(LOC_B, state_b);
        Self {
            squares,
            agent_location,
            performance: 0,
        }
    }

    pub fn square_state(&self, location: VacuumWorldLocation) -> Option<SquareState> {
        self.squares.get(&location).copied()
    }

    pub fn agent_location(&self) -> VacuumWorldLocation {
        self.agent_location
    }

    pub fn count_clean_squares(&self) -> i32 {
        self.squares
            .values()
            .filter(|&s| *s == SquareState::Clean)
            .count() as i32
    }
}

impl Environment for TrivialVacuumEnvironment {
    type Action = VacuumWorldAction;
    type Percept = VacuumWorldPercept;
    type Score = i32;

    fn percept(&self) -> Self::Percept {
        VacuumWorldPercept {
            location: self.agent_location,
            square_state: self.squares[&self.agent_location],
        }
    }

    fn execute_action(&mut self, action: &Self::Action) {
        match action {
            VacuumWorldAction::Right => {
                self.agent_location = LOC_B;
                self.performance -= 1;
            }
            VacuumWorldAction::Left => {
                self.agent_location = LOC_A;
                self.performance -= 1;
            }
            VacuumWorldAction::Suck => {
                if self.squares.insert(self.agent_location, SquareState::Clean)
                    == Some(SquareState::Dirty)
                {
                    self.performance += 10;
                }
            }
            VacuumWorldAction::NoOp => {}
        }
    }

    fn performance(&self) -> Self::Score {
        self.performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percept(location: VacuumWorldLocation, square_state: SquareState) -> VacuumWorldPercept {
        VacuumWorldPercept {
            location,
            square_state,
        }
    }

    #[test]
    fn test_reflex_vacuum_agent() {
        let mut agent = ReflexVacuumAgent::new();
        assert_eq!(
            agent.act(&percept(LOC_A, SquareState::Dirty)),
            VacuumWorldAction::Suck
        );
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Dirty)),
            VacuumWorldAction::Suck
        );
        assert_eq!(
            agent.act(&percept(LOC_A, SquareState::Clean)),
            VacuumWorldAction::Right
        );
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Clean)),
            VacuumWorldAction::Left
        );
    }

    #[test]
    fn test_trivial_environment_returns_dirty_percept() {
        let env = TrivialVacuumEnvironment::with_state(SquareState::Dirty, SquareState::Clean, LOC_A);
        assert_eq!(env.percept(), percept(LOC_A, SquareState::Dirty));
    }

    #[test]
    fn test_trivial_environment_cleaning_leaves_other_square_dirty() {
        let mut env =
            TrivialVacuumEnvironment::with_state(SquareState::Dirty, SquareState::Dirty, LOC_A);
        env.execute_action(&VacuumWorldAction::Suck);
        assert_eq!(env.percept(), percept(LOC_A, SquareState::Clean));
        env.execute_action(&VacuumWorldAction::Right);
        assert_eq!(env.percept(), percept(LOC_B, SquareState::Dirty));
    }

    #[test]
    fn test_trivial_environment_performance() {
        let mut env =
            TrivialVacuumEnvironment::with_state(SquareState::Dirty, SquareState::Clean, LOC_A);
        assert_eq!(env.performance(), 0);
        env.execute_action(&VacuumWorldAction::Suck);
        assert_eq!(env.performance(), 10);

        // sucking a clean square earns nothing
        env.execute_action(&VacuumWorldAction::Suck);
        assert_eq!(env.performance(), 10);

        env.execute_action(&VacuumWorldAction::Right);
        env.execute_action(&VacuumWorldAction::Left);
        assert_eq!(env.performance(), 8);
        assert_eq!(env.count_clean_squares(), 2);
    }

    #[test]
    fn test_trivial_environment_moving_right_twice_stays_at_b() {
        let mut env =
            TrivialVacuumEnvironment::with_state(SquareState::Clean, SquareState::Clean, LOC_A);
        env.execute_action(&VacuumWorldAction::Right);
        env.execute_action(&VacuumWorldAction::Right);
        assert_eq!(env.agent_location(), LOC_B);
        assert_eq!(env.performance(), -2);
    }

    #[test]
    fn test_trivial_environment_noop_does_nothing() {
        let mut env =
            TrivialVacuumEnvironment::with_state(SquareState::Dirty, SquareState::Dirty, LOC_A);
        env.execute_action(&VacuumWorldAction::NoOp);
        assert_eq!(env.percept(), percept(LOC_A, SquareState::Dirty));
        assert_eq!(env.performance(), 0);
    }

    #[test]
    fn test_trivial_environment_random_start_is_a_known_square() {
        let mut rng = Rng::seed_from_u64(42);
        for _ in 0..20 {
            let env = TrivialVacuumEnvironment::new(&mut rng);
            assert!(env.agent_location() == LOC_A || env.agent_location() == LOC_B);
            assert!(env.square_state(LOC_A).is_some());
            assert!(env.square_state(LOC_B).is_some());
        }
    }

    #[test]
    fn test_model_based_agent_stops_when_everything_clean() {
        let mut agent = ModelBasedVacuumAgent::new();
        assert_eq!(
            agent.act(&percept(LOC_A, SquareState::Clean)),
            VacuumWorldAction::Right
        );
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Dirty)),
            VacuumWorldAction::Suck
        );
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Clean)),
            VacuumWorldAction::NoOp
        );
    }

    #[test]
    fn test_table_driven_agent_follows_table() {
        let mut agent = table_driven_vacuum_agent();
        assert_eq!(
            agent.act(&percept(LOC_A, SquareState::Clean)),
            VacuumWorldAction::Right
        );
        assert_eq!(
            agent.act(&percept(LOC_A, SquareState::Dirty)),
            VacuumWorldAction::Suck
        );
        assert_eq!(agent.percepts_seen(), 2);
    }

    #[test]
    fn test_table_driven_agent_falls_back_to_default() {
        let mut agent = table_driven_vacuum_agent();
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Clean)),
            VacuumWorldAction::Left
        );
        // [B clean, B clean] is not in the table
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Clean)),
            VacuumWorldAction::NoOp
        );
    }

    #[test]
    fn test_random_agent_is_deterministic_for_a_seed() {
        let p = percept(LOC_A, SquareState::Dirty);
        let mut first = RandomVacuumAgent::new(7);
        let mut second = RandomVacuumAgent::new(7);
        let first_actions: Vec<_> = (0..32).map(|_| first.act(&p)).collect();
        let second_actions: Vec<_> = (0..32).map(|_| second.act(&p)).collect();
        assert_eq!(first_actions, second_actions);
    }

    #[test]
    fn test_trace_agent_passes_action_through() {
        let mut agent = TraceAgent::new("reflex", ReflexVacuumAgent::new());
        assert_eq!(
            agent.act(&percept(LOC_B, SquareState::Clean)),
            VacuumWorldAction::Left
        );
    }
}
