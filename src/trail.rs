//! The trail: committed assignments indexed by decision level.
//!
//! Distinct from the *pending* assertion stack (propagate.rs): the trail
//! only ever grows by [`Trail::commit`]/[`Trail::assign`] and only ever
//! shrinks by [`Trail::undo`] — undo is the only path that removes from
//! the trail.

use std::collections::HashMap;

use crate::assignment::{Assignment, Level};
use crate::clause::ClauseId;
use crate::data::{Lit, Var};

#[derive(Default)]
pub(crate) struct Trail {
    assignment: Assignment,
    /// Variables assigned at each level, in assignment order.
    at_level: HashMap<Level, Vec<Var>>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, v: Var) {
        self.assignment.expand(v);
    }

    pub fn total_vars(&self) -> usize {
        self.assignment.total_vars()
    }

    pub fn get(&self, lit: Lit) -> Option<bool> {
        self.assignment.get(lit)
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_satisfied(lit)
    }

    pub fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_unsatisfied(lit)
    }

    pub fn is_lit_assigned(&self, lit: Lit) -> bool {
        self.assignment.is_lit_assigned(lit)
    }

    pub fn is_lit_unassigned(&self, lit: Lit) -> bool {
        self.assignment.is_lit_unassigned(lit)
    }

    pub fn is_clause_satisfied(&self, cls: &[Lit]) -> bool {
        self.assignment.is_clause_satisfied(cls)
    }

    pub fn level_of(&self, lit: Lit) -> Option<Level> {
        self.assignment.level_of(lit)
    }

    pub fn reason_of(&self, lit: Lit) -> Option<ClauseId> {
        self.assignment.reason_of(lit)
    }

    pub fn is_decision(&self, lit: Lit) -> bool {
        self.assignment.is_decision(lit)
    }

    pub fn assignment_complete(&self) -> bool {
        self.assigned_vars() == self.total_vars()
    }

    pub fn assigned_vars(&self) -> usize {
        self.at_level.values().map(Vec::len).sum()
    }

    pub fn find_unassigned_variable(&self) -> Option<Var> {
        self.assignment.find_unassigned_variable()
    }

    /// Commit a literal implied by `reason` at `level`.
    pub fn commit(&mut self, lit: Lit, level: Level, reason: ClauseId) {
        self.assignment.set(lit, level, Some(reason));
        self.at_level.entry(level).or_default().push(lit.var());
    }

    /// Commit a decision literal at `level`, with no reason clause.
    pub fn assign(&mut self, lit: Lit, level: Level) {
        self.assignment.set(lit, level, None);
        self.at_level.entry(level).or_default().push(lit.var());
    }

    /// Undo every assignment made above `beta`, returning the newly
    /// unassigned variables so the branching heuristic can update.
    pub fn undo(&mut self, beta: Level) -> Vec<Var> {
        let levels: Vec<Level> = self
            .at_level
            .keys()
            .copied()
            .filter(|&lvl| lvl > beta)
            .collect();

        let mut unassigned = Vec::new();
        for lvl in levels {
            if let Some(vars) = self.at_level.remove(&lvl) {
                for var in vars {
                    self.assignment.unset(var);
                    unassigned.push(var);
                }
            }
        }
        unassigned
    }
}
