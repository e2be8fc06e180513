//! Per-variable assignment state: truth value, decision level, reason.

use crate::clause::ClauseId;
use crate::data::{Lit, Var, VarVec};

pub type Level = i32;

/// Level reserved for literals forced unconditionally: input singleton
/// clauses, and literals forced by failed-literal probing. Both must
/// survive the `undo(LEVEL_PROBE_FORCED)` calls probing issues between
/// its own tentative probes, so both share this level.
pub const LEVEL_PROBE_FORCED: Level = -2;
/// Level used for the tentative probes themselves.
pub const LEVEL_PROBE_TENTATIVE: Level = -1;
/// Baseline level a restart undoes back to, below the first real
/// decision level (`1`).
pub const LEVEL_ROOT: Level = 0;

#[derive(Debug, Clone, Copy)]
struct AssignData {
    is_pos: bool,
    level: Level,
    /// `None` iff this literal was a decision.
    reason: Option<ClauseId>,
}

#[derive(Default)]
pub(crate) struct Assignment {
    data: VarVec<Option<AssignData>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, v: Var) {
        self.data.expand(v, None);
    }

    pub fn total_vars(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, lit: Lit) -> Option<bool> {
        self.data[lit.var()].map(|d| d.is_pos == lit.is_pos())
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        matches!(self.data[lit.var()], Some(d) if d.is_pos == lit.is_pos())
    }

    pub fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        matches!(self.data[lit.var()], Some(d) if d.is_pos != lit.is_pos())
    }

    pub fn is_lit_assigned(&self, lit: Lit) -> bool {
        self.data[lit.var()].is_some()
    }

    pub fn is_lit_unassigned(&self, lit: Lit) -> bool {
        self.data[lit.var()].is_none()
    }

    pub fn is_clause_satisfied(&self, cls: &[Lit]) -> bool {
        cls.iter().copied().any(|lit| self.is_lit_satisfied(lit))
    }

    pub fn level_of(&self, lit: Lit) -> Option<Level> {
        self.data[lit.var()].map(|d| d.level)
    }

    pub fn reason_of(&self, lit: Lit) -> Option<ClauseId> {
        self.data[lit.var()].and_then(|d| d.reason)
    }

    pub fn is_decision(&self, lit: Lit) -> bool {
        matches!(self.data[lit.var()], Some(d) if d.reason.is_none())
    }

    /// Record `lit` as true at `level`, with `reason` (`None` for a decision).
    pub fn set(&mut self, lit: Lit, level: Level, reason: Option<ClauseId>) {
        debug_assert!(self.is_lit_unassigned(lit));
        self.data[lit.var()] = Some(AssignData {
            is_pos: lit.is_pos(),
            level,
            reason,
        });
    }

    pub fn unset(&mut self, var: Var) {
        debug_assert!(self.data[var].is_some());
        self.data[var] = None;
    }

    pub fn find_unassigned_variable(&self) -> Option<Var> {
        self.data
            .iter_with_var()
            .find(|&(_, data)| data.is_none())
            .map(|(v, _)| v)
    }
}
