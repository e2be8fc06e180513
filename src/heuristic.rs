//! Branching heuristics.
//!
//! Exposed as a narrow trait so alternative heuristics (VSIDS, LRB)
//! could be substituted without touching the rest of the engine;
//! [`Erma`] is the only implementation this crate ships, grounded on
//! `original_source/branching.py`.

use std::collections::HashSet;

use crate::data::{Var, VarVec};

/// The capability set the search loop drives a branching policy through.
pub(crate) trait BranchingHeuristic {
    fn on_assign(&mut self, var: Var);
    fn on_unassign(&mut self, vars: &[Var]);
    fn on_learned(&mut self, learned_vars: &[Var], conflict_vars: &[Var]);
    fn pick(&self, free: &[Var]) -> Var;
}

/// Exponential recency-weighted moving average of per-variable
/// participation in learned conflicts.
pub(crate) struct Erma {
    alpha: f64,
    alpha_dec: f64,
    alpha_lb: f64,
    learned_count: u64,
    q: VarVec<f64>,
    last_assigned: VarVec<u64>,
    participated: VarVec<u32>,
}

impl Erma {
    const DEFAULT_ALPHA: f64 = 0.4;
    const DEFAULT_ALPHA_DEC: f64 = 1e-6;
    const DEFAULT_ALPHA_LB: f64 = 0.06;

    pub fn new() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            alpha_dec: Self::DEFAULT_ALPHA_DEC,
            alpha_lb: Self::DEFAULT_ALPHA_LB,
            learned_count: 0,
            q: VarVec::new(),
            last_assigned: VarVec::new(),
            participated: VarVec::new(),
        }
    }

    pub fn expand(&mut self, v: Var) {
        self.q.expand(v, 0.0);
        self.last_assigned.expand(v, 0);
        self.participated.expand(v, 0);
    }
}

impl Default for Erma {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchingHeuristic for Erma {
    fn on_assign(&mut self, var: Var) {
        self.last_assigned[var] = self.learned_count;
        self.participated[var] = 0;
    }

    fn on_unassign(&mut self, vars: &[Var]) {
        for &var in vars {
            let interval = self.learned_count.saturating_sub(self.last_assigned[var]);
            if interval > 0 {
                let r = self.participated[var] as f64 / interval as f64;
                self.q[var] = (1.0 - self.alpha) * self.q[var] + self.alpha * r;
            }
        }
    }

    fn on_learned(&mut self, learned_vars: &[Var], conflict_vars: &[Var]) {
        self.learned_count += 1;
        let participants: HashSet<Var> = learned_vars.iter().chain(conflict_vars).copied().collect();
        for var in participants {
            self.participated[var] += 1;
        }
        self.alpha = (self.alpha - self.alpha_dec).max(self.alpha_lb);
    }

    fn pick(&self, free: &[Var]) -> Var {
        let mut best = free[0];
        let mut best_q = self.q[best];
        for &var in &free[1..] {
            let q = self.q[var];
            if q > best_q {
                best = var;
                best_q = q;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(i: i32) -> Var {
        Var::new(i)
    }

    #[test]
    fn defaults_to_zero_and_picks_first_on_tie() {
        let mut erma = Erma::new();
        erma.expand(var(3));
        assert_eq!(erma.pick(&[var(1), var(2), var(3)]), var(1));
    }

    #[test]
    fn participation_raises_q_after_unassign() {
        let mut erma = Erma::new();
        erma.expand(var(2));

        erma.on_assign(var(1));
        erma.on_learned(&[var(1)], &[]);
        erma.on_unassign(&[var(1)]);

        assert!(erma.q[var(1)] > erma.q[var(2)]);
        assert_eq!(erma.pick(&[var(1), var(2)]), var(1));
    }

    #[test]
    fn alpha_decays_towards_lower_bound() {
        let mut erma = Erma::new();
        for _ in 0..10 {
            erma.on_learned(&[], &[]);
        }
        assert!(erma.alpha < Erma::DEFAULT_ALPHA);
        assert!(erma.alpha >= Erma::DEFAULT_ALPHA_LB);
    }
}
