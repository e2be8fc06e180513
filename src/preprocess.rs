//! Two-polarity failed-literal probing, grounded on
//! `original_source/src/dpll.py`'s `preprocess` method.

use tracing::debug;

use crate::assignment::{LEVEL_PROBE_FORCED, LEVEL_PROBE_TENTATIVE};
use crate::clause::ClauseFlags;
use crate::data::Lit;
use crate::heuristic::BranchingHeuristic;
use crate::propagate::PropagationResult;
use crate::Solver;

impl Solver {
    /// Run the initial level-0 propagation pass, then probe both
    /// polarities of every free variable to a two-pass fixpoint.
    ///
    /// Returns `false` if the formula is found unsatisfiable.
    pub(crate) fn preprocess(&mut self) -> bool {
        if let PropagationResult::Contradiction(_) = self.propagate() {
            debug!("top-level conflict during initial propagation");
            return false;
        }

        let vars = self.vars.clone();
        let mut fixpoint = 2u32;

        while fixpoint > 0 {
            for &x in &vars {
                let pos = Lit::from_var(x, true);
                let neg = -pos;

                if self.trail.is_lit_assigned(pos) {
                    continue;
                }

                debug!("probe {pos}");
                self.push_assertion(pos, None, LEVEL_PROBE_TENTATIVE);
                let pos_conflict = self.propagate();
                let unassigned = self.trail.undo(LEVEL_PROBE_FORCED);
                self.heuristic.on_unassign(&unassigned);

                if matches!(pos_conflict, PropagationResult::Contradiction(_)) {
                    debug!("{pos} is a failed literal, asserting {neg}");
                    fixpoint = 2;
                    if !self.force_probed_literal(neg) {
                        return false;
                    }
                    continue;
                }

                debug!("probe {neg}");
                self.push_assertion(neg, None, LEVEL_PROBE_TENTATIVE);
                let neg_conflict = self.propagate();
                let unassigned = self.trail.undo(LEVEL_PROBE_FORCED);
                self.heuristic.on_unassign(&unassigned);

                if matches!(neg_conflict, PropagationResult::Contradiction(_)) {
                    debug!("{neg} is a failed literal, asserting {pos}");
                    fixpoint = 2;
                    if !self.force_probed_literal(pos) {
                        return false;
                    }
                }
            }
            fixpoint -= 1;
        }

        true
    }

    /// Assert `lit` unconditionally at the probe-forced level, backed by
    /// a fresh singleton reason clause. A conflict here means the
    /// opposite polarity's clean propagation didn't prove what it looked
    /// like it proved; treated as UNSAT rather than assumed impossible.
    fn force_probed_literal(&mut self, lit: Lit) -> bool {
        self.stats.preprocessing_forced += 1;
        let reason = self.clause_db.insert(&[lit], ClauseFlags::empty());
        self.push_assertion(lit, Some(reason), LEVEL_PROBE_FORCED);
        !matches!(self.propagate(), PropagationResult::Contradiction(_))
    }
}
