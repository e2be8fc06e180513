//! Two-watched-literal unit propagation.
//!
//! The watch-swap logic (scan positions `2..` for a substitute, swap it
//! into the watched slot, install a fresh watch) follows the classic
//! two-watched-literal scheme; the outer loop is driven by an explicit
//! pending-assertion stack rather than scanning the trail in place,
//! since the stack must carry a level independent of the current
//! decision level during failed-literal probing.

use crate::assignment::Level;
use crate::clause::ClauseId;
use crate::data::Lit;
use crate::heuristic::BranchingHeuristic;
use crate::watch::Watch;
use crate::Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationResult {
    Contradiction(ClauseId),
    Done,
}

/// A literal awaiting commitment to the trail: `None` reason means a
/// decision, `Some` means an implication by that clause.
pub(crate) type PendingAssertion = (Lit, Option<ClauseId>, Level);

impl Solver {
    /// Queue `lit` to be committed to the model at `level`, with `reason`
    /// absent for a decision.
    pub(crate) fn push_assertion(&mut self, lit: Lit, reason: Option<ClauseId>, level: Level) {
        self.pending.push((lit, reason, level));
    }

    pub(crate) fn propagate(&mut self) -> PropagationResult {
        while let Some((lit, reason, level)) = self.pending.pop() {
            if self.trail.is_lit_assigned(lit) {
                if self.trail.is_lit_unsatisfied(lit) {
                    self.pending.clear();
                    let conflict = reason
                        .expect("falsified pending assertion must carry its conflicting reason");
                    return PropagationResult::Contradiction(conflict);
                }
                continue;
            }

            match reason {
                None => self.trail.assign(lit, level),
                Some(cls) => self.trail.commit(lit, level, cls),
            }
            self.heuristic.on_assign(lit.var());

            self.propagate_watches(lit);
        }

        PropagationResult::Done
    }

    /// Re-examine every clause watching `-lit` now that `lit` is true.
    fn propagate_watches(&mut self, lit: Lit) {
        let neg_lit = -lit;

        let (lit_watch, mut remaining_watches) = self.watches.remaining(neg_lit);
        lit_watch.retain(|watch| {
            let cls_idx = watch.clause;
            let cls = self.clause_db.get_mut(cls_idx);

            let lit_idx = if cls[0] == neg_lit {
                0
            } else {
                debug_assert_eq!(cls[1], neg_lit);
                1
            };

            // Look for a substitute literal among the non-watched positions.
            for candidate_idx in 2..cls.len() {
                let candidate = cls[candidate_idx];
                if !self.trail.is_lit_unsatisfied(candidate) {
                    remaining_watches[candidate].push(Watch { clause: cls_idx });
                    cls.swap(lit_idx, candidate_idx);
                    return false;
                }
            }

            // No substitute: the other watched literal is forced, falsified,
            // or already satisfied by an earlier, unrelated assignment (watches
            // only move on falsification, so a stable-but-true watch is
            // ordinary). Push it unconditionally and let `propagate`'s
            // pop-time check sort out which case this is.
            let other_idx = (lit_idx + 1) & 1;
            let other = cls[other_idx];
            let level = self
                .trail
                .level_of(lit)
                .expect("just-committed literal must have a level");
            self.pending.push((other, Some(cls_idx), level));
            true
        });
    }
}
