//! First-UIP conflict analysis.
//!
//! The BFS-with-sentinel algorithm (two pointers into a level-count
//! table, a `None` sentinel marking the end of a round, bail out once a
//! round changes nothing) is grounded on `original_source/src/dpll.py`'s
//! `uip_fast`.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::assignment::Level;
use crate::clause::{ClauseFlags, ClauseId};
use crate::data::Lit;
use crate::watch::Watch;
use crate::Solver;

impl Solver {
    /// Resolve `conflict` back to its first UIP at the current decision
    /// level `dl`, learn the resulting clause, and return the backjump
    /// level, the asserting literal, and the learned clause's handle.
    pub(crate) fn analyze(&mut self, conflict: ClauseId, dl: Level) -> (Level, Lit, ClauseId) {
        let conflict_lits = self.clause_db.get(conflict).to_vec();

        let mut frontier: VecDeque<Option<Lit>> =
            conflict_lits.iter().copied().map(Some).collect();
        let mut frontier_set: HashSet<Lit> = conflict_lits.iter().copied().collect();
        let mut level_count: HashMap<Level, i32> = HashMap::new();
        for &l in &conflict_lits {
            let lvl = self
                .trail
                .level_of(l)
                .expect("conflict literal must be assigned");
            *level_count.entry(lvl).or_insert(0) += 1;
        }

        frontier.push_back(None);
        let mut changes = 0u32;

        loop {
            if *level_count.get(&dl).unwrap_or(&0) == 1 {
                break;
            }
            let l = frontier
                .pop_front()
                .expect("frontier exhausted before reaching the first UIP");

            let lit = match l {
                None => {
                    if changes == 0 {
                        break;
                    }
                    changes = 0;
                    frontier.push_back(None);
                    continue;
                }
                Some(lit) => lit,
            };

            match self.trail.reason_of(lit) {
                None => frontier.push_back(Some(lit)),
                Some(reason) => {
                    let lvl = self
                        .trail
                        .level_of(lit)
                        .expect("frontier literal must be assigned");
                    *level_count.get_mut(&lvl).expect("level seen before") -= 1;

                    for m in self.clause_db.get(reason).to_vec() {
                        if m != -lit && frontier_set.insert(m) {
                            frontier.push_back(Some(m));
                            changes += 1;
                            let m_lvl = self
                                .trail
                                .level_of(m)
                                .expect("resolved-in literal must be assigned");
                            *level_count.entry(m_lvl).or_insert(0) += 1;
                        }
                    }
                }
            }
        }

        let learned: Vec<Lit> = frontier.into_iter().flatten().collect();
        let asserting = *learned
            .iter()
            .find(|&&l| self.trail.level_of(l) == Some(dl))
            .expect("learned clause must contain a literal at the current level");

        if learned.len() == 1 {
            // Still recorded in the arena (rather than kept as a bare
            // local value) so it has a stable handle to serve as the
            // reason of the asserted literal; it never needs watches.
            let id = self.clause_db.insert(&learned, ClauseFlags::LEARNED);
            return (dl - 1, asserting, id);
        }

        let mut learned = learned;
        let i = learned
            .iter()
            .position(|&l| l == asserting)
            .expect("asserting literal is in the learned clause");
        learned.swap(0, i);

        let beta = learned[1..]
            .iter()
            .map(|&l| self.trail.level_of(l).expect("assigned"))
            .max()
            .unwrap_or(0)
            .max(0);

        let id = self.clause_db.insert(&learned, ClauseFlags::LEARNED);
        self.watches[learned[0]].push(Watch { clause: id });
        self.watches[learned[1]].push(Watch { clause: id });

        (beta, asserting, id)
    }
}
