//! A CDCL SAT solver for DIMACS CNF formulas.
//!
//! Two-watched-literal propagation, first-UIP conflict analysis, ERMA
//! branching, reluctant-doubling restarts, and two-polarity
//! failed-literal preprocessing, driven by [`Solver::solve`].

mod analyze;
mod assignment;
mod clause;
mod data;
pub mod dimacs;
pub mod error;
mod heuristic;
mod preprocess;
mod propagate;
mod restart;
mod trail;
mod util;
mod watch;

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use assignment::Level;
use clause::{ClauseDb, ClauseFlags};
pub use data::{Lit, Var};
use data::{LitVec, VarVec};
use heuristic::{BranchingHeuristic, Erma};
use propagate::PropagationResult;
use restart::RestartPolicy;
use trail::Trail;
use watch::Watch;

/// Search statistics, reported to callers via `--profile`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub decisions: u64,
    pub conflicts: u64,
    pub learned_clauses: u64,
    pub restarts: u64,
    pub preprocessing_forced: u64,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "decisions: {}", self.decisions)?;
        writeln!(f, "conflicts: {}", self.conflicts)?;
        writeln!(f, "learned clauses: {}", self.learned_clauses)?;
        writeln!(f, "restarts: {}", self.restarts)?;
        write!(f, "preprocessing forced literals: {}", self.preprocessing_forced)
    }
}

/// A satisfying assignment covering every variable seen by the solver.
#[derive(Debug, Clone)]
pub struct Model(VarVec<bool>);

impl Model {
    pub fn value(&self, var: Var) -> bool {
        self.0[var]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        self.0.iter_with_var().map(|(v, &b)| (v, b))
    }
}

#[derive(Debug, Clone)]
pub enum SolveResult {
    Sat(Model),
    Unsat,
}

pub struct Solver {
    clause_db: ClauseDb,
    watches: LitVec<Vec<Watch>>,
    trail: Trail,
    pending: Vec<propagate::PendingAssertion>,
    heuristic: Erma,
    restart_policy: RestartPolicy,
    rng: SmallRng,
    /// Variables appearing in some non-trivial, non-singleton clause, in
    /// first-seen order; these are exactly the variables branching
    /// considers free.
    vars: Vec<Var>,
    vars_seen: HashSet<Var>,
    dl: Level,
    trivially_unsat: bool,
    stats: Stats,
}

impl Solver {
    pub fn new(seed: u64) -> Self {
        Self {
            clause_db: ClauseDb::new(),
            watches: LitVec::new(),
            trail: Trail::new(),
            pending: Vec::new(),
            heuristic: Erma::new(),
            restart_policy: RestartPolicy::default(),
            rng: SmallRng::seed_from_u64(seed),
            vars: Vec::new(),
            vars_seen: HashSet::new(),
            dl: assignment::LEVEL_ROOT,
            trivially_unsat: false,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Add a clause given as signed DIMACS literals (no trailing `0`).
    pub fn add_clause(&mut self, raw: &[i32]) {
        if raw.is_empty() {
            self.trivially_unsat = true;
            return;
        }

        // A variable appears at most once in a clause; repeated literals
        // are redundant disjuncts and collapsed here so the watch list
        // never registers the same clause twice under one key.
        let mut seen = HashSet::new();
        let lits: Vec<Lit> = raw
            .iter()
            .map(|&n| Lit::new(n))
            .filter(|&l| seen.insert(l))
            .collect();
        for &lit in &lits {
            self.expand_for(lit.var());
        }

        if clause::is_trivial(&lits) {
            debug!("ignoring trivial clause {lits:?}");
            return;
        }

        if lits.len() == 1 {
            // Tagged at the probe-forced level, not LEVEL_ROOT: failed-literal
            // probing undoes back to LEVEL_PROBE_FORCED between probes, and a
            // singleton-derived assignment must survive that undo exactly
            // like a literal forced by probing itself, or the constraint is
            // silently forgotten the first time probing runs.
            let id = self.clause_db.insert(&lits, ClauseFlags::empty());
            self.push_assertion(lits[0], Some(id), assignment::LEVEL_PROBE_FORCED);
            return;
        }

        for &lit in &lits {
            let var = lit.var();
            if self.vars_seen.insert(var) {
                self.vars.push(var);
            }
        }

        let id = self.clause_db.insert(&lits, ClauseFlags::empty());
        self.watches[lits[0]].push(Watch { clause: id });
        self.watches[lits[1]].push(Watch { clause: id });
    }

    fn expand_for(&mut self, var: Var) {
        self.trail.expand(var);
        self.heuristic.expand(var);
        self.watches.expand(Lit::from_var(var, false), Vec::new());
    }

    fn free_vars(&self) -> Vec<Var> {
        self.vars
            .iter()
            .copied()
            .filter(|&v| self.trail.is_lit_unassigned(Lit::from_var(v, true)))
            .collect()
    }

    fn branch(&mut self, free: &[Var]) -> Lit {
        let var = self.heuristic.pick(free);
        let is_pos = self.rng.gen_bool(0.5);
        Lit::from_var(var, is_pos)
    }

    /// Run the full search: preprocessing, then decide/propagate/analyze
    /// until every variable is assigned or a top-level conflict is
    /// reached.
    pub fn solve(&mut self) -> SolveResult {
        if self.trivially_unsat {
            info!("empty clause in input, unsat");
            return SolveResult::Unsat;
        }

        if !self.preprocess() {
            return SolveResult::Unsat;
        }

        self.dl = 1;
        loop {
            let free = self.free_vars();
            if free.is_empty() {
                break;
            }

            let lit = self.branch(&free);
            self.stats.decisions += 1;
            info!("decide {lit} @ {}", self.dl);
            self.push_assertion(lit, None, self.dl);

            let mut conflict = self.propagate();
            let mut restart_due = false;
            while let PropagationResult::Contradiction(cls) = conflict {
                self.stats.conflicts += 1;
                restart_due |= self.restart_policy.on_conflict();
                let (beta, asserting, learned_id) = self.analyze(cls, self.dl);

                if beta < 0 {
                    info!("top-level conflict, unsat");
                    return SolveResult::Unsat;
                }

                self.stats.learned_clauses += 1;
                let learned_vars: Vec<Var> = self
                    .clause_db
                    .get(learned_id)
                    .iter()
                    .map(|l| l.var())
                    .collect();
                let conflict_vars: Vec<Var> =
                    self.clause_db.get(cls).iter().map(|l| l.var()).collect();
                self.heuristic.on_learned(&learned_vars, &conflict_vars);

                let unassigned = self.trail.undo(beta);
                self.heuristic.on_unassign(&unassigned);
                self.dl = beta;

                debug!("backjump to {beta}, assert {asserting}");
                self.push_assertion(asserting, Some(learned_id), beta);
                conflict = self.propagate();
            }

            if restart_due {
                self.do_restart();
            } else {
                self.dl += 1;
            }
        }

        debug_assert!(
            self.clause_db
                .iter()
                .all(|(_, lits)| self.trail.is_clause_satisfied(lits)),
            "every clause must be satisfied by the final model"
        );

        SolveResult::Sat(self.extract_model())
    }

    fn do_restart(&mut self) {
        self.stats.restarts += 1;
        let unassigned = self.trail.undo(assignment::LEVEL_ROOT);
        self.heuristic.on_unassign(&unassigned);
        self.pending.clear();
        self.dl = 1;
        self.restart_policy.restart();
    }

    /// Every variable the solver has ever expanded storage for, covering
    /// singleton-only variables that never enter [`Solver::vars`].
    fn extract_model(&self) -> Model {
        let mut values: VarVec<bool> = VarVec::new();
        for i in 1..=self.trail.total_vars() {
            let var = Var::new(i as i32);
            values.expand(var, false);
            values[var] = self.trail.get(Lit::from_var(var, true)).unwrap_or(false);
        }
        Model(values)
    }
}
