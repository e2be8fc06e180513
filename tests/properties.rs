//! Property-based checks over small random CNF instances: soundness of
//! returned models, and determinism given a fixed seed. Completeness is
//! checked only on the literal fixtures in `cnf_instances.rs`: a
//! brute-force reference oracle for arbitrary CNF is out of this
//! suite's runtime budget.

use proptest::prelude::*;

use cnf_solver::dimacs::Dimacs;
use cnf_solver::{Model, SolveResult, Solver, Var};

const MAX_VARS: i32 = 6;

fn literal() -> impl Strategy<Value = i32> {
    (1..=MAX_VARS).prop_flat_map(|v| prop_oneof![Just(v), Just(-v)])
}

fn clause() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(literal(), 1..=3)
}

fn cnf() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(clause(), 0..=12)
}

fn run(clauses: &[Vec<i32>], seed: u64) -> SolveResult {
    let mut solver = Solver::new(seed);
    for clause in clauses {
        solver.add_clause(clause);
    }
    solver.solve()
}

fn assert_models(clauses: &[Vec<i32>], model: &Model) {
    for clause in clauses {
        let trivial = clause
            .iter()
            .any(|&l| clause.iter().any(|&m| m == -l));
        if trivial {
            continue;
        }
        let satisfied = clause
            .iter()
            .any(|&l| model.value(Var::new(l.abs())) == (l > 0));
        assert!(satisfied, "clause {clause:?} not satisfied by model");
    }
}

proptest! {
    /// A returned SAT model satisfies every non-trivial clause.
    #[test]
    fn soundness(clauses in cnf()) {
        if let SolveResult::Sat(model) = run(&clauses, 1) {
            assert_models(&clauses, &model);
        }
    }

    /// Same input and seed implies the same result, run twice.
    #[test]
    fn deterministic_given_seed(clauses in cnf(), seed in any::<u64>()) {
        let first = run(&clauses, seed);
        let second = run(&clauses, seed);
        match (first, second) {
            (SolveResult::Unsat, SolveResult::Unsat) => {}
            (SolveResult::Sat(a), SolveResult::Sat(b)) => {
                for i in 1..=MAX_VARS {
                    let v = Var::new(i);
                    prop_assert_eq!(a.value(v), b.value(v));
                }
            }
            _ => prop_assert!(false, "same seed produced differing sat/unsat verdicts"),
        }
    }
}

#[test]
fn dimacs_round_trip_matches_direct_ints() {
    let src = "p cnf 3 2\n1 2 0\n-1 -2 3 0\n";
    let dimacs = Dimacs::parse(src).unwrap();

    let via_dimacs = run(&dimacs.clauses, 7);
    let direct = run(&[vec![1, 2], vec![-1, -2, 3]], 7);

    assert!(matches!(via_dimacs, SolveResult::Sat(_)));
    assert!(matches!(direct, SolveResult::Sat(_)));
}
