//! End-to-end DIMACS scenarios and boundary cases.

use cnf_solver::dimacs::Dimacs;
use cnf_solver::{Model, SolveResult, Solver, Var};

fn solve(src: &str) -> SolveResult {
    let dimacs = Dimacs::parse(src).expect("valid DIMACS fixture");
    let mut solver = Solver::new(0);
    for clause in &dimacs.clauses {
        solver.add_clause(clause);
    }
    solver.solve()
}

fn expect_sat(result: SolveResult) -> Model {
    match result {
        SolveResult::Sat(model) => model,
        SolveResult::Unsat => panic!("expected sat, got unsat"),
    }
}

fn expect_unsat(result: SolveResult) {
    assert!(
        matches!(result, SolveResult::Unsat),
        "expected unsat, got sat"
    );
}

/// Every non-trivial clause must have a true literal under `model`.
fn assert_models(clauses: &[Vec<i32>], model: &Model) {
    for clause in clauses {
        if clause.is_empty() {
            continue;
        }
        let satisfied = clause.iter().any(|&lit| {
            let var = Var::new(lit.abs());
            model.value(var) == (lit > 0)
        });
        assert!(satisfied, "clause {clause:?} not satisfied by model");
    }
}

// Scenario A: a single positive unit clause.
#[test]
fn scenario_a_single_unit_clause() {
    let model = expect_sat(solve("p cnf 1 1\n1 0\n"));
    assert!(model.value(Var::new(1)));
}

// Scenario B: a variable and its negation as two unit clauses.
#[test]
fn scenario_b_contradictory_units() {
    expect_unsat(solve("p cnf 1 2\n1 0\n-1 0\n"));
}

// Scenario C: satisfiable with any model where x2 is true.
#[test]
fn scenario_c_satisfiable_requires_x2() {
    let model = expect_sat(solve("p cnf 3 2\n1 2 0\n-1 2 0\n"));
    assert!(model.value(Var::new(2)));
}

// Scenario D: forced entirely by propagation, no decisions needed.
#[test]
fn scenario_d_propagation_only() {
    let model = expect_sat(solve("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n"));
    assert!(model.value(Var::new(1)));
    assert!(model.value(Var::new(2)));
    assert!(model.value(Var::new(3)));
}

// Scenario E: every combination of x1, x2 polarities is forbidden.
#[test]
fn scenario_e_all_polarities_forbidden() {
    expect_unsat(solve("p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n"));
}

// Scenario F: pigeonhole principle, 3 pigeons into 2 holes.
#[test]
fn scenario_f_pigeonhole_php_3_2() {
    let src = "p cnf 6 9\n\
               1 2 0\n\
               3 4 0\n\
               5 6 0\n\
               -1 -3 0\n\
               -1 -5 0\n\
               -3 -5 0\n\
               -2 -4 0\n\
               -2 -6 0\n\
               -4 -6 0\n";
    expect_unsat(solve(src));
}

#[test]
fn trivial_clause_is_ignored() {
    // `1 -1 2 0` is trivially true and contributes no constraint;
    // `-2 0` alone pins x2 false, which is still satisfiable.
    let model = expect_sat(solve("p cnf 2 2\n1 -1 2 0\n-2 0\n"));
    assert!(!model.value(Var::new(2)));
}

#[test]
fn empty_clause_is_immediately_unsat() {
    expect_unsat(solve("p cnf 1 1\n0\n"));
}

#[test]
fn zero_clause_formula_is_sat() {
    expect_sat(solve("p cnf 3 0\n"));
}

#[test]
fn singleton_only_formula_is_decided_by_propagation() {
    let model = expect_sat(solve("p cnf 3 3\n1 0\n-2 0\n3 0\n"));
    assert!(model.value(Var::new(1)));
    assert!(!model.value(Var::new(2)));
    assert!(model.value(Var::new(3)));
}

#[test]
fn soundness_on_pigeonhole_satisfiable_relaxation() {
    // Drop one hole-exclusion clause from PHP(3,2) so it becomes
    // satisfiable, and check the returned model actually satisfies
    // every remaining input clause.
    let src = "p cnf 6 8\n\
               1 2 0\n\
               3 4 0\n\
               5 6 0\n\
               -1 -3 0\n\
               -1 -5 0\n\
               -3 -5 0\n\
               -2 -4 0\n\
               -2 -6 0\n";
    let dimacs = Dimacs::parse(src).unwrap();
    let model = expect_sat(solve(src));
    assert_models(&dimacs.clauses, &model);
}

#[test]
fn same_seed_same_result() {
    let src = "p cnf 6 9\n\
               1 2 0\n\
               3 4 0\n\
               5 6 0\n\
               -1 -3 0\n\
               -1 -5 0\n\
               -3 -5 0\n\
               -2 -4 0\n\
               -2 -6 0\n\
               -4 -6 0\n";
    for _ in 0..5 {
        expect_unsat(solve(src));
    }
}
