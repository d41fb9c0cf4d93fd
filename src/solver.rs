use std::time::{Duration, Instant};

use crate::formula::{FormulaState, Value, Var};

/// The three-way outcome of a solve call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
    Timeout,
}

/// Runs the Search Driver to completion or until `timeout_seconds`
/// elapses: alternates decision, propagation, and chronological
/// backtracking. On `Verdict::Sat`, `formula.variables` carries the
/// satisfying assignment; on `Unsat` or `Timeout` the assignment is
/// undefined (the stack has been unwound, or the search was cut off
/// mid-branch).
pub fn solve(formula: &mut FormulaState, timeout_seconds: Option<f64>) -> (Verdict, f64) {
    let start = Instant::now();
    let deadline = timeout_seconds.map(Duration::from_secs_f64);
    let elapsed = |start: Instant| start.elapsed().as_secs_f64();

    // Init: digest syntactic units and any pure literals discovered at
    // parse time.
    if !formula.propagate() {
        return (Verdict::Unsat, elapsed(start));
    }

    loop {
        if let Some(deadline) = deadline {
            if start.elapsed() >= deadline {
                return (Verdict::Timeout, elapsed(start));
            }
        }

        let (var, value) = match formula.select() {
            Some(decision) => decision,
            None => return (Verdict::Sat, elapsed(start)),
        };

        let ok = formula.assign(var, value, false) && formula.propagate();
        if !ok && !backtrack(formula) {
            return (Verdict::Unsat, elapsed(start));
        }
    }
}

/// Pops variables from the assignment stack, undoing each. Forced
/// entries (unit/pure propagations, or a previously-flipped decision)
/// are simply unwound. The first flippable (free-decision) entry has
/// its polarity flipped and is re-asserted as forced, since a decision
/// gets exactly two tries; the pending force queue — which belonged to
/// the branch being abandoned — is cleared first so no stale
/// implication is replayed against the flipped state. Returns `false`
/// once the stack empties without a flip succeeding: the formula is
/// unsatisfiable.
fn backtrack(formula: &mut FormulaState) -> bool {
    while let Some(var) = formula.assignment_stack.pop() {
        let was_forced = formula.variables[var].is_forced;
        let was_true = formula.variables[var].value == Value::True;
        formula.unassign(var);

        if was_forced {
            continue;
        }

        formula.force_queue.clear();
        if formula.assign(var, !was_true, true) && formula.propagate() {
            return true;
        }
    }
    false
}

/// Applies a satisfying assignment to every clause, for soundness
/// checks: `true` iff every clause has at least one true literal.
pub fn check_assignment(formula: &FormulaState, assignment: &[Option<bool>]) -> bool {
    formula.clauses.iter().all(|clause| {
        clause.literals.iter().any(|&lit| {
            let var: Var = lit.unsigned_abs() as Var;
            assignment[var] == Some(lit > 0)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::FormulaState;

    fn formula_from(clauses: &[&[i32]], num_variables: usize) -> FormulaState {
        let mut f = FormulaState::new(num_variables);
        for &clause in clauses {
            f.add_clause(clause.to_vec()).unwrap();
        }
        f
    }

    #[test]
    fn s1_simple_sat() {
        let mut f = formula_from(&[&[1, 2], &[-1, 2], &[1, -2]], 2);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Sat);
        assert_eq!(f.variables[1].value, Value::True);
        assert_eq!(f.variables[2].value, Value::True);
    }

    #[test]
    fn s2_unit_conflict_unsat() {
        let mut f = formula_from(&[&[1], &[-1]], 1);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Unsat);
    }

    #[test]
    fn s3_unsat_requires_backtracking() {
        let mut f = formula_from(&[&[1, 2], &[-1, -2], &[1, -2], &[-1, 2]], 2);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Unsat);
    }

    #[test]
    fn s4_sat_any_assignment() {
        let mut f = formula_from(&[&[1, -2], &[2, -3], &[3, -1]], 3);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Sat);
        let a = f.variables[1].value;
        assert_eq!(f.variables[2].value, a);
        assert_eq!(f.variables[3].value, a);
    }

    #[test]
    fn s5_pure_literal_forced_true() {
        let mut f = formula_from(&[&[1, 2], &[1, 3], &[2, 3]], 3);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Sat);
        assert_eq!(f.variables[1].value, Value::True);
    }

    #[test]
    fn s6_unit_cascade_zero_decisions() {
        let mut f = formula_from(&[&[1], &[-1, 2], &[-2, 3]], 3);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Sat);
        assert_eq!(f.variables[1].value, Value::True);
        assert_eq!(f.variables[2].value, Value::True);
        assert_eq!(f.variables[3].value, Value::True);
    }

    #[test]
    fn timeout_is_reported_when_deadline_is_already_past() {
        let mut f = formula_from(&[&[1, 2]], 2);
        let (verdict, elapsed) = solve(&mut f, Some(0.0));
        assert_eq!(verdict, Verdict::Timeout);
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn sat_solution_satisfies_every_clause() {
        let mut f = formula_from(&[&[1, -2], &[2, -3], &[3, -1], &[1, 2, 3]], 3);
        let (verdict, _) = solve(&mut f, None);
        assert_eq!(verdict, Verdict::Sat);

        let assignment: Vec<Option<bool>> = f
            .variables
            .iter()
            .map(|v| match v.value {
                Value::True => Some(true),
                Value::False => Some(false),
                Value::Free => None,
            })
            .collect();
        assert!(check_assignment(&f, &assignment));
    }
}
