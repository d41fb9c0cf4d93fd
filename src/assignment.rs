use crate::formula::{lit_sign, lit_var, FormulaState, Literal, Value, Var};

impl FormulaState {
    /// Assigns `var` to `value`, updating clause activity counters,
    /// satisfaction markers, and per-variable active occurrence counts,
    /// and enqueuing any literal this assignment forces. Returns `false`
    /// iff some clause's `active_count` reached zero (a conflict). All
    /// updates are applied regardless of conflict, so that the matching
    /// `unassign` inverts exactly what was done here.
    pub fn assign(&mut self, var: Var, value: bool, is_forced: bool) -> bool {
        self.variables[var].value = if value { Value::True } else { Value::False };
        self.variables[var].is_forced = is_forced;
        self.assignment_stack.push(var);
        self.free_vars.set(var, false);

        let (falsifying, satisfying) = if value {
            (self.variables[var].neg_occ.clone(), self.variables[var].pos_occ.clone())
        } else {
            (self.variables[var].pos_occ.clone(), self.variables[var].neg_occ.clone())
        };

        let mut ok = true;
        for cid in falsifying {
            if self.clauses[cid].satisfied_by.is_some() {
                continue;
            }
            self.clauses[cid].active_count -= 1;
            match self.clauses[cid].active_count {
                0 => ok = false,
                1 => {
                    if let Some(lit) = self.find_unassigned_literal(cid) {
                        self.force_queue.push_back(lit);
                    }
                }
                _ => {}
            }
        }

        for cid in satisfying {
            if self.clauses[cid].satisfied_by.is_some() {
                continue;
            }
            self.clauses[cid].satisfied_by = Some(var);

            for i in 0..self.clauses[cid].literals.len() {
                let lit = self.clauses[cid].literals[i];
                let lv = lit_var(lit);
                if self.variables[lv].value != Value::Free {
                    continue;
                }

                if lit_sign(lit) {
                    self.variables[lv].act_pos -= 1;
                    if self.variables[lv].act_pos == 0 && self.variables[lv].act_neg > 0 {
                        self.force_queue.push_back(-(lv as Literal));
                    }
                } else {
                    self.variables[lv].act_neg -= 1;
                    if self.variables[lv].act_neg == 0 && self.variables[lv].act_pos > 0 {
                        self.force_queue.push_back(lv as Literal);
                    }
                }
            }
        }

        ok
    }

    /// The exact inverse of `assign`, keyed off the variable's current
    /// value. Leaves `is_forced` untouched; the Search Driver decides how
    /// to interpret it.
    pub fn unassign(&mut self, var: Var) {
        let was_true = self.variables[var].value == Value::True;

        let (satisfying, falsifying) = if was_true {
            (self.variables[var].pos_occ.clone(), self.variables[var].neg_occ.clone())
        } else {
            (self.variables[var].neg_occ.clone(), self.variables[var].pos_occ.clone())
        };

        for cid in satisfying {
            if self.clauses[cid].satisfied_by != Some(var) {
                continue;
            }
            self.clauses[cid].satisfied_by = None;

            for i in 0..self.clauses[cid].literals.len() {
                let lit = self.clauses[cid].literals[i];
                let lv = lit_var(lit);
                if self.variables[lv].value != Value::Free {
                    continue;
                }
                if lit_sign(lit) {
                    self.variables[lv].act_pos += 1;
                } else {
                    self.variables[lv].act_neg += 1;
                }
            }
        }

        for cid in falsifying {
            if self.clauses[cid].satisfied_by.is_none() {
                self.clauses[cid].active_count += 1;
            }
        }

        self.variables[var].value = Value::Free;
        self.free_vars.set(var, true);
    }

    /// Scans a clause for a literal whose variable is still Free. Used
    /// when a clause's active count drops to one. Returns `None` in the
    /// pathological case of a clause referencing one variable under
    /// several literals, where no free variable remains to name — the
    /// conflict, if any, still surfaces via `active_count` reaching zero.
    fn find_unassigned_literal(&self, clause_index: usize) -> Option<Literal> {
        self.clauses[clause_index]
            .literals
            .iter()
            .copied()
            .find(|&lit| self.variables[lit_var(lit)].value == Value::Free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::FormulaState;

    fn snapshot(f: &FormulaState) -> (Vec<usize>, Vec<Option<Var>>, Vec<(usize, usize)>) {
        let active = f.clauses.iter().map(|c| c.active_count).collect();
        let satisfied = f.clauses.iter().map(|c| c.satisfied_by).collect();
        let counters = f.variables.iter().skip(1).map(|v| (v.act_pos, v.act_neg)).collect();
        (active, satisfied, counters)
    }

    #[test]
    fn assign_then_unassign_restores_state_exactly() {
        let mut f = FormulaState::new(3);
        f.add_clause(vec![1, 2]).unwrap();
        f.add_clause(vec![-1, 3]).unwrap();
        f.add_clause(vec![-2, -3]).unwrap();

        let before = snapshot(&f);
        assert!(f.assign(1, true, false));
        f.unassign(1);
        let after = snapshot(&f);

        assert_eq!(before, after);
    }

    #[test]
    fn unit_propagation_chain_assigns_everything_true() {
        let mut f = FormulaState::new(3);
        f.add_clause(vec![1]).unwrap();
        f.add_clause(vec![-1, 2]).unwrap();
        f.add_clause(vec![-2, 3]).unwrap();

        assert!(f.propagate());
        assert_eq!(f.variables[1].value, Value::True);
        assert_eq!(f.variables[2].value, Value::True);
        assert_eq!(f.variables[3].value, Value::True);
    }

    #[test]
    fn conflicting_units_detected() {
        let mut f = FormulaState::new(1);
        f.add_clause(vec![1]).unwrap();
        f.add_clause(vec![-1]).unwrap();

        assert!(!f.propagate());
    }

    #[test]
    fn asserting_a_variable_already_satisfied_by_every_clause_is_harmless() {
        let mut f = FormulaState::new(3);
        f.add_clause(vec![1, 2]).unwrap();
        f.add_clause(vec![1, 3]).unwrap();
        f.add_clause(vec![2, 3]).unwrap();

        assert!(f.assign(2, true, false));
        assert!(f.propagate());
        assert!(f.assign(3, true, false));
        assert!(f.propagate());
        assert!(f.assign(1, true, false));
    }
}
