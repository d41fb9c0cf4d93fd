use crate::formula::{FormulaState, Var};

impl FormulaState {
    /// Dynamic Largest Individual Sum: scans the currently-free
    /// variables (via the free-variable bitset, so assigned variables
    /// cost nothing to skip) and returns the (variable, polarity) pair
    /// maximising `max(act_pos, act_neg)`. Ties go to the first
    /// variable encountered in index order; within a variable, ties
    /// between `act_pos` and `act_neg` go to `true`. Returns `None` once
    /// every variable is assigned.
    pub fn select(&self) -> Option<(Var, bool)> {
        let mut best: Option<(Var, bool, usize)> = None;

        for var in self.free_vars.ones() {
            let v = &self.variables[var];
            let (score, polarity) = if v.act_pos >= v.act_neg {
                (v.act_pos, true)
            } else {
                (v.act_neg, false)
            };

            let beats_current = match best {
                Some((_, _, best_score)) => score > best_score,
                None => true,
            };
            if beats_current {
                best = Some((var, polarity, score));
            }
        }

        best.map(|(var, polarity, _)| (var, polarity))
    }
}
