use std::path::Path;

use dimacs::{Instance, Sign};

use crate::error::Error;
use crate::formula::FormulaState;
use crate::solver::Verdict;

/// Parses a `.cnf` file into a `FormulaState`. Parsing itself is
/// delegated to the `dimacs` crate rather than hand-rolled: the DIMACS
/// grammar is a solved problem and not part of the core's job. This
/// function's own responsibility is narrow — turn the parser's
/// `Instance` into the arena-indexed representation of §3 and reject
/// what the core cannot act on.
pub fn parse_file(path: impl AsRef<Path>) -> Result<FormulaState, Error> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let instance = dimacs::parse_dimacs(&contents).map_err(|e| Error::DimacsParse {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })?;

    let (num_vars, clauses) = match instance {
        Instance::Cnf { num_vars, clauses } => (num_vars as usize, clauses),
        Instance::Sat { .. } => return Err(Error::NotCnf { path: path.to_path_buf() }),
    };

    let mut formula = FormulaState::new(num_vars);
    for clause in clauses.iter() {
        let literals = clause
            .lits()
            .iter()
            .map(|lit| {
                let var = lit.var().to_u64() as i32;
                if lit.sign() == Sign::Pos {
                    var
                } else {
                    -var
                }
            })
            .collect();
        formula.add_clause(literals)?;
    }

    Ok(formula)
}

/// Renders a verdict plus (on SAT) the variable assignment as DIMACS
/// result text, per §6: `SAT`/`UNSAT` on the first line, followed on
/// SAT by the signed-literal assignment terminated by ` 0`. TIMEOUT
/// produces no result text — callers report it separately.
pub fn format_result(verdict: Verdict, formula: &FormulaState) -> Option<String> {
    match verdict {
        Verdict::Sat => {
            let assignment = formula
                .assignment_literals()
                .iter()
                .map(|lit| lit.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            Some(format!("SAT\n{} 0\n", assignment))
        }
        Verdict::Unsat => Some("UNSAT\n".to_string()),
        Verdict::Timeout => None,
    }
}
