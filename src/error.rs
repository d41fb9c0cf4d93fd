use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before the core ever sees a formula, plus
/// the one malformed-input condition the core itself is positioned to
/// detect (an empty clause).
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, #[source] source: io::Error },

    /// The DIMACS parser rejected the file contents.
    #[error("failed to parse '{}' as DIMACS CNF: {message}", path.display())]
    DimacsParse { path: PathBuf, message: String },

    /// The file parsed, but described a SAT-format instance rather than CNF.
    #[error("'{}' is a SAT-format instance, expected CNF", path.display())]
    NotCnf { path: PathBuf },

    /// A clause with zero literals: an unconditional contradiction.
    #[error("clause {clause_index} has no literals and can never be satisfied")]
    EmptyClause { clause_index: usize },

    /// A literal referenced a variable index above the declared count.
    #[error("clause {clause_index} references literal {literal} but only {num_variables} variables were declared")]
    LiteralOutOfRange { clause_index: usize, literal: i32, num_variables: usize },

    /// The configuration file exists but could not be parsed, or its
    /// fields did not have the expected shape.
    #[error("failed to parse config '{}': {source}", path.display())]
    Config { path: PathBuf, #[source] source: serde_json::Error },
}
