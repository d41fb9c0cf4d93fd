use std::path::{Path, PathBuf};
use std::process;

use dpll_sat::config::{default_config_path, Config};
use dpll_sat::{cnf, solver, Error, Verdict};

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: dpll-sat <file.cnf | directory>");
        process::exit(1);
    });

    let config = Config::load(default_config_path()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let path = PathBuf::from(path);
    let is_directory = path.is_dir() || (config.directory_mode && !path.is_file());

    if is_directory {
        run_directory(&path, &config);
    } else {
        run_single(&path, &config);
    }
}

/// Parses and solves one `.cnf` file, printing the DIMACS result to
/// stdout. A timeout notice goes to stderr instead, per the external
/// interface contract: stdout carries the result text only, and
/// TIMEOUT has no result text. Exit code 0 regardless of verdict; a
/// non-zero exit means the input could not even be solved.
fn run_single(path: &Path, config: &Config) {
    let mut formula = cnf::parse_file(path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let (verdict, elapsed) = solver::solve(&mut formula, config.timeout_seconds);
    match cnf::format_result(verdict, &formula) {
        Some(text) => print!("{text}"),
        None => eprintln!("TIMEOUT after {elapsed:.3}s"),
    }
}

/// Iterates a directory's `.cnf` files in sorted order, solving each
/// against the shared deadline and printing one progress line plus a
/// final tally. A single unreadable or malformed instance is reported
/// inline and does not abort the run; the directory listing itself
/// failing to read is the only condition that exits non-zero.
fn run_directory(path: &Path, config: &Config) {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
        .unwrap_or_else(|source| {
            eprintln!(
                "Error: {}",
                Error::Io { path: path.to_path_buf(), source }
            );
            process::exit(1);
        })
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "cnf"))
        .collect();
    entries.sort();

    let mut sat = 0;
    let mut unsat = 0;
    let mut timeout = 0;

    for instance in &entries {
        let name = instance.display();

        let mut formula = match cnf::parse_file(instance) {
            Ok(formula) => formula,
            Err(e) => {
                if config.progress {
                    println!("{name}: error ({e})");
                }
                continue;
            }
        };

        let (verdict, elapsed) = solver::solve(&mut formula, config.timeout_seconds);
        match verdict {
            Verdict::Sat => sat += 1,
            Verdict::Unsat => unsat += 1,
            Verdict::Timeout => timeout += 1,
        }

        if config.progress {
            println!("{name}: {verdict:?} ({:.3}s)", elapsed);
        }
    }

    println!(
        "{} instances: {} sat, {} unsat, {} timeout",
        entries.len(),
        sat,
        unsat,
        timeout
    );
}
