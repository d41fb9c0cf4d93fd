use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Ambient settings for a batch solve run. Distinct from the formula
/// itself: `FormulaState` and `Verdict` never depend on this struct,
/// only the CLI driver does.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wall-clock budget per instance, in seconds. `None` means no
    /// deadline is enforced.
    pub timeout_seconds: Option<f64>,
    /// Whether the CLI should treat its path argument as a directory
    /// of instances rather than a single file. The CLI itself detects
    /// this from the path when it can, falling back to this flag only
    /// when the path's kind can't be determined ahead of time.
    pub directory_mode: bool,
    /// Whether to print one line per instance in directory mode.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout_seconds: None,
            directory_mode: false,
            progress: true,
        }
    }
}

impl Config {
    /// Loads settings from a JSON file at `path`, falling back to
    /// `Config::default()` when the file doesn't exist: configuration
    /// is optional ergonomics, not an input the solver cannot run
    /// without. A file that exists but fails to parse, or whose
    /// fields are the wrong shape, is reported as `Error::Config`
    /// rather than silently ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, Error> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_reader(file).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The default location the CLI looks for a config file next to the
/// binary's invocation, when none is given explicitly.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.json")
}
