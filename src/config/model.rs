// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from `Testwatch.toml`.
///
/// ```toml
/// [runner]
/// command = "go"
/// args = ["test"]
/// verbose_flag = "-v"
/// race_flag = "-race"
/// timeout = "2m"
///
/// [watch]
/// debounce = "100ms"
///
/// [problems]
/// root = "problems"
/// solution_file = "solution.go"
/// test_file = "solution_test.go"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub problems: ProblemsSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Test runner binary.
    #[serde(default = "default_command")]
    pub command: String,

    /// Base arguments placed before the optional flags.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    #[serde(default = "default_verbose_flag")]
    pub verbose_flag: String,

    #[serde(default = "default_race_flag")]
    pub race_flag: String,

    /// Optional kill timeout for a single run, e.g. `"90s"`.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_command() -> String {
    "go".to_string()
}

fn default_args() -> Vec<String> {
    vec!["test".to_string()]
}

fn default_verbose_flag() -> String {
    "-v".to_string()
}

fn default_race_flag() -> String {
    "-race".to_string()
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            verbose_flag: default_verbose_flag(),
            race_flag: default_race_flag(),
            timeout: None,
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Quiet period after the last change before a re-run, e.g. `"100ms"`.
    #[serde(default = "default_debounce")]
    pub debounce: String,
}

fn default_debounce() -> String {
    "100ms".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            debounce: default_debounce(),
        }
    }
}

/// `[problems]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemsSection {
    /// Directory holding one sub-directory per problem.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_solution_file")]
    pub solution_file: String,

    #[serde(default = "default_test_file")]
    pub test_file: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("problems")
}

fn default_solution_file() -> String {
    "solution.go".to_string()
}

fn default_test_file() -> String {
    "solution_test.go".to_string()
}

impl Default for ProblemsSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            solution_file: default_solution_file(),
            test_file: default_test_file(),
        }
    }
}

/// Validated settings handed to the executor, reporter and watch loop.
///
/// Build from TOML through `TryFrom<RawSettings>`; `Default` matches an
/// empty config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub runner: RunnerSettings,
    pub debounce: Duration,
    pub problems: ProblemsSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub command: String,
    pub args: Vec<String>,
    pub verbose_flag: String,
    pub race_flag: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemsSettings {
    pub root: PathBuf,
    pub solution_file: String,
    pub test_file: String,
}

impl Settings {
    pub(crate) fn new_unchecked(
        runner: RunnerSettings,
        debounce: Duration,
        problems: ProblemsSettings,
    ) -> Self {
        Self {
            runner,
            debounce,
            problems,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let runner = RunnerSection::default();
        let problems = ProblemsSection::default();
        Self::new_unchecked(
            RunnerSettings {
                command: runner.command,
                args: runner.args,
                verbose_flag: runner.verbose_flag,
                race_flag: runner.race_flag,
                timeout: None,
            },
            Duration::from_millis(100),
            ProblemsSettings {
                root: problems.root,
                solution_file: problems.solution_file,
                test_file: problems.test_file,
            },
        )
    }
}
