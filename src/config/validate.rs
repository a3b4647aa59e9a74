// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ProblemsSettings, RawSettings, RunnerSettings, Settings};
use crate::errors::{Result, TestwatchError};

impl TryFrom<RawSettings> for Settings {
    type Error = TestwatchError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let runner = validate_runner(raw.runner)?;
        let debounce = validate_debounce(&raw.watch.debounce)?;
        let problems = validate_problems(raw.problems)?;
        Ok(Settings::new_unchecked(runner, debounce, problems))
    }
}

fn validate_runner(section: crate::config::RunnerSection) -> Result<RunnerSettings> {
    if section.command.trim().is_empty() {
        return Err(TestwatchError::ConfigError(
            "[runner].command must not be empty".to_string(),
        ));
    }

    let timeout = match section.timeout.as_deref() {
        Some(s) => {
            let limit = parse_duration(s).map_err(|e| {
                TestwatchError::ConfigError(format!("[runner].timeout: {e}"))
            })?;
            if limit.is_zero() {
                return Err(TestwatchError::ConfigError(
                    "[runner].timeout must be greater than zero".to_string(),
                ));
            }
            Some(limit)
        }
        None => None,
    };

    Ok(RunnerSettings {
        command: section.command,
        args: section.args,
        verbose_flag: section.verbose_flag,
        race_flag: section.race_flag,
        timeout,
    })
}

fn validate_debounce(s: &str) -> Result<Duration> {
    let debounce = parse_duration(s)
        .map_err(|e| TestwatchError::ConfigError(format!("[watch].debounce: {e}")))?;
    if debounce.is_zero() {
        return Err(TestwatchError::ConfigError(
            "[watch].debounce must be greater than zero".to_string(),
        ));
    }
    Ok(debounce)
}

fn validate_problems(section: crate::config::ProblemsSection) -> Result<ProblemsSettings> {
    for (key, value) in [
        ("solution_file", &section.solution_file),
        ("test_file", &section.test_file),
    ] {
        if value.trim().is_empty() {
            return Err(TestwatchError::ConfigError(format!(
                "[problems].{key} must not be empty"
            )));
        }
    }

    Ok(ProblemsSettings {
        root: section.root,
        solution_file: section.solution_file,
        test_file: section.test_file,
    })
}

/// Parse a simple duration string like `"100ms"`, `"3s"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;

    let secs_per_unit = match unit_part.trim().to_lowercase().as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        unit => {
            return Err(format!(
                "unsupported duration unit '{unit}'; expected ms, s, m, or h"
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("invalid duration '{s}': too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(s: &str) -> Result<Settings> {
        let raw: RawSettings = toml::from_str(s)?;
        Settings::try_from(raw)
    }

    #[test]
    fn parses_supported_units() {
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("3s"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_duration(" 2m "), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    }

    #[test]
    fn oversized_durations_are_rejected() {
        let err = parse_duration("18446744073709551615h").unwrap_err();
        assert!(err.contains("too large"), "{err}");
        assert!(parse_duration("18446744073709551615m").is_err());
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Ok(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("100").is_err());
        assert!(parse_duration("ms").is_err());
        assert!(parse_duration("5d").is_err());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.runner.command, "go");
        assert_eq!(settings.debounce, Duration::from_millis(100));
        assert_eq!(settings.runner.timeout, None);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = from_toml(
            r#"
            [runner]
            command = "gotestsum"
            args = ["--", "-count=1"]
            timeout = "90s"

            [watch]
            debounce = "250ms"

            [problems]
            root = "katas"
            "#,
        )
        .unwrap();

        assert_eq!(settings.runner.command, "gotestsum");
        assert_eq!(settings.runner.args, vec!["--", "-count=1"]);
        assert_eq!(settings.runner.timeout, Some(Duration::from_secs(90)));
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.problems.root, std::path::PathBuf::from("katas"));
        assert_eq!(settings.problems.solution_file, "solution.go");
    }

    #[test]
    fn zero_debounce_is_rejected() {
        let err = from_toml("[watch]\ndebounce = \"0ms\"\n").unwrap_err();
        assert!(matches!(err, TestwatchError::ConfigError(_)));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = from_toml("[runner]\ncommand = \"  \"\n").unwrap_err();
        assert!(matches!(err, TestwatchError::ConfigError(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = from_toml("[watch]\ndebounse = \"10ms\"\n").unwrap_err();
        assert!(matches!(err, TestwatchError::TomlError(_)));
    }
}
