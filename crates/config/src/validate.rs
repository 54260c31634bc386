//! Configuration validation.
//!
//! Checks the loaded config for conditions that would make a sync run
//! impossible (missing API key) or surprising (clamped values, interval
//! fallbacks) and reports them as diagnostics.

use crate::{
    interval::parse_interval,
    schema::{MAX_RESULTS_BOUNDS, SteepleConfig},
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "missing-value", "unresolved-placeholder", "out-of-range",
    /// "unparseable-value", "channel-identity"
    pub category: &'static str,
    /// Dotted path, e.g. "youtube.api_key" or "channels[2]"
    pub path: String,
    pub message: String,
}

/// Result of validating a configuration.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<std::path::PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Validate a loaded config (after env substitution and overrides).
#[must_use]
pub fn validate_config(config: &SteepleConfig) -> ValidationResult {
    let mut diagnostics = Vec::new();

    check_api_key(config, &mut diagnostics);
    check_max_results(config, &mut diagnostics);
    check_interval(config, &mut diagnostics);
    check_channels(config, &mut diagnostics);

    ValidationResult {
        diagnostics,
        config_path: None,
    }
}

fn check_api_key(config: &SteepleConfig, out: &mut Vec<Diagnostic>) {
    let key = config.youtube.api_key.trim();
    if key.is_empty() {
        out.push(Diagnostic {
            severity: Severity::Error,
            category: "missing-value",
            path: "youtube.api_key".into(),
            message: "API key is not set; export YOUTUBE_API_KEY or set youtube.api_key".into(),
        });
    } else if key.contains("${") {
        out.push(Diagnostic {
            severity: Severity::Error,
            category: "unresolved-placeholder",
            path: "youtube.api_key".into(),
            message: format!("placeholder {key:?} was not substituted; is the variable exported?"),
        });
    }
}

fn check_max_results(config: &SteepleConfig, out: &mut Vec<Diagnostic>) {
    let (lo, hi) = MAX_RESULTS_BOUNDS;
    let configured = config.youtube.max_results;
    if configured < lo || configured > hi {
        out.push(Diagnostic {
            severity: Severity::Warning,
            category: "out-of-range",
            path: "youtube.max_results".into(),
            message: format!("{configured} is outside {lo}..={hi} and will be clamped"),
        });
    }
}

fn check_interval(config: &SteepleConfig, out: &mut Vec<Diagnostic>) {
    match parse_interval(&config.sync.interval) {
        None => out.push(Diagnostic {
            severity: Severity::Warning,
            category: "unparseable-value",
            path: "sync.interval".into(),
            message: format!(
                "{:?} is not a valid interval (try \"90s\", \"15m\", \"1h\"); using 15m",
                config.sync.interval
            ),
        }),
        Some(d) if d.as_secs() < 60 => out.push(Diagnostic {
            severity: Severity::Info,
            category: "out-of-range",
            path: "sync.interval".into(),
            message: format!(
                "{:?} is under a minute; frequent passes burn API quota quickly",
                config.sync.interval
            ),
        }),
        Some(_) => {},
    }
}

fn check_channels(config: &SteepleConfig, out: &mut Vec<Diagnostic>) {
    for (i, entry) in config.effective_channels().iter().enumerate() {
        if !entry.has_identity() {
            out.push(Diagnostic {
                severity: Severity::Error,
                category: "channel-identity",
                path: format!("channels[{i}]"),
                message: format!(
                    "channel {:?} has neither an id nor a handle and can never sync",
                    entry.name
                ),
            });
        }
        if entry.name.trim().is_empty() {
            out.push(Diagnostic {
                severity: Severity::Warning,
                category: "missing-value",
                path: format!("channels[{i}].name"),
                message: "channel has no display name; logs will be hard to read".into(),
            });
        }
    }
}
