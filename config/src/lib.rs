//! Diagnostics configuration.
//!
//! Controls how outcomes are rendered and at which level they are logged.
//! Read from `~/.outcome/config.toml` unless `OUTCOME_CONFIG` points elsewhere:
//!
//! ```toml
//! [diagnostics]
//! max_chars = 512
//! include_causes = true
//! failure_level = "warn"
//! success_level = "debug"
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use outcome_types::{ErrorCapability, FaultKind};
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "OUTCOME_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub const KIND: FaultKind = FaultKind::new("config");
}

impl ErrorCapability for ConfigError {
    fn kind(&self) -> FaultKind {
        Self::KIND
    }
}

/// Severity used when an outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<ReportLevel> for Level {
    fn from(level: ReportLevel) -> Self {
        match level {
            ReportLevel::Trace => Level::TRACE,
            ReportLevel::Debug => Level::DEBUG,
            ReportLevel::Info => Level::INFO,
            ReportLevel::Warn => Level::WARN,
            ReportLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    diagnostics: Option<RawDiagnostics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDiagnostics {
    max_chars: Option<usize>,
    include_causes: Option<bool>,
    failure_level: Option<ReportLevel>,
    success_level: Option<ReportLevel>,
}

/// Resolved diagnostics settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    max_chars: usize,
    include_causes: bool,
    failure_level: ReportLevel,
    success_level: ReportLevel,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
            include_causes: true,
            failure_level: ReportLevel::Warn,
            success_level: ReportLevel::Debug,
        }
    }
}

impl DiagnosticsConfig {
    pub const DEFAULT_MAX_CHARS: usize = 512;
    /// Room for the `...` suffix.
    pub const MIN_MAX_CHARS: usize = 3;

    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    #[must_use]
    pub fn include_causes(&self) -> bool {
        self.include_causes
    }

    #[must_use]
    pub fn failure_level(&self) -> ReportLevel {
        self.failure_level
    }

    #[must_use]
    pub fn success_level(&self) -> ReportLevel {
        self.success_level
    }

    /// Clamped to [`Self::MIN_MAX_CHARS`].
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(Self::MIN_MAX_CHARS);
        self
    }

    pub fn with_include_causes(mut self, include_causes: bool) -> Self {
        self.include_causes = include_causes;
        self
    }

    pub fn with_failure_level(mut self, level: ReportLevel) -> Self {
        self.failure_level = level;
        self
    }

    pub fn with_success_level(mut self, level: ReportLevel) -> Self {
        self.success_level = level;
        self
    }

    /// Parse TOML text. `path` only labels errors.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::resolve(raw.diagnostics.unwrap_or_default()))
    }

    /// Strict load: any read or parse failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Lenient load from the default location. Falls back to defaults when the
    /// file is missing or broken; broken files are logged.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "Using default diagnostics config");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".outcome").join("config.toml"))
    }

    fn resolve(raw: RawDiagnostics) -> Self {
        let defaults = Self::default();
        Self {
            include_causes: raw.include_causes.unwrap_or(defaults.include_causes),
            failure_level: raw.failure_level.unwrap_or(defaults.failure_level),
            success_level: raw.success_level.unwrap_or(defaults.success_level),
            ..defaults
        }
        .with_max_chars(raw.max_chars.unwrap_or(Self::DEFAULT_MAX_CHARS))
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io::Write;
    use std::path::Path;

    use outcome_types::Outcome;
    use tracing::Level;

    use super::{CONFIG_PATH_ENV, ConfigError, DiagnosticsConfig, ReportLevel};

    #[test]
    fn empty_file_uses_defaults() {
        let config = DiagnosticsConfig::from_toml("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, DiagnosticsConfig::default());
        assert_eq!(config.max_chars(), 512);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = DiagnosticsConfig::from_toml(
            "[diagnostics]\nfailure_level = \"error\"\n",
            Path::new("partial.toml"),
        )
        .unwrap();
        assert_eq!(config.failure_level(), ReportLevel::Error);
        assert_eq!(config.success_level(), ReportLevel::Debug);
        assert!(config.include_causes());
    }

    #[test]
    fn max_chars_is_clamped() {
        let config = DiagnosticsConfig::from_toml(
            "[diagnostics]\nmax_chars = 1\n",
            Path::new("tiny.toml"),
        )
        .unwrap();
        assert_eq!(config.max_chars(), DiagnosticsConfig::MIN_MAX_CHARS);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DiagnosticsConfig::from_toml(
            "[diagnostics]\nverbosity = 3\n",
            Path::new("typo.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn bad_level_is_a_parse_error() {
        let err = DiagnosticsConfig::from_toml(
            "[diagnostics]\nsuccess_level = \"loud\"\n",
            Path::new("level.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[diagnostics]").unwrap();
        writeln!(file, "max_chars = 80").unwrap();
        writeln!(file, "include_causes = false").unwrap();

        let config = DiagnosticsConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_chars(), 80);
        assert!(!config.include_causes());
    }

    #[test]
    fn missing_file_becomes_config_fault() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let outcome: Outcome<DiagnosticsConfig> = DiagnosticsConfig::load_from(&missing).into();
        let fault = outcome.failure_value().unwrap();
        assert_eq!(fault.kind(), ConfigError::KIND);
        assert!(fault.message().contains("nope.toml"));
        assert_eq!(fault.causes().count(), 1);
        assert!(fault.downcast_ref::<ConfigError>().is_some());
    }

    // Only test touching OUTCOME_CONFIG; keep every env-dependent check here.
    #[test]
    fn load_follows_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        unsafe {
            env::set_var(CONFIG_PATH_ENV, &path);
        }
        assert_eq!(DiagnosticsConfig::path(), Some(path.clone()));

        assert_eq!(DiagnosticsConfig::load(), DiagnosticsConfig::default());

        fs::write(&path, "[diagnostics]\nmax_chars = \"lots\"\n").unwrap();
        assert_eq!(DiagnosticsConfig::load(), DiagnosticsConfig::default());

        fs::write(&path, "[diagnostics]\nmax_chars = 64\n").unwrap();
        assert_eq!(DiagnosticsConfig::load().max_chars(), 64);

        unsafe {
            env::remove_var(CONFIG_PATH_ENV);
        }
    }

    #[test]
    fn builders_override_fields() {
        let config = DiagnosticsConfig::default()
            .with_include_causes(false)
            .with_failure_level(ReportLevel::Error)
            .with_success_level(ReportLevel::Trace)
            .with_max_chars(0);
        assert!(!config.include_causes());
        assert_eq!(config.failure_level(), ReportLevel::Error);
        assert_eq!(config.success_level(), ReportLevel::Trace);
        assert_eq!(config.max_chars(), DiagnosticsConfig::MIN_MAX_CHARS);
    }

    #[test]
    fn levels_map_onto_tracing() {
        assert_eq!(Level::from(ReportLevel::Warn), Level::WARN);
        assert_eq!(Level::from(ReportLevel::Trace), Level::TRACE);
    }
}
