use crate::error::{CalcError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MAX_HISTORY_SIZE: usize = 100;
const DEFAULT_PRECISION: u32 = 9;
const DEFAULT_MAX_INPUT_VALUE: f64 = 1e15;
const DEFAULT_ENCODING: &str = "utf-8";
const MAX_PRECISION: u32 = 15;

pub const ENV_BASE_DIR: &str = "CALCULATOR_BASE_DIR";
pub const ENV_LOG_DIR: &str = "CALCULATOR_LOG_DIR";
pub const ENV_HISTORY_DIR: &str = "CALCULATOR_HISTORY_DIR";
pub const ENV_LOG_FILE: &str = "CALCULATOR_LOG_FILE";
pub const ENV_HISTORY_FILE: &str = "CALCULATOR_HISTORY_FILE";
pub const ENV_MAX_HISTORY_SIZE: &str = "CALCULATOR_MAX_HISTORY_SIZE";
pub const ENV_AUTO_SAVE: &str = "CALCULATOR_AUTO_SAVE";
pub const ENV_PRECISION: &str = "CALCULATOR_PRECISION";
pub const ENV_MAX_INPUT_VALUE: &str = "CALCULATOR_MAX_INPUT_VALUE";
pub const ENV_DEFAULT_ENCODING: &str = "CALCULATOR_DEFAULT_ENCODING";
pub const ENV_MAX_UNDO_DEPTH: &str = "CALCULATOR_MAX_UNDO_DEPTH";

/// Process-wide calculator settings.
///
/// Built once at startup (defaults, then `config.json` in the base
/// directory, then `CALCULATOR_*` environment variables) and passed by
/// reference to everything that needs it. Nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalcConfig {
    pub base_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub history_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub max_history_size: usize,
    pub auto_save: bool,
    /// Number of fractional digits results are rounded to.
    pub precision: u32,
    pub max_input_value: f64,
    pub default_encoding: String,
    /// Cap on undo snapshots. `None` keeps every snapshot for the session.
    pub max_undo_depth: Option<usize>,
}

fn default_base_dir() -> PathBuf {
    ProjectDirs::from("com", "calcz", "calcz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self::new(default_base_dir())
    }
}

impl CalcConfig {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            log_dir: None,
            history_dir: None,
            log_file: None,
            history_file: None,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            auto_save: true,
            precision: DEFAULT_PRECISION,
            max_input_value: DEFAULT_MAX_INPUT_VALUE,
            default_encoding: DEFAULT_ENCODING.to_string(),
            max_undo_depth: None,
        }
    }

    /// Load config from `config.json` in the given directory, or return
    /// defaults rooted there if the file does not exist.
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::new(base_dir));
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: CalcConfig = serde_json::from_str(&content)?;
        // The file's location wins over whatever base_dir it might declare
        config.base_dir = base_dir.to_path_buf();
        Ok(config)
    }

    /// Resolve the full configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CalcConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = lookup(ENV_BASE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_base_dir);
        Self::load(base_dir)?.apply_env(lookup)
    }

    /// Overlay `CALCULATOR_*` variables on top of this config.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_HISTORY_DIR) {
            self.history_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_HISTORY_FILE) {
            self.history_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_MAX_HISTORY_SIZE) {
            self.max_history_size = parse_env(ENV_MAX_HISTORY_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_AUTO_SAVE) {
            let v = v.trim().to_lowercase();
            self.auto_save = v == "true" || v == "1";
        }
        if let Some(v) = lookup(ENV_PRECISION) {
            self.precision = parse_env(ENV_PRECISION, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_INPUT_VALUE) {
            self.max_input_value = parse_env(ENV_MAX_INPUT_VALUE, &v)?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_ENCODING) {
            self.default_encoding = v;
        }
        if let Some(v) = lookup(ENV_MAX_UNDO_DEPTH) {
            self.max_undo_depth = Some(parse_env(ENV_MAX_UNDO_DEPTH, &v)?);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history_size == 0 {
            return Err(CalcError::Config("max_history_size must be positive".into()));
        }
        if self.max_undo_depth == Some(0) {
            return Err(CalcError::Config("max_undo_depth must be positive".into()));
        }
        if self.precision > MAX_PRECISION {
            return Err(CalcError::Config(format!(
                "precision must be at most {}",
                MAX_PRECISION
            )));
        }
        if !self.max_input_value.is_finite() || self.max_input_value <= 0.0 {
            return Err(CalcError::Config(
                "max_input_value must be a positive finite number".into(),
            ));
        }
        let encoding = self.default_encoding.to_lowercase().replace('_', "-");
        if encoding != "utf-8" && encoding != "utf8" {
            return Err(CalcError::Config(format!(
                "Unsupported encoding: {}",
                self.default_encoding
            )));
        }
        Ok(())
    }

    /// Create the log and history directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.log_dir(), self.history_dir()] {
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
            }
        }
        if let Some(parent) = self.history_file().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("logs"))
    }

    pub fn history_dir(&self) -> PathBuf {
        self.history_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("history"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.log_dir().join("calculator.log"))
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| self.history_dir().join("calculator_history.csv"))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CalcError::Config(format!("Invalid value for {}: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CalcConfig::new("/tmp/calcz");
        assert_eq!(config.max_history_size, 100);
        assert_eq!(config.precision, 9);
        assert!(config.auto_save);
        assert_eq!(config.default_encoding, "utf-8");
        assert_eq!(config.max_undo_depth, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_paths() {
        let config = CalcConfig::new("/srv/calc");
        assert_eq!(config.log_dir(), PathBuf::from("/srv/calc/logs"));
        assert_eq!(
            config.history_file(),
            PathBuf::from("/srv/calc/history/calculator_history.csv")
        );
        assert_eq!(
            config.log_file(),
            PathBuf::from("/srv/calc/logs/calculator.log")
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = CalcConfig::new("/srv/calc")
            .apply_env(lookup_from(&[
                (ENV_MAX_HISTORY_SIZE, "5"),
                (ENV_AUTO_SAVE, "0"),
                (ENV_PRECISION, "3"),
                (ENV_MAX_INPUT_VALUE, "1000"),
                (ENV_HISTORY_FILE, "/data/h.csv"),
                (ENV_MAX_UNDO_DEPTH, "20"),
            ]))
            .unwrap();

        assert_eq!(config.max_history_size, 5);
        assert!(!config.auto_save);
        assert_eq!(config.precision, 3);
        assert_eq!(config.max_input_value, 1000.0);
        assert_eq!(config.history_file(), PathBuf::from("/data/h.csv"));
        assert_eq!(config.max_undo_depth, Some(20));
    }

    #[test]
    fn test_auto_save_accepts_true_and_one() {
        for raw in ["true", "TRUE", "1"] {
            let config = CalcConfig::new(".")
                .apply_env(lookup_from(&[(ENV_AUTO_SAVE, raw)]))
                .unwrap();
            assert!(config.auto_save, "{raw} should enable auto save");
        }
    }

    #[test]
    fn test_unparseable_env_value_is_config_error() {
        let err = CalcConfig::new(".")
            .apply_env(lookup_from(&[(ENV_PRECISION, "lots")]))
            .unwrap_err();
        assert!(matches!(err, CalcError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CalcConfig::new(".");
        config.max_history_size = 0;
        assert!(config.validate().is_err());

        let mut config = CalcConfig::new(".");
        config.precision = 16;
        assert!(config.validate().is_err());

        let mut config = CalcConfig::new(".");
        config.max_input_value = -1.0;
        assert!(config.validate().is_err());

        let mut config = CalcConfig::new(".");
        config.default_encoding = "latin-1".into();
        assert!(config.validate().is_err());

        let mut config = CalcConfig::new(".");
        config.max_undo_depth = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CalcConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, CalcConfig::new(temp_dir.path()));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "max_history_size": 10, "auto_save": false }"#,
        )
        .unwrap();

        let config = CalcConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.max_history_size, 10);
        assert!(!config.auto_save);
        assert_eq!(config.precision, 9);
        assert_eq!(config.base_dir, temp_dir.path());
    }

    #[test]
    fn test_from_lookup_reads_base_dir_then_env() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "precision": 4 }"#,
        )
        .unwrap();
        let base = temp_dir.path().to_string_lossy().to_string();

        let config = CalcConfig::from_lookup(lookup_from(&[
            (ENV_BASE_DIR, base.as_str()),
            (ENV_PRECISION, "2"),
        ]))
        .unwrap();
        assert_eq!(config.base_dir, temp_dir.path());
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn test_ensure_dirs_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CalcConfig::new(temp_dir.path().join("nested"));
        config.ensure_dirs().unwrap();
        assert!(config.log_dir().is_dir());
        assert!(config.history_dir().is_dir());
    }
}
