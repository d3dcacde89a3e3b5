//! Configuration for the gridfield ambient grid.
//!
//! Settings live in `config.toml` under the platform config directory, or at
//! the path named by `GRIDFIELD_CONFIG`. Every table is optional: missing keys
//! fall back to the built-in defaults and a missing file means all defaults.

mod error;
mod layout;

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use gridfield_core::{AnimationSpeed, ColorTheme, Geometry, InitialPlacement, ShuffleTiming};
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};
pub use layout::default_placements;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "GRIDFIELD_CONFIG";

/// Project directories for config and log files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "gridfield", "gridfield")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    pub profile: Profile,
    pub grid: GridConfig,
    pub shuffle: ShuffleTiming,
    pub placements: Vec<InitialPlacement>,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            speed: AnimationSpeed::default(),
            profile: Profile::default(),
            grid: GridConfig::default(),
            shuffle: ShuffleTiming::default(),
            placements: default_placements(),
            log: LogConfig::default(),
        }
    }
}

/// Header text drawn in the reserved column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub location: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "gridfield".to_string(),
            tagline: "an ambient grid for your terminal".to_string(),
            location: String::new(),
        }
    }
}

/// Grid arrangement plus how it maps onto the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u16,
    pub reserved_column: u16,
    /// Terminal lines per row.
    pub row_heights: Vec<u16>,
    /// Terminal columns given to the reserved column.
    pub content_width: u16,
    /// Duration of a widget fade in or out.
    pub fade_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            columns: geometry.columns,
            reserved_column: geometry.reserved_column,
            row_heights: geometry.row_heights,
            content_width: 40,
            fade_ms: 300,
        }
    }
}

impl GridConfig {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            columns: self.columns,
            reserved_column: self.reserved_column,
            row_heights: self.row_heights.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `GRIDFIELD_LOG` is unset.
    pub level: String,
    /// Log file path; defaults to `gridfield.log` in the data directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The path was resolved but no file exists there.
    Missing(PathBuf),
    /// No platform config directory and no `GRIDFIELD_CONFIG`.
    NoConfigDir,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Missing(path) => write!(f, "defaults ({} not found)", path.display()),
            ConfigSource::NoConfigDir => f.write_str("defaults (no config directory)"),
        }
    }
}

impl Config {
    /// Load from `GRIDFIELD_CONFIG` or the default location.
    pub fn load() -> Result<(Self, ConfigSource)> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok((Self::default(), ConfigSource::NoConfigDir)),
        }
    }

    /// Load from `path`, using defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Missing(path.to_path_buf())));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Log file location, falling back to the platform data directory.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("gridfield.log")))
    }

    pub fn geometry(&self) -> Geometry {
        self.grid.geometry()
    }

    /// Reject settings the grid cannot run with.
    ///
    /// Placements outside the grid are not an error here; the animator skips
    /// them with a warning.
    pub fn validate(&self) -> Result<()> {
        let geometry = self.geometry();
        if geometry.columns == 0 {
            return Err(ConfigError::geometry("grid needs at least one column"));
        }
        if geometry.row_heights.is_empty() {
            return Err(ConfigError::geometry("grid needs at least one row"));
        }
        if geometry.reserved_column >= geometry.columns {
            return Err(ConfigError::geometry(format!(
                "reserved column {} is outside a grid of {} columns",
                geometry.reserved_column, geometry.columns
            )));
        }
        if !geometry.is_well_formed() {
            return Err(ConfigError::geometry("no cells left for placements"));
        }
        if !self.shuffle.is_ordered() {
            return Err(ConfigError::timing("every range needs min <= max"));
        }
        if self.shuffle.retire_count.min == 0 && self.shuffle.retire_count.max == 0 {
            return Err(ConfigError::timing("retire_count must allow at least one"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gridfield_core::{Bounds, WidgetKind};

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.geometry(), Geometry::default());
        assert_eq!(config.placements, default_placements());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = Config::from_toml_str("").expect("empty config parses");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let config = Config::from_toml_str(
            r#"
            theme = "cyan"
            speed = "fast"

            [profile]
            name = "Ada"

            [shuffle]
            retire_count = { min = 2, max = 2 }

            [grid]
            content_width = 56
            "#,
        )
        .expect("partial config parses");

        assert_eq!(config.theme, ColorTheme::Cyan);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert_eq!(config.profile.name, "Ada");
        assert_eq!(config.profile.tagline, Profile::default().tagline);
        assert_eq!(config.shuffle.retire_count, Bounds::exactly(2));
        assert_eq!(config.shuffle.settle_ms, 800);
        assert_eq!(config.grid.content_width, 56);
        assert_eq!(config.geometry(), Geometry::default());
        assert_eq!(config.placements.len(), default_placements().len());
    }

    #[test]
    fn test_placements_replace_default_layout() {
        let config = Config::from_toml_str(
            r#"
            [[placements]]
            col = 0
            row = 0
            kind = { type = "dot-matrix", offset = 3 }

            [[placements]]
            col = 2
            row = 5
            kind = { type = "spinner" }
            "#,
        )
        .expect("placements parse");

        assert_eq!(
            config.placements,
            vec![
                InitialPlacement::new(0, 0, WidgetKind::DotMatrix { offset: 3 }),
                InitialPlacement::new(2, 5, WidgetKind::Spinner),
            ]
        );
    }

    #[test]
    fn test_malformed_geometry_is_rejected() {
        let err = Config::from_toml_str("[grid]\ncolumns = 3\nreserved_column = 3\n")
            .expect_err("reserved column outside grid");
        assert!(matches!(err, ConfigError::InvalidGeometry { .. }));

        let err = Config::from_toml_str("[grid]\nrow_heights = []\n").expect_err("no rows");
        assert!(matches!(err, ConfigError::InvalidGeometry { .. }));

        let err = Config::from_toml_str("[grid]\ncolumns = 1\nreserved_column = 0\n")
            .expect_err("only the reserved column");
        assert!(matches!(err, ConfigError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_inverted_timing_is_rejected() {
        let err = Config::from_toml_str("[shuffle]\ncycle_delay_ms = { min = 9000, max = 10 }\n")
            .expect_err("inverted range");
        assert!(matches!(err, ConfigError::InvalidTiming { .. }));
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let err = Config::from_toml_str("theme = ").expect_err("syntax error");
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = Config::from_toml_str("theme = \"plaid\"").expect_err("unknown theme");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("gridfield-config-test-missing.toml");
        let (config, source) = Config::load_from(&path).expect("missing file is fine");
        assert_eq!(config, Config::default());
        assert_eq!(source, ConfigSource::Missing(path.clone()));
        assert!(source.to_string().starts_with("defaults"));
    }

    #[test]
    fn test_load_from_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "gridfield-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "speed = \"slow\"\n").expect("write temp config");
        let loaded = Config::load_from(&path);
        std::fs::remove_file(&path).ok();
        let (config, source) = loaded.expect("file parses");
        assert_eq!(config.speed, AnimationSpeed::Slow);
        assert_eq!(source, ConfigSource::File(path));
    }
}
