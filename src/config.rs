use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::router::RouteFlags;

pub const DEFAULT_INPUT_DIR: &str = "unprocessed";
pub const DEFAULT_OUTPUT_DIR: &str = "processed";
pub const DEFAULT_IGNORED_DIR: &str = "ignored";
pub const DEFAULT_IGNORE_FILE: &str = "ignore.txt";
pub const DEFAULT_CHANGE_LOG: &str = "changes.log";
pub const DEFAULT_FIXTURES_DIR: &str = "test";
pub const DEFAULT_SEPARATOR: &str = "; ";
pub const DEFAULT_UNSAFE_CHAR: char = '/';

/// Application configuration loaded from TOML config file.
/// Every field is optional, and so is the file.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub ignored_dir: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub change_log: Option<PathBuf>,
    /// Source tree staged into the input directory by `--test`.
    pub fixtures_dir: Option<PathBuf>,
    /// Joins artist names in the rewritten tag.
    pub separator: Option<String>,
    /// Character that cannot appear in a path component.
    pub unsafe_char: Option<char>,
    /// Remove `unsafe_char` from credits before splitting.
    pub strip_unsafe: bool,
}

impl AppConfig {
    /// Load config from `~/.config/credsplit/config.toml`.
    /// Returns default config if file doesn't exist.
    /// Logs a warning if the file exists but can't be parsed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the config file path.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Everything one run needs, resolved once at startup and passed down.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ignored_dir: PathBuf,
    pub ignore_file: PathBuf,
    pub change_log: PathBuf,
    pub fixtures_dir: PathBuf,
    pub separator: String,
    pub unsafe_char: char,
    pub strip_unsafe: bool,
    /// Route fragments that still contain `unsafe_char` to the ignored root.
    pub ignore_slash: bool,
    /// Copy the fixture tree into the input root before scanning.
    pub stage_fixtures: bool,
    pub flags: RouteFlags,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_app(&AppConfig::default())
    }
}

impl RunConfig {
    /// Built-in defaults overlaid with the config file.
    pub fn from_app(app: &AppConfig) -> Self {
        let path_or = |p: &Option<PathBuf>, default: &str| {
            p.clone().unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            input_dir: path_or(&app.input_dir, DEFAULT_INPUT_DIR),
            output_dir: path_or(&app.output_dir, DEFAULT_OUTPUT_DIR),
            ignored_dir: path_or(&app.ignored_dir, DEFAULT_IGNORED_DIR),
            ignore_file: path_or(&app.ignore_file, DEFAULT_IGNORE_FILE),
            change_log: path_or(&app.change_log, DEFAULT_CHANGE_LOG),
            fixtures_dir: path_or(&app.fixtures_dir, DEFAULT_FIXTURES_DIR),
            separator: app
                .separator
                .clone()
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            unsafe_char: app.unsafe_char.unwrap_or(DEFAULT_UNSAFE_CHAR),
            strip_unsafe: app.strip_unsafe,
            ignore_slash: false,
            stage_fixtures: false,
            flags: RouteFlags::default(),
        }
    }

    /// A config rooted under `base`, with every path resolved inside it.
    pub fn rooted_at(base: &Path) -> Self {
        let mut config = Self::default();
        for path in [
            &mut config.input_dir,
            &mut config.output_dir,
            &mut config.ignored_dir,
            &mut config.ignore_file,
            &mut config.change_log,
            &mut config.fixtures_dir,
        ] {
            *path = base.join(&*path);
        }
        config
    }
}
