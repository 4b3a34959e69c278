//! Configuration for artquiz.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (ARTQUIZ_DATA, ARTQUIZ_REVEAL_DELAY_MS)
//! 2. Config file (.artquiz/config.yaml)
//! 3. Defaults (./data if present, else ~/.artquiz/data)
//!
//! Config file discovery:
//! - Searches current directory and parents for .artquiz/config.yaml
//! - A relative data location is relative to the config file's project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub quiz: Option<QuizConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Directory or http(s) base URL holding the documents
    pub location: Option<String>,
    /// Paintings document name
    pub paintings: Option<String>,
    /// Artist bios document name
    pub bios: Option<String>,
    pub fetch_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub streak_target: Option<u32>,
    pub choice_count: Option<usize>,
    pub popular_top_n: Option<usize>,
    pub distractor_attempts: Option<u32>,
    pub reveal_delay_ms: Option<u64>,
}

/// Where and how to fetch the catalog documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSettings {
    pub location: String,
    pub paintings: String,
    pub bios: String,
    pub fetch_timeout_seconds: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            location: "data".to_string(),
            paintings: "paintings_merged.json".to_string(),
            bios: "artist_bios.json".to_string(),
            fetch_timeout_seconds: 30,
        }
    }
}

impl DataSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

/// Quiz rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSettings {
    /// Consecutive correct answers that complete a streak
    pub streak_target: u32,
    /// Artist names offered per question
    pub choice_count: usize,
    /// Size of the "popular" category's artist ranking
    pub popular_top_n: usize,
    /// Random draws allowed while picking distractors
    pub distractor_attempts: u32,
    /// Pause between revealing an answer and the next painting
    pub reveal_delay_ms: u64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            streak_target: 10,
            choice_count: 4,
            popular_top_n: 10,
            distractor_attempts: 20,
            reveal_delay_ms: 1500,
        }
    }
}

impl QuizSettings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    fn merge(config: Option<&QuizConfig>) -> Self {
        let defaults = Self::default();
        let Some(config) = config else {
            return defaults;
        };

        Self {
            // A question needs a correct answer and at least one distractor
            streak_target: config.streak_target.unwrap_or(defaults.streak_target).max(1),
            choice_count: config.choice_count.unwrap_or(defaults.choice_count).max(2),
            popular_top_n: config.popular_top_n.unwrap_or(defaults.popular_top_n),
            distractor_attempts: config
                .distractor_attempts
                .unwrap_or(defaults.distractor_attempts),
            reveal_delay_ms: config.reveal_delay_ms.unwrap_or(defaults.reveal_delay_ms),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedConfig {
    pub data: DataSettings,
    pub quiz: QuizSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".artquiz").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Resolve a data location that may be relative to the project root
fn resolve_location(base: &Path, location: &str) -> String {
    if is_url(location) || Path::new(location).is_absolute() {
        return location.to_string();
    }

    base.join(location).to_string_lossy().into_owned()
}

/// Default data location: ./data when present, else ~/.artquiz/data
fn default_location() -> String {
    let local = PathBuf::from("data");
    if local.is_dir() {
        return local.to_string_lossy().into_owned();
    }

    dirs::home_dir()
        .map(|home| home.join(".artquiz").join("data"))
        .unwrap_or(local)
        .to_string_lossy()
        .into_owned()
}

fn resolve(config_file: Option<PathBuf>, config: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = DataSettings::default();

    let (data, quiz) = match (&config_file, config) {
        (Some(config_path), Some(config)) => {
            // Base directory is the parent of .artquiz/ (i.e., grandparent of config.yaml)
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            let location = config
                .data
                .location
                .as_deref()
                .map(|loc| resolve_location(base_dir, loc))
                .unwrap_or_else(default_location);

            let data = DataSettings {
                location,
                paintings: config.data.paintings.unwrap_or(defaults.paintings),
                bios: config.data.bios.unwrap_or(defaults.bios),
                fetch_timeout_seconds: config
                    .data
                    .fetch_timeout_seconds
                    .unwrap_or(defaults.fetch_timeout_seconds),
            };

            (data, QuizSettings::merge(config.quiz.as_ref()))
        }
        _ => (
            DataSettings {
                location: default_location(),
                ..defaults
            },
            QuizSettings::default(),
        ),
    };

    ResolvedConfig {
        data,
        quiz,
        config_file,
    }
}

fn apply_env(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(location) = std::env::var("ARTQUIZ_DATA") {
        config.data.location = location;
    }

    if let Some(delay) = std::env::var("ARTQUIZ_REVEAL_DELAY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.quiz.reveal_delay_ms = delay;
    }

    config
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let parsed = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    Ok(apply_env(resolve(config_file, parsed)))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Resolve configuration from an explicit config file path
pub fn config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let parsed = load_config_file(path)?;
    Ok(apply_env(resolve(Some(path.to_path_buf()), Some(parsed))))
}
