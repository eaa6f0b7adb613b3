use crate::error::{Error, Result};
use crate::inference::DEFAULT_API_BASE_URL;
use crate::unique::DEFAULT_MAX_SUFFIX;
use crate::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the project config, relative to the working directory.
pub const CONFIG_DIR: &str = ".rename-movies";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Model asked for file names
    #[serde(default = "default_model")]
    pub model: String,

    /// Responses API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Frame extraction binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Highest `-N` suffix tried when a target name is taken
    #[serde(default = "default_max_suffix")]
    pub max_suffix: u32,

    /// Default preview format: "table", "list", or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            api_key_env: default_api_key_env(),
            ffmpeg_path: default_ffmpeg_path(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            max_suffix: default_max_suffix(),
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_max_output_tokens() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_suffix() -> u32 {
    DEFAULT_MAX_SUFFIX
}

fn default_preview() -> String {
    "list".to_string()
}

impl Config {
    /// Load `.rename-movies/config.toml` from the working directory, falling
    /// back to the user config directory, then to defaults.
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        if let Some(global_path) = Self::global_path() {
            if global_path.exists() {
                return Self::load_from_path(&global_path);
            }
        }

        Ok(Self::default())
    }

    /// `<config_dir>/rename-movies/config.toml`
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rename-movies").join(CONFIG_FILE))
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.model, "gpt-4o");
        assert_eq!(config.defaults.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.defaults.api_key_env, "OPENAI_API_KEY_FOR_RENAME_MOVIE");
        assert_eq!(config.defaults.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.defaults.max_output_tokens, 100);
        assert_eq!(config.defaults.max_suffix, 10_000);
        assert_eq!(config.defaults.preview_format, "list");
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_written_config_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = Config::default();
        config.defaults.model = "gpt-4o-mini".to_string();
        config.defaults.max_suffix = 50;
        config.defaults.use_color = Some(false);

        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
model = "gpt-4.1"
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.model, "gpt-4.1");
        assert_eq!(config.defaults.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        // Other fields should have their defaults
        assert_eq!(config.defaults.request_timeout_secs, 120);
        assert_eq!(config.defaults.preview_format, "list");
    }

    #[test]
    fn test_invalid_config_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[defaults]\nmax_suffix = \"lots\"\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config { ref path, .. } if path == &config_path));
    }
}
