//! Configuration hierarchy: CLI > environment > file > defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AioError, AioResult};

/// Prefix of environment variables mapped onto [`AppConfig`] keys
pub const ENV_PREFIX: &str = "TORRENT_AIO_";
/// Base name of configuration files
pub const CONFIG_NAME: &str = "torrent-aio";
/// Table that may wrap the settings inside a configuration file
pub const CONFIG_TABLE: &str = "torrent_aio";
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yml", "yaml"];

pub const DEFAULT_GROUP: &str = "TORRENT-AIO";

/// Settings for one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Release group appended to names
    pub group_name: String,
    /// Destination of the renamed file and reports; the input's directory when unset
    pub output_dir: Option<PathBuf>,
    /// Source token placed in release names (`WEB-DL`, `BluRay`, ...)
    pub source_type: String,
    pub skip_layout: bool,
    pub skip_torrent: bool,
    /// Tracker announce URL written into the torrent
    pub announce_url: Option<String>,
    /// Set the private flag on the torrent
    pub private_torrent: bool,
    pub no_rename: bool,
    pub mediainfo_path: PathBuf,
    pub tmdb_language: String,
    pub identify_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            group_name: DEFAULT_GROUP.to_string(),
            output_dir: None,
            source_type: "WEB-DL".to_string(),
            skip_layout: false,
            skip_torrent: false,
            announce_url: None,
            private_torrent: false,
            no_rename: false,
            mediainfo_path: PathBuf::from("mediainfo"),
            tmdb_language: "fr-FR".to_string(),
            identify_timeout_secs: 60,
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub group_name: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub source_type: Option<String>,
    pub skip_layout: Option<bool>,
    pub skip_torrent: Option<bool>,
    pub announce_url: Option<String>,
    pub private_torrent: Option<bool>,
    pub no_rename: Option<bool>,
}

fn config_error(message: impl Into<String>) -> AioError {
    AioError::ConfigError {
        message: message.into(),
    }
}

fn parse_bool(key: &str, value: &str) -> AioResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(config_error(format!("{} expects a boolean, got '{}'", key, value))),
    }
}

impl AppConfig {
    /// Build the configuration from every layer
    ///
    /// Returns the configuration and the file it was read from, if any.
    pub fn resolve(
        explicit_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> AioResult<(Self, Option<PathBuf>)> {
        let (mut config, source) = Self::load(explicit_file)?;
        config.apply_env(std::env::vars())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok((config, source))
    }

    /// Defaults, overlaid with the configuration file when one is found
    ///
    /// An explicit file must exist; searched locations are optional.
    pub fn load(explicit_file: Option<&Path>) -> AioResult<(Self, Option<PathBuf>)> {
        let path = match explicit_file {
            Some(path) if !path.is_file() => {
                return Err(config_error(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_search_paths().into_iter().find(|p| p.is_file()),
        };

        match path {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Ok((Self::from_file(&path)?, Some(path)))
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Read a configuration file; `.toml` is TOML, anything else YAML
    pub fn from_file(path: &Path) -> AioResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    pub fn from_toml_str(contents: &str) -> AioResult<Self> {
        let value: toml::Value = toml::from_str(contents)
            .map_err(|e| config_error(format!("Failed to parse TOML config: {}", e)))?;
        let settings = match value.get(CONFIG_TABLE) {
            Some(table @ toml::Value::Table(_)) => table.clone(),
            _ => value,
        };
        settings
            .try_into()
            .map_err(|e| config_error(format!("Invalid TOML config: {}", e)))
    }

    pub fn from_yaml_str(contents: &str) -> AioResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)
            .map_err(|e| config_error(format!("Failed to parse YAML config: {}", e)))?;
        let settings = match value.get(CONFIG_TABLE) {
            Some(table @ serde_yaml::Value::Mapping(_)) => table.clone(),
            _ if value.is_null() => return Ok(Self::default()),
            _ => value,
        };
        serde_yaml::from_value(settings)
            .map_err(|e| config_error(format!("Invalid YAML config: {}", e)))
    }

    /// Apply `TORRENT_AIO_<KEY>` variables from an environment listing
    pub fn apply_env<I>(&mut self, vars: I) -> AioResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match key {
                "GROUP_NAME" => self.group_name = value,
                "OUTPUT_DIR" => {
                    self.output_dir = Some(value).filter(|v| !v.is_empty()).map(PathBuf::from)
                }
                "SOURCE_TYPE" => self.source_type = value,
                "SKIP_LAYOUT" => self.skip_layout = parse_bool(&name, &value)?,
                "SKIP_TORRENT" => self.skip_torrent = parse_bool(&name, &value)?,
                "ANNOUNCE_URL" => {
                    self.announce_url = Some(value.trim().to_string()).filter(|v| !v.is_empty())
                }
                "PRIVATE_TORRENT" => self.private_torrent = parse_bool(&name, &value)?,
                "NO_RENAME" => self.no_rename = parse_bool(&name, &value)?,
                "MEDIAINFO_PATH" => self.mediainfo_path = PathBuf::from(value),
                "TMDB_LANGUAGE" => self.tmdb_language = value,
                "IDENTIFY_TIMEOUT_SECS" => {
                    self.identify_timeout_secs = value.trim().parse().map_err(|_| {
                        config_error(format!("{} expects seconds, got '{}'", name, value))
                    })?
                }
                _ => {
                    debug!("Ignoring unknown variable {}", name);
                    continue;
                }
            }
            info!("Environment override: {}", name);
        }
        Ok(())
    }

    /// Apply command line values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(group) = &overrides.group_name {
            self.group_name = group.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if let Some(source) = &overrides.source_type {
            self.source_type = source.clone();
        }
        if let Some(skip) = overrides.skip_layout {
            self.skip_layout = skip;
        }
        if let Some(skip) = overrides.skip_torrent {
            self.skip_torrent = skip;
        }
        if let Some(url) = &overrides.announce_url {
            self.announce_url = Some(url.clone());
        }
        if let Some(private) = overrides.private_torrent {
            self.private_torrent = private;
        }
        if let Some(no_rename) = overrides.no_rename {
            self.no_rename = no_rename;
        }
    }

    pub fn validate(&self) -> AioResult<()> {
        if self.identify_timeout_secs == 0 {
            return Err(config_error("identify_timeout_secs must be greater than zero"));
        }
        if self.mediainfo_path.as_os_str().is_empty() {
            return Err(config_error("mediainfo_path must not be empty"));
        }
        if let Some(url) = &self.announce_url {
            if url.trim().is_empty() || url.chars().any(char::is_whitespace) {
                return Err(config_error(format!("announce_url is not a URL: '{}'", url)));
            }
        }
        Ok(())
    }

    pub fn identify_timeout(&self) -> Duration {
        Duration::from_secs(self.identify_timeout_secs)
    }

    /// Output directory for an input file
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Searched configuration files, in priority order
pub fn default_search_paths() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    [home.join(".config"), home]
        .iter()
        .flat_map(|dir| {
            CONFIG_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}.{}", CONFIG_NAME, ext)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.group_name, "TORRENT-AIO");
        assert_eq!(config.source_type, "WEB-DL");
        assert_eq!(config.tmdb_language, "fr-FR");
        assert_eq!(config.identify_timeout(), Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_top_level_and_table() {
        let flat = AppConfig::from_toml_str("group_name = \"GRP\"\nskip_layout = true\n").unwrap();
        assert_eq!(flat.group_name, "GRP");
        assert!(flat.skip_layout);
        assert_eq!(flat.source_type, "WEB-DL");

        let nested =
            AppConfig::from_toml_str("[torrent_aio]\nsource_type = \"BluRay\"\n").unwrap();
        assert_eq!(nested.source_type, "BluRay");
        assert_eq!(nested.group_name, DEFAULT_GROUP);
    }

    #[test]
    fn test_yaml_config() {
        let config =
            AppConfig::from_yaml_str("group_name: YML\noutput_dir: /srv/releases\nno_rename: true\n")
                .unwrap();
        assert_eq!(config.group_name, "YML");
        assert_eq!(config.output_dir, Some(PathBuf::from("/srv/releases")));
        assert!(config.no_rename);

        let nested = AppConfig::from_yaml_str("torrent_aio:\n  tmdb_language: en-US\n").unwrap();
        assert_eq!(nested.tmdb_language, "en-US");

        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_file_contents() {
        assert!(matches!(
            AppConfig::from_toml_str("group_name = ["),
            Err(AioError::ConfigError { .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml_str("identify_timeout_secs: soon"),
            Err(AioError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("torrent-aio.toml");
        std::fs::write(&toml_path, "group_name = \"T\"").unwrap();
        let yaml_path = dir.path().join("torrent-aio.yml");
        std::fs::write(&yaml_path, "group_name: Y").unwrap();

        assert_eq!(AppConfig::from_file(&toml_path).unwrap().group_name, "T");
        assert_eq!(AppConfig::from_file(&yaml_path).unwrap().group_name, "Y");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(AioError::ConfigError { .. })));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "source_type: HDTV").unwrap();

        let (config, source) = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.source_type, "HDTV");
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("TORRENT_AIO_GROUP_NAME", "ENV"),
                ("TORRENT_AIO_SKIP_LAYOUT", "yes"),
                ("TORRENT_AIO_IDENTIFY_TIMEOUT_SECS", "5"),
                ("TORRENT_AIO_UNKNOWN", "x"),
                ("PATH", "/usr/bin"),
            ]))
            .unwrap();

        assert_eq!(config.group_name, "ENV");
        assert!(config.skip_layout);
        assert_eq!(config.identify_timeout_secs, 5);
    }

    #[test]
    fn test_env_invalid_values() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_env(env(&[("TORRENT_AIO_NO_RENAME", "maybe")]))
            .is_err());
        assert!(config
            .apply_env(env(&[("TORRENT_AIO_IDENTIFY_TIMEOUT_SECS", "-1")]))
            .is_err());
    }

    #[test]
    fn test_precedence() {
        let mut config = AppConfig::from_toml_str("group_name = \"FILE\"\nsource_type = \"HDTV\"\n")
            .unwrap();
        config
            .apply_env(env(&[("TORRENT_AIO_GROUP_NAME", "ENV")]))
            .unwrap();
        config.apply_overrides(&ConfigOverrides {
            group_name: Some("CLI".to_string()),
            ..Default::default()
        });

        assert_eq!(config.group_name, "CLI");
        assert_eq!(config.source_type, "HDTV");
    }

    #[test]
    fn test_env_torrent_settings() {
        let mut config = AppConfig::default();
        assert!(!config.skip_torrent);
        assert!(config.announce_url.is_none());

        config
            .apply_env(env(&[
                ("TORRENT_AIO_SKIP_TORRENT", "true"),
                ("TORRENT_AIO_ANNOUNCE_URL", " https://tracker.example/announce "),
                ("TORRENT_AIO_PRIVATE_TORRENT", "1"),
            ]))
            .unwrap();
        assert!(config.skip_torrent);
        assert!(config.private_torrent);
        assert_eq!(
            config.announce_url.as_deref(),
            Some("https://tracker.example/announce")
        );

        config
            .apply_env(env(&[("TORRENT_AIO_ANNOUNCE_URL", "")]))
            .unwrap();
        assert!(config.announce_url.is_none());
    }

    #[test]
    fn test_torrent_settings_from_file_and_cli() {
        let mut config = AppConfig::from_yaml_str(
            "announce_url: udp://tracker.example:1337\nskip_torrent: true\n",
        )
        .unwrap();
        assert_eq!(config.announce_url.as_deref(), Some("udp://tracker.example:1337"));

        config.apply_overrides(&ConfigOverrides {
            skip_torrent: Some(false),
            announce_url: Some("https://other.example/announce".to_string()),
            ..Default::default()
        });
        assert!(!config.skip_torrent);
        assert_eq!(
            config.announce_url.as_deref(),
            Some("https://other.example/announce")
        );
    }

    #[test]
    fn test_validate_announce_url() {
        let config = AppConfig {
            announce_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate() {
        let config = AppConfig {
            identify_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_dir_for() {
        let config = AppConfig::default();
        assert_eq!(
            config.output_dir_for(Path::new("/films/movie.mkv")),
            PathBuf::from("/films")
        );
        assert_eq!(config.output_dir_for(Path::new("movie.mkv")), PathBuf::from("."));

        let config = AppConfig {
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        assert_eq!(config.output_dir_for(Path::new("/films/movie.mkv")), PathBuf::from("/out"));
    }

    #[test]
    fn test_search_paths_order() {
        let paths = default_search_paths();
        if let Some(first) = paths.first() {
            assert!(first.ends_with(".config/torrent-aio.toml"));
            assert_eq!(paths.len(), 6);
        }
    }
}
