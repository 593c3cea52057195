//! Configuration management for Sprig.
//!
//! Parses `sprig.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `content.source` supports `${VAR}`, `${VAR:-default}` and a leading `~`.

mod expand;

use serde::Deserialize;
use sprig_tree::Blueprints;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content snapshot path.
    pub content_source: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sprig.toml";

/// Default content snapshot filename, relative to the config directory.
const DEFAULT_SOURCE: &str = "content.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Blueprints keyed by template name.
    pub blueprints: Blueprints,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ContentConfigRaw {
    source: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Content snapshot file.
    pub source: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source`").
        field: String,
        /// Error message (e.g., "${`CONTENT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sprig.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source) = &settings.content_source {
            self.content_resolved.source.clone_from(source);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            blueprints: Blueprints::new(),
            content_resolved: ContentConfig {
                source: base.join(DEFAULT_SOURCE),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(source) = &self.content.source
            && source.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "content.source cannot be empty".to_owned(),
            ));
        }

        if self.blueprints.iter().any(|(template, _)| template.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "blueprint template names cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source) = self.content.source {
            self.content.source = Some(expand::expand_env(source, "content.source")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source = self.content.source.as_deref().unwrap_or(DEFAULT_SOURCE);
        self.content_resolved = ContentConfig {
            source: config_dir.join(source),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sprig_tree::{FilterSet, SortSpec};

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/test/content.yaml")
        );
        assert!(config.blueprints.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.content.source.is_none());
        assert!(config.blueprints.is_empty());
    }

    #[test]
    fn test_parse_blueprints() {
        let toml = r#"
[blueprints.article]
title = "Article"
cycle = { status = "listed", template = ["article", "note"], sortBy = "num desc" }

[blueprints.secret]
options = { read = false }
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let article = config.blueprints.get("article").unwrap();
        assert_eq!(article.title.as_deref(), Some("Article"));
        let cycle = article.cycle.as_ref().unwrap();
        assert_eq!(cycle.status, Some(FilterSet::one("listed")));
        assert_eq!(
            cycle.template,
            Some(["article", "note"].into_iter().collect())
        );
        assert_eq!(cycle.sort_by, Some("num desc".parse::<SortSpec>().unwrap()));

        assert!(!config.blueprints.get("secret").unwrap().options.read);
    }

    #[test]
    fn test_parse_rejects_bad_sort_spec() {
        let toml = r#"
[blueprints.article]
cycle = { sortBy = "num sideways" }
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_section() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
source = "snapshots/site.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/project/snapshots/site.yaml")
        );
    }

    #[test]
    fn test_resolve_paths_absolute_source() {
        let toml = r#"
[content]
source = "/data/site.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/data/site.yaml")
        );
    }

    #[test]
    fn test_apply_cli_settings_content_source() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            content_source: Some(PathBuf::from("/custom/site.yaml")),
        });

        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/custom/site.yaml")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/test/content.yaml")
        );
    }

    #[test]
    fn test_expand_env_vars_content_source() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SPRIG_TEST_SOURCE", "live.yaml");
        }

        let toml = r#"
[content]
source = "${SPRIG_TEST_SOURCE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.content.source.as_deref(), Some("live.yaml"));

        unsafe {
            std::env::remove_var("SPRIG_TEST_SOURCE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SPRIG_TEST_NOT_SET");
        }

        let toml = r#"
[content]
source = "${SPRIG_TEST_NOT_SET}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "content.source"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_source() {
        let config: Config = toml::from_str("[content]\nsource = \"  \"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.source"));
    }

    #[test]
    fn test_validate_empty_blueprint_name() {
        let config: Config = toml::from_str("[blueprints.\"\"]\ntitle = \"Nameless\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_cycle_list_is_kept() {
        let toml = r"
[blueprints.article]
cycle = { template = [] }
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        let cycle = config.blueprints.get("article").unwrap().cycle.as_ref().unwrap();
        assert!(cycle.template.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[content]\nsource = \"site.yaml\"\n\n[blueprints.article]\ncycle = { status = \"all\" }\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.content_resolved.source, dir.path().join("site.yaml"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.blueprints.len(), 1);
    }

    #[test]
    fn test_load_with_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content]\nsource = \"site.yaml\"\n").unwrap();

        let settings = CliSettings {
            content_source: Some(PathBuf::from("/elsewhere.yaml")),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(
            config.content_resolved.source,
            PathBuf::from("/elsewhere.yaml")
        );
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
