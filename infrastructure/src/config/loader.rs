//! Layered project configuration loading: built-in defaults, then an
//! optional global file, then the project file, then an explicit path if
//! the caller names one.

use std::path::{Path, PathBuf};

use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use super::file_config::ProjectFileConfig;

const PROJECT_FILE_CANDIDATES: &[&str] = &["aicof.yaml", ".aicof.yaml"];

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),
}

/// Merges configuration sources in ascending priority:
/// defaults → global file (`$XDG_CONFIG_HOME/aicof/config.yaml`) →
/// project file (`aicof.yaml` or `.aicof.yaml`) → an explicit path, when
/// given.
pub struct ConfigLoader {
    project_dir: PathBuf,
    explicit_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        ConfigLoader {
            project_dir: project_dir.into(),
            explicit_path: None,
        }
    }

    pub fn with_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aicof").join("config.yaml"))
    }

    /// Returns the project config file path that would be used, whether
    /// or not it currently exists — `aicof.yaml` is preferred over
    /// `.aicof.yaml` when both are absent; if one exists it is used.
    pub fn project_config_path(&self) -> PathBuf {
        for candidate in PROJECT_FILE_CANDIDATES {
            let path = self.project_dir.join(candidate);
            if path.exists() {
                return path;
            }
        }
        self.project_dir.join(PROJECT_FILE_CANDIDATES[0])
    }

    /// Lists, in priority order, every source this loader would merge —
    /// useful for diagnostics (`aicof config sources`-style output).
    pub fn print_config_sources(&self) -> Vec<String> {
        let mut sources = vec!["built-in defaults".to_string()];
        if let Some(global) = Self::global_config_path() {
            sources.push(format!("global: {}", global.display()));
        }
        sources.push(format!("project: {}", self.project_config_path().display()));
        if let Some(explicit) = &self.explicit_path {
            sources.push(format!("explicit: {}", explicit.display()));
        }
        sources
    }

    pub fn load(&self) -> Result<ProjectFileConfig, ConfigLoadError> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(ProjectFileConfig::default()));

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                figment = figment.merge(Yaml::file(global));
            }
        }

        let project_path = self.project_config_path();
        if project_path.exists() {
            figment = figment.merge(Yaml::file(project_path));
        }

        if let Some(explicit) = &self.explicit_path {
            figment = figment.merge(Yaml::file(explicit));
        }

        Ok(figment.extract()?)
    }
}

/// Writes the config document to `path` as YAML, creating parent
/// directories as needed.
pub fn write_config(path: &Path, config: &ProjectFileConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(config).map_err(|e| format!("failed to serialise config: {e}"))?;
    std::fs::write(path, yaml).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults_when_no_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aicof.yaml"),
            "version: \"2.0\"\nregistry: \"https://example.test\"\n",
        )
        .unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.version, "2.0");
        assert_eq!(config.registry, "https://example.test");
    }

    #[test]
    fn dotfile_variant_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".aicof.yaml"),
            "version: \"3.0\"\nregistry: \"https://example.test\"\n",
        )
        .unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.version, "3.0");
    }

    #[test]
    fn write_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aicof.yaml");
        let mut config = ProjectFileConfig::default();
        config.add_language("rust");
        write_config(&path, &config).unwrap();

        let loader = ConfigLoader::new(dir.path());
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.installed.languages, vec!["rust".to_string()]);
    }
}
