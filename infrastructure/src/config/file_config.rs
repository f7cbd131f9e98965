//! Raw YAML configuration data types — the exact structure of the
//! project configuration file (`aicof.yaml` / `.aicof.yaml`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aicof_domain::registry::migrate_installed_skills;

/// The set of installed components, by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstalledComponents {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub workflows: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// The full project configuration document. Unknown keys are rejected on
/// both read (`deny_unknown_fields`) and write (there is no catch-all
/// field to round-trip them through).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFileConfig {
    pub version: String,
    pub registry: String,
    #[serde(default)]
    pub installed: InstalledComponents,
}

impl Default for ProjectFileConfig {
    fn default() -> Self {
        ProjectFileConfig {
            version: "1.0".to_string(),
            registry: "https://registry.aicof.dev".to_string(),
            installed: InstalledComponents::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigValueError {
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

impl ProjectFileConfig {
    /// Adds a language and its `<lang>-guide` skill together, keeping
    /// `installed.skills` in sync — see
    /// `aicof_domain::registry::migrate_installed_skills`.
    pub fn add_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if !self.installed.languages.contains(&language) {
            self.installed.languages.push(language);
        }
        migrate_installed_skills(&self.installed.languages, &mut self.installed.skills);
    }

    /// Removes a language and its corresponding skill.
    pub fn remove_language(&mut self, language: &str) {
        self.installed.languages.retain(|l| l != language);
        let skill = aicof_domain::registry::language_to_skill_name(language);
        self.installed.skills.retain(|s| s != &skill);
    }

    /// Reads a dotted key, rendering list-valued keys as a
    /// comma-separated string. Returns an error for any key outside the
    /// fixed set this config document actually has.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigValueError> {
        match key {
            "version" => Ok(self.version.clone()),
            "registry" => Ok(self.registry.clone()),
            "installed.languages" => Ok(self.installed.languages.join(",")),
            "installed.frameworks" => Ok(self.installed.frameworks.join(",")),
            "installed.workflows" => Ok(self.installed.workflows.join(",")),
            "installed.skills" => Ok(self.installed.skills.join(",")),
            other => Err(ConfigValueError::UnknownKey(other.to_string())),
        }
    }

    /// Writes a dotted key. List-valued keys accept a comma-separated
    /// string, split on `,` and trimmed. Setting `installed.languages`
    /// re-runs the language-to-skill migration.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigValueError> {
        match key {
            "version" => self.version = value.to_string(),
            "registry" => self.registry = value.to_string(),
            "installed.languages" => {
                self.installed.languages = split_csv(value);
                migrate_installed_skills(&self.installed.languages, &mut self.installed.skills);
            }
            "installed.frameworks" => self.installed.frameworks = split_csv(value),
            "installed.workflows" => self.installed.workflows = split_csv(value),
            "installed.skills" => self.installed.skills = split_csv(value),
            other => return Err(ConfigValueError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn split_csv(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}
