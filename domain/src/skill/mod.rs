//! Skill types and validation rules shared between the registry and the
//! infrastructure-level loader that actually reads `SKILL.md` files off
//! disk.

use serde::{Deserialize, Serialize};

const MAX_NAME_LEN: usize = 64;
const MAX_DESCRIPTION_LEN: usize = 1024;
const MAX_COMPATIBILITY_LEN: usize = 500;

/// The YAML front-matter document at the head of a `SKILL.md` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFrontmatter {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,
    #[serde(default, rename = "allowed-tools", skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Which optional convention subdirectories a skill directory has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillSubdirs {
    pub scripts: bool,
    pub references: bool,
    pub assets: bool,
}

/// Everything the loader found out about one skill. Validation errors are
/// collected here rather than propagated as a `Result` — the caller
/// decides whether a malformed skill is fatal or merely excluded.
#[derive(Debug, Clone)]
pub struct SkillInfo {
    pub frontmatter: SkillFrontmatter,
    pub directory_name: String,
    pub subdirs: SkillSubdirs,
    pub errors: Vec<String>,
}

impl SkillInfo {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a skill name: lowercase, at most 64 characters, made of
/// `[a-z0-9-]`, no leading/trailing/consecutive hyphens. The caller is
/// responsible for additionally checking the name matches the
/// directory's basename.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("skill name must not be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!(
            "skill name exceeds {MAX_NAME_LEN} characters: {name}"
        ));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(format!("skill name must not start or end with a hyphen: {name}"));
    }
    if name.contains("--") {
        return Err(format!("skill name must not contain consecutive hyphens: {name}"));
    }
    if !name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(format!(
            "skill name must be lowercase alphanumeric or hyphen: {name}"
        ));
    }
    Ok(())
}

/// Validates a skill's description: non-empty after trimming, at most
/// 1024 characters.
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("skill description must not be empty".to_string());
    }
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "skill description exceeds {MAX_DESCRIPTION_LEN} characters"
        ));
    }
    Ok(())
}

/// Validates the optional `compatibility` field: at most 500 characters.
pub fn validate_compatibility(compatibility: &str) -> Result<(), String> {
    if compatibility.len() > MAX_COMPATIBILITY_LEN {
        return Err(format!(
            "skill compatibility exceeds {MAX_COMPATIBILITY_LEN} characters"
        ));
    }
    Ok(())
}

/// Runs every field-level validation and the name/basename identity
/// check, collecting all problems rather than stopping at the first.
pub fn validate_frontmatter(frontmatter: &SkillFrontmatter, directory_name: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = validate_name(&frontmatter.name) {
        errors.push(e);
    } else if frontmatter.name != directory_name {
        errors.push(format!(
            "skill name '{}' does not match directory name '{}'",
            frontmatter.name, directory_name
        ));
    }

    if let Err(e) = validate_description(&frontmatter.description) {
        errors.push(e);
    }

    if let Some(compat) = &frontmatter.compatibility {
        if let Err(e) = validate_compatibility(compat) {
            errors.push(e);
        }
    }

    errors
}
