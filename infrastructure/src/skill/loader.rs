//! Reads and validates `SKILL.md` files off disk: splits the YAML
//! front-matter from the body, parses it, and runs the domain-level
//! validation rules.

use std::path::Path;

use aicof_domain::skill::{validate_frontmatter, SkillFrontmatter, SkillInfo, SkillSubdirs};

#[derive(Debug, thiserror::Error)]
pub enum SkillLoadError {
    #[error("io error reading {0}: {1}")]
    Io(String, String),
    #[error("{0}: missing YAML front-matter delimited by '---'")]
    MissingFrontmatter(String),
    #[error("{0}: failed to parse front-matter: {1}")]
    InvalidYaml(String, String),
}

/// Splits `---\n...\n---\n` front-matter from the trailing body. Only
/// the first two `---` delimiter lines are significant; anything after
/// the second one is body text, including further `---` lines.
fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let mut start = None;
    let mut end = None;
    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if start.is_none() {
                start = Some(i);
            } else {
                end = Some(i);
                break;
            }
        }
    }
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return None,
    };

    let yaml = lines[start + 1..end].join("\n");
    let body = if end + 1 < lines.len() {
        lines[end + 1..].join("\n")
    } else {
        String::new()
    };
    Some((yaml, body))
}

/// Reads one skill directory: parses `<dir>/SKILL.md`, checks for the
/// `scripts/`, `references/`, and `assets/` convention subdirectories,
/// and runs every validation rule, collecting failures instead of
/// stopping at the first one.
pub fn load_skill_directory(dir: &Path) -> Result<SkillInfo, SkillLoadError> {
    let skill_file = dir.join("SKILL.md");
    let content = std::fs::read_to_string(&skill_file)
        .map_err(|e| SkillLoadError::Io(skill_file.display().to_string(), e.to_string()))?;

    let (yaml, _body) = split_frontmatter(&content)
        .ok_or_else(|| SkillLoadError::MissingFrontmatter(skill_file.display().to_string()))?;

    let frontmatter: SkillFrontmatter = serde_yaml::from_str(&yaml)
        .map_err(|e| SkillLoadError::InvalidYaml(skill_file.display().to_string(), e.to_string()))?;

    let directory_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let subdirs = SkillSubdirs {
        scripts: dir.join("scripts").is_dir(),
        references: dir.join("references").is_dir(),
        assets: dir.join("assets").is_dir(),
    };

    let errors = validate_frontmatter(&frontmatter, &directory_name);

    Ok(SkillInfo {
        frontmatter,
        directory_name,
        subdirs,
        errors,
    })
}

/// Scans `root` one level deep for skill directories: every
/// non-hidden subdirectory containing a `SKILL.md`. Directories
/// without one are silently skipped; directories whose `SKILL.md`
/// fails to parse are reported via `SkillInfo::errors` rather than
/// excluded, so a caller can surface the problem instead of the skill
/// vanishing without explanation.
pub fn scan_skills(root: &Path) -> Result<Vec<SkillInfo>, SkillLoadError> {
    let mut found = Vec::new();
    if !root.is_dir() {
        return Ok(found);
    }

    let entries = std::fs::read_dir(root)
        .map_err(|e| SkillLoadError::Io(root.display().to_string(), e.to_string()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
        if name.starts_with('.') {
            continue;
        }
        if !path.join("SKILL.md").exists() {
            continue;
        }
        match load_skill_directory(&path) {
            Ok(info) => found.push(info),
            Err(e) => found.push(SkillInfo {
                frontmatter: SkillFrontmatter {
                    name: name.clone(),
                    description: String::new(),
                    license: None,
                    compatibility: None,
                    allowed_tools: None,
                    metadata: None,
                },
                directory_name: name,
                subdirs: SkillSubdirs::default(),
                errors: vec![e.to_string()],
            }),
        }
    }

    found.sort_by(|a, b| a.directory_name.cmp(&b.directory_name));
    Ok(found)
}
