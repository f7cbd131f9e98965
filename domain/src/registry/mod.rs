//! Component Registry: the static catalogue of installable languages,
//! frameworks, workflows, and skills.
//!
//! This module owns the shape and lookup logic; the actual ~60 entries
//! are populated by `aicof_infrastructure::registry::catalog`, which is
//! read-only static data compiled into the binary — there is no global
//! mutable state here.

use std::collections::HashSet;

/// One entry in any of the four registry tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEntry {
    pub name: String,
    pub path: String,
    pub description: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl ComponentEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, description: impl Into<String>) -> Self {
        ComponentEntry {
            name: name.into(),
            path: path.into(),
            description: description.into(),
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// The sentinel value that, when present alone in a requested workflow
/// list, expands to every registered workflow.
pub const ALL_WORKFLOWS_SENTINEL: &str = "all";

/// The full static catalogue.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub languages: Vec<ComponentEntry>,
    pub frameworks: Vec<ComponentEntry>,
    pub workflows: Vec<ComponentEntry>,
    pub skills: Vec<ComponentEntry>,
    /// Paths always installed regardless of what the caller requests.
    pub core_files: Vec<String>,
}

fn find_by_name<'a>(entries: &'a [ComponentEntry], name: &str) -> Option<&'a ComponentEntry> {
    entries.iter().find(|e| e.name == name)
}

impl Registry {
    pub fn find_language(&self, name: &str) -> Option<&ComponentEntry> {
        find_by_name(&self.languages, name)
    }

    pub fn find_framework(&self, name: &str) -> Option<&ComponentEntry> {
        find_by_name(&self.frameworks, name)
    }

    pub fn find_workflow(&self, name: &str) -> Option<&ComponentEntry> {
        find_by_name(&self.workflows, name)
    }

    pub fn find_skill(&self, name: &str) -> Option<&ComponentEntry> {
        find_by_name(&self.skills, name)
    }

    /// Returns the union of `core_files` plus the paths of every
    /// requested language, framework, and workflow. The sentinel
    /// `"all"` workflow expands to every registered workflow name.
    pub fn get_component_paths(
        &self,
        languages: &[String],
        frameworks: &[String],
        workflows: &[String],
    ) -> Vec<String> {
        let mut paths: Vec<String> = self.core_files.clone();
        let mut seen: HashSet<String> = paths.iter().cloned().collect();

        let mut push = |path: &str, seen: &mut HashSet<String>, paths: &mut Vec<String>| {
            if seen.insert(path.to_string()) {
                paths.push(path.to_string());
            }
        };

        for lang in languages {
            if let Some(entry) = self.find_language(lang) {
                push(&entry.path, &mut seen, &mut paths);
            }
        }
        for fw in frameworks {
            if let Some(entry) = self.find_framework(fw) {
                push(&entry.path, &mut seen, &mut paths);
            }
        }

        let expand_all = workflows.iter().any(|w| w == ALL_WORKFLOWS_SENTINEL);
        if expand_all {
            for entry in &self.workflows {
                push(&entry.path, &mut seen, &mut paths);
            }
        } else {
            for wf in workflows {
                if let Some(entry) = self.find_workflow(wf) {
                    push(&entry.path, &mut seen, &mut paths);
                }
            }
        }

        paths
    }
}

/// `<lang>-guide` — the skill name a language's installation implies.
pub fn language_to_skill_name(lang: &str) -> String {
    format!("{lang}-guide")
}

/// Frameworks map to a skill of the same name.
pub fn framework_to_skill_name(framework: &str) -> String {
    framework.to_string()
}

/// Strips the trailing `-guide` suffix a language-derived skill name
/// carries; returns `None` for skill names that aren't language guides.
pub fn skill_to_language_name(skill: &str) -> Option<String> {
    skill.strip_suffix("-guide").map(|s| s.to_string())
}

/// Ensures every installed language has its `<lang>-guide` skill
/// present in `installed_skills`, adding any that are missing. Never
/// removes a skill — callers that remove a language are responsible for
/// removing its skill themselves. Idempotent: running it twice on the
/// same input makes no further change.
pub fn migrate_installed_skills(installed_languages: &[String], installed_skills: &mut Vec<String>) {
    for lang in installed_languages {
        let skill = language_to_skill_name(lang);
        if !installed_skills.iter().any(|s| s == &skill) {
            installed_skills.push(skill);
        }
    }
}
