//! Writes the two prompt files a project gets once at `init` time.
//!
//! Prompt files are generated from [`PromptContext`] and never
//! auto-refreshed afterward — a project that edits its
//! `.claude/auto/prompt.md` by hand keeps that edit across runs.

use std::path::{Path, PathBuf};

use aicof_domain::agent::{render_discovery_prompt, render_implementation_prompt, PromptContext};

pub const IMPLEMENTATION_PROMPT_FILENAME: &str = "prompt.md";
pub const DISCOVERY_PROMPT_FILENAME: &str = "discovery-prompt.md";

pub struct PromptFilePaths {
    pub implementation: PathBuf,
    pub discovery: PathBuf,
}

pub fn prompt_file_paths(project_dir: &Path) -> PromptFilePaths {
    let auto_dir = project_dir.join(".claude").join("auto");
    PromptFilePaths {
        implementation: auto_dir.join(IMPLEMENTATION_PROMPT_FILENAME),
        discovery: auto_dir.join(DISCOVERY_PROMPT_FILENAME),
    }
}

/// Writes both prompt files if they do not already exist. Returns
/// which of the two were actually written, so an `init` command can
/// report what it did without overwriting a project's customizations.
pub fn write_prompt_files_if_absent(
    project_dir: &Path,
    ctx: &PromptContext,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let paths = prompt_file_paths(project_dir);
    let mut written = Vec::new();

    if let Some(parent) = paths.implementation.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !paths.implementation.exists() {
        std::fs::write(&paths.implementation, render_implementation_prompt(ctx))?;
        written.push(paths.implementation.clone());
    }

    if !paths.discovery.exists() {
        std::fs::write(&paths.discovery, render_discovery_prompt(ctx))?;
        written.push(paths.discovery.clone());
    }

    Ok(written)
}
