//! `SKILL.md` loading and directory scanning.

mod loader;

pub use loader::{load_skill_directory, scan_skills, SkillLoadError};
