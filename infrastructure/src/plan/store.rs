//! JSON persistence for the plan document: write-tmp-then-rename atomic
//! saves, and a loader that tolerates a missing file (returning a fresh
//! empty plan) and numeric task ids, but fails loudly on anything else
//! malformed.

use std::fs;
use std::io;
use std::path::Path;

use aicof_application::ports::PlanRepository;
use aicof_domain::plan::{Plan, ProjectInfo};

/// Reads and writes `prd.json` with atomic-rename semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPlanStore;

impl JsonPlanStore {
    pub fn new() -> Self {
        JsonPlanStore
    }
}

impl PlanRepository for JsonPlanStore {
    /// A missing file is tolerated and yields a fresh, empty plan — the
    /// caller is responsible for treating that as "never initialized"
    /// where it matters. Numeric task ids are coerced to strings by
    /// `Task`'s deserialiser; any other malformed shape (bad JSON, wrong
    /// field types) surfaces a descriptive error rather than being
    /// silently papered over.
    fn load(&self, path: &Path) -> Result<Plan, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Plan::new(ProjectInfo::default()));
            }
            Err(e) => return Err(format!("failed to read plan at {}: {e}", path.display())),
        };
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse plan at {}: {e}", path.display()))
    }

    /// Writes to `path` with parent-tmp-rename: serialises to
    /// `path.tmp` in the same directory, then renames over `path`. On a
    /// failed rename the tmp file is removed rather than left behind.
    /// `updated_at` is refreshed and `progress` recomputed before
    /// writing, so a concurrent reader never observes a torn or stale
    /// write.
    fn save(&self, path: &Path, plan: &mut Plan) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }

        plan.recompute_progress();
        plan.project.updated_at = now_rfc3339();

        let serialized = serde_json::to_string_pretty(plan)
            .map_err(|e| format!("failed to serialise plan: {e}"))?;
        let serialized = format!("{serialized}\n");

        let tmp_path = tmp_path_for(path);
        let write_result = fs::write(&tmp_path, serialized)
            .map_err(|e| format!("failed to write {}: {e}", tmp_path.display()));
        if let Err(e) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(format!(
                "failed to rename {} to {}: {e}",
                tmp_path.display(),
                path.display()
            ));
        }

        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    std::path::PathBuf::from(tmp)
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aicof_domain::plan::{ProjectInfo, Task};

    fn project() -> ProjectInfo {
        ProjectInfo {
            name: "demo".to_string(),
            description: None,
            source_prd: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");
        let store = JsonPlanStore::new();

        let mut plan = Plan::new(project());
        plan.tasks.push(Task::new("1", "first"));
        store.save(&path, &mut plan).unwrap();

        let loaded = store.load(&path).unwrap();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, "1");
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("prd.json");
        let store = JsonPlanStore::new();
        let mut plan = Plan::new(project());
        store.save(&path, &mut plan).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_does_not_leak_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");
        let store = JsonPlanStore::new();
        let mut plan = Plan::new(project());
        store.save(&path, &mut plan).unwrap();
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn load_fails_loudly_on_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonPlanStore::new();
        assert!(store.load(&path).is_err());
    }

    #[test]
    fn load_tolerates_numeric_task_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");
        fs::write(
            &path,
            r#"{"version":"1.0","project":{"name":"demo","created_at":"t","updated_at":"t"},"tasks":[{"id":1,"title":"x"}]}"#,
        )
        .unwrap();
        let store = JsonPlanStore::new();
        let plan = store.load(&path).unwrap();
        assert_eq!(plan.tasks[0].id, "1");
    }

    #[test]
    fn load_tolerates_missing_file_returning_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prd.json");
        let store = JsonPlanStore::new();
        let plan = store.load(&path).unwrap();
        assert!(plan.tasks.is_empty());
        assert_eq!(plan.version, aicof_domain::plan::SCHEMA_VERSION);
    }
}
