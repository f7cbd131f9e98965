//! Use-case glue for each subcommand: resolve paths, build adapters,
//! call into `aicof-application`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use aicof_application::config::LoopConfigResolver;
use aicof_application::ports::{IterationCallbacks, PlanRepository};
use aicof_application::use_cases::{run_loop, RunPaths};
use aicof_domain::agent::{AgentTool, PromptContext};
use aicof_domain::orchestration::IterationKind;
use aicof_domain::plan::{Plan, ProjectInfo};
use aicof_infrastructure::agent::{EnvAuthChecker, SubprocessAgentInvoker};
use aicof_infrastructure::config::{write_config, ProjectFileConfig};
use aicof_infrastructure::plan::JsonPlanStore;
use aicof_infrastructure::progress::FileProgressLog;
use aicof_infrastructure::prompt::write_prompt_files_if_absent;

fn plan_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".claude").join("auto").join("prd.json")
}

fn progress_log_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".claude").join("auto").join("progress.log")
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn init(project_dir: PathBuf, name: Option<String>, ai_tool: String, pilot_mode: bool) -> Result<()> {
    AgentTool::parse(&ai_tool).context("unknown --ai-tool")?;
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("creating project directory {}", project_dir.display()))?;

    let project_name = name.unwrap_or_else(|| {
        project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    });

    let file_config = ProjectFileConfig::default();
    write_config(&project_dir.join("aicof.yaml"), &file_config)
        .map_err(anyhow::Error::msg)
        .context("writing aicof.yaml")?;

    let now = now_rfc3339();
    let mut plan = Plan::new(ProjectInfo {
        name: project_name,
        description: None,
        source_prd: None,
        created_at: now.clone(),
        updated_at: now,
    });
    plan.config.ai_tool = ai_tool;
    plan.config.pilot_mode = pilot_mode;

    let store = JsonPlanStore::default();
    store
        .save(&plan_path(&project_dir), &mut plan)
        .map_err(anyhow::Error::msg)
        .context("writing prd.json")?;

    let prompt_ctx = PromptContext {
        quality_checks: plan.config.quality_checks.clone(),
        max_discovery_tasks: plan.config.max_discovery_tasks,
        focus: None,
    };
    let written = write_prompt_files_if_absent(&project_dir, &prompt_ctx).context("writing prompt files")?;

    println!("Initialized project at {}", project_dir.display());
    for path in written {
        println!("  wrote {}", path.display());
    }
    Ok(())
}

pub fn run(project_dir: PathBuf) -> Result<()> {
    let store = JsonPlanStore::default();
    let plan = store
        .load(&plan_path(&project_dir))
        .map_err(anyhow::Error::msg)
        .context("loading prd.json; run `aicof init` first")?;

    let config = LoopConfigResolver::resolve(project_dir.clone(), &plan.config)?;

    let paths = RunPaths {
        plan_path: plan_path(&project_dir),
        implementation_prompt_path: project_dir.join(".claude").join("auto").join("prompt.md"),
        discovery_prompt_path: project_dir.join(".claude").join("auto").join("discovery-prompt.md"),
    };

    let invoker = SubprocessAgentInvoker::default();
    let auth_checker = EnvAuthChecker::default();
    let progress = FileProgressLog::new(progress_log_path(&project_dir))
        .context("opening progress log")?;

    let callbacks = IterationCallbacks {
        on_iter_start: Some(Box::new(|iter, kind| {
            let label = match kind {
                IterationKind::Implementation => "implementation",
                IterationKind::Discovery => "discovery",
            };
            println!("iteration {iter}: starting {label}");
        })),
        on_iter_end: Some(Box::new(|iter, err| match err {
            Some(e) => println!("iteration {iter}: failed ({e})"),
            None => println!("iteration {iter}: done"),
        })),
    };

    run_loop(
        &config,
        &paths,
        &store,
        &invoker,
        &auth_checker,
        &progress,
        &callbacks,
        now_rfc3339,
    )?;

    Ok(())
}

pub fn status(project_dir: PathBuf) -> Result<()> {
    let store = JsonPlanStore::default();
    let plan = store
        .load(&plan_path(&project_dir))
        .map_err(anyhow::Error::msg)
        .context("loading prd.json; run `aicof init` first")?;

    println!("project: {}", plan.project.name);
    println!("status:  {:?}", plan.progress.status);
    println!(
        "tasks:   {}/{} completed",
        plan.progress.completed_tasks, plan.progress.total_tasks
    );
    println!("iterations run: {}", plan.progress.total_iterations_run);
    if let Some(at) = &plan.progress.last_iteration_at {
        println!("last iteration at: {at}");
    }
    Ok(())
}
