//! The built-in component catalogue: every language, framework, and
//! workflow guide this tool knows how to install, plus the skills they
//! imply and the files every project gets regardless of selection.
//!
//! All of this is static data compiled into the binary — there is no
//! network fetch and no mutable registry state. A project's installed
//! subset lives in its `aicof.yaml`, not here.

use aicof_domain::registry::{ComponentEntry, Registry};

const LANGUAGES: &[(&str, &str, &str)] = &[
    ("rust", "guides/languages/rust.md", "Rust idioms, cargo workspace layout, error handling conventions"),
    ("typescript", "guides/languages/typescript.md", "TypeScript strictness, module resolution, tsconfig defaults"),
    ("javascript", "guides/languages/javascript.md", "Modern JavaScript, ESM, Node version targeting"),
    ("python", "guides/languages/python.md", "Python packaging, typing, virtualenv conventions"),
    ("go", "guides/languages/go.md", "Go module layout, error wrapping, gofmt conventions"),
    ("java", "guides/languages/java.md", "Java project layout, build tool conventions"),
    ("kotlin", "guides/languages/kotlin.md", "Kotlin idioms and Gradle conventions"),
    ("csharp", "guides/languages/csharp.md", "C# project layout and nullable reference conventions"),
    ("cpp", "guides/languages/cpp.md", "Modern C++ conventions and CMake layout"),
    ("c", "guides/languages/c.md", "C project conventions and build tooling"),
    ("ruby", "guides/languages/ruby.md", "Ruby gem and Bundler conventions"),
    ("php", "guides/languages/php.md", "PHP Composer conventions"),
    ("swift", "guides/languages/swift.md", "Swift package manager conventions"),
    ("scala", "guides/languages/scala.md", "Scala sbt conventions"),
    ("elixir", "guides/languages/elixir.md", "Elixir mix project conventions"),
    ("haskell", "guides/languages/haskell.md", "Haskell cabal/stack conventions"),
    ("dart", "guides/languages/dart.md", "Dart and Flutter package conventions"),
    ("lua", "guides/languages/lua.md", "Lua project conventions"),
    ("shell", "guides/languages/shell.md", "POSIX shell scripting conventions"),
    ("sql", "guides/languages/sql.md", "SQL schema and migration conventions"),
    ("zig", "guides/languages/zig.md", "Zig build system conventions"),
];

const FRAMEWORKS: &[(&str, &str, &str)] = &[
    ("axum", "guides/frameworks/axum.md", "Axum routing, extractors, and middleware conventions"),
    ("actix", "guides/frameworks/actix.md", "Actix-web service and middleware conventions"),
    ("rocket", "guides/frameworks/rocket.md", "Rocket routing and fairings"),
    ("react", "guides/frameworks/react.md", "React component and hooks conventions"),
    ("vue", "guides/frameworks/vue.md", "Vue single-file component conventions"),
    ("svelte", "guides/frameworks/svelte.md", "Svelte component conventions"),
    ("nextjs", "guides/frameworks/nextjs.md", "Next.js app-router conventions"),
    ("nuxt", "guides/frameworks/nuxt.md", "Nuxt conventions"),
    ("express", "guides/frameworks/express.md", "Express middleware and routing conventions"),
    ("fastify", "guides/frameworks/fastify.md", "Fastify plugin conventions"),
    ("nestjs", "guides/frameworks/nestjs.md", "NestJS module and provider conventions"),
    ("django", "guides/frameworks/django.md", "Django app layout and ORM conventions"),
    ("flask", "guides/frameworks/flask.md", "Flask blueprint conventions"),
    ("fastapi", "guides/frameworks/fastapi.md", "FastAPI routing and dependency conventions"),
    ("rails", "guides/frameworks/rails.md", "Rails MVC conventions"),
    ("spring", "guides/frameworks/spring.md", "Spring Boot conventions"),
    ("gin", "guides/frameworks/gin.md", "Gin routing conventions"),
    ("echo", "guides/frameworks/echo.md", "Echo routing conventions"),
    ("laravel", "guides/frameworks/laravel.md", "Laravel conventions"),
    ("symfony", "guides/frameworks/symfony.md", "Symfony conventions"),
    ("dotnet", "guides/frameworks/dotnet.md", "ASP.NET Core conventions"),
    ("flutter", "guides/frameworks/flutter.md", "Flutter widget conventions"),
    ("android", "guides/frameworks/android.md", "Android app module conventions"),
    ("tauri", "guides/frameworks/tauri.md", "Tauri desktop app conventions"),
    ("electron", "guides/frameworks/electron.md", "Electron main/renderer conventions"),
    ("sveltekit", "guides/frameworks/sveltekit.md", "SvelteKit routing conventions"),
    ("remix", "guides/frameworks/remix.md", "Remix loader/action conventions"),
    ("solidjs", "guides/frameworks/solidjs.md", "SolidJS reactivity conventions"),
    ("tokio", "guides/frameworks/tokio.md", "Tokio async runtime conventions"),
    ("graphql", "guides/frameworks/graphql.md", "GraphQL schema and resolver conventions"),
    ("grpc", "guides/frameworks/grpc.md", "gRPC service conventions"),
    ("terraform", "guides/frameworks/terraform.md", "Terraform module conventions"),
    ("kubernetes", "guides/frameworks/kubernetes.md", "Kubernetes manifest conventions"),
];

const WORKFLOWS: &[(&str, &str, &str)] = &[
    ("release", "workflows/release.md", "Cut a release: changelog, version bump, tag"),
    ("hotfix", "workflows/hotfix.md", "Patch production without carrying unrelated changes"),
    ("code-review", "workflows/code-review.md", "Review a diff against correctness and style"),
    ("bug-triage", "workflows/bug-triage.md", "Reproduce, isolate, and prioritize a bug report"),
    ("refactor", "workflows/refactor.md", "Restructure code without changing behavior"),
    ("onboarding", "workflows/onboarding.md", "Orient a new contributor in an unfamiliar repo"),
    ("migration", "workflows/migration.md", "Move a codebase across a breaking dependency change"),
    ("dependency-upgrade", "workflows/dependency-upgrade.md", "Bump a dependency and resolve fallout"),
    ("incident-response", "workflows/incident-response.md", "Triage and mitigate a live incident"),
    ("api-design", "workflows/api-design.md", "Design a new API surface before implementing it"),
    ("test-coverage", "workflows/test-coverage.md", "Close gaps in test coverage for a module"),
    ("performance-audit", "workflows/performance-audit.md", "Profile and address a performance regression"),
    ("security-review", "workflows/security-review.md", "Review a change for common vulnerability classes"),
    ("documentation", "workflows/documentation.md", "Write or refresh user-facing documentation"),
    ("deprecation", "workflows/deprecation.md", "Retire a feature without breaking existing callers"),
];

const CORE_FILES: &[&str] = &["CLAUDE.md", "guides/core/commit-conventions.md", "guides/core/quality-checks.md"];

fn entries_from(table: &[(&str, &str, &str)]) -> Vec<ComponentEntry> {
    table
        .iter()
        .map(|(name, path, description)| ComponentEntry::new(*name, *path, *description))
        .collect()
}

fn skill_entries() -> Vec<ComponentEntry> {
    LANGUAGES
        .iter()
        .map(|(name, _, description)| {
            let skill_name = aicof_domain::registry::language_to_skill_name(name);
            ComponentEntry::new(
                skill_name.clone(),
                format!("skills/{skill_name}/SKILL.md"),
                description.to_string(),
            )
            .with_category("language-guide")
        })
        .collect()
}

/// Builds the full static registry. Cheap enough to call once at
/// startup; callers that need it repeatedly should cache the result.
pub fn build_registry() -> Registry {
    Registry {
        languages: entries_from(LANGUAGES),
        frameworks: entries_from(FRAMEWORKS),
        workflows: entries_from(WORKFLOWS),
        skills: skill_entries(),
        core_files: CORE_FILES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_common_languages_and_frameworks() {
        let registry = build_registry();
        assert!(registry.find_language("rust").is_some());
        assert!(registry.find_framework("axum").is_some());
        assert!(registry.find_workflow("release").is_some());
    }

    #[test]
    fn every_language_has_a_matching_guide_skill() {
        let registry = build_registry();
        for (name, _, _) in LANGUAGES {
            let skill_name = aicof_domain::registry::language_to_skill_name(name);
            assert!(
                registry.find_skill(&skill_name).is_some(),
                "missing skill entry for {name}"
            );
        }
    }

    #[test]
    fn core_files_are_always_present() {
        let registry = build_registry();
        assert!(registry.core_files.contains(&"CLAUDE.md".to_string()));
    }

    #[test]
    fn component_names_are_unique_within_each_table() {
        let registry = build_registry();
        for table in [&registry.languages, &registry.frameworks, &registry.workflows] {
            let mut names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), before, "duplicate component name found");
        }
    }
}
