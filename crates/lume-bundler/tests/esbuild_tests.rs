//! End-to-end tests for `EsbuildCompiler` against stand-in esbuild scripts.
//!
//! All scenarios live in one test function: writing an executable while
//! another test thread forks can fail with ETXTBSY, so nothing here runs in
//! parallel.

#![cfg(unix)]

use lume_bundler::{BuildMode, BuildOutcome, BuildPlan, Compiler, Diagnostic, EsbuildCompiler};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SUCCEEDING: &str = r#"#!/bin/sh
out=""
map=0
for a in "$@"; do
  case "$a" in
    --outfile=*) out="${a#--outfile=}" ;;
    --sourcemap) map=1 ;;
  esac
done
echo "console.log('built')" > "$out"
if [ "$map" = 1 ]; then echo '{"version":3}' > "$out.map"; fi
exit 0
"#;

const FAILING: &str = r#"#!/bin/sh
cat >&2 <<'LOG'
✘ [ERROR] Expected ";" but found "count"

    main.jsx:10:3:
      10 │   let x count
         ╵         ^

1 error
LOG
exit 1
"#;

const SILENT_FAILURE: &str = "#!/bin/sh\nexit 3\n";

fn install(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn test_esbuild_compiler_lifecycle() {
    let temp = TempDir::new().unwrap();
    let project = temp.path();
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("src/main.jsx"), "export const x = 1\n").unwrap();

    let tools = project.join("tools");
    fs::create_dir_all(&tools).unwrap();
    let ok = install(&tools, "esbuild-ok", SUCCEEDING);
    let bad = install(&tools, "esbuild-bad", FAILING);
    let silent = install(&tools, "esbuild-silent", SILENT_FAILURE);

    let plan = BuildPlan::new(project, "src/main.jsx", "dist");
    let artifact = project.join("dist/bundle.js");

    // Development success: bundle and source map are promoted.
    let compiler = EsbuildCompiler::new(plan.clone().with_esbuild(&ok));
    let outcome = compiler.compile(BuildMode::Development).await;
    assert_eq!(outcome, BuildOutcome::success(&artifact));
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "console.log('built')\n");
    assert!(project.join("dist/bundle.js.map").exists());
    assert!(!project.join("dist/.lume-staging/bundle.js").exists());

    // Failure: structured diagnostics, previous artifact left in place.
    fs::write(&artifact, "previous good bundle").unwrap();
    let compiler = EsbuildCompiler::new(plan.clone().with_esbuild(&bad));
    let outcome = compiler.compile(BuildMode::Development).await;
    assert_eq!(
        outcome.diagnostics(),
        &[Diagnostic::located(
            "main.jsx",
            10,
            3,
            "Expected \";\" but found \"count\""
        )]
    );
    assert!(outcome.error_payload().unwrap().starts_with("main.jsx:10:3"));
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "previous good bundle");

    // Failure without parseable output still yields one diagnostic.
    let compiler = EsbuildCompiler::new(plan.clone().with_esbuild(&silent));
    let outcome = compiler.compile(BuildMode::Production).await;
    assert_eq!(outcome.diagnostics().len(), 1);
    assert!(outcome.diagnostics()[0].message.contains("esbuild exited with"));
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "previous good bundle");

    // Production success drops the stale development source map.
    let compiler = EsbuildCompiler::new(plan.clone().with_esbuild(&ok));
    let outcome = compiler.compile(BuildMode::Production).await;
    assert!(outcome.is_success());
    assert!(!project.join("dist/bundle.js.map").exists());

    // Missing executable is a failure, not a panic.
    let compiler = EsbuildCompiler::new(plan.with_esbuild(tools.join("does-not-exist")));
    let outcome = compiler.compile(BuildMode::Development).await;
    assert_eq!(outcome.diagnostics().len(), 1);
    assert!(
        outcome.diagnostics()[0]
            .message
            .starts_with("Failed to launch esbuild")
    );
}
