//! Tests for the build module

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{BuildEvent, BuildOptions, BuildUseCase};
use crate::application::fixture;
use crate::application::plan::BuildPlan;
use crate::config::Config;
use crate::domain::value_objects::TaskKind;
use crate::error::AssetlineError;
use crate::infrastructure::fs::LocalFs;

fn plan_for(root: &Path) -> Arc<BuildPlan> {
    Arc::new(BuildPlan::new(root, &Config::default()).unwrap())
}

fn snapshot_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in ignore::WalkBuilder::new(dir).standard_filters(false).build() {
        let entry = entry.unwrap();
        if entry.file_type().is_some_and(|t| t.is_file()) {
            let rel = entry.path().strip_prefix(dir).unwrap().display().to_string();
            files.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    files
}

#[tokio::test]
async fn full_build_produces_rewritten_output() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let events = Mutex::new(Vec::new());

    let report = BuildUseCase::new(LocalFs::new())
        .execute(plan.clone(), &BuildOptions::new(), |e| {
            events.lock().unwrap().push(e)
        })
        .await
        .unwrap();

    assert_eq!(report.tasks.len(), 5);
    assert_eq!(report.tasks[0].task, TaskKind::Styles);
    assert!(report.rewrite.is_some());
    // 1 stylesheet + 2 scripts + 1 html + 2 assets + 13 libraries
    assert_eq!(report.files_written(), 19);

    let html = fs::read_to_string(plan.html_output()).unwrap();
    assert!(!html.contains("=\"node_modules/"));
    assert!(html.ends_with("<script src=\"src/scripts/script.min.js\"></script></body></html>"));

    let events = events.into_inner().unwrap();
    assert!(matches!(events.first(), Some(BuildEvent::Cleaned { .. })));
    assert!(matches!(
        events.last(),
        Some(BuildEvent::BuildComplete { success: true, files: 19, .. })
    ));
}

#[tokio::test]
async fn build_removes_stale_files() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    fixture::write(project.path(), "dist/old/leftover.js", "stale");

    BuildUseCase::new(LocalFs::new())
        .execute(plan.clone(), &BuildOptions::new(), |_| {})
        .await
        .unwrap();

    assert!(!plan.out_dir.join("old").exists());
}

#[tokio::test]
async fn repeated_builds_are_byte_identical() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let use_case = BuildUseCase::new(LocalFs::new());

    use_case.execute(plan.clone(), &BuildOptions::new(), |_| {}).await.unwrap();
    let first = snapshot_tree(&plan.out_dir);
    use_case.execute(plan.clone(), &BuildOptions::new(), |_| {}).await.unwrap();
    let second = snapshot_tree(&plan.out_dir);

    assert_eq!(first, second);
}

#[tokio::test]
async fn failing_task_skips_rewrite() {
    let project = fixture::project();
    fixture::write(project.path(), "src/scripts/broken.js", "let s = \"open;\n");
    let plan = plan_for(project.path());
    let events = Mutex::new(Vec::new());

    let err = BuildUseCase::new(LocalFs::new())
        .execute(plan.clone(), &BuildOptions::new(), |e| {
            events.lock().unwrap().push(e)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AssetlineError::Script { .. }));
    let events = events.into_inner().unwrap();
    assert!(events.iter().any(|e| matches!(e, BuildEvent::RewriteSkipped)));
    assert!(events
        .iter()
        .any(|e| matches!(e, BuildEvent::TaskFailed { task: TaskKind::Scripts, .. })));
    // Other tasks still ran to completion; the document was not rewritten.
    let html = fs::read_to_string(plan.html_output()).unwrap();
    assert!(html.contains("node_modules/"));
}

#[tokio::test]
async fn all_failures_are_reported_first_in_task_order() {
    let project = fixture::project();
    fs::remove_file(project.path().join("index.html")).unwrap();
    fixture::write(project.path(), "src/styles/broken.scss", ".a { color: $nope; }");
    let plan = plan_for(project.path());
    let failed = Mutex::new(Vec::new());

    let err = BuildUseCase::new(LocalFs::new())
        .execute(plan, &BuildOptions::new(), |e| {
            if let BuildEvent::TaskFailed { task, .. } = e {
                failed.lock().unwrap().push(task);
            }
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AssetlineError::Stylesheet { .. }));
    let mut failed = failed.into_inner().unwrap();
    failed.sort_by_key(|t| t.name());
    assert_eq!(failed, vec![TaskKind::Html, TaskKind::Styles]);
}

#[tokio::test]
async fn single_task_neither_cleans_nor_rewrites() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    fixture::write(project.path(), "dist/keep.txt", "keep");

    let report = BuildUseCase::new(LocalFs::new())
        .execute(plan.clone(), &BuildOptions::single(TaskKind::Html), |_| {})
        .await
        .unwrap();

    assert!(report.cleaned.is_none());
    assert!(report.rewrite.is_none());
    assert!(plan.out_dir.join("keep.txt").exists());
    let html = fs::read_to_string(plan.html_output()).unwrap();
    assert!(html.contains("<!-- build:js -->"));
}

#[test]
fn build_event_to_json_includes_command() {
    let json = BuildEvent::TaskComplete {
        task: TaskKind::Dependencies,
        files: 13,
        duration_ms: 4,
    }
    .to_json();
    assert!(json.contains("\"event\":\"task_complete\""));
    assert!(json.contains("\"task\":\"dependencies\""));
    assert!(json.contains("\"command\":\"build\""));
}
