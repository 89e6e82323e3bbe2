//! Tests for the watch module

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::event::{WatchEvent, WatchOptions, WatcherState, DEBOUNCE_MS};
use super::registry::{ContentTracker, WatchRegistry};
use super::use_case::WatchUseCase;
use crate::application::fixture;
use crate::application::plan::BuildPlan;
use crate::application::tasks::run_task;
use crate::config::Config;
use crate::domain::value_objects::TaskKind;
use crate::infrastructure::fs::LocalFs;

fn plan_for(root: &std::path::Path) -> Arc<BuildPlan> {
    Arc::new(BuildPlan::new(root, &Config::default()).unwrap())
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        project: "/site".to_string(),
        watching: vec!["index.html → html".to_string()],
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"project\":\"/site\""));
    assert!(json.contains("\"command\":\"watch\""));
}

#[test]
fn test_watch_event_to_json_task_failed() {
    let event = WatchEvent::TaskFailed {
        task: TaskKind::Styles,
        kind: "stylesheet".to_string(),
        message: "Undefined \"variable\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"task_failed\""));
    assert!(json.contains("\"task\":\"styles\""));
    assert!(json.contains("\\\"variable\\\""));
}

#[test]
fn test_watch_event_to_json_shutdown() {
    let json = WatchEvent::Shutdown.to_json();
    assert!(json.contains("\"event\":\"shutdown\""));
}

// === WatcherState tests ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::default();

    assert!(!state.should_run());

    state.add_change(PathBuf::from("index.html"));
    assert!(!state.should_run());

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 20));
    assert!(state.should_run());
}

#[test]
fn test_watcher_state_coalesce_changes() {
    let mut state = WatcherState::new(Duration::from_millis(0));

    state.add_change(PathBuf::from("src/styles/b.scss"));
    state.add_change(PathBuf::from("src/styles/a.scss"));
    state.add_change(PathBuf::from("src/styles/b.scss"));

    let changes = state.take_changes();
    assert_eq!(
        changes,
        vec![
            PathBuf::from("src/styles/a.scss"),
            PathBuf::from("src/styles/b.scss")
        ]
    );
    assert!(state.take_changes().is_empty());
    assert!(!state.should_run());
}

// === Registry tests ===

#[test]
fn test_registry_maps_inputs_to_tasks() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let registry = WatchRegistry::from_plan(&plan).unwrap();
    let root = &plan.project_root;

    assert_eq!(
        registry.tasks_for(&root.join("src/styles/styles.scss")),
        vec![TaskKind::Styles]
    );
    assert_eq!(registry.tasks_for(&root.join("index.html")), vec![TaskKind::Html]);
    assert_eq!(
        registry.tasks_for(&root.join("node_modules/jquery/dist/jquery.min.js")),
        vec![TaskKind::Dependencies]
    );
    assert_eq!(
        registry.tasks_for(&root.join("src/scripts/menu.js")),
        vec![TaskKind::Scripts]
    );
}

#[test]
fn test_registry_ignores_assets_and_output() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let registry = WatchRegistry::from_plan(&plan).unwrap();

    assert!(registry
        .tasks_for(&plan.project_root.join("images/icons/cart.svg"))
        .is_empty());
    assert!(registry.tasks_for(&plan.out_dir.join("index.html")).is_empty());
    assert_eq!(registry.describe().len(), 4);
}

#[test]
fn test_content_tracker_filters_identical_saves() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let registry = WatchRegistry::from_plan(&plan).unwrap();
    let mut tracker = ContentTracker::new();
    tracker.prime(&registry);

    let script = plan.project_root.join("src/scripts/menu.js");
    assert!(!tracker.observe(&script));

    fs::write(&script, "function toggle(menu) { return menu; }\n").unwrap();
    assert!(tracker.observe(&script));
    assert!(!tracker.observe(&script));

    fs::remove_file(&script).unwrap();
    assert!(tracker.observe(&script));
}

// === Use case tests ===

#[test]
fn test_process_changes_reruns_owning_task_only() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let use_case = WatchUseCase::new(WatchOptions::new(plan.clone())).unwrap();
    let events = Mutex::new(Vec::new());

    use_case.process_changes(&[plan.project_root.join("src/scripts/menu.js")], &|e| {
        events.lock().unwrap().push(e)
    });

    let events = events.into_inner().unwrap();
    assert!(matches!(&events[0], WatchEvent::FileChanged { path } if path == "src/scripts/menu.js"));
    assert!(matches!(events[1], WatchEvent::TaskStarted { task: TaskKind::Scripts }));
    assert!(matches!(events[2], WatchEvent::TaskComplete { task: TaskKind::Scripts, files: 2, .. }));
    assert_eq!(events.len(), 3);
    assert!(plan.out_dir.join("src/scripts/menu.min.js").is_file());
    assert!(!plan.out_dir.join("index.html").exists());
}

#[test]
fn test_process_changes_reports_failure_and_continues() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let use_case = WatchUseCase::new(WatchOptions::new(plan.clone())).unwrap();
    fixture::write(project.path(), "src/styles/styles.scss", ".a { color: $nope; }");
    let events = Mutex::new(Vec::new());

    use_case.process_changes(
        &[
            plan.project_root.join("src/styles/styles.scss"),
            plan.project_root.join("index.html"),
        ],
        &|e| events.lock().unwrap().push(e),
    );

    let events = events.into_inner().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, WatchEvent::TaskFailed { task: TaskKind::Styles, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, WatchEvent::TaskComplete { task: TaskKind::Html, .. })));
}

#[test]
fn test_process_changes_rewrites_when_enabled() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    run_task(TaskKind::Dependencies, &plan, &LocalFs::new()).unwrap();
    let use_case =
        WatchUseCase::new(WatchOptions::new(plan.clone()).with_rewrite(true)).unwrap();
    let events = Mutex::new(Vec::new());

    use_case.process_changes(&[plan.project_root.join("index.html")], &|e| {
        events.lock().unwrap().push(e)
    });

    let events = events.into_inner().unwrap();
    assert!(matches!(events.last(), Some(WatchEvent::RewriteComplete { .. })));
    let html = fs::read_to_string(plan.html_output()).unwrap();
    assert!(html.contains("src=\"libs/jquery/dist/jquery.min.js\""));
}

#[test]
fn test_watch_stops_when_flag_cleared() {
    let project = fixture::project();
    let plan = plan_for(project.path());
    let use_case = WatchUseCase::new(WatchOptions::new(plan)).unwrap();
    let running = Arc::new(AtomicBool::new(false));
    let events = Mutex::new(Vec::new());

    use_case
        .start(running, |e| events.lock().unwrap().push(e))
        .unwrap();

    let events = events.into_inner().unwrap();
    assert!(matches!(events.first(), Some(WatchEvent::WatchStarted { .. })));
    assert!(matches!(events.last(), Some(WatchEvent::Shutdown)));
    assert_eq!(events.len(), 2);
}
