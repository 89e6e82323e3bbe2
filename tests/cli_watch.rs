//! E2E tests for `assetline watch`
//!
//! The watcher runs until killed, so events are read on a background thread
//! and awaited with a timeout.

mod common;

use std::io::{BufRead, BufReader};
use std::process::Child;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use common::*;

const TIMEOUT: Duration = Duration::from_secs(20);

struct Watching {
    child: Child,
    events: Receiver<serde_json::Value>,
    seen: Vec<serde_json::Value>,
}

impl Watching {
    fn start(env: &TestEnv, args: &[&str]) -> Self {
        let mut child = env.spawn(args);
        let stdout = child.stdout.take().expect("piped stdout");
        let (tx, rx) = channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(&line) {
                    if tx.send(value).is_err() {
                        break;
                    }
                }
            }
        });
        Self {
            child,
            events: rx,
            seen: Vec::new(),
        }
    }

    /// Wait for the first event satisfying `pred`
    fn wait_for(&mut self, pred: impl Fn(&serde_json::Value) -> bool) -> serde_json::Value {
        let deadline = Instant::now() + TIMEOUT;
        while Instant::now() < deadline {
            match self.events.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    self.seen.push(event.clone());
                    if pred(&event) {
                        return event;
                    }
                }
                Err(_) => continue,
            }
        }
        panic!("timed out waiting for event; seen: {:#?}", self.seen);
    }
}

impl Drop for Watching {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn watch_emits_started_event() {
    let env = TestEnv::sample();
    let mut watch = Watching::start(&env, &["watch", "--json"]);

    let started = watch.wait_for(|e| e["event"] == "watch_started");

    assert_eq!(started["command"], "watch");
    let watching = started["watching"].as_array().unwrap();
    assert!(!watching.is_empty());
    let described: Vec<&str> = watching.iter().filter_map(|w| w.as_str()).collect();
    assert!(!described.iter().any(|w| w.contains("images")), "{described:?}");
}

#[test]
fn watch_initial_runs_full_build() {
    let env = TestEnv::sample();
    let mut watch = Watching::start(&env, &["watch", "--initial", "--json"]);

    watch.wait_for(|e| e["event"] == "build_complete");
    watch.wait_for(|e| e["event"] == "watch_started");

    assert!(env.project_path("dist/index.html").is_file());
    let html = env.read("dist/index.html");
    assert!(!html.contains("node_modules/"), "{html}");
}

#[test]
fn style_change_reruns_styles_task() {
    let env = TestEnv::sample();
    let mut watch = Watching::start(&env, &["watch", "--json"]);
    watch.wait_for(|e| e["event"] == "watch_started");
    // Let the startup cooldown pass.
    thread::sleep(Duration::from_millis(800));

    env.write("src/styles/buttons.scss", ".btn { color: blue; }\n");

    let done = watch.wait_for(|e| e["event"] == "task_complete" && e["task"] == "styles");
    assert_eq!(done["command"], "watch");
    let css = env.read("dist/src/styles/styles.min.css");
    assert!(css.contains(".btn{color:#00f}") || css.contains(".btn{color:blue}"), "{css}");
    assert!(!env.project_path("dist/index.html").exists());
}

#[test]
fn failing_change_keeps_watching() {
    let env = TestEnv::sample();
    let mut watch = Watching::start(&env, &["watch", "--json"]);
    watch.wait_for(|e| e["event"] == "watch_started");
    thread::sleep(Duration::from_millis(800));

    env.write("src/scripts/script.js", "var s = 'unterminated;\n");
    let failed = watch.wait_for(|e| e["event"] == "task_failed");
    assert_eq!(failed["task"], "scripts");

    thread::sleep(Duration::from_millis(400));
    env.write("src/scripts/script.js", "var s = 'fixed';\n");
    watch.wait_for(|e| e["event"] == "task_complete" && e["task"] == "scripts");
}
