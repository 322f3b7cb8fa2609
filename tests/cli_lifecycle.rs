mod common;

use common::TestContext;
use predicates::prelude::*;

#[test]
fn deploy_invokes_compose_up_on_the_generated_file() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");

    ctx.cli()
        .args(["deploy", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployed manuscript 'demo'"))
        .stdout(predicate::str::contains("http://127.0.0.1:18081"));

    let compose_file = ctx.manuscript_dir("demo").join("docker-compose.yml");
    let calls = ctx.recorded_docker_calls();
    assert_eq!(calls, vec![format!("compose -f {} up -d", compose_file.display())]);
}

#[test]
fn deploy_unknown_manuscript_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["deploy", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manuscript 'ghost' not found"));
    assert!(ctx.recorded_docker_calls().is_empty());
}

#[test]
fn deploy_surfaces_compose_failures() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");
    ctx.install_fake_docker(1, "");

    ctx.cli()
        .args(["deploy", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Compose error"))
        .stderr(predicate::str::contains("compose invocation failed"));
}

#[test]
fn stop_invokes_compose_down() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");

    ctx.cli()
        .args(["stop", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped manuscript 'demo'"));

    let compose_file = ctx.manuscript_dir("demo").join("docker-compose.yml");
    let calls = ctx.recorded_docker_calls();
    assert_eq!(calls, vec![format!("compose -f {} down", compose_file.display())]);
}

#[test]
fn ls_reports_registered_manuscripts() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");
    ctx.install_fake_docker(0, r#"{"Service":"jobmanager","State":"running"}"#);

    ctx.cli()
        .args(["ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("18081"))
        .stdout(predicate::str::contains("1/1 running"));
}

#[test]
fn ls_with_empty_registry_prints_a_hint() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No manuscripts registered"));
}

#[test]
fn logs_passes_service_and_follow_flags() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");

    ctx.cli().args(["logs", "demo", "--service", "jobmanager", "--follow"]).assert().success();

    let calls = ctx.recorded_docker_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].ends_with("logs --follow jobmanager"), "unexpected argv: {}", calls[0]);
}

#[test]
fn rm_deregisters_and_purge_deletes() {
    let ctx = TestContext::new();
    ctx.init_manuscript("demo");

    ctx.cli()
        .args(["rm", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("directory kept"));
    assert!(ctx.manuscript_dir("demo").exists());

    ctx.init_manuscript("other");
    ctx.cli().args(["rm", "other", "--purge"]).assert().success();
    assert!(!ctx.manuscript_dir("other").exists());

    ctx.cli()
        .args(["deploy", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
