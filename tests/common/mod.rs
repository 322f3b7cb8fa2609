//! Shared testing utilities for manuscript CLI tests.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises:
/// a temporary `HOME` and a fake `docker` executable on `PATH` that records
/// its invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("Failed to create test bin directory");

        let ctx = Self { root, bin_dir };
        ctx.install_fake_docker(0, "");
        ctx
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Log file the fake docker appends its argv to.
    pub fn docker_log(&self) -> PathBuf {
        self.root.path().join("docker-invocations.log")
    }

    /// Install a fake `docker` that records its argv, prints `stdout`, and
    /// exits with `exit_code` (writing a fixed stderr line on failure).
    pub fn install_fake_docker(&self, exit_code: i32, stdout: &str) {
        let mut script = format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n", self.docker_log().display());
        if !stdout.is_empty() {
            script.push_str(&format!("cat <<'STDOUT_EOF'\n{stdout}\nSTDOUT_EOF\n"));
        }
        if exit_code != 0 {
            script.push_str("echo \"compose invocation failed\" >&2\n");
        }
        script.push_str(&format!("exit {exit_code}\n"));

        let program = self.bin_dir.join("docker");
        fs::write(&program, script).expect("Failed to write fake docker");
        let mut perms = fs::metadata(&program).expect("Failed to stat fake docker").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&program, perms).expect("Failed to chmod fake docker");
    }

    /// All recorded fake-docker invocations, one argv line per call.
    pub fn recorded_docker_calls(&self) -> Vec<String> {
        match fs::read_to_string(self.docker_log()) {
            Ok(content) => content.lines().map(|line| line.to_string()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Build a command for invoking the compiled `manuscript` binary with
    /// `HOME` and `PATH` isolated.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("manuscript").expect("Failed to locate manuscript binary");
        let path = format!(
            "{}:{}",
            self.bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("HOME", self.home())
            .env("PATH", path)
            .env_remove("MANUSCRIPT_HOME")
            .env_remove("MANUSCRIPT_API_URL");
        cmd
    }

    /// Directory a manuscript's artifacts are generated into.
    pub fn manuscript_dir(&self, name: &str) -> PathBuf {
        self.home().join("manuscripts").join(name)
    }

    /// Path to the registry file.
    pub fn registry_path(&self) -> PathBuf {
        self.home().join(".config/manuscript/registry.toml")
    }

    /// Create a manuscript with fixed ports via `init`.
    pub fn init_manuscript(&self, name: &str) {
        self.cli()
            .args([
                "init",
                "--name",
                name,
                "--dataset",
                "zkevm.blocks",
                "--sink",
                "console",
                "--port",
                "18081",
            ])
            .assert()
            .success();
    }
}
