use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway board data directory plus a `kb` command wired to it.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kb").expect("binary");
        cmd.arg("--dir").arg(self.dir.path());
        cmd.env_remove("KB_DIR");
        cmd.env_remove("KB_EVENTS");
        cmd
    }

    /// Run a command with `--json` and parse the envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json output")
    }

    pub fn add_task(&self, extra: &[&str]) -> String {
        let mut args = vec!["task", "add"];
        args.extend_from_slice(extra);
        let value = self.json(&args);
        value["data"]["id"].as_str().expect("task id").to_string()
    }

    pub fn add_project(&self, extra: &[&str]) -> String {
        let mut args = vec!["project", "add"];
        args.extend_from_slice(extra);
        let value = self.json(&args);
        value["data"]["id"].as_str().expect("project id").to_string()
    }
}
