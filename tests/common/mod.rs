#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// An address nothing listens on, for commands that must fail to connect.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Helper struct to run autoclass commands in an isolated temp directory
pub struct AutoclassTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl AutoclassTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        // Find the binary - check both debug and release
        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/autoclass")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/autoclass")
        };

        // If the above doesn't exist, try the alternative
        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            // Fallback to debug
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/autoclass").to_string()
        };

        AutoclassTest {
            temp_dir,
            binary_path,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("AUTOCLASS_ROOT")
            .env_remove("AUTOCLASS_API_URL")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute autoclass command")
    }

    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn autoclass command");
        child
            .stdin
            .take()
            .expect("stdin should be piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child
            .wait_with_output()
            .expect("Failed to wait for autoclass command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".autoclass");
        fs::create_dir_all(&dir).expect("Failed to create .autoclass directory");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config file");
    }

    /// Write a saved run as `autoclass run` would leave it.
    pub fn write_snapshot(&self, payload: &serde_json::Value, last_run_at: &str) {
        let dir = self.temp_dir.path().join(".autoclass").join("snapshot");
        fs::create_dir_all(&dir).expect("Failed to create snapshot directory");
        fs::write(dir.join("last_run_at"), last_run_at).expect("Failed to write last_run_at");
        fs::write(dir.join("last.json"), payload.to_string()).expect("Failed to write last.json");
    }

    pub fn snapshot_exists(&self) -> bool {
        self.temp_dir
            .path()
            .join(".autoclass")
            .join("snapshot")
            .join("last.json")
            .exists()
    }

    pub fn read_file(&self, relative_path: &str) -> Option<String> {
        let path = self.temp_dir.path().join(relative_path);
        fs::read_to_string(path).ok()
    }
}
