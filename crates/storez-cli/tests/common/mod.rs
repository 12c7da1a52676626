use std::path::Path;
use std::process::{Command, Output};

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const STORE_ENV: &[&str] = &[
    "STOREZ_ADAPTER",
    "STOREZ_URI",
    "COCKPIT_API_TOKEN",
    "COCKPIT_API_BASE_URL",
    "RUST_LOG",
];

/// Run the CLI with a custom HOME so no user config file is picked up.
pub fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_storez"));
    cmd.args(args);
    for var in STORE_ENV {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], home: &Path) -> String {
    let output = run_cli(args, home);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Parse one JSON value per non-empty line.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("Line is not JSON"))
        .collect()
}
