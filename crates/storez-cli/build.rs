//! Stamps the binary version with the git commit it was built from.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");

    let version = env!("CARGO_PKG_VERSION");
    let version = match git_commit() {
        Some(commit) => format!("{} ({})", version, commit),
        None => version.to_string(),
    };

    println!("cargo:rustc-env=STOREZ_VERSION={}", version);
}

/// Short hash of HEAD, with `-dirty` when the tree has local changes.
fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--exclude", "*"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}
