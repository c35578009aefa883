//! End-to-end tests for the offline `favourites` command.
//!
//! These run the real binary against a temporary data directory, so no
//! inference server is needed.

use std::path::Path;
use std::process::{Command, Output};

fn ochat(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ochat"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ochat")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn toggle_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();

    let added = ochat(dir.path(), &["favourites", "toggle", "llama3"]);
    assert!(added.status.success());
    assert!(stdout(&added).contains("Added 'llama3'"));

    let listed = ochat(dir.path(), &["favourites"]);
    assert!(listed.status.success());
    assert!(stdout(&listed).contains("* llama3"));

    let removed = ochat(dir.path(), &["favourites", "toggle", "llama3"]);
    assert!(stdout(&removed).contains("Removed 'llama3'"));

    let listed = ochat(dir.path(), &["favourites", "list"]);
    assert!(stdout(&listed).contains("No favourite models yet."));
}

#[test]
fn corrupt_favourites_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favourites.json"), "{ not json").unwrap();

    let listed = ochat(dir.path(), &["favourites"]);
    assert!(listed.status.success());
    assert!(stdout(&listed).contains("No favourite models yet."));

    let added = ochat(dir.path(), &["favourites", "toggle", "phi3:mini"]);
    assert!(added.status.success());
    let on_disk = std::fs::read_to_string(dir.path().join("favourites.json")).unwrap();
    assert!(on_disk.contains("phi3:mini"));
}

#[test]
fn no_command_prints_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = ochat(dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}
