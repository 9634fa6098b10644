//! Integration tests for the cellgrid binary

use std::path::PathBuf;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cellgrid"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

struct Cleanup(PathBuf);
impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cellgrid_cli_{}_{}_{}_{:?}.json",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
        std::thread::current().id(),
    ))
}

#[test]
fn test_set_and_print() {
    let (stdout, _, code) = run_command(&["-s", "A1=10", "-s", "A2=5", "-s", "B1==A1+A2"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "A1\t10\t10\nB1\t=A1+A2\t15\nA2\t5\t5\n");
}

#[test]
fn test_error_values_are_printed_as_codes() {
    let (stdout, _, code) = run_command(&["-s", "A1=0", "-s", "B1==10/A1", "-s", "C1==Z99"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("B1\t=10/A1\t#DIV/0!"));
    assert!(stdout.contains("C1\t=Z99\t#REF!"));
}

#[test]
fn test_cycle_warning() {
    let (stdout, stderr, code) = run_command(&["-s", "X1==Y1", "-s", "Y1==X1"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("circular reference at Y1"));
    assert!(stdout.contains("Y1\t=X1\t#CYCLE!"));
}

#[test]
fn test_save_then_load() {
    let path = temp_path("save_load");
    let _cleanup = Cleanup(path.clone());
    let path_str = path.to_str().unwrap();

    let (stdout, _, code) = run_command(&["-s", "A1=4", "-s", "A2==INC(A1)*3", "-o", path_str]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Saved to"));

    let (stdout, _, code) = run_command(&[path_str]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "A1\t4\t4\nA2\t=INC(A1)*3\t15\n");
}

#[test]
fn test_delete_row_and_column() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1=1", "-s", "B1=2", "-s", "A2==B1", "-s", "C2=3", "--delete-column", "b", "-d",
        "1",
    ]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "A2\t=B1\t#REF!\nC2\t3\t3\n");
}

#[test]
fn test_missing_file_starts_empty() {
    let path = temp_path("missing");
    let (stdout, _, code) = run_command(&[path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
}

#[test]
fn test_malformed_file_fails() {
    let path = temp_path("malformed");
    let _cleanup = Cleanup(path.clone());
    std::fs::write(&path, "{ not json").unwrap();

    let (_, stderr, code) = run_command(&[path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Decode error"));
}

#[test]
fn test_invalid_address() {
    let (_, stderr, code) = run_command(&["-s", "1A=3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid cell address"));
}

#[test]
fn test_help_lists_functions() {
    let (_, stderr, code) = run_command(&["--help"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("MMAX"));
}
