//! End-to-end sweeps driven through a scripted console.

use dupsweep::config::SweepConfig;
use dupsweep::console::Console;
use dupsweep::error::ExitCode;
use dupsweep::run_with_console;
use dupsweep::workflow::DeleteMode;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config(root: &Path, log_dir: &TempDir) -> SweepConfig {
    SweepConfig {
        root: Some(root.to_path_buf()),
        audit_log: log_dir.path().join("deletion_log.txt"),
        quiet: true,
        color: false,
        ..SweepConfig::default()
    }
}

/// Run one sweep with `input` as the operator's answers.
fn sweep(config: &SweepConfig, input: &str) -> (ExitCode, String) {
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let code = run_with_console(config, &mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    (code, output)
}

#[test]
fn test_delete_all_keeps_unmarked_copy() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let original = write(root.path(), "photo.jpg", b"same bytes");
    let copy1 = write(root.path(), "photo(1).jpg", b"same bytes");
    let copy2 = write(root.path(), "photo copy.jpg", b"same bytes");
    let other = write(root.path(), "notes.txt", b"different");

    let (code, output) = sweep(&config(root.path(), &logs), "1\nyes\n");

    assert_eq!(code, ExitCode::Success);
    assert!(original.exists());
    assert!(other.exists());
    assert!(!copy1.exists());
    assert!(!copy2.exists());
    assert!(output.contains("Files deleted: 2"));
}

#[test]
fn test_no_duplicates_is_nothing_to_do() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    write(root.path(), "a.txt", b"one");
    write(root.path(), "b.txt", b"two");

    let (code, output) = sweep(&config(root.path(), &logs), "");

    assert_eq!(code, ExitCode::NothingToDo);
    assert!(output.contains("No duplicate files found"));
    assert!(!logs.path().join("deletion_log.txt").exists());
}

#[test]
fn test_empty_directory_is_nothing_to_do() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();

    let (code, _) = sweep(&config(root.path(), &logs), "");

    assert_eq!(code, ExitCode::NothingToDo);
}

#[test]
fn test_cancel_at_mode_prompt_deletes_nothing() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let a = write(root.path(), "a.txt", b"dup");
    let b = write(root.path(), "a(1).txt", b"dup");

    let (code, output) = sweep(&config(root.path(), &logs), "3\n");

    assert_eq!(code, ExitCode::Cancelled);
    assert!(a.exists() && b.exists());
    assert!(output.contains("No files were deleted"));
    assert!(!logs.path().join("deletion_log.txt").exists());
}

#[test]
fn test_bulk_confirmation_other_than_yes_cancels() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let a = write(root.path(), "a.txt", b"dup");
    let b = write(root.path(), "a(1).txt", b"dup");

    let (code, _) = sweep(&config(root.path(), &logs), "delete-all\ny\n");

    assert_eq!(code, ExitCode::Cancelled);
    assert!(a.exists() && b.exists());
}

#[test]
fn test_end_of_input_cancels() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    write(root.path(), "a.txt", b"dup");
    write(root.path(), "b.txt", b"dup");

    let (code, _) = sweep(&config(root.path(), &logs), "1\n");

    assert_eq!(code, ExitCode::Cancelled);
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 2);
}

#[test]
fn test_by_group_deletes_only_confirmed_groups() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let a = write(root.path(), "a.txt", b"first");
    let a1 = write(root.path(), "a(1).txt", b"first");
    let b = write(root.path(), "b.txt", b"second");
    let b1 = write(root.path(), "b(1).txt", b"second");

    let (code, output) = sweep(&config(root.path(), &logs), "2\ny\nn\n");

    assert_eq!(code, ExitCode::Success);
    assert!(a.exists());
    assert!(!a1.exists());
    assert!(b.exists());
    assert!(b1.exists());
    assert!(output.contains("Skipped this group."));
    assert!(output.contains("Files deleted: 1"));
}

#[test]
fn test_preset_mode_skips_mode_prompt() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    write(root.path(), "a.txt", b"dup");
    let copy = write(root.path(), "a(1).txt", b"dup");

    let mut config = config(root.path(), &logs);
    config.mode = Some(DeleteMode::All);
    let (code, output) = sweep(&config, "yes\n");

    assert_eq!(code, ExitCode::Success);
    assert!(!copy.exists());
    assert!(!output.contains("Choose a delete mode"));
}

#[test]
fn test_all_marked_keeps_lowest_path() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let spaced = write(root.path(), "report copy.txt", b"dup");
    let numbered = write(root.path(), "report(1).txt", b"dup");

    let (code, _) = sweep(&config(root.path(), &logs), "1\nyes\n");

    assert_eq!(code, ExitCode::Success);
    assert!(spaced.exists());
    assert!(!numbered.exists());
}

#[test]
fn test_duplicates_across_subdirectories() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("2023/backup")).unwrap();
    let kept = write(root.path(), "contract.pdf", b"pdf bytes");
    let nested = write(&root.path().join("2023/backup"), "contract_副本.pdf", b"pdf bytes");

    let (code, _) = sweep(&config(root.path(), &logs), "1\nyes\n");

    assert_eq!(code, ExitCode::Success);
    assert!(kept.exists());
    assert!(!nested.exists());
}

#[test]
fn test_marker_in_directory_name_is_ignored() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    fs::create_dir(root.path().join("copy")).unwrap();
    let in_marked_dir = write(&root.path().join("copy"), "a.txt", b"dup");
    let marked_name = write(root.path(), "b copy.txt", b"dup");

    let (code, _) = sweep(&config(root.path(), &logs), "1\nyes\n");

    assert_eq!(code, ExitCode::Success);
    assert!(in_marked_dir.exists());
    assert!(!marked_name.exists());
}

#[test]
fn test_second_run_finds_nothing() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    write(root.path(), "a.txt", b"dup");
    write(root.path(), "a(1).txt", b"dup");
    write(root.path(), "a(2).txt", b"dup");
    let config = config(root.path(), &logs);

    let (first, _) = sweep(&config, "1\nyes\n");
    let (second, _) = sweep(&config, "");

    assert_eq!(first, ExitCode::Success);
    assert_eq!(second, ExitCode::NothingToDo);
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 1);
}

#[test]
fn test_prompted_directory_is_used() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    write(root.path(), "a.txt", b"dup");
    let copy = write(root.path(), "a(1).txt", b"dup");

    let mut config = config(root.path(), &logs);
    config.root = None;
    let input = format!("{}\n1\nyes\n", root.path().display());
    let (code, _) = sweep(&config, &input);

    assert_eq!(code, ExitCode::Success);
    assert!(!copy.exists());
}

#[cfg(unix)]
#[test]
fn test_undeletable_candidate_is_partial_success() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let locked_dir = root.path().join("locked");
    fs::create_dir(&locked_dir).unwrap();
    let a = write(root.path(), "a.txt", b"first");
    let stuck = write(&locked_dir, "a(1).txt", b"first");
    let b = write(root.path(), "b.txt", b"second");
    let b1 = write(root.path(), "b(1).txt", b"second");
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users can unlink inside read-only directories.
    if fs::write(locked_dir.join("writable-check"), b"").is_ok() {
        fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (code, output) = sweep(&config(root.path(), &logs), "1\nyes\n");
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(a.exists());
    assert!(stuck.exists());
    assert!(b.exists());
    assert!(!b1.exists());
    assert!(output.contains("Files deleted: 1"));
    assert!(output.contains("Files not deleted: 1"));
    assert!(output.contains(&stuck.display().to_string()));

    let audit = fs::read_to_string(logs.path().join("deletion_log.txt")).unwrap();
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains(&b1.display().to_string()));
}
