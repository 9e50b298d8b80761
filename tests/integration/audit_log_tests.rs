//! Audit log contents after real sweeps.

use dupsweep::config::SweepConfig;
use dupsweep::console::Console;
use dupsweep::error::ExitCode;
use dupsweep::run_with_console;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn sweep(root: &Path, audit_log: &Path, input: &str) -> ExitCode {
    let config = SweepConfig {
        root: Some(root.to_path_buf()),
        audit_log: audit_log.to_path_buf(),
        quiet: true,
        color: false,
        ..SweepConfig::default()
    };
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    run_with_console(&config, &mut console).unwrap()
}

#[test]
fn test_one_line_per_deleted_file() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let log = logs.path().join("deletion_log.txt");
    fs::write(root.path().join("a.txt"), b"dup").unwrap();
    fs::write(root.path().join("a(1).txt"), b"dup").unwrap();
    fs::write(root.path().join("a copy.txt"), b"dup").unwrap();

    assert_eq!(sweep(root.path(), &log, "1\nyes\n"), ExitCode::Success);

    let content = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert!(line.starts_with('['));
        assert!(line.contains("] user: "));
        assert!(line.contains(" @ host: "));
        assert!(line.contains(" | deleted file: "));
    }
    assert!(content.contains(&root.path().join("a(1).txt").display().to_string()));
    assert!(content.contains(&root.path().join("a copy.txt").display().to_string()));
    assert!(!content.contains(&format!("{}\n", root.path().join("a.txt").display())));
}

#[test]
fn test_log_is_appended_across_runs() {
    let logs = TempDir::new().unwrap();
    let log = logs.path().join("deletion_log.txt");
    fs::write(&log, "existing line\n").unwrap();

    for _ in 0..2 {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("x.bin"), b"payload").unwrap();
        fs::write(root.path().join("x(1).bin"), b"payload").unwrap();
        assert_eq!(sweep(root.path(), &log, "1\nyes\n"), ExitCode::Success);
    }

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.starts_with("existing line\n"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_cancelled_run_leaves_log_untouched() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let log = logs.path().join("deletion_log.txt");
    fs::write(&log, "before\n").unwrap();
    fs::write(root.path().join("a.txt"), b"dup").unwrap();
    fs::write(root.path().join("a(1).txt"), b"dup").unwrap();

    assert_eq!(sweep(root.path(), &log, "1\nno\n"), ExitCode::Cancelled);
    assert_eq!(fs::read_to_string(&log).unwrap(), "before\n");
}

#[test]
fn test_unwritable_log_does_not_stop_deletion() {
    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    // A directory cannot be opened for appending.
    let log = logs.path().join("not_a_file");
    fs::create_dir(&log).unwrap();
    let copy = root.path().join("a(1).txt");
    fs::write(root.path().join("a.txt"), b"dup").unwrap();
    fs::write(&copy, b"dup").unwrap();

    let config = SweepConfig {
        root: Some(root.path().to_path_buf()),
        audit_log: log,
        quiet: true,
        color: false,
        ..SweepConfig::default()
    };
    let mut console = Console::new(Cursor::new(b"1\nyes\n".to_vec()), Vec::new());
    let code = run_with_console(&config, &mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!copy.exists());
    assert!(output.contains("could not be written to the audit log"));
}
