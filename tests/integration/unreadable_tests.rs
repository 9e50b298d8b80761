//! Files that cannot be read are reported and never grouped.

use dupsweep::config::SweepConfig;
use dupsweep::console::Console;
use dupsweep::error::ExitCode;
use dupsweep::run_with_console;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_reported_and_kept() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let locked = root.path().join("locked(1).txt");
    fs::write(root.path().join("a.txt"), b"dup").unwrap();
    fs::write(&locked, b"dup").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through mode bits.
    if fs::read(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let config = SweepConfig {
        root: Some(root.path().to_path_buf()),
        audit_log: logs.path().join("deletion_log.txt"),
        quiet: true,
        color: false,
        ..SweepConfig::default()
    };
    let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
    let code = run_with_console(&config, &mut console).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(code, ExitCode::NothingToDo);
    assert!(locked.exists());
    assert!(output.contains("[unreadable]"));
}
