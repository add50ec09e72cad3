use std::fs;

use tempfile::TempDir;
use txtroute_common::observability::{init_logging, LogConfig};

#[test]
fn returned_path_is_the_file_being_written() {
    let tmp = TempDir::new().unwrap();

    let handle = init_logging(LogConfig {
        app_name: "txtroute-tests",
        log_dir: Some(tmp.path().to_path_buf()),
        default_filter: "info",
        ..LogConfig::default()
    })
    .expect("logging initialises");
    let path = handle.path().to_path_buf();

    tracing::info!("routing line recorded");

    let again = init_logging(LogConfig::default()).expect("second call is a no-op");
    assert_eq!(again.path(), path.as_path());
    drop(again);

    // Dropping the owning handle flushes the background writer.
    drop(handle);

    let files: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert!(files.contains(&path), "returned {path:?}, found {files:?}");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("routing line recorded"));
}
