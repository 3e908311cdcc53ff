//! Cancellation behavior. The interrupt flag is process-wide, so the
//! scenarios run inside a single test to keep them from racing each other.

mod common;

use std::collections::HashMap;

use binfetch::error::BinError;
use binfetch::fetch::{self, Progress};
use binfetch::{install, interrupt, util};
use tempfile::tempdir;

#[test]
fn test_interruption_cleans_up_and_suppresses_summary() {
    let mut routes = HashMap::new();
    routes.insert("/r/foo".to_string(), (200, b"payload".to_vec()));
    let server = common::serve(routes);

    let dir = tempdir().unwrap();
    let config = common::test_config(
        dir.path(),
        vec![format!("{}/r/", server.base_url)],
        vec![],
    );
    let dest = dir.path().join("foo");

    // An interrupted fetch reports Interrupted and leaves no staging file.
    interrupt::request();
    let err = fetch::fetch_binary(
        &config,
        &format!("{}/r/foo", server.base_url),
        &dest,
        Progress::Hidden,
    )
    .unwrap_err();
    assert!(matches!(err, BinError::Interrupted));
    assert!(!dest.exists());
    assert!(util::list_dir_files(&config.staging_dir()).unwrap().is_empty());

    // An interrupted batch marks itself cancelled instead of tallying successes.
    let summary = install::install_batch(&config, &["foo".to_string()], true, true);
    assert!(summary.interrupted);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed.len(), 1);
    // and reports the cancellation through the exit code.
    assert_ne!(summary.exit_code(1), 0);
    interrupt::clear();

    // With the flag lowered the same fetch goes through.
    fetch::fetch_binary(
        &config,
        &format!("{}/r/foo", server.base_url),
        &dest,
        Progress::Hidden,
    )
    .unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
}
