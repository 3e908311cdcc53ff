#![cfg(unix)]

mod common;

use binfetch::{RunMode, cache, run, util};
use tempfile::tempdir;

fn cache_script(config: &binfetch::Config, name: &str, body: &str) {
    cache::ensure_dirs(config).unwrap();
    let entry = cache::entry_path(config, name);
    std::fs::write(&entry, body).unwrap();
    util::set_executable(&entry).unwrap();
}

#[test]
fn test_run_propagates_child_exit_code() {
    let dir = tempdir().unwrap();
    let config = common::test_config(dir.path(), vec![], vec![]);
    cache_script(&config, "exit7", "#!/bin/sh\nexit 7\n");

    let code = run::run(&config, "exit7", &[], RunMode::Silent).unwrap();
    assert_eq!(code, 7);
}

#[test]
fn test_run_passes_arguments_through() {
    let dir = tempdir().unwrap();
    let config = common::test_config(dir.path(), vec![], vec![]);
    // Exits with the number of arguments it received.
    cache_script(&config, "argc", "#!/bin/sh\nexit $#\n");

    let args = vec!["one".to_string(), "two".to_string(), "three".to_string()];
    let code = run::run(&config, "argc", &args, RunMode::Silent).unwrap();
    assert_eq!(code, 3);
}

#[test]
fn test_run_evicts_cache_afterwards() {
    let dir = tempdir().unwrap();
    let config = common::test_config(dir.path(), vec![], vec![]);
    cache::ensure_dirs(&config).unwrap();
    // Overfill the cache, oldest first, then add the script last so it survives.
    for i in 0..(config.max_cache_size + 1) {
        std::fs::write(cache::entry_path(&config, &format!("old{i:02}")), b"x").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(25));
    }
    cache_script(&config, "noop", "#!/bin/sh\nexit 0\n");

    let code = run::run(&config, "noop", &[], RunMode::Silent).unwrap();
    assert_eq!(code, 0);

    let remaining = util::list_dir_files(&config.cache_dir).unwrap();
    assert_eq!(
        remaining.len(),
        config.max_cache_size + 2 - config.binaries_to_delete
    );
    assert!(remaining.contains(&"noop".to_string()));
    // Exactly the oldest-accessed entries were evicted.
    for i in 0..config.binaries_to_delete {
        assert!(!remaining.contains(&format!("old{i:02}")));
    }
    for i in config.binaries_to_delete..(config.max_cache_size + 1) {
        assert!(remaining.contains(&format!("old{i:02}")));
    }
}

#[test]
fn test_transparent_mode_falls_back_to_cache() {
    let dir = tempdir().unwrap();
    let config = common::test_config(dir.path(), vec![], vec![]);
    // A name that cannot plausibly be on the system PATH.
    let name = "binfetch-test-nowhere-on-path";
    cache_script(&config, name, "#!/bin/sh\nexit 3\n");

    let code = run::run(&config, name, &[], RunMode::Transparent).unwrap();
    assert_eq!(code, 3);
}

#[test]
fn test_run_base_name_resolution() {
    let dir = tempdir().unwrap();
    let config = common::test_config(dir.path(), vec![], vec![]);
    cache_script(&config, "tool", "#!/bin/sh\nexit 5\n");

    // A path-ish invocation still resolves the cached entry by base name.
    let code = run::run(&config, "some/dir/tool", &[], RunMode::Silent).unwrap();
    assert_eq!(code, 5);
}
