#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a per-test scratch directory so the
/// real config and log directories are never touched.
pub fn tk(name: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("timekeeper");
    cmd.env("HOME", temp_home(name));
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timekeeper_home", name));
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique config path inside the system temp dir and remove any existing file
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timekeeper.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn write_config(path: &str, yaml: &str) {
    fs::write(path, yaml).expect("write test config");
}
