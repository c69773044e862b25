//! Per-user data location. Resolved once at startup and handed to the
//! store; nothing else reads the environment.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn rollcall_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".rollcall"))
}

pub fn ensure_rollcall_home() -> Result<PathBuf> {
    let dir = rollcall_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn data_path() -> Result<PathBuf> {
    Ok(ensure_rollcall_home()?.join("attendance.csv"))
}
