// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod fixtures;
pub mod forms;
pub mod table;

pub use fixtures::{EntryFaker, demo_users};
pub use forms::{ManualClock, MemoryForm, RecordingFeedback};
pub use table::MemoryTableSurface;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracker_store::STORAGE_FILE_NAME;

pub fn temp_storage_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(STORAGE_FILE_NAME);
    Ok((dir, path))
}
