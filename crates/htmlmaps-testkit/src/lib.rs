//! Test utilities for htmlmaps
//!
//! Scratch directories for template trees and rendered maps, plus fixture
//! writers for an on-disk blog site.

pub mod fixtures;

pub use fixtures::{write_blog_site, write_templates, BlogSite};

use tempfile::TempDir;

/// Scratch root shared by every test run, relative to the working directory
pub const SCRATCH_DIR: &str = ".tmp";

/// Scratch directory for a template tree under `.tmp/`
///
/// Removed when the returned `TempDir` drops. Panics when `.tmp/` cannot be
/// created, which only happens in a broken checkout.
///
/// ```rust
/// use htmlmaps_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// std::fs::write(temp.path().join("index.tpl"), "<h1>{%= title %}</h1>").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create scratch directory in .tmp/")
}

/// Fallible [`temp_dir_in_workspace`]
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let base = std::env::current_dir()?.join(SCRATCH_DIR);
    std::fs::create_dir_all(&base)?;
    TempDir::new_in(&base)
}
