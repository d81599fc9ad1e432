//! Loading epics and their stories from a directory tree.
//!
//! The layout is one subdirectory per epic:
//!
//! ```text
//! epics/
//!   E1-login/
//!     epic.md
//!     US-1-sso.md
//!     US-2-reset.md
//!   E2-billing/
//!     epic.md
//! ```
//!
//! Subdirectories are visited in name order. Story files are matched by glob
//! patterns against their file name.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use tracing::debug;

use crate::markdown::{parse_epic, parse_story};
use crate::model::Epic;

/// File name of the epic document inside each epic directory.
pub const EPIC_FILE_NAME: &str = "epic.md";

/// Story file name patterns used when none are configured.
pub const DEFAULT_STORY_PATTERNS: &[&str] = &["MEET1-*.md", "US-*.md"];

/// Errors that can occur while loading an epics tree.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The epics root does not exist or is not a directory.
    #[error("epics directory not found: {}", path.display())]
    RootNotFound {
        /// The configured root.
        path: PathBuf,
    },

    /// A story file pattern is not a valid glob.
    #[error("invalid story pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },

    /// Listing a directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Compiles story file name patterns into matchers, preserving order.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<GlobMatcher>> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            Glob::new(pattern)
                .map(|g| g.compile_matcher())
                .map_err(|source| LoadError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
        })
        .collect()
}

/// Loads every epic under `root` together with its stories.
///
/// Directories without an `epic.md`, and epics without an `Epic ID`, are
/// skipped. Stories are gathered pattern by pattern, each pattern's matches
/// in file name order; a story whose id is already attached is dropped.
pub fn load_epics<S: AsRef<str>>(root: &Path, story_patterns: &[S]) -> Result<Vec<Epic>> {
    if !root.is_dir() {
        return Err(LoadError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let matchers = compile_patterns(story_patterns)?;
    let mut epics = Vec::new();

    for epic_dir in sorted_entries(root)? {
        if !epic_dir.is_dir() {
            continue;
        }

        let epic_file = epic_dir.join(EPIC_FILE_NAME);
        if !epic_file.is_file() {
            debug!(dir = %epic_dir.display(), "no epic.md, skipping directory");
            continue;
        }

        let Some(mut epic) = parse_epic(&epic_file) else {
            continue;
        };

        let files = sorted_entries(&epic_dir)?;
        for matcher in &matchers {
            for story_file in &files {
                let Some(name) = story_file.file_name() else {
                    continue;
                };
                if name == OsStr::new(EPIC_FILE_NAME)
                    || !story_file.is_file()
                    || !matcher.is_match(name)
                {
                    continue;
                }

                let Some(story) = parse_story(story_file, &epic.id) else {
                    continue;
                };
                let story_id = story.id.clone();
                if !epic.add_story(story) {
                    debug!(
                        epic = %epic.id,
                        story = %story_id,
                        file = %story_file.display(),
                        "duplicate story id, dropping"
                    );
                }
            }
        }

        epics.push(epic);
    }

    Ok(epics)
}

/// Lists the entries of a directory sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}
