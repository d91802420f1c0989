//! Archive assembly
//!
//! Concatenates every persisted chapter artifact, in chapter-number order,
//! into the novel's single archive file. Chapters that permanently failed
//! leave gaps; those are skipped silently.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::OutputConfig;
use crate::utils::error::StorageError;

const CHAPTER_PREFIX: &str = "chapter_";
const CHAPTER_SUFFIX: &str = ".txt";

/// Merges a novel's chapter artifacts into one archive
pub struct ArchiveAssembler {
    chapters_dir: PathBuf,
    archive_path: PathBuf,
    novel_name: String,
}

impl ArchiveAssembler {
    pub fn new(output: &OutputConfig, slug: &str) -> Self {
        let novel_dir = output.dir.join(slug);

        Self {
            chapters_dir: novel_dir.join(&output.chapters_subdir),
            archive_path: novel_dir.join(&output.archive_filename),
            novel_name: title_case(slug),
        }
    }

    /// Merge all chapter artifacts into the archive file
    ///
    /// Ordering relies on the zero-padded filenames: sorting by name sorts
    /// by chapter number. Re-running over the same artifacts produces a
    /// byte-identical archive; an existing archive is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoChaptersFound` when no artifacts exist;
    /// nothing is written in that case.
    pub fn merge(&self) -> Result<PathBuf, StorageError> {
        let files = chapter_files(&self.chapters_dir)?;

        if files.is_empty() {
            return Err(StorageError::NoChaptersFound(self.chapters_dir.clone()));
        }

        info!(count = files.len(), "Merging chapters");

        let separator = "=".repeat(80);
        let mut archive = format!("{separator}\n{}\n{separator}\n\n", self.novel_name);

        for file in &files {
            let content = fs::read_to_string(file)?;
            archive.push_str(&content);
            archive.push('\n');
        }

        fs::write(&self.archive_path, archive)?;

        info!(path = %self.archive_path.display(), "Archive saved");
        Ok(self.archive_path.clone())
    }

    /// Where the archive is (or would be) written
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }
}

/// List chapter artifacts in a directory, sorted by filename
///
/// A missing directory yields an empty list rather than an I/O error, so
/// merge-only invocations report `NoChaptersFound` instead of failing.
pub(crate) fn chapter_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| {
                    name.starts_with(CHAPTER_PREFIX) && name.ends_with(CHAPTER_SUFFIX)
                })
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Turn a URL slug into a display title: `myst-might-mayhem` becomes
/// `Myst Might Mayhem`
fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
