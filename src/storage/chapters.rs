//! Per-chapter artifact writer with Handlebars template
//!
//! Renders a chapter record to its text artifact and writes it to the
//! chapters directory. Filenames carry a 3-digit zero-padded chapter number
//! so lexicographic order equals numeric order at merge time.

use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::ChapterRecord;
use crate::storage::merge;
use crate::utils::error::StorageError;

/// Default chapter artifact template
const CHAPTER_TEMPLATE: &str = include_str!("../../templates/chapter.hbs");

/// Template data for rendering
#[derive(Debug, Serialize)]
struct ChapterTemplateData {
    number: u32,
    title: String,
    url: String,
    body: String,
}

/// Writes chapter artifacts into a novel's chapters directory
pub struct ChapterWriter {
    handlebars: Handlebars<'static>,
    chapters_dir: PathBuf,
}

impl ChapterWriter {
    /// Create a writer, creating the chapters directory if needed
    pub fn new(chapters_dir: &Path) -> Result<Self, StorageError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("chapter", CHAPTER_TEMPLATE)?;

        fs::create_dir_all(chapters_dir)?;

        Ok(Self {
            handlebars,
            chapters_dir: chapters_dir.to_path_buf(),
        })
    }

    /// Render a chapter record to its artifact text
    pub fn render(&self, record: &ChapterRecord, number: u32) -> Result<String, StorageError> {
        let data = ChapterTemplateData {
            number,
            title: record.display_title(number),
            url: record.source_url.clone(),
            body: record.body.clone(),
        };

        Ok(self.handlebars.render("chapter", &data)?)
    }

    /// Persist a chapter record, returning the artifact path
    ///
    /// Artifacts are written once and never mutated afterwards.
    pub fn save(&self, record: &ChapterRecord, number: u32) -> Result<PathBuf, StorageError> {
        let content = self.render(record, number)?;
        let path = self.chapters_dir.join(Self::filename(number));

        fs::write(&path, content)?;

        debug!(path = %path.display(), "Saved chapter artifact");
        Ok(path)
    }

    /// Artifact filename for a chapter number: `chapter_NNN.txt`
    pub fn filename(number: u32) -> String {
        format!("chapter_{number:03}.txt")
    }

    /// Whether an artifact for this chapter already exists
    pub fn exists(&self, number: u32) -> bool {
        self.chapters_dir.join(Self::filename(number)).exists()
    }

    /// Number of chapter artifacts on disk
    pub fn count(&self) -> usize {
        merge::chapter_files(&self.chapters_dir)
            .map(|files| files.len())
            .unwrap_or(0)
    }

    /// Directory the artifacts are written into
    pub fn chapters_dir(&self) -> &Path {
        &self.chapters_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(body: &str) -> ChapterRecord {
        ChapterRecord {
            title: Some("The Long Road".to_string()),
            body: body.to_string(),
            chapter_number: Some(7),
            volume_number: Some(1),
            source_url: "https://example.org/r/1--novel/v1/c7".to_string(),
        }
    }

    #[test]
    fn test_writer_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("chapters");
        let writer = ChapterWriter::new(&dir);
        assert!(writer.is_ok());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_render_contains_header_and_body() {
        let temp = TempDir::new().unwrap();
        let writer = ChapterWriter::new(temp.path()).unwrap();

        let text = writer.render(&record("Body text goes here."), 7).unwrap();
        assert!(text.contains("Chapter 7: The Long Road"));
        assert!(text.contains("Source: https://example.org/r/1--novel/v1/c7"));
        assert!(text.contains("Body text goes here."));
        assert!(text.starts_with(&"=".repeat(80)));
    }

    #[test]
    fn test_render_does_not_escape_body() {
        let temp = TempDir::new().unwrap();
        let writer = ChapterWriter::new(temp.path()).unwrap();

        let text = writer
            .render(&record("He said \"run\" & we ran <fast>."), 1)
            .unwrap();
        assert!(text.contains("He said \"run\" & we ran <fast>."));
    }

    #[test]
    fn test_render_synthetic_title() {
        let temp = TempDir::new().unwrap();
        let writer = ChapterWriter::new(temp.path()).unwrap();

        let mut rec = record("body");
        rec.title = None;
        let text = writer.render(&rec, 12).unwrap();
        assert!(text.contains("Chapter 12: Chapter 12"));
    }

    #[test]
    fn test_save_filename_padding() {
        let temp = TempDir::new().unwrap();
        let writer = ChapterWriter::new(temp.path()).unwrap();

        let path = writer.save(&record("some body"), 7).unwrap();
        assert!(path.ends_with("chapter_007.txt"));
        assert!(path.exists());

        let path = writer.save(&record("some body"), 123).unwrap();
        assert!(path.ends_with("chapter_123.txt"));
    }

    #[test]
    fn test_exists_and_count() {
        let temp = TempDir::new().unwrap();
        let writer = ChapterWriter::new(temp.path()).unwrap();

        assert!(!writer.exists(1));
        assert_eq!(writer.count(), 0);

        writer.save(&record("body"), 1).unwrap();
        writer.save(&record("body"), 2).unwrap();

        assert!(writer.exists(1));
        assert!(!writer.exists(3));
        assert_eq!(writer.count(), 2);
    }
}
