use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Template file extensions the scan picks up
const TEMPLATE_EXTENSIONS: [&str; 3] = ["html", "jinja2", "j2"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find template files under a directory.
    ///
    /// Returns paths relative to the scanned directory, with forward
    /// slashes, sorted for stable run order. The relative path is the key
    /// templates are stored under in the database.
    pub fn scan_templates<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
        let dir = dir.as_ref();
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let is_template = path
                .extension()
                .map(|ext| {
                    TEMPLATE_EXTENSIONS
                        .iter()
                        .any(|known| ext.to_string_lossy().eq_ignore_ascii_case(known))
                })
                .unwrap_or(false);

            if !is_template {
                continue;
            }

            let relative = path
                .strip_prefix(dir)
                .context("Scanned file outside the templates directory")?;
            result.push(relative.to_string_lossy().replace('\\', "/"));
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Output path for one translated template
    pub fn translated_template_path(
        output_dir: &Path,
        language: &str,
        filename: &str,
    ) -> PathBuf {
        output_dir
            .join("translated-templates")
            .join(language)
            .join(filename)
    }
}
