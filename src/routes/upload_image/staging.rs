use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::TempDir;

const FALLBACK_FILE_NAME: &str = "image";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let sanitized = WHITESPACE.replace_all(base, "_").into_owned();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        FALLBACK_FILE_NAME.to_string()
    } else {
        sanitized
    }
}

#[derive(Debug, Clone)]
pub struct StagingArea {
    pub root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn stage(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> io::Result<StagedImage> {
        fs::create_dir_all(&self.root)?;
        let dir = tempfile::Builder::new()
            .prefix("upload-")
            .tempdir_in(&self.root)?;
        let file_name = sanitize_filename(file_name);
        let path = dir.path().join(&file_name);
        fs::write(&path, bytes)?;
        tracing::info!("File saved to {}", path.display());
        Ok(StagedImage {
            dir,
            path,
            file_name,
            content_type: content_type.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct StagedImage {
    dir: TempDir,
    path: PathBuf,
    file_name: String,
    content_type: String,
}

impl StagedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn finish(self) {
        let dir = self.dir.path().to_path_buf();
        if let Err(err) = self.dir.close() {
            tracing::warn!("Could not delete staged upload {}: {}", dir.display(), err);
        }
    }
}
