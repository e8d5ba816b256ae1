//! Source-root scanning
//!
//! Walks each configured source root, collects Java source files in a stable
//! order, and decodes them with the configured encoding. Scanning is the only
//! place the pipeline touches the disk; everything downstream is pure.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

const SOURCE_EXTENSION: &str = "java";

/// One source file as read from disk, before parsing
#[derive(Debug, Clone)]
pub struct RawSource {
    /// Absolute path the file was read from
    pub path: PathBuf,
    /// Index of the owning source root in the configured root order
    pub root_index: usize,
    /// Decoded file contents
    pub text: String,
}

/// Walks source roots and reads candidate files
pub struct SourceScanner<'a> {
    config: &'a ExtractConfig,
}

impl<'a> SourceScanner<'a> {
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self { config }
    }

    /// Collect every source file under the configured roots
    ///
    /// Files come back sorted by (root order, path) so two runs over the same
    /// tree always see the same sequence. A missing or unreadable root is
    /// fatal; an empty root simply contributes no files.
    pub fn scan(&self) -> Result<Vec<RawSource>, ExtractError> {
        let start = Instant::now();
        let encoding = self
            .config
            .resolved_encoding()
            .map_err(|_| ExtractError::UnknownEncoding(self.config.encoding.clone()))?;

        let mut sources = Vec::new();

        for (root_index, root) in self.config.source_roots.iter().enumerate() {
            if !root.exists() {
                return Err(ExtractError::RootNotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(ExtractError::RootNotADirectory(root.clone()));
            }

            debug!(root = %root.display(), root_index, "Scanning source root");

            for result in WalkBuilder::new(root)
                .max_depth(Some(self.config.max_depth))
                .hidden(true)
                .ignore(false)
                .parents(false)
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false)
                .sort_by_file_path(|a, b| a.cmp(b))
                .build()
            {
                let entry = match result {
                    Ok(e) => e,
                    Err(err) => {
                        return Err(ExtractError::WalkError {
                            root: root.clone(),
                            message: err.to_string(),
                        });
                    }
                };
                let path = entry.path();

                if !path.is_file() || !is_source_file(path) {
                    continue;
                }

                if sources.len() >= self.config.max_files {
                    warn!(
                        max_files = self.config.max_files,
                        "Reached file limit, stopping scan"
                    );
                    break;
                }

                let bytes = std::fs::read(path).map_err(|source| ExtractError::FileReadError {
                    path: path.to_path_buf(),
                    source,
                })?;
                let (text, _, had_errors) = encoding.decode(&bytes);
                if had_errors {
                    warn!(path = %path.display(), encoding = self.config.encoding.as_str(),
                        "Source contained byte sequences invalid for the configured encoding");
                }

                sources.push(RawSource {
                    path: path.to_path_buf(),
                    root_index,
                    text: text.into_owned(),
                });
            }
        }

        info!(
            files = sources.len(),
            roots = self.config.source_roots.len(),
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Source scan completed"
        );

        Ok(sources)
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == SOURCE_EXTENSION)
        .unwrap_or(false)
}
