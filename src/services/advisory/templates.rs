/*
 * Responsibility
 * - Resolve prompt templates over an ordered list of candidate directories
 * - First existing file wins; every lookup hits the filesystem (no negative cache)
 */
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::services::advisory::error::AdvisoryError;

pub const PROFILE_TEMPLATE: &str = "prompt.txt";
pub const ANALYSIS_TEMPLATE: &str = "analyze_prompt.txt";

#[derive(Debug, Clone)]
pub struct TemplateLocator {
    search_dirs: Vec<PathBuf>,
}

impl TemplateLocator {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Working directory, then `<cwd>/<prompt_dir>`, then the executable's directory.
    pub fn with_default_search_path(prompt_dir: impl AsRef<Path>) -> Self {
        let mut dirs = vec![PathBuf::new(), prompt_dir.as_ref().to_path_buf()];
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir);
        }
        Self::new(dirs)
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    pub async fn resolve(&self, name: &str) -> Option<PathBuf> {
        for dir in &self.search_dirs {
            let candidate = dir.join(name);
            match tokio::fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => return Some(candidate),
                _ => continue,
            }
        }
        None
    }

    pub async fn load(&self, name: &str) -> Result<String, AdvisoryError> {
        let path = self
            .resolve(name)
            .await
            .ok_or_else(|| AdvisoryError::TemplateNotFound(name.to_string()))?;

        debug!(template = name, path = %path.display(), "loading prompt template");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| AdvisoryError::TemplateRead { path, source })
    }
}
