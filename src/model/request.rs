use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_REVISION: &str = "main";

/// One pull of one repository, scoped to a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub repo_id: String,
    pub save_path: PathBuf,
    pub retries: u32,
    pub revision: String,
}

impl DownloadRequest {
    pub fn new(
        repo_id: impl Into<String>,
        save_path: impl Into<PathBuf>,
        retries: u32,
    ) -> Result<Self> {
        let repo_id = repo_id.into();
        if model_name(&repo_id).is_empty() {
            return Err(Error::InvalidInput(format!(
                "Invalid repository id: {:?}",
                repo_id
            )));
        }

        Ok(Self {
            repo_id,
            save_path: save_path.into(),
            retries,
            revision: DEFAULT_REVISION.to_string(),
        })
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// `save_path` joined with the last segment of the repository id.
    pub fn destination(&self) -> PathBuf {
        destination_for(&self.save_path, &self.repo_id)
    }
}

pub fn destination_for(save_path: &Path, repo_id: &str) -> PathBuf {
    save_path.join(model_name(repo_id))
}

fn model_name(repo_id: &str) -> &str {
    repo_id.split('/').next_back().unwrap_or(repo_id)
}
