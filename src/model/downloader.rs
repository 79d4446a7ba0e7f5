use crate::auth::Credentials;
use crate::config::Config;
use crate::error::Result;
use crate::model::{DownloadRequest, HubSnapshot, SnapshotSource};
use crate::retry::{retry, RetryPolicy};
use std::path::PathBuf;
use std::time::Duration;

pub struct ModelDownloader<S = HubSnapshot> {
    source: S,
    retry_delay: Duration,
}

impl ModelDownloader<HubSnapshot> {
    /// Fails with `MissingToken` before any hub client exists.
    pub fn new(config: &Config) -> Result<Self> {
        let credentials = Credentials::from_env(&config.token_env)?;
        let source = HubSnapshot::new(&credentials, config.cache_dir.clone())?;
        Ok(Self::with_source(source, config.retry_delay))
    }
}

impl<S: SnapshotSource> ModelDownloader<S> {
    pub fn with_source(source: S, retry_delay: Duration) -> Self {
        Self {
            source,
            retry_delay,
        }
    }

    pub fn download(&self, request: &DownloadRequest) -> Result<PathBuf> {
        let policy = RetryPolicy::new(request.retries, self.retry_delay)?;
        let model_path = request.destination();

        tracing::info!("Downloading: {} into {:?}...", request.repo_id, model_path);
        std::fs::create_dir_all(&model_path)?;

        retry(&policy, |attempt| {
            tracing::debug!("Attempt {}/{}", attempt, policy.max_attempts());
            self.source
                .snapshot(&request.repo_id, &request.revision, &model_path)
        })?;

        tracing::info!("Download complete: {:?}", model_path);
        Ok(model_path)
    }
}
