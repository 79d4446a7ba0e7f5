use crate::auth::Credentials;
use crate::error::{Error, Result};
use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use tempfile::NamedTempFile;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Fetches every file of a repository revision into a local directory.
pub trait SnapshotSource {
    fn snapshot(&self, repo_id: &str, revision: &str, local_dir: &Path) -> Result<PathBuf>;
}

/// Snapshot source backed by the Hugging Face Hub.
///
/// Transfers, integrity checks and deduplication all happen in the hub
/// cache managed by `hf-hub`; this type only lists the repository and
/// places each cached file under the requested directory.
pub struct HubSnapshot {
    api: Api,
}

impl HubSnapshot {
    pub fn new(credentials: &Credentials, cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut builder = ApiBuilder::new()
            .with_token(Some(credentials.token().to_string()))
            .with_progress(true);
        if let Some(cache_dir) = cache_dir {
            builder = builder.with_cache_dir(cache_dir);
        }

        let api = builder.build()?;
        Ok(Self { api })
    }
}

impl SnapshotSource for HubSnapshot {
    fn snapshot(&self, repo_id: &str, revision: &str, local_dir: &Path) -> Result<PathBuf> {
        let repo = self.api.repo(Repo::with_revision(
            repo_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let info = repo.info()?;
        tracing::info!("{} files in {}@{}", info.siblings.len(), repo_id, revision);

        for sibling in info.siblings {
            let relative = safe_relative(&sibling.rfilename)?;
            let cached = repo.get(&sibling.rfilename)?;

            if place_file(&cached, &local_dir.join(relative))? {
                tracing::debug!("Placed {}", sibling.rfilename);
            } else {
                tracing::debug!("Up to date: {}", sibling.rfilename);
            }
        }

        Ok(local_dir.to_path_buf())
    }
}

/// Rejects repository filenames that would escape the destination.
fn safe_relative(rfilename: &str) -> Result<&Path> {
    let path = Path::new(rfilename);
    let ok = path.components().count() > 0
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if !ok {
        return Err(Error::DownloadFailed(format!(
            "Refusing unsafe repository path: {}",
            rfilename
        )));
    }
    Ok(path)
}

/// Puts a cached file at `target`. Returns `false` if `target` is already
/// a hard link to the cached blob.
fn place_file(cached: &Path, target: &Path) -> Result<bool> {
    // The hub cache hands out symlinks into its blob store.
    let source = fs::canonicalize(cached)?;
    let source_meta = fs::metadata(&source)?;

    if let Ok(existing) = fs::symlink_metadata(target) {
        if is_same_file(&source_meta, &existing) {
            return Ok(false);
        }
        fs::remove_file(target)?;
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    if fs::hard_link(&source, target).is_err() {
        copy_into_place(&source, target)?;
    }

    Ok(true)
}

/// Copies through a temporary file next to `target`, so an interrupted copy
/// never leaves a partial file under the final name.
fn copy_into_place(source: &Path, target: &Path) -> Result<()> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Removed on drop if anything fails before `persist`.
    let mut partial = NamedTempFile::new_in(parent)?;
    io::copy(&mut fs::File::open(source)?, partial.as_file_mut())?;
    partial.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn is_same_file(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    b.is_file() && a.dev() == b.dev() && a.ino() == b.ino()
}

// Without inode identity a copied file cannot be trusted, so it is replaced.
#[cfg(not(unix))]
fn is_same_file(_a: &fs::Metadata, _b: &fs::Metadata) -> bool {
    false
}
