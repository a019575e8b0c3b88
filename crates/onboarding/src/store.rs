//! File-backed draft storage.
//!
//! A [`DraftStore`] owns one JSON file. Writes go to a sibling temp file
//! that is then renamed over the target, so readers never see a partially
//! written draft.

use std::ffi::OsString;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::draft::OnboardingDraft;

#[derive(Debug, thiserror::Error)]
pub enum DraftStoreError {
    #[error("Failed to access draft file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Draft file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct DraftStore<T = OnboardingDraft> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DraftStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the draft, first creating the file with a default value if it
    /// does not exist.
    pub async fn init(&self) -> Result<T, DraftStoreError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return self.read().await;
        }

        let value = T::default();
        self.write(&value).await?;
        tracing::info!(path = %self.path.display(), "Created new draft file");
        Ok(value)
    }

    pub async fn read(&self) -> Result<T, DraftStoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        serde_json::from_slice(&bytes).map_err(|source| DraftStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file contents atomically.
    pub async fn write(&self, value: &T) -> Result<(), DraftStoreError> {
        let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| DraftStoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| DraftStoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Draft written");
        Ok(())
    }

    // ---- private helpers ----

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> DraftStoreError {
        DraftStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
