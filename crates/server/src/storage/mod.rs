//! Default-layout store: a single flat JSON record, replaced wholesale

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tempfile::NamedTempFile;
use shared::{DefaultLayout, Offset, PartMap, PartTransform, SaveSelectionsRequest};

use crate::error::StoreError;

/// File-backed default layout
#[derive(Debug, Clone)]
pub struct DefaultsStore {
    path: PathBuf,
}

impl DefaultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored layout. An absent file yields empty defaults with no timestamp.
    pub fn load(&self) -> Result<DefaultLayout, StoreError> {
        if !self.path.exists() {
            return Ok(DefaultLayout::default());
        }
        let json = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            operation: "read",
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored layout, stamping `updatedAt`.
    ///
    /// Written to a fresh temp file in the target directory and renamed over the target, so readers
    /// never see a partial record.
    pub fn save(
        &self,
        positions: PartMap<Offset>,
        transforms: PartMap<PartTransform>,
    ) -> Result<DefaultLayout, StoreError> {
        let layout = DefaultLayout {
            positions,
            transforms,
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&layout)?;

        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    operation: "create directory",
                    path: parent.to_path_buf(),
                    source,
                })?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        // Each save gets its own temp file, so overlapping saves never share a partial write
        let mut file = NamedTempFile::new_in(&parent).map_err(|source| StoreError::Io {
            operation: "create",
            path: parent.clone(),
            source,
        })?;
        file.write_all(json.as_bytes()).map_err(|source| StoreError::Io {
            operation: "write",
            path: file.path().to_path_buf(),
            source,
        })?;
        file.as_file().sync_all().map_err(|source| StoreError::Io {
            operation: "sync",
            path: file.path().to_path_buf(),
            source,
        })?;
        file.persist(&self.path).map_err(|e| StoreError::Io {
            operation: "rename",
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::info!("Saved default layout to {}", self.path.display());
        Ok(layout)
    }

    pub async fn load_async(&self) -> Result<DefaultLayout, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load()).await?
    }

    pub async fn save_async(
        &self,
        positions: PartMap<Offset>,
        transforms: PartMap<PartTransform>,
    ) -> Result<DefaultLayout, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(positions, transforms)).await?
    }
}

/// Best-effort sink for `POST /api/selections`: keeps the latest snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct SelectionLog {
    last: Arc<Mutex<Option<SaveSelectionsRequest>>>,
}

impl SelectionLog {
    pub fn record(&self, snapshot: SaveSelectionsRequest) {
        tracing::info!(
            "Selections saved: {} selected, {} positions, {} transforms, {} missing",
            snapshot.selections.iter().filter(|(_, v)| **v).count(),
            snapshot.positions.len(),
            snapshot.transforms.len(),
            snapshot.missing_teeth.len(),
        );
        if let Ok(mut last) = self.last.lock() {
            *last = Some(snapshot);
        }
    }

    pub fn last(&self) -> Option<SaveSelectionsRequest> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}
