//! Applying backend responses

use shared::{DefaultLayout, PartKey, PartKind, TeethCatalog};

use super::{ArtworkState, ChartCoordinator};
use crate::artwork::VectorDocument;
use crate::backend::{ApiResult, BackendReply, BackendRequest, BackendResponse, ChartBackend, RequestId};
use crate::state::Notice;

impl<B: ChartBackend> ChartCoordinator<B> {
    /// Drain and apply every completed response. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Some(response) = self.backend.try_recv() {
            self.apply_response(response);
            applied += 1;
        }
        if applied > 0 {
            self.touch();
        }
        applied
    }

    fn apply_response(&mut self, BackendResponse { id, reply }: BackendResponse) {
        match reply {
            BackendReply::Catalog(result) => self.apply_catalog(id, result),
            BackendReply::Defaults(result) => self.apply_defaults(id, result),
            BackendReply::Artwork { key, svg } => self.apply_artwork(key, svg),
            BackendReply::SelectionsSaved(result) => self.finish_save(result),
            BackendReply::DefaultsSet(result) => self.finish_promote(id, result),
        }
    }

    fn apply_catalog(&mut self, id: RequestId, result: ApiResult<TeethCatalog>) {
        if self.catalog_request == Some(id) {
            self.catalog_request = None;
        }
        let catalog = match result {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::warn!("Catalog load failed: {error}");
                self.notify(Notice::LoadFailed {
                    what: "catalog",
                    error,
                });
                TeethCatalog::new()
            }
        };
        tracing::info!("Catalog: {} teeth", catalog.len());

        self.artwork.clear();
        let requests: Vec<(PartKey, String)> = catalog
            .iter()
            .flat_map(|(tooth, record)| {
                PartKind::ALL.into_iter().filter_map(move |kind| {
                    record
                        .get(kind)
                        .map(|path| (PartKey::new(*tooth, kind), path.to_string()))
                })
            })
            .collect();
        self.catalog = catalog;

        for (key, path) in requests {
            self.artwork.insert(key, ArtworkState::Pending);
            self.submit(BackendRequest::LoadArtwork { key, path });
        }
    }

    fn apply_defaults(&mut self, id: RequestId, result: ApiResult<DefaultLayout>) {
        if self.defaults_request == Some(id) {
            self.defaults_request = None;
        }
        let layout = match result {
            Ok(layout) => layout,
            Err(error) => {
                tracing::warn!("Defaults load failed: {error}");
                self.notify(Notice::LoadFailed {
                    what: "defaults",
                    error,
                });
                DefaultLayout::default()
            }
        };
        tracing::info!(
            "Defaults: {} positions, {} transforms",
            layout.positions.len(),
            layout.transforms.len()
        );
        self.layout.seed(layout);
    }

    fn apply_artwork(&mut self, key: PartKey, svg: ApiResult<String>) {
        let state = match svg {
            Ok(text) => match VectorDocument::parse(&text) {
                Ok(doc) => ArtworkState::Ready(doc),
                Err(e) => {
                    tracing::warn!("Artwork for {} {} unusable: {e}", key.tooth, key.kind.as_str());
                    ArtworkState::Failed
                }
            },
            Err(e) => {
                tracing::warn!("Artwork for {} {} not loaded: {e}", key.tooth, key.kind.as_str());
                ArtworkState::Failed
            }
        };
        self.artwork.insert(key, state);
    }
}
