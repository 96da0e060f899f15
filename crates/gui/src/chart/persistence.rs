//! Save, reset and promote-to-default

use shared::{ApiAck, SaveSelectionsRequest, SetDefaultsRequest};

use super::ChartCoordinator;
use crate::backend::{ApiResult, BackendRequest, ChartBackend, RequestId};
use crate::state::Notice;

impl<B: ChartBackend> ChartCoordinator<B> {
    /// Snapshot of everything the save endpoint records
    pub fn save_request(&self) -> SaveSelectionsRequest {
        SaveSelectionsRequest {
            selections: self.selection.snapshot(),
            positions: self.layout.positions().clone(),
            transforms: self.layout.transforms().clone(),
            missing_teeth: self.missing.snapshot(),
        }
    }

    /// Submit the current snapshot. Local state is not changed by the outcome.
    pub fn save_all(&mut self) -> RequestId {
        let request = self.save_request();
        tracing::info!(
            "Saving {} selections, {} positions, {} transforms",
            request.selections.len(),
            request.positions.len(),
            request.transforms.len()
        );
        self.saves_in_flight += 1;
        self.submit(BackendRequest::SaveSelections(request))
    }

    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }

    pub(super) fn finish_save(&mut self, result: ApiResult<ApiAck>) {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        match result {
            Ok(_) => self.notify(Notice::Saved),
            Err(error) => {
                tracing::warn!("Save failed: {error}");
                self.notify(Notice::SaveFailed(error));
            }
        }
    }

    /// Revert positions and transforms to the cached default layout
    pub fn reset_positions(&mut self) {
        self.layout.reset_to_baseline();
        tracing::info!("Positions reset to defaults");
        self.touch();
    }

    /// Submit current positions/transforms as the new default layout
    pub fn promote_current_to_default(&mut self) -> RequestId {
        let snapshot = self.layout.snapshot();
        let request = SetDefaultsRequest {
            default_positions: snapshot.positions.clone(),
            default_transforms: snapshot.transforms.clone(),
        };
        let id = self.submit(BackendRequest::SetDefaults(request));
        self.pending_promotions.insert(id, snapshot);
        id
    }

    pub fn is_promoting(&self) -> bool {
        !self.pending_promotions.is_empty()
    }

    pub(super) fn finish_promote(&mut self, id: RequestId, result: ApiResult<ApiAck>) {
        let Some(mut snapshot) = self.pending_promotions.remove(&id) else {
            tracing::warn!("Unexpected set-defaults response #{id}");
            return;
        };
        match result {
            Ok(ack) => {
                snapshot.updated_at = ack.updated_at;
                self.layout.set_baseline(snapshot);
                tracing::info!("Default layout updated");
                self.notify(Notice::DefaultsUpdated);
            }
            Err(error) => {
                tracing::warn!("Promote to default failed: {error}");
                let positions_json =
                    serde_json::to_string_pretty(&snapshot.positions).unwrap_or_default();
                let transforms_json =
                    serde_json::to_string_pretty(&snapshot.transforms).unwrap_or_default();
                self.notify(Notice::PromoteFailed {
                    error,
                    positions_json,
                    transforms_json,
                });
            }
        }
    }
}
