//! In-memory [`ChartBackend`] for tests and the headless harness

use std::collections::VecDeque;

use shared::{ApiAck, DefaultLayout, TeethCatalog};

use super::{check_ack, ApiResult, BackendReply, BackendRequest, BackendResponse, ChartBackend, RequestId};

/// Records every submitted request. Replies are queued by the caller with [`respond`] and
/// handed to the chart in queue order, so tests control completion order exactly.
///
/// [`respond`]: ScriptedBackend::respond
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    submitted: Vec<(RequestId, BackendRequest)>,
    ready: VecDeque<BackendResponse>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> &[(RequestId, BackendRequest)] {
        &self.submitted
    }

    /// Id of the most recent request matching `pred`
    pub fn last_id(&self, pred: impl Fn(&BackendRequest) -> bool) -> Option<RequestId> {
        self.submitted
            .iter()
            .rev()
            .find(|(_, r)| pred(r))
            .map(|(id, _)| *id)
    }

    pub fn respond(&mut self, id: RequestId, reply: BackendReply) {
        self.ready.push_back(BackendResponse { id, reply });
    }

    /// Answer the latest catalog request
    pub fn respond_catalog(&mut self, catalog: ApiResult<TeethCatalog>) {
        if let Some(id) = self.last_id(|r| matches!(r, BackendRequest::LoadCatalog)) {
            self.respond(id, BackendReply::Catalog(catalog));
        }
    }

    /// Answer the latest defaults request
    pub fn respond_defaults(&mut self, defaults: ApiResult<DefaultLayout>) {
        if let Some(id) = self.last_id(|r| matches!(r, BackendRequest::LoadDefaults)) {
            self.respond(id, BackendReply::Defaults(defaults));
        }
    }

    /// Answer every artwork request with markup from `svg_for(path)`
    pub fn respond_all_artwork(&mut self, svg_for: impl Fn(&str) -> ApiResult<String>) {
        let replies: Vec<_> = self
            .submitted
            .iter()
            .filter_map(|(id, r)| match r {
                BackendRequest::LoadArtwork { key, path } => Some((
                    *id,
                    BackendReply::Artwork {
                        key: *key,
                        svg: svg_for(path),
                    },
                )),
                _ => None,
            })
            .collect();
        for (id, reply) in replies {
            self.respond(id, reply);
        }
    }

    /// Answer the latest save request. A `success: false` ack fails like it does over HTTP.
    pub fn respond_save(&mut self, ack: ApiResult<ApiAck>) {
        if let Some(id) = self.last_id(|r| matches!(r, BackendRequest::SaveSelections(_))) {
            self.respond(id, BackendReply::SelectionsSaved(ack.and_then(check_ack)));
        }
    }

    /// Answer the latest set-defaults request
    pub fn respond_set_defaults(&mut self, ack: ApiResult<ApiAck>) {
        if let Some(id) = self.last_id(|r| matches!(r, BackendRequest::SetDefaults(_))) {
            self.respond(id, BackendReply::DefaultsSet(ack.and_then(check_ack)));
        }
    }
}

impl ChartBackend for ScriptedBackend {
    fn submit(&mut self, id: RequestId, request: BackendRequest) {
        self.submitted.push((id, request));
    }

    fn try_recv(&mut self) -> Option<BackendResponse> {
        self.ready.pop_front()
    }
}
