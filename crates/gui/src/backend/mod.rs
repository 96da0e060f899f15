//! Persistence boundary between the chart and the catalog/defaults server.
//!
//! The chart never awaits anything. It submits a [`BackendRequest`] tagged with a
//! [`RequestId`] and later drains [`BackendResponse`]s from [`ChartBackend::try_recv`] on the UI
//! thread, so all state mutation stays on one logical thread.

mod error;
mod http;
mod scripted;

pub use error::{ApiError, ApiResult};
pub use http::HttpBackend;
pub use scripted::ScriptedBackend;

use shared::{
    ApiAck, DefaultLayout, PartKey, SaveSelectionsRequest, SetDefaultsRequest, TeethCatalog,
};

/// Correlates a response with the request that caused it
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendRequest {
    /// `GET /api/teeth`
    LoadCatalog,
    /// `GET /api/defaults`
    LoadDefaults,
    /// `GET <resource path>` for one part's artwork
    LoadArtwork { key: PartKey, path: String },
    /// `POST /api/selections`
    SaveSelections(SaveSelectionsRequest),
    /// `POST /api/set-defaults`
    SetDefaults(SetDefaultsRequest),
}

impl BackendRequest {
    pub fn label(&self) -> &'static str {
        match self {
            BackendRequest::LoadCatalog => "load catalog",
            BackendRequest::LoadDefaults => "load defaults",
            BackendRequest::LoadArtwork { .. } => "load artwork",
            BackendRequest::SaveSelections(_) => "save selections",
            BackendRequest::SetDefaults(_) => "set defaults",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendReply {
    Catalog(ApiResult<TeethCatalog>),
    Defaults(ApiResult<DefaultLayout>),
    Artwork { key: PartKey, svg: ApiResult<String> },
    SelectionsSaved(ApiResult<ApiAck>),
    DefaultsSet(ApiResult<ApiAck>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub id: RequestId,
    pub reply: BackendReply,
}

/// Asynchronous request sink + completed-response source
pub trait ChartBackend {
    fn submit(&mut self, id: RequestId, request: BackendRequest);

    /// Next completed response, if any. Never blocks.
    fn try_recv(&mut self) -> Option<BackendResponse>;
}

/// Treat `success: false` as a failure
pub(crate) fn check_ack(ack: ApiAck) -> ApiResult<ApiAck> {
    if ack.success {
        Ok(ack)
    } else {
        Err(ApiError::Rejected(
            ack.message
                .unwrap_or_else(|| "server reported failure".to_string()),
        ))
    }
}
