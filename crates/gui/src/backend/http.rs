//! reqwest-backed [`ChartBackend`]

use std::sync::mpsc::{self, Receiver, Sender};

use serde::de::DeserializeOwned;
use shared::{ApiAck, ApiErrorBody};

use super::{
    check_ack, ApiError, ApiResult, BackendReply, BackendRequest, BackendResponse, ChartBackend,
    RequestId,
};

/// Talks to the chart server. Each request runs as a task on a private tokio runtime; results
/// come back over a channel drained by the UI thread.
pub struct HttpBackend {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    base_url: String,
    tx: Sender<BackendResponse>,
    rx: Receiver<BackendResponse>,
    repaint: Option<egui::Context>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| ApiError::Network(format!("failed to start runtime: {e}")))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tx,
            rx,
            repaint: None,
        })
    }

    /// Wake the UI when a response lands
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ChartBackend for HttpBackend {
    fn submit(&mut self, id: RequestId, request: BackendRequest) {
        tracing::debug!("request #{id}: {}", request.label());
        let client = self.client.clone();
        let base = self.base_url.clone();
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();

        self.runtime.spawn(async move {
            let reply = execute(&client, &base, request).await;
            if tx.send(BackendResponse { id, reply }).is_err() {
                tracing::debug!("response #{id} dropped: chart is gone");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    fn try_recv(&mut self) -> Option<BackendResponse> {
        self.rx.try_recv().ok()
    }
}

async fn execute(client: &reqwest::Client, base: &str, request: BackendRequest) -> BackendReply {
    match request {
        BackendRequest::LoadCatalog => {
            BackendReply::Catalog(get_json(client, &format!("{base}/api/teeth")).await)
        }
        BackendRequest::LoadDefaults => {
            BackendReply::Defaults(get_json(client, &format!("{base}/api/defaults")).await)
        }
        BackendRequest::LoadArtwork { key, path } => {
            let url = if path.starts_with("http://") || path.starts_with("https://") {
                path
            } else {
                format!("{base}{path}")
            };
            BackendReply::Artwork {
                key,
                svg: get_text(client, &url).await,
            }
        }
        BackendRequest::SaveSelections(body) => {
            let url = format!("{base}/api/selections");
            BackendReply::SelectionsSaved(post_ack(client, &url, &body).await)
        }
        BackendRequest::SetDefaults(body) => {
            let url = format!("{base}/api/set-defaults");
            BackendReply::DefaultsSet(post_ack(client, &url, &body).await)
        }
    }
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> ApiResult<T> {
    let text = get_text(client, url).await?;
    Ok(serde_json::from_str(&text)?)
}

async fn get_text(client: &reqwest::Client, url: &str) -> ApiResult<String> {
    let response = client.get(url).send().await?;
    read_body(response).await
}

async fn post_ack<B: serde::Serialize>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
) -> ApiResult<ApiAck> {
    let response = client.post(url).json(body).send().await?;
    let text = read_body(response).await?;
    check_ack(serde_json::from_str(&text)?)
}

async fn read_body(response: reqwest::Response) -> ApiResult<String> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
