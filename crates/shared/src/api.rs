//! HTTP request/response bodies shared by the chart client and the server

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::{MissingFlag, Offset, PartMap, PartTransform};
use crate::tooth::{PartKind, ToothId};

/// Ссылки на SVG коронки и корня зуба
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtworkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl ArtworkRecord {
    pub fn get(&self, kind: PartKind) -> Option<&str> {
        match kind {
            PartKind::Crown => self.crown.as_deref(),
            PartKind::Root => self.root.as_deref(),
        }
    }

    pub fn set(&mut self, kind: PartKind, path: String) {
        match kind {
            PartKind::Crown => self.crown = Some(path),
            PartKind::Root => self.root = Some(path),
        }
    }
}

/// Ответ `GET /api/teeth`
pub type TeethCatalog = BTreeMap<ToothId, ArtworkRecord>;

/// Тело `POST /api/set-defaults`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultsRequest {
    #[serde(default)]
    pub default_positions: PartMap<Offset>,
    #[serde(default)]
    pub default_transforms: PartMap<PartTransform>,
}

/// Тело `POST /api/selections`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSelectionsRequest {
    #[serde(default)]
    pub selections: PartMap<bool>,
    #[serde(default)]
    pub positions: PartMap<Offset>,
    #[serde(default)]
    pub transforms: PartMap<PartTransform>,
    #[serde(default)]
    pub missing_teeth: BTreeMap<ToothId, MissingFlag>,
}

/// Подтверждение записи
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiAck {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }
}

/// Тело ошибки `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
