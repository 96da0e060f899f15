//! Chart coordinator.
//!
//! Owns every aggregate map (selection, positions, transforms, missing flags), the global
//! [`ChartMode`], one [`PartInteraction`] per tooth-part and the loaded artwork. All mutation goes
//! through its methods; network work is delegated to a [`ChartBackend`] and folded back in by
//! [`ChartCoordinator::poll`].

mod loading;
mod persistence;

use std::collections::{BTreeMap, HashMap};

use shared::{DefaultLayout, MissingFlag, Offset, PartKey, PartKind, PartTransform, TeethCatalog, ToothId};

use crate::artwork::{self, RenderState, VectorDocument};
use crate::backend::{BackendRequest, ChartBackend, RequestId};
use crate::i18n::t;
use crate::interaction::{ChartMode, PartEffect, PartEvent, PartInteraction};
use crate::state::notices::SUCCESS_NOTICE_TTL;
use crate::state::{LayoutState, MissingState, Notice, NoticeLog, SelectionState};

/// Load state of one part's artwork
#[derive(Debug, Clone, PartialEq)]
pub enum ArtworkState {
    Pending,
    Ready(VectorDocument),
    Failed,
}

/// Why a part is or is not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartStatus {
    /// No artwork reference in the catalog
    Unavailable,
    /// Hidden by the tooth's missing flag
    Hidden,
    Loading,
    /// Artwork could not be fetched or parsed; draws nothing
    Failed,
    Ready,
}

/// Everything the view needs to draw one part
#[derive(Debug, Clone, PartialEq)]
pub struct PartView {
    pub key: PartKey,
    pub status: PartStatus,
    pub selected: bool,
    pub hovered: bool,
    pub dragging: bool,
    pub offset: Offset,
    pub transform: PartTransform,
    /// Display-ready markup, `None` when nothing should be drawn
    pub svg: Option<String>,
}

pub struct ChartCoordinator<B: ChartBackend> {
    backend: B,
    next_request: RequestId,
    mode: ChartMode,
    selection: SelectionState,
    layout: LayoutState,
    missing: MissingState,
    interactions: HashMap<PartKey, PartInteraction>,
    artwork: HashMap<PartKey, ArtworkState>,
    catalog: TeethCatalog,
    catalog_request: Option<RequestId>,
    defaults_request: Option<RequestId>,
    /// Layout snapshots submitted as the new default, by request
    pending_promotions: HashMap<RequestId, DefaultLayout>,
    saves_in_flight: usize,
    notices: NoticeLog,
    /// Bumped on every change that affects drawing
    version: u64,
}

impl<B: ChartBackend> ChartCoordinator<B> {
    /// Start the chart and request the catalog and stored defaults together
    pub fn new(backend: B) -> Self {
        let mut chart = Self {
            backend,
            next_request: 1,
            mode: ChartMode::default(),
            selection: SelectionState::default(),
            layout: LayoutState::default(),
            missing: MissingState::default(),
            interactions: HashMap::new(),
            artwork: HashMap::new(),
            catalog: TeethCatalog::new(),
            catalog_request: None,
            defaults_request: None,
            pending_promotions: HashMap::new(),
            saves_in_flight: 0,
            notices: NoticeLog::default(),
            version: 0,
        };
        chart.catalog_request = Some(chart.submit(BackendRequest::LoadCatalog));
        chart.defaults_request = Some(chart.submit(BackendRequest::LoadDefaults));
        chart
    }

    pub(crate) fn submit(&mut self, request: BackendRequest) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        self.backend.submit(id, request);
        id
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    // ── Accessors ─────────────────────────────────────────

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Catalog or defaults still outstanding; no parts are drawn
    pub fn is_loading(&self) -> bool {
        self.catalog_request.is_some() || self.defaults_request.is_some()
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn catalog(&self) -> &TeethCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn missing(&self, tooth: ToothId) -> MissingFlag {
        self.missing.get(tooth)
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Drop success notices past their display time
    pub fn expire_notices(&mut self, now: std::time::Instant) {
        if self.notices.expire(now, SUCCESS_NOTICE_TTL) > 0 {
            self.touch();
        }
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.dismiss(id);
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn artwork_state(&self, key: PartKey) -> Option<&ArtworkState> {
        self.artwork.get(&key)
    }

    /// The catalog references artwork for this part
    pub fn has_artwork(&self, key: PartKey) -> bool {
        self.catalog
            .get(&key.tooth)
            .and_then(|record| record.get(key.kind))
            .is_some()
    }

    /// Part under the pointer, if any
    pub fn hovered_part(&self) -> Option<PartKey> {
        self.interactions
            .iter()
            .find(|(_, i)| i.is_hovered())
            .map(|(key, _)| *key)
    }

    /// Part can receive gestures: artwork loaded and not hidden
    pub fn is_interactive(&self, key: PartKey) -> bool {
        !self.is_loading()
            && matches!(self.artwork.get(&key), Some(ArtworkState::Ready(_)))
            && !self.missing.hides(key)
    }

    // ── Gestures ──────────────────────────────────────────

    /// Route one input event to a part. Returns true when chart state changed.
    pub fn handle_part_event(&mut self, key: PartKey, event: PartEvent) -> bool {
        if !self.is_interactive(key) && !event.is_release() {
            return false;
        }
        let mode = self.mode;
        let interaction = self.interactions.entry(key).or_default();
        let was_hovered = interaction.is_hovered();
        let effect = interaction.handle(mode, event);
        let hover_changed = interaction.is_hovered() != was_hovered;

        let changed = match effect {
            Some(effect) => {
                self.apply_effect(key, effect);
                true
            }
            None => false,
        };
        if changed || hover_changed {
            self.touch();
        }
        changed
    }

    fn apply_effect(&mut self, key: PartKey, effect: PartEffect) {
        match effect {
            PartEffect::ToggleSelection => {
                let selected = self.selection.toggle(key);
                tracing::debug!("{} {} selected={selected}", key.tooth, key.kind.as_str());
            }
            PartEffect::MoveBy { dx, dy } => self.layout.move_by(key, dx, dy),
            PartEffect::ScaleBy(delta) => {
                let scale = self.layout.scale_by(key, delta);
                tracing::debug!("{} {} scale={scale:.1}", key.tooth, key.kind.as_str());
            }
            PartEffect::RotateBy(degrees) => {
                let rotation = self.layout.rotate_by(key, degrees);
                tracing::debug!("{} {} rotation={rotation}", key.tooth, key.kind.as_str());
            }
            PartEffect::CycleShape => {
                let shape = self.layout.cycle_shape(key);
                tracing::debug!("{} {} shape={}", key.tooth, key.kind.as_str(), shape.as_str());
            }
        }
    }

    // ── Chart-level operations ────────────────────────────

    /// Flip select/manipulate. Stored values are untouched.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        tracing::info!("Mode: {:?}", self.mode);
        self.touch();
    }

    pub fn clear_selections(&mut self) {
        self.selection.clear();
        self.touch();
    }

    /// Set a tooth's missing flag. State of the parts it hides is kept for when they return.
    pub fn set_missing(&mut self, tooth: ToothId, flag: MissingFlag) {
        self.missing.set(tooth, flag);
        for kind in PartKind::ALL {
            let key = PartKey::new(tooth, kind);
            if flag.hides(kind) {
                if let Some(interaction) = self.interactions.get_mut(&key) {
                    interaction.reset();
                }
            }
        }
        tracing::info!("Tooth {tooth} missing={}", flag.as_str());
        self.touch();
    }

    /// Selected parts grouped by tooth
    pub fn selection_summary(&self) -> BTreeMap<ToothId, Vec<PartKind>> {
        self.selection.by_tooth()
    }

    // ── View ──────────────────────────────────────────────

    pub fn part_view(&self, key: PartKey) -> PartView {
        let interaction = self.interactions.get(&key);
        let hovered = interaction.is_some_and(|i| i.is_hovered());
        let dragging = interaction.is_some_and(|i| i.is_dragging());
        let selected = self.selection.is_selected(key);
        let transform = self.layout.transform(key);

        let status = if !self.has_artwork(key) {
            PartStatus::Unavailable
        } else if self.missing.hides(key) {
            PartStatus::Hidden
        } else {
            match self.artwork.get(&key) {
                Some(ArtworkState::Ready(_)) => PartStatus::Ready,
                Some(ArtworkState::Failed) => PartStatus::Failed,
                Some(ArtworkState::Pending) | None => PartStatus::Loading,
            }
        };

        let svg = match (status, self.artwork.get(&key)) {
            (PartStatus::Ready, Some(ArtworkState::Ready(raw))) => {
                display_svg(raw, key.kind, RenderState { selected, hovered }, &transform)
            }
            _ => None,
        };

        PartView {
            key,
            status,
            selected,
            hovered,
            dragging,
            offset: self.layout.offset(key),
            transform,
            svg,
        }
    }

    /// Hover text: tooth, part, selection, shape and what the current mode does
    pub fn part_tooltip(&self, key: PartKey) -> String {
        let mut text = format!("{} {} {}", t("part.tooth"), key.tooth, t(part_label_key(key.kind)));
        if self.selection.is_selected(key) {
            text.push_str(&format!(" ({})", t("part.selected")));
        }
        let shape = self.layout.transform(key).shape;
        if shape != shared::ShapeVariant::Default {
            text.push_str(&format!(" [{}: {}]", t("part.shape"), shape.as_str()));
        }
        let hint = match self.mode {
            ChartMode::Select => t("hint.select"),
            ChartMode::Manipulate => t("hint.manipulate"),
        };
        text.push_str(" - ");
        text.push_str(hint);
        text
    }
}

fn part_label_key(kind: PartKind) -> &'static str {
    match kind {
        PartKind::Crown => "part.crown",
        PartKind::Root => "part.root",
    }
}

fn display_svg(
    raw: &VectorDocument,
    kind: PartKind,
    state: RenderState,
    transform: &PartTransform,
) -> Option<String> {
    let mut doc = artwork::render(raw, kind, state, transform)?;
    artwork::fit_frame(&mut doc, kind);
    match doc.to_svg_string() {
        Ok(svg) => Some(svg),
        Err(e) => {
            tracing::warn!("Cannot serialize {} artwork: {e}", kind.as_str());
            None
        }
    }
}

#[cfg(test)]
mod tests;
