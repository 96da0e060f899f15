//! Headless chart harness.
//!
//! Drives a [`ChartCoordinator`] over a [`ScriptedBackend`] so gestures, persistence round trips
//! and rendering can be exercised without a window or a server.

use shared::{
    ApiAck, DefaultLayout, MissingFlag, Offset, PartKey, PartTransform, ShapeVariant, TeethCatalog,
    ToothId,
};

use crate::backend::{ApiResult, ScriptedBackend};
use crate::chart::{ChartCoordinator, PartView};
use crate::fixtures;
use crate::interaction::{ChartMode, Modifiers, PartEvent, Point};

/// Headless harness around a scripted chart
pub struct TestHarness {
    pub chart: ChartCoordinator<ScriptedBackend>,
    /// Answer saves and promotions immediately with success
    pub auto_ack: bool,
}

impl TestHarness {
    /// Chart loaded with every tooth, empty defaults and all artwork
    pub fn new() -> Self {
        Self::with_data(Ok(fixtures::full_catalog()), Ok(DefaultLayout::default()))
    }

    /// Chart loaded from the given catalog/defaults results
    pub fn with_data(catalog: ApiResult<TeethCatalog>, defaults: ApiResult<DefaultLayout>) -> Self {
        let mut harness = Self::loading();
        harness.chart.backend_mut().respond_catalog(catalog);
        harness.chart.backend_mut().respond_defaults(defaults);
        harness.chart.poll();
        harness
            .chart
            .backend_mut()
            .respond_all_artwork(fixtures::svg_for_path);
        harness.chart.poll();
        harness
    }

    /// Chart whose startup loads are still outstanding
    pub fn loading() -> Self {
        Self {
            chart: ChartCoordinator::new(ScriptedBackend::new()),
            auto_ack: true,
        }
    }

    // ── Mode ──────────────────────────────────────────────────

    pub fn toggle_mode(&mut self) {
        self.chart.toggle_mode();
    }

    pub fn set_mode(&mut self, mode: ChartMode) {
        if self.chart.mode() != mode {
            self.chart.toggle_mode();
        }
    }

    // ── Gestures ──────────────────────────────────────────────

    pub fn send(&mut self, key: PartKey, event: PartEvent) -> bool {
        self.chart.handle_part_event(key, event)
    }

    pub fn click(&mut self, key: PartKey) -> bool {
        self.click_with(key, Modifiers::NONE)
    }

    pub fn click_with(&mut self, key: PartKey, modifiers: Modifiers) -> bool {
        self.send(key, PartEvent::PrimaryClick(modifiers))
    }

    /// Press, move in `steps` equal increments by (dx, dy), release
    pub fn drag(&mut self, key: PartKey, dx: f64, dy: f64, steps: u32) {
        let steps = steps.max(1);
        let start = Point::new(100.0, 100.0);
        self.send(key, PartEvent::PrimaryDown(start));
        for i in 1..=steps {
            let f = f64::from(i) / f64::from(steps);
            self.send(
                key,
                PartEvent::PrimaryMove(Point::new(start.x + dx * f, start.y + dy * f)),
            );
        }
        self.send(key, PartEvent::PrimaryUp);
    }

    pub fn scroll(&mut self, key: PartKey, delta: f32) -> bool {
        self.send(key, PartEvent::Scroll(delta))
    }

    pub fn right_click(&mut self, key: PartKey) -> bool {
        self.send(key, PartEvent::SecondaryClick)
    }

    pub fn rotate(&mut self, key: PartKey, degrees: f64) -> bool {
        self.send(key, PartEvent::Rotate(degrees))
    }

    pub fn hover(&mut self, key: PartKey) {
        self.send(key, PartEvent::HoverEnter);
    }

    pub fn leave(&mut self, key: PartKey) {
        self.send(key, PartEvent::HoverLeave);
    }

    // ── Chart operations ──────────────────────────────────────

    pub fn set_missing(&mut self, tooth: ToothId, flag: MissingFlag) {
        self.chart.set_missing(tooth, flag);
    }

    pub fn reset_positions(&mut self) {
        self.chart.reset_positions();
    }

    /// Save; with `auto_ack` the server answers at once
    pub fn save(&mut self) {
        self.chart.save_all();
        if self.auto_ack {
            self.complete_save(Ok(ApiAck::ok()));
        }
    }

    /// Promote; with `auto_ack` the server answers at once
    pub fn promote(&mut self) {
        self.chart.promote_current_to_default();
        if self.auto_ack {
            self.complete_promote(Ok(ApiAck::ok()));
        }
    }

    pub fn complete_save(&mut self, result: ApiResult<ApiAck>) {
        self.chart.backend_mut().respond_save(result);
        self.chart.poll();
    }

    pub fn complete_promote(&mut self, result: ApiResult<ApiAck>) {
        self.chart.backend_mut().respond_set_defaults(result);
        self.chart.poll();
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn is_selected(&self, key: PartKey) -> bool {
        self.chart.selection().is_selected(key)
    }

    pub fn offset(&self, key: PartKey) -> Offset {
        self.chart.layout().offset(key)
    }

    pub fn transform(&self, key: PartKey) -> PartTransform {
        self.chart.layout().transform(key)
    }

    pub fn scale(&self, key: PartKey) -> f64 {
        self.transform(key).scale
    }

    pub fn shape(&self, key: PartKey) -> ShapeVariant {
        self.transform(key).shape
    }

    pub fn view(&self, key: PartKey) -> PartView {
        self.chart.part_view(key)
    }

    /// Parts with drawable output
    pub fn drawn_parts(&self) -> usize {
        PartKey::all()
            .filter(|k| self.chart.part_view(*k).svg.is_some())
            .count()
    }

    pub fn selected_parts(&self) -> Vec<PartKey> {
        self.chart
            .selection_summary()
            .into_iter()
            .flat_map(|(tooth, kinds)| kinds.into_iter().map(move |k| PartKey::new(tooth, k)))
            .collect()
    }

    pub fn missing(&self, tooth: ToothId) -> MissingFlag {
        self.chart.missing(tooth)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::part;
    use shared::PartKind;

    #[test]
    fn test_new_harness_is_loaded() {
        let h = TestHarness::new();
        assert!(!h.chart.is_loading());
        assert_eq!(h.drawn_parts(), 64);
    }

    #[test]
    fn test_loading_harness_draws_nothing() {
        let h = TestHarness::loading();
        assert!(h.chart.is_loading());
        assert_eq!(h.drawn_parts(), 0);
    }

    #[test]
    fn test_drag_in_steps_accumulates() {
        let mut h = TestHarness::new();
        h.set_mode(ChartMode::Manipulate);
        let k = part(14, PartKind::Crown);
        h.drag(k, 12.0, -6.0, 4);
        assert_eq!(h.offset(k), Offset::new(12.0, -6.0));
        assert!(!h.view(k).dragging);
    }

    #[test]
    fn test_selected_parts() {
        let mut h = TestHarness::new();
        h.click(part(11, PartKind::Crown));
        h.click(part(38, PartKind::Root));
        assert_eq!(
            h.selected_parts(),
            vec![part(11, PartKind::Crown), part(38, PartKind::Root)]
        );
    }
}
