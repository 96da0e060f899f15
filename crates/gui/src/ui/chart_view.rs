//! Central chart: two arches of tooth parts drawn from display-ready artwork

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use egui::{Color32, PointerButton, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use shared::{Arch, PartKey, PartKind, ToothId, LOWER_ARCH, UPPER_ARCH};

use crate::artwork::frame;
use crate::chart::{PartStatus, PartView};
use crate::i18n::t;
use crate::interaction::{ChartMode, Modifiers, PartEvent, Point};
use crate::state::AppState;
use crate::ui::tooth_menu;

const COLUMN_GAP: f32 = 6.0;
const ARCH_GAP: f32 = 36.0;

/// Part views cached per chart version, plus the image URIs handed to egui
#[derive(Default)]
pub struct ChartView {
    version: Option<u64>,
    views: HashMap<PartKey, PartView>,
    /// Image URI currently registered for each part
    uris: HashMap<PartKey, String>,
}

impl ChartView {
    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        if state.chart.is_loading() {
            ui.centered_and_justified(|ui| {
                ui.horizontal_centered(|ui| {
                    ui.spinner();
                    ui.label(t("chart.loading"));
                });
            });
            return;
        }

        self.refresh(ui.ctx(), state);

        egui::ScrollArea::both()
            .id_salt("chart_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(8.0);
                ui.weak(t("chart.upper"));
                self.arch_row(ui, state, Arch::Upper, &UPPER_ARCH);
                ui.add_space(ARCH_GAP);
                self.arch_row(ui, state, Arch::Lower, &LOWER_ARCH);
                ui.weak(t("chart.lower"));
            });
    }

    /// Rebuild cached views when the chart changed since the last frame
    fn refresh(&mut self, ctx: &egui::Context, state: &AppState) {
        let version = state.chart.version();
        if self.version == Some(version) {
            return;
        }
        self.version = Some(version);
        self.views = PartKey::all().map(|key| (key, state.chart.part_view(key))).collect();

        // Drop textures of artwork that is no longer displayed
        for (key, view) in &self.views {
            let uri = view.svg.as_deref().map(|svg| image_uri(*key, svg));
            if let Some(old) = self.uris.get(key) {
                if uri.as_ref() != Some(old) {
                    ctx.forget_image(old);
                }
            }
            match uri {
                Some(uri) => {
                    self.uris.insert(*key, uri);
                }
                None => {
                    self.uris.remove(key);
                }
            }
        }
    }

    fn arch_row(&mut self, ui: &mut Ui, state: &mut AppState, arch: Arch, teeth: &[ToothId]) {
        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing = Vec2::new(COLUMN_GAP, 2.0);
            for &tooth in teeth {
                ui.vertical(|ui| {
                    if arch == Arch::Upper {
                        tooth_label(ui, state, tooth);
                    }
                    for kind in arch.stacking() {
                        self.part_slot(ui, state, PartKey::new(tooth, kind));
                    }
                    if arch == Arch::Lower {
                        tooth_label(ui, state, tooth);
                    }
                });
            }
        });
    }

    fn part_slot(&mut self, ui: &mut Ui, state: &mut AppState, key: PartKey) {
        let frame = frame(key.kind);
        let (slot, _) = ui.allocate_exact_size(Vec2::new(frame.width, frame.height), Sense::hover());

        let Some(view) = self.views.get(&key) else {
            return;
        };

        match view.status {
            PartStatus::Unavailable => {
                ui.painter().rect_stroke(
                    slot.shrink(2.0),
                    3.0,
                    Stroke::new(1.0, Color32::from_gray(220)),
                    egui::StrokeKind::Inside,
                );
                ui.painter().text(
                    slot.center(),
                    egui::Align2::CENTER_CENTER,
                    t("part.unavailable"),
                    egui::FontId::proportional(10.0),
                    Color32::from_gray(170),
                );
                return;
            }
            PartStatus::Loading => {
                ui.put(slot, egui::Spinner::new().size(14.0));
                return;
            }
            PartStatus::Hidden | PartStatus::Failed => return,
            PartStatus::Ready => {}
        }

        let scale = view.transform.scale as f32;
        let center = slot.center() + Vec2::new(view.offset.x as f32, view.offset.y as f32);
        let image_rect = Rect::from_center_size(center, slot.size() * scale);

        let id = ui.id().with(("part", key.tooth.code(), key.kind.as_str()));
        let response = ui.interact(image_rect, id, Sense::click_and_drag());

        if let (Some(svg), Some(uri)) = (view.svg.as_ref(), self.uris.get(&key)) {
            let angle = (view.transform.rotation as f32).to_radians();
            egui::Image::from_bytes(uri.clone(), svg.clone().into_bytes())
                .rotate(angle, Vec2::splat(0.5))
                .paint_at(ui, image_rect);
        }

        let sample = PointerSample::read(ui, &response);
        let mode = state.chart.mode();
        let mut changed = false;
        for event in sample.events(view.hovered) {
            let effective = state.chart.handle_part_event(key, event);
            if consumes_wheel(mode, event) {
                ui.input_mut(|i| {
                    i.smooth_scroll_delta = Vec2::ZERO;
                    i.raw_scroll_delta = Vec2::ZERO;
                });
            }
            changed |= effective;
        }
        if changed {
            ui.ctx().request_repaint();
        }

        if response.hovered() && !response.dragged() {
            response.on_hover_text(state.chart.part_tooltip(key));
        }
    }
}

/// The wheel resizes the part under it; it must not also scroll the chart
fn consumes_wheel(mode: ChartMode, event: PartEvent) -> bool {
    mode == ChartMode::Manipulate && matches!(event, PartEvent::Scroll(_))
}

/// One frame of egui input on a part, as plain values
#[derive(Debug, Clone, Copy, Default)]
struct PointerSample {
    hovered: bool,
    dragging: bool,
    drag_started: bool,
    drag_stopped: bool,
    clicked: bool,
    secondary_clicked: bool,
    /// Where the primary button went down; drags are anchored here
    press_origin: Option<Pos2>,
    pointer: Option<Pos2>,
    modifiers: Modifiers,
    scroll: f32,
}

impl PointerSample {
    fn read(ui: &Ui, response: &egui::Response) -> Self {
        let (press_origin, m, scroll) =
            ui.input(|i| (i.pointer.press_origin(), i.modifiers, i.raw_scroll_delta.y));
        Self {
            hovered: response.hovered(),
            dragging: response.dragged_by(PointerButton::Primary),
            drag_started: response.drag_started_by(PointerButton::Primary),
            drag_stopped: response.drag_stopped_by(PointerButton::Primary),
            clicked: response.clicked_by(PointerButton::Primary),
            secondary_clicked: response.secondary_clicked(),
            press_origin,
            pointer: response.interact_pointer_pos(),
            modifiers: Modifiers {
                shift: m.shift,
                ctrl: m.ctrl,
                command: m.mac_cmd,
                alt: m.alt,
            },
            scroll,
        }
    }

    /// Gesture events for this frame, given the part's hover state from the last one
    fn events(&self, was_hovered: bool) -> Vec<PartEvent> {
        let mut events = Vec::new();
        let hovered = self.hovered || self.dragging;
        if hovered && !was_hovered {
            events.push(PartEvent::HoverEnter);
        }

        let point = |p: Pos2| Point::new(p.x as f64, p.y as f64);
        if self.drag_started {
            // egui reports the start past its drag threshold; catch up from the press point
            if let Some(origin) = self.press_origin.or(self.pointer) {
                events.push(PartEvent::PrimaryDown(point(origin)));
            }
            if let Some(p) = self.pointer {
                events.push(PartEvent::PrimaryMove(point(p)));
            }
        } else if self.dragging {
            if let Some(p) = self.pointer {
                events.push(PartEvent::PrimaryMove(point(p)));
            }
        }
        if self.drag_stopped {
            events.push(PartEvent::PrimaryUp);
        }

        if self.clicked {
            events.push(PartEvent::PrimaryClick(self.modifiers));
        }
        if self.secondary_clicked {
            events.push(PartEvent::SecondaryClick);
        }

        if self.hovered && self.scroll != 0.0 {
            events.push(PartEvent::Scroll(self.scroll));
        }

        if !hovered && was_hovered {
            events.push(PartEvent::HoverLeave);
        }
        events
    }
}

fn tooth_label(ui: &mut Ui, state: &mut AppState, tooth: ToothId) {
    let missing = state.chart.missing(tooth);
    let width = frame(PartKind::Crown).width;
    ui.allocate_ui(Vec2::new(width, 18.0), |ui| {
        ui.vertical_centered(|ui| {
            let text = egui::RichText::new(tooth.to_string()).small();
            let text = if missing.hides(PartKind::Crown) || missing.hides(PartKind::Root) {
                text.strikethrough().weak()
            } else {
                text
            };
            ui.menu_button(text, |ui| tooth_menu::show(ui, state, tooth))
                .response
                .on_hover_text(format!("{} {tooth}", t("part.tooth")));
        });
    });
}

/// Content-addressed URI so egui reloads the image whenever the markup changes
fn image_uri(key: PartKey, svg: &str) -> String {
    let mut hasher = DefaultHasher::new();
    svg.hash(&mut hasher);
    format!(
        "bytes://tooth-{}-{}-{:016x}.svg",
        key.tooth,
        key.kind.as_str(),
        hasher.finish()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: u8, kind: PartKind) -> PartKey {
        PartKey::new(ToothId::new(code).unwrap(), kind)
    }

    #[test]
    fn test_drag_is_anchored_at_press_point() {
        let sample = PointerSample {
            hovered: true,
            dragging: true,
            drag_started: true,
            press_origin: Some(Pos2::new(100.0, 100.0)),
            pointer: Some(Pos2::new(106.0, 100.0)),
            ..Default::default()
        };
        let events = sample.events(true);
        assert_eq!(
            events,
            vec![
                PartEvent::PrimaryDown(Point::new(100.0, 100.0)),
                PartEvent::PrimaryMove(Point::new(106.0, 100.0)),
            ]
        );
    }

    #[test]
    fn test_wheel_only_while_hovered() {
        let hovered = PointerSample {
            hovered: true,
            scroll: 2.0,
            ..Default::default()
        };
        assert_eq!(hovered.events(true), vec![PartEvent::Scroll(2.0)]);

        let away = PointerSample {
            scroll: 2.0,
            ..Default::default()
        };
        assert_eq!(away.events(true), vec![PartEvent::HoverLeave]);
    }

    #[test]
    fn test_wheel_is_consumed_in_manipulate_mode() {
        assert!(consumes_wheel(ChartMode::Manipulate, PartEvent::Scroll(1.0)));
        assert!(!consumes_wheel(ChartMode::Select, PartEvent::Scroll(1.0)));
        assert!(!consumes_wheel(ChartMode::Manipulate, PartEvent::SecondaryClick));
    }

    #[test]
    fn test_image_uri_tracks_content() {
        let k = key(11, PartKind::Crown);
        let a = image_uri(k, "<svg/>");
        assert_eq!(a, image_uri(k, "<svg/>"));
        assert_ne!(a, image_uri(k, "<svg></svg>"));
        assert!(a.starts_with("bytes://tooth-11-crown-"));
        assert!(a.ends_with(".svg"));
    }
}
