use shared::{ApiAck, DefaultLayout, MissingFlag, Offset, PartKey, PartKind, ShapeVariant};

use super::*;
use crate::backend::{ApiError, ScriptedBackend};
use crate::fixtures::{self, part, tooth};
use crate::harness::TestHarness;
use crate::interaction::{Modifiers, Point};

fn manipulating() -> TestHarness {
    let mut h = TestHarness::new();
    h.set_mode(ChartMode::Manipulate);
    h
}

#[test]
fn test_startup_requests_catalog_and_defaults() {
    let chart = ChartCoordinator::new(ScriptedBackend::new());
    let kinds: Vec<_> = chart
        .backend()
        .submitted()
        .iter()
        .map(|(_, r)| r.label())
        .collect();
    assert_eq!(kinds, vec!["load catalog", "load defaults"]);
    assert!(chart.is_loading());
}

#[test]
fn test_loading_until_both_loads_resolve() {
    let mut chart = ChartCoordinator::new(ScriptedBackend::new());
    chart
        .backend_mut()
        .respond_catalog(Ok(fixtures::full_catalog()));
    chart.poll();
    assert!(chart.is_loading());
    assert!(!chart.handle_part_event(
        part(11, PartKind::Crown),
        PartEvent::PrimaryClick(Modifiers::NONE)
    ));

    chart
        .backend_mut()
        .respond_defaults(Ok(DefaultLayout::default()));
    chart.poll();
    assert!(!chart.is_loading());
}

#[test]
fn test_catalog_issues_one_artwork_load_per_reference() {
    let mut chart = ChartCoordinator::new(ScriptedBackend::new());
    let catalog = fixtures::catalog_without(&[part(18, PartKind::Root)]);
    chart.backend_mut().respond_catalog(Ok(catalog));
    chart.poll();

    let artwork_loads = chart
        .backend()
        .submitted()
        .iter()
        .filter(|(_, r)| matches!(r, BackendRequest::LoadArtwork { .. }))
        .count();
    assert_eq!(artwork_loads, 63);
    assert_eq!(
        chart.artwork_state(part(18, PartKind::Crown)),
        Some(&ArtworkState::Pending)
    );
    assert_eq!(chart.artwork_state(part(18, PartKind::Root)), None);
}

#[test]
fn test_load_failures_leave_empty_interactive_chart() {
    let h = TestHarness::with_data(
        Err(ApiError::Network("refused".into())),
        Err(ApiError::Status {
            status: 500,
            message: "boom".into(),
        }),
    );
    assert!(!h.chart.is_loading());
    assert!(h.chart.catalog().is_empty());
    assert_eq!(h.chart.notices().len(), 2);
    assert_eq!(h.view(part(11, PartKind::Crown)).status, PartStatus::Unavailable);
}

#[test]
fn test_defaults_seed_layout() {
    let k = part(21, PartKind::Root);
    let h = TestHarness::with_data(
        Ok(fixtures::full_catalog()),
        Ok(fixtures::layout_with_offset(k, -4.0, 9.0)),
    );
    assert_eq!(h.offset(k), Offset::new(-4.0, 9.0));
    assert_eq!(h.offset(part(21, PartKind::Crown)), Offset::default());
}

// ── Selection ─────────────────────────────────────────────

#[test]
fn test_click_toggles_crown_selection() {
    let mut h = TestHarness::new();
    let k = part(11, PartKind::Crown);

    assert!(h.click(k));
    assert_eq!(h.chart.selection().snapshot().get(k), Some(&true));
    assert!(h.click(k));
    assert_eq!(h.chart.selection().snapshot().get(k), Some(&false));
}

#[test]
fn test_modified_click_in_select_mode_does_nothing() {
    let mut h = TestHarness::new();
    let k = part(11, PartKind::Crown);
    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    assert!(!h.click_with(k, shift));
    assert!(!h.is_selected(k));
    assert_eq!(h.scale(k), 1.0);
}

#[test]
fn test_select_mode_never_changes_layout() {
    let mut h = TestHarness::new();
    let k = part(33, PartKind::Root);
    h.drag(k, 10.0, 10.0, 2);
    h.scroll(k, 1.0);
    h.right_click(k);
    h.rotate(k, 15.0);

    assert_eq!(h.offset(k), Offset::default());
    assert!(h.transform(k).is_identity());
}

#[test]
fn test_manipulate_plain_click_never_selects() {
    let mut h = manipulating();
    let k = part(11, PartKind::Crown);
    assert!(!h.click(k));
    assert!(!h.is_selected(k));
}

#[test]
fn test_clear_selections_keeps_layout() {
    let mut h = TestHarness::new();
    let k = part(12, PartKind::Crown);
    h.click(k);
    h.toggle_mode();
    h.drag(k, 5.0, 0.0, 1);
    h.chart.clear_selections();

    assert!(!h.is_selected(k));
    assert_eq!(h.offset(k), Offset::new(5.0, 0.0));
}

#[test]
fn test_toggle_mode_keeps_values() {
    let mut h = TestHarness::new();
    let k = part(45, PartKind::Crown);
    h.click(k);
    h.toggle_mode();
    assert_eq!(h.chart.mode(), ChartMode::Manipulate);
    assert!(h.is_selected(k));
    h.toggle_mode();
    assert_eq!(h.chart.mode(), ChartMode::Select);
}

// ── Layout gestures ───────────────────────────────────────

#[test]
fn test_scroll_three_up_one_down() {
    let mut h = manipulating();
    let k = part(21, PartKind::Root);
    for _ in 0..3 {
        h.scroll(k, 1.0);
    }
    assert_eq!(h.scale(k), 1.3);
    h.scroll(k, -1.0);
    assert_eq!(h.scale(k), 1.2);
}

#[test]
fn test_scale_stays_in_range() {
    let mut h = manipulating();
    let k = part(17, PartKind::Crown);
    for _ in 0..30 {
        h.scroll(k, 1.0);
    }
    assert_eq!(h.scale(k), 2.0);
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    for _ in 0..30 {
        h.click_with(k, ctrl);
    }
    assert_eq!(h.scale(k), 0.5);
}

#[test]
fn test_right_click_cycles_crown_shape() {
    let mut h = manipulating();
    let k = part(36, PartKind::Crown);
    h.right_click(k);
    assert_eq!(h.shape(k), ShapeVariant::Round);
    h.right_click(k);
    assert_eq!(h.shape(k), ShapeVariant::Square);
}

#[test]
fn test_alt_click_and_right_click_share_cycle() {
    let mut h = manipulating();
    let a = part(36, PartKind::Root);
    let b = part(37, PartKind::Root);
    let alt = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };
    for _ in 0..3 {
        h.click_with(a, alt);
        h.right_click(b);
        assert_eq!(h.shape(a), h.shape(b));
    }
    assert_eq!(h.shape(a), ShapeVariant::Curved);
    h.right_click(a);
    assert_eq!(h.shape(a), ShapeVariant::Default);
}

#[test]
fn test_rotation_wraps() {
    let mut h = manipulating();
    let k = part(41, PartKind::Crown);
    h.rotate(k, -15.0);
    assert_eq!(h.transform(k).rotation, 345.0);
    for _ in 0..2 {
        h.rotate(k, 15.0);
    }
    assert_eq!(h.transform(k).rotation, 15.0);
}

// ── Availability and missing flags ────────────────────────

#[test]
fn test_part_without_artwork_is_inert() {
    let gone = part(28, PartKind::Root);
    let mut h = TestHarness::with_data(
        Ok(fixtures::catalog_without(&[gone])),
        Ok(DefaultLayout::default()),
    );

    assert!(!h.click(gone));
    h.toggle_mode();
    h.drag(gone, 10.0, 0.0, 1);
    h.scroll(gone, 1.0);

    let view = h.view(gone);
    assert_eq!(view.status, PartStatus::Unavailable);
    assert!(view.svg.is_none());
    assert!(!view.selected);
    assert_eq!(view.offset, Offset::default());
    assert_eq!(h.view(part(28, PartKind::Crown)).status, PartStatus::Ready);
}

#[test]
fn test_missing_flags_hide_parts() {
    let mut h = TestHarness::new();
    let t = tooth(26);
    let crown = PartKey::new(t, PartKind::Crown);
    let root = PartKey::new(t, PartKind::Root);

    h.set_missing(t, MissingFlag::Crown);
    assert_eq!(h.view(crown).status, PartStatus::Hidden);
    assert_eq!(h.view(root).status, PartStatus::Ready);

    h.set_missing(t, MissingFlag::Entire);
    assert!(h.view(crown).svg.is_none() && h.view(root).svg.is_none());
    assert!(!h.click(root));

    h.set_missing(t, MissingFlag::None);
    assert_eq!(h.view(crown).status, PartStatus::Ready);
    assert_eq!(h.view(root).status, PartStatus::Ready);
}

#[test]
fn test_hidden_part_state_is_retained() {
    let mut h = TestHarness::new();
    let k = part(31, PartKind::Crown);
    h.click(k);
    h.toggle_mode();
    h.drag(k, 7.0, 2.0, 1);

    h.set_missing(tooth(31), MissingFlag::Entire);
    h.set_missing(tooth(31), MissingFlag::None);

    assert!(h.is_selected(k));
    assert_eq!(h.offset(k), Offset::new(7.0, 2.0));
}

#[test]
fn test_hiding_mid_drag_ends_drag() {
    let mut h = manipulating();
    let k = part(15, PartKind::Root);
    h.send(k, PartEvent::PrimaryDown(Point::new(0.0, 0.0)));
    h.hover(k);
    h.set_missing(tooth(15), MissingFlag::Root);

    let view = h.view(k);
    assert!(!view.dragging && !view.hovered);
    h.set_missing(tooth(15), MissingFlag::None);
    assert!(!h.send(k, PartEvent::PrimaryMove(Point::new(5.0, 5.0))));
}

#[test]
fn test_failed_artwork_renders_nothing() {
    let mut chart = ChartCoordinator::new(ScriptedBackend::new());
    chart.backend_mut().respond_catalog(Ok(fixtures::full_catalog()));
    chart.backend_mut().respond_defaults(Ok(DefaultLayout::default()));
    chart.poll();
    let broken = part(22, PartKind::Crown);
    chart.backend_mut().respond_all_artwork(|path| {
        if path.contains("22%20crown") {
            Err(ApiError::Status {
                status: 404,
                message: "not found".into(),
            })
        } else {
            fixtures::svg_for_path(path)
        }
    });
    chart.poll();

    assert_eq!(chart.part_view(broken).status, PartStatus::Failed);
    assert!(chart.part_view(broken).svg.is_none());
    assert!(chart.part_view(part(22, PartKind::Root)).svg.is_some());
    // Nothing drawn, so nothing to click
    assert!(!chart.handle_part_event(broken, PartEvent::PrimaryClick(Modifiers::NONE)));
    assert!(!chart.selection().is_selected(broken));
}

#[test]
fn test_part_with_pending_artwork_is_inert() {
    let mut chart = ChartCoordinator::new(ScriptedBackend::new());
    chart.backend_mut().respond_catalog(Ok(fixtures::full_catalog()));
    chart.backend_mut().respond_defaults(Ok(DefaultLayout::default()));
    chart.poll();
    let k = part(11, PartKind::Crown);
    assert_eq!(chart.part_view(k).status, PartStatus::Loading);

    assert!(!chart.handle_part_event(k, PartEvent::PrimaryClick(Modifiers::NONE)));
    chart.toggle_mode();
    assert!(!chart.handle_part_event(k, PartEvent::Scroll(1.0)));
    assert_eq!(chart.layout().transform(k).scale, 1.0);

    chart.backend_mut().respond_all_artwork(fixtures::svg_for_path);
    chart.poll();
    assert!(chart.handle_part_event(k, PartEvent::Scroll(1.0)));
}

// ── Rendering through the chart ───────────────────────────

#[test]
fn test_view_reflects_selection_and_hover() {
    let mut h = TestHarness::new();
    let k = part(11, PartKind::Crown);

    let plain = h.view(k).svg.unwrap();
    assert!(plain.contains("#FFFFFF"));
    assert!(plain.contains(r#"viewBox="0 0 54 55""#));

    h.hover(k);
    assert!(h.view(k).svg.unwrap().contains("#93C5FD"));

    h.click(k);
    let selected = h.view(k).svg.unwrap();
    assert!(selected.contains("#3B82F6"));
    assert!(!selected.contains("#93C5FD"));
}

#[test]
fn test_version_bumps_on_change() {
    let mut h = TestHarness::new();
    let before = h.chart.version();
    h.click(part(11, PartKind::Crown));
    assert!(h.chart.version() > before);
}

// ── Persistence ───────────────────────────────────────────

#[test]
fn test_save_submits_snapshot_without_local_change() {
    let mut h = TestHarness::new();
    h.auto_ack = false;
    let k = part(11, PartKind::Crown);
    h.click(k);
    h.set_missing(tooth(48), MissingFlag::Entire);

    let before = h.chart.save_request();
    h.save();
    let submitted = h
        .chart
        .backend()
        .submitted()
        .iter()
        .rev()
        .find_map(|(_, r)| match r {
            BackendRequest::SaveSelections(body) => Some(body.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(submitted, before);
    assert_eq!(submitted.missing_teeth[&tooth(48)], MissingFlag::Entire);
    assert!(h.chart.is_saving());

    h.complete_save(Err(ApiError::Network("down".into())));
    assert!(!h.chart.is_saving());
    assert!(matches!(h.chart.notices().latest(), Some(Notice::SaveFailed(_))));
    assert!(h.is_selected(k));
    assert_eq!(h.chart.save_request(), before);
}

#[test]
fn test_save_success_notice() {
    let mut h = TestHarness::new();
    h.save();
    assert_eq!(h.chart.notices().latest(), Some(&Notice::Saved));
}

#[test]
fn test_save_notices_do_not_pile_up() {
    let mut h = TestHarness::new();
    for _ in 0..3 {
        h.save();
    }
    assert_eq!(h.chart.notices().len(), 1);

    let later = std::time::Instant::now() + crate::state::notices::SUCCESS_NOTICE_TTL;
    let before = h.chart.version();
    h.chart.expire_notices(later);
    assert!(h.chart.notices().is_empty());
    assert!(h.chart.version() > before);
}

#[test]
fn test_promote_then_reset_restores_promoted_values() {
    let mut h = manipulating();
    let k = part(11, PartKind::Crown);
    h.drag(k, 5.0, 3.0, 1);
    h.promote();
    assert_eq!(h.chart.notices().latest(), Some(&Notice::DefaultsUpdated));

    h.drag(k, 20.0, 20.0, 2);
    h.scroll(k, 1.0);
    h.reset_positions();

    assert_eq!(h.offset(k), Offset::new(5.0, 3.0));
    assert_eq!(h.scale(k), 1.0);
}

#[test]
fn test_reset_uses_loaded_defaults_not_zero() {
    let k = part(44, PartKind::Root);
    let mut h = TestHarness::with_data(
        Ok(fixtures::full_catalog()),
        Ok(fixtures::layout_with_offset(k, 2.0, 2.0)),
    );
    h.toggle_mode();
    h.drag(k, 8.0, 8.0, 1);
    h.reset_positions();
    assert_eq!(h.offset(k), Offset::new(2.0, 2.0));
}

#[test]
fn test_promote_failure_keeps_old_baseline_and_surfaces_values() {
    let mut h = manipulating();
    h.auto_ack = false;
    let k = part(11, PartKind::Crown);
    h.drag(k, 5.0, 3.0, 1);
    h.promote();
    assert!(h.chart.is_promoting());
    h.complete_promote(Err(ApiError::Status {
        status: 500,
        message: "disk full".into(),
    }));
    assert!(!h.chart.is_promoting());

    match h.chart.notices().latest() {
        Some(Notice::PromoteFailed { positions_json, .. }) => {
            let v: serde_json::Value = serde_json::from_str(positions_json).unwrap();
            assert_eq!(v["11"]["crown"]["x"], 5.0);
            assert_eq!(v["11"]["crown"]["y"], 3.0);
        }
        other => panic!("expected PromoteFailed, got {other:?}"),
    }

    h.reset_positions();
    assert_eq!(h.offset(k), Offset::default());
}

#[test]
fn test_promote_records_server_timestamp() {
    let mut h = manipulating();
    h.auto_ack = false;
    h.promote();
    let stamp = "2026-01-02T03:04:05Z".parse().unwrap();
    h.complete_promote(Ok(ApiAck {
        success: true,
        message: None,
        updated_at: Some(stamp),
    }));
    assert_eq!(h.chart.layout().baseline().updated_at, Some(stamp));
}

#[test]
fn test_promote_snapshot_is_taken_at_submit_time() {
    let mut h = manipulating();
    h.auto_ack = false;
    let k = part(13, PartKind::Crown);
    h.drag(k, 1.0, 1.0, 1);
    h.promote();
    h.drag(k, 9.0, 9.0, 1);
    h.complete_promote(Ok(ApiAck::ok()));

    h.reset_positions();
    assert_eq!(h.offset(k), Offset::new(1.0, 1.0));
}

#[test]
fn test_selection_summary_groups_by_tooth() {
    let mut h = TestHarness::new();
    h.click(part(11, PartKind::Crown));
    h.click(part(11, PartKind::Root));
    h.click(part(46, PartKind::Root));

    let summary = h.chart.selection_summary();
    assert_eq!(summary[&tooth(11)], vec![PartKind::Crown, PartKind::Root]);
    assert_eq!(summary[&tooth(46)], vec![PartKind::Root]);
}

#[test]
fn test_tooltip_mentions_state() {
    let mut h = TestHarness::new();
    let k = part(36, PartKind::Crown);
    h.click(k);
    h.toggle_mode();
    h.right_click(k);
    let tip = h.chart.part_tooltip(k);
    assert!(tip.contains("36"));
    assert!(tip.contains("round"));
}
