use bevy::math::Vec2;
use gradient_keys::{
    BarRect, DELETE_HINT_THRESHOLD, DELETE_RELEASE_THRESHOLD, DragPhase, DragThresholds, KeyKind,
    PinDrag, Release,
};

const BAR: BarRect = BarRect {
    left: 100.0,
    top: 50.0,
    width: 200.0,
    height: 20.0,
};

fn dragging(row: KeyKind, position: f64) -> PinDrag {
    let mut pin = PinDrag::new(row, position);
    let start = Vec2::new(100.0 + 200.0 * position as f32, 60.0);
    pin.press(start);
    pin.drag(start + Vec2::new(10.0, 0.0), BAR);
    assert_eq!(pin.phase(), DragPhase::Dragging);
    pin
}

#[test]
fn thresholds_keep_their_tuned_values() {
    assert_eq!(DELETE_HINT_THRESHOLD, 20.0);
    assert_eq!(DELETE_RELEASE_THRESHOLD, 15.0);
    assert_eq!(DragThresholds::default().delete_hint, DELETE_HINT_THRESHOLD);
}

#[test]
fn position_follows_the_pointer_and_is_clamped() {
    let mut pin = dragging(KeyKind::Color, 0.5);

    assert_eq!(pin.drag(Vec2::new(150.0, 60.0), BAR), Some(0.25));
    assert_eq!(pin.drag(Vec2::new(500.0, 60.0), BAR), Some(1.0));
    assert_eq!(pin.drag(Vec2::new(20.0, 60.0), BAR), Some(0.0));
}

#[test]
fn release_inside_the_bar_commits_the_last_position() {
    let mut pin = dragging(KeyKind::Alpha, 0.5);
    pin.drag(Vec2::new(400.0, 55.0), BAR);

    assert_eq!(
        pin.release(Vec2::new(400.0, 55.0), BAR),
        Some(Release::Change(1.0))
    );
    assert_eq!(pin.phase(), DragPhase::Idle);
}

#[test]
fn release_without_dragging_reports_nothing() {
    let mut pin = PinDrag::new(KeyKind::Color, 0.3);
    pin.press(Vec2::new(160.0, 60.0));
    assert_eq!(pin.release(Vec2::new(160.0, 200.0), BAR), None);
}

#[test]
fn alpha_pins_delete_above_the_bar() {
    let mut pin = dragging(KeyKind::Alpha, 0.5);

    let above = Vec2::new(200.0, BAR.top - 25.0);
    pin.drag(above, BAR);
    assert!(pin.is_about_to_delete());
    assert_eq!(pin.release(above, BAR), Some(Release::Delete));
}

#[test]
fn alpha_pins_ignore_the_bottom_edge() {
    let mut pin = dragging(KeyKind::Alpha, 0.5);

    let below = Vec2::new(200.0, BAR.bottom() + 40.0);
    pin.drag(below, BAR);
    assert!(!pin.is_about_to_delete());
    assert_eq!(pin.release(below, BAR), Some(Release::Change(0.5)));
}

#[test]
fn color_pins_delete_below_the_bar() {
    let mut pin = dragging(KeyKind::Color, 0.25);

    let below = Vec2::new(150.0, BAR.bottom() + 21.0);
    pin.drag(below, BAR);
    assert!(pin.is_about_to_delete());
    assert_eq!(pin.release(below, BAR), Some(Release::Delete));
}

#[test]
fn delete_hint_is_reversible() {
    let mut pin = dragging(KeyKind::Color, 0.25);

    pin.drag(Vec2::new(150.0, BAR.bottom() + 30.0), BAR);
    assert!(pin.is_about_to_delete());

    let back = Vec2::new(150.0, BAR.bottom() + 5.0);
    pin.drag(back, BAR);
    assert!(!pin.is_about_to_delete());
    assert_eq!(pin.release(back, BAR), Some(Release::Change(0.25)));
}

#[test]
fn release_threshold_is_evaluated_on_release_coordinates() {
    let mut pin = dragging(KeyKind::Color, 0.5);
    pin.drag(Vec2::new(200.0, BAR.bottom() + 30.0), BAR);

    // 10px past the edge is inside the release threshold
    let release = Vec2::new(200.0, BAR.bottom() + 10.0);
    assert_eq!(pin.release(release, BAR), Some(Release::Change(0.5)));
}

#[test]
fn custom_thresholds_apply() {
    let thresholds = DragThresholds {
        drag_start: 0.0,
        delete_hint: 50.0,
        delete_release: 40.0,
    };
    let mut pin = PinDrag::new(KeyKind::Color, 0.5).with_thresholds(thresholds);
    pin.press(Vec2::new(200.0, 60.0));

    let pointer = Vec2::new(200.0, BAR.bottom() + 30.0);
    assert_eq!(pin.drag(pointer, BAR), Some(0.5));
    assert!(!pin.is_about_to_delete());
    assert_eq!(pin.release(pointer, BAR), Some(Release::Change(0.5)));
}

#[test]
fn bar_rect_from_center_and_size() {
    let bar = BarRect::from_center_size(Vec2::new(200.0, 60.0), Vec2::new(200.0, 20.0));
    assert_eq!(bar, BAR);
    assert_eq!(bar.vertical_fraction(Vec2::new(0.0, 55.0)), 0.25);
}
