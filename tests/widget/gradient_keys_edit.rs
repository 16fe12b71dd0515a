use std::sync::{Arc, Mutex};

use bevy::math::{Vec2, Vec4};
use gradient_keys::{
    AlphaKey, ColorKey, DragThresholds, Gradient, GradientMode, KeyId, Rgb, composite,
};
use gradient_keys_editor::ui::widgets::gradient_keys_edit::{
    DOUBLE_CLICK_TOLERANCE, DOUBLE_CLICK_WINDOW, GradientBarMaterial, GradientKeysEditProps,
    GradientKeysEditState, MAX_SAMPLES, pack_samples, parse_alpha,
};

fn red_to_blue() -> Gradient {
    Gradient::new(
        vec![
            ColorKey::new(0.0, Rgb::new(255, 0, 0)),
            ColorKey::new(1.0, Rgb::new(0, 0, 255)),
        ],
        vec![AlphaKey::new(0.0, 255), AlphaKey::new(1.0, 0)],
    )
}

#[test]
fn props_default_to_a_white_gradient() {
    let editor = GradientKeysEditProps::new().into_editor();
    assert_eq!(editor.value(), Gradient::white());
}

#[test]
fn props_configure_the_editor_session() {
    let thresholds = DragThresholds {
        drag_start: 4.0,
        delete_hint: 30.0,
        delete_release: 25.0,
    };
    let commits = Arc::new(Mutex::new(0));
    let sink = commits.clone();

    let mut editor = GradientKeysEditProps::new()
        .with_gradient(red_to_blue())
        .with_thresholds(thresholds)
        .with_on_change(move |_| *sink.lock().unwrap() += 1)
        .into_editor();

    assert_eq!(editor.value(), red_to_blue());
    assert_eq!(editor.thresholds(), thresholds);

    let _ = editor.set_mode(GradientMode::Fixed);
    assert_eq!(*commits.lock().unwrap(), 1);
}

#[test]
fn two_close_clicks_form_a_double_click() {
    let mut state = GradientKeysEditState::default();
    let position = Vec2::new(40.0, 12.0);

    assert!(!state.register_click(1.0, position));
    assert!(state.register_click(1.0 + DOUBLE_CLICK_WINDOW / 2.0, position + Vec2::X));
    // a third click starts over
    assert!(!state.register_click(1.2, position));
}

#[test]
fn slow_or_distant_clicks_are_separate() {
    let mut state = GradientKeysEditState::default();
    let position = Vec2::new(40.0, 12.0);

    assert!(!state.register_click(1.0, position));
    assert!(!state.register_click(1.0 + DOUBLE_CLICK_WINDOW * 2.0, position));

    let far = position + Vec2::new(DOUBLE_CLICK_TOLERANCE * 3.0, 0.0);
    assert!(!state.register_click(1.7, far));
}

#[test]
fn alpha_input_is_clamped_to_a_byte() {
    assert_eq!(parse_alpha("128"), Some(128));
    assert_eq!(parse_alpha(" 42 "), Some(42));
    assert_eq!(parse_alpha("300"), Some(255));
    assert_eq!(parse_alpha("-5"), Some(0));
    assert_eq!(parse_alpha(""), None);
    assert_eq!(parse_alpha("12a"), None);
}

#[test]
fn samples_pack_into_uniform_vectors() {
    let samples = composite(&red_to_blue().color_keys, &red_to_blue().alpha_keys);
    let (count, positions, colors) = pack_samples(&samples);

    assert_eq!(count, 2);
    assert_eq!(positions[0], Vec4::new(0.0, 1.0, 0.0, 0.0));
    assert_eq!(colors[0], Vec4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(colors[1], Vec4::new(0.0, 0.0, 1.0, 0.0));
}

#[test]
fn excess_samples_are_truncated() {
    let colors: Vec<_> = (0..MAX_SAMPLES + 8)
        .map(|i| ColorKey::new(i as f64 / (MAX_SAMPLES + 7) as f64, Rgb::BLACK))
        .collect();
    let samples = composite(&colors, &[AlphaKey::new(0.0, 255), AlphaKey::new(1.0, 255)]);
    let (count, _, _) = pack_samples(&samples);

    assert_eq!(count as usize, MAX_SAMPLES);
}

#[test]
fn material_flags_fixed_mode() {
    let gradient = red_to_blue().with_mode(GradientMode::Fixed);
    let material = GradientBarMaterial::from_samples(&gradient.samples(), gradient.mode);
    assert_eq!(material.mode, 1);
    assert_eq!(material.sample_count, 2);

    let material = GradientBarMaterial::from_samples(&gradient.samples(), GradientMode::Blend);
    assert_eq!(material.mode, 0);
}

#[test]
fn state_wraps_an_editor_built_from_props() {
    let mut state = GradientKeysEditState::new(
        GradientKeysEditProps::new()
            .with_gradient(red_to_blue())
            .into_editor(),
    );
    state.editor.select(KeyId(2));
    assert!(state.editor.edit_panel().is_alpha());
}
