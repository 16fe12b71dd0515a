use gradient_keys::{
    AlphaKey, ColorKey, Gradient, GradientMode, Rgb, SamplePoint, composite, linear_gradient_css,
    sample_at,
};

const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn red_to_blue() -> Vec<ColorKey> {
    vec![ColorKey::new(0.0, RED), ColorKey::new(1.0, BLUE)]
}

fn times(samples: &[SamplePoint]) -> Vec<f64> {
    samples.iter().map(|s| s.time).collect()
}

fn assert_sorted(samples: &[SamplePoint]) {
    assert!(
        samples.windows(2).all(|pair| pair[0].time <= pair[1].time),
        "samples not sorted: {:?}",
        times(samples)
    );
}

#[test]
fn opaque_red_to_blue() {
    let alpha = [AlphaKey::new(0.0, 255), AlphaKey::new(1.0, 255)];
    let samples = composite(&red_to_blue(), &alpha);

    assert_eq!(
        linear_gradient_css(&samples, GradientMode::Blend),
        "linear-gradient(to right, rgba(255, 0, 0, 1) 0%, rgba(0, 0, 255, 1) 100%)"
    );
}

#[test]
fn interior_alpha_key_adds_an_interpolated_point() {
    let alpha = [
        AlphaKey::new(0.0, 255),
        AlphaKey::new(0.5, 128),
        AlphaKey::new(1.0, 255),
    ];
    let samples = composite(&red_to_blue(), &alpha);

    assert_eq!(times(&samples), vec![0.0, 0.5, 1.0]);
    assert_eq!(samples[0].color, RED.with_alpha(255.0));
    assert_eq!(samples[1].color, Rgb::new(127, 0, 127).with_alpha(128.0));
    assert_eq!(samples[2].color, BLUE.with_alpha(255.0));
}

#[test]
fn color_keys_pick_up_interpolated_alpha() {
    let colors = [
        ColorKey::new(0.0, RED),
        ColorKey::new(0.25, GREEN),
        ColorKey::new(1.0, BLUE),
    ];
    let alpha = [AlphaKey::new(0.0, 0), AlphaKey::new(1.0, 200)];
    let samples = composite(&colors, &alpha);

    assert_eq!(times(&samples), vec![0.0, 0.25, 1.0]);
    assert_eq!(samples[1].color, GREEN.with_alpha(50.0));
}

#[test]
fn alpha_key_at_a_color_time_overwrites_instead_of_duplicating() {
    let colors = [
        ColorKey::new(0.0, RED),
        ColorKey::new(0.4, GREEN),
        ColorKey::new(1.0, BLUE),
    ];
    let alpha = [
        AlphaKey::new(0.0, 255),
        AlphaKey::new(0.4, 10),
        AlphaKey::new(1.0, 255),
    ];
    let samples = composite(&colors, &alpha);

    assert_eq!(times(&samples), vec![0.0, 0.4, 1.0]);
    assert_eq!(samples[1].color, GREEN.with_alpha(10.0));
}

#[test]
fn single_interior_alpha_key_between_red_and_blue() {
    let samples = composite(&red_to_blue(), &[AlphaKey::new(0.5, 128)]);

    assert_eq!(times(&samples), vec![0.0, 0.5, 1.0]);
    assert_eq!(samples[0].color, RED.with_alpha(255.0));
    assert_eq!(samples[1].color, Rgb::new(127, 0, 127).with_alpha(128.0));
    assert_eq!(samples[2].color, BLUE.with_alpha(255.0));
}

#[test]
fn single_interior_keys_are_framed_by_defaults() {
    let samples = composite(&[ColorKey::new(0.2, RED)], &[AlphaKey::new(0.7, 100)]);

    assert_eq!(times(&samples), vec![0.0, 0.2, 0.7, 1.0]);
    assert_eq!(samples[0].color, Rgb::WHITE.with_alpha(255.0));
    assert_eq!(samples[1].color.rgb(), RED);
    assert_eq!(samples[2].color, Rgb::new(255, 159, 159).with_alpha(100.0));
    assert_eq!(samples[3].color, Rgb::WHITE.with_alpha(255.0));
}

#[test]
fn single_boundary_key_spans_the_whole_bar() {
    let samples = composite(&[ColorKey::new(1.0, GREEN)], &[AlphaKey::new(0.0, 60)]);

    assert_eq!(times(&samples), vec![0.0, 1.0]);
    for sample in &samples {
        assert_eq!(sample.color, GREEN.with_alpha(60.0));
    }
}

#[test]
fn nan_times_sort_to_the_end_without_panicking() {
    let colors: Vec<ColorKey> = (0..24)
        .map(|i| {
            let time = if i % 3 == 0 { f64::NAN } else { f64::from(i) / 23.0 };
            ColorKey::new(time, if i % 2 == 0 { RED } else { BLUE })
        })
        .collect();
    let alpha: Vec<AlphaKey> = (0..24)
        .map(|i| {
            let time = if i % 3 == 1 { f64::NAN } else { f64::from(i) / 23.0 };
            AlphaKey::new(time, (i * 10) as u8)
        })
        .collect();

    let samples = composite(&colors, &alpha);

    let first_nan = samples
        .iter()
        .position(|s| s.time.is_nan())
        .unwrap_or(samples.len());
    assert!(first_nan < samples.len());
    assert!(samples[first_nan..].iter().all(|s| s.time.is_nan()));
    assert_sorted(&samples[..first_nan]);

    let gradient = Gradient::new(colors, alpha);
    assert!(gradient.to_css().starts_with("linear-gradient(to right, "));
}

#[test]
fn empty_collections_render_opaque_white() {
    let samples = composite(&[], &[]);

    assert_eq!(times(&samples), vec![0.0, 1.0]);
    for sample in &samples {
        assert_eq!(sample.color, Rgb::WHITE.with_alpha(255.0));
    }
}

#[test]
fn empty_alpha_keys_default_to_opaque() {
    let samples = composite(&red_to_blue(), &[]);
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s.color.a == 255.0));
}

#[test]
fn coincident_color_keys_keep_emission_order() {
    let colors = [
        ColorKey::new(0.0, RED),
        ColorKey::new(0.5, GREEN),
        ColorKey::new(0.5, BLUE),
        ColorKey::new(1.0, RED),
    ];
    let samples = composite(&colors, &[]);

    assert_eq!(times(&samples), vec![0.0, 0.5, 0.5, 1.0]);
    assert_eq!(samples[1].color.rgb(), GREEN);
    assert_eq!(samples[2].color.rgb(), BLUE);
}

#[test]
fn output_is_sorted_even_for_out_of_range_times() {
    let colors = [
        ColorKey::new(1.5, BLUE),
        ColorKey::new(0.3, GREEN),
        ColorKey::new(-0.5, RED),
    ];
    let alpha = [
        AlphaKey::new(0.9, 20),
        AlphaKey::new(-0.2, 255),
        AlphaKey::new(0.6, 80),
    ];
    let samples = composite(&colors, &alpha);

    assert_eq!(samples.len(), 6);
    assert_sorted(&samples);
    assert!(samples.iter().all(|s| s.color.a.is_finite()));
}

#[test]
fn shuffled_inputs_composite_identically() {
    let colors = vec![
        ColorKey::new(0.0, RED),
        ColorKey::new(0.35, GREEN),
        ColorKey::new(0.8, BLUE),
        ColorKey::new(1.0, GREEN),
    ];
    let alpha = vec![
        AlphaKey::new(0.1, 30),
        AlphaKey::new(0.5, 200),
        AlphaKey::new(0.9, 90),
    ];
    let expected = composite(&colors, &alpha);
    assert_sorted(&expected);

    for rotation in 1..colors.len() {
        let mut shuffled_colors = colors.clone();
        shuffled_colors.rotate_left(rotation);
        let mut shuffled_alpha = alpha.clone();
        shuffled_alpha.reverse();
        shuffled_alpha.rotate_left(rotation % alpha.len());

        assert_eq!(composite(&shuffled_colors, &shuffled_alpha), expected);
    }
}

#[test]
fn fixed_mode_emits_hard_stops() {
    let colors = [
        ColorKey::new(0.0, RED),
        ColorKey::new(0.5, GREEN),
        ColorKey::new(1.0, BLUE),
    ];
    let gradient = Gradient::new(colors.to_vec(), vec![]).with_mode(GradientMode::Fixed);

    assert_eq!(
        gradient.to_css(),
        "linear-gradient(to right, rgba(255, 0, 0, 1) 0% 50%, \
         rgba(0, 255, 0, 1) 50% 100%, rgba(0, 0, 255, 1) 100% 100%)"
    );
}

#[test]
fn sampling_blends_or_holds_by_mode() {
    let samples = composite(&red_to_blue(), &[]);

    assert_eq!(
        sample_at(&samples, 0.5, GradientMode::Blend),
        Rgb::new(127, 0, 127).with_alpha(255.0)
    );
    assert_eq!(
        sample_at(&samples, 0.5, GradientMode::Fixed),
        RED.with_alpha(255.0)
    );
    assert_eq!(
        sample_at(&samples, -1.0, GradientMode::Blend),
        RED.with_alpha(255.0)
    );
    assert_eq!(
        sample_at(&samples, 2.0, GradientMode::Blend),
        BLUE.with_alpha(255.0)
    );
    assert_eq!(
        sample_at(&[], 0.5, GradientMode::Blend),
        Rgb::WHITE.with_alpha(255.0)
    );
}

#[test]
fn gradient_sample_interpolates_alpha() {
    let gradient = Gradient::new(
        vec![ColorKey::new(0.0, GREEN)],
        vec![AlphaKey::new(0.0, 0), AlphaKey::new(1.0, 200)],
    );
    assert_eq!(gradient.sample(0.5), GREEN.with_alpha(100.0));
}
