use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::render_resource::*;
use bevy::shader::ShaderRef;
use gradient_keys::{GradientMode, SamplePoint};

const SHADER_GRADIENT_BAR_PATH: &str =
    "embedded://gradient_keys_editor/assets/shaders/gradient_bar.wgsl";
pub const MAX_SAMPLES: usize = 32;
const BORDER_RADIUS: f32 = 4.0;
const CHECKERBOARD_SIZE: f32 = 6.0;

/// Packs composited samples into the uniform layout: positions four to a
/// vector, colors as sRGB channels with `0..=1` opacity.
pub fn pack_samples(
    samples: &[SamplePoint],
) -> (u32, [Vec4; MAX_SAMPLES / 4], [Vec4; MAX_SAMPLES]) {
    if samples.len() > MAX_SAMPLES {
        warn!(
            "gradient has {} samples, only the first {MAX_SAMPLES} are drawn",
            samples.len()
        );
    }

    let sample_count = samples.len().min(MAX_SAMPLES) as u32;
    let mut positions = [Vec4::ZERO; MAX_SAMPLES / 4];
    let mut colors = [Vec4::ZERO; MAX_SAMPLES];

    for (i, sample) in samples.iter().take(MAX_SAMPLES).enumerate() {
        let color = sample.color;
        positions[i / 4][i % 4] = sample.time as f32;
        colors[i] = Vec4::new(
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            color.opacity() as f32,
        );
    }

    (sample_count, positions, colors)
}

#[derive(AsBindGroup, Asset, TypePath, Debug, Clone)]
pub struct GradientBarMaterial {
    #[uniform(0)]
    pub border_radius: f32,
    #[uniform(0)]
    pub checkerboard_size: f32,
    #[uniform(0)]
    pub sample_count: u32,
    #[uniform(0)]
    pub mode: u32,
    #[uniform(0)]
    pub positions: [Vec4; MAX_SAMPLES / 4],
    #[uniform(0)]
    pub colors: [Vec4; MAX_SAMPLES],
}

impl GradientBarMaterial {
    pub fn from_samples(samples: &[SamplePoint], mode: GradientMode) -> Self {
        let (sample_count, positions, colors) = pack_samples(samples);
        Self {
            border_radius: BORDER_RADIUS,
            checkerboard_size: CHECKERBOARD_SIZE,
            sample_count,
            mode: match mode {
                GradientMode::Blend => 0,
                GradientMode::Fixed => 1,
            },
            positions,
            colors,
        }
    }
}

impl UiMaterial for GradientBarMaterial {
    fn fragment_shader() -> ShaderRef {
        SHADER_GRADIENT_BAR_PATH.into()
    }
}
