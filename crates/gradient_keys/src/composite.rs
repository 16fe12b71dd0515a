//! Merges independently timed color and alpha keys into one RGBA ramp.
//!
//! Color keys and alpha keys are edited on separate rows but rendered as a
//! single gradient. [`composite`] samples the alpha ramp at every color key
//! and the color ramp at every alpha key, so the result stays continuous
//! between user-placed keys of either kind.

use crate::color::{Rgb, Rgba};
use crate::keys::{AlphaKey, ColorKey, DEFAULT_ALPHA, Gradient, GradientMode};

/// A derived `(time, RGBA)` pair. Only produced by [`composite`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub time: f64,
    pub color: Rgba,
}

impl SamplePoint {
    /// Position along the bar as a percentage.
    pub fn percent(&self) -> f64 {
        self.time * 100.0
    }
}

trait TimedKey: Copy {
    fn time(&self) -> f64;
    fn at(self, time: f64) -> Self;
}

impl TimedKey for ColorKey {
    fn time(&self) -> f64 {
        self.time
    }

    fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }
}

impl TimedKey for AlphaKey {
    fn time(&self) -> f64 {
        self.time
    }

    fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }
}

/// Sorts a copy of `keys` and pads it so the keys span `[0, 1]`.
///
/// An empty list becomes `fallback` at 0 and 1. A single key on a boundary
/// gains a copy at the other boundary; a single interior key is framed by
/// `fallback` at both ends. NaN times sort to the end.
fn normalized<K: TimedKey>(keys: &[K], fallback: K) -> Vec<K> {
    let mut sorted = keys.to_vec();
    sorted.sort_by(|a, b| a.time().total_cmp(&b.time()));

    match sorted.as_slice() {
        [] => vec![fallback.at(0.0), fallback.at(1.0)],
        [only] if only.time() <= 0.0 => vec![*only, only.at(1.0)],
        [only] if only.time() >= 1.0 => vec![only.at(0.0), *only],
        [only] => {
            let mut padded = vec![fallback.at(0.0), *only, fallback.at(1.0)];
            padded.sort_by(|a, b| a.time().total_cmp(&b.time()));
            padded
        }
        _ => sorted,
    }
}

/// Picks the keys surrounding `time` in a sorted, non-empty slice.
///
/// The left key is the last one at or before `time`, the right key the first
/// one after it. Before the first key both sides are the first key; past the
/// last key both sides are the last key.
fn neighbors<K: TimedKey>(keys: &[K], time: f64) -> (K, K) {
    let Some(left) = keys.iter().rposition(|k| k.time() <= time) else {
        return (keys[0], keys[0]);
    };
    let right = keys[left + 1..]
        .iter()
        .position(|k| k.time() > time)
        .map(|offset| left + 1 + offset)
        .unwrap_or(keys.len() - 1);
    (keys[left], keys[right])
}

fn fraction(left: f64, right: f64, time: f64) -> Option<f64> {
    if left == right {
        None
    } else {
        Some((time - left) / (right - left))
    }
}

fn alpha_at(keys: &[AlphaKey], time: f64) -> f64 {
    let (left, right) = neighbors(keys, time);
    let left_alpha = f64::from(left.alpha);
    match fraction(left.time, right.time, time) {
        Some(t) => left_alpha + (f64::from(right.alpha) - left_alpha) * t,
        None => left_alpha,
    }
}

fn color_at(keys: &[ColorKey], time: f64) -> Rgb {
    let (left, right) = neighbors(keys, time);
    match fraction(left.time, right.time, time) {
        Some(t) => left.color.lerp(right.color, t),
        None => left.color,
    }
}

/// Composites color and alpha keys into time-ordered sample points.
///
/// Inputs do not need to be sorted. Points at equal times keep emission
/// order: color-derived points come before alpha-derived ones.
pub fn composite(color_keys: &[ColorKey], alpha_keys: &[AlphaKey]) -> Vec<SamplePoint> {
    let color_keys = normalized(color_keys, ColorKey::new(0.0, Rgb::WHITE));
    let alpha_keys = normalized(alpha_keys, AlphaKey::new(0.0, DEFAULT_ALPHA));

    let mut points: Vec<SamplePoint> = color_keys
        .iter()
        .map(|key| SamplePoint {
            time: key.time,
            color: key.color.with_alpha(alpha_at(&alpha_keys, key.time)),
        })
        .collect();
    let color_points = points.len();

    for key in &alpha_keys {
        let alpha = f64::from(key.alpha);
        let mut matched = false;
        for point in points[..color_points]
            .iter_mut()
            .filter(|p| p.time == key.time)
        {
            point.color.a = alpha;
            matched = true;
        }
        if matched {
            continue;
        }

        points.push(SamplePoint {
            time: key.time,
            color: color_at(&color_keys, key.time).with_alpha(alpha),
        });
    }

    points.sort_by(|a, b| a.time.total_cmp(&b.time));
    points
}

/// Renders samples as a left-to-right CSS `linear-gradient`.
///
/// [`GradientMode::Fixed`] emits two-position stops so each sample holds its
/// color up to the next sample.
pub fn linear_gradient_css(samples: &[SamplePoint], mode: GradientMode) -> String {
    let stops: Vec<String> = match mode {
        GradientMode::Blend => samples
            .iter()
            .map(|point| format!("{} {}%", point.color.to_css(), point.percent()))
            .collect(),
        GradientMode::Fixed => samples
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let end = samples.get(i + 1).map_or(100.0, SamplePoint::percent);
                format!("{} {}% {}%", point.color.to_css(), point.percent(), end)
            })
            .collect(),
    };
    format!("linear-gradient(to right, {})", stops.join(", "))
}

/// Evaluates composited samples at `time`.
///
/// Outside the sampled range the nearest sample is held. Empty input yields
/// opaque white.
pub fn sample_at(samples: &[SamplePoint], time: f64, mode: GradientMode) -> Rgba {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Rgb::WHITE.with_alpha(f64::from(DEFAULT_ALPHA));
    };
    if time <= first.time {
        return first.color;
    }
    if time >= last.time {
        return last.color;
    }

    let right_index = samples
        .iter()
        .position(|p| p.time > time)
        .unwrap_or(samples.len() - 1);
    let left = samples[right_index.saturating_sub(1)];
    let right = samples[right_index];

    match (mode, fraction(left.time, right.time, time)) {
        (GradientMode::Blend, Some(t)) => {
            let alpha = left.color.a + (right.color.a - left.color.a) * t;
            left.color.rgb().lerp(right.color.rgb(), t).with_alpha(alpha)
        }
        _ => left.color,
    }
}

impl Gradient {
    pub fn samples(&self) -> Vec<SamplePoint> {
        composite(&self.color_keys, &self.alpha_keys)
    }

    /// CSS `linear-gradient` for this gradient's keys and mode.
    pub fn to_css(&self) -> String {
        linear_gradient_css(&self.samples(), self.mode)
    }

    pub fn sample(&self, time: f64) -> Rgba {
        sample_at(&self.samples(), time, self.mode)
    }
}
