//! `kinetic curve`: sample an interpolator and draw it as a bar chart

use kinetic_animation::Interpolator;

/// One sampled point of a curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub t: f32,
    pub value: f32,
}

/// Sample `samples` evenly spaced points including both endpoints
pub fn sample_curve(interpolator: &Interpolator, samples: usize) -> Vec<CurveSample> {
    let steps = samples.max(2) - 1;
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            CurveSample {
                t,
                value: interpolator.map(t),
            }
        })
        .collect()
}

/// Render samples as text rows. Values outside `[0, 1]` are marked with `<`
/// or `>` at the clipped end of the bar.
pub fn render_curve(samples: &[CurveSample], width: usize) -> Vec<String> {
    samples
        .iter()
        .map(|sample| {
            let cells = (sample.value.clamp(0.0, 1.0) * width as f32).round() as usize;
            let marker = if sample.value < 0.0 {
                "<"
            } else if sample.value > 1.0 {
                ">"
            } else {
                ""
            };
            format!(
                "t={:.2} {:>7.3} |{}{}",
                sample.t,
                sample.value,
                "#".repeat(cells),
                marker
            )
        })
        .collect()
}
