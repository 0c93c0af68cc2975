use super::constants::*;
use rand::Rng;

/// Decorative particle placement, in percent of the backdrop and seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub left_pct: f32,
    pub top_pct: f32,
    pub duration_sec: f32,
    pub delay_sec: f32,
}

/// Random placement; positions cover the whole backdrop.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            left_pct: rng.gen::<f32>() * 100.0,
            top_pct: rng.gen::<f32>() * 100.0,
            duration_sec: SCATTER_DURATION_MIN_SEC + rng.gen::<f32>() * SCATTER_DURATION_SPAN_SEC,
            delay_sec: rng.gen::<f32>() * SCATTER_DELAY_MAX_SEC,
        })
        .collect()
}

/// Deterministic golden-angle placement, identical on every load.
pub fn golden_angle(count: usize) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let seed = i as f32 * GOLDEN_ANGLE_DEG;
            Particle {
                left_pct: (seed % 360.0) / 360.0 * 100.0,
                top_pct: ((seed * GOLDEN_RATIO) % 360.0) / 360.0 * 100.0,
                duration_sec: 3.0 + (i % 3) as f32,
                delay_sec: i as f32 * 0.2,
            }
        })
        .collect()
}
