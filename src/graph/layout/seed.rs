use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use crate::util::stable_pair;

const INITIAL_RADIUS: f32 = 10.0;

/// Phyllotaxis spiral around `center` in input order, nudged by a jitter
/// derived from the id so the same catalog always seeds the same picture.
pub(super) fn seed_position(index: usize, id: &str, center: Vec2) -> Vec2 {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());
    let radius = INITIAL_RADIUS * (0.5 + index as f32).sqrt();
    let angle = index as f32 * golden_angle;
    let (jx, jy) = stable_pair(id);

    center + vec2(angle.cos(), angle.sin()) * radius + vec2(jx, jy) * (INITIAL_RADIUS * 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_deterministic_and_spread() {
        let center = vec2(400.0, 300.0);
        let first = seed_position(0, "a", center);
        assert_eq!(first, seed_position(0, "a", center));

        let positions = (0..20)
            .map(|index| seed_position(index, &format!("n{index}"), center))
            .collect::<Vec<_>>();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.x.is_finite() && a.y.is_finite());
                assert!((*a - *b).length() > 0.0);
            }
        }
    }
}
