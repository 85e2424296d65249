use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

const MIN_DISTANCE_SQ: f32 = 1.0;

/// A link resolved to node indices, with its stiffness split between the two
/// ends so low-degree nodes move more than hubs.
#[derive(Clone, Copy, Debug)]
pub(super) struct Spring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) strength: f32,
    pub(super) bias: f32,
}

/// Deterministic unit direction for coincident pairs.
fn jiggle(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin())
}

pub(super) fn apply_springs(
    springs: &[Spring],
    positions: &[Vec2],
    velocities: &mut [Vec2],
    distance: f32,
    alpha: f32,
) {
    for spring in springs {
        let (source, target) = (spring.source, spring.target);
        let mut delta =
            (positions[target] + velocities[target]) - (positions[source] + velocities[source]);
        if delta.length_sq() <= f32::EPSILON {
            delta = jiggle(source, target) * 0.01;
        }

        let length = delta.length();
        let correction = delta * ((length - distance) / length * alpha * spring.strength);
        velocities[target] -= correction * spring.bias;
        velocities[source] += correction * (1.0 - spring.bias);
    }
}

pub(super) fn apply_repulsion(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    strength: f32,
    alpha: f32,
) {
    if strength <= 0.0 {
        return;
    }

    let node_count = positions.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let mut delta = positions[j] - positions[i];
            if delta.length_sq() <= f32::EPSILON {
                delta = jiggle(i, j);
            }

            let distance_sq = delta.length_sq().max(MIN_DISTANCE_SQ);
            let push = delta * (strength * alpha / distance_sq);
            velocities[i] -= push;
            velocities[j] += push;
        }
    }
}

pub(super) fn apply_centering(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    center: Vec2,
    strength: f32,
    alpha: f32,
) {
    for (position, velocity) in positions.iter().zip(velocities.iter_mut()) {
        *velocity += (center - *position) * (strength * alpha);
    }
}

/// Pushes apart every pair whose predicted positions sit closer than
/// `radius * 2`. Not scaled by alpha: overlap is corrected even when cool.
pub(super) fn apply_collisions(
    positions: &[Vec2],
    velocities: &mut [Vec2],
    radius: f32,
    strength: f32,
) {
    let min_distance = radius * 2.0;
    if min_distance <= 0.0 || strength <= 0.0 {
        return;
    }

    let node_count = positions.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let mut delta = (positions[i] + velocities[i]) - (positions[j] + velocities[j]);
            if delta.length_sq() <= f32::EPSILON {
                delta = jiggle(i, j) * 0.01;
            }

            let distance = delta.length();
            if distance >= min_distance {
                continue;
            }

            let push = delta * ((min_distance - distance) / distance * strength * 0.5);
            velocities[i] += push;
            velocities[j] -= push;
        }
    }
}
