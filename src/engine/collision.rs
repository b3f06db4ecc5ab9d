use std::f32::consts::TAU;

use eframe::egui::vec2;

use super::entity::{Entity, LayoutConfig};

pub const SEPARATION_EPSILON: f32 = 0.001;

#[derive(Clone, Copy, Debug)]
pub struct CollisionConfig {
    pub padding: f32,
    pub max_iterations: usize,
    pub split_ratio: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            max_iterations: 100,
            split_ratio: 0.5,
        }
    }
}

// Returns the number of passes that moved anything; equal to
// `max_iterations` when the budget ran out before a fixed point.
pub fn resolve_overlaps(
    entities: &mut [Entity],
    layout: &LayoutConfig,
    config: &CollisionConfig,
) -> usize {
    let count = entities.len();
    if count < 2 {
        return 0;
    }

    let radii = entities
        .iter()
        .map(|entity| entity.radius(layout))
        .collect::<Vec<_>>();

    for pass in 0..config.max_iterations {
        let mut adjusted = 0usize;

        for i in 0..count {
            for j in (i + 1)..count {
                let delta = entities[i].position - entities[j].position;
                let distance = delta.length();
                let min_distance = radii[i] + radii[j] + config.padding;
                if distance + SEPARATION_EPSILON >= min_distance {
                    continue;
                }

                let direction = if distance > SEPARATION_EPSILON {
                    delta / distance
                } else {
                    // Coincident centers have no separation axis; derive a
                    // stable one from the pair's indices.
                    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
                    vec2(angle.cos(), angle.sin())
                };

                let push = min_distance - distance;
                entities[i].position += direction * (push * config.split_ratio);
                entities[j].position -= direction * (push * (1.0 - config.split_ratio));
                adjusted += 1;
            }
        }

        if adjusted == 0 {
            return pass;
        }
    }

    config.max_iterations
}
