use eframe::egui::{Vec2, vec2};

use super::entity::{Entity, LayoutConfig};

#[derive(Clone, Copy, Debug)]
pub struct ConnectionConfig {
    pub arrow_offset: f32,
    pub midpoint_marker_min_length: f32,
    pub midpoint_marker_length: f32,
    pub use_ring_positions: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            arrow_offset: 4.0,
            midpoint_marker_min_length: 200.0,
            midpoint_marker_length: 14.0,
            use_ring_positions: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionLine {
    pub from: usize,
    pub to: usize,
    pub start: Vec2,
    pub end: Vec2,
    pub midpoint: Option<(Vec2, Vec2)>,
}

pub fn connection_line(
    from: &Entity,
    to: &Entity,
    layout: &LayoutConfig,
    config: &ConnectionConfig,
) -> ConnectionLine {
    let (from_pos, to_pos) = if config.use_ring_positions {
        (from.ring_position, to.ring_position)
    } else {
        (from.position, to.position)
    };

    let angle = (to_pos.y - from_pos.y).atan2(to_pos.x - from_pos.x);
    let direction = vec2(angle.cos(), angle.sin());
    let start = from_pos + direction * (from.radius(layout) + config.arrow_offset);
    let end = to_pos - direction * (to.radius(layout) + config.arrow_offset);

    let midpoint = if (end - start).length() > config.midpoint_marker_min_length {
        let center = (start + end) * 0.5;
        let half = direction * (config.midpoint_marker_length * 0.5);
        Some((center - half, center + half))
    } else {
        None
    };

    ConnectionLine {
        from: from.id,
        to: to.id,
        start,
        end,
        midpoint,
    }
}

pub fn connection_lines(
    entities: &[Entity],
    layout: &LayoutConfig,
    config: &ConnectionConfig,
) -> Vec<ConnectionLine> {
    let mut lines = Vec::new();
    for entity in entities {
        for &target in &entity.connections {
            let Some(other) = entities.get(target) else {
                continue;
            };
            lines.push(connection_line(entity, other, layout, config));
        }
    }
    lines
}
