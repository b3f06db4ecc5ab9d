use eframe::egui::{Pos2, Vec2, pos2};

use super::entity::{Entity, LayoutConfig};
use super::viewport::ViewportTransform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupAnchorPolicy {
    ClampToContainer,
    Center,
}

#[derive(Clone, Copy, Debug)]
pub struct SelectionConfig {
    pub policy: PopupAnchorPolicy,
    pub popup_size: Vec2,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            policy: PopupAnchorPolicy::ClampToContainer,
            popup_size: Vec2::new(280.0, 200.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub entity: usize,
    pub anchor: Pos2,
}

#[derive(Clone, Debug)]
pub struct SelectionController {
    pub config: SelectionConfig,
    selection: Option<Selection>,
}

impl SelectionController {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            selection: None,
        }
    }

    pub fn selected(&self) -> Option<Selection> {
        self.selection
    }

    pub fn select(&mut self, entity: usize, pointer: Pos2, container: Vec2) {
        let anchor = match self.config.policy {
            PopupAnchorPolicy::ClampToContainer => pos2(
                pointer
                    .x
                    .clamp(0.0, (container.x - self.config.popup_size.x).max(0.0)),
                pointer
                    .y
                    .clamp(0.0, (container.y - self.config.popup_size.y).max(0.0)),
            ),
            PopupAnchorPolicy::Center => {
                pos2(
                    ((container.x - self.config.popup_size.x) * 0.5).max(0.0),
                    ((container.y - self.config.popup_size.y) * 0.5).max(0.0),
                )
            }
        };

        self.selection = Some(Selection { entity, anchor });
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    pub fn close(&mut self) {
        self.clear();
    }

    pub fn on_click(&mut self, hit: Option<usize>, pointer: Pos2, container: Vec2) {
        match hit {
            Some(entity) => self.select(entity, pointer, container),
            None => self.clear(),
        }
    }
}

pub fn hit_test(
    entities: &[Entity],
    layout: &LayoutConfig,
    transform: &ViewportTransform,
    pointer: Pos2,
) -> Option<usize> {
    entities
        .iter()
        .filter_map(|entity| {
            let center = transform.world_to_screen(entity.position);
            let screen_radius = entity.radius(layout) * transform.scale;
            let distance = center.distance(pointer);
            if distance <= screen_radius {
                Some((entity.id, distance))
            } else {
                None
            }
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn entity_at(id: usize, share: f32, position: Vec2) -> Entity {
        Entity {
            id,
            address: format!("0x{id}"),
            percentage_share: share,
            balance: None,
            tag: None,
            transaction_count: None,
            position,
            ring_position: position,
            connections: Vec::new(),
        }
    }

    #[test]
    fn selecting_a_second_entity_replaces_the_first() {
        let mut controller = SelectionController::new(SelectionConfig::default());
        let container = vec2(800.0, 600.0);

        controller.select(3, pos2(100.0, 100.0), container);
        controller.select(5, pos2(200.0, 200.0), container);

        let selection = controller.selected().unwrap();
        assert_eq!(selection.entity, 5);
    }

    #[test]
    fn backdrop_click_and_close_both_clear() {
        let mut controller = SelectionController::new(SelectionConfig::default());
        let container = vec2(800.0, 600.0);

        controller.select(1, pos2(50.0, 50.0), container);
        controller.on_click(None, pos2(10.0, 10.0), container);
        assert!(controller.selected().is_none());

        controller.select(1, pos2(50.0, 50.0), container);
        controller.close();
        assert!(controller.selected().is_none());
    }

    #[test]
    fn clamp_policy_keeps_popup_inside_container() {
        let mut controller = SelectionController::new(SelectionConfig::default());
        let container = vec2(800.0, 600.0);

        controller.select(0, pos2(790.0, 590.0), container);
        let anchor = controller.selected().unwrap().anchor;
        assert_eq!(anchor, pos2(520.0, 400.0));

        controller.select(0, pos2(-30.0, -10.0), container);
        let anchor = controller.selected().unwrap().anchor;
        assert_eq!(anchor, pos2(0.0, 0.0));
    }

    #[test]
    fn center_policy_ignores_the_click_point() {
        let config = SelectionConfig {
            policy: PopupAnchorPolicy::Center,
            ..SelectionConfig::default()
        };
        let mut controller = SelectionController::new(config);
        let container = vec2(800.0, 600.0);

        controller.select(0, pos2(5.0, 595.0), container);
        let anchor = controller.selected().unwrap().anchor;
        assert_eq!(anchor, pos2(260.0, 200.0));
    }

    #[test]
    fn hit_test_picks_the_closest_containing_circle() {
        let layout = LayoutConfig::default();
        let transform = ViewportTransform::IDENTITY;
        let entities = vec![
            entity_at(0, 10.0, vec2(100.0, 100.0)),
            entity_at(1, 10.0, vec2(130.0, 100.0)),
        ];

        let hit = hit_test(&entities, &layout, &transform, pos2(118.0, 100.0));
        assert_eq!(hit, Some(1));

        let miss = hit_test(&entities, &layout, &transform, pos2(400.0, 400.0));
        assert_eq!(miss, None);
    }

    #[test]
    fn hit_test_respects_the_viewport_scale() {
        let layout = LayoutConfig::default();
        let transform = ViewportTransform {
            offset: vec2(10.0, 0.0),
            scale: 2.0,
        };
        let entities = vec![entity_at(0, 10.0, vec2(100.0, 100.0))];

        // World (100, 100) lands on screen (210, 200) with a 70px radius.
        assert_eq!(
            hit_test(&entities, &layout, &transform, pos2(275.0, 200.0)),
            Some(0)
        );
        assert_eq!(
            hit_test(&entities, &layout, &transform, pos2(290.0, 200.0)),
            None
        );
    }
}
