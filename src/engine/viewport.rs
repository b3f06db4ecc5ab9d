use eframe::egui::{Pos2, Vec2, pos2};

const MIN_PINCH_DISTANCE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub offset: Vec2,
    pub scale: f32,
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        pos2(
            (world.x * self.scale) + self.offset.x,
            (world.y * self.scale) + self.offset.y,
        )
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.offset) / self.scale
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ViewportConfig {
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,
    pub wheel_scale_range: (f32, f32),
    pub pinch_scale_range: (f32, f32),
    pub enable_touch: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            wheel_scale_range: (0.5, 3.0),
            pinch_scale_range: (0.3, 5.0),
            enable_touch: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Dragging { last: Pos2 },
    Pinching { previous_distance: f32 },
}

#[derive(Clone, Debug)]
pub struct ViewportController {
    pub transform: ViewportTransform,
    pub config: ViewportConfig,
    gesture: Gesture,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            transform: ViewportTransform::IDENTITY,
            config,
            gesture: Gesture::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.gesture, Gesture::Pinching { .. })
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => self.config.wheel_zoom_in,
            ZoomDirection::Out => self.config.wheel_zoom_out,
        };
        let (min_scale, max_scale) = self.config.wheel_scale_range;
        self.transform.scale = (self.transform.scale * factor).clamp(min_scale, max_scale);
    }

    pub fn begin_drag(&mut self, pointer: Pos2) {
        if self.gesture == Gesture::Idle {
            self.gesture = Gesture::Dragging { last: pointer };
        }
    }

    pub fn drag_to(&mut self, pointer: Pos2) {
        if let Gesture::Dragging { last } = self.gesture {
            self.transform.offset += pointer - last;
            self.gesture = Gesture::Dragging { last: pointer };
        }
    }

    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn begin_pinch(&mut self, first: Pos2, second: Pos2) {
        if !self.config.enable_touch || self.gesture != Gesture::Idle {
            return;
        }

        let distance = (first - second).length();
        if distance >= MIN_PINCH_DISTANCE {
            self.gesture = Gesture::Pinching {
                previous_distance: distance,
            };
        }
    }

    pub fn update_pinch(&mut self, first: Pos2, second: Pos2) {
        let Gesture::Pinching { previous_distance } = self.gesture else {
            return;
        };

        let current_distance = (first - second).length();
        if current_distance < MIN_PINCH_DISTANCE {
            return;
        }

        let (min_scale, max_scale) = self.config.pinch_scale_range;
        self.transform.scale = (self.transform.scale * (current_distance / previous_distance))
            .clamp(min_scale, max_scale);
        self.gesture = Gesture::Pinching {
            previous_distance: current_distance,
        };
    }

    pub fn end_pinch(&mut self) {
        if self.is_pinching() {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.transform = ViewportTransform::IDENTITY;
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn wheel_zoom_is_multiplicative() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.zoom(ZoomDirection::Out);
        assert!((viewport.transform.scale - 0.9).abs() < 1e-6);

        viewport.zoom(ZoomDirection::In);
        assert!((viewport.transform.scale - 0.99).abs() < 1e-6);
    }

    #[test]
    fn wheel_zoom_respects_scale_bounds() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        for _ in 0..100 {
            viewport.zoom(ZoomDirection::Out);
        }
        assert_eq!(viewport.transform.scale, 0.5);

        for _ in 0..100 {
            viewport.zoom(ZoomDirection::In);
        }
        assert_eq!(viewport.transform.scale, 3.0);
    }

    #[test]
    fn pinch_scales_by_distance_ratio_incrementally() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.begin_pinch(pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert!(viewport.is_pinching());

        viewport.update_pinch(pos2(0.0, 0.0), pos2(150.0, 0.0));
        assert!((viewport.transform.scale - 1.5).abs() < 1e-6);

        // The reference distance advances with every update; a steady
        // spread must not keep multiplying.
        viewport.update_pinch(pos2(0.0, 0.0), pos2(150.0, 0.0));
        assert!((viewport.transform.scale - 1.5).abs() < 1e-6);
    }

    #[test]
    fn pinch_respects_its_own_scale_bounds() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.begin_pinch(pos2(0.0, 0.0), pos2(10.0, 0.0));
        viewport.update_pinch(pos2(0.0, 0.0), pos2(1000.0, 0.0));
        assert_eq!(viewport.transform.scale, 5.0);

        viewport.update_pinch(pos2(0.0, 0.0), pos2(1.0, 0.0));
        assert_eq!(viewport.transform.scale, 0.3);
    }

    #[test]
    fn degenerate_pinches_are_no_ops() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.begin_pinch(pos2(50.0, 50.0), pos2(50.0, 50.0));
        assert!(!viewport.is_pinching());

        viewport.update_pinch(pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert_eq!(viewport.transform.scale, 1.0);
    }

    #[test]
    fn touch_disabled_ignores_pinch() {
        let config = ViewportConfig {
            enable_touch: false,
            ..ViewportConfig::default()
        };
        let mut viewport = ViewportController::new(config);

        viewport.begin_pinch(pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert!(!viewport.is_pinching());
    }

    #[test]
    fn drag_accumulates_deltas_from_last_pointer() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.begin_drag(pos2(10.0, 10.0));
        viewport.drag_to(pos2(15.0, 12.0));
        viewport.drag_to(pos2(18.0, 20.0));
        assert_eq!(viewport.transform.offset, vec2(8.0, 10.0));

        viewport.end_drag();
        assert!(!viewport.is_dragging());
    }

    #[test]
    fn drag_and_pinch_are_mutually_exclusive() {
        let mut viewport = ViewportController::new(ViewportConfig::default());

        viewport.begin_drag(pos2(0.0, 0.0));
        viewport.begin_pinch(pos2(0.0, 0.0), pos2(100.0, 0.0));
        assert!(viewport.is_dragging());
        assert!(!viewport.is_pinching());
        viewport.end_drag();

        viewport.begin_pinch(pos2(0.0, 0.0), pos2(100.0, 0.0));
        viewport.begin_drag(pos2(5.0, 5.0));
        assert!(viewport.is_pinching());
        assert!(!viewport.is_dragging());
    }

    #[test]
    fn screen_world_round_trip_is_identity() {
        let mut viewport = ViewportController::new(ViewportConfig::default());
        viewport.transform.offset = vec2(120.0, -40.0);
        viewport.transform.scale = 1.7;

        for &world in &[vec2(0.0, 0.0), vec2(400.0, 300.0), vec2(-35.5, 912.25)] {
            let screen = viewport.transform.world_to_screen(world);
            let round_trip = viewport.transform.screen_to_world(screen);
            assert!((round_trip - world).length() < 1e-3);
        }
    }

    #[test]
    fn reset_restores_identity() {
        let mut viewport = ViewportController::new(ViewportConfig::default());
        viewport.zoom(ZoomDirection::In);
        viewport.begin_drag(pos2(0.0, 0.0));
        viewport.drag_to(pos2(40.0, 40.0));

        viewport.reset();
        assert_eq!(viewport.transform, ViewportTransform::IDENTITY);
        assert!(!viewport.is_dragging());
    }
}
