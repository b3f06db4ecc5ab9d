use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::engine::ViewportTransform;

// Cyan ramp from the share buckets: deepest holdings get the brightest
// circle.
pub(super) const BUCKET_COLORS: [Color32; 6] = [
    Color32::from_rgb(6, 182, 212),
    Color32::from_rgb(8, 145, 178),
    Color32::from_rgb(14, 116, 144),
    Color32::from_rgb(21, 94, 117),
    Color32::from_rgb(22, 78, 99),
    Color32::from_rgb(8, 51, 68),
];

pub(super) fn bucket_color(bucket: usize) -> Color32 {
    BUCKET_COLORS[bucket.min(BUCKET_COLORS.len() - 1)]
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn to_screen(rect: Rect, transform: &ViewportTransform, world: Vec2) -> Pos2 {
    rect.min + transform.world_to_screen(world).to_vec2()
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &ViewportTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(15, 19, 32));

    let step = (56.0 * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.min + transform.offset;

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(51, 65, 85, 60)),
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(51, 65, 85, 60)),
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}
