use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::engine::connection_lines;
use crate::engine::hit_test;
use crate::util::{format_share, shorten_address};

use super::super::ViewModel;
use super::super::render_utils::{
    bucket_color, circle_visible, dim_color, draw_background, to_screen,
};

const CONNECTION_COLOR: Color32 = Color32::from_rgba_premultiplied(51, 65, 85, 153);
const TAG_COLOR: Color32 = Color32::from_rgb(6, 182, 212);

impl ViewModel {
    pub(in crate::app) fn draw_map(&mut self, ui: &mut Ui) {
        if self.layout_dirty {
            self.rebuild_layout();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, &self.viewport.transform);
        self.handle_map_input(ui, rect, &response);

        if self.entities.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No data available",
                FontId::proportional(16.0),
                Color32::from_gray(148),
            );
            painter.text(
                rect.center() + vec2(0.0, 24.0),
                Align2::CENTER_CENTER,
                "Search for a token to view wallet distribution",
                FontId::proportional(12.0),
                Color32::from_gray(110),
            );
            return;
        }

        let transform = self.viewport.transform;
        let scale = transform.scale;

        let lines = connection_lines(&self.entities, &self.layout, &self.connection);
        let line_width = scale.sqrt().clamp(0.6, 2.2);
        for line in &lines {
            let start = to_screen(rect, &transform, line.start);
            let end = to_screen(rect, &transform, line.end);
            painter.line_segment([start, end], Stroke::new(line_width, CONNECTION_COLOR));
            draw_arrowhead(&painter, start, end, scale, CONNECTION_COLOR);

            if let Some((mid_start, mid_end)) = line.midpoint {
                let mid_start = to_screen(rect, &transform, mid_start);
                let mid_end = to_screen(rect, &transform, mid_end);
                painter.line_segment([mid_start, mid_end], Stroke::new(line_width, CONNECTION_COLOR));
                draw_arrowhead(&painter, mid_start, mid_end, scale, CONNECTION_COLOR);
            }
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = pointer.and_then(|pointer| {
            hit_test(
                &self.entities,
                &self.layout,
                &transform,
                pointer - rect.min.to_vec2(),
            )
        });
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let highlight_matches = self.highlight_match_set();
        let selected_entity = self.selection.selected().map(|selection| selection.entity);

        for entity in &self.entities {
            let position = to_screen(rect, &transform, entity.position);
            let radius = entity.radius(&self.layout) * scale;
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = selected_entity == Some(entity.id);
            let is_hovered = hovered == Some(entity.id);
            let base_color = bucket_color(self.layout.color_bucket(entity.percentage_share));
            let color = match &highlight_matches {
                Some(matches) if !matches.contains(&entity.id) => dim_color(base_color, 0.35),
                _ => base_color,
            };

            painter.circle_filled(
                position,
                radius + 2.0,
                Color32::from_rgba_unmultiplied(
                    base_color.r(),
                    base_color.g(),
                    base_color.b(),
                    72,
                ),
            );
            painter.circle_filled(position, radius, color);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(if is_selected { 2.2 } else { 1.0 }, Color32::WHITE),
            );
            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 4.0,
                    Stroke::new(1.4, Color32::from_rgba_unmultiplied(245, 206, 93, 170)),
                );
            } else if is_hovered {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 110)),
                );
            }

            let font_size = (radius / 3.0).clamp(8.0, 26.0);
            painter.text(
                position,
                Align2::CENTER_CENTER,
                format_share(entity.percentage_share),
                FontId::proportional(font_size),
                Color32::WHITE,
            );

            if let Some(tag) = &entity.tag {
                painter.text(
                    position + vec2(0.0, radius + (15.0 * scale.max(0.6))),
                    Align2::CENTER_CENTER,
                    tag,
                    FontId::proportional((10.0 * scale).clamp(8.0, 16.0)),
                    TAG_COLOR,
                );
            }
        }

        if let Some(hovered_id) = hovered
            && let Some(entity) = self.entities.get(hovered_id)
        {
            let info = format!(
                "{}  |  {}  |  {} links",
                shorten_address(&entity.address),
                format_share(entity.percentage_share),
                entity.connections.len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        self.draw_popup(ui, rect);
    }

    fn highlight_match_set(&self) -> Option<HashSet<usize>> {
        let query = self.highlight_filter.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.entities
                .iter()
                .filter_map(|entity| {
                    let tag_matches = entity
                        .tag
                        .as_deref()
                        .is_some_and(|tag| matcher.fuzzy_match(tag, query).is_some());
                    if tag_matches || matcher.fuzzy_match(&entity.address, query).is_some() {
                        Some(entity.id)
                    } else {
                        None
                    }
                })
                .collect(),
        )
    }
}

fn draw_arrowhead(painter: &egui::Painter, start: Pos2, end: Pos2, scale: f32, color: Color32) {
    let delta = end - start;
    let length = delta.length();
    if length < 1.0 {
        return;
    }

    let direction = delta / length;
    let perpendicular = vec2(-direction.y, direction.x);
    let size = (7.0 * scale.sqrt()).clamp(4.0, 12.0);

    let tip = end;
    let left = end - (direction * size) + (perpendicular * (size * 0.5));
    let right = end - (direction * size) - (perpendicular * (size * 0.5));
    painter.add(Shape::convex_polygon(
        vec![tip, left, right],
        color,
        Stroke::NONE,
    ));
}
