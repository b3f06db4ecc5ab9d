use eframe::egui::{self, Pos2, Rect, TouchPhase, Ui};

use crate::engine::{ZoomDirection, hit_test};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn handle_map_input(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        let events = ui.input(|input| input.events.clone());

        if response.hovered() {
            for event in &events {
                if let egui::Event::MouseWheel { delta, .. } = event {
                    if delta.y > 0.0 {
                        self.viewport.zoom(ZoomDirection::In);
                    } else if delta.y < 0.0 {
                        self.viewport.zoom(ZoomDirection::Out);
                    }
                }
            }
        }

        self.handle_touch_events(rect, &events);
        self.handle_drag(ui, rect, response);
        self.handle_click(rect, response);
    }

    fn handle_touch_events(&mut self, rect: Rect, events: &[egui::Event]) {
        for event in events {
            let egui::Event::Touch { id, phase, pos, .. } = event else {
                continue;
            };
            let local = *pos - rect.min.to_vec2();

            match phase {
                TouchPhase::Start => {
                    self.touch_points.insert(id.0, local);
                    if self.touch_points.len() == 2 {
                        // A second finger promotes the gesture to a pinch;
                        // any half-started drag yields first.
                        self.viewport.end_drag();
                        if let Some((first, second)) = self.touch_pair() {
                            self.viewport.begin_pinch(first, second);
                        }
                    }
                }
                TouchPhase::Move => {
                    self.touch_points.insert(id.0, local);
                    if self.touch_points.len() == 2
                        && let Some((first, second)) = self.touch_pair()
                    {
                        self.viewport.update_pinch(first, second);
                    }
                }
                TouchPhase::End | TouchPhase::Cancel => {
                    self.touch_points.remove(&id.0);
                    if self.touch_points.len() < 2 {
                        self.viewport.end_pinch();
                    }
                }
            }
        }
    }

    fn touch_pair(&self) -> Option<(Pos2, Pos2)> {
        let mut points = self.touch_points.values();
        let first = points.next()?;
        let second = points.next()?;
        Some((*first, *second))
    }

    fn handle_drag(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let local = pointer - rect.min.to_vec2();
            let hit = hit_test(
                &self.entities,
                &self.layout,
                &self.viewport.transform,
                local,
            );
            if hit.is_none() {
                self.viewport.begin_drag(local);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.viewport.drag_to(pointer - rect.min.to_vec2());
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.viewport.end_drag();
        }

        // Losing the pointer entirely (left the window mid-drag) also ends
        // the gesture.
        if self.viewport.is_dragging() && ui.input(|input| input.pointer.hover_pos()).is_none() {
            self.viewport.end_drag();
        }
    }

    fn handle_click(&mut self, rect: Rect, response: &egui::Response) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };

        let local = pointer - rect.min.to_vec2();
        let hit = hit_test(
            &self.entities,
            &self.layout,
            &self.viewport.transform,
            local,
        );
        self.selection.on_click(hit, local, rect.size());
    }
}
