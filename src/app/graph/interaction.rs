use eframe::egui::{self, Pos2, Response, Ui, Vec2};

use crate::graph::{DragEvent, PointerEvent};

use super::super::ViewModel;
use super::super::render_utils::{NODE_RADIUS, screen_to_world};

impl ViewModel {
    /// Mouse wheel over the canvas stands in for page scroll and feeds the
    /// parallax offset.
    pub(in crate::app) fn handle_canvas_scroll(&mut self, ui: &Ui, response: &Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let offset = self.viewport.scroll_offset() - scroll;
        self.viewport.on_scroll(offset);
    }

    /// Topmost node whose glyph contains `world`.
    pub(in crate::app) fn node_at(&self, world: Vec2) -> Option<String> {
        self.projection
            .nodes
            .iter()
            .filter_map(|node| {
                let position = self.scratch.position(&node.id)?;
                let scale = self.highlight.node(&node.id).map_or(1.0, |style| style.scale);
                let distance = (position - world).length();
                (distance <= NODE_RADIUS * scale).then_some((node.id.as_str(), distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id.to_owned())
    }

    pub(in crate::app) fn sync_glyph_hover(&mut self, hit: Option<String>) {
        if self.glyph_hover == hit {
            return;
        }

        if let Some(previous) = self.glyph_hover.take() {
            self.pointer_event(PointerEvent::Leave(previous));
        }
        if let Some(id) = hit {
            self.pointer_event(PointerEvent::Enter(id.clone()));
            self.glyph_hover = Some(id);
        }
    }

    pub(in crate::app) fn sync_legend_hover(&mut self, hit: Option<String>) {
        if self.legend_hover == hit {
            return;
        }

        if let Some(previous) = self.legend_hover.take() {
            self.pointer_event(PointerEvent::Leave(previous));
        }
        if let Some(id) = hit {
            self.pointer_event(PointerEvent::Enter(id.clone()));
            self.legend_hover = Some(id);
        }
    }

    pub(in crate::app) fn handle_node_drag(
        &mut self,
        response: &Response,
        origin: Vec2,
        pointer: Option<Pos2>,
        hit: Option<&str>,
    ) {
        let Some(pointer) = pointer else {
            if response.drag_stopped() {
                self.drag_event(DragEvent::End);
            }
            return;
        };
        let world = screen_to_world(origin, pointer);

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(id) = hit
        {
            self.drag_event(DragEvent::Start {
                id: id.to_owned(),
                position: world,
            });
        } else if response.dragged_by(egui::PointerButton::Primary) {
            self.drag_event(DragEvent::Move { position: world });
        }

        if response.drag_stopped() {
            self.drag_event(DragEvent::End);
        }
    }
}
