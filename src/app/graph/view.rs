use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::graph::TickObserver;
use crate::graph::interaction::{LinkEmphasis, NodeEmphasis};
use crate::util::truncate_label;

use super::super::ViewModel;
use super::super::render_utils::{
    NODE_RADIUS, blend_color, circle_visible, draw_background, fade, screen_to_world,
    segment_visible, theme_color, world_to_screen,
};

const TRANSITION_SECS: f32 = 0.18;
const HOVER_TINT: Color32 = Color32::from_rgb(255, 196, 128);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.viewport.on_resize(rect.size(), self.layout.as_mut()) {
            ui.ctx().request_repaint();
        }
        self.handle_canvas_scroll(ui, &response);

        let parallax = self.viewport.parallax_offset();
        let origin = rect.min.to_vec2() + parallax;
        draw_background(&painter, rect, parallax);

        if self.projection.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No items match the current theme.",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        if let Some(layout) = self.layout.as_mut() {
            if self.live_physics {
                if layout.run_tick(&mut self.scratch) {
                    ui.ctx().request_repaint();
                }
            } else if layout.dragged_id().is_some() {
                self.scratch.on_tick(&layout.frame());
            }
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hit = pointer
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| self.node_at(screen_to_world(origin, pointer)));

        let dragging = self
            .layout
            .as_ref()
            .and_then(|layout| layout.dragged_id())
            .map(str::to_owned);
        if dragging.is_none() {
            self.sync_glyph_hover(hit.clone());
        }
        if hit.is_some() || dragging.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = if dragging.is_some() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::PointingHand
                };
            });
        }

        let interact_pointer = response.interact_pointer_pos().or(pointer);
        self.handle_node_drag(&response, origin, interact_pointer, hit.as_deref());
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(id) = hit.as_deref()
        {
            self.activate(ui.ctx(), id);
        }

        let ctx = ui.ctx().clone();
        let mut animating = false;
        let mut animate = |key: (&str, &str, &str), target: f32| {
            let value = ctx.animate_value_with_time(egui::Id::new(key), target, TRANSITION_SECS);
            if (value - target).abs() > 0.001 {
                animating = true;
            }
            value
        };

        for (index, link) in self.projection.links.iter().enumerate() {
            let (Some(from), Some(to)) = (
                self.scratch.position(&link.source),
                self.scratch.position(&link.target),
            ) else {
                continue;
            };
            let start = world_to_screen(origin, from);
            let end = world_to_screen(origin, to);
            if !segment_visible(rect, start, end) {
                continue;
            }

            let Some(style) = self.highlight.link(index) else {
                continue;
            };
            let opacity = animate(("link", &link.source, &link.target), style.opacity);
            let width = if style.emphasis == LinkEmphasis::Touching {
                2.4
            } else {
                1.2
            };
            painter.line_segment([start, end], Stroke::new(width, fade(style.color, opacity)));
        }

        for item in &self.projection.nodes {
            let Some(world) = self.scratch.position(&item.id) else {
                continue;
            };
            let Some(style) = self.highlight.node(&item.id) else {
                continue;
            };

            let opacity = animate(("node-opacity", &item.id, ""), style.opacity);
            let scale = animate(("node-scale", &item.id, ""), style.scale);
            let position = world_to_screen(origin, world);
            let radius = NODE_RADIUS * scale;
            if !circle_visible(rect, position, radius + 60.0) {
                continue;
            }

            let base = theme_color(item);
            let fill = match style.emphasis {
                NodeEmphasis::Hovered => blend_color(base, HOVER_TINT, 0.45),
                _ => base,
            };
            painter.circle_filled(position, radius, fade(fill, opacity));

            let pinned = self
                .layout
                .as_ref()
                .is_some_and(|layout| layout.is_pinned(&item.id));
            let ring = if pinned || self.activated.as_deref() == Some(item.id.as_str()) {
                Stroke::new(2.2, fade(Color32::from_rgb(245, 206, 93), opacity))
            } else {
                Stroke::new(1.0, fade(Color32::from_rgba_unmultiplied(15, 15, 15, 190), opacity))
            };
            painter.circle_stroke(position, radius, ring);

            let label_color = match style.emphasis {
                NodeEmphasis::Hovered | NodeEmphasis::Connected => Color32::from_gray(245),
                _ => Color32::from_gray(205),
            };
            painter.text(
                position + vec2(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                truncate_label(&item.display_name, 28),
                FontId::proportional(12.0),
                fade(label_color, opacity),
            );
        }

        if animating {
            ui.ctx().request_repaint();
        }

        if let Some(item) = self
            .hover
            .hovered()
            .and_then(|id| self.projection.node(id))
        {
            let connected = self.highlight.connected.len();
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {connected} connected", item.display_name),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}
