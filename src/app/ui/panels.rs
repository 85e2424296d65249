use eframe::egui::{self, Align, Context, Layout};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("moodgraph");
                    ui.separator();
                    ui.label(format!("items: {}", self.catalog.item_count()));
                    if self.catalog.skipped > 0 {
                        ui.label(format!("skipped: {}", self.catalog.skipped))
                            .on_hover_text("Entries without an id or image were left out.");
                    }
                    ui.label(format!("theme: {}", self.filter.label()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }

    fn status_text(&self) -> String {
        let Some(layout) = &self.layout else {
            return format!(
                "nodes {}  |  links {}",
                self.projection.nodes.len(),
                self.projection.links.len()
            );
        };

        let counts = format!(
            "nodes {}  |  links {}",
            layout.node_count(),
            layout.link_count()
        );
        if layout.is_settled() {
            format!("{counts}  |  settled after {} ticks", self.scratch.ticks)
        } else {
            format!(
                "{counts}  |  {} (t {:.3}, {} ticks)",
                layout.phase().label(),
                layout.alpha(),
                self.scratch.ticks
            )
        }
    }
}
