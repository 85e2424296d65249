use eframe::egui::{RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let focus = self
            .hover
            .hovered()
            .or(self.activated.as_deref())
            .and_then(|id| self.projection.node(id))
            .cloned();
        let Some(item) = focus else {
            ui.label("Hover an item to see its tags, or click one to open its source.");
            return;
        };

        ui.label(RichText::new(item.display_name.as_str()).strong());
        ui.small(item.id.as_str());
        ui.add_space(6.0);

        ui.label(format!("Image: {}", item.image));
        match &item.source {
            Some(source) => {
                ui.hyperlink_to("Open source", source);
            }
            None => {
                ui.label("No source link.");
            }
        }

        ui.separator();
        ui.label(RichText::new("Themes").strong());
        if item.themes.is_empty() {
            ui.label("none");
        } else {
            ui.horizontal_wrapped(|ui| {
                for theme in &item.themes {
                    let active = self.filter.active() == Some(theme.as_str());
                    if ui.selectable_label(active, theme.as_str()).clicked() {
                        self.set_filter(if active { None } else { Some(theme.as_str()) });
                    }
                }
            });
        }

        ui.label(RichText::new("Moods").strong());
        if item.moods.is_empty() {
            ui.label("none");
        } else {
            ui.label(item.moods.join(", "));
        }

        ui.separator();
        let mut connected = self
            .projection
            .neighbors(&item.id)
            .into_iter()
            .filter_map(|id| self.projection.node(id))
            .map(|node| node.display_name.clone())
            .collect::<Vec<_>>();
        connected.sort();

        ui.label(RichText::new(format!("Connected ({})", connected.len())).strong());
        for name in connected {
            ui.label(name);
        }
    }
}
