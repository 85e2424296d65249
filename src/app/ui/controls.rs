use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::truncate_label;

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Themes matching `query`, best match first; all themes in their given order
/// when the query is blank.
fn matching_themes<'a>(themes: &'a [(String, usize)], query: &str) -> Vec<&'a (String, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return themes.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = themes
        .iter()
        .filter_map(|entry| fuzzy_match_score(&matcher, &entry.0, query).map(|score| (score, entry)))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.0.cmp(&b.1.0)));
    scored.into_iter().map(|(_, entry)| entry).collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Themes");
        ui.add_space(4.0);

        ui.text_edit_singleline(&mut self.tag_search)
            .on_hover_text("Fuzzy-search the theme list.");
        ui.add_space(4.0);

        let mut requested: Option<Option<String>> = None;
        egui::ScrollArea::vertical()
            .id_salt("theme_list_scroll")
            .max_height(220.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if ui
                    .selectable_label(self.filter.active().is_none(), "All themes")
                    .clicked()
                {
                    requested = Some(None);
                }

                for (theme, count) in matching_themes(&self.theme_counts, &self.tag_search) {
                    let selected = self.filter.active() == Some(theme.as_str());
                    if ui
                        .selectable_label(selected, format!("{theme}  ({count})"))
                        .clicked()
                    {
                        requested = Some(Some(theme.clone()));
                    }
                }
            });
        if let Some(tag) = requested {
            self.set_filter(tag.as_deref());
        }

        ui.separator();
        ui.label(RichText::new("Items").strong());

        let mut legend_hit = None;
        let mut activate = None;
        egui::ScrollArea::vertical()
            .id_salt("legend_scroll")
            .max_height(260.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for item in &self.projection.nodes {
                    let matches = self
                        .filter
                        .active()
                        .is_some_and(|tag| item.has_theme(tag));
                    let mut text = RichText::new(truncate_label(&item.display_name, 40));
                    if matches {
                        text = text.strong();
                    }

                    let response = ui.link(text).on_hover_text(item.id.as_str());
                    if response.hovered() {
                        legend_hit = Some(item.id.clone());
                    }
                    if response.clicked() {
                        activate = Some(item.id.clone());
                    }
                }
            });
        self.sync_legend_hover(legend_hit);
        if let Some(id) = activate {
            self.activate(ui.ctx(), &id);
        }

        ui.separator();
        ui.collapsing("Physics", |ui| {
            ui.checkbox(&mut self.live_physics, "Live simulation")
                .on_hover_text("Pause to freeze every node where it is.");

            let params = &mut self.force_params;
            ui.add(
                egui::Slider::new(&mut params.link_distance, 30.0..=300.0)
                    .text("Link distance")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Rest length of links between items sharing a tag.");
            ui.add(
                egui::Slider::new(&mut params.link_strength, 0.1..=2.0)
                    .text("Link strength")
                    .clamping(egui::SliderClamping::Always),
            );
            ui.add(
                egui::Slider::new(&mut params.charge_strength, 0.0..=1200.0)
                    .text("Repulsion")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("How strongly every pair of items pushes apart.");
            ui.add(
                egui::Slider::new(&mut params.center_strength, 0.0..=0.2)
                    .text("Centering")
                    .clamping(egui::SliderClamping::Always),
            );
            ui.add(
                egui::Slider::new(&mut params.collision_radius, 10.0..=80.0)
                    .text("Collision radius")
                    .clamping(egui::SliderClamping::Always),
            );
            ui.add(
                egui::Slider::new(&mut params.velocity_decay, 0.05..=0.9)
                    .text("Velocity decay")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Fraction of speed lost every tick.");

            ui.horizontal(|ui| {
                if ui.button("Reheat").clicked() {
                    self.reheat_layout();
                }
                if ui.button("Reset").clicked() {
                    self.force_params = Default::default();
                }
            });
        });
        self.apply_force_params();
    }
}
