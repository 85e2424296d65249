use eframe::egui::{Context, OpenUrl, Vec2};

use crate::graph::interaction::derive_highlight;
use crate::graph::{
    DragEvent, ForceLayout, ForceParams, PointerEvent, Projection, TagFilter, project,
};

use super::super::ViewModel;

/// Builds the layout for `projection`, consuming `previous` so the old
/// simulation is gone before its replacement exists.
fn replace_layout(
    previous: Option<ForceLayout>,
    projection: &Projection,
    params: ForceParams,
    center: Vec2,
) -> ForceLayout {
    let prior = previous
        .map(|layout| layout.snapshot())
        .unwrap_or_default();
    ForceLayout::new(&projection.nodes, &projection.links, params, center, &prior)
}

impl ViewModel {
    /// Re-derives the node/link set for the current filter and replaces the
    /// layout. The previous layout is dropped before the new one is built;
    /// nodes present in both keep their last position.
    pub(in crate::app) fn rebuild_projection(&mut self) {
        self.projection = project(&self.catalog.items, self.filter.active());
        let layout = replace_layout(
            self.layout.take(),
            &self.projection,
            self.force_params,
            self.viewport.center(),
        );
        self.scratch.rebind(&layout);
        self.layout = Some(layout);

        if self
            .activated
            .as_deref()
            .is_some_and(|id| !self.projection.contains(id))
        {
            self.activated = None;
        }
        self.refresh_highlight();

        log::info!(
            "projected filter {:?}: {} nodes, {} links",
            self.filter.label(),
            self.projection.nodes.len(),
            self.projection.links.len()
        );
    }

    pub(in crate::app) fn set_filter(&mut self, tag: Option<&str>) {
        let filter = TagFilter::new(tag);
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.rebuild_projection();
    }

    pub(in crate::app) fn refresh_highlight(&mut self) {
        self.highlight = derive_highlight(&self.projection, &self.hover, &self.highlight_style);
    }

    pub(in crate::app) fn pointer_event(&mut self, event: PointerEvent) {
        if self.hover.apply(event) {
            self.refresh_highlight();
        }
    }

    pub(in crate::app) fn drag_event(&mut self, event: DragEvent) {
        if let Some(layout) = self.layout.as_mut() {
            layout.handle_drag(event);
        }
    }

    /// Opens the item's source in a new tab, if it has one.
    pub(in crate::app) fn activate(&mut self, ctx: &Context, id: &str) {
        let Some(item) = self.projection.node(id) else {
            return;
        };
        self.activated = Some(item.id.clone());

        if let Some(source) = &item.source {
            log::info!("opening source for {:?}: {source}", item.id);
            ctx.open_url(OpenUrl::new_tab(source));
        }
    }

    pub(in crate::app) fn apply_force_params(&mut self) {
        if let Some(layout) = self.layout.as_mut() {
            layout.set_params(self.force_params);
        }
    }

    pub(in crate::app) fn reheat_layout(&mut self) {
        if let Some(layout) = self.layout.as_mut() {
            layout.reheat();
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::app::ViewSettings;
    use crate::catalog::Catalog;
    use crate::graph::fixtures::abcd;

    fn model() -> ViewModel {
        let catalog = Catalog {
            items: abcd(),
            meta: Default::default(),
            skipped: 0,
        };
        ViewModel::new(
            catalog,
            ViewSettings {
                parallax_factor: 0.15,
            },
        )
    }

    fn relax(model: &mut ViewModel, ticks: usize) {
        let layout = model.layout.as_mut().expect("layout is built on load");
        for _ in 0..ticks {
            layout.step();
        }
    }

    #[test]
    fn replace_layout_seeds_fresh_without_a_previous_layout() {
        let projection = project(&abcd(), None);
        let layout = replace_layout(
            None,
            &projection,
            ForceParams::default(),
            vec2(200.0, 150.0),
        );
        assert_eq!(layout.node_count(), 4);
        assert_eq!(layout.link_count(), 2);
        assert!(!layout.is_settled());
    }

    #[test]
    fn replace_layout_keeps_positions_of_surviving_ids() {
        let full = project(&abcd(), None);
        let mut previous = ForceLayout::new(
            &full.nodes,
            &full.links,
            ForceParams::default(),
            Vec2::ZERO,
            &Default::default(),
        );
        for _ in 0..20 {
            previous.step();
        }
        let b = previous.position("B");
        let c = previous.position("C");

        let filtered = project(&abcd(), Some("y"));
        let layout = replace_layout(
            Some(previous),
            &filtered,
            ForceParams::default(),
            Vec2::ZERO,
        );
        assert_eq!(layout.node_count(), 2);
        assert_eq!(layout.position("B"), b);
        assert_eq!(layout.position("C"), c);
        assert_eq!(layout.position("A"), None);
    }

    #[test]
    fn filter_change_rebuilds_layout_for_the_new_node_set() {
        let mut model = model();
        relax(&mut model, 15);
        let b = model.layout.as_ref().and_then(|layout| layout.position("B"));
        assert!(b.is_some());

        model.set_filter(Some("y"));

        let layout = model.layout.as_ref().expect("layout survives a filter change");
        assert_eq!(layout.node_count(), 2);
        assert_eq!(layout.link_count(), 1);
        assert_eq!(layout.position("B"), b);
        assert_eq!(model.scratch.position("B"), b);
        assert_eq!(model.scratch.position("A"), None);
        assert_eq!(model.scratch.ticks, 0);
    }

    #[test]
    fn filter_change_drops_stale_hover_and_activation() {
        let mut model = model();
        model.pointer_event(PointerEvent::Enter("A".to_owned()));
        model.activated = Some("D".to_owned());
        assert_eq!(model.highlight.hovered.as_deref(), Some("A"));

        model.set_filter(Some("y"));

        assert_eq!(model.highlight.hovered, None);
        assert!(model.highlight.connected.is_empty());
        assert_eq!(model.activated, None);
        assert!(
            model
                .projection
                .nodes
                .iter()
                .all(|node| model.highlight.node(&node.id).map(|style| style.scale) == Some(1.0))
        );
    }

    #[test]
    fn reselecting_the_same_filter_keeps_the_layout() {
        let mut model = model();
        model.set_filter(Some("x"));
        relax(&mut model, 5);
        let alpha = model.layout.as_ref().map(ForceLayout::alpha);

        model.set_filter(Some("x"));
        assert_eq!(model.layout.as_ref().map(ForceLayout::alpha), alpha);
    }
}
