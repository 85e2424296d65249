use eframe::egui::{Vec2, vec2};

use super::layout::ForceLayout;

/// Drawing surface size and scroll-driven parallax. Layout coordinates have
/// their origin at the surface's top-left corner; parallax is applied only
/// when drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: Vec2,
    scroll_offset: f32,
    parallax_factor: f32,
}

impl Viewport {
    pub fn new(size: Vec2, parallax_factor: f32) -> Self {
        Self {
            size,
            scroll_offset: 0.0,
            parallax_factor,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn on_scroll(&mut self, offset: f32) -> Vec2 {
        self.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.parallax_offset()
    }

    pub fn parallax_offset(&self) -> Vec2 {
        vec2(0.0, -self.scroll_offset * self.parallax_factor)
    }

    /// Records the new surface size and, when it changed, recenters `layout`.
    /// Returns whether anything changed.
    pub fn on_resize(&mut self, size: Vec2, layout: Option<&mut ForceLayout>) -> bool {
        if !(size.x.is_finite() && size.y.is_finite()) || size.x <= 0.0 || size.y <= 0.0 {
            return false;
        }
        if self.size == size {
            return false;
        }

        log::debug!("viewport resized to {:.0}x{:.0}", size.x, size.y);
        self.size = size;
        if let Some(layout) = layout {
            layout.set_center(self.center());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::graph::fixtures::abcd;
    use crate::graph::layout::{ForceParams, LayoutPhase};
    use crate::graph::links::build_links;

    #[test]
    fn parallax_follows_scroll() {
        let mut viewport = Viewport::new(vec2(800.0, 600.0), 0.25);
        assert_eq!(viewport.parallax_offset(), Vec2::ZERO);

        assert_eq!(viewport.on_scroll(200.0), vec2(0.0, -50.0));
        assert_eq!(viewport.on_scroll(200.0), vec2(0.0, -50.0));
        assert_eq!(viewport.on_scroll(-30.0), Vec2::ZERO);
        assert_eq!(viewport.on_scroll(f32::NAN), Vec2::ZERO);
    }

    #[test]
    fn resize_recenters_without_changing_links() {
        let items = abcd();
        let links = build_links(&items);
        let mut viewport = Viewport::new(vec2(800.0, 600.0), 0.1);
        let mut layout = ForceLayout::new(
            &items,
            &links,
            ForceParams::default(),
            viewport.center(),
            &HashMap::new(),
        );
        while layout.step() {}

        assert!(viewport.on_resize(vec2(1200.0, 900.0), Some(&mut layout)));
        assert_eq!(layout.center(), vec2(600.0, 450.0));
        assert_eq!(layout.phase(), LayoutPhase::Relaxing);
        assert_eq!(layout.link_count(), links.len());
        assert_eq!(build_links(&items), links);
    }

    #[test]
    fn repeated_or_degenerate_resizes_are_ignored() {
        let mut viewport = Viewport::new(vec2(800.0, 600.0), 0.1);
        assert!(!viewport.on_resize(vec2(800.0, 600.0), None));
        assert!(!viewport.on_resize(vec2(0.0, 600.0), None));
        assert!(viewport.on_resize(vec2(640.0, 480.0), None));
        assert!(!viewport.on_resize(vec2(640.0, 480.0), None));
        assert_eq!(viewport.center(), vec2(320.0, 240.0));
    }
}
