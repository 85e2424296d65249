use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::catalog::Item;
use crate::util::stable_index;

pub(super) const NODE_RADIUS: f32 = 26.0;

const THEME_PALETTE: [Color32; 8] = [
    Color32::from_rgb(96, 165, 250),
    Color32::from_rgb(244, 114, 182),
    Color32::from_rgb(52, 211, 153),
    Color32::from_rgb(251, 191, 36),
    Color32::from_rgb(167, 139, 250),
    Color32::from_rgb(248, 113, 113),
    Color32::from_rgb(45, 212, 191),
    Color32::from_rgb(251, 146, 60),
];

const UNTAGGED_COLOR: Color32 = Color32::from_rgb(148, 156, 168);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn fade(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

/// Glyph fill keyed on the item's first theme.
pub(super) fn theme_color(item: &Item) -> Color32 {
    item.themes
        .first()
        .map(|theme| THEME_PALETTE[stable_index(theme, THEME_PALETTE.len())])
        .unwrap_or(UNTAGGED_COLOR)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, parallax: Vec2) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 56.0;
    let origin = rect.min + parallax;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn segment_visible(rect: Rect, start: Pos2, end: Pos2) -> bool {
    let min_x = start.x.min(end.x);
    let max_x = start.x.max(end.x);
    let min_y = start.y.min(end.y);
    let max_y = start.y.max(end.y);

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

/// `origin` is the canvas top-left plus the parallax offset.
pub(super) fn world_to_screen(origin: Vec2, world: Vec2) -> Pos2 {
    (origin + world).to_pos2()
}

pub(super) fn screen_to_world(origin: Vec2, screen: Pos2) -> Vec2 {
    screen.to_vec2() - origin
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn screen_and_world_round_trip() {
        let origin = vec2(200.0, 40.0);
        let world = vec2(13.0, -7.5);
        assert_eq!(screen_to_world(origin, world_to_screen(origin, world)), world);
    }

    #[test]
    fn fade_lowers_alpha() {
        let color = fade(Color32::from_rgb(10, 20, 30), 0.5);
        assert!(color.a() < 255);
        assert_eq!(fade(Color32::from_rgb(10, 20, 30), 1.0), Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn segments_crossing_the_rect_are_visible() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(segment_visible(rect, pos2(-50.0, 50.0), pos2(150.0, 50.0)));
        assert!(!segment_visible(rect, pos2(-50.0, -50.0), pos2(-10.0, -10.0)));
        assert!(circle_visible(rect, pos2(105.0, 50.0), 10.0));
    }
}
