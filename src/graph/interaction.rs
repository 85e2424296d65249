use std::collections::{HashMap, HashSet};

use eframe::egui::Color32;

use super::links::Link;
use super::projection::Projection;

/// Which node, if any, the pointer is over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(String),
}

/// Pointer transitions over node glyphs. `Leave` names the node being left so
/// a late leave for a node that is no longer hovered can be ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter(String),
    Leave(String),
}

impl HoverState {
    pub fn hovered(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Hovering(id) => Some(id.as_str()),
        }
    }

    /// Applies `event` and reports whether the state changed. The result is
    /// always consistent with the most recent `Enter`, whichever order the
    /// leave/enter pair of a direct transfer arrives in.
    pub fn apply(&mut self, event: PointerEvent) -> bool {
        let next = match (&*self, event) {
            (_, PointerEvent::Enter(id)) => Self::Hovering(id),
            (Self::Hovering(current), PointerEvent::Leave(id)) if *current == id => Self::Idle,
            (current, PointerEvent::Leave(_)) => current.clone(),
        };

        if *self == next {
            return false;
        }
        log::debug!("hover {:?} -> {:?}", self, next);
        *self = next;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
    Hovered,
    Connected,
    Other,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEmphasis {
    Touching,
    Other,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub emphasis: NodeEmphasis,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkStyle {
    pub emphasis: LinkEmphasis,
    pub opacity: f32,
    pub color: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
    pub hover_scale: f32,
    pub connected_scale: f32,
    pub dimmed_opacity: f32,
    pub neutral_link_opacity: f32,
    pub dimmed_link_opacity: f32,
    pub neutral_link_color: Color32,
    pub highlight_link_color: Color32,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            hover_scale: 1.3,
            connected_scale: 1.12,
            dimmed_opacity: 0.22,
            neutral_link_opacity: 0.55,
            dimmed_link_opacity: 0.08,
            neutral_link_color: Color32::from_rgb(120, 128, 140),
            highlight_link_color: Color32::from_rgb(241, 146, 94),
        }
    }
}

impl HighlightStyle {
    fn neutral_node(&self) -> NodeStyle {
        NodeStyle {
            emphasis: NodeEmphasis::Neutral,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    fn neutral_link(&self) -> LinkStyle {
        LinkStyle {
            emphasis: LinkEmphasis::Neutral,
            opacity: self.neutral_link_opacity,
            color: self.neutral_link_color,
        }
    }
}

/// Per-element styling derived from the current graph and hover state.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    pub hovered: Option<String>,
    pub connected: HashSet<String>,
    pub nodes: HashMap<String, NodeStyle>,
    /// Parallel to `Projection::links`.
    pub links: Vec<LinkStyle>,
}

impl Highlight {
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.hovered.is_some()
    }

    pub fn node(&self, id: &str) -> Option<NodeStyle> {
        self.nodes.get(id).copied()
    }

    pub fn link(&self, index: usize) -> Option<LinkStyle> {
        self.links.get(index).copied()
    }
}

pub fn connected_ids(links: &[Link], id: &str) -> HashSet<String> {
    links
        .iter()
        .filter_map(|link| link.opposite(id))
        .filter(|other| *other != id)
        .map(str::to_owned)
        .collect()
}

/// Pure projection of (graph, hover) onto styles. A hover id that is not in
/// `projection` is treated as `Idle`.
pub fn derive_highlight(
    projection: &Projection,
    hover: &HoverState,
    style: &HighlightStyle,
) -> Highlight {
    let hovered = hover
        .hovered()
        .filter(|id| projection.contains(id))
        .map(str::to_owned);

    let Some(hovered_id) = hovered.as_deref() else {
        return Highlight {
            hovered: None,
            connected: HashSet::new(),
            nodes: projection
                .nodes
                .iter()
                .map(|node| (node.id.clone(), style.neutral_node()))
                .collect(),
            links: vec![style.neutral_link(); projection.links.len()],
        };
    };

    let connected = connected_ids(&projection.links, hovered_id);

    let nodes = projection
        .nodes
        .iter()
        .map(|node| {
            let node_style = if node.id == hovered_id {
                NodeStyle {
                    emphasis: NodeEmphasis::Hovered,
                    opacity: 1.0,
                    scale: style.hover_scale,
                }
            } else if connected.contains(&node.id) {
                NodeStyle {
                    emphasis: NodeEmphasis::Connected,
                    opacity: 1.0,
                    scale: style.connected_scale,
                }
            } else {
                NodeStyle {
                    emphasis: NodeEmphasis::Other,
                    opacity: style.dimmed_opacity,
                    scale: 1.0,
                }
            };
            (node.id.clone(), node_style)
        })
        .collect();

    let links = projection
        .links
        .iter()
        .map(|link| {
            if link.touches(hovered_id) {
                LinkStyle {
                    emphasis: LinkEmphasis::Touching,
                    opacity: 1.0,
                    color: style.highlight_link_color,
                }
            } else {
                LinkStyle {
                    emphasis: LinkEmphasis::Other,
                    opacity: style.dimmed_link_opacity,
                    color: style.neutral_link_color,
                }
            }
        })
        .collect();

    Highlight {
        hovered,
        connected,
        nodes,
        links,
    }
}
