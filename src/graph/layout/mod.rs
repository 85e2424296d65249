//! Continuously relaxing spring/charge layout.
//!
//! The simulation carries a temperature (`alpha`) that scales every force
//! except collision. Each [`ForceLayout::step`] moves `alpha` toward its
//! target; once it drops below `alpha_min` the layout is settled and stops
//! moving until something reheats it (a drag, a resize, a parameter change).
//! A new node set always means a new `ForceLayout`.

mod forces;
mod seed;

use std::collections::{HashMap, HashSet};

use eframe::egui::Vec2;

use crate::catalog::Item;

use super::links::Link;
use forces::{Spring, apply_centering, apply_collisions, apply_repulsion, apply_springs};
use seed::seed_position;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    /// Rest length of a link spring.
    pub link_distance: f32,
    /// Multiplier on the per-link stiffness `1 / min(degree)`.
    pub link_strength: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    /// Radius of a node glyph plus padding; pairs closer than twice this are
    /// pushed apart.
    pub collision_radius: f32,
    pub collision_strength: f32,
    pub velocity_decay: f32,
    pub alpha_decay: f32,
    pub alpha_min: f32,
    /// Temperature a drag, resize or manual reheat raises the layout to.
    pub reheat_alpha: f32,
    pub max_speed: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            link_distance: 110.0,
            link_strength: 1.0,
            charge_strength: 260.0,
            center_strength: 0.04,
            collision_radius: 34.0,
            collision_strength: 0.7,
            velocity_decay: 0.4,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_min,
            reheat_alpha: 0.3,
            max_speed: 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutPhase {
    Initializing,
    Relaxing,
    Settled,
}

impl LayoutPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Relaxing => "relaxing",
            Self::Settled => "settled",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    Start { id: String, position: Vec2 },
    Move { position: Vec2 },
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame<'a> {
    pub id: &'a str,
    pub position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkFrame<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub from: Vec2,
    pub to: Vec2,
}

/// Positions handed to the renderer after every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickFrame<'a> {
    pub nodes: Vec<NodeFrame<'a>>,
    pub links: Vec<LinkFrame<'a>>,
}

pub trait TickObserver {
    fn on_tick(&mut self, frame: &TickFrame<'_>);
}

#[derive(Clone, Debug)]
struct LayoutNode {
    id: String,
    position: Vec2,
    velocity: Vec2,
    pinned: Option<Vec2>,
    seed: Vec2,
}

#[derive(Default)]
struct LayoutScratch {
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
}

pub struct ForceLayout {
    nodes: Vec<LayoutNode>,
    springs: Vec<Spring>,
    index_by_id: HashMap<String, usize>,
    params: ForceParams,
    center: Vec2,
    alpha: f32,
    alpha_target: f32,
    phase: LayoutPhase,
    dragging: Option<usize>,
    scratch: LayoutScratch,
}

impl ForceLayout {
    /// Binds `nodes` and `links`. Nodes whose id appears in `prior` start
    /// from that position; the rest are seeded around `center` in input
    /// order. Links naming an id outside `nodes` are dropped.
    pub fn new(
        nodes: &[Item],
        links: &[Link],
        params: ForceParams,
        center: Vec2,
        prior: &HashMap<String, Vec2>,
    ) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        let mut layout_nodes = Vec::with_capacity(nodes.len());
        for (index, item) in nodes.iter().enumerate() {
            if index_by_id.contains_key(&item.id) {
                log::debug!("layout ignores repeated node id {:?}", item.id);
                continue;
            }

            let seed = seed_position(index, &item.id, center);
            let position = prior
                .get(&item.id)
                .copied()
                .filter(|position| position.x.is_finite() && position.y.is_finite())
                .unwrap_or(seed);

            index_by_id.insert(item.id.clone(), layout_nodes.len());
            layout_nodes.push(LayoutNode {
                id: item.id.clone(),
                position,
                velocity: Vec2::ZERO,
                pinned: None,
                seed,
            });
        }

        let mut pairs = Vec::with_capacity(links.len());
        let mut seen = HashSet::with_capacity(links.len());
        for link in links {
            let (Some(&source), Some(&target)) = (
                index_by_id.get(&link.source),
                index_by_id.get(&link.target),
            ) else {
                log::debug!(
                    "dropping link {:?} -> {:?}: endpoint not in layout",
                    link.source,
                    link.target
                );
                continue;
            };

            if source == target || !seen.insert((source.min(target), source.max(target))) {
                continue;
            }
            pairs.push((source, target));
        }

        let mut degree = vec![0usize; layout_nodes.len()];
        for &(source, target) in &pairs {
            degree[source] += 1;
            degree[target] += 1;
        }

        let springs = pairs
            .into_iter()
            .map(|(source, target)| Spring {
                source,
                target,
                strength: 1.0 / degree[source].min(degree[target]) as f32,
                bias: degree[source] as f32 / (degree[source] + degree[target]) as f32,
            })
            .collect();

        Self {
            nodes: layout_nodes,
            springs,
            index_by_id,
            params,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            phase: LayoutPhase::Initializing,
            dragging: None,
            scratch: LayoutScratch::default(),
        }
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == LayoutPhase::Settled
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[cfg(test)]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[cfg(test)]
    pub fn params(&self) -> ForceParams {
        self.params
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.springs.len()
    }

    pub fn position(&self, id: &str) -> Option<Vec2> {
        self.index_by_id
            .get(id)
            .map(|&index| self.nodes[index].position)
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.index_by_id
            .get(id)
            .is_some_and(|&index| self.nodes[index].pinned.is_some())
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.dragging.map(|index| self.nodes[index].id.as_str())
    }

    /// Current positions by id, used to seed the next layout.
    pub fn snapshot(&self) -> HashMap<String, Vec2> {
        self.nodes
            .iter()
            .map(|node| (node.id.clone(), node.position))
            .collect()
    }

    pub fn frame(&self) -> TickFrame<'_> {
        TickFrame {
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeFrame {
                    id: &node.id,
                    position: node.position,
                })
                .collect(),
            links: self
                .springs
                .iter()
                .map(|spring| {
                    let source = &self.nodes[spring.source];
                    let target = &self.nodes[spring.target];
                    LinkFrame {
                        source: &source.id,
                        target: &target.id,
                        from: source.position,
                        to: target.position,
                    }
                })
                .collect(),
        }
    }

    /// Raises the temperature to at least `reheat_alpha` and resumes ticking.
    pub fn reheat(&mut self) {
        self.alpha = self.alpha.max(self.params.reheat_alpha);
        self.phase = LayoutPhase::Relaxing;
    }

    pub fn set_params(&mut self, params: ForceParams) {
        if self.params == params {
            return;
        }
        self.params = params;
        self.reheat();
    }

    /// Moves the centering target, then reheats so nodes drift toward it.
    /// Links and node identities are untouched.
    pub fn set_center(&mut self, center: Vec2) {
        if self.center == center {
            return;
        }
        log::debug!("layout center moved to ({:.1}, {:.1})", center.x, center.y);
        self.center = center;
        self.reheat();
    }

    /// Applies a drag gesture. Positions that are not finite are ignored so a
    /// pin can never hold NaN.
    pub fn handle_drag(&mut self, event: DragEvent) {
        if let DragEvent::Start { position, .. } | DragEvent::Move { position } = &event
            && !position.is_finite()
        {
            log::debug!("ignoring drag to non-finite position {position:?}");
            return;
        }

        match event {
            DragEvent::Start { id, position } => {
                let Some(&index) = self.index_by_id.get(&id) else {
                    log::debug!("drag start on unknown node {id:?}");
                    return;
                };

                if let Some(previous) = self.dragging.replace(index)
                    && previous != index
                {
                    self.nodes[previous].pinned = None;
                }

                let node = &mut self.nodes[index];
                node.pinned = Some(position);
                node.position = position;
                node.velocity = Vec2::ZERO;
                self.alpha_target = self.params.reheat_alpha;
                self.phase = LayoutPhase::Relaxing;
            }
            DragEvent::Move { position } => {
                let Some(index) = self.dragging else {
                    return;
                };
                let node = &mut self.nodes[index];
                node.pinned = Some(position);
                node.position = position;
            }
            DragEvent::End => {
                let Some(index) = self.dragging.take() else {
                    return;
                };
                self.nodes[index].pinned = None;
                self.alpha_target = 0.0;
            }
        }
    }

    /// Advances one tick. Returns `false` without moving anything once the
    /// layout has settled.
    pub fn step(&mut self) -> bool {
        if self.phase == LayoutPhase::Settled {
            return false;
        }
        self.phase = LayoutPhase::Relaxing;

        self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
        self.reset_non_finite();

        let node_count = self.nodes.len();
        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.velocities.clear();
        scratch
            .positions
            .extend(self.nodes.iter().map(|node| node.position));
        scratch
            .velocities
            .extend(self.nodes.iter().map(|node| node.velocity));

        let params = self.params;
        let positions = &scratch.positions;
        let velocities = &mut scratch.velocities;

        apply_springs(
            &self.springs,
            positions,
            velocities,
            params.link_distance,
            self.alpha * params.link_strength,
        );
        apply_repulsion(positions, velocities, params.charge_strength, self.alpha);
        apply_centering(
            positions,
            velocities,
            self.center,
            params.center_strength,
            self.alpha,
        );
        apply_collisions(
            positions,
            velocities,
            params.collision_radius,
            params.collision_strength,
        );

        let retain = (1.0 - params.velocity_decay).clamp(0.0, 1.0);
        let max_speed_sq = params.max_speed * params.max_speed;
        for (node, velocity) in self.nodes.iter_mut().zip(velocities.iter()).take(node_count) {
            if let Some(pinned) = node.pinned {
                node.position = pinned;
                node.velocity = Vec2::ZERO;
                continue;
            }

            let mut velocity = *velocity * retain;
            let speed_sq = velocity.length_sq();
            if speed_sq > max_speed_sq {
                velocity *= params.max_speed / speed_sq.sqrt();
            }
            node.velocity = velocity;
            node.position += velocity;
        }

        self.reset_non_finite();

        if self.alpha < params.alpha_min {
            self.phase = LayoutPhase::Settled;
        }
        true
    }

    /// Steps once and reports the new positions to `observer`.
    pub fn run_tick(&mut self, observer: &mut impl TickObserver) -> bool {
        if !self.step() {
            return false;
        }
        observer.on_tick(&self.frame());
        true
    }

    fn reset_non_finite(&mut self) {
        for node in &mut self.nodes {
            let finite = node.position.x.is_finite()
                && node.position.y.is_finite()
                && node.velocity.x.is_finite()
                && node.velocity.y.is_finite();
            if finite {
                continue;
            }

            log::warn!("resetting node {:?} to its seed after a non-finite update", node.id);
            node.position = node
                .pinned
                .filter(|pinned| pinned.is_finite())
                .unwrap_or(node.seed);
            node.velocity = Vec2::ZERO;
        }
    }
}
