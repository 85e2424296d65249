use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2, vec2};

use crate::catalog::{Catalog, load_catalog};
use crate::graph::interaction::{Highlight, derive_highlight};
use crate::graph::{
    ForceLayout, ForceParams, HighlightStyle, HoverState, Projection, TagFilter, TickFrame,
    TickObserver, Viewport,
};

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Copy, Debug)]
pub struct ViewSettings {
    pub parallax_factor: f32,
}

pub struct MoodGraphApp {
    settings: ViewSettings,
    state: AppState,
}

enum AppState {
    Loading { rx: Receiver<Result<Catalog, String>> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    catalog: Catalog,
    theme_counts: Vec<(String, usize)>,
    filter: TagFilter,
    tag_search: String,
    projection: Projection,
    layout: Option<ForceLayout>,
    force_params: ForceParams,
    live_physics: bool,
    hover: HoverState,
    glyph_hover: Option<String>,
    legend_hover: Option<String>,
    highlight: Highlight,
    highlight_style: HighlightStyle,
    viewport: Viewport,
    activated: Option<String>,
    scratch: ViewScratch,
}

/// Positions as last reported by the layout, in layout node order.
#[derive(Default)]
struct ViewScratch {
    index_by_id: HashMap<String, usize>,
    world_positions: Vec<Vec2>,
    ticks: u64,
}

impl ViewScratch {
    fn rebind(&mut self, layout: &ForceLayout) {
        let frame = layout.frame();
        self.index_by_id.clear();
        for (index, node) in frame.nodes.iter().enumerate() {
            self.index_by_id.insert(node.id.to_owned(), index);
        }
        self.ticks = 0;
        self.store(&frame);
    }

    fn store(&mut self, frame: &TickFrame<'_>) {
        self.world_positions.clear();
        self.world_positions
            .extend(frame.nodes.iter().map(|node| node.position));
    }

    fn position(&self, id: &str) -> Option<Vec2> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.world_positions.get(index))
            .copied()
    }
}

impl TickObserver for ViewScratch {
    fn on_tick(&mut self, frame: &TickFrame<'_>) {
        self.ticks += 1;
        self.store(frame);
    }
}

impl MoodGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, settings: ViewSettings) -> Self {
        Self {
            settings,
            state: AppState::Loading {
                rx: Self::spawn_load(data_path),
            },
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<Result<Catalog, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_catalog(&data_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for MoodGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(catalog)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            catalog,
                            self.settings,
                        ))));
                    }
                    Ok(Err(error)) => {
                        log::error!("data load failed: {error}");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading mood graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the graph data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(catalog: Catalog, settings: ViewSettings) -> Self {
        let theme_counts = catalog.theme_counts();
        let highlight_style = HighlightStyle::default();

        let mut model = Self {
            catalog,
            theme_counts,
            filter: TagFilter::all(),
            tag_search: String::new(),
            projection: Projection::default(),
            layout: None,
            force_params: ForceParams::default(),
            live_physics: true,
            hover: HoverState::Idle,
            glyph_hover: None,
            legend_hover: None,
            highlight: derive_highlight(&Projection::default(), &HoverState::Idle, &highlight_style),
            highlight_style,
            viewport: Viewport::new(vec2(960.0, 720.0), settings.parallax_factor),
            activated: None,
            scratch: ViewScratch::default(),
        };
        model.rebuild_projection();
        model
    }
}
