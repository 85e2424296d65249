mod app;
mod catalog;
mod graph;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON document with a `nodes` array of tagged images.
    #[arg(long, default_value = "data/nodes.json")]
    data: PathBuf,

    /// How far the scene shifts per unit of vertical scroll.
    #[arg(long, default_value_t = 0.15)]
    parallax: f32,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 820.0)]
    height: f32,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let settings = app::ViewSettings {
        parallax_factor: args.parallax,
    };

    eframe::run_native(
        "moodgraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::MoodGraphApp::new(
                cc,
                args.data.clone(),
                settings,
            )))
        }),
    )
}
