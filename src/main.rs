//! Native preview window for the ARES hero scene.

use std::path::PathBuf;

use ares_scene::{viewer::DEFAULT_PAGE_HEIGHT, SceneOptions, Viewer};
use clap::Parser;

/// Desktop preview of the ARES hero scene.
#[derive(Debug, Parser)]
#[command(name = "ares-scene", about)]
struct Args {
    /// TOML options file. Missing fields keep their defaults.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory holding the model file.
    #[arg(long, default_value = "public")]
    assets_dir: PathBuf,

    /// Static asset base path the model path is resolved against.
    #[arg(long, env = "PUBLIC_URL")]
    base_path: Option<String>,

    /// Height of the virtual page the mouse wheel scrolls, in pixels.
    #[arg(long, default_value_t = DEFAULT_PAGE_HEIGHT)]
    page_height: f32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut options = match args.config.as_deref().map(SceneOptions::load) {
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("{e}");
            std::process::exit(1);
        }
        None => SceneOptions::default(),
    };
    if let Some(base_path) = args.base_path {
        options.model.base_path = base_path;
    }

    let result = Viewer::builder()
        .with_options(options)
        .with_assets_dir(args.assets_dir)
        .with_page_height(args.page_height)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
