//! keyscope - terminal MIDI keyboard monitor
//!
//! Run with: cargo run

mod app;
mod ui;

use app::App;
use env_logger::Env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    App::new().run()
}
