//! Same renderer as `roundel-static`, driven by the slider panel.
//!
//! Keys `1`-`4` pick the corner whose color the R/G/B/A sliders edit;
//! `Escape` quits.

use roundel_engine::logging::{init_logging, LoggingConfig};
use roundel_engine::scene::RenderState;
use roundel_ui::Application;

fn main() {
    init_logging(LoggingConfig::default());

    let result = Application::new()
        .title("SDF Rounded Rectangle (debug)")
        .state(RenderState::default())
        .debug_panel(true)
        .run();

    if let Err(e) = result {
        log::error!("{e:#}");
    }
}
