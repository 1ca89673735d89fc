//! Fixed scene: red fill, yellow 10px border, radius 30, no overlay.

use roundel_engine::logging::{init_logging, LoggingConfig};
use roundel_engine::scene::RenderState;
use roundel_ui::Application;

fn main() {
    init_logging(LoggingConfig::default());

    let result = Application::new()
        .state(RenderState::static_scene())
        .run();

    // Setup failures are reported, not turned into an exit status.
    if let Err(e) = result {
        log::error!("{e:#}");
    }
}
