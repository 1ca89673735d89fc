use anyhow::Result;
use winit::dpi::LogicalSize;

use roundel_engine::core::{App as EngineApp, AppControl, FrameCtx, CLEAR_COLOR};
use roundel_engine::device::GpuInit;
use roundel_engine::render::{PanelRenderer, RenderCtx, SdfQuadRenderer};
use roundel_engine::scene::RenderState;
use roundel_engine::time::DEFAULT_FRAME_RATE;
use roundel_engine::window::{Runtime, RuntimeConfig};

use crate::event::UiInput;
use crate::panel::{DebugPanel, PanelLayout};

// ── Application ───────────────────────────────────────────────────────────

/// Top-level demo builder.
///
/// Configure the window and the initial [`RenderState`], optionally enable
/// the debug panel, then start the event loop with [`run`](Self::run).
///
/// ```rust,ignore
/// Application::new()
///     .title("SDF Rounded Rectangle")
///     .state(RenderState::default())
///     .debug_panel(true)
///     .run()?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    frame_rate: u32,
    state: RenderState,
    panel: Option<PanelLayout>,
    gpu: GpuInit,
}

impl Application {
    pub fn new() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            title: defaults.title,
            width: defaults.initial_size.width,
            height: defaults.initial_size.height,
            frame_rate: DEFAULT_FRAME_RATE,
            state: RenderState::default(),
            panel: None,
            gpu: GpuInit::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    ///
    /// The drawing canvas stays 640×480 and is stretched to fit.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn frame_rate(mut self, hz: u32) -> Self {
        self.frame_rate = hz;
        self
    }

    /// Initial values for the quad.
    pub fn state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    /// Show the slider panel with the default layout.
    pub fn debug_panel(mut self, enabled: bool) -> Self {
        self.panel = enabled.then(PanelLayout::default);
        self
    }

    pub fn panel_layout(mut self, layout: PanelLayout) -> Self {
        self.panel = Some(layout);
        self
    }

    /// GPU backend selection and surface preferences.
    pub fn gpu(mut self, init: GpuInit) -> Self {
        self.gpu = init;
        self
    }

    /// Start the event loop. Returns once the window has closed.
    ///
    /// Setup failures (window, adapter, device) are returned as errors.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(self.width, self.height),
            frame_rate: self.frame_rate,
        };
        let app = DemoApp::new(self.state, self.panel);

        log::info!(
            "starting '{}' ({} Hz, panel {})",
            config.title,
            config.frame_rate,
            if app.panel.is_some() { "on" } else { "off" },
        );
        Runtime::run(config, self.gpu, app)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── DemoApp ───────────────────────────────────────────────────────────────

/// Internal state that implements `roundel_engine::core::App`.
///
/// Owns the render state; the panel writes it and the renderers read it in
/// the same frame.
struct DemoApp {
    state: RenderState,
    panel: Option<DebugPanel>,

    /// Replaced by the initialized renderer in `on_gpu_ready`.
    quad: SdfQuadRenderer,
    panel_renderer: PanelRenderer,
}

impl DemoApp {
    fn new(state: RenderState, layout: Option<PanelLayout>) -> Self {
        Self {
            panel: layout.map(|l| DebugPanel::new(l, &state)),
            state,
            quad: SdfQuadRenderer::default(),
            panel_renderer: PanelRenderer::new(),
        }
    }
}

impl EngineApp for DemoApp {
    fn on_gpu_ready(&mut self, ctx: &RenderCtx<'_>) {
        self.quad = SdfQuadRenderer::initialize(ctx);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        log::debug!("drawable {width}x{height}; canvas stays fixed");
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // ── Input → state ─────────────────────────────────────────────────
        if let Some(panel) = self.panel.as_mut() {
            let input = UiInput::from_engine(ctx.input, ctx.input_frame);
            if panel.update(&input, &mut self.state) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        let overlay = self.panel.as_ref().map(|p| p.quads(&self.state));

        // ── Render ────────────────────────────────────────────────────────
        let state = &self.state;
        let quad = &self.quad;
        let panel_renderer = &mut self.panel_renderer;

        ctx.render(CLEAR_COLOR, |rctx, target| {
            quad.draw(rctx, target, state);

            if let Some(quads) = &overlay {
                panel_renderer.render(rctx, target, quads);
            }
        })
    }
}
