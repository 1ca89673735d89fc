use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::projection::LOGICAL_CANVAS;
use crate::time::{FramePacer, DEFAULT_FRAME_RATE};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Target frames per second.
    pub frame_rate: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "SDF Rounded Rectangle".to_string(),
            initial_size: LogicalSize::new(
                LOGICAL_CANVAS.width as f64,
                LOGICAL_CANVAS.height as f64,
            ),
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

/// Loop lifecycle. `Closing` is terminal: resources are released and the
/// event loop exits on the next opportunity.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum LoopState {
    Running,
    Closing,
}

/// How long the loop may sleep.
///
/// While a redraw is outstanding the deadline may already be in the past
/// (compositors hold back redraws for hidden windows), so the loop sleeps
/// until the redraw or another event arrives.
fn next_control_flow(frame_pending: bool, deadline: Instant) -> ControlFlow {
    if frame_pending {
        ControlFlow::Wait
    } else {
        ControlFlow::WaitUntil(deadline)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, drives `app` at the configured cadence and returns
    /// when the window closes.
    ///
    /// Setup failures (window, surface, adapter, device) are returned as
    /// errors after the event loop has shut down.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.setup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    pacer: FramePacer,
    /// A redraw was requested and has not been rendered yet.
    frame_pending: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    state: LoopState,
    setup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            state: LoopState::Running,
            setup_error: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            pacer: FramePacer::new(self.config.frame_rate),
            frame_pending: false,
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    /// Enters `Closing`; dropping the entry releases GPU handles before the window.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Running {
            log::info!("closing");
        }
        self.state = LoopState::Closing;
        self.window = None;
        event_loop.exit();
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(entry) = self.window.as_mut() else { return };
        entry.with_gpu_mut(|gpu| gpu.resize(new_size));
        log::debug!("resized to {}x{}", new_size.width, new_size.height);
        self.app.on_resize(new_size.width, new_size.height);
    }

    fn render_frame(&mut self) -> AppControl {
        let Some(entry) = self.window.as_mut() else {
            return AppControl::Continue;
        };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let control = {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    frame_index: fields.pacer.frame_index(),
                };
                app.on_frame(&mut ctx)
            };

            // Per-frame deltas are consumed once.
            fields.input_frame.clear();
            *fields.frame_pending = false;
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.state == LoopState::Closing {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_gpu(|gpu| self.app.on_gpu_ready(&gpu.render_ctx()));
                // The pacer's first deadline is now; about_to_wait issues the redraw.
                self.window = Some(entry);
            }
            Err(e) => {
                self.setup_error = Some(e);
                self.close(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Closing {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.window.as_mut() else { return };

        let now = Instant::now();
        let (pending, deadline) = entry.with_mut(|fields| {
            if !*fields.frame_pending && fields.pacer.is_due(now) {
                fields.pacer.advance();
                *fields.frame_pending = true;
                fields.window.request_redraw();
            }
            (*fields.frame_pending, fields.pacer.deadline())
        });

        event_loop.set_control_flow(next_control_flow(pending, deadline));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.state == LoopState::Closing {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else { return };

        entry.with_mut(|fields| {
            let surface_size = fields.gpu.size();
            if let Some(ev) = translate_window_event(&event, surface_size, LOGICAL_CANVAS) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.window.as_ref().map(|e| e.borrow_window().inner_size()) {
                    self.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                if self.render_frame() == AppControl::Exit {
                    self.close(event_loop);
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn pending_redraw_sleeps_without_deadline() {
        let overdue = Instant::now() - Duration::from_millis(50);
        assert_eq!(next_control_flow(true, overdue), ControlFlow::Wait);
    }

    #[test]
    fn idle_loop_sleeps_until_next_tick() {
        let mut pacer = FramePacer::new(60);
        pacer.advance();
        let deadline = pacer.deadline();
        assert_eq!(next_control_flow(false, deadline), ControlFlow::WaitUntil(deadline));
    }
}
